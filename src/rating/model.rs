//! Win expectation and rating deltas for a single pairing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default sensitivity of rating updates.
pub const DEFAULT_K_FACTOR: f64 = 60.0;

/// Rating difference at which the stronger side is expected to win ten times as often.
const LOGISTIC_SCALE: f64 = 400.0;

/// Result of a pairing, seen from one participant's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The participant won
    Win,
    /// Neither side won
    Draw,
    /// The participant lost
    Loss,
}

impl Outcome {
    /// Actual score credited for this outcome.
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    /// The same result from the opponent's side.
    pub fn reverse(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Draw => write!(f, "DRAW"),
            Outcome::Loss => write!(f, "LOSS"),
        }
    }
}

/// Ratings of both participants after a pairing was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingUpdate {
    /// Signed delta computed for the first participant before clipping
    pub delta: i32,
    /// New rating of the first participant
    pub first: u32,
    /// New rating of the second participant
    pub second: u32,
}

/// Logistic rating model with a fixed K-factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingModel {
    k_factor: f64,
}

impl RatingModel {
    /// Create a model with the given K-factor
    pub fn new(k_factor: f64) -> Self {
        Self { k_factor }
    }

    /// The K-factor of this model
    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    /// Probability that a player rated `rating` beats one rated `opponent`.
    ///
    /// `expectation(a, b) + expectation(b, a)` is always one.
    pub fn expectation(rating: u32, opponent: u32) -> f64 {
        let difference = f64::from(opponent) - f64::from(rating);
        1.0 / (1.0 + 10f64.powf(difference / LOGISTIC_SCALE))
    }

    /// Rounded rating change for the side rated `rating`.
    pub fn delta(&self, outcome: Outcome, rating: u32, opponent: u32) -> i32 {
        let change = self.k_factor * (outcome.score() - Self::expectation(rating, opponent));
        change.round() as i32
    }

    /// Apply `outcome` (from the first participant's side) to both ratings.
    ///
    /// The update is zero-sum except where a rating would drop below zero: such
    /// ratings are clipped to zero and the other side keeps its full delta.
    pub fn apply(&self, outcome: Outcome, first: u32, second: u32) -> RatingUpdate {
        let delta = self.delta(outcome, first, second);
        RatingUpdate {
            delta,
            first: Self::shift(first, i64::from(delta)),
            second: Self::shift(second, -i64::from(delta)),
        }
    }

    fn shift(rating: u32, delta: i64) -> u32 {
        (i64::from(rating) + delta).clamp(0, i64::from(u32::MAX)) as u32
    }
}

impl Default for RatingModel {
    fn default() -> Self {
        Self::new(DEFAULT_K_FACTOR)
    }
}
