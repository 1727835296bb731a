//! Executes pairings: outcome draw, rating update, pairing counters.

use super::entity::{Entity, EntityId};
use crate::current_time_millis;
use crate::rating::{Outcome, RatingModel};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;
use uuid::Uuid;

/// Permission to run one pairing, handed out under the pairing cap.
#[derive(Debug, PartialEq, Eq)]
pub struct PairingSlot {
    sequence: u64,
}

impl PairingSlot {
    /// One-based position of this pairing in the run
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// A completed pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRecord {
    /// Unique id of the pairing, derived from the run namespace and sequence
    pub id: Uuid,
    /// One-based position of the pairing in the run
    pub sequence: u64,
    /// Entity whose search found the collision
    pub first: EntityId,
    /// Entity whose node was found in the index
    pub second: EntityId,
    /// Result from the first entity's side
    pub outcome: Outcome,
    /// Rating change computed for the first entity
    pub delta: i32,
    /// First entity's rating after the pairing
    pub first_rating: u32,
    /// Second entity's rating after the pairing
    pub second_rating: u32,
    /// When the pairing completed (milliseconds since epoch)
    pub timestamp: u64,
}

impl PairingRecord {
    /// The entity that won, if the pairing was not drawn
    pub fn winner(&self) -> Option<EntityId> {
        match self.outcome {
            Outcome::Win => Some(self.first),
            Outcome::Loss => Some(self.second),
            Outcome::Draw => None,
        }
    }

    /// The entity that lost, if the pairing was not drawn
    pub fn loser(&self) -> Option<EntityId> {
        match self.outcome {
            Outcome::Win => Some(self.second),
            Outcome::Loss => Some(self.first),
            Outcome::Draw => None,
        }
    }
}

/// Runs pairings and keeps the process-wide counters of a run.
#[derive(Debug)]
pub struct PairingEngine {
    model: RatingModel,
    cap: u64,
    reserved: AtomicU64,
    completed: AtomicU64,
    peak_rating: AtomicU32,
    namespace: Uuid,
}

impl PairingEngine {
    /// Create an engine allowing at most `cap` pairings
    pub fn new(model: RatingModel, cap: u64) -> Self {
        Self {
            model,
            cap,
            reserved: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            peak_rating: AtomicU32::new(0),
            namespace: Uuid::new_v4(),
        }
    }

    /// The rating model applied to every pairing
    pub fn model(&self) -> &RatingModel {
        &self.model
    }

    /// Namespace the pairing ids are derived from
    pub fn namespace(&self) -> Uuid {
        self.namespace
    }

    /// Maximum number of pairings
    pub fn cap(&self) -> u64 {
        self.cap
    }

    /// Pairings handed a slot so far
    pub fn reserved(&self) -> u64 {
        self.reserved.load(Ordering::Acquire)
    }

    /// Pairings whose rating update has been applied
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Whether every slot under the cap has been handed out
    pub fn is_capped(&self) -> bool {
        self.reserved() >= self.cap
    }

    /// Highest rating observed so far
    pub fn peak_rating(&self) -> u32 {
        self.peak_rating.load(Ordering::Acquire)
    }

    /// Fold a rating into the peak, e.g. the starting ratings
    pub fn observe_rating(&self, rating: u32) {
        self.peak_rating.fetch_max(rating, Ordering::AcqRel);
    }

    /// Reserve the next pairing slot, or `None` once the cap is reached.
    pub fn try_reserve(&self) -> Option<PairingSlot> {
        let cap = self.cap;
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |reserved| {
                (reserved < cap).then_some(reserved + 1)
            })
            .ok()
            .map(|previous| PairingSlot {
                sequence: previous + 1,
            })
    }

    /// Pair `first` against `second` with a uniformly drawn outcome.
    pub fn pair(&self, slot: PairingSlot, first: &Entity, second: &Entity) -> PairingRecord {
        let draw: f64 = rand::rng().random();
        self.pair_with_draw(slot, first, second, draw)
    }

    /// Pair with an explicit draw in `[0, 1)`.
    ///
    /// `first` wins when `draw <= expectation(first, second)`, otherwise
    /// `second` wins. Draws are never produced.
    pub fn pair_with_draw(
        &self,
        slot: PairingSlot,
        first: &Entity,
        second: &Entity,
        draw: f64,
    ) -> PairingRecord {
        let (first_rating, second_rating) = (first.rating(), second.rating());
        let outcome = if draw <= RatingModel::expectation(first_rating, second_rating) {
            Outcome::Win
        } else {
            Outcome::Loss
        };

        let update = self.model.apply(outcome, first_rating, second_rating);
        first.record_pairing(update.first);
        second.record_pairing(update.second);
        self.observe_rating(update.first.max(update.second));
        self.completed.fetch_add(1, Ordering::AcqRel);

        trace!(
            "Pairing {}: {} ({}) vs {} ({}) -> {} {:+}",
            slot.sequence,
            first.id(),
            first_rating,
            second.id(),
            second_rating,
            outcome,
            update.delta
        );

        PairingRecord {
            id: Uuid::new_v5(&self.namespace, &slot.sequence.to_be_bytes()),
            sequence: slot.sequence,
            first: first.id(),
            second: second.id(),
            outcome,
            delta: update.delta,
            first_rating: update.first,
            second_rating: update.second,
            timestamp: current_time_millis(),
        }
    }
}
