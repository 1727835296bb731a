//! Elo-style rating model used to score pairings.

mod model;

pub use model::{DEFAULT_K_FACTOR, Outcome, RatingModel, RatingUpdate};
