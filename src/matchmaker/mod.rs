//! Concurrent matchmaking: entities, search processes, pairing and coordination.

mod cancel;
mod config;
mod context;
mod coordinator;
mod engine;
mod entity;
mod error;
mod queue;
mod report;
mod search;

pub use cancel::CancelToken;
pub use config::{
    DEFAULT_ENTITY_COUNT, DEFAULT_INITIAL_RATING, DEFAULT_PAIRING_CAP, MatchmakerConfig,
    default_tolerance_ladder,
};
pub use coordinator::Coordinator;
pub use engine::{PairingEngine, PairingRecord, PairingSlot};
pub use entity::{Entity, EntityId, Population};
pub use error::MatchmakerError;
pub use queue::{IdleEvent, IdleQueue};
pub use report::{EntityStanding, RunReport};
pub use search::{SearchHandle, SearchOutcome};
