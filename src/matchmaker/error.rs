//! Matchmaker error types

use super::entity::EntityId;
use std::fmt;

/// Errors that can occur while configuring or running the matchmaker
#[derive(Debug)]
pub enum MatchmakerError {
    /// Configuration values that cannot produce a meaningful run
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// Configuration document could not be parsed
    Config(serde_json::Error),

    /// A report could not be serialized
    Serialization(serde_json::Error),

    /// The idle queue ran dry while no search was active and the run was not capped.
    /// Entities were lost by the scheduler.
    QueueUnderflow {
        /// Pairings completed when the underflow was detected
        pairings: u64,
        /// Pairing cap of the run
        cap: u64,
    },

    /// The shared index lock could not be acquired in time
    LockTimeout {
        /// Entity whose search gave up waiting
        entity: EntityId,
        /// How long it waited, in milliseconds
        waited_ms: u64,
    },

    /// Entity is not part of the population
    EntityNotFound(EntityId),

    /// A search thread could not be started
    SpawnFailed(std::io::Error),

    /// Operation not permitted in the current state
    InvalidOperation {
        /// Description of the error
        message: String,
    },
}

impl fmt::Display for MatchmakerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchmakerError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            MatchmakerError::Config(err) => write!(f, "Configuration error: {}", err),
            MatchmakerError::Serialization(err) => write!(f, "Serialization error: {}", err),
            MatchmakerError::QueueUnderflow { pairings, cap } => {
                write!(
                    f,
                    "Idle queue underflow with no active search after {} of {} pairings",
                    pairings, cap
                )
            }
            MatchmakerError::LockTimeout { entity, waited_ms } => {
                write!(
                    f,
                    "Entity {} timed out after {}ms waiting for the index lock",
                    entity, waited_ms
                )
            }
            MatchmakerError::EntityNotFound(id) => write!(f, "Entity not found: {}", id),
            MatchmakerError::SpawnFailed(err) => write!(f, "Failed to spawn search: {}", err),
            MatchmakerError::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl std::error::Error for MatchmakerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchmakerError::Config(err) => Some(err),
            MatchmakerError::Serialization(err) => Some(err),
            MatchmakerError::SpawnFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MatchmakerError {
    fn from(err: serde_json::Error) -> Self {
        MatchmakerError::Config(err)
    }
}

impl From<std::io::Error> for MatchmakerError {
    fn from(err: std::io::Error) -> Self {
        MatchmakerError::SpawnFailed(err)
    }
}
