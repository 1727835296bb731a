//! Final standings of a run

use super::engine::PairingRecord;
use super::entity::EntityId;
use super::error::MatchmakerError;
use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

/// Rating and pairing count of one entity at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStanding {
    /// The entity
    pub id: EntityId,
    /// Final rating
    pub rating: u32,
    /// Pairings completed
    pub pairings: u64,
}

/// Data produced by a run. Formatting it is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Namespace of the run; pairing ids are derived from it
    pub run_id: Uuid,

    /// When the report was produced (milliseconds since epoch)
    pub timestamp: u64,

    /// Wall time the run took, in milliseconds
    pub elapsed_ms: u64,

    /// Pairings completed
    pub total_pairings: u64,

    /// Pairing cap the run was configured with
    pub pairing_cap: u64,

    /// Highest rating observed at any point of the run
    pub peak_rating: u32,

    /// Searches still counted as running when the report was taken
    pub active_searches: usize,

    /// Per-entity results in creation order
    pub standings: Vec<EntityStanding>,

    /// Every pairing in completion order, when history was recorded
    pub history: Vec<PairingRecord>,
}

impl RunReport {
    /// The entity with the highest final rating, lowest id on ties
    pub fn leader(&self) -> Option<&EntityStanding> {
        let leader = self
            .standings
            .iter()
            .max_by(|a, b| a.rating.cmp(&b.rating).then(b.id.cmp(&a.id)));
        trace!("leader: {:?}", leader);
        leader
    }

    /// Standing of a single entity
    pub fn standing(&self, id: EntityId) -> Option<&EntityStanding> {
        self.standings.iter().find(|standing| standing.id == id)
    }

    /// Sum of all final ratings
    pub fn total_rating(&self) -> u64 {
        let total = self
            .standings
            .iter()
            .map(|standing| u64::from(standing.rating))
            .sum();
        trace!("total_rating: {}", total);
        total
    }

    /// Sum of the per-entity pairing counts; twice the number of pairings
    pub fn total_participations(&self) -> u64 {
        self.standings.iter().map(|standing| standing.pairings).sum()
    }

    /// Standings sorted by rating, highest first
    pub fn ranking(&self) -> Vec<EntityStanding> {
        let mut ranking = self.standings.clone();
        ranking.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        ranking
    }

    /// Serialize the report as JSON
    pub fn to_json(&self) -> Result<String, MatchmakerError> {
        serde_json::to_string_pretty(self).map_err(MatchmakerError::Serialization)
    }
}
