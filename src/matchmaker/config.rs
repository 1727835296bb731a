//! Run configuration

use super::error::MatchmakerError;
use crate::rating::DEFAULT_K_FACTOR;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of entities created at startup
pub const DEFAULT_ENTITY_COUNT: usize = 50;

/// Default starting rating of every entity
pub const DEFAULT_INITIAL_RATING: u32 = 1900;

/// Default number of completed pairings after which a run stops
pub const DEFAULT_PAIRING_CAP: u64 = 1000;

/// Default widening search radii, `30, 60, ..., 300`
pub fn default_tolerance_ladder() -> Vec<u32> {
    (1..=10).map(|step| step * 30).collect()
}

/// Parameters of one matchmaking run.
///
/// Deserializes from JSON with every field optional; durations are written in
/// milliseconds under a `_ms` suffixed name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakerConfig {
    /// Number of entities created at startup
    pub entity_count: usize,

    /// Rating every entity starts with
    pub initial_rating: u32,

    /// Ascending search radii tried by every search process, widest last
    pub tolerance_ladder: Vec<u32>,

    /// Completed pairings after which the run terminates
    pub pairing_cap: u64,

    /// Backoff between an unsuccessful probe and the next, wider one
    #[serde(rename = "wait_interval_ms", with = "millis")]
    pub wait_interval: Duration,

    /// Upper bound of the random delay before a search starts probing
    #[serde(rename = "max_start_delay_ms", with = "millis")]
    pub max_start_delay: Duration,

    /// Rating update sensitivity
    pub k_factor: f64,

    /// Longest a search waits for the index lock before failing the run
    #[serde(rename = "lock_timeout_ms", with = "millis")]
    pub lock_timeout: Duration,

    /// Keep every pairing record in the final report
    pub record_history: bool,
}

impl Default for MatchmakerConfig {
    fn default() -> Self {
        Self {
            entity_count: DEFAULT_ENTITY_COUNT,
            initial_rating: DEFAULT_INITIAL_RATING,
            tolerance_ladder: default_tolerance_ladder(),
            pairing_cap: DEFAULT_PAIRING_CAP,
            wait_interval: Duration::from_millis(10),
            max_start_delay: Duration::from_millis(5),
            k_factor: DEFAULT_K_FACTOR,
            lock_timeout: Duration::from_secs(1),
            record_history: true,
        }
    }
}

impl MatchmakerConfig {
    /// Parse a JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self, MatchmakerError> {
        let config: MatchmakerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the number of entities
    pub fn with_entity_count(mut self, entity_count: usize) -> Self {
        self.entity_count = entity_count;
        self
    }

    /// Set the starting rating
    pub fn with_initial_rating(mut self, initial_rating: u32) -> Self {
        self.initial_rating = initial_rating;
        self
    }

    /// Set the tolerance ladder
    pub fn with_tolerance_ladder(mut self, tolerance_ladder: Vec<u32>) -> Self {
        self.tolerance_ladder = tolerance_ladder;
        self
    }

    /// Set the pairing cap
    pub fn with_pairing_cap(mut self, pairing_cap: u64) -> Self {
        self.pairing_cap = pairing_cap;
        self
    }

    /// Set the backoff between probes
    pub fn with_wait_interval(mut self, wait_interval: Duration) -> Self {
        self.wait_interval = wait_interval;
        self
    }

    /// Set the upper bound of the staggered start
    pub fn with_max_start_delay(mut self, max_start_delay: Duration) -> Self {
        self.max_start_delay = max_start_delay;
        self
    }

    /// Set the K-factor
    pub fn with_k_factor(mut self, k_factor: f64) -> Self {
        self.k_factor = k_factor;
        self
    }

    /// Set the index lock timeout
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    /// Enable or disable the per-pairing history
    pub fn with_record_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> Result<(), MatchmakerError> {
        if self.entity_count < 2 {
            return Err(invalid(format!(
                "at least two entities are needed, got {}",
                self.entity_count
            )));
        }
        if self.tolerance_ladder.is_empty() {
            return Err(invalid("tolerance ladder is empty".to_string()));
        }
        if self.tolerance_ladder.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(invalid(format!(
                "tolerance ladder must be strictly ascending: {:?}",
                self.tolerance_ladder
            )));
        }
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(invalid(format!(
                "k-factor must be a positive number, got {}",
                self.k_factor
            )));
        }
        if self.wait_interval.is_zero() {
            return Err(invalid("wait interval must be non-zero".to_string()));
        }
        if self.lock_timeout.is_zero() {
            return Err(invalid("lock timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> MatchmakerError {
    MatchmakerError::InvalidConfig { message }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
