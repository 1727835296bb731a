//! State shared by the coordinator and every search process of one run.

use super::cancel::CancelToken;
use super::config::MatchmakerConfig;
use super::engine::{PairingEngine, PairingRecord};
use super::entity::{Entity, Population};
use super::error::MatchmakerError;
use super::queue::IdleQueue;
use crate::interval::IntervalIndex;
use crate::rating::RatingModel;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

/// Payload of an index node: the searching entity and the token of its search.
#[derive(Debug, Clone)]
pub(crate) struct Contender {
    pub(crate) entity: Arc<Entity>,
    pub(crate) cancel: CancelToken,
}

#[derive(Debug)]
pub(crate) struct MatchContext {
    pub(crate) config: MatchmakerConfig,
    pub(crate) population: Population,
    pub(crate) index: Mutex<IntervalIndex<Contender>>,
    pub(crate) idle: IdleQueue,
    pub(crate) engine: PairingEngine,
    terminated: AtomicBool,
    failure: Mutex<Option<MatchmakerError>>,
    history: Mutex<Vec<PairingRecord>>,
}

impl MatchContext {
    pub(crate) fn new(config: MatchmakerConfig) -> Self {
        let population = Population::with_entities(config.entity_count, config.initial_rating);
        let engine = PairingEngine::new(RatingModel::new(config.k_factor), config.pairing_cap);
        engine.observe_rating(config.initial_rating);

        let idle = IdleQueue::new();
        for id in population.ids() {
            idle.push(id);
        }

        Self {
            config,
            population,
            index: Mutex::new(IntervalIndex::new()),
            idle,
            engine,
            terminated: AtomicBool::new(false),
            failure: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    /// Raise the termination flag and release the coordinator
    pub(crate) fn terminate(&self) {
        if !self.terminated.swap(true, Ordering::AcqRel) {
            debug!(
                "Run terminating after {} pairings",
                self.engine.completed()
            );
        }
        self.idle.close();
    }

    /// Record the first fatal error of the run and terminate it
    pub(crate) fn fail(&self, err: MatchmakerError) {
        error!("Run failed: {}", err);
        {
            let mut failure = self.failure.lock();
            if failure.is_none() {
                *failure = Some(err);
            }
        }
        self.terminate();
    }

    pub(crate) fn take_failure(&self) -> Option<MatchmakerError> {
        self.failure.lock().take()
    }

    /// Bounded acquisition of the index lock
    pub(crate) fn lock_index(
        &self,
        entity: &Entity,
    ) -> Result<MutexGuard<'_, IntervalIndex<Contender>>, MatchmakerError> {
        self.index
            .try_lock_for(self.config.lock_timeout)
            .ok_or_else(|| MatchmakerError::LockTimeout {
                entity: entity.id(),
                waited_ms: self.config.lock_timeout.as_millis() as u64,
            })
    }

    pub(crate) fn record(&self, record: &PairingRecord) {
        if self.config.record_history {
            self.history.lock().push(record.clone());
        }
    }

    pub(crate) fn history(&self) -> Vec<PairingRecord> {
        let mut history = self.history.lock().clone();
        history.sort_unstable_by_key(|record| record.sequence);
        history
    }
}
