//! Coordinator driving one matchmaking run.

use super::config::MatchmakerConfig;
use super::context::MatchContext;
use super::engine::PairingEngine;
use super::entity::{EntityId, Population};
use super::error::MatchmakerError;
use super::queue::IdleEvent;
use super::report::{EntityStanding, RunReport};
use super::search::{SearchOutcome, SearchProcess};
use crate::current_time_millis;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// How long the coordinator blocks on the idle queue before re-checking the run state
const IDLE_POLL: Duration = Duration::from_millis(50);

/// How long to wait for a re-enqueued entity's previous search to exit
const DEFER_WAIT: Duration = Duration::from_millis(1);

/// Owns the population and shared state of a run and drives it to completion.
///
/// Each run gets its own coordinator: construct it with [`Coordinator::new`],
/// call [`Coordinator::run`] once, and read the returned report.
#[derive(Debug)]
pub struct Coordinator {
    context: Arc<MatchContext>,
    started: AtomicBool,
    elapsed_ms: AtomicU64,
}

impl Coordinator {
    /// Validate `config` and create the population of the run
    pub fn new(config: MatchmakerConfig) -> Result<Self, MatchmakerError> {
        config.validate()?;
        info!(
            "Creating {} entities rated {}, pairing cap {}",
            config.entity_count, config.initial_rating, config.pairing_cap
        );
        Ok(Self {
            context: Arc::new(MatchContext::new(config)),
            started: AtomicBool::new(false),
            elapsed_ms: AtomicU64::new(0),
        })
    }

    /// Configuration of this run
    pub fn config(&self) -> &MatchmakerConfig {
        &self.context.config
    }

    /// The population registry
    pub fn population(&self) -> &Population {
        &self.context.population
    }

    /// The pairing engine and its counters
    pub fn engine(&self) -> &PairingEngine {
        &self.context.engine
    }

    /// Whether the termination flag is set
    pub fn is_terminated(&self) -> bool {
        self.context.is_terminated()
    }

    /// Number of windows currently in the overlap index
    pub fn index_len(&self) -> usize {
        self.context.index.lock().len()
    }

    /// Number of searches currently running
    pub fn active_searches(&self) -> usize {
        self.context.idle.active()
    }

    #[cfg(test)]
    pub(crate) fn idle(&self) -> &super::queue::IdleQueue {
        &self.context.idle
    }

    /// Run until the pairing cap is reached.
    ///
    /// Returns the final report once every search has observed termination and
    /// exited. A scheduling inconsistency or a lock timeout ends the run early
    /// and is returned as the error.
    pub fn run(&self) -> Result<RunReport, MatchmakerError> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(MatchmakerError::InvalidOperation {
                message: "a coordinator can only run once".to_string(),
            });
        }

        info!("Run {} started", self.context.engine.namespace());
        let started = Instant::now();

        let result = self.drive();
        self.shutdown();
        self.elapsed_ms
            .store(started.elapsed().as_millis() as u64, Ordering::Release);

        result?;
        if let Some(err) = self.context.take_failure() {
            return Err(err);
        }

        let report = self.report();
        info!(
            "Run finished: {} pairings in {}ms, peak rating {}",
            report.total_pairings, report.elapsed_ms, report.peak_rating
        );
        Ok(report)
    }

    /// Snapshot of the current standings and counters
    pub fn report(&self) -> RunReport {
        let standings = self
            .context
            .population
            .entities()
            .iter()
            .map(|entity| EntityStanding {
                id: entity.id(),
                rating: entity.rating(),
                pairings: entity.pairings(),
            })
            .collect();

        RunReport {
            run_id: self.context.engine.namespace(),
            timestamp: current_time_millis(),
            elapsed_ms: self.elapsed_ms.load(Ordering::Acquire),
            total_pairings: self.context.engine.completed(),
            pairing_cap: self.context.engine.cap(),
            peak_rating: self.context.engine.peak_rating(),
            active_searches: self.context.idle.active(),
            standings,
            history: self.context.history(),
        }
    }

    fn drive(&self) -> Result<(), MatchmakerError> {
        loop {
            if self.context.is_terminated() {
                return Ok(());
            }

            match self.context.idle.next(IDLE_POLL) {
                IdleEvent::Ready(id) => self.dispatch(id)?,
                IdleEvent::Waiting => continue,
                IdleEvent::Closed => return Ok(()),
                IdleEvent::Underflow => {
                    let err = MatchmakerError::QueueUnderflow {
                        pairings: self.context.engine.completed(),
                        cap: self.context.engine.cap(),
                    };
                    error!("{}", err);
                    return Err(err);
                }
            }
        }
    }

    fn dispatch(&self, id: EntityId) -> Result<(), MatchmakerError> {
        let entity = self
            .context
            .population
            .get(id)
            .ok_or(MatchmakerError::EntityNotFound(id))?;

        // An entity requeued by the opponent that claimed it can resurface before
        // its own search thread has exited
        if entity.is_searching() || !entity.search_finished() {
            self.context.idle.defer(id, DEFER_WAIT);
            return Ok(());
        }

        if let Some(previous) = entity.take_search() {
            if previous.join() == SearchOutcome::Failed {
                warn!("Previous search of {} failed", id);
            }
        }

        self.context.idle.start_search();
        entity.mark_searching();
        match SearchProcess::spawn(Arc::clone(&entity), Arc::clone(&self.context)) {
            Ok(handle) => {
                entity.store_search(handle);
                debug!("Search spawned for {} rated {}", id, entity.rating());
                Ok(())
            }
            Err(err) => {
                entity.finish_search();
                self.context.idle.finish_search(&[id]);
                Err(err)
            }
        }
    }

    fn shutdown(&self) {
        self.context.terminate();

        let entities = self.context.population.entities();
        for entity in &entities {
            entity.cancel_search();
        }

        let mut joined = 0usize;
        for entity in &entities {
            if let Some(handle) = entity.take_search() {
                handle.join();
                joined += 1;
            }
        }

        let mut index = self.context.index.lock();
        if !index.is_empty() {
            warn!("{} windows left in the index after shutdown", index.len());
            index.clear();
        }
        debug!("Shutdown joined {} search threads", joined);
    }
}
