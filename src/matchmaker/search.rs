//! Per-entity search process.
//!
//! Each search runs on its own thread and walks the tolerance ladder: it puts a
//! rating window into the shared index and either collides with an opponent's
//! window straight away or waits out the backoff, takes its own window back out
//! and retries wider. The index lock is only held for a single index operation.

use super::cancel::CancelToken;
use super::context::{Contender, MatchContext};
use super::engine::{PairingRecord, PairingSlot};
use super::entity::{Entity, EntityId};
use super::error::MatchmakerError;
use crate::interval::{IntervalKey, Probe};
use rand::Rng;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace};

/// How a search process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// This search found the opponent and ran the pairing
    Matched(PairingRecord),
    /// An opponent's search took this entity's window and ran the pairing
    Claimed,
    /// Every tolerance was tried without a collision
    Exhausted,
    /// Stopped by cancellation or run termination
    Cancelled,
    /// Ended by an error that failed the run
    Failed,
}

/// Handle the coordinator keeps for a running search.
#[derive(Debug)]
pub struct SearchHandle {
    cancel: CancelToken,
    thread: JoinHandle<SearchOutcome>,
}

impl SearchHandle {
    /// Request cooperative cancellation
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the search thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the search thread. A panicked search counts as failed.
    pub fn join(self) -> SearchOutcome {
        self.thread.join().unwrap_or(SearchOutcome::Failed)
    }
}

enum Collision {
    Pair(Contender, PairingSlot),
    Capped(Contender),
}

pub(crate) struct SearchProcess {
    entity: Arc<Entity>,
    cancel: CancelToken,
    context: Arc<MatchContext>,
}

impl SearchProcess {
    /// Start a search thread for `entity`.
    ///
    /// The caller has already counted the search as active in the idle queue;
    /// the thread retires it when it exits.
    pub(crate) fn spawn(
        entity: Arc<Entity>,
        context: Arc<MatchContext>,
    ) -> Result<SearchHandle, MatchmakerError> {
        let cancel = CancelToken::new();
        let process = SearchProcess {
            entity: Arc::clone(&entity),
            cancel: cancel.clone(),
            context,
        };

        let thread = thread::Builder::new()
            .name(format!("search-{}", entity.id().0))
            .spawn(move || process.execute())?;

        Ok(SearchHandle { cancel, thread })
    }

    fn execute(self) -> SearchOutcome {
        let outcome = match self.run() {
            Ok(outcome) => outcome,
            Err(err) => {
                self.context.fail(err);
                SearchOutcome::Failed
            }
        };

        let requeue: Vec<EntityId> = match &outcome {
            SearchOutcome::Matched(record) => vec![record.first, record.second],
            SearchOutcome::Exhausted => vec![self.entity.id()],
            _ => Vec::new(),
        };

        debug!("Search for {} ended: {:?}", self.entity.id(), outcome);
        self.entity.finish_search();
        self.context.idle.finish_search(&requeue);
        outcome
    }

    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.context.is_terminated()
    }

    fn start_delay(&self) -> Duration {
        let bound = self.context.config.max_start_delay.as_micros() as u64;
        if bound == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(rand::rng().random_range(0..bound))
    }

    fn run(&self) -> Result<SearchOutcome, MatchmakerError> {
        if self.cancel.wait_timeout(self.start_delay()) || self.context.is_terminated() {
            return Ok(SearchOutcome::Cancelled);
        }

        let ladder = &self.context.config.tolerance_ladder;
        for (step, &tolerance) in ladder.iter().enumerate() {
            if self.should_stop() {
                return Ok(SearchOutcome::Cancelled);
            }

            let window = IntervalKey::around(self.entity.rating(), tolerance);
            trace!(
                "Entity {} probing {} at step {}",
                self.entity.id(),
                window,
                step
            );

            let handle = {
                let mut index = self.context.lock_index(&self.entity)?;
                if self.should_stop() {
                    return Ok(SearchOutcome::Cancelled);
                }

                let contender = Contender {
                    entity: Arc::clone(&self.entity),
                    cancel: self.cancel.clone(),
                };
                let probe = index.insert_or_find_overlap(window, contender);
                match probe {
                    Probe::Inserted(handle) => handle,
                    Probe::Overlap(entry) => {
                        // The opponent's window is already out of the index; stopping its
                        // search and taking a slot in the same critical section keeps it
                        // from being paired twice.
                        entry.value.cancel.cancel();
                        let collision = match self.context.engine.try_reserve() {
                            Some(slot) => Collision::Pair(entry.value, slot),
                            None => Collision::Capped(entry.value),
                        };
                        drop(index);
                        return Ok(self.resolve(collision));
                    }
                }
            };

            let cancelled = self.cancel.wait_timeout(self.context.config.wait_interval);

            let removed = {
                let mut index = self.context.lock_index(&self.entity)?;
                index.remove(handle).is_some()
            };
            if !removed {
                trace!("Entity {} was claimed while waiting", self.entity.id());
                return Ok(SearchOutcome::Claimed);
            }
            if cancelled || self.context.is_terminated() {
                return Ok(SearchOutcome::Cancelled);
            }
        }

        trace!("Entity {} exhausted its ladder", self.entity.id());
        Ok(SearchOutcome::Exhausted)
    }

    fn resolve(&self, collision: Collision) -> SearchOutcome {
        match collision {
            Collision::Pair(opponent, slot) => {
                let record = self
                    .context
                    .engine
                    .pair(slot, &self.entity, &opponent.entity);
                self.context.record(&record);
                debug!(
                    "Pairing {} completed: {} vs {}",
                    record.sequence, record.first, record.second
                );
                if self.context.engine.is_capped() {
                    self.context.terminate();
                }
                SearchOutcome::Matched(record)
            }
            Collision::Capped(opponent) => {
                debug!(
                    "Entity {} met {} after the pairing cap was reached",
                    self.entity.id(),
                    opponent.entity.id()
                );
                self.context.terminate();
                SearchOutcome::Cancelled
            }
        }
    }
}
