//! FIFO of idle entities plus the count of running searches.
//!
//! Both live under one lock so that "queue empty and nothing searching" is
//! observed atomically: a search re-enqueues its entities and retires itself in
//! a single step.

use super::entity::EntityId;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::trace;

/// What the coordinator gets when it asks for the next idle entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleEvent {
    /// An entity is ready for a new search
    Ready(EntityId),
    /// Nothing arrived before the timeout; searches are still running
    Waiting,
    /// The run is terminating
    Closed,
    /// No idle entity and no running search: entities were lost
    Underflow,
}

#[derive(Debug, Default)]
struct IdleState {
    queue: VecDeque<EntityId>,
    active: usize,
    closed: bool,
}

/// Idle-entity queue shared by the coordinator and every search process
#[derive(Debug, Default)]
pub struct IdleQueue {
    state: Mutex<IdleState>,
    signal: Condvar,
}

impl IdleQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an idle entity
    pub fn push(&self, id: EntityId) {
        self.state.lock().queue.push_back(id);
        self.signal.notify_one();
    }

    /// Number of queued entities
    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Whether no entity is queued
    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    /// Number of searches counted as running
    pub fn active(&self) -> usize {
        self.state.lock().active
    }

    /// Whether the queue was closed
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Count a search that is about to start
    pub fn start_search(&self) {
        self.state.lock().active += 1;
    }

    /// Retire a search, re-enqueueing `requeue` in the same step
    pub fn finish_search(&self, requeue: &[EntityId]) {
        let mut state = self.state.lock();
        state.queue.extend(requeue.iter().copied());
        state.active = state.active.saturating_sub(1);
        trace!(
            "Search retired, requeued {:?}, {} still active",
            requeue, state.active
        );
        drop(state);
        self.signal.notify_all();
    }

    /// Put back an entity whose previous search has not exited yet and wait
    /// up to `timeout` for any queue activity.
    pub fn defer(&self, id: EntityId, timeout: Duration) {
        let mut state = self.state.lock();
        state.queue.push_back(id);
        if !state.closed {
            let _ = self.signal.wait_for(&mut state, timeout);
        }
    }

    /// Next idle entity, waiting up to `timeout` while searches are running
    pub fn next(&self, timeout: Duration) -> IdleEvent {
        let mut state = self.state.lock();

        loop {
            if state.closed {
                return IdleEvent::Closed;
            }
            if let Some(id) = state.queue.pop_front() {
                return IdleEvent::Ready(id);
            }
            if state.active == 0 {
                return IdleEvent::Underflow;
            }
            if self.signal.wait_for(&mut state, timeout).timed_out() {
                return IdleEvent::Waiting;
            }
        }
    }

    /// Stop handing out entities and wake the coordinator
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.signal.notify_all();
    }
}
