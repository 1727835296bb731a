//! # Concurrent Skill-Based Matchmaking Engine
//!
//! A thread-per-search matchmaking engine written in Rust. Entities look for
//! opponents of similar rating by placing rating windows into a shared overlap
//! index; when two windows overlap the entities are paired, an outcome is drawn
//! from their Elo expectation and both ratings are updated.
//!
//! ## Key Features
//!
//! - **Overlap Index**: An arena-backed AVL tree of disjoint rating windows,
//!   annotated with the largest upper bound of every subtree. A window that would
//!   overlap an existing one is never inserted: the existing node is taken out and
//!   returned, which is how two searches meet.
//!
//! - **Widening Search**: Every search walks a ladder of tolerances (by default
//!   `30, 60, ..., 300`). At each step it probes the index, waits out a backoff if
//!   nobody collided with it, takes its window back out and retries wider.
//!
//! - **Cooperative Cancellation**: Searches are stopped through cancellation
//!   tokens checked at well-defined points. A cancelled search always removes its
//!   own window before it exits and never sleeps while holding the index lock.
//!
//! - **Bounded Locking**: The index is guarded by a single `parking_lot` mutex
//!   held for one index operation at a time and acquired with a timeout.
//!
//! - **Exact Pairing Cap**: Pairing slots are reserved atomically, so a run stops
//!   at exactly the configured number of pairings even when searches race.
//!
//! ## Components
//!
//! | Component | Role |
//! |-----------|------|
//! | [`RatingModel`] | Win expectation and rating deltas |
//! | [`IntervalIndex`] | `insert_or_find_overlap` and `remove` over rating windows |
//! | [`Entity`] / [`Population`] | Tracked participants and their identity allocator |
//! | [`PairingEngine`] | Outcome draw, rating update, pairing counters |
//! | [`Coordinator`] | Idle queue, search supervision, termination and reporting |
//!
//! ## Example
//!
//! ```no_run
//! use matchmaker_rs::{Coordinator, MatchmakerConfig};
//! use std::time::Duration;
//!
//! let config = MatchmakerConfig::default()
//!     .with_entity_count(50)
//!     .with_pairing_cap(1000)
//!     .with_wait_interval(Duration::from_millis(5));
//!
//! let coordinator = Coordinator::new(config)?;
//! let report = coordinator.run()?;
//!
//! assert_eq!(report.total_pairings, 1000);
//! if let Some(leader) = report.leader() {
//!     println!("{} leads with {}", leader.id, leader.rating);
//! }
//! # Ok::<(), matchmaker_rs::MatchmakerError>(())
//! ```
//!
//! ## Status
//! This project is currently in active development and is not yet suitable for production use.

pub mod interval;
pub mod matchmaker;
pub mod rating;

mod utils;

pub use interval::{IntervalIndex, IntervalKey, NodeHandle, Probe};
pub use matchmaker::{
    CancelToken, Coordinator, Entity, EntityId, EntityStanding, MatchmakerConfig,
    MatchmakerError, PairingEngine, PairingRecord, Population, RunReport,
};
pub use rating::{Outcome, RatingModel};
pub use utils::{current_time_millis, setup_logger};
