//! Range-keyed overlap index shared by every search process.
//!
//! The index holds closed rating windows. Inserting a window that overlaps one
//! already present does not insert it: the existing node is taken out and handed
//! back to the caller, which is how two searching entities find each other.

mod key;
mod tests;
mod tree;

pub use key::IntervalKey;
pub use tree::{IndexEntry, IntervalIndex, NodeHandle, Probe};
