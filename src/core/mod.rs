//! Core transition-table types.
//!
//! This module contains the immutable data the runner works from:
//! - State descriptors with optional entry actions
//! - The transition table that maps states and events to destinations
//! - The transition history a machine records as it runs
//!
//! Nothing in here mutates once built; the only moving part of the crate
//! is the current state held by [`StateMachine`](crate::runner::StateMachine).

mod descriptor;
mod history;
mod table;

pub(crate) use descriptor::StateId;
pub use descriptor::{EntryAction, StateDescriptor};
pub use history::{StateHistory, TransitionRecord, DEFAULT_HISTORY_LIMIT};
pub use table::TransitionTable;
