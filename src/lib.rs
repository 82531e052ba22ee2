//! Waymark: a table-driven finite-state machine runner
//!
//! Waymark holds a current state, applies named events against a
//! declarative transition table, runs an optional entry action whenever a
//! state is entered, and ignores events the current state does not define.
//!
//! # Core Concepts
//!
//! - **Transition Table**: immutable mapping from state name to its events
//!   and optional entry action, built once and validated up front
//! - **State Machine**: the only mutable piece; holds the current state and
//!   changes it through `send`
//! - **History**: an ordered record of the transitions a machine has taken
//!
//! Tables are described with the fluent builders in [`builder`], the
//! [`transition_table!`] macro, or JSON through [`config`].
//!
//! # Example
//!
//! ```rust
//! use waymark::builder::StateMachineBuilder;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (on_closed, on_open) = (Rc::clone(&log), Rc::clone(&log));
//!
//! let door = StateMachineBuilder::new()
//!     .initial("closed")
//!     .transition("closed", "OPEN", "open")
//!     .transition("open", "CLOSE", "closed")
//!     .on_enter("closed", move || on_closed.borrow_mut().push("Door closed"))
//!     .on_enter("open", move || on_open.borrow_mut().push("Door opened"))
//!     .build()
//!     .unwrap();
//!
//! door.send("OPEN").unwrap();
//! door.send("BOGUS").unwrap();
//! door.send("CLOSE").unwrap();
//!
//! assert_eq!(door.current_state(), "closed");
//! assert_eq!(*log.borrow(), vec!["Door closed", "Door opened", "Door closed"]);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod runner;

// Re-export commonly used types
pub use builder::{ConfigError, StateBuilder, StateMachineBuilder, TableBuilder};
pub use config::MachineConfig;
pub use crate::core::{
    EntryAction, StateHistory, TransitionRecord, TransitionTable, DEFAULT_HISTORY_LIMIT,
};
pub use runner::{ReentrancyError, SendOutcome, StateMachine};
