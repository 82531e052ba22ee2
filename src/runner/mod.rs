//! The running side of the crate.
//!
//! A [`StateMachine`] owns an immutable [`TransitionTable`](crate::core::TransitionTable)
//! and a current state. Events are applied with [`StateMachine::send`]:
//! defined transitions move the machine and run the destination's entry
//! action, undefined ones are ignored.

mod error;
mod machine;

pub use error::ReentrancyError;
pub use machine::{SendOutcome, StateMachine};
