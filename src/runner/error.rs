//! Runtime errors raised by a running machine.

use thiserror::Error;

/// `send` was called from inside an entry action of the same machine.
///
/// The nested call is rejected without changing state; the transition that
/// triggered the entry action is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Re-entrant send('{event}') rejected while entering state '{state}'")]
pub struct ReentrancyError {
    /// State being entered when the nested call happened
    pub state: String,
    /// Event the nested call tried to send
    pub event: String,
}
