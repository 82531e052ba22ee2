//! State machine that applies events against a transition table.

use crate::builder::ConfigError;
use crate::core::{
    StateHistory, StateId, TransitionRecord, TransitionTable, DEFAULT_HISTORY_LIMIT,
};
use crate::runner::error::ReentrancyError;
use chrono::Utc;
use std::cell::{Cell, Ref, RefCell};

/// Result of sending one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome<'a> {
    /// The machine moved from one state to another (possibly the same).
    Transitioned { from: &'a str, to: &'a str },

    /// No transition is defined for the event in the current state.
    Ignored,
}

impl<'a> SendOutcome<'a> {
    /// Whether the event moved the machine.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }

    /// State entered by the transition, if one happened.
    pub fn target(&self) -> Option<&'a str> {
        match self {
            Self::Transitioned { to, .. } => Some(*to),
            Self::Ignored => None,
        }
    }
}

/// A running instance over an immutable [`TransitionTable`].
///
/// The only thing that changes over the life of a machine is its current
/// state, and only [`send`](Self::send) changes it. The current state is
/// always a key of the table.
///
/// Machines are single-threaded. `send` takes `&self`, so an entry action
/// can hold a shared handle to its own machine; calling `send` through that
/// handle while the action runs fails with [`ReentrancyError`].
///
/// # Example
///
/// ```rust
/// use waymark::builder::{StateBuilder, TableBuilder};
/// use waymark::runner::{SendOutcome, StateMachine};
///
/// let table = TableBuilder::new()
///     .state(StateBuilder::new("closed").on("OPEN", "open"))
///     .state(StateBuilder::new("open").on("CLOSE", "closed"))
///     .build()
///     .unwrap();
///
/// let door = StateMachine::new("closed", table).unwrap();
///
/// assert_eq!(
///     door.send("OPEN").unwrap(),
///     SendOutcome::Transitioned { from: "closed", to: "open" }
/// );
/// assert_eq!(door.send("BOGUS").unwrap(), SendOutcome::Ignored);
/// assert_eq!(door.current_state(), "open");
/// ```
#[derive(Debug)]
pub struct StateMachine {
    table: TransitionTable,
    current: Cell<StateId>,
    entering: Cell<bool>,
    history: RefCell<StateHistory>,
}

impl StateMachine {
    /// Create a machine in `initial` and run that state's entry action.
    ///
    /// The machine keeps the last [`DEFAULT_HISTORY_LIMIT`] transitions.
    ///
    /// Fails with [`ConfigError::UnknownInitialState`] if `initial` is not a
    /// state of `table`.
    pub fn new(initial: impl Into<String>, table: TransitionTable) -> Result<Self, ConfigError> {
        Self::with_history_limit(initial, table, DEFAULT_HISTORY_LIMIT)
    }

    /// Like [`new`](Self::new), keeping at most `limit` history records.
    pub fn with_history_limit(
        initial: impl Into<String>,
        table: TransitionTable,
        limit: usize,
    ) -> Result<Self, ConfigError> {
        Self::with_history(initial.into(), table, StateHistory::with_limit(limit))
    }

    fn with_history(
        initial: String,
        table: TransitionTable,
        history: StateHistory,
    ) -> Result<Self, ConfigError> {
        let Some(id) = table.id(&initial) else {
            return Err(ConfigError::UnknownInitialState { state: initial });
        };

        let machine = Self {
            table,
            current: Cell::new(id),
            entering: Cell::new(false),
            history: RefCell::new(history),
        };

        tracing::debug!(
            initial = %initial,
            states = machine.table.len(),
            "state machine created"
        );
        machine.enter(id);

        Ok(machine)
    }

    /// Name of the current state.
    pub fn current_state(&self) -> &str {
        self.table.name(self.current.get())
    }

    /// Whether the current state has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.table.descriptor(self.current.get()).is_terminal()
    }

    /// Whether `send(event)` would transition from the current state.
    pub fn can_send(&self, event: &str) -> bool {
        self.table
            .descriptor(self.current.get())
            .target(event)
            .is_some()
    }

    /// Events defined for the current state, sorted.
    pub fn available_events(&self) -> Vec<&str> {
        self.table.descriptor(self.current.get()).events()
    }

    /// The table this machine runs on.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Recent transitions, oldest first.
    ///
    /// The returned borrow must be dropped before the next `send`.
    pub fn history(&self) -> Ref<'_, StateHistory> {
        self.history.borrow()
    }

    /// Apply `event` to the current state.
    ///
    /// If the current state defines no transition for `event`, nothing
    /// happens and [`SendOutcome::Ignored`] is returned. Otherwise the
    /// current state is updated first and the destination's entry action
    /// runs afterwards, exactly once.
    pub fn send(&self, event: &str) -> Result<SendOutcome<'_>, ReentrancyError> {
        let from = self.current.get();

        if self.entering.get() {
            tracing::warn!(
                state = %self.table.name(from),
                event,
                "rejected re-entrant send from entry action"
            );
            return Err(ReentrancyError {
                state: self.table.name(from).to_string(),
                event: event.to_string(),
            });
        }

        let Some(to) = self.table.descriptor(from).target(event) else {
            tracing::debug!(
                state = %self.table.name(from),
                event,
                "no transition defined, event ignored"
            );
            return Ok(SendOutcome::Ignored);
        };

        let (from_name, to_name) = (self.table.name(from), self.table.name(to));

        self.current.set(to);
        self.history.borrow_mut().record(TransitionRecord {
            from: from_name.to_string(),
            to: to_name.to_string(),
            event: event.to_string(),
            timestamp: Utc::now(),
        });
        tracing::info!(from = %from_name, to = %to_name, event, "transitioned to state");

        self.enter(to);

        Ok(SendOutcome::Transitioned {
            from: from_name,
            to: to_name,
        })
    }

    fn enter(&self, id: StateId) {
        let state = self.table.descriptor(id);
        if !state.has_entry_action() {
            return;
        }

        let _guard = EnteringGuard::engage(&self.entering);
        tracing::debug!(state = %state.name(), "running entry action");
        state.enter();
    }
}

/// Marks a machine as running an entry action until dropped, including
/// during unwinding.
struct EnteringGuard<'a>(&'a Cell<bool>);

impl<'a> EnteringGuard<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for EnteringGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
