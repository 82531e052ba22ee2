//! State descriptors: the per-state entry of a transition table.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Side-effecting procedure invoked whenever a state becomes current.
///
/// Entry actions take no arguments and return nothing. They are reference
/// counted so a table can be cloned cheaply, and they are not `Send`:
/// a machine and its actions live on one thread.
pub type EntryAction = Rc<dyn Fn()>;

/// Index of a state inside its [`TransitionTable`](super::TransitionTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct StateId(pub(crate) usize);

/// A resolved state: its name, outgoing transitions and optional entry action.
///
/// Descriptors are only created by the table builder, after every
/// destination has been checked to exist.
#[derive(Clone)]
pub struct StateDescriptor {
    pub(crate) name: String,
    pub(crate) on: HashMap<String, StateId>,
    pub(crate) on_enter: Option<EntryAction>,
}

impl StateDescriptor {
    /// Name of the state.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an entry action is attached.
    pub fn has_entry_action(&self) -> bool {
        self.on_enter.is_some()
    }

    /// A state with no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.on.is_empty()
    }

    /// Event names this state reacts to, sorted.
    pub fn events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = self.on.keys().map(String::as_str).collect();
        events.sort_unstable();
        events
    }

    pub(crate) fn target(&self, event: &str) -> Option<StateId> {
        self.on.get(event).copied()
    }

    /// Run the entry action, if any.
    pub(crate) fn enter(&self) {
        if let Some(action) = &self.on_enter {
            action();
        }
    }
}

impl fmt::Debug for StateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDescriptor")
            .field("name", &self.name)
            .field("events", &self.events())
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}
