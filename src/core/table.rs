//! Immutable transition table.

use super::descriptor::{StateDescriptor, StateId};
use std::collections::HashMap;

/// Mapping from state name to [`StateDescriptor`].
///
/// A table is built once through [`TableBuilder`](crate::builder::TableBuilder)
/// and never changes afterwards. Every destination it holds names a state
/// that exists in the same table, so a machine driven by it can never reach
/// an undefined state.
///
/// # Example
///
/// ```rust
/// use waymark::builder::TableBuilder;
///
/// let table = TableBuilder::new()
///     .transition("red", "TIMER", "green")
///     .transition("green", "TIMER", "yellow")
///     .transition("yellow", "TIMER", "red")
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.target("red", "TIMER"), Some("green"));
/// assert_eq!(table.target("red", "BOGUS"), None);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionTable {
    states: Vec<StateDescriptor>,
    index: HashMap<String, StateId>,
}

impl TransitionTable {
    /// Assemble a table from already-resolved descriptors.
    ///
    /// `states[i]` must be the descriptor with id `i`, and `index` must map
    /// every descriptor name to its id.
    pub(crate) fn from_resolved(
        states: Vec<StateDescriptor>,
        index: HashMap<String, StateId>,
    ) -> Self {
        debug_assert_eq!(states.len(), index.len());
        Self { states, index }
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether `state` is a key of the table.
    pub fn contains(&self, state: &str) -> bool {
        self.index.contains_key(state)
    }

    /// Descriptor for `state`, if defined.
    pub fn state(&self, state: &str) -> Option<&StateDescriptor> {
        self.id(state).map(|id| self.descriptor(id))
    }

    /// All state names, sorted.
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.iter().map(StateDescriptor::name).collect();
        names.sort_unstable();
        names
    }

    /// Events defined for `state`, sorted. `None` if the state is undefined.
    pub fn events(&self, state: &str) -> Option<Vec<&str>> {
        self.state(state).map(StateDescriptor::events)
    }

    /// Destination of `event` from `state`, if such a transition exists.
    pub fn target(&self, state: &str, event: &str) -> Option<&str> {
        let id = self.id(state)?;
        let target = self.descriptor(id).target(event)?;
        Some(self.name(target))
    }

    /// Whether `state` has no outgoing transitions. `None` if undefined.
    pub fn is_terminal(&self, state: &str) -> Option<bool> {
        self.state(state).map(StateDescriptor::is_terminal)
    }

    /// Names of all terminal states, sorted.
    pub fn terminal_states(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .states
            .iter()
            .filter(|s| s.is_terminal())
            .map(StateDescriptor::name)
            .collect();
        names.sort_unstable();
        names
    }

    /// Descriptors in declaration order.
    pub(crate) fn descriptors(&self) -> &[StateDescriptor] {
        &self.states
    }

    pub(crate) fn id(&self, state: &str) -> Option<StateId> {
        self.index.get(state).copied()
    }

    pub(crate) fn descriptor(&self, id: StateId) -> &StateDescriptor {
        &self.states[id.0]
    }

    pub(crate) fn name(&self, id: StateId) -> &str {
        self.descriptor(id).name()
    }
}
