//! Builder for a single state of a transition table.

use crate::core::EntryAction;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Builder for one state: its outgoing transitions and entry action.
///
/// Destinations are plain names here; they are checked against the rest of
/// the table when the [`TableBuilder`](super::TableBuilder) is built.
/// Registering the same event twice keeps the last destination.
///
/// # Example
///
/// ```rust
/// use waymark::builder::StateBuilder;
///
/// let closed = StateBuilder::new("closed")
///     .on("OPEN", "open")
///     .on_enter(|| println!("Door closed"));
///
/// assert_eq!(closed.name(), "closed");
/// assert_eq!(closed.target("OPEN"), Some("open"));
/// ```
#[derive(Clone)]
pub struct StateBuilder {
    pub(crate) name: String,
    pub(crate) on: BTreeMap<String, String>,
    pub(crate) on_enter: Option<EntryAction>,
}

impl StateBuilder {
    /// Start describing the state called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on: BTreeMap::new(),
            on_enter: None,
        }
    }

    /// Move to `target` when `event` is received in this state.
    pub fn on(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.on.insert(event.into(), target.into());
        self
    }

    /// Run `action` every time this state is entered.
    pub fn on_enter<F>(self, action: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.entry_action(Rc::new(action))
    }

    /// Attach an already shared entry action.
    pub fn entry_action(mut self, action: EntryAction) -> Self {
        self.on_enter = Some(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Destination currently registered for `event`.
    pub fn target(&self, event: &str) -> Option<&str> {
        self.on.get(event).map(String::as_str)
    }

    /// Fold `other` into this state. Its events and entry action win.
    pub(crate) fn merge(&mut self, other: StateBuilder) {
        self.on.extend(other.on);
        if other.on_enter.is_some() {
            self.on_enter = other.on_enter;
        }
    }
}

impl fmt::Debug for StateBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBuilder")
            .field("name", &self.name)
            .field("on", &self.on)
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_registers_transition() {
        let state = StateBuilder::new("red").on("TIMER", "green");
        assert_eq!(state.target("TIMER"), Some("green"));
        assert_eq!(state.target("BOGUS"), None);
    }

    #[test]
    fn duplicate_event_keeps_last_target() {
        let state = StateBuilder::new("red")
            .on("TIMER", "green")
            .on("TIMER", "yellow");
        assert_eq!(state.target("TIMER"), Some("yellow"));
        assert_eq!(state.on.len(), 1);
    }

    #[test]
    fn state_without_events_is_allowed() {
        let state = StateBuilder::new("done");
        assert!(state.on.is_empty());
        assert!(state.on_enter.is_none());
    }

    #[test]
    fn merge_prefers_later_definitions() {
        let mut first = StateBuilder::new("closed")
            .on("OPEN", "open")
            .on("LOCK", "locked")
            .on_enter(|| {});
        first.merge(StateBuilder::new("closed").on("OPEN", "ajar"));

        assert_eq!(first.target("OPEN"), Some("ajar"));
        assert_eq!(first.target("LOCK"), Some("locked"));
        assert!(first.on_enter.is_some());
    }
}
