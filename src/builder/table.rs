//! Builder for transition tables.

use crate::builder::error::ConfigError;
use crate::builder::state::StateBuilder;
use crate::core::{EntryAction, StateDescriptor, StateId, TransitionTable};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigError>>;

/// Builder for an immutable [`TransitionTable`].
///
/// States keep their declaration order. Declaring a state twice merges the
/// two declarations, later events and entry actions winning.
#[derive(Clone, Default)]
pub struct TableBuilder {
    states: Vec<StateBuilder>,
    positions: HashMap<String, usize>,
    entry_actions: Vec<(String, EntryAction)>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing table, keeping its states, transitions and
    /// entry actions.
    pub fn from_table(table: &TransitionTable) -> Self {
        table
            .descriptors()
            .iter()
            .fold(Self::new(), |builder, descriptor| {
                let state = descriptor.events().into_iter().fold(
                    StateBuilder::new(descriptor.name()),
                    |state, event| match descriptor.target(event) {
                        Some(to) => state.on(event, table.name(to)),
                        None => state,
                    },
                );
                builder.state(match &descriptor.on_enter {
                    Some(action) => state.entry_action(Rc::clone(action)),
                    None => state,
                })
            })
    }

    /// Add (or extend) a state.
    pub fn state(mut self, state: StateBuilder) -> Self {
        match self.positions.get(&state.name) {
            Some(&pos) => self.states[pos].merge(state),
            None => {
                self.positions.insert(state.name.clone(), self.states.len());
                self.states.push(state);
            }
        }
        self
    }

    /// Add multiple states at once.
    pub fn states(self, states: impl IntoIterator<Item = StateBuilder>) -> Self {
        states.into_iter().fold(self, Self::state)
    }

    /// Add one transition. `from` is declared if it is not already;
    /// `to` must be declared somewhere in the table by build time.
    pub fn transition(
        self,
        from: impl Into<String>,
        event: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.state(StateBuilder::new(from).on(event, to))
    }

    /// Run `action` whenever `state` is entered.
    ///
    /// The state may be declared before or after this call; it must exist
    /// by build time.
    pub fn on_enter<F>(mut self, state: impl Into<String>, action: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.entry_actions.push((state.into(), Rc::new(action)));
        self
    }

    /// Whether `state` has been declared so far.
    pub fn declares(&self, state: &str) -> bool {
        self.positions.contains_key(state)
    }

    /// Validate and build the table.
    ///
    /// All problems are collected before failing: every undefined
    /// destination and every entry action for an undeclared state is
    /// reported, not just the first one found.
    pub fn build(self) -> Result<TransitionTable, ConfigError> {
        self.validate()?;

        let Self {
            mut states,
            positions,
            entry_actions,
        } = self;

        for (name, action) in entry_actions {
            if let Some(&pos) = positions.get(&name) {
                states[pos].on_enter = Some(action);
            }
        }

        let index: HashMap<String, StateId> = positions
            .into_iter()
            .map(|(name, pos)| (name, StateId(pos)))
            .collect();

        let descriptors = states
            .into_iter()
            .map(|state| StateDescriptor {
                on: state
                    .on
                    .into_iter()
                    .filter_map(|(event, to)| index.get(&to).map(|&id| (event, id)))
                    .collect(),
                name: state.name,
                on_enter: state.on_enter,
            })
            .collect();

        Ok(TransitionTable::from_resolved(descriptors, index))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut checks: Vec<Check> = Vec::new();

        if self.states.is_empty() {
            checks.push(Validation::fail(ConfigError::EmptyTable));
        }

        for state in &self.states {
            for (event, to) in &state.on {
                checks.push(require(self.declares(to), || ConfigError::UnknownTarget {
                    from: state.name.clone(),
                    event: event.clone(),
                    to: to.clone(),
                }));
            }
        }

        for (name, _) in &self.entry_actions {
            checks.push(require(self.declares(name), || {
                ConfigError::UnknownEntryState {
                    state: name.clone(),
                }
            }));
        }

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => Err(collapse(errors.iter().cloned().collect())),
        }
    }
}

impl fmt::Debug for TableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending: Vec<&str> = self.entry_actions.iter().map(|(s, _)| s.as_str()).collect();
        f.debug_struct("TableBuilder")
            .field("states", &self.states)
            .field("entry_actions", &pending)
            .finish()
    }
}

fn require(ok: bool, problem: impl FnOnce() -> ConfigError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(problem())
    }
}

fn collapse(mut errors: Vec<ConfigError>) -> ConfigError {
    if errors.len() == 1 {
        if let Some(error) = errors.pop() {
            return error;
        }
    }
    ConfigError::Multiple(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn from_table_keeps_transitions_and_entry_actions() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let table = TableBuilder::new()
            .transition("closed", "OPEN", "open")
            .transition("open", "CLOSE", "closed")
            .on_enter("open", move || counter.set(counter.get() + 1))
            .build()
            .unwrap();

        let extended = TableBuilder::from_table(&table)
            .transition("open", "LOCK", "locked")
            .state(StateBuilder::new("locked"))
            .build()
            .unwrap();

        assert_eq!(extended.state_names(), vec!["closed", "locked", "open"]);
        assert_eq!(extended.target("closed", "OPEN"), Some("open"));
        assert_eq!(extended.events("open"), Some(vec!["CLOSE", "LOCK"]));
        extended.state("open").unwrap().enter();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn builds_traffic_light() {
        let table = TableBuilder::new()
            .transition("red", "TIMER", "green")
            .transition("green", "TIMER", "yellow")
            .transition("yellow", "TIMER", "red")
            .build()
            .unwrap();

        assert_eq!(table.target("red", "TIMER"), Some("green"));
        assert_eq!(table.target("green", "TIMER"), Some("yellow"));
        assert_eq!(table.target("yellow", "TIMER"), Some("red"));
    }

    #[test]
    fn empty_table_is_rejected() {
        let result = TableBuilder::new().build();
        assert!(matches!(result, Err(ConfigError::EmptyTable)));
    }

    #[test]
    fn undefined_target_is_rejected() {
        let result = TableBuilder::new()
            .transition("red", "TIMER", "green")
            .build();

        assert_eq!(
            result.unwrap_err(),
            ConfigError::UnknownTarget {
                from: "red".to_string(),
                event: "TIMER".to_string(),
                to: "green".to_string(),
            }
        );
    }

    #[test]
    fn entry_action_for_undeclared_state_is_rejected() {
        let result = TableBuilder::new()
            .state(StateBuilder::new("idle"))
            .on_enter("busy", || {})
            .build();

        assert_eq!(
            result.unwrap_err(),
            ConfigError::UnknownEntryState {
                state: "busy".to_string()
            }
        );
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let result = TableBuilder::new()
            .transition("a", "GO", "missing")
            .transition("a", "SKIP", "nowhere")
            .on_enter("ghost", || {})
            .build();

        match result {
            Err(ConfigError::Multiple(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ConfigError::UnknownTarget { to, .. } if to == "missing"
                )));
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ConfigError::UnknownTarget { to, .. } if to == "nowhere"
                )));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::UnknownEntryState { .. })));
            }
            other => panic!("Expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn redeclared_state_merges_events() {
        let table = TableBuilder::new()
            .state(StateBuilder::new("closed").on("OPEN", "open"))
            .state(StateBuilder::new("open"))
            .state(StateBuilder::new("closed").on("LOCK", "open"))
            .build()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.events("closed"), Some(vec!["LOCK", "OPEN"]));
    }

    #[test]
    fn duplicate_transition_last_write_wins() {
        let table = TableBuilder::new()
            .transition("red", "TIMER", "green")
            .transition("red", "TIMER", "yellow")
            .states([StateBuilder::new("green"), StateBuilder::new("yellow")])
            .build()
            .unwrap();

        assert_eq!(table.target("red", "TIMER"), Some("yellow"));
    }

    #[test]
    fn entry_action_may_precede_declaration() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let table = TableBuilder::new()
            .on_enter("open", move || counter.set(counter.get() + 1))
            .transition("closed", "OPEN", "open")
            .state(StateBuilder::new("open"))
            .build()
            .unwrap();

        let open = table.state("open").unwrap();
        assert!(open.has_entry_action());
        open.enter();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn later_entry_action_replaces_earlier() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let table = TableBuilder::new()
            .state(StateBuilder::new("idle").on_enter(|| panic!("replaced action ran")))
            .on_enter("idle", move || counter.set(counter.get() + 10))
            .build()
            .unwrap();

        table.state("idle").unwrap().enter();
        assert_eq!(calls.get(), 10);
    }
}
