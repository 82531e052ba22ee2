//! Builder for constructing state machines.

use crate::builder::error::ConfigError;
use crate::builder::state::StateBuilder;
use crate::builder::table::TableBuilder;
use crate::core::TransitionTable;
use crate::runner::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use waymark::builder::StateMachineBuilder;
///
/// let light = StateMachineBuilder::new()
///     .initial("red")
///     .transition("red", "TIMER", "green")
///     .transition("green", "TIMER", "yellow")
///     .transition("yellow", "TIMER", "red")
///     .build()
///     .unwrap();
///
/// assert_eq!(light.current_state(), "red");
/// ```
#[derive(Debug, Default)]
pub struct StateMachineBuilder {
    initial: Option<String>,
    table: TableSource,
    history_limit: Option<usize>,
}

#[derive(Debug)]
enum TableSource {
    Building(TableBuilder),
    Built(TransitionTable),
}

impl Default for TableSource {
    fn default() -> Self {
        Self::Building(TableBuilder::new())
    }
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add (or extend) a state.
    pub fn state(self, state: StateBuilder) -> Self {
        self.with_table(|table| table.state(state))
    }

    /// Add one transition.
    pub fn transition(
        self,
        from: impl Into<String>,
        event: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.with_table(|table| table.transition(from, event, to))
    }

    /// Run `action` whenever `state` is entered.
    pub fn on_enter<F>(self, state: impl Into<String>, action: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.with_table(|table| table.on_enter(state, action))
    }

    /// Use a table that is still being described.
    ///
    /// Replaces anything added so far.
    pub fn table_builder(mut self, table: TableBuilder) -> Self {
        self.table = TableSource::Building(table);
        self
    }

    /// Use an already built table.
    ///
    /// Replaces anything added so far; later `state`, `transition` and
    /// `on_enter` calls extend it.
    pub fn table(mut self, table: TransitionTable) -> Self {
        self.table = TableSource::Built(table);
        self
    }

    /// Keep at most `limit` transitions in the machine's history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build the state machine, running the initial state's entry action.
    pub fn build(self) -> Result<StateMachine, ConfigError> {
        let initial = self.initial.ok_or(ConfigError::MissingInitialState)?;

        let table = match self.table {
            TableSource::Building(builder) => builder.build()?,
            TableSource::Built(table) => table,
        };

        match self.history_limit {
            Some(limit) => StateMachine::with_history_limit(initial, table, limit),
            None => StateMachine::new(initial, table),
        }
    }

    fn with_table(mut self, f: impl FnOnce(TableBuilder) -> TableBuilder) -> Self {
        let builder = match self.table {
            TableSource::Building(builder) => builder,
            TableSource::Built(table) => TableBuilder::from_table(&table),
        };
        self.table = TableSource::Building(f(builder));
        self
    }
}
