//! Builder API for ergonomic table and machine construction.
//!
//! This module provides fluent builders and a macro for describing
//! transition tables with minimal boilerplate. Every builder validates its
//! input when `build` is called and reports problems as [`ConfigError`].

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod table;

pub use error::ConfigError;
pub use machine::StateMachineBuilder;
pub use state::StateBuilder;
pub use table::TableBuilder;

/// Build a cyclic table where one event walks `states` in order and wraps
/// from the last back to the first.
///
/// # Example
///
/// ```
/// use waymark::builder::cycle;
///
/// let table = cycle("TIMER", ["red", "green", "yellow"]).build().unwrap();
///
/// assert_eq!(table.target("red", "TIMER"), Some("green"));
/// assert_eq!(table.target("yellow", "TIMER"), Some("red"));
/// ```
pub fn cycle<I, S>(event: &str, states: I) -> TableBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = states.into_iter().map(Into::into).collect();
    let next = names.iter().skip(1).chain(names.first());
    names
        .iter()
        .zip(next)
        .fold(TableBuilder::new(), |table, (from, to)| {
            table.transition(from.as_str(), event, to.as_str())
        })
}
