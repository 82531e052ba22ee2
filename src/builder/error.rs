//! Configuration errors for tables and machines.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when building a transition table or a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state '{state}' is not defined in the transition table")]
    UnknownInitialState { state: String },

    #[error("Transition '{event}' from '{from}' targets undefined state '{to}'")]
    UnknownTarget {
        from: String,
        event: String,
        to: String,
    },

    #[error("Entry action registered for undefined state '{state}'")]
    UnknownEntryState { state: String },

    #[error("Transition table defines no states")]
    EmptyTable,

    #[error("{} configuration problems: {}", .0.len(), join_messages(.0))]
    Multiple(Vec<ConfigError>),

    #[error("Failed to parse machine configuration: {0}")]
    Parse(String),

    #[error("Failed to serialize machine configuration: {0}")]
    Serialize(String),

    #[error("Failed to read machine configuration from '{}': {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl ConfigError {
    /// Individual problems, flattening [`ConfigError::Multiple`].
    pub fn problems(&self) -> Vec<&ConfigError> {
        match self {
            Self::Multiple(errors) => errors.iter().flat_map(ConfigError::problems).collect(),
            other => vec![other],
        }
    }
}

fn join_messages(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
