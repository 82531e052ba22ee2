//! Declarative machine configuration.
//!
//! A [`MachineConfig`] is the serializable description of a machine: its
//! initial state and, for every state, the events it reacts to. Entry
//! actions are code and cannot be serialized, so they are attached after
//! loading through [`MachineConfig::into_builder`].
//!
//! # Example
//!
//! ```rust
//! use waymark::config::MachineConfig;
//!
//! let config = MachineConfig::from_json_str(r#"{
//!     "initial": "red",
//!     "states": {
//!         "red":    { "on": { "TIMER": "green" } },
//!         "green":  { "on": { "TIMER": "yellow" } },
//!         "yellow": { "on": { "TIMER": "red" } }
//!     }
//! }"#).unwrap();
//!
//! let light = config
//!     .into_builder()
//!     .on_enter("green", || println!("Go"))
//!     .build()
//!     .unwrap();
//! light.send("TIMER").unwrap();
//! assert_eq!(light.current_state(), "green");
//! ```

use crate::builder::{ConfigError, StateBuilder, StateMachineBuilder, TableBuilder};
use crate::core::TransitionTable;
use crate::runner::StateMachine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serializable description of a machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// State the machine starts in
    pub initial: String,

    /// Maximum number of transitions kept in history; defaults to
    /// [`DEFAULT_HISTORY_LIMIT`](crate::core::DEFAULT_HISTORY_LIMIT)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,

    /// States by name
    pub states: BTreeMap<String, StateConfig>,
}

/// Serializable description of one state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    /// Event name to destination state
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub on: BTreeMap<String, String>,
}

impl MachineConfig {
    /// Parse a configuration from JSON.
    ///
    /// A repeated event key inside one `on` object keeps its last value.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            states = config.states.len(),
            "loaded machine configuration"
        );
        Ok(config)
    }

    /// Describe an existing table. Entry actions are not carried over.
    pub fn from_table(initial: impl Into<String>, table: &TransitionTable) -> Self {
        let states = table
            .state_names()
            .into_iter()
            .map(|name| {
                let on = table
                    .events(name)
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|event| {
                        table
                            .target(name, event)
                            .map(|to| (event.to_string(), to.to_string()))
                    })
                    .collect();
                (name.to_string(), StateConfig { on })
            })
            .collect();

        Self {
            initial: initial.into(),
            history_limit: None,
            states,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Table builder for the configured states.
    pub fn table_builder(&self) -> TableBuilder {
        self.states
            .iter()
            .fold(TableBuilder::new(), |table, (name, state)| {
                table.state(state.on.iter().fold(
                    StateBuilder::new(name.as_str()),
                    |builder, (event, to)| builder.on(event.as_str(), to.as_str()),
                ))
            })
    }

    /// Machine builder for this configuration, ready for entry actions.
    pub fn into_builder(self) -> StateMachineBuilder {
        let builder = StateMachineBuilder::new()
            .table_builder(self.table_builder())
            .initial(self.initial);
        match self.history_limit {
            Some(limit) => builder.history_limit(limit),
            None => builder,
        }
    }

    /// Build a machine without entry actions.
    pub fn build(self) -> Result<StateMachine, ConfigError> {
        self.into_builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const DOOR: &str = r#"{
        "initial": "closed",
        "states": {
            "closed": { "on": { "OPEN": "open" } },
            "open": { "on": { "CLOSE": "closed" } }
        }
    }"#;

    #[test]
    fn parses_source_shaped_config() {
        let config = MachineConfig::from_json_str(DOOR).unwrap();

        assert_eq!(config.initial, "closed");
        assert_eq!(config.history_limit, None);
        assert_eq!(config.states["closed"].on["OPEN"], "open");
    }

    #[test]
    fn missing_on_means_terminal_state() {
        let config = MachineConfig::from_json_str(
            r#"{
                "initial": "start",
                "states": { "start": { "on": { "GO": "end" } }, "end": {} }
            }"#,
        )
        .unwrap();

        let machine = config.build().unwrap();
        machine.send("GO").unwrap();
        assert!(machine.is_terminal());
    }

    #[test]
    fn duplicate_event_keys_last_write_wins() {
        let config = MachineConfig::from_json_str(
            r#"{
                "initial": "red",
                "states": {
                    "red": { "on": { "TIMER": "green", "TIMER": "yellow" } },
                    "green": {},
                    "yellow": {}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.states["red"].on["TIMER"], "yellow");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = MachineConfig::from_json_str(
            r#"{ "initial": "a", "states": { "a": { "onEnter": "log" } } }"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = MachineConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = MachineConfig::from_path("/nonexistent/waymark/machine.json");
        match result {
            Err(ConfigError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/waymark/machine.json"));
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn from_path_reads_file() {
        let path = std::env::temp_dir()
            .join(format!("waymark-door-{}.json", std::process::id()));
        std::fs::write(&path, DOOR).unwrap();

        let config = MachineConfig::from_path(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().states.len(), 2);
    }

    #[test]
    fn unknown_initial_state_is_rejected() {
        let mut config = MachineConfig::from_json_str(DOOR).unwrap();
        config.initial = "ajar".to_string();

        assert!(matches!(
            config.build(),
            Err(ConfigError::UnknownInitialState { .. })
        ));
    }

    #[test]
    fn undefined_target_is_rejected() {
        let result = MachineConfig::from_json_str(
            r#"{ "initial": "a", "states": { "a": { "on": { "GO": "b" } } } }"#,
        )
        .unwrap()
        .build();

        assert!(matches!(result, Err(ConfigError::UnknownTarget { .. })));
    }

    #[test]
    fn builder_accepts_entry_actions() {
        let opened = Rc::new(Cell::new(0));
        let counter = Rc::clone(&opened);

        let door = MachineConfig::from_json_str(DOOR)
            .unwrap()
            .into_builder()
            .on_enter("open", move || counter.set(counter.get() + 1))
            .build()
            .unwrap();

        door.send("OPEN").unwrap();
        door.send("CLOSE").unwrap();
        door.send("OPEN").unwrap();
        assert_eq!(opened.get(), 2);
    }

    #[test]
    fn history_limit_is_carried() {
        let mut config = MachineConfig::from_json_str(DOOR).unwrap();
        config.history_limit = Some(5);

        assert_eq!(config.build().unwrap().history().limit(), Some(5));
    }

    #[test]
    fn from_table_describes_table() {
        let config = MachineConfig::from_json_str(DOOR).unwrap();
        let machine = config.clone().build().unwrap();

        assert_eq!(MachineConfig::from_table("closed", machine.table()), config);
    }

    #[test]
    fn json_output_parses_back() {
        let config = MachineConfig::from_json_str(DOOR).unwrap();
        let json = config.to_json_string().unwrap();

        assert_eq!(MachineConfig::from_json_str(&json).unwrap(), config);
    }
}
