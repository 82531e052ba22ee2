//! Loading a Machine from JSON
//!
//! Machines can be described as data and loaded at runtime. Entry actions
//! are attached by state name after loading.
//!
//! Run with: cargo run --example json_config [path/to/machine.json]

use tracing_subscriber::EnvFilter;
use waymark::{ConfigError, MachineConfig};

const ORDER: &str = r#"{
    "initial": "cart",
    "history_limit": 16,
    "states": {
        "cart":      { "on": { "CHECKOUT": "payment" } },
        "payment":   { "on": { "PAID": "shipped", "CANCEL": "cart" } },
        "shipped":   { "on": { "DELIVER": "delivered" } },
        "delivered": {}
    }
}"#;

fn main() -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => MachineConfig::from_path(path)?,
        None => MachineConfig::from_json_str(ORDER)?,
    };

    println!("=== Machine from JSON ===\n");
    println!("{}\n", config.to_json_string()?);

    let machine = config
        .into_builder()
        .on_enter("delivered", || println!("Order delivered"))
        .build()?;

    // Take the last available event each step; bounded in case the table cycles.
    for _ in 0..32 {
        if machine.is_terminal() {
            break;
        }
        let Some(event) = machine.available_events().last().map(|e| e.to_string()) else {
            break;
        };
        if let Err(e) = machine.send(&event) {
            eprintln!("send failed: {e}");
            break;
        }
    }

    println!("\nPath: {}", machine.history().get_path().join(" -> "));
    Ok(())
}
