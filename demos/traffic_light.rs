//! Traffic Light State Machine
//!
//! A cyclic machine: one `TIMER` event walks red -> green -> yellow -> red.
//!
//! Run with: cargo run --example traffic_light
//! Set `RUST_LOG=debug` to see ignored events as well as transitions.

use tracing_subscriber::EnvFilter;
use waymark::builder::{cycle, StateMachineBuilder};
use waymark::ConfigError;

fn main() -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Traffic Light State Machine ===\n");

    let light = StateMachineBuilder::new()
        .initial("red")
        .table_builder(cycle("TIMER", ["red", "green", "yellow"]))
        .on_enter("green", || println!("  Go!"))
        .on_enter("yellow", || println!("  Caution"))
        .on_enter("red", || println!("  Stop"))
        .build()?;

    println!("Initial state: {}\n", light.current_state());

    for _ in 0..4 {
        if let Err(e) = light.send("TIMER") {
            eprintln!("send failed: {e}");
        }
        println!("State: {}", light.current_state());
    }

    println!("\nUndefined events are ignored:");
    if let Ok(outcome) = light.send("HONK") {
        println!("  HONK -> {outcome:?}, still {}", light.current_state());
    }

    println!("\nPath so far: {}", light.history().get_path().join(" -> "));
    println!("\n=== Example Complete ===");
    Ok(())
}
