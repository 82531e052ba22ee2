//! Door State Machine
//!
//! Entry actions run each time a state is entered, including the initial
//! state when the machine is created. Unknown events leave the door as is.
//!
//! Run with: cargo run --example door

use tracing_subscriber::EnvFilter;
use waymark::{transition_table, ConfigError, StateMachine};

fn main() -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Door State Machine ===\n");

    let table = transition_table! {
        closed => { OPEN => open, LOCK => locked },
        open => { CLOSE => closed },
        locked => { UNLOCK => closed },
    }
    .on_enter("closed", || println!("Door closed"))
    .on_enter("open", || println!("Door opened"))
    .on_enter("locked", || println!("Door locked"))
    .build()?;

    let door = StateMachine::new("closed", table)?;

    for event in ["OPEN", "LOCK", "CLOSE", "LOCK", "OPEN", "UNLOCK", "OPEN"] {
        match door.send(event) {
            Ok(outcome) if outcome.is_transition() => {}
            Ok(_) => println!("({event} ignored in state '{}')", door.current_state()),
            Err(e) => eprintln!("send failed: {e}"),
        }
    }

    println!("\nFinal state: {}", door.current_state());
    println!("Available events: {:?}", door.available_events());
    println!("\n=== Example Complete ===");
    Ok(())
}
