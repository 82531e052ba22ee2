//! Macros for ergonomic table construction.

/// Describe a transition table with literal syntax.
///
/// Each entry names a state and, optionally, the events it reacts to and
/// their destinations. The macro expands to a
/// [`TableBuilder`](crate::builder::TableBuilder), so entry actions can be
/// attached before building. Repeated events keep the last destination.
///
/// # Example
///
/// ```
/// use waymark::transition_table;
///
/// let table = transition_table! {
///     red => { TIMER => green },
///     green => { TIMER => yellow },
///     yellow => { TIMER => red },
/// }
/// .build()
/// .unwrap();
///
/// assert_eq!(table.target("yellow", "TIMER"), Some("red"));
/// ```
///
/// States without outgoing transitions are listed bare:
///
/// ```
/// use waymark::transition_table;
///
/// let table = transition_table! {
///     pending => { APPROVE => approved, REJECT => rejected },
///     approved,
///     rejected,
/// }
/// .build()
/// .unwrap();
///
/// assert_eq!(table.terminal_states(), vec!["approved", "rejected"]);
/// ```
#[macro_export]
macro_rules! transition_table {
    (
        $(
            $state:ident $(=> { $($event:ident => $target:ident),* $(,)? })?
        ),* $(,)?
    ) => {{
        let builder = $crate::builder::TableBuilder::new();
        $(
            let builder = builder.state(
                $crate::builder::StateBuilder::new(stringify!($state))
                    $($(.on(stringify!($event), stringify!($target)))*)?
            );
        )*
        builder
    }};
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn transition_table_macro_builds_table() {
        let table = transition_table! {
            closed => { OPEN => open },
            open => { CLOSE => closed },
        }
        .build()
        .unwrap();

        assert_eq!(table.state_names(), vec!["closed", "open"]);
        assert_eq!(table.target("closed", "OPEN"), Some("open"));
        assert_eq!(table.target("open", "CLOSE"), Some("closed"));
    }

    #[test]
    fn transition_table_supports_bare_states() {
        let table = transition_table! {
            start => { FINISH => done },
            done
        }
        .build()
        .unwrap();

        assert_eq!(table.is_terminal("done"), Some(true));
    }

    #[test]
    fn transition_table_last_write_wins() {
        let table = transition_table! {
            red => { TIMER => green, TIMER => yellow },
            green,
            yellow,
        }
        .build()
        .unwrap();

        assert_eq!(table.target("red", "TIMER"), Some("yellow"));
    }

    #[test]
    fn transition_table_accepts_entry_actions() {
        let entered = Rc::new(Cell::new(false));
        let flag = Rc::clone(&entered);

        let table = transition_table! {
            idle => { START => running },
            running,
        }
        .on_enter("running", move || flag.set(true))
        .build()
        .unwrap();

        table.state("running").unwrap().enter();
        assert!(entered.get());
    }

    #[test]
    fn transition_table_reports_undefined_targets() {
        let result = transition_table! {
            idle => { START => running },
        }
        .build();

        assert!(result.is_err());
    }
}
