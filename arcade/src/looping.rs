//! Session driver: runs steps until the session ends or a handler fails.

use tracing::{error, info};

use crate::context::SessionContext;
use crate::core::session::SessionState;
use crate::core::types::Node;
use crate::io::checkpoint_store::CheckpointStore;
use crate::io::console::Console;
use crate::step::{entry_node, run_step};

/// Reason why `run_session` stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopStop {
    /// The summary ran and the session ended normally.
    Ended,
    /// A handler returned an error; an emergency save was attempted.
    Failed { error: String, saved: bool },
}

/// Summary of a session run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub state: SessionState,
    pub steps_executed: u32,
    pub stop: LoopStop,
}

/// Drive `state` through the state machine until it reaches the end.
///
/// A raised interrupt flag is checked before every step and diverts to the
/// interrupt node. Handler errors never escape: they stop the loop after one
/// emergency save under the automatic checkpoint name.
pub fn run_session<C: Console>(
    ctx: &mut SessionContext<C>,
    mut state: SessionState,
) -> SessionOutcome {
    info!(session_id = %state.session_id, "session started");
    let mut node = entry_node(state.action);
    let mut steps_executed = 0u32;

    loop {
        if ctx.interrupts.take() {
            info!(node = %node, "interrupt pending; diverting");
            state.interrupted = true;
            node = Node::Interrupt;
        }

        match run_step(ctx, &mut state, node) {
            Ok(Some(next)) => {
                steps_executed += 1;
                node = next;
            }
            Ok(None) => {
                steps_executed += 1;
                return SessionOutcome {
                    state,
                    steps_executed,
                    stop: LoopStop::Ended,
                };
            }
            Err(err) => {
                error!(node = %node, error = %format!("{err:#}"), "session step failed");
                ctx.say(format!("Unexpected error occurred: {err:#}"));
                state.interrupted = true;
                let name = CheckpointStore::auto_name(&state);
                let saved = match ctx.persist(&mut state, &name) {
                    Ok(_) => {
                        ctx.say("Session saved due to unexpected error.");
                        true
                    }
                    Err(save_err) => {
                        error!(error = %save_err, "emergency save failed");
                        ctx.say(format!("Failed to save session after error: {save_err}"));
                        false
                    }
                };
                return SessionOutcome {
                    state,
                    steps_executed,
                    stop: LoopStop::Failed {
                        error: format!("{err:#}"),
                        saved,
                    },
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};

    use crate::core::types::Action;
    use crate::io::signals::InterruptFlag;
    use crate::test_support::{ScriptedConsole, TestArcade, lines, test_config};

    #[test]
    fn blank_menu_choice_ends_after_summary() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&[""]));

        let outcome = run_session(&mut ctx, SessionState::new("loop"));

        assert_eq!(outcome.stop, LoopStop::Ended);
        assert_eq!(outcome.steps_executed, 2);
        assert_eq!(outcome.state.action, Action::End);
        assert!(ctx.console.transcript().contains("Session Summary:"));
    }

    #[test]
    fn pending_interrupt_diverts_to_interrupt_flow() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["2"]));
        ctx.interrupts.raise();

        let outcome = run_session(&mut ctx, SessionState::new("loop"));

        assert_eq!(outcome.stop, LoopStop::Ended);
        assert!(outcome.state.interrupted);
        assert_eq!(
            arcade.checkpoint_names().expect("names"),
            vec!["interrupt_loop"]
        );
    }

    struct BrokenConsole;

    impl Console for BrokenConsole {
        fn say(&mut self, _line: &str) {}

        fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
            Err(anyhow!("terminal went away"))
        }
    }

    #[test]
    fn handler_error_triggers_emergency_save() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = SessionContext::new(
            BrokenConsole,
            InterruptFlag::new(),
            &test_config(&arcade.checkpoint_dir()),
        );

        let outcome = run_session(&mut ctx, SessionState::new("boom"));

        assert_eq!(
            outcome.stop,
            LoopStop::Failed {
                error: "terminal went away".to_string(),
                saved: true,
            }
        );
        assert!(outcome.state.interrupted);
        assert_eq!(
            arcade.checkpoint_names().expect("names"),
            vec!["session_boom"]
        );
    }

    #[test]
    fn end_of_input_at_menu_saves_through_interrupt_flow() {
        let arcade = TestArcade::new().expect("arcade");
        let interrupts = InterruptFlag::new();
        let console = ScriptedConsole::new(Vec::new(), interrupts.clone());
        let mut ctx = SessionContext::new(
            console,
            interrupts,
            &test_config(&arcade.checkpoint_dir()),
        );

        let outcome = run_session(&mut ctx, SessionState::new("eof"));

        assert_eq!(outcome.stop, LoopStop::Ended);
        assert_eq!(
            arcade.checkpoint_names().expect("names"),
            vec!["interrupt_eof", "session_eof"]
        );
    }
}
