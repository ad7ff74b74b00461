//! Menu, interrupt and summary handlers.

use anyhow::Result;
use tracing::{debug, info};

use crate::context::{Reply, SessionContext};
use crate::core::classifier::{GameChoice, MenuSelection, classify_menu};
use crate::core::session::{CheckpointData, SessionState};
use crate::core::types::Action;
use crate::io::console::Console;

/// Show stats and the game menu, then record the player's choice in `action`.
pub fn display_menu<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) -> Result<()> {
    if state.games_played() > 0 {
        ctx.say("");
        ctx.say("Current Session Stats:");
        ctx.say(format!("Word Game Wins: {}", state.word_wins));
        ctx.say(format!("Number Game Wins: {}", state.number_wins));
    }
    if state.resumable {
        ctx.say("");
        ctx.say(format!(
            "[Session is resumable from: {}]",
            state.last_checkpoint.as_deref().unwrap_or("unknown")
        ));
    }

    ctx.say("");
    ctx.say("Choose a game:");
    ctx.say("1. Number Game");
    ctx.say("2. Word Game");
    ctx.say("Type '/help' for commands or leave blank to exit");

    let choice = match ctx.ask("Choice: ")? {
        Reply::Line(line) => line.trim().to_string(),
        Reply::Interrupted => {
            ctx.say("");
            ctx.say("Interrupt detected...");
            state.action = Action::Interrupt;
            state.interrupted = true;
            return Ok(());
        }
    };

    state.checkpoint_data = Some(CheckpointData::MenuChoice {
        choice: choice.clone(),
    });
    let label = if choice.is_empty() { "exit" } else { &choice };
    ctx.create_checkpoint(state, &format!("menu_choice_{label}"));

    match classify_menu(&choice) {
        MenuSelection::Choice(GameChoice::Exit) => {
            debug!("menu: exit");
            state.action = Action::Exit;
        }
        MenuSelection::Choice(GameChoice::Start(game)) => {
            debug!(game = %game, "menu: start game");
            state.start_game(game);
        }
        MenuSelection::Command => {
            debug!(input = %choice, "menu: routing to command interpreter");
            state.action = Action::Command;
            state.user_input = Some(choice);
        }
        MenuSelection::Invalid => {
            ctx.say("Invalid selection. Type '/help' for commands or choose 1/2 for games.");
            state.action = Action::Menu;
        }
    }
    Ok(())
}

/// Checkpoint the interrupted session and hand control to the interrupt flow.
pub fn handle_interrupt<C: Console>(
    ctx: &mut SessionContext<C>,
    state: &mut SessionState,
) -> Result<()> {
    info!(session_id = %state.session_id, "handling interrupt");
    let name = format!("interrupt_{}", state.session_id);
    ctx.create_checkpoint(state, &name);

    state.interrupted = true;
    state.action = Action::Command;
    state.user_input = Some("interrupt".to_string());
    Ok(())
}

/// Print the final report and finish the session.
pub fn show_summary<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) -> Result<()> {
    if state.interrupted {
        ctx.say("");
        ctx.say("Session ended due to interruption.");
    }
    ctx.say("");
    ctx.say("Session Summary:");
    ctx.say(format!("Session ID: {}", state.session_id));
    ctx.say(format!(
        "Word Games Played: {} | Wins: {}",
        state.word_games_played, state.word_wins
    ));
    ctx.say(format!(
        "Number Games Played: {} | Wins: {}",
        state.number_games_played, state.number_wins
    ));
    if state.resumable {
        ctx.say(format!(
            "Last Checkpoint: {}",
            state.last_checkpoint.as_deref().unwrap_or("N/A")
        ));
        ctx.say("This session can be resumed later using '/resume' or '/load'");
    }

    info!(
        session_id = %state.session_id,
        games = state.games_played(),
        wins = state.total_wins(),
        "session finished"
    );
    state.action = Action::End;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GameKind;
    use crate::test_support::{ScriptedLine, TestArcade, lines};

    #[test]
    fn choosing_a_game_counts_the_start_and_checkpoints_the_choice() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["2"]));
        let mut state = SessionState::new("m1");

        display_menu(&mut ctx, &mut state).expect("menu");

        assert_eq!(state.action, Action::WordGame);
        assert_eq!(state.word_games_played, 1);
        assert_eq!(state.last_checkpoint.as_deref(), Some("menu_choice_2"));
        assert_eq!(
            state.checkpoint_data,
            Some(CheckpointData::MenuChoice {
                choice: "2".to_string()
            })
        );
        assert_eq!(
            arcade.checkpoint_names().expect("names"),
            vec!["menu_choice_2"]
        );
    }

    #[test]
    fn blank_choice_exits() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&[""]));
        let mut state = SessionState::new("m2");
        display_menu(&mut ctx, &mut state).expect("menu");
        assert_eq!(state.action, Action::Exit);
        assert_eq!(state.last_checkpoint.as_deref(), Some("menu_choice_exit"));
    }

    #[test]
    fn command_text_is_handed_to_interpreter() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["/status"]));
        let mut state = SessionState::new("m3");
        display_menu(&mut ctx, &mut state).expect("menu");
        assert_eq!(state.action, Action::Command);
        assert_eq!(state.user_input.as_deref(), Some("/status"));
        assert_eq!(
            arcade.checkpoint_names().expect("names"),
            vec!["menu_choice__status"]
        );
    }

    #[test]
    fn invalid_choice_stays_at_menu() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["7"]));
        let mut state = SessionState::new("m4");
        display_menu(&mut ctx, &mut state).expect("menu");
        assert_eq!(state.action, Action::Menu);
        assert!(ctx.console.transcript().contains("Invalid selection"));
    }

    #[test]
    fn interrupt_while_waiting_marks_state_without_checkpoint() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(vec![ScriptedLine::Interrupt]);
        let mut state = SessionState::new("m5");
        display_menu(&mut ctx, &mut state).expect("menu");
        assert_eq!(state.action, Action::Interrupt);
        assert!(state.interrupted);
        assert!(arcade.checkpoint_names().expect("names").is_empty());
    }

    #[test]
    fn stats_and_resume_banner_shown_after_play() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&[""]));
        let mut state = SessionState::new("m6");
        state.start_game(GameKind::NumberGame);
        state.record_win(GameKind::NumberGame);
        state.resumable = true;
        state.last_checkpoint = Some("before_number_game".to_string());

        display_menu(&mut ctx, &mut state).expect("menu");

        let transcript = ctx.console.transcript();
        assert!(transcript.contains("Number Game Wins: 1"));
        assert!(transcript.contains("[Session is resumable from: before_number_game]"));
    }

    #[test]
    fn interrupt_handler_writes_named_checkpoint_and_routes_to_interpreter() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(Vec::new());
        let mut state = SessionState::new("m7");

        handle_interrupt(&mut ctx, &mut state).expect("interrupt");

        assert!(state.interrupted);
        assert_eq!(state.action, Action::Command);
        assert_eq!(state.user_input.as_deref(), Some("interrupt"));
        assert_eq!(
            arcade.checkpoint_names().expect("names"),
            vec!["interrupt_m7"]
        );
    }

    #[test]
    fn summary_ends_session_and_reports_interruption() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(Vec::new());
        let mut state = SessionState::new("m8");
        state.interrupted = true;
        state.action = Action::Exit;

        show_summary(&mut ctx, &mut state).expect("summary");

        assert_eq!(state.action, Action::End);
        let transcript = ctx.console.transcript();
        assert!(transcript.contains("Session ended due to interruption."));
        assert!(transcript.contains("Session ID: m8"));
    }
}
