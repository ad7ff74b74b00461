//! Number game: the program finds the player's number by binary search.

use anyhow::Result;
use tracing::{debug, info};

use crate::context::SessionContext;
use crate::core::number_search::{Feedback, NumberSearch, SearchStatus};
use crate::core::session::SessionState;
use crate::core::types::GameKind;
use crate::games::{Turn, ask_move, depart, finish};
use crate::io::console::Console;

pub fn play_number_game<C: Console>(
    ctx: &mut SessionContext<C>,
    state: &mut SessionState,
) -> Result<()> {
    let (low, high) = (ctx.number_game.low, ctx.number_game.high);
    state.current_game = Some(GameKind::NumberGame);

    ctx.say("");
    ctx.say(format!(
        "Think of a number between {low} and {high}. I'll try to guess it!"
    ));
    ctx.say("(Type '/help' for commands or '/exit' to return to menu)");

    let mut search = NumberSearch::new(low, high);
    while let Some(guess) = search.next_guess() {
        ctx.say("");
        ctx.say(format!("Is your number {guess}?"));

        let answer = match ask_move(ctx, "Enter 'yes', 'higher', or 'lower': ")? {
            Turn::Answer(answer) => answer,
            Turn::Depart(departure) => {
                state.checkpoint_data = Some(search.checkpoint());
                let name = format!("number_game_attempt_{}_interrupted", search.attempts());
                ctx.create_checkpoint(state, &name);
                depart(ctx, state, GameKind::NumberGame, departure);
                return Ok(());
            }
        };

        let Some(feedback) = Feedback::parse(&answer) else {
            ctx.say("Please enter 'yes', 'higher', or 'lower'");
            continue;
        };

        match search.apply(feedback) {
            SearchStatus::Found { guess, attempts } => {
                state.record_win(GameKind::NumberGame);
                info!(guess, attempts, "number game won");
                ctx.say(format!("Correct! I guessed it in {attempts} attempts."));
                ctx.say(format!("Number Game Wins: {}", state.number_wins));
                finish(state);
                return Ok(());
            }
            SearchStatus::Continue => {
                let (low, high) = search.bounds();
                debug!(guess, feedback = feedback.as_str(), low, high, "range narrowed");
                state.checkpoint_data = Some(search.checkpoint());
            }
            SearchStatus::Exhausted => {
                state.checkpoint_data = Some(search.checkpoint());
                break;
            }
        }
    }

    ctx.say("I've run out of numbers. Were those answers right?");
    info!(attempts = search.attempts(), "number game ended without a win");
    finish(state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::CheckpointData;
    use crate::core::types::Action;
    use crate::test_support::{ScriptedLine, TestArcade, lines};

    fn started() -> SessionState {
        let mut state = SessionState::new("num");
        state.start_game(GameKind::NumberGame);
        state
    }

    #[test]
    fn higher_higher_yes_wins_on_third_guess() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["higher", "higher", "yes"]));
        let mut state = started();

        play_number_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.number_wins, 1);
        assert_eq!(state.number_games_played, 1);
        assert_eq!(state.action, Action::Menu);
        assert_eq!(state.current_game, None);
        let transcript = ctx.console.transcript();
        assert!(transcript.contains("Is your number 50?"));
        assert!(transcript.contains("Is your number 75?"));
        assert!(transcript.contains("Is your number 88?"));
        assert!(transcript.contains("in 3 attempts"));
        assert_eq!(ctx.console.prompts().len(), 3);
    }

    #[test]
    fn invalid_answer_reasks_same_guess() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["maybe", "YES"]));
        let mut state = started();

        play_number_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.number_wins, 1);
        let transcript = ctx.console.transcript();
        assert!(transcript.contains("Please enter 'yes', 'higher', or 'lower'"));
        assert!(transcript.contains("in 1 attempts"));
    }

    #[test]
    fn progress_is_kept_after_each_narrowing() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(vec![
            ScriptedLine::text("lower"),
            ScriptedLine::Interrupt,
        ]);
        let mut state = started();

        play_number_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.action, Action::Interrupt);
        assert!(state.interrupted);
        assert_eq!(state.current_game, Some(GameKind::NumberGame));
        assert_eq!(
            state.checkpoint_data,
            Some(CheckpointData::NumberGame {
                min_num: 1,
                max_num: 49,
                attempts: 2,
                last_guess: 25,
                last_response: None,
            })
        );
        assert_eq!(
            arcade.checkpoint_names().expect("names"),
            vec!["number_game_attempt_2_interrupted"]
        );
    }

    #[test]
    fn slash_command_hands_off_to_interpreter() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["/status"]));
        let mut state = started();

        play_number_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.action, Action::Command);
        assert_eq!(state.user_input.as_deref(), Some("/status"));
        assert_eq!(state.number_wins, 0);
    }

    #[test]
    fn quit_returns_to_menu_without_win() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["quit"]));
        let mut state = started();

        play_number_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.action, Action::Menu);
        assert_eq!(state.current_game, None);
        assert!(!state.interrupted);
    }

    #[test]
    fn contradictory_answers_end_without_win() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(Vec::new());
        ctx.number_game.low = 1;
        ctx.number_game.high = 2;
        ctx.console = crate::test_support::ScriptedConsole::new(
            lines(&["higher", "higher"]),
            ctx.interrupts.clone(),
        );
        let mut state = started();

        play_number_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.number_wins, 0);
        assert_eq!(state.action, Action::Menu);
        assert!(ctx.console.transcript().contains("run out of numbers"));
    }
}
