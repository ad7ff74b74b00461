//! Word game: the player picks a word, answers five questions, and the
//! program guesses.

use anyhow::Result;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::context::SessionContext;
use crate::core::session::{CheckpointData, SessionState};
use crate::core::types::GameKind;
use crate::core::word_guess::{QUESTIONS, WORDS, candidates, is_known_word};
use crate::games::{Turn, ask_move, depart, finish};
use crate::io::console::Console;

pub fn play_word_game<C: Console>(
    ctx: &mut SessionContext<C>,
    state: &mut SessionState,
) -> Result<()> {
    state.current_game = Some(GameKind::WordGame);

    ctx.say("");
    ctx.say("Choose a word from this list:");
    ctx.say(WORDS.join(", "));
    ctx.say("(Type '/help' for commands or '/exit' to return to menu)");

    let word = loop {
        match ask_move(ctx, "Enter your chosen word: ")? {
            Turn::Answer(word) if is_known_word(&word) => break word,
            Turn::Answer(_) => ctx.say("Please choose a word from the list."),
            Turn::Depart(departure) => {
                depart(ctx, state, GameKind::WordGame, departure);
                return Ok(());
            }
        }
    };
    ctx.create_checkpoint(state, &format!("word_selected_{word}"));

    let mut answers: Vec<String> = Vec::with_capacity(QUESTIONS.len());
    for (index, question) in QUESTIONS.iter().enumerate() {
        let number = u32::try_from(index + 1).unwrap_or(u32::MAX);
        ctx.say("");
        ctx.say(*question);

        match ask_move(ctx, "Answer (yes/no/maybe): ")? {
            Turn::Answer(answer) => {
                debug!(question = number, answer = %answer, "answer recorded");
                answers.push(answer);
                state.checkpoint_data = Some(progress(number, &answers));
            }
            Turn::Depart(departure) => {
                state.checkpoint_data = Some(progress(number, &answers));
                ctx.create_checkpoint(state, &format!("word_game_q{number}_interrupted"));
                depart(ctx, state, GameKind::WordGame, departure);
                return Ok(());
            }
        }
    }

    ctx.create_checkpoint(state, "word_game_making_guess");
    let guess = candidates(&answers)
        .choose(&mut ctx.rng)
        .copied()
        .unwrap_or(WORDS[0]);
    ctx.say("");
    ctx.say(format!("I think your word is: {guess}"));

    match ask_move(ctx, "Was I correct? (yes/no): ")? {
        Turn::Answer(reply) if reply == "yes" => {
            state.record_win(GameKind::WordGame);
            info!(guess, "word game won");
            ctx.say("Correct! I guessed your word.");
            ctx.say(format!("Word Game Wins: {}", state.word_wins));
        }
        Turn::Answer(_) => {
            info!(guess, "word game lost");
            ctx.say("I was wrong. Good game!");
        }
        Turn::Depart(departure) => {
            depart(ctx, state, GameKind::WordGame, departure);
            return Ok(());
        }
    }
    finish(state);
    Ok(())
}

fn progress(question: u32, answers: &[String]) -> CheckpointData {
    CheckpointData::WordGame {
        question,
        answers: u32::try_from(answers.len()).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Action;
    use crate::test_support::{ScriptedLine, TestArcade, lines};

    fn started() -> SessionState {
        let mut state = SessionState::new("word");
        state.start_game(GameKind::WordGame);
        state
    }

    fn guessed_word(transcript: &str) -> String {
        transcript
            .lines()
            .find_map(|line| line.strip_prefix("I think your word is: "))
            .expect("guess line")
            .to_string()
    }

    #[test]
    fn confirmed_guess_counts_one_win() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["dog", "yes", "no", "no", "yes", "yes", "yes"]));
        let mut state = started();

        play_word_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.word_wins, 1);
        assert_eq!(state.action, Action::Menu);
        assert_eq!(state.current_game, None);
        let guess = guessed_word(&ctx.console.transcript());
        assert!(
            ["dog", "elephant", "flower", "lion", "tree"].contains(&guess.as_str()),
            "{guess}"
        );
        ctx.console.assert_drained().expect("all replies consumed");
    }

    #[test]
    fn wrong_guess_is_not_a_win() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["car", "no", "yes", "no", "no", "yes", "no"]));
        let mut state = started();

        play_word_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.word_wins, 0);
        assert_eq!(state.action, Action::Menu);
        assert!(ctx.console.transcript().contains("I was wrong. Good game!"));
    }

    #[test]
    fn unknown_word_is_asked_again() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["zebra", "Kite", "q"]));
        let mut state = started();

        play_word_game(&mut ctx, &mut state).expect("play");

        assert!(
            ctx.console
                .transcript()
                .contains("Please choose a word from the list.")
        );
        assert_eq!(state.word_games_played, 1);
        assert_eq!(state.action, Action::Menu);
        assert_eq!(state.current_game, None);
    }

    #[test]
    fn interrupt_mid_questions_writes_progress_checkpoint() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(vec![
            ScriptedLine::text("tree"),
            ScriptedLine::text("yes"),
            ScriptedLine::Interrupt,
        ]);
        let mut state = started();

        play_word_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.action, Action::Interrupt);
        assert!(state.interrupted);
        assert_eq!(
            state.checkpoint_data,
            Some(CheckpointData::WordGame {
                question: 2,
                answers: 1,
            })
        );
        assert_eq!(
            arcade.checkpoint_names().expect("names"),
            vec!["word_game_q2_interrupted", "word_selected_tree"]
        );
    }

    #[test]
    fn command_at_guess_confirmation_goes_to_interpreter() {
        let arcade = TestArcade::new().expect("arcade");
        let mut ctx = arcade.context(lines(&["ocean", "no", "yes", "no", "yes", "yes", "/status"]));
        let mut state = started();

        play_word_game(&mut ctx, &mut state).expect("play");

        assert_eq!(state.action, Action::Command);
        assert_eq!(state.user_input.as_deref(), Some("/status"));
        assert_eq!(state.word_wins, 0);
    }
}
