//! Game handlers and the mid-game reply plumbing they share.

pub mod number;
pub mod word;

use anyhow::Result;
use tracing::debug;

use crate::context::{Reply, SessionContext};
use crate::core::classifier::{GameReply, classify_game_reply};
use crate::core::session::SessionState;
use crate::core::types::{Action, GameKind};
use crate::io::console::Console;

pub use number::play_number_game;
pub use word::play_word_game;

/// Why a game stopped before finishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Departure {
    Interrupted,
    /// A `/command` typed mid-game.
    Command(String),
    /// The player asked to return to the menu.
    Leave,
}

/// A mid-game prompt result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Turn {
    /// Trimmed, lowercased answer.
    Answer(String),
    Depart(Departure),
}

/// Prompt for a move and sort the reply into an answer or a departure.
pub(crate) fn ask_move<C: Console>(ctx: &mut SessionContext<C>, prompt: &str) -> Result<Turn> {
    Ok(match ctx.ask(prompt)? {
        Reply::Interrupted => Turn::Depart(Departure::Interrupted),
        Reply::Line(line) => match classify_game_reply(&line) {
            GameReply::Answer(answer) => Turn::Answer(answer),
            GameReply::Leave => Turn::Depart(Departure::Leave),
            GameReply::Command(command) => Turn::Depart(Departure::Command(command)),
        },
    })
}

/// Apply a departure to `state`. Interrupts and commands keep `current_game`
/// so the interpreter can still see which game was running.
pub(crate) fn depart<C: Console>(
    ctx: &mut SessionContext<C>,
    state: &mut SessionState,
    game: GameKind,
    departure: Departure,
) {
    debug!(game = %game, ?departure, "leaving game early");
    match departure {
        Departure::Interrupted => {
            state.action = Action::Interrupt;
            state.interrupted = true;
        }
        Departure::Command(command) => {
            state.action = Action::Command;
            state.user_input = Some(command);
        }
        Departure::Leave => {
            ctx.say("Returning to menu...");
            state.current_game = None;
            state.action = Action::Menu;
        }
    }
}

/// Normal end of a game.
pub(crate) fn finish(state: &mut SessionState) {
    state.current_game = None;
    state.action = Action::Menu;
}
