//! Command interpreter.
//!
//! Classifies `state.user_input` and runs the matching handler. Handlers
//! report problems on the console and leave the session running; only
//! console failures propagate as errors.

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::context::{Reply, SessionContext};
use crate::core::classifier::{Classified, CommandName, GameChoice, classify};
use crate::core::selector::Selection;
use crate::core::session::SessionState;
use crate::core::types::Action;
use crate::io::checkpoint_store::{CheckpointError, CheckpointStore};
use crate::io::console::Console;

/// Interpret the pending `user_input` and update `state` accordingly.
pub fn interpret<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) -> Result<()> {
    let input = state.user_input.clone().unwrap_or_default();
    let classified = classify(&input);
    debug!(input = %input, ?classified, "interpreting input");

    match classified {
        Classified::Command(command) => run_command(ctx, state, command)?,
        Classified::UnknownCommand(name) => {
            ctx.say(format!(
                "Unknown command: {name}. Type 'help' for available commands."
            ));
        }
        Classified::Interrupt => interrupt_flow(ctx, state)?,
        Classified::Game(GameChoice::Exit) => state.action = Action::Exit,
        Classified::Game(GameChoice::Start(game)) => state.start_game(game),
        Classified::Unexpected(text) => {
            ctx.say(format!(
                "Unexpected input: '{text}'. Type 'help' for commands or choose 1/2 for games."
            ));
            state.action = Action::Menu;
        }
    }
    Ok(())
}

fn run_command<C: Console>(
    ctx: &mut SessionContext<C>,
    state: &mut SessionState,
    command: CommandName,
) -> Result<()> {
    match command {
        CommandName::Resume => resume(ctx, state),
        CommandName::Switch => switch(ctx, state),
        CommandName::Pause => {
            save(ctx, state, &CheckpointStore::auto_name(state));
            state.action = Action::Menu;
        }
        CommandName::Exit => return interrupt_flow(ctx, state),
        CommandName::Help => help(ctx, state),
        CommandName::Status => status(ctx, state),
        CommandName::Clear => return clear(ctx, state),
        CommandName::Save => return save_named(ctx, state),
        CommandName::Load => return load(ctx, state),
        CommandName::List => list(ctx, state),
    }
    Ok(())
}

/// Offer save-and-exit, exit, or continue.
///
/// An interrupt or end of input at this prompt saves and exits.
fn interrupt_flow<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) -> Result<()> {
    ctx.say("");
    ctx.say("Session interrupted. Would you like to:");
    ctx.say("1. Save and exit");
    ctx.say("2. Exit without saving");
    ctx.say("3. Continue playing");

    let choice = match ctx.ask("Choose (1-3): ")? {
        Reply::Line(line) => line.trim().to_string(),
        Reply::Interrupted => "1".to_string(),
    };

    match choice.as_str() {
        "1" => {
            save(ctx, state, &CheckpointStore::auto_name(state));
            state.action = Action::Exit;
            state.interrupted = true;
        }
        "2" => {
            info!(session_id = %state.session_id, "exiting without saving");
            state.action = Action::Exit;
            state.interrupted = true;
        }
        _ => state.action = Action::Menu,
    }
    Ok(())
}

/// Merge the newest checkpoint into `state`.
pub fn resume<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) {
    match ctx.store.read_latest() {
        Ok((entry, snapshot)) => {
            state.merge(snapshot);
            state.action = Action::Menu;
            info!(checkpoint = %entry.name, session_id = %state.session_id, "session resumed");
            ctx.say(format!("Session resumed from {}.json", entry.name));
        }
        Err(CheckpointError::NotFound { .. }) => ctx.say("No saved sessions found."),
        Err(err) => {
            warn!(error = %err, "resume failed");
            ctx.say(format!("Failed to resume session: {err}"));
        }
    }
}

fn switch<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) {
    match state.current_game.take() {
        Some(game) => ctx.say(format!("Currently in {game}. Switching to menu...")),
        None => ctx.say("Not currently in a game. Returning to menu..."),
    }
    state.action = Action::Menu;
}

/// Write `state` under `name`, reporting the outcome on the console.
fn save<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState, name: &str) {
    match ctx.persist(state, name) {
        Ok(path) => {
            info!(path = %path.display(), "session saved");
            let file = path
                .file_name()
                .map(|file| file.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.to_string());
            ctx.say(format!("Session saved as {file}"));
        }
        Err(err) => {
            warn!(name, error = %err, "save failed");
            ctx.say(format!("Failed to save session: {err}"));
        }
    }
}

fn save_named<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) -> Result<()> {
    let name = match ctx.ask("Enter save name (or press Enter for auto-name): ")? {
        Reply::Line(line) => line.trim().to_string(),
        Reply::Interrupted => {
            cancel(ctx, "Save");
            return Ok(());
        }
    };
    let name = if name.is_empty() {
        CheckpointStore::auto_name(state)
    } else {
        name
    };
    save(ctx, state, &name);
    state.action = Action::Menu;
    Ok(())
}

fn load<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) -> Result<()> {
    let entries = match ctx.store.list() {
        Ok(entries) => entries,
        Err(err) => {
            ctx.say(format!("Failed to load session: {err}"));
            return Ok(());
        }
    };
    if entries.is_empty() {
        ctx.say("No saved sessions found.");
        return Ok(());
    }

    ctx.say("Available sessions:");
    for (index, entry) in entries.iter().enumerate() {
        ctx.say(format!("{}. {}.json", index + 1, entry.name));
    }

    let raw = match ctx.ask("Enter session number to load: ")? {
        Reply::Line(line) => line,
        Reply::Interrupted => {
            cancel(ctx, "Load");
            return Ok(());
        }
    };
    let selection = Selection::parse(&raw);
    if !matches!(selection, Selection::Index(_)) {
        ctx.say("Invalid input.");
        return Ok(());
    }

    match ctx.store.read_named(&selection) {
        Ok((entry, snapshot)) => {
            state.merge(snapshot);
            state.action = Action::Menu;
            info!(checkpoint = %entry.name, "session loaded");
            ctx.say(format!("Session loaded from {}.json", entry.name));
        }
        Err(CheckpointError::UnknownSelection(_)) => ctx.say("Invalid session number."),
        Err(err) => {
            warn!(error = %err, "load failed");
            ctx.say(format!("Failed to load session: {err}"));
        }
    }
    Ok(())
}

fn list<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) {
    match ctx.store.list() {
        Ok(entries) if entries.is_empty() => ctx.say("No saved sessions found."),
        Ok(entries) => {
            ctx.say("Saved sessions:");
            for entry in &entries {
                let modified: DateTime<Local> = entry.modified.into();
                ctx.say(format!(
                    "  - {}.json (modified: {})",
                    entry.name,
                    modified.format("%Y-%m-%d %H:%M:%S")
                ));
            }
        }
        Err(err) => ctx.say(format!("Error listing sessions: {err}")),
    }
    state.action = Action::Menu;
}

fn help<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) {
    ctx.say("");
    ctx.say("Available commands:");
    for command in CommandName::ALL {
        ctx.say(format!("  /{} - {}", command.as_str(), command.description()));
    }
    ctx.say("");
    ctx.say("You can also use standard game choices:");
    ctx.say("  1 - Number Game");
    ctx.say("  2 - Word Game");
    ctx.say("  (blank) - Exit");
    state.action = Action::Menu;
}

fn status<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) {
    ctx.say("");
    ctx.say("Current Session Status:");
    ctx.say(format!("Session ID: {}", state.session_id));
    ctx.say(format!("Number Games Played: {}", state.number_games_played));
    ctx.say(format!("Word Games Played: {}", state.word_games_played));
    ctx.say(format!("Number Game Wins: {}", state.number_wins));
    ctx.say(format!("Word Game Wins: {}", state.word_wins));
    if let Some(game) = state.current_game {
        ctx.say(format!("Current Game: {game}"));
    }
    ctx.say(format!("Current Action: {}", state.action));
    ctx.say(format!(
        "Last Checkpoint: {}",
        state.last_checkpoint.as_deref().unwrap_or("none")
    ));
    state.action = Action::Menu;
}

fn clear<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) -> Result<()> {
    let confirm = match ctx.ask("Are you sure you want to clear the current session? (y/N): ")? {
        Reply::Line(line) => line.trim().to_lowercase(),
        Reply::Interrupted => {
            cancel(ctx, "Clear");
            return Ok(());
        }
    };
    if confirm == "y" {
        state.clear();
        info!(session_id = %state.session_id, "session cleared");
        ctx.say("Session cleared.");
    } else {
        ctx.say("Clear cancelled.");
        state.action = Action::Menu;
    }
    Ok(())
}

/// Abandon a sub-prompt and leave the interrupt pending for the session loop.
fn cancel<C: Console>(ctx: &mut SessionContext<C>, what: &str) {
    ctx.say(format!("{what} cancelled."));
    ctx.interrupts.raise();
}
