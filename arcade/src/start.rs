//! Session startup: banner, fresh state, and the optional resume.
//!
//! Every session starts from a fresh state with a new id. When checkpoints
//! exist the player is offered the most recent one; `arcade play --resume`
//! skips the question and resumes straight away.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::command::resume;
use crate::context::{Reply, SessionContext};
use crate::core::selector::Selection;
use crate::core::session::SessionState;
use crate::core::types::Action;
use crate::io::console::Console;

/// How the session should pick up earlier progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResumeRequest {
    /// Ask the player when checkpoints exist (if enabled).
    #[default]
    Ask,
    /// Start fresh without asking.
    Fresh,
    /// Resume the newest checkpoint without asking.
    Latest,
    /// Resume one checkpoint by listing index or name.
    Named(Selection),
}

/// Options for [`prepare_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOptions {
    pub resume: ResumeRequest,
    /// Whether [`ResumeRequest::Ask`] actually asks.
    pub offer_resume: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            resume: ResumeRequest::Ask,
            offer_resume: true,
        }
    }
}

pub fn print_banner<C: Console>(ctx: &mut SessionContext<C>) {
    let rule = "=".repeat(60);
    ctx.say(&rule);
    ctx.say("  Welcome to the Arcade!");
    ctx.say("  Number and word guessing with save, load and resume");
    ctx.say(&rule);
}

/// Build the initial state for a session.
///
/// Fails only when an explicitly named checkpoint cannot be loaded.
pub fn prepare_session<C: Console>(
    ctx: &mut SessionContext<C>,
    options: &StartOptions,
) -> Result<SessionState> {
    let mut state = SessionState::generate();
    debug!(session_id = %state.session_id, resume = ?options.resume, "preparing session");

    match &options.resume {
        ResumeRequest::Fresh => {}
        ResumeRequest::Ask if !options.offer_resume => {}
        ResumeRequest::Ask => offer_resume(ctx, &mut state)?,
        ResumeRequest::Latest => resume(ctx, &mut state),
        ResumeRequest::Named(selection) => {
            let (entry, snapshot) = ctx
                .store
                .read_named(selection)
                .with_context(|| format!("load checkpoint from {}", ctx.store.dir().display()))?;
            state.merge(snapshot);
            info!(checkpoint = %entry.name, session_id = %state.session_id, "session loaded");
            ctx.say(format!("Session loaded from {}.json", entry.name));
        }
    }

    state.action = Action::Menu;
    Ok(state)
}

fn offer_resume<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState) -> Result<()> {
    let count = match ctx.store.list() {
        Ok(entries) => entries.len(),
        Err(err) => {
            ctx.say(format!("Error listing sessions: {err}"));
            return Ok(());
        }
    };
    if count == 0 {
        return Ok(());
    }

    ctx.say("");
    ctx.say(format!("Found {count} saved session(s)."));
    let answer = match ctx.ask("Would you like to resume a previous session? (y/N): ")? {
        Reply::Line(line) => line.trim().to_lowercase(),
        Reply::Interrupted => {
            // Leave the interrupt for the session loop to handle.
            ctx.interrupts.raise();
            return Ok(());
        }
    };
    if answer != "y" {
        return Ok(());
    }

    let fresh_id = state.session_id.clone();
    resume(ctx, state);
    if state.session_id != fresh_id {
        ctx.say("Session resumed successfully!");
    }
    Ok(())
}
