//! One dispatch of the session state machine.

use anyhow::Result;
use tracing::debug;

use crate::command::interpret;
use crate::context::SessionContext;
use crate::core::session::SessionState;
use crate::core::transition::route;
use crate::core::types::{Action, GameKind, Node};
use crate::games::{play_number_game, play_word_game};
use crate::io::console::Console;
use crate::menu::{display_menu, handle_interrupt, show_summary};

/// Run the handler for `node`, then pick the next node from the resulting
/// action. `None` means the session is over.
pub fn run_step<C: Console>(
    ctx: &mut SessionContext<C>,
    state: &mut SessionState,
    node: Node,
) -> Result<Option<Node>> {
    match node {
        Node::Menu => display_menu(ctx, state)?,
        Node::NumberGame => {
            enter_game(ctx, state, GameKind::NumberGame);
            play_number_game(ctx, state)?;
        }
        Node::WordGame => {
            enter_game(ctx, state, GameKind::WordGame);
            play_word_game(ctx, state)?;
        }
        Node::Command => interpret(ctx, state)?,
        Node::Interrupt => handle_interrupt(ctx, state)?,
        Node::Summary => show_summary(ctx, state)?,
    }

    let next = route(node, state.action);
    debug!(from = %node, action = %state.action, next = ?next, "transition");
    Ok(next)
}

/// Entry node for a session whose state carries `action`.
pub fn entry_node(action: Action) -> Node {
    route(Node::Menu, action).unwrap_or(Node::Menu)
}

fn enter_game<C: Console>(ctx: &mut SessionContext<C>, state: &mut SessionState, game: GameKind) {
    state.current_game = Some(game);
    ctx.create_checkpoint(state, &format!("before_{game}"));
}
