//! Transition table for the session state machine.

use crate::core::types::{Action, Node};

/// Node that should run after `from` left `action` in the state.
///
/// Returns `None` once the session reached [`Action::End`].
pub fn route(from: Node, action: Action) -> Option<Node> {
    if action == Action::End {
        return None;
    }
    let next = match from {
        Node::Menu => match action {
            Action::Exit => Node::Summary,
            Action::NumberGame => Node::NumberGame,
            Action::WordGame => Node::WordGame,
            Action::Command => Node::Command,
            Action::Interrupt => Node::Interrupt,
            _ => Node::Menu,
        },
        Node::NumberGame | Node::WordGame => match action {
            Action::Interrupt => Node::Interrupt,
            Action::Command => Node::Command,
            Action::Exit => Node::Summary,
            _ => Node::Menu,
        },
        Node::Command => match action {
            Action::Exit | Action::Summary => Node::Summary,
            Action::NumberGame => Node::NumberGame,
            Action::WordGame => Node::WordGame,
            _ => Node::Menu,
        },
        Node::Interrupt => match action {
            Action::Exit => Node::Summary,
            Action::Command => Node::Command,
            _ => Node::Menu,
        },
        // Summary always finishes with `End`; anything else is re-summarised.
        Node::Summary => Node::Summary,
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_NODES: [Node; 6] = [
        Node::Menu,
        Node::NumberGame,
        Node::WordGame,
        Node::Command,
        Node::Interrupt,
        Node::Summary,
    ];

    #[test]
    fn end_terminates_from_every_node() {
        for node in ALL_NODES {
            assert_eq!(route(node, Action::End), None, "from {node}");
        }
    }

    #[test]
    fn menu_routes_each_choice() {
        assert_eq!(route(Node::Menu, Action::Exit), Some(Node::Summary));
        assert_eq!(route(Node::Menu, Action::NumberGame), Some(Node::NumberGame));
        assert_eq!(route(Node::Menu, Action::WordGame), Some(Node::WordGame));
        assert_eq!(route(Node::Menu, Action::Command), Some(Node::Command));
        assert_eq!(route(Node::Menu, Action::Interrupt), Some(Node::Interrupt));
        assert_eq!(route(Node::Menu, Action::Menu), Some(Node::Menu));
    }

    #[test]
    fn games_short_circuit_on_interrupt_and_command() {
        for game in [Node::NumberGame, Node::WordGame] {
            assert_eq!(route(game, Action::Menu), Some(Node::Menu));
            assert_eq!(route(game, Action::Interrupt), Some(Node::Interrupt));
            assert_eq!(route(game, Action::Command), Some(Node::Command));
        }
    }

    #[test]
    fn command_never_loops_back_to_itself() {
        assert_eq!(route(Node::Command, Action::Command), Some(Node::Menu));
        assert_eq!(route(Node::Command, Action::Exit), Some(Node::Summary));
        assert_eq!(
            route(Node::Command, Action::NumberGame),
            Some(Node::NumberGame)
        );
        assert_eq!(route(Node::Command, Action::Interrupt), Some(Node::Menu));
    }

    #[test]
    fn interrupt_routes_to_summary_command_or_menu() {
        assert_eq!(route(Node::Interrupt, Action::Exit), Some(Node::Summary));
        assert_eq!(route(Node::Interrupt, Action::Command), Some(Node::Command));
        assert_eq!(route(Node::Interrupt, Action::Menu), Some(Node::Menu));
    }
}
