//! Shared deterministic types for the session core.
//!
//! These types define stable contracts between the state machine, the command
//! interpreter and the games. They carry no I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Control-flow label selecting what the session does next.
///
/// Every handler leaves one of these in [`SessionState::action`]; the driver
/// routes on it. An unset action is `Menu`.
///
/// [`SessionState::action`]: crate::core::session::SessionState::action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Menu,
    NumberGame,
    WordGame,
    Command,
    Interrupt,
    Summary,
    Exit,
    End,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Menu => "menu",
            Action::NumberGame => "number_game",
            Action::WordGame => "word_game",
            Action::Command => "command",
            Action::Interrupt => "interrupt",
            Action::Summary => "summary",
            Action::Exit => "exit",
            Action::End => "end",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two playable games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    NumberGame,
    WordGame,
}

impl GameKind {
    /// Action that starts this game.
    pub fn action(self) -> Action {
        match self {
            GameKind::NumberGame => Action::NumberGame,
            GameKind::WordGame => Action::WordGame,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::NumberGame => "number_game",
            GameKind::WordGame => "word_game",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler slots of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Menu,
    NumberGame,
    WordGame,
    Command,
    Interrupt,
    Summary,
}

impl Node {
    pub fn as_str(self) -> &'static str {
        match self {
            Node::Menu => "menu",
            Node::NumberGame => "number_game",
            Node::WordGame => "word_game",
            Node::Command => "command",
            Node::Interrupt => "interrupt",
            Node::Summary => "summary",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_defaults_to_menu() {
        assert_eq!(Action::default(), Action::Menu);
    }

    #[test]
    fn action_serializes_as_snake_case_label() {
        let json = serde_json::to_string(&Action::NumberGame).expect("serialize");
        assert_eq!(json, "\"number_game\"");
        let parsed: Action = serde_json::from_str("\"word_game\"").expect("parse");
        assert_eq!(parsed, Action::WordGame);
        assert_eq!(Action::Interrupt.to_string(), "interrupt");
    }

    #[test]
    fn game_kind_maps_to_start_action() {
        assert_eq!(GameKind::NumberGame.action(), Action::NumberGame);
        assert_eq!(GameKind::WordGame.action(), Action::WordGame);
    }
}
