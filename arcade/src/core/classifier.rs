//! Deterministic classification of free-form console input.

use crate::core::types::GameKind;

/// Prefix that marks structured commands (`/help`, `/save`, ...).
pub const COMMAND_PREFIX: char = '/';

/// Keywords that request the interrupt flow.
pub const INTERRUPT_KEYWORDS: [&str; 5] = ["quit", "q", "stop", "interrupt", "ctrl+c"];

/// Keywords that abandon a running game and return to the menu.
const LEAVE_GAME_KEYWORDS: [&str; 3] = ["quit", "q", "exit"];

/// Commands understood by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    Resume,
    Switch,
    Pause,
    Exit,
    Help,
    Status,
    Clear,
    Save,
    Load,
    List,
}

impl CommandName {
    /// Help order.
    pub const ALL: [CommandName; 10] = [
        CommandName::Resume,
        CommandName::Switch,
        CommandName::Pause,
        CommandName::Exit,
        CommandName::Help,
        CommandName::Status,
        CommandName::Clear,
        CommandName::Save,
        CommandName::Load,
        CommandName::List,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Resume => "resume",
            CommandName::Switch => "switch",
            CommandName::Pause => "pause",
            CommandName::Exit => "exit",
            CommandName::Help => "help",
            CommandName::Status => "status",
            CommandName::Clear => "clear",
            CommandName::Save => "save",
            CommandName::Load => "load",
            CommandName::List => "list",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandName::Resume => "Resume a previous game session",
            CommandName::Switch => "Switch between different game types",
            CommandName::Pause => "Pause current session and save state",
            CommandName::Exit => "Exit the current game",
            CommandName::Help => "Show available commands",
            CommandName::Status => "Show current session status",
            CommandName::Clear => "Clear current session",
            CommandName::Save => "Save current session with custom name",
            CommandName::Load => "Load a saved session",
            CommandName::List => "List all saved sessions",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.as_str() == name)
    }
}

/// Menu-style selection shared by the menu and the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChoice {
    Exit,
    Start(GameKind),
}

/// Interpreter classification of one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Command(CommandName),
    UnknownCommand(String),
    Interrupt,
    Game(GameChoice),
    Unexpected(String),
}

/// Classify `input` for the command interpreter. First match wins:
/// commands, interrupt keywords, game shortcuts, then anything else.
pub fn classify(input: &str) -> Classified {
    let clean = input.trim().to_lowercase();

    if clean.starts_with(COMMAND_PREFIX) || CommandName::parse(&clean).is_some() {
        let name = clean.trim_start_matches(COMMAND_PREFIX);
        return match CommandName::parse(name) {
            Some(cmd) => Classified::Command(cmd),
            None => Classified::UnknownCommand(name.to_string()),
        };
    }

    if INTERRUPT_KEYWORDS.contains(&clean.as_str()) {
        return Classified::Interrupt;
    }

    if let Some(choice) = game_choice(&clean) {
        return Classified::Game(choice);
    }

    Classified::Unexpected(input.to_string())
}

/// What the menu should do with a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSelection {
    Choice(GameChoice),
    /// Hand the text to the command interpreter.
    Command,
    Invalid,
}

/// Classify a menu reply. Anything the interpreter treats as a command or
/// interrupt keyword is routed to it; `1`, `2` and blank are direct choices.
pub fn classify_menu(input: &str) -> MenuSelection {
    let clean = input.trim();
    if let Some(choice) = game_choice(clean) {
        return MenuSelection::Choice(choice);
    }
    match classify(clean) {
        Classified::Command(_) | Classified::UnknownCommand(_) | Classified::Interrupt => {
            MenuSelection::Command
        }
        Classified::Game(choice) => MenuSelection::Choice(choice),
        Classified::Unexpected(_) => MenuSelection::Invalid,
    }
}

/// Mid-game reply classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameReply {
    /// A move for the game (trimmed, lowercased).
    Answer(String),
    /// Abandon the game and return to the menu.
    Leave,
    /// Structured command; carries the raw text for the interpreter.
    Command(String),
}

pub fn classify_game_reply(input: &str) -> GameReply {
    let trimmed = input.trim();
    if trimmed.starts_with(COMMAND_PREFIX) {
        return GameReply::Command(trimmed.to_string());
    }
    let clean = trimmed.to_lowercase();
    if LEAVE_GAME_KEYWORDS.contains(&clean.as_str()) {
        return GameReply::Leave;
    }
    GameReply::Answer(clean)
}

fn game_choice(clean: &str) -> Option<GameChoice> {
    match clean {
        "" => Some(GameChoice::Exit),
        "1" => Some(GameChoice::Start(GameKind::NumberGame)),
        "2" => Some(GameChoice::Start(GameKind::WordGame)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_and_bare_keywords_are_commands() {
        assert_eq!(classify("/help"), Classified::Command(CommandName::Help));
        assert_eq!(classify("  STATUS "), Classified::Command(CommandName::Status));
        assert_eq!(classify("//save"), Classified::Command(CommandName::Save));
        assert_eq!(classify("exit"), Classified::Command(CommandName::Exit));
    }

    #[test]
    fn unknown_prefixed_command_is_reported_by_name() {
        assert_eq!(
            classify("/foo"),
            Classified::UnknownCommand("foo".to_string())
        );
    }

    #[test]
    fn interrupt_keywords_match_case_insensitively() {
        for word in ["quit", "Q", "stop", "INTERRUPT", "ctrl+c"] {
            assert_eq!(classify(word), Classified::Interrupt, "{word}");
        }
    }

    #[test]
    fn game_shortcuts() {
        assert_eq!(classify(""), Classified::Game(GameChoice::Exit));
        assert_eq!(
            classify("1"),
            Classified::Game(GameChoice::Start(GameKind::NumberGame))
        );
        assert_eq!(
            classify(" 2 "),
            Classified::Game(GameChoice::Start(GameKind::WordGame))
        );
    }

    #[test]
    fn anything_else_is_unexpected_with_raw_text() {
        assert_eq!(
            classify("Hello there"),
            Classified::Unexpected("Hello there".to_string())
        );
        assert_eq!(classify("3"), Classified::Unexpected("3".to_string()));
    }

    #[test]
    fn menu_routes_commands_and_interrupts_to_interpreter() {
        assert_eq!(classify_menu("/help"), MenuSelection::Command);
        assert_eq!(classify_menu("/nope"), MenuSelection::Command);
        assert_eq!(classify_menu("list"), MenuSelection::Command);
        assert_eq!(classify_menu("quit"), MenuSelection::Command);
        assert_eq!(
            classify_menu("1"),
            MenuSelection::Choice(GameChoice::Start(GameKind::NumberGame))
        );
        assert_eq!(classify_menu(""), MenuSelection::Choice(GameChoice::Exit));
        assert_eq!(classify_menu("banana"), MenuSelection::Invalid);
    }

    #[test]
    fn game_replies() {
        assert_eq!(
            classify_game_reply(" Higher "),
            GameReply::Answer("higher".to_string())
        );
        assert_eq!(classify_game_reply("q"), GameReply::Leave);
        assert_eq!(classify_game_reply("EXIT"), GameReply::Leave);
        assert_eq!(
            classify_game_reply("/status"),
            GameReply::Command("/status".to_string())
        );
    }
}
