//! Session state and its persisted snapshot.
//!
//! [`SessionState`] is the single record every handler reads and updates.
//! [`SessionSnapshot`] is its on-disk form: every field except `action`, each
//! optional so that older or hand-edited checkpoint files merge cleanly
//! (only keys present in the file overwrite the live state).

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::types::{Action, GameKind};

/// Point-in-time progress recorded by whichever handler last made progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckpointData {
    /// Raw menu input that was being processed.
    MenuChoice { choice: String },
    /// Binary-search bounds after the latest answer.
    NumberGame {
        min_num: u32,
        max_num: u32,
        attempts: u32,
        last_guess: u32,
        last_response: Option<String>,
    },
    /// Word-game question reached and how many answers were recorded.
    WordGame { question: u32, answers: u32 },
}

/// Live session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub session_id: String,
    pub action: Action,
    pub number_games_played: u32,
    pub word_games_played: u32,
    pub number_wins: u32,
    pub word_wins: u32,
    pub current_game: Option<GameKind>,
    pub interrupted: bool,
    pub checkpoint_data: Option<CheckpointData>,
    pub last_checkpoint: Option<String>,
    pub resumable: bool,
    pub user_input: Option<String>,
}

impl SessionState {
    /// Fresh state with zero counters, parked at the menu.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            action: Action::Menu,
            number_games_played: 0,
            word_games_played: 0,
            number_wins: 0,
            word_wins: 0,
            current_game: None,
            interrupted: false,
            checkpoint_data: None,
            last_checkpoint: None,
            resumable: false,
            user_input: None,
        }
    }

    /// Fresh state with a random v4 session id.
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    pub fn games_played(&self) -> u32 {
        self.number_games_played
            .saturating_add(self.word_games_played)
    }

    pub fn total_wins(&self) -> u32 {
        self.number_wins.saturating_add(self.word_wins)
    }

    /// Record the start of `game`: bumps its played counter and sets the action.
    ///
    /// Counters come from checkpoint files too, so they saturate at `u32::MAX`.
    pub fn start_game(&mut self, game: GameKind) {
        let played = match game {
            GameKind::NumberGame => &mut self.number_games_played,
            GameKind::WordGame => &mut self.word_games_played,
        };
        *played = played.saturating_add(1);
        self.action = game.action();
    }

    /// Record a win for `game`.
    pub fn record_win(&mut self, game: GameKind) {
        let wins = match game {
            GameKind::NumberGame => &mut self.number_wins,
            GameKind::WordGame => &mut self.word_wins,
        };
        *wins = wins.saturating_add(1);
    }

    /// Reset counters and progress, keeping only the session id.
    pub fn clear(&mut self) {
        *self = Self::new(std::mem::take(&mut self.session_id));
    }

    /// Overwrite every field present in `snapshot`.
    pub fn merge(&mut self, snapshot: SessionSnapshot) {
        let SessionSnapshot {
            session_id,
            number_games_played,
            word_games_played,
            number_wins,
            word_wins,
            current_game,
            interrupted,
            checkpoint_data,
            last_checkpoint,
            resumable,
            user_input,
            saved_at: _,
        } = snapshot;

        if let Some(value) = session_id {
            self.session_id = value;
        }
        if let Some(value) = number_games_played {
            self.number_games_played = value;
        }
        if let Some(value) = word_games_played {
            self.word_games_played = value;
        }
        if let Some(value) = number_wins {
            self.number_wins = value;
        }
        if let Some(value) = word_wins {
            self.word_wins = value;
        }
        if let Some(value) = current_game {
            self.current_game = value;
        }
        if let Some(value) = interrupted {
            self.interrupted = value;
        }
        if let Some(value) = checkpoint_data {
            self.checkpoint_data = value;
        }
        if let Some(value) = last_checkpoint {
            self.last_checkpoint = value;
        }
        if let Some(value) = resumable {
            self.resumable = value;
        }
        if let Some(value) = user_input {
            self.user_input = value;
        }
    }
}

/// Persisted form of [`SessionState`] (checkpoint file contents).
///
/// Outer `None` means "key absent"; for nullable fields `Some(None)` is an
/// explicit JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_games_played: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_games_played: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_wins: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_wins: Option<u32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub current_game: Option<Option<GameKind>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub checkpoint_data: Option<Option<CheckpointData>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub last_checkpoint: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resumable: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub user_input: Option<Option<String>>,
    /// RFC 3339 timestamp of the write. Informational only; never merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl SessionSnapshot {
    /// Capture every persisted field of `state`.
    pub fn capture(state: &SessionState, saved_at: Option<String>) -> Self {
        Self {
            session_id: Some(state.session_id.clone()),
            number_games_played: Some(state.number_games_played),
            word_games_played: Some(state.word_games_played),
            number_wins: Some(state.number_wins),
            word_wins: Some(state.word_wins),
            current_game: Some(state.current_game),
            interrupted: Some(state.interrupted),
            checkpoint_data: Some(state.checkpoint_data.clone()),
            last_checkpoint: Some(state.last_checkpoint.clone()),
            resumable: Some(state.resumable),
            user_input: Some(state.user_input.clone()),
            saved_at,
        }
    }
}

/// Deserialize a key that is present (possibly `null`) as `Some(..)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
