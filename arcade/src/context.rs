//! Collaborators shared by every session handler.

use std::path::PathBuf;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::core::session::SessionState;
use crate::io::checkpoint_store::{CheckpointError, CheckpointStore, checkpoint_stem};
use crate::io::config::{ArcadeConfig, NumberGameConfig};
use crate::io::console::Console;
use crate::io::signals::InterruptFlag;

/// Result of prompting the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Line(String),
    /// An interrupt was pending, arrived during the read, or input ended.
    Interrupted,
}

/// Console, checkpoint store, interrupt flag and game settings for one session.
pub struct SessionContext<C: Console> {
    pub console: C,
    pub store: CheckpointStore,
    pub interrupts: InterruptFlag,
    pub number_game: NumberGameConfig,
    pub rng: StdRng,
}

impl<C: Console> SessionContext<C> {
    pub fn new(console: C, interrupts: InterruptFlag, config: &ArcadeConfig) -> Self {
        let rng = match config.word_game.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            console,
            store: CheckpointStore::new(&config.checkpoint_dir),
            interrupts,
            number_game: config.number_game.clone(),
            rng,
        }
    }

    pub fn say(&mut self, line: impl AsRef<str>) {
        self.console.say(line.as_ref());
    }

    /// Prompt for one line, polling the interrupt flag before and after the
    /// blocking read.
    pub fn ask(&mut self, prompt: &str) -> Result<Reply> {
        if self.interrupts.take() {
            return Ok(Reply::Interrupted);
        }
        let line = self.console.read_line(prompt)?;
        if self.interrupts.take() {
            return Ok(Reply::Interrupted);
        }
        Ok(match line {
            Some(line) => Reply::Line(line),
            None => {
                debug!("end of input");
                Reply::Interrupted
            }
        })
    }

    /// Write `state` as checkpoint `name`, recording the stored stem as the
    /// latest checkpoint. `state` is only updated when the write succeeds.
    pub fn persist(
        &mut self,
        state: &mut SessionState,
        name: &str,
    ) -> Result<PathBuf, CheckpointError> {
        let stem = checkpoint_stem(name)?;
        let mut next = state.clone();
        next.last_checkpoint = Some(stem.clone());
        next.resumable = true;
        let path = self.store.write(&next, &stem)?;
        *state = next;
        Ok(path)
    }

    /// Best-effort progress checkpoint; failures are reported and ignored.
    pub fn create_checkpoint(&mut self, state: &mut SessionState, name: &str) {
        match self.persist(state, name) {
            Ok(path) => debug!(name, path = %path.display(), "checkpoint created"),
            Err(err) => {
                warn!(name, error = %err, "checkpoint failed");
                self.say(format!("Could not create checkpoint '{name}': {err}"));
            }
        }
    }
}
