//! Test-only helpers: a scripted console and temp-dir backed contexts.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::context::SessionContext;
use crate::io::checkpoint_store::CheckpointStore;
use crate::io::config::ArcadeConfig;
use crate::io::console::Console;
use crate::io::signals::InterruptFlag;

/// Seed used for the word game's guess in tests.
pub const TEST_SEED: u64 = 7;

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedLine {
    Text(String),
    /// Simulates Ctrl+C while the prompt is waiting.
    Interrupt,
}

impl ScriptedLine {
    pub fn text(line: impl Into<String>) -> Self {
        ScriptedLine::Text(line.into())
    }
}

/// Build text replies from string slices.
pub fn lines(replies: &[&str]) -> Vec<ScriptedLine> {
    replies.iter().map(|line| ScriptedLine::text(*line)).collect()
}

/// Console that replays queued replies and records output and prompts.
///
/// An exhausted queue reads as end of input.
#[derive(Debug)]
pub struct ScriptedConsole {
    replies: VecDeque<ScriptedLine>,
    interrupts: InterruptFlag,
    output: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    /// `interrupts` is raised when a [`ScriptedLine::Interrupt`] is read.
    pub fn new(replies: Vec<ScriptedLine>, interrupts: InterruptFlag) -> Self {
        Self {
            replies: replies.into(),
            interrupts,
            output: Vec::new(),
            prompts: Vec::new(),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Everything printed, one line per entry.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn assert_drained(&self) -> Result<()> {
        if self.replies.is_empty() {
            return Ok(());
        }
        Err(anyhow!(
            "scripted console has {} unread replies: {:?}",
            self.replies.len(),
            self.replies
        ))
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        match self.replies.pop_front() {
            Some(ScriptedLine::Text(line)) => Ok(Some(line)),
            Some(ScriptedLine::Interrupt) => {
                self.interrupts.raise();
                Ok(Some(String::new()))
            }
            None => Ok(None),
        }
    }
}

/// Config pointing at `checkpoint_dir` with a fixed word-game seed.
pub fn test_config(checkpoint_dir: &Path) -> ArcadeConfig {
    let mut config = ArcadeConfig {
        checkpoint_dir: checkpoint_dir.to_path_buf(),
        ..ArcadeConfig::default()
    };
    config.word_game.seed = Some(TEST_SEED);
    config
}

/// Context whose console replays `replies` and shares the context's flag.
pub fn test_context(
    checkpoint_dir: &Path,
    replies: Vec<ScriptedLine>,
) -> SessionContext<ScriptedConsole> {
    let interrupts = InterruptFlag::new();
    let console = ScriptedConsole::new(replies, interrupts.clone());
    SessionContext::new(console, interrupts, &test_config(checkpoint_dir))
}

/// Temporary checkpoint directory for a test.
pub struct TestArcade {
    temp: TempDir,
}

impl TestArcade {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn checkpoint_dir(&self) -> PathBuf {
        self.temp.path().join("checkpoints")
    }

    pub fn store(&self) -> CheckpointStore {
        CheckpointStore::new(self.checkpoint_dir())
    }

    pub fn context(&self, replies: Vec<ScriptedLine>) -> SessionContext<ScriptedConsole> {
        test_context(&self.checkpoint_dir(), replies)
    }

    /// Names of every checkpoint currently on disk.
    pub fn checkpoint_names(&self) -> Result<Vec<String>> {
        Ok(self
            .store()
            .list()?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }
}
