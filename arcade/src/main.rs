use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arcade::context::SessionContext;
use arcade::core::selector::Selection;
use arcade::exit_codes;
use arcade::io::checkpoint_store::CheckpointStore;
use arcade::io::config::{ArcadeConfig, DEFAULT_CONFIG_FILE, load_config, write_config};
use arcade::io::console::StdConsole;
use arcade::io::signals::{self, InterruptFlag};
use arcade::logging;
use arcade::looping::{LoopStop, run_session};
use arcade::start::{ResumeRequest, StartOptions, prepare_session, print_banner};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "arcade",
    version,
    about = "Number and word guessing games with checkpoint and resume"
)]
struct Cli {
    /// Config file (defaults to `arcade.toml` in the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the checkpoint directory from the config.
    #[arg(long, global = true)]
    checkpoint_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive session (default).
    Play {
        /// Resume the newest checkpoint, or the one named (or numbered) here.
        #[arg(long, num_args = 0..=1, value_name = "NAME")]
        resume: Option<Option<String>>,
        /// Start fresh without offering to resume.
        #[arg(long, conflicts_with = "resume")]
        fresh: bool,
    },
    /// List saved checkpoints.
    List,
    /// Print one checkpoint by listing number or name.
    Show { selector: String },
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(()) => std::process::exit(exit_codes::OK),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let checkpoint_dir = cli.checkpoint_dir;
    let settings = || load_settings(&config_path, checkpoint_dir.clone());

    match cli.command.unwrap_or(Command::Play {
        resume: None,
        fresh: false,
    }) {
        Command::Play { resume, fresh } => {
            let request = match (resume, fresh) {
                (Some(None), _) => ResumeRequest::Latest,
                (Some(Some(name)), _) => ResumeRequest::Named(Selection::parse(&name)),
                (None, true) => ResumeRequest::Fresh,
                (None, false) => ResumeRequest::Ask,
            };
            cmd_play(&settings()?, request)
        }
        Command::List => cmd_list(&settings()?),
        Command::Show { selector } => cmd_show(&settings()?, &selector),
        Command::Init { force } => cmd_init(&config_path, force),
    }
}

/// Load the config file and apply command-line overrides.
fn load_settings(path: &Path, checkpoint_dir: Option<PathBuf>) -> Result<ArcadeConfig> {
    let mut config = load_config(path)?;
    if let Some(dir) = checkpoint_dir {
        config.checkpoint_dir = dir;
    }
    config.validate().context("invalid configuration")?;
    debug!(config = ?config, "configuration loaded");
    Ok(config)
}

fn cmd_play(config: &ArcadeConfig, resume: ResumeRequest) -> Result<()> {
    let interrupts = InterruptFlag::new();
    signals::install(interrupts.clone())?;

    let mut ctx = SessionContext::new(StdConsole::new(), interrupts, config);
    print_banner(&mut ctx);
    let options = StartOptions {
        resume,
        offer_resume: config.offer_resume,
    };
    let state = prepare_session(&mut ctx, &options)?;

    let outcome = run_session(&mut ctx, state);
    match &outcome.stop {
        LoopStop::Ended => info!(steps = outcome.steps_executed, "session ended"),
        LoopStop::Failed { error, saved } => {
            info!(steps = outcome.steps_executed, error = %error, saved, "session stopped after error");
        }
    }
    ctx.say("");
    ctx.say("Thanks for playing!");
    Ok(())
}

fn cmd_list(config: &ArcadeConfig) -> Result<()> {
    let store = CheckpointStore::new(&config.checkpoint_dir);
    let entries = store.list()?;
    if entries.is_empty() {
        println!("No saved sessions found.");
        return Ok(());
    }
    for (index, entry) in entries.iter().enumerate() {
        let modified: DateTime<Local> = entry.modified.into();
        println!(
            "{}. {} (modified: {})",
            index + 1,
            entry.name,
            modified.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

fn cmd_show(config: &ArcadeConfig, selector: &str) -> Result<()> {
    let store = CheckpointStore::new(&config.checkpoint_dir);
    let (entry, snapshot) = store.read_named(&Selection::parse(selector))?;
    debug!(path = %entry.path.display(), "showing checkpoint");
    let payload = serde_json::to_string_pretty(&snapshot).context("serialize checkpoint")?;
    println!("{payload}");
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &ArcadeConfig::default())?;
    println!("wrote {}", path.display());
    Ok(())
}
