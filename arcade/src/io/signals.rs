//! Interrupt flag and the signal listener that raises it.
//!
//! SIGINT and SIGTERM never terminate the process directly. A background
//! listener thread turns each signal into a raised [`InterruptFlag`]; the
//! session loop and every prompt poll the flag and route to the interrupt
//! flow, which offers to save before exiting.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Shared "an interrupt is pending" flag.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag, returning whether it was raised.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Install SIGINT/SIGTERM handling that raises `flag`.
///
/// Signal registration happens before this returns, so a signal arriving
/// right after startup is never lost to the default handler.
pub fn install(flag: InterruptFlag) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()
        .context("build signal runtime")?;

    #[cfg(unix)]
    let mut streams = {
        use tokio::signal::unix::{SignalKind, signal};
        let _guard = runtime.enter();
        let interrupt = signal(SignalKind::interrupt()).context("register SIGINT handler")?;
        let terminate = signal(SignalKind::terminate()).context("register SIGTERM handler")?;
        (interrupt, terminate)
    };

    thread::Builder::new()
        .name("signal-listener".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                loop {
                    #[cfg(unix)]
                    let name = {
                        let (interrupt, terminate) = &mut streams;
                        tokio::select! {
                            received = interrupt.recv() => received.map(|()| "SIGINT"),
                            received = terminate.recv() => received.map(|()| "SIGTERM"),
                        }
                    };
                    #[cfg(not(unix))]
                    let name = tokio::signal::ctrl_c().await.ok().map(|()| "ctrl-c");

                    let Some(name) = name else {
                        debug!("signal stream closed");
                        break;
                    };
                    flag.raise();
                    warn!(signal = name, "interrupt received; finishing the current prompt");
                }
            });
        })
        .context("spawn signal listener")?;

    Ok(())
}
