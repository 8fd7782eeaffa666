//! Logger setup.
//!
//! The game owns the terminal, so records must not land on the screen
//! unless asked for: they go to the file named by `SHOOTING_GALLERY_LOG`,
//! or to stderr when `RUST_LOG` is set, and nowhere otherwise.

use std::fs::File;

use anyhow::Context;
use env_logger::{Builder, Env, Target};

/// Environment variable naming the log file
pub const LOG_FILE_ENV: &str = "SHOOTING_GALLERY_LOG";

pub fn init() -> anyhow::Result<()> {
    let path = std::env::var_os(LOG_FILE_ENV);
    let default_filter = if path.is_some() { "info" } else { "off" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    if let Some(path) = path {
        let file = File::create(&path)
            .with_context(|| format!("failed to create log file {:?}", path))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .context("failed to install the logger")?;
    log::info!("Shooting gallery starting...");
    Ok(())
}
