//! Logger setup. The TUI owns stdout/stderr, so interactive runs log to a file.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;

pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// Level forced on top of `RUST_LOG`: `-v` always wins, otherwise `RUST_LOG`
/// is left alone when set.
fn level_override(verbose: bool, rust_log: Option<&str>) -> Option<LevelFilter> {
    if verbose {
        return Some(LevelFilter::Debug);
    }
    match rust_log {
        Some(filters) if !filters.trim().is_empty() => None,
        _ => Some(LevelFilter::Info),
    }
}

pub fn init(verbose: bool, target: LogTarget) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    if let Some(level) = level_override(verbose, rust_log.as_deref()) {
        builder.filter_level(level);
    }

    if let LogTarget::File(path) = target {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder
            .target(env_logger::Target::Pipe(Box::new(file)))
            .write_style(env_logger::WriteStyle::Never);
    }

    builder.try_init().context("logger already initialised")?;
    Ok(())
}
