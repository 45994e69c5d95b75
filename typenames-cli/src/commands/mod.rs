//! Subcommands and the watcher-selection flags they share.

pub mod generate;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use typenames_core::{config, ConfigFile, ResolvedOptions, WatchOptions};
use typenames_daemon::{CycleOutcome, CycleReport, TypeNamesHook};

/// Which directories to watch: a config file, or a single watcher from flags.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Config file listing watchers [default: ./typenames.yaml].
    #[arg(long, short = 'c', conflicts_with_all = ["watch_dir", "suffix", "dist_dir", "template"])]
    pub config: Option<PathBuf>,

    /// Directory whose file names make up the union.
    #[arg(long, short = 'w')]
    pub watch_dir: Option<PathBuf>,

    /// File suffix to match, e.g. `.svg`.
    #[arg(long, short = 's')]
    pub suffix: Option<String>,

    /// Where to write the declaration file [default: the watch dir].
    #[arg(long, short = 'd')]
    pub dist_dir: Option<PathBuf>,

    /// Tera template replacing the built-in declaration layout.
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Directory that relative flag paths resolve against [default: cwd].
    #[arg(long, conflicts_with = "config")]
    pub context: Option<PathBuf>,

    /// Emit one JSON report per watcher instead of human-readable lines.
    #[arg(long)]
    pub json: bool,
}

/// Resolved watchers plus the directory their relative paths resolve against.
pub struct Targets {
    pub context: PathBuf,
    pub options: Vec<ResolvedOptions>,
}

impl TargetArgs {
    pub fn resolve(&self) -> Result<Targets> {
        let (context, options) = if self.watch_dir.is_some() || self.suffix.is_some() {
            let context = match &self.context {
                Some(dir) => dir.clone(),
                None => std::env::current_dir().context("could not determine working directory")?,
            };
            let context = context
                .canonicalize()
                .with_context(|| format!("cannot resolve context '{}'", context.display()))?;
            let options = WatchOptions {
                watch_dir: self.watch_dir.clone().unwrap_or_default(),
                dist_dir: self.dist_dir.clone(),
                suffix: self.suffix.clone().unwrap_or_default(),
                template: self.template.clone(),
            }
            .resolve(&context)?;
            (context, vec![options])
        } else {
            let path = self
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE_NAME));
            let options = ConfigFile::load_resolved(&path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?;
            (config::context_dir(&path), options)
        };

        Ok(Targets { context, options })
    }

    pub fn hooks(&self, options: Vec<ResolvedOptions>, dry_run: bool) -> Result<Vec<TypeNamesHook>> {
        options
            .into_iter()
            .map(|o| {
                let label = o.label();
                TypeNamesHook::from_options(o)
                    .map(|hook| hook.with_dry_run(dry_run))
                    .with_context(|| format!("failed to prepare watcher {label}"))
            })
            .collect()
    }
}

/// Print one report line (or JSON object). Failures go to stderr.
pub fn print_report(report: &CycleReport, json: bool) {
    if json {
        match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("failed to encode report: {err}"),
        }
        return;
    }

    if let Some(error) = &report.error {
        eprintln!(
            "{}",
            format!("[typenames] Error in {}: {error}", report.watcher).red()
        );
        return;
    }

    match &report.outcome {
        Some(CycleOutcome::Written { path }) => println!(
            "{}",
            format!("[typenames] Updated declaration file: {}", path.display()).green()
        ),
        Some(CycleOutcome::WouldWrite { path }) => {
            println!("[dry-run] would write: {}", path.display())
        }
        Some(CycleOutcome::Unchanged { path }) => {
            println!("  ·  {} (unchanged)", path.display())
        }
        Some(CycleOutcome::Skipped) | None => {}
    }
}
