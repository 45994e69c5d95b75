//! `typenames watch`: regenerate declarations as the watched folders change.

use anyhow::{Context, Result};
use clap::Args;

use typenames_daemon::start_blocking;

use super::{print_report, TargetArgs};

/// Arguments for `typenames watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

impl WatchArgs {
    pub fn run(self) -> Result<()> {
        let targets = self.target.resolve()?;
        let hooks = self.target.hooks(targets.options, false)?;
        let json = self.target.json;

        start_blocking(&targets.context, hooks, |report| print_report(report, json))
            .context("watcher exited with error")?;
        Ok(())
    }
}
