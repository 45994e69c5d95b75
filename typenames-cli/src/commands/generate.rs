//! `typenames generate`: one scan, one write per out-of-date watcher.

use anyhow::{bail, Result};
use clap::Args;

use typenames_daemon::{run_cycle, ChangeSet};

use super::{print_report, TargetArgs};

/// Arguments for `typenames generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let targets = self.target.resolve()?;
        let mut hooks = self.target.hooks(targets.options, self.dry_run)?;

        let reports = run_cycle(&mut hooks, &ChangeSet::new());
        for report in &reports {
            print_report(report, self.target.json);
        }

        let failed = reports.iter().filter(|r| r.is_failure()).count();
        if failed > 0 {
            bail!("{failed} of {} watcher(s) failed", reports.len());
        }
        Ok(())
    }
}
