//! Watch-run hook: the bridge between a watch host and a [`Generator`].
//!
//! A host drives hooks through the narrow [`WatchCycle`] interface: the hook
//! asks whether its directory changed during the cycle and reports back
//! exactly once through [`WatchCycle::done`].

use std::path::{Path, PathBuf};

use serde::Serialize;

use typenames_core::ResolvedOptions;
use typenames_sync::{Generator, SyncError, WriteResult};

/// One watch cycle as seen by a hook.
pub trait WatchCycle {
    /// Whether `dir` itself reported a change during this cycle.
    fn dir_changed(&self, dir: &Path) -> bool;

    /// Completion signal. Called exactly once per [`TypeNamesHook::on_watch_run`].
    fn done(&mut self, outcome: Result<CycleOutcome, SyncError>);
}

/// What a hook did during one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Directory untouched and the hook already ran once; nothing scanned.
    Skipped,
    Unchanged { path: PathBuf },
    Written { path: PathBuf },
    WouldWrite { path: PathBuf },
}

impl From<WriteResult> for CycleOutcome {
    fn from(result: WriteResult) -> Self {
        match result {
            WriteResult::Written { path } => CycleOutcome::Written { path },
            WriteResult::Unchanged { path } => CycleOutcome::Unchanged { path },
            WriteResult::WouldWrite { path } => CycleOutcome::WouldWrite { path },
        }
    }
}

/// Regenerates one declaration file when its watched directory changes.
#[derive(Debug)]
pub struct TypeNamesHook {
    generator: Generator,
    executed: bool,
    dry_run: bool,
}

impl TypeNamesHook {
    pub fn new(generator: Generator) -> Self {
        Self {
            generator,
            executed: false,
            dry_run: false,
        }
    }

    pub fn from_options(options: ResolvedOptions) -> Result<Self, SyncError> {
        Ok(Self::new(Generator::from_options(options)?))
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn label(&self) -> String {
        self.generator.options().label()
    }

    pub fn options(&self) -> &ResolvedOptions {
        self.generator.options()
    }

    /// True once this hook has run its pipeline at least once.
    pub fn has_executed(&self) -> bool {
        self.executed
    }

    /// Handle the start of a watch cycle.
    ///
    /// The first call always runs the pipeline; later calls run it only when
    /// the host reports the watch directory as changed.
    pub fn on_watch_run(&mut self, cycle: &mut dyn WatchCycle) {
        let watch_dir = &self.generator.options().watch_dir;
        if !cycle.dir_changed(watch_dir) && self.executed {
            cycle.done(Ok(CycleOutcome::Skipped));
            return;
        }
        self.executed = true;

        match self.generator.run(self.dry_run) {
            Ok(result) => cycle.done(Ok(result.into())),
            Err(err) => {
                tracing::error!(watcher = %self.label(), error = %err, "declaration update failed");
                cycle.done(Err(err));
            }
        }
    }
}
