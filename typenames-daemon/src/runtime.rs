use std::collections::HashSet;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::Instant;

use typenames_sync::SyncError;

use crate::error::{io_err, DaemonError};
use crate::hook::{CycleOutcome, TypeNamesHook, WatchCycle};

/// Quiet period after the last event before a cycle fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// Change set
// ---------------------------------------------------------------------------

/// Paths reported by the file watcher since the previous cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: HashSet<PathBuf>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf) {
        self.paths.insert(path);
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when `dir` itself or one of its direct entries changed.
    pub fn dir_changed(&self, dir: &Path) -> bool {
        self.paths
            .iter()
            .any(|path| path == dir || path.parent() == Some(dir))
    }
}

impl Extend<PathBuf> for ChangeSet {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

// ---------------------------------------------------------------------------
// Cycle dispatch
// ---------------------------------------------------------------------------

/// Result of one hook in one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub watcher: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CycleOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u128,
}

impl CycleReport {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn written_path(&self) -> Option<&Path> {
        match &self.outcome {
            Some(CycleOutcome::Written { path }) => Some(path),
            _ => None,
        }
    }
}

struct HostCycle<'a> {
    changes: &'a ChangeSet,
    outcome: Option<Result<CycleOutcome, SyncError>>,
}

impl WatchCycle for HostCycle<'_> {
    fn dir_changed(&self, dir: &Path) -> bool {
        self.changes.dir_changed(dir)
    }

    fn done(&mut self, outcome: Result<CycleOutcome, SyncError>) {
        if self.outcome.is_some() {
            tracing::warn!("hook signaled completion more than once; keeping the first");
            return;
        }
        self.outcome = Some(outcome);
    }
}

/// Fire every hook once, in order, against the same change set.
pub fn run_cycle(hooks: &mut [TypeNamesHook], changes: &ChangeSet) -> Vec<CycleReport> {
    let mut reports = Vec::with_capacity(hooks.len());
    for hook in hooks.iter_mut() {
        let started = std::time::Instant::now();
        let mut cycle = HostCycle {
            changes,
            outcome: None,
        };
        hook.on_watch_run(&mut cycle);

        let (outcome, error) = match cycle.outcome {
            Some(Ok(outcome)) => (Some(outcome), None),
            Some(Err(err)) => (None, Some(err.to_string())),
            None => (None, Some("hook did not signal completion".to_string())),
        };
        reports.push(CycleReport {
            watcher: hook.label(),
            outcome,
            error,
            duration_ms: started.elapsed().as_millis(),
        });
    }
    reports
}

async fn dispatch_cycle<R>(
    mut hooks: Vec<TypeNamesHook>,
    changes: ChangeSet,
    reporter: &mut R,
) -> Result<Vec<TypeNamesHook>, DaemonError>
where
    R: FnMut(&CycleReport),
{
    let (hooks, reports) = tokio::task::spawn_blocking(move || {
        let reports = run_cycle(&mut hooks, &changes);
        (hooks, reports)
    })
    .await
    .map_err(|err| DaemonError::Join {
        task: "watch cycle",
        message: err.to_string(),
    })?;

    for report in &reports {
        reporter(report);
    }
    Ok(hooks)
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

/// Accumulates events until the stream has been quiet for the window.
#[derive(Debug)]
struct PendingCycle {
    changes: ChangeSet,
    deadline: Option<Instant>,
    window: Duration,
}

impl PendingCycle {
    fn new(window: Duration) -> Self {
        Self {
            changes: ChangeSet::new(),
            deadline: None,
            window,
        }
    }

    fn record(&mut self, paths: impl IntoIterator<Item = PathBuf>, now: Instant) {
        self.changes.extend(paths);
        self.deadline = Some(now + self.window);
    }

    fn is_due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    fn take(&mut self) -> ChangeSet {
        self.deadline = None;
        std::mem::take(&mut self.changes)
    }
}

// ---------------------------------------------------------------------------
// Watch roots
// ---------------------------------------------------------------------------

/// Directories to watch recursively so that every `dirs` entry is covered.
///
/// Normally this is one root: the deepest directory containing `context` and
/// every watch dir. When that directory would be the filesystem root, each
/// watch dir is returned on its own instead. Nested entries are dropped.
pub fn watch_roots<'a>(context: &Path, dirs: impl IntoIterator<Item = &'a Path>) -> Vec<PathBuf> {
    let dirs: Vec<&Path> = dirs.into_iter().collect();

    let mut common = context.to_path_buf();
    for dir in &dirs {
        while !dir.starts_with(&common) {
            if !common.pop() {
                break;
            }
        }
    }
    if common.parent().is_some() {
        return vec![common];
    }

    outermost(dirs.into_iter().map(Path::to_path_buf).collect())
}

/// Sort by depth and drop every path already covered by an earlier one.
fn outermost(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort_by_key(|p| p.components().count());
    let mut kept: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        if !kept.iter().any(|k| path.starts_with(k)) {
            kept.push(path);
        }
    }
    kept
}

/// Map each root to its nearest existing ancestor below the filesystem root,
/// canonicalized. Roots with no such ancestor are skipped.
fn resolve_watch_paths(roots: &[PathBuf]) -> Result<Vec<PathBuf>, DaemonError> {
    let mut resolved = Vec::with_capacity(roots.len());
    for root in roots {
        let existing = root
            .ancestors()
            .filter(|p| p.parent().is_some())
            .find(|p| p.exists());
        let Some(existing) = existing else {
            tracing::warn!(root = %root.display(), "no existing directory to watch; skipping");
            continue;
        };
        // Watcher paths arrive as real paths (e.g. /private/var/... on macOS),
        // so compare against canonical ones.
        resolved.push(fs::canonicalize(existing).map_err(|e| io_err(existing, e))?);
    }
    Ok(outermost(resolved))
}

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

/// Start the watch runtime and block the current thread until Ctrl-C.
pub fn start_blocking<R>(
    context: &Path,
    hooks: Vec<TypeNamesHook>,
    reporter: R,
) -> Result<(), DaemonError>
where
    R: FnMut(&CycleReport),
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(context.to_path_buf(), hooks, reporter, async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received ctrl-c, stopping watcher"),
            Err(err) => {
                tracing::warn!(error = %err, "ctrl-c handler failed; running until killed");
                std::future::pending::<()>().await;
            }
        }
    }))
}

/// Watch the hooks' directories and drive `hooks` until `shutdown` resolves.
///
/// The watched roots come from [`watch_roots`] over `context` and each hook's
/// watch dir. An initial cycle with an empty change set runs before any event
/// is read, so every hook writes its declaration on startup.
pub async fn run<R, S>(
    context: PathBuf,
    hooks: Vec<TypeNamesHook>,
    mut reporter: R,
    shutdown: S,
) -> Result<(), DaemonError>
where
    R: FnMut(&CycleReport),
    S: Future<Output = ()>,
{
    let roots = watch_roots(&context, hooks.iter().map(|h| h.options().watch_dir.as_path()));
    let roots = resolve_watch_paths(&roots)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
    let mut watcher: RecommendedWatcher = recommended_watcher(move |event| {
        let _ = event_tx.send(event);
    })?;
    for root in &roots {
        watcher.watch(root, RecursiveMode::Recursive)?;
        tracing::info!(root = %root.display(), "watching");
    }
    tracing::info!(roots = roots.len(), hooks = hooks.len(), "watch runtime started");

    let mut hooks = dispatch_cycle(hooks, ChangeSet::new(), &mut reporter).await?;
    let mut pending = PendingCycle::new(DEBOUNCE_WINDOW);

    tokio::pin!(shutdown);
    loop {
        let deadline = pending.deadline;
        tokio::select! {
            _ = &mut shutdown => break,
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "watcher event error");
                        continue;
                    }
                };
                if !is_relevant_event_kind(&event.kind) {
                    continue;
                }
                pending.record(event.paths, Instant::now());
            }
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if !pending.is_due(Instant::now()) {
                    continue;
                }
                let changes = pending.take();
                tracing::debug!(paths = changes.len(), "watch cycle");
                hooks = dispatch_cycle(hooks, changes, &mut reporter).await?;
            }
        }
    }

    drop(watcher);
    Ok(())
}

fn is_relevant_event_kind(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Install the global `tracing` subscriber (stderr, `RUST_LOG`, default `info`).
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
