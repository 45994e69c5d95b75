//! Watch host for typenames: the [`WatchCycle`] hook interface plus a
//! `notify`-backed runtime that groups file events into serialized cycles.

mod error;
pub mod hook;
mod runtime;

pub use error::DaemonError;
pub use hook::{CycleOutcome, TypeNamesHook, WatchCycle};
pub use runtime::{
    init_tracing, run, run_cycle, start_blocking, watch_roots, ChangeSet, CycleReport,
    DEBOUNCE_WINDOW,
};
