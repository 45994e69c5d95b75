//! typenames core library: watcher options, config file loading, errors.
//!
//! Public API surface:
//! - [`config`]: [`WatchOptions`], [`ResolvedOptions`], [`ConfigFile`]
//! - [`error`]: [`ConfigError`]
//! - [`types`]: [`NameSet`] and [`SuffixName`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigFile, ResolvedOptions, WatchOptions};
pub use error::ConfigError;
pub use types::{NameSet, SuffixName};
