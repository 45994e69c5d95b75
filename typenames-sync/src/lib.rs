//! # typenames-sync
//!
//! Declaration writer and the scan → diff → render → write pipeline.
//!
//! Build a [`Generator`] per watched directory and call [`Generator::run`]
//! each time the directory may have changed.

pub mod error;
pub mod pipeline;
pub mod writer;

pub use error::SyncError;
pub use pipeline::Generator;
pub use writer::{ensure_dir, write_declaration, WriteResult};
