//! Name detection for `typenames-detector`.
//!
//! [`scan_names`] lists the base names in a watched directory and
//! [`ChangeDetector`] decides whether that list differs from the last one
//! written to disk.

mod change;
mod scan;

pub use change::ChangeDetector;
pub use scan::{base_name, scan_names};
