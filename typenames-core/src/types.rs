//! Domain types shared by the detector, renderer and writer.

use std::collections::HashSet;
use std::fmt;

/// The set of accepted base names for one watched directory.
pub type NameSet = HashSet<String>;

/// A suffix with its first `.` removed, e.g. `".ts"` → `"ts"`.
///
/// Drives both the declared type name (`TSNames`) and the output file name
/// (`ts.d.ts`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuffixName(pub String);

impl SuffixName {
    pub fn from_suffix(suffix: &str) -> Self {
        Self(suffix.replacen('.', "", 1))
    }

    /// `{SUFFIX}Names`, the name of the generated union type.
    pub fn type_name(&self) -> String {
        format!("{}Names", self.0.to_uppercase())
    }

    /// `{suffix}.d.ts`, the fixed output file name.
    pub fn file_name(&self) -> String {
        format!("{}.d.ts", self.0.to_lowercase())
    }
}

impl fmt::Display for SuffixName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
