use std::fs;
use std::path::Path;

/// Base names of every entry in `dir` whose file name ends with `suffix`.
///
/// Order follows the directory read. A directory that cannot be read is
/// logged and treated as empty; this never fails.
pub fn scan_names(dir: &Path, suffix: &str) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!(dir = %dir.display(), error = %err, "failed to read directory");
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::error!(dir = %dir.display(), error = %err, "failed to read directory");
                return Vec::new();
            }
        };
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if let Some(name) = base_name(file_name, suffix) {
            names.push(name.to_string());
        }
    }
    names
}

/// `file_name` without `suffix`, or `None` when it does not end with it.
///
/// A file named exactly `suffix` keeps its whole name.
pub fn base_name<'a>(file_name: &'a str, suffix: &str) -> Option<&'a str> {
    match file_name.strip_suffix(suffix) {
        Some("") => Some(file_name),
        Some(stem) => Some(stem),
        None => None,
    }
}
