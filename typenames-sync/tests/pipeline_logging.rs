//! Scan timing lines emitted by `Generator::run`, captured through the `log`
//! facade the sync crate logs with.

use std::fs;
use std::sync::Mutex;

use tempfile::TempDir;
use tracing::{Level, LevelFilter, Log, Metadata, Record};
use typenames_core::WatchOptions;
use typenames_sync::{Generator, WriteResult};

struct Capture {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    lines: Mutex::new(Vec::new()),
};

fn scan_lines(dir: &str) -> Vec<(Level, String)> {
    CAPTURE
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, line)| line.starts_with("scanned") && line.contains(dir))
        .cloned()
        .collect()
}

#[test]
fn scan_timing_is_logged_on_changed_and_unchanged_runs() {
    tracing::set_logger(&CAPTURE).expect("install capture logger");
    tracing::set_max_level(LevelFilter::Debug);

    let root = TempDir::new().unwrap();
    let src = root.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a.ts"), "").unwrap();

    let options = WatchOptions::new("src", ".ts")
        .with_dist_dir("types")
        .resolve(root.path())
        .unwrap();
    let mut pipeline = Generator::from_options(options).unwrap();
    let dir = src.display().to_string();

    assert!(matches!(pipeline.run(false).unwrap(), WriteResult::Written { .. }));
    let first = scan_lines(&dir);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].0, Level::Info);
    assert!(first[0].1.starts_with("scanned 1 names from"));

    assert!(matches!(pipeline.run(false).unwrap(), WriteResult::Unchanged { .. }));
    let both = scan_lines(&dir);
    assert_eq!(both.len(), 2, "unchanged run must still log its scan timing");
    assert_eq!(both[1].0, Level::Debug);
    assert!(both[1].1.ends_with("(unchanged)"));
}
