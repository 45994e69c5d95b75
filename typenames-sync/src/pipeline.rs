//! Scan → diff → render → write, for one watched directory.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use typenames_core::ResolvedOptions;
use typenames_detector::{scan_names, ChangeDetector};
use typenames_renderer::{quote_names, ContentRenderer, RenderFn};

use crate::error::SyncError;
use crate::writer::{ensure_dir, write_declaration, WriteResult};

/// Owns the options, renderer and name cache of one watched directory.
#[derive(Debug)]
pub struct Generator {
    options: ResolvedOptions,
    renderer: ContentRenderer,
    detector: ChangeDetector,
}

impl Generator {
    pub fn new(options: ResolvedOptions, renderer: ContentRenderer) -> Self {
        Self {
            options,
            renderer,
            detector: ChangeDetector::new(),
        }
    }

    /// Built-in layout, or the template named by `options`.
    pub fn from_options(options: ResolvedOptions) -> Result<Self, SyncError> {
        let renderer = ContentRenderer::for_options(&options)?;
        Ok(Self::new(options, renderer))
    }

    /// Render through `render` instead of the configured layout.
    pub fn with_render(mut self, render: RenderFn) -> Self {
        self.renderer = self.renderer.with_render(render);
        self
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    /// Run the pipeline once.
    ///
    /// The name cache only advances after the file is on disk, so a failed
    /// write is retried by the next run. `dry_run` never touches the disk
    /// nor the cache.
    pub fn run(&mut self, dry_run: bool) -> Result<WriteResult, SyncError> {
        let path = self.options.output_file();
        let started = Instant::now();

        let names = scan_names(&self.options.watch_dir, &self.options.suffix);
        let scanned = started.elapsed();
        if !self.detector.has_changed(&names) {
            tracing::debug!(
                "scanned {} names from {} in {:.2?} (unchanged)",
                names.len(),
                self.options.watch_dir.display(),
                scanned
            );
            return Ok(WriteResult::Unchanged { path });
        }
        tracing::info!(
            "scanned {} names from {} in {:.2?}",
            names.len(),
            self.options.watch_dir.display(),
            scanned
        );

        let content = self.render(&quote_names(&names))?;
        tracing::debug!("rendered {} in {:.2?}", path.display(), started.elapsed() - scanned);

        if dry_run {
            tracing::info!("[dry-run] would write: {}", path.display());
            return Ok(WriteResult::WouldWrite { path });
        }

        ensure_dir(&self.options.dist_dir)?;
        write_declaration(&path, &content)?;
        self.detector.accept(&names);

        tracing::info!("wrote: {}", path.display());
        Ok(WriteResult::Written { path })
    }

    fn render(&self, quoted: &[String]) -> Result<String, SyncError> {
        match catch_unwind(AssertUnwindSafe(|| self.renderer.render(quoted))) {
            Ok(rendered) => Ok(rendered?),
            Err(payload) => Err(SyncError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
