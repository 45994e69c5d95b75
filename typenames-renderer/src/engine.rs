//! Declaration rendering: [`ContentRenderer`] and its [`RenderStrategy`].
//!
//! # Built-in layout
//!
//! | Names | Output                                                  |
//! |-------|---------------------------------------------------------|
//! | 0     | `export declare type TSNames =;`                        |
//! | 1–4   | `export declare type TSNames ="a"\|"b";`                |
//! | 5+    | `export declare type TSNames =` then one `\n  \| "a"` per name, then `;` |
//!
//! Every layout ends with `;\n`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tera::Tera;

use typenames_core::{ResolvedOptions, SuffixName};

use crate::context::TemplateContext;
use crate::error::RenderError;

/// Name counts at or above this switch to the one-name-per-line layout.
pub const MULTILINE_THRESHOLD: usize = 5;

const TEMPLATE_NAME: &str = "declaration.d.ts";

/// User-supplied render function. Receives the quoted names.
pub type RenderFn = Arc<dyn Fn(&[String]) -> String + Send + Sync>;

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

/// Wrap each name in literal double quotes.
pub fn quote_names(names: &[String]) -> Vec<String> {
    names.iter().map(|n| format!("\"{n}\"")).collect()
}

// ---------------------------------------------------------------------------
// RenderStrategy
// ---------------------------------------------------------------------------

/// How declaration content is produced.
#[derive(Clone)]
pub enum RenderStrategy {
    /// The fixed union-type layout.
    Builtin,
    /// A caller-provided closure.
    Custom(RenderFn),
    /// A Tera template loaded from the user's config.
    Template(Box<Tera>),
}

impl fmt::Debug for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStrategy::Builtin => f.write_str("Builtin"),
            RenderStrategy::Custom(_) => f.write_str("Custom(..)"),
            RenderStrategy::Template(_) => f.write_str("Template(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentRenderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ContentRenderer {
    suffix_name: SuffixName,
    strategy: RenderStrategy,
}

impl ContentRenderer {
    pub fn builtin(suffix_name: SuffixName) -> Self {
        Self {
            suffix_name,
            strategy: RenderStrategy::Builtin,
        }
    }

    pub fn custom<F>(suffix_name: SuffixName, render: F) -> Self
    where
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        Self {
            suffix_name,
            strategy: RenderStrategy::Custom(Arc::new(render)),
        }
    }

    /// Compile `source` as a Tera template.
    pub fn from_template_str(suffix_name: SuffixName, source: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(Self {
            suffix_name,
            strategy: RenderStrategy::Template(Box::new(tera)),
        })
    }

    pub fn from_template_file(suffix_name: SuffixName, path: &Path) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::from_template_str(suffix_name, &source)
    }

    /// Built-in layout, or the options' template when one is configured.
    pub fn for_options(options: &ResolvedOptions) -> Result<Self, RenderError> {
        match &options.template {
            Some(path) => Self::from_template_file(options.suffix_name.clone(), path),
            None => Ok(Self::builtin(options.suffix_name.clone())),
        }
    }

    /// Replace the strategy with a closure.
    pub fn with_render(mut self, render: RenderFn) -> Self {
        self.strategy = RenderStrategy::Custom(render);
        self
    }

    pub fn suffix_name(&self) -> &SuffixName {
        &self.suffix_name
    }

    pub fn strategy(&self) -> &RenderStrategy {
        &self.strategy
    }

    /// Render already-quoted `names` (see [`quote_names`]).
    pub fn render(&self, names: &[String]) -> Result<String, RenderError> {
        match &self.strategy {
            RenderStrategy::Builtin => Ok(render_builtin(&self.suffix_name.type_name(), names)),
            RenderStrategy::Custom(render) => Ok(render(names)),
            RenderStrategy::Template(tera) => {
                let ctx = TemplateContext::new(&self.suffix_name, names);
                let ctx = tera::Context::from_serialize(&ctx)?;
                Ok(tera.render(TEMPLATE_NAME, &ctx)?)
            }
        }
    }
}

fn render_builtin(type_name: &str, names: &[String]) -> String {
    let union = if names.len() < MULTILINE_THRESHOLD {
        names.join("|")
    } else {
        format!("\n  | {}", names.join("\n  | "))
    };
    format!("export declare type {type_name} ={union};\n")
}
