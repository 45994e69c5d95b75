//! # typenames-renderer
//!
//! Turns a list of base names into declaration file content.
//!
//! ## Usage
//!
//! ```rust
//! use typenames_core::SuffixName;
//! use typenames_renderer::{quote_names, ContentRenderer};
//!
//! let renderer = ContentRenderer::builtin(SuffixName::from_suffix(".ts"));
//! let names = quote_names(&["a".to_string(), "b".to_string()]);
//! let content = renderer.render(&names).unwrap();
//! assert_eq!(content, "export declare type TSNames =\"a\"|\"b\";\n");
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::TemplateContext;
pub use engine::{quote_names, ContentRenderer, RenderFn, RenderStrategy, MULTILINE_THRESHOLD};
pub use error::RenderError;
