//! Core library for tsreadme, which renders the exported API of TypeScript modules into
//! marked sections of a markdown document.
//!
//! The pipeline runs source file → [`oracle`] → [`extract`] (resolve, classify, find docs) →
//! [`render`] → [`splice`]. The high-level [`TsReadme`] API drives a whole pass and is
//! UI-agnostic; the binary is a thin shell over it.

/// Core API for tsreadme operations.
pub mod core_api;

/// Alias resolution, classification and doc lookup for exported bindings.
pub mod extract;

/// Parsed TypeScript sources and the type-rendering and deep-link queries.
pub mod oracle;

/// Markdown rendering of extracted symbols.
pub mod render;

/// Marker discovery and region replacement in markdown documents.
pub mod splice;

pub use crate::core_api::error::TsReadmeError;
pub use crate::core_api::{DEFAULT_SEARCH_PHRASE, ListItem, PassOutcome, Result, TsReadme};
pub use crate::render::Renderer;
