//! Renderers
//!
//! Output formats plug into the orchestrator through the [`Renderer`]
//! trait: a transform function, the artifact file extension, and a flag
//! telling the orchestrator whether generic type parameters must be
//! substituted first. This crate ships the JSON Schema renderer; the
//! Markdown renderer lives in a sibling crate and implements the same
//! trait.

pub mod document;
pub mod node;
pub mod statement;

use crate::ast::{Doc, SourceFile};
use crate::diagnostics::Diagnostics;
use crate::dialect::RenderOptions;
use crate::error::Result;

/// Environment tag this renderer passes to the ignore predicate
pub const JSON_SCHEMA_ENVIRONMENT: &str = "json-schema";

/// Decides whether a statement is excluded from an output environment
pub trait IgnorePredicate: Send + Sync {
    fn is_ignored(&self, doc: Option<&Doc>, environment: &str) -> bool;
}

/// Default predicate: honors the `@ignore` doc tag's environment list
#[derive(Debug, Clone, Copy, Default)]
pub struct DocIgnore;

impl IgnorePredicate for DocIgnore {
    fn is_ignored(&self, doc: Option<&Doc>, environment: &str) -> bool {
        doc.map_or(false, |d| d.tags.ignore.iter().any(|e| e == environment))
    }
}

static DOC_IGNORE: DocIgnore = DocIgnore;

/// Per-file context supplied by the orchestrator
pub struct RenderContext<'a> {
    /// The source file's path relative to the project root, forward
    /// slashes (drives `$id` and cross-file `$ref`s)
    pub relative_path: &'a str,
    /// Statement exclusion predicate
    pub ignore: &'a dyn IgnorePredicate,
}

impl<'a> RenderContext<'a> {
    pub fn new(relative_path: &'a str) -> Self {
        Self {
            relative_path,
            ignore: &DOC_IGNORE,
        }
    }

    pub fn with_ignore(mut self, ignore: &'a dyn IgnorePredicate) -> Self {
        self.ignore = ignore;
        self
    }
}

/// Rendered text plus the warnings produced while building it
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub text: String,
    pub diagnostics: Diagnostics,
}

/// An output-format renderer
pub trait Renderer {
    /// Render one parsed file to output text
    fn transform(&self, file: &SourceFile, context: &RenderContext<'_>) -> Result<RenderOutput>;

    /// Extension of emitted artifacts, without the leading dot
    fn file_extension(&self) -> &'static str;

    /// Whether generic type parameters must be fully substituted before
    /// this renderer runs
    fn resolve_type_parameters(&self) -> bool;
}

/// The JSON Schema renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaRenderer {
    pub options: RenderOptions,
}

impl JsonSchemaRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for JsonSchemaRenderer {
    fn transform(&self, file: &SourceFile, context: &RenderContext<'_>) -> Result<RenderOutput> {
        document::render_document(file, context, &self.options)
    }

    fn file_extension(&self) -> &'static str {
        crate::refpath::ARTIFACT_EXTENSION
    }

    // Schemas have no way to express an unresolved type parameter.
    fn resolve_type_parameters(&self) -> bool {
        true
    }
}
