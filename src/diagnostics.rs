//! Diagnostics
//!
//! Non-fatal warnings surfaced alongside render output. Fatal problems
//! (exhaustiveness violations) travel through [`crate::error::RenderError`]
//! instead and discard the in-progress document.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dialect::SchemaDialect;

/// Diagnostic code for categorizing issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Intersection of strict objects cannot be narrowed: the selected
    /// dialect has no `unevaluatedProperties`, so the emitted `allOf`
    /// accepts stray properties the author likely intended to forbid
    IntersectionNotEnforceable,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntersectionNotEnforceable => "W001",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::IntersectionNotEnforceable => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticItem {
    /// File the diagnostic points at (project-root-relative)
    pub file: String,
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for DiagnosticItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.code, self.file, self.message
        )
    }
}

/// Collector for diagnostics raised during one render pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<DiagnosticItem>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: &str, code: DiagnosticCode, message: impl Into<String>) {
        self.items.push(DiagnosticItem {
            file: file.to_string(),
            code,
            severity: code.severity(),
            message: message.into(),
        });
    }

    /// Record that an intersection of strict objects was emitted as a
    /// plain `allOf` because `dialect` cannot enforce it
    pub fn intersection_not_enforceable(&mut self, file: &str, dialect: SchemaDialect) {
        self.push(
            file,
            DiagnosticCode::IntersectionNotEnforceable,
            format!(
                "{dialect} lacks unevaluatedProperties; the intersection's allOf \
                 will accept properties outside its members"
            ),
        );
    }

    pub fn items(&self) -> &[DiagnosticItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        self.items.iter().any(|i| i.severity >= Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|i| i.severity == Severity::Error)
    }
}
