//! Typedown JSON Schema Renderer
//!
//! Renders the typedown type-declaration AST into JSON Schema documents
//! across three dialects (draft-07, 2019-09, 2020-12). The parser that
//! produces the AST and the orchestrator that walks source files are
//! external; this crate is the pure transform between them.
//!
//! ## Features
//!
//! - **Total mapping**: every AST node kind maps to exactly one schema
//!   shape, or the render fails loudly naming the offending kind
//! - **Dialect-aware encoding**: tuple closing and intersection
//!   strictness follow the selected dialect
//! - **Deterministic output**: insertion-ordered maps end to end; a fixed
//!   input renders byte-identically across runs
//! - **Pluggable contract**: sibling output formats implement the same
//!   [`Renderer`] trait
//!
//! ## Architecture
//!
//! ```text
//! SourceFile                 statement mapper          document assembler
//! ├── statements ──────────> name → Definition ──────> {$schema, $id,
//! │     │                         ▲                     $ref?, $defs: …}
//! │     └── type nodes ──────────┘
//! │           node mapper (recursive, dialect-aware)
//! └── doc (@main) ──────────────────────────────────> top-level $ref
//! ```
//!
//! ## Example
//!
//! ```
//! use typedown_jsonschema::ast::{Member, Node, PrimitiveKind, Record, SourceFile, Token, TypeDefinition};
//! use typedown_jsonschema::{JsonSchemaRenderer, RenderContext, Renderer, RenderOptions};
//!
//! let file = SourceFile {
//!     doc: None,
//!     statements: vec![Node::TypeDefinition(TypeDefinition {
//!         name: "User".to_string(),
//!         value: Box::new(Node::Record(Record {
//!             members: vec![Member {
//!                 name: "id".to_string(),
//!                 value: Node::Token(Token { primitive: PrimitiveKind::String, doc: None }),
//!                 is_required: true,
//!                 is_read_only: false,
//!             }],
//!             doc: None,
//!         })),
//!         doc: None,
//!     })],
//! };
//!
//! let renderer = JsonSchemaRenderer::new(RenderOptions::default());
//! let output = renderer.transform(&file, &RenderContext::new("types/user.td")).unwrap();
//! assert!(output.text.contains("\"$defs\""));
//! ```

pub mod annotations;
pub mod ast;
pub mod definition;
pub mod diagnostics;
pub mod dialect;
pub mod error;
pub mod refpath;
pub mod render;

pub use annotations::{Annotations, ConstraintCategory};
pub use ast::{Node, SourceFile};
pub use definition::Definition;
pub use diagnostics::{DiagnosticCode, DiagnosticItem, Diagnostics, Severity};
pub use dialect::{RenderOptions, SchemaDialect};
pub use error::{RenderError, Result};
pub use render::{
    DocIgnore, IgnorePredicate, JsonSchemaRenderer, RenderContext, RenderOutput, Renderer,
    JSON_SCHEMA_ENVIRONMENT,
};
