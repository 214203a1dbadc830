//! JSON Schema dialects and render options

use serde::{Deserialize, Serialize};
use std::fmt;

/// A JSON Schema specification dialect
///
/// The three dialects differ in where named definitions live, how tuples
/// are closed, and whether `unevaluatedProperties` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SchemaDialect {
    /// draft-07
    #[serde(rename = "draft-07")]
    Draft07,
    /// draft 2019-09
    #[serde(rename = "draft-2019-09")]
    Draft201909,
    /// draft 2020-12 (default)
    #[serde(rename = "draft-2020-12")]
    #[default]
    Draft202012,
}

impl SchemaDialect {
    /// The `$schema` URI identifying this dialect
    pub fn schema_uri(&self) -> &'static str {
        match self {
            SchemaDialect::Draft07 => "http://json-schema.org/draft-07/schema#",
            SchemaDialect::Draft201909 => "https://json-schema.org/draft/2019-09/schema",
            SchemaDialect::Draft202012 => "https://json-schema.org/draft/2020-12/schema",
        }
    }

    /// The document key under which named definitions are collected
    pub fn definitions_keyword(&self) -> &'static str {
        match self {
            SchemaDialect::Draft07 => "definitions",
            SchemaDialect::Draft201909 | SchemaDialect::Draft202012 => "$defs",
        }
    }

    /// Whether `unevaluatedProperties` is available, allowing an
    /// intersection of object schemas to reject unknown properties in
    /// aggregate
    pub fn supports_unevaluated_properties(&self) -> bool {
        !matches!(self, SchemaDialect::Draft07)
    }

    /// Whether tuples are encoded with `prefixItems` plus `items: false`
    /// rather than the positional `items` array plus `additionalItems:
    /// false`
    pub fn uses_prefix_items(&self) -> bool {
        matches!(self, SchemaDialect::Draft202012)
    }
}

impl fmt::Display for SchemaDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDialect::Draft07 => write!(f, "draft-07"),
            SchemaDialect::Draft201909 => write!(f, "draft-2019-09"),
            SchemaDialect::Draft202012 => write!(f, "draft-2020-12"),
        }
    }
}

/// Options controlling a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Target dialect
    pub dialect: SchemaDialect,
    /// Value emitted for `additionalProperties` on strict objects
    pub allow_additional_properties: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dialect: SchemaDialect::default(),
            allow_additional_properties: false,
        }
    }
}
