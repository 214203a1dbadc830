//! Output definitions
//!
//! The closed set of schema shapes the renderer can emit, plus their
//! serialization into `serde_json` values. Definitions are freshly
//! constructed owned values; nothing aliases back into the AST, so the
//! intersection merge can strip a child's `additionalProperties` on its
//! own copy without a mutation hazard.
//!
//! Tuples exist in two historical shapes (`items` array vs `prefixItems`);
//! the node mapper picks the variant for the active dialect, so
//! serialization here is dialect-free.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::annotations::Annotations;

/// A strict object schema (enumerated properties)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDef {
    pub properties: IndexMap<String, Definition>,
    /// Names of required members, in declaration order
    pub required: Vec<String>,
    /// `additionalProperties` value; `None` omits the key entirely (the
    /// intersection merge strips it from member objects)
    pub additional_properties: Option<bool>,
    pub constraints: Map<String, Value>,
    pub annotations: Annotations,
}

/// A dictionary whose keys match a pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDictionaryDef {
    pub pattern: String,
    pub value: Box<Definition>,
    pub additional_properties: bool,
    pub constraints: Map<String, Value>,
    pub annotations: Annotations,
}

/// A catch-all dictionary ("map of T"): `additionalProperties` carries
/// the value schema and no `properties` key is emitted
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryDef {
    pub value: Box<Definition>,
    pub constraints: Map<String, Value>,
    pub annotations: Annotations,
}

/// A homogeneous array schema
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDef {
    pub items: Box<Definition>,
    pub constraints: Map<String, Value>,
    pub annotations: Annotations,
}

/// A fixed-arity tuple; the enclosing [`Definition`] variant decides the
/// encoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TupleDef {
    pub elements: Vec<Definition>,
    pub annotations: Annotations,
}

/// A numeric schema; `integer` selects `"integer"` over `"number"`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberDef {
    pub integer: bool,
    pub constraints: Map<String, Value>,
    pub annotations: Annotations,
}

/// A string schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringDef {
    pub constraints: Map<String, Value>,
    pub annotations: Annotations,
}

/// A boolean schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanDef {
    pub annotations: Annotations,
}

/// A `$ref` pointer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefDef {
    /// Full pointer text, e.g. `../common.schema.json#/$defs/User`
    pub reference: String,
    pub annotations: Annotations,
}

/// A `oneOf` union, child order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneOfDef {
    pub variants: Vec<Definition>,
    pub annotations: Annotations,
}

/// An `allOf` intersection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllOfDef {
    pub parts: Vec<Definition>,
    /// Set when the object-merge upgrade applied; emits `type: "object"`
    /// plus `unevaluatedProperties` alongside the `allOf`
    pub unevaluated_properties: Option<bool>,
    pub annotations: Annotations,
}

/// A `const` schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstDef {
    pub value: Value,
    pub annotations: Annotations,
}

/// An `enum` schema, raw values in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumDef {
    pub values: Vec<Value>,
    pub annotations: Annotations,
}

/// The closed union of shapes one AST node maps to
///
/// `Group` is the only non-schema variant: it carries a nested map of
/// sibling definitions and serializes as a plain object.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Object(ObjectDef),
    PatternDictionary(PatternDictionaryDef),
    Dictionary(DictionaryDef),
    Array(ArrayDef),
    /// Positional `items` tuple form (draft-07 and 2019-09)
    Tuple(TupleDef),
    /// `prefixItems` tuple form (2020-12)
    PrefixTuple(TupleDef),
    Number(NumberDef),
    String(StringDef),
    Boolean(BooleanDef),
    Ref(RefDef),
    OneOf(OneOfDef),
    AllOf(AllOfDef),
    Const(ConstDef),
    Enum(EnumDef),
    Group(IndexMap<String, Definition>),
}

impl Definition {
    /// Whether this is a strict object (eligible for the intersection
    /// object-merge upgrade)
    pub fn is_strict_object(&self) -> bool {
        matches!(self, Definition::Object(_))
    }

    /// Whether this is a `$ref` pointer
    pub fn is_ref(&self) -> bool {
        matches!(self, Definition::Ref(_))
    }

    /// Serialize to a JSON value with stable key order
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        match self {
            Definition::Object(def) => {
                out.insert("type".to_string(), Value::from("object"));
                let properties: Map<String, Value> = def
                    .properties
                    .iter()
                    .map(|(name, child)| (name.clone(), child.to_value()))
                    .collect();
                out.insert("properties".to_string(), Value::Object(properties));
                if !def.required.is_empty() {
                    out.insert(
                        "required".to_string(),
                        Value::Array(def.required.iter().map(|n| Value::from(n.as_str())).collect()),
                    );
                }
                if let Some(allow) = def.additional_properties {
                    out.insert("additionalProperties".to_string(), Value::Bool(allow));
                }
                out.extend(def.constraints.clone());
                def.annotations.write_into(&mut out);
            }
            Definition::PatternDictionary(def) => {
                out.insert("type".to_string(), Value::from("object"));
                let mut patterns = Map::new();
                patterns.insert(def.pattern.clone(), def.value.to_value());
                out.insert("patternProperties".to_string(), Value::Object(patterns));
                out.insert(
                    "additionalProperties".to_string(),
                    Value::Bool(def.additional_properties),
                );
                out.extend(def.constraints.clone());
                def.annotations.write_into(&mut out);
            }
            Definition::Dictionary(def) => {
                out.insert("type".to_string(), Value::from("object"));
                out.insert("additionalProperties".to_string(), def.value.to_value());
                out.extend(def.constraints.clone());
                def.annotations.write_into(&mut out);
            }
            Definition::Array(def) => {
                out.insert("type".to_string(), Value::from("array"));
                out.insert("items".to_string(), def.items.to_value());
                out.extend(def.constraints.clone());
                def.annotations.write_into(&mut out);
            }
            Definition::Tuple(def) => {
                let count = def.elements.len();
                out.insert("type".to_string(), Value::from("array"));
                out.insert(
                    "items".to_string(),
                    Value::Array(def.elements.iter().map(Definition::to_value).collect()),
                );
                out.insert("minItems".to_string(), Value::from(count));
                out.insert("maxItems".to_string(), Value::from(count));
                out.insert("additionalItems".to_string(), Value::Bool(false));
                def.annotations.write_into(&mut out);
            }
            Definition::PrefixTuple(def) => {
                let count = def.elements.len();
                out.insert("type".to_string(), Value::from("array"));
                out.insert(
                    "prefixItems".to_string(),
                    Value::Array(def.elements.iter().map(Definition::to_value).collect()),
                );
                out.insert("minItems".to_string(), Value::from(count));
                out.insert("maxItems".to_string(), Value::from(count));
                out.insert("items".to_string(), Value::Bool(false));
                def.annotations.write_into(&mut out);
            }
            Definition::Number(def) => {
                let type_name = if def.integer { "integer" } else { "number" };
                out.insert("type".to_string(), Value::from(type_name));
                out.extend(def.constraints.clone());
                def.annotations.write_into(&mut out);
            }
            Definition::String(def) => {
                out.insert("type".to_string(), Value::from("string"));
                out.extend(def.constraints.clone());
                def.annotations.write_into(&mut out);
            }
            Definition::Boolean(def) => {
                out.insert("type".to_string(), Value::from("boolean"));
                def.annotations.write_into(&mut out);
            }
            Definition::Ref(def) => {
                out.insert("$ref".to_string(), Value::from(def.reference.as_str()));
                def.annotations.write_into(&mut out);
            }
            Definition::OneOf(def) => {
                out.insert(
                    "oneOf".to_string(),
                    Value::Array(def.variants.iter().map(Definition::to_value).collect()),
                );
                def.annotations.write_into(&mut out);
            }
            Definition::AllOf(def) => {
                if def.unevaluated_properties.is_some() {
                    out.insert("type".to_string(), Value::from("object"));
                }
                out.insert(
                    "allOf".to_string(),
                    Value::Array(def.parts.iter().map(Definition::to_value).collect()),
                );
                if let Some(allow) = def.unevaluated_properties {
                    out.insert("unevaluatedProperties".to_string(), Value::Bool(allow));
                }
                def.annotations.write_into(&mut out);
            }
            Definition::Const(def) => {
                out.insert("const".to_string(), def.value.clone());
                def.annotations.write_into(&mut out);
            }
            Definition::Enum(def) => {
                out.insert("enum".to_string(), Value::Array(def.values.clone()));
                def.annotations.write_into(&mut out);
            }
            Definition::Group(entries) => {
                for (name, child) in entries {
                    out.insert(name.clone(), child.to_value());
                }
            }
        }
        Value::Object(out)
    }
}
