//! Input AST contract
//!
//! The typedown parser produces these nodes with all references resolved
//! and doc-comment tags already typed. The renderer treats them as
//! immutable input for the duration of one render pass.
//!
//! Nodes fall into two positions: type positions (record members, tuple
//! elements, alias targets) and statement positions (the top level of a
//! file or a group). Both share the [`Node`] union; a kind reaching the
//! wrong position is a fatal error, never a silent skip.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive kinds carried by [`Token`] nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Number,
    String,
    Boolean,
}

/// Numeric constraint tags
///
/// Closed set: the annotation extractor destructures every field, so a
/// new tag added here fails to compile until it is emitted there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberConstraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
    pub multiple_of: Option<f64>,
}

/// String constraint tags (closed set, see [`NumberConstraints`])
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringConstraints {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub format: Option<String>,
}

/// Array constraint tags (closed set)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArrayConstraints {
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: Option<bool>,
}

/// Object constraint tags (closed set)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectConstraints {
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
}

/// Typed doc-comment tags recognized by the renderers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocTags {
    /// `@title` override
    pub title: Option<String>,
    /// `@default` value. `Some(Value::Null)` is a declared null default;
    /// `None` means the tag is absent.
    pub default: Option<Value>,
    /// `@integer` narrows a numeric token to integers
    pub integer: bool,
    /// File-level `@main`: names the definition the document's top-level
    /// `$ref` points at
    pub main: Option<String>,
    /// `@ignore` environments the tagged statement is excluded from
    pub ignore: Vec<String>,
    pub number: NumberConstraints,
    pub string: StringConstraints,
    pub array: ArrayConstraints,
    pub object: ObjectConstraints,
}

/// Doc-comment attachment: the comment body plus its typed tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Doc {
    /// Human-readable comment text (becomes `description`)
    pub comment: Option<String>,
    pub tags: DocTags,
}

/// One member of a [`Record`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub value: Node,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_read_only: bool,
}

/// A structural record type (named, ordered members)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub members: Vec<Member>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A string-keyed map type, optionally constrained by a key pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    pub value: Box<Node>,
    #[serde(default)]
    pub key_pattern: Option<String>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A homogeneous list type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayNode {
    pub item: Box<Node>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A fixed-arity tuple type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuple {
    pub elements: Vec<Node>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A union type (`A | B`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Union {
    pub variants: Vec<Node>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// An intersection type (`A & B`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub parts: Vec<Node>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A literal type (exactly one value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: Value,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A reference to a declaration elsewhere, carrying the upstream
/// resolver's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Project-root-relative, forward-slash path of the file declaring
    /// the target
    pub declared_in: String,
    /// Qualified name segments of the target declaration (group path
    /// plus name)
    pub qualified: Vec<String>,
    /// Import alias override, if the importing file renamed the target
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

impl Reference {
    /// Schema-pointer fragment name: the alias when present, otherwise
    /// the slash-joined qualified name
    pub fn fragment_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => self.qualified.join("/"),
        }
    }
}

/// A primitive token type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub primitive: PrimitiveKind,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// One member of an [`Enumeration`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub value: Value,
}

/// An enumeration declaration (members assumed already distinct)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enumeration {
    pub name: String,
    pub members: Vec<EnumMember>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A named group of nested statements (namespace)
///
/// Keys are unique statement names; insertion order is preserved so the
/// emitted document is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub statements: IndexMap<String, Node>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A type alias declaration (`type Name = ...`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub value: Box<Node>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// A default-export assignment; influences the document's top-level
/// `$ref` but never produces a definition itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportAssignment {
    pub value: Box<Node>,
    #[serde(default)]
    pub doc: Option<Doc>,
}

/// The AST node union
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Node {
    Record(Record),
    Dictionary(Dictionary),
    Array(ArrayNode),
    Tuple(Tuple),
    Union(Union),
    Intersection(Intersection),
    Literal(Literal),
    Reference(Reference),
    Token(Token),
    Enumeration(Enumeration),
    Group(Group),
    TypeDefinition(TypeDefinition),
    ExportAssignment(ExportAssignment),
}

impl Node {
    /// Kind name for diagnostics and error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Record(_) => "Record",
            Node::Dictionary(_) => "Dictionary",
            Node::Array(_) => "Array",
            Node::Tuple(_) => "Tuple",
            Node::Union(_) => "Union",
            Node::Intersection(_) => "Intersection",
            Node::Literal(_) => "Literal",
            Node::Reference(_) => "Reference",
            Node::Token(_) => "Token",
            Node::Enumeration(_) => "Enumeration",
            Node::Group(_) => "Group",
            Node::TypeDefinition(_) => "TypeDefinition",
            Node::ExportAssignment(_) => "ExportAssignment",
        }
    }

    /// Doc attachment, if the node carries one
    pub fn doc(&self) -> Option<&Doc> {
        match self {
            Node::Record(n) => n.doc.as_ref(),
            Node::Dictionary(n) => n.doc.as_ref(),
            Node::Array(n) => n.doc.as_ref(),
            Node::Tuple(n) => n.doc.as_ref(),
            Node::Union(n) => n.doc.as_ref(),
            Node::Intersection(n) => n.doc.as_ref(),
            Node::Literal(n) => n.doc.as_ref(),
            Node::Reference(n) => n.doc.as_ref(),
            Node::Token(n) => n.doc.as_ref(),
            Node::Enumeration(n) => n.doc.as_ref(),
            Node::Group(n) => n.doc.as_ref(),
            Node::TypeDefinition(n) => n.doc.as_ref(),
            Node::ExportAssignment(n) => n.doc.as_ref(),
        }
    }

    /// Statement name, for kinds that can appear at the top level
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Enumeration(n) => Some(&n.name),
            Node::Group(n) => Some(&n.name),
            Node::TypeDefinition(n) => Some(&n.name),
            _ => None,
        }
    }
}

/// A parsed source file: ordered statements plus file-level doc metadata
///
/// Path identity is supplied by the render context, not the file node;
/// the orchestrator knows where the file sits relative to the project
/// root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFile {
    /// File-level doc (a `@main` tag here overrides the top-level `$ref`)
    pub doc: Option<Doc>,
    pub statements: Vec<Node>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_roundtrip() {
        let node = Node::Record(Record {
            members: vec![Member {
                name: "id".to_string(),
                value: Node::Token(Token {
                    primitive: PrimitiveKind::String,
                    doc: None,
                }),
                is_required: true,
                is_read_only: false,
            }],
            doc: None,
        });
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn test_node_deserialize_tagged() {
        let node: Node = serde_json::from_str(r#"{"kind": "Token", "primitive": "Number"}"#).unwrap();
        assert_eq!(node.kind(), "Token");
    }

    #[test]
    fn test_fragment_name_prefers_alias() {
        let reference = Reference {
            declared_in: "types/user.td".to_string(),
            qualified: vec!["Auth".to_string(), "User".to_string()],
            alias: Some("Account".to_string()),
            doc: None,
        };
        assert_eq!(reference.fragment_name(), "Account");

        let unaliased = Reference {
            alias: None,
            ..reference
        };
        assert_eq!(unaliased.fragment_name(), "Auth/User");
    }

    #[test]
    fn test_default_tag_absent_vs_present() {
        let absent: DocTags = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.default, None);

        let given: DocTags = serde_json::from_str(r#"{"default": 5}"#).unwrap();
        assert_eq!(given.default, Some(serde_json::json!(5)));
    }
}
