//! Node-to-definition mapping
//!
//! The recursive core of the renderer: one AST node in, one definition
//! out. Dispatch is total over the node union; statement-only kinds
//! reaching a type position abort the render. Tuples and intersections
//! additionally branch on the active dialect.

use tracing::warn;

use crate::annotations::{constraints_for, Annotations, ConstraintCategory};
use crate::ast::{Node, PrimitiveKind};
use crate::definition::{
    AllOfDef, ArrayDef, BooleanDef, ConstDef, Definition, DictionaryDef, EnumDef, NumberDef,
    ObjectDef, OneOfDef, PatternDictionaryDef, RefDef, StringDef, TupleDef,
};
use crate::diagnostics::Diagnostics;
use crate::dialect::RenderOptions;
use crate::error::{RenderError, Result};
use crate::refpath;

/// Context propagated exactly one recursion level
///
/// `read_only` applies to the definition built at this level only; every
/// recursive call recomputes the bit for its own children (from record
/// members), so it is never inherited deeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShallowOptions {
    pub read_only: bool,
}

impl ShallowOptions {
    pub fn read_only(read_only: bool) -> Self {
        Self { read_only }
    }
}

/// Convert one AST node into one schema definition
pub fn node_to_definition(
    node: &Node,
    containing_file: &str,
    options: &RenderOptions,
    shallow: ShallowOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Definition> {
    let annotations = Annotations::from_doc(node.doc(), shallow.read_only);
    match node {
        Node::Record(record) => {
            let mut properties = indexmap::IndexMap::new();
            let mut required = Vec::new();
            for member in &record.members {
                let child = node_to_definition(
                    &member.value,
                    containing_file,
                    options,
                    ShallowOptions::read_only(member.is_read_only),
                    diagnostics,
                )?;
                if member.is_required {
                    required.push(member.name.clone());
                }
                properties.insert(member.name.clone(), child);
            }
            Ok(Definition::Object(ObjectDef {
                properties,
                required,
                additional_properties: Some(options.allow_additional_properties),
                constraints: constraints_for(record.doc.as_ref(), ConstraintCategory::Object),
                annotations,
            }))
        }

        Node::Dictionary(dictionary) => {
            let value = Box::new(node_to_definition(
                &dictionary.value,
                containing_file,
                options,
                ShallowOptions::default(),
                diagnostics,
            )?);
            let constraints = constraints_for(dictionary.doc.as_ref(), ConstraintCategory::Object);
            Ok(match &dictionary.key_pattern {
                Some(pattern) => Definition::PatternDictionary(PatternDictionaryDef {
                    pattern: pattern.clone(),
                    value,
                    additional_properties: options.allow_additional_properties,
                    constraints,
                    annotations,
                }),
                // "map of T": the value schema *is* additionalProperties
                None => Definition::Dictionary(DictionaryDef {
                    value,
                    constraints,
                    annotations,
                }),
            })
        }

        Node::Array(array) => {
            let items = Box::new(node_to_definition(
                &array.item,
                containing_file,
                options,
                ShallowOptions::default(),
                diagnostics,
            )?);
            Ok(Definition::Array(ArrayDef {
                items,
                constraints: constraints_for(array.doc.as_ref(), ConstraintCategory::Array),
                annotations,
            }))
        }

        Node::Tuple(tuple) => {
            let elements = tuple
                .elements
                .iter()
                .map(|element| {
                    node_to_definition(
                        element,
                        containing_file,
                        options,
                        ShallowOptions::default(),
                        diagnostics,
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            let def = TupleDef {
                elements,
                annotations,
            };
            Ok(if options.dialect.uses_prefix_items() {
                Definition::PrefixTuple(def)
            } else {
                Definition::Tuple(def)
            })
        }

        Node::Union(union) => {
            let variants = union
                .variants
                .iter()
                .map(|variant| {
                    node_to_definition(
                        variant,
                        containing_file,
                        options,
                        ShallowOptions::default(),
                        diagnostics,
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Definition::OneOf(OneOfDef {
                variants,
                annotations,
            }))
        }

        Node::Intersection(intersection) => {
            let parts = intersection
                .parts
                .iter()
                .map(|part| {
                    node_to_definition(
                        part,
                        containing_file,
                        options,
                        ShallowOptions::default(),
                        diagnostics,
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(intersection_definition(
                parts,
                annotations,
                containing_file,
                options,
                diagnostics,
            ))
        }

        Node::Literal(literal) => Ok(Definition::Const(ConstDef {
            value: literal.value.clone(),
            annotations,
        })),

        Node::Reference(reference) => Ok(Definition::Ref(RefDef {
            reference: refpath::reference_pointer(reference, containing_file, options.dialect),
            annotations,
        })),

        Node::Token(token) => Ok(match token.primitive {
            PrimitiveKind::Number => {
                let integer = token.doc.as_ref().map_or(false, |d| d.tags.integer);
                Definition::Number(NumberDef {
                    integer,
                    constraints: constraints_for(token.doc.as_ref(), ConstraintCategory::Number),
                    annotations,
                })
            }
            PrimitiveKind::String => Definition::String(StringDef {
                constraints: constraints_for(token.doc.as_ref(), ConstraintCategory::String),
                annotations,
            }),
            PrimitiveKind::Boolean => Definition::Boolean(BooleanDef { annotations }),
        }),

        Node::Enumeration(enumeration) => Ok(Definition::Enum(EnumDef {
            values: enumeration.members.iter().map(|m| m.value.clone()).collect(),
            annotations,
        })),

        Node::Group(_) | Node::TypeDefinition(_) | Node::ExportAssignment(_) => {
            Err(RenderError::UnexpectedNode { kind: node.kind() })
        }
    }
}

/// Build the `allOf` for an intersection, upgrading to an enforceable
/// object merge when possible.
///
/// When every part is a strict object or a reference, the members'
/// `additionalProperties: false` would wrongly reject properties
/// contributed by siblings. Dialects with `unevaluatedProperties` get the
/// upgrade: the key is stripped from each object part (on our own copy)
/// and the aggregate gains `type: "object"` plus `unevaluatedProperties`.
/// draft-07 keeps the plain `allOf` and surfaces a warning, since
/// validation is then weaker than the author intended.
fn intersection_definition(
    parts: Vec<Definition>,
    annotations: Annotations,
    containing_file: &str,
    options: &RenderOptions,
    diagnostics: &mut Diagnostics,
) -> Definition {
    let mergeable =
        !parts.is_empty() && parts.iter().all(|p| p.is_strict_object() || p.is_ref());

    if mergeable && options.dialect.supports_unevaluated_properties() {
        let parts = parts
            .into_iter()
            .map(|part| match part {
                Definition::Object(mut object) => {
                    object.additional_properties = None;
                    Definition::Object(object)
                }
                other => other,
            })
            .collect();
        return Definition::AllOf(AllOfDef {
            parts,
            unevaluated_properties: Some(options.allow_additional_properties),
            annotations,
        });
    }

    if mergeable {
        warn!(
            file = containing_file,
            dialect = %options.dialect,
            "intersection of strict objects emitted as plain allOf; \
             stray properties will not be rejected"
        );
        diagnostics.intersection_not_enforceable(containing_file, options.dialect);
    }

    Definition::AllOf(AllOfDef {
        parts,
        unevaluated_properties: None,
        annotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        ArrayNode, Dictionary, Doc, DocTags, Intersection, Member, Record, Token, Tuple,
    };
    use crate::dialect::SchemaDialect;
    use serde_json::json;

    fn token(primitive: PrimitiveKind) -> Node {
        Node::Token(Token {
            primitive,
            doc: None,
        })
    }

    fn record(members: Vec<Member>) -> Node {
        Node::Record(Record { members, doc: None })
    }

    fn member(name: &str, value: Node, required: bool) -> Member {
        Member {
            name: name.to_string(),
            value,
            is_required: required,
            is_read_only: false,
        }
    }

    fn render(node: &Node, options: &RenderOptions) -> (Definition, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let def = node_to_definition(
            node,
            "types/main.td",
            options,
            ShallowOptions::default(),
            &mut diagnostics,
        )
        .unwrap();
        (def, diagnostics)
    }

    #[test]
    fn test_record_to_strict_object() {
        let node = record(vec![
            member("id", token(PrimitiveKind::String), true),
            member("note", token(PrimitiveKind::String), false),
        ]);
        let (def, _) = render(&node, &RenderOptions::default());
        assert_eq!(
            def.to_value(),
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "note": { "type": "string" }
                },
                "required": ["id"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn test_read_only_propagates_one_level() {
        let inner = record(vec![member("deep", token(PrimitiveKind::String), false)]);
        let node = record(vec![Member {
            name: "meta".to_string(),
            value: inner,
            is_required: false,
            is_read_only: true,
        }]);
        let (def, _) = render(&node, &RenderOptions::default());
        let value = def.to_value();
        // The member's own definition is readOnly...
        assert_eq!(
            value.pointer("/properties/meta/readOnly"),
            Some(&json!(true))
        );
        // ...but the bit never reaches the member's children.
        assert_eq!(value.pointer("/properties/meta/properties/deep/readOnly"), None);
    }

    #[test]
    fn test_dictionary_forms_are_distinct() {
        let plain = Node::Dictionary(Dictionary {
            value: Box::new(token(PrimitiveKind::Number)),
            key_pattern: None,
            doc: None,
        });
        let (def, _) = render(&plain, &RenderOptions::default());
        let value = def.to_value();
        assert_eq!(
            value.pointer("/additionalProperties/type"),
            Some(&json!("number"))
        );
        assert!(value.get("patternProperties").is_none());
        assert!(value.get("properties").is_none());

        let patterned = Node::Dictionary(Dictionary {
            value: Box::new(token(PrimitiveKind::Number)),
            key_pattern: Some("^[a-z]+$".to_string()),
            doc: None,
        });
        let (def, _) = render(&patterned, &RenderOptions::default());
        let value = def.to_value();
        assert_eq!(
            value.pointer("/patternProperties/^[a-z]+$/type"),
            Some(&json!("number"))
        );
        assert_eq!(value.get("additionalProperties"), Some(&json!(false)));
    }

    #[test]
    fn test_tuple_shape_per_dialect() {
        let node = Node::Tuple(Tuple {
            elements: vec![
                token(PrimitiveKind::Number),
                token(PrimitiveKind::String),
                token(PrimitiveKind::Boolean),
            ],
            doc: None,
        });

        let oldest = RenderOptions {
            dialect: SchemaDialect::Draft07,
            ..Default::default()
        };
        let (def, _) = render(&node, &oldest);
        assert_eq!(
            def.to_value(),
            json!({
                "type": "array",
                "items": [
                    { "type": "number" },
                    { "type": "string" },
                    { "type": "boolean" }
                ],
                "minItems": 3,
                "maxItems": 3,
                "additionalItems": false
            })
        );

        let newest = RenderOptions::default();
        let (def, _) = render(&node, &newest);
        assert_eq!(
            def.to_value(),
            json!({
                "type": "array",
                "prefixItems": [
                    { "type": "number" },
                    { "type": "string" },
                    { "type": "boolean" }
                ],
                "minItems": 3,
                "maxItems": 3,
                "items": false
            })
        );
    }

    #[test]
    fn test_intersection_upgrade_under_newest() {
        let node = Node::Intersection(Intersection {
            parts: vec![
                record(vec![member("a", token(PrimitiveKind::String), true)]),
                record(vec![member("b", token(PrimitiveKind::Number), false)]),
            ],
            doc: None,
        });
        let (def, diagnostics) = render(&node, &RenderOptions::default());
        assert!(diagnostics.is_empty());
        let value = def.to_value();
        assert_eq!(value.get("type"), Some(&json!("object")));
        assert_eq!(value.get("unevaluatedProperties"), Some(&json!(false)));
        // additionalProperties stripped from both members
        assert_eq!(value.pointer("/allOf/0/additionalProperties"), None);
        assert_eq!(value.pointer("/allOf/1/additionalProperties"), None);
    }

    #[test]
    fn test_intersection_plain_under_draft07_with_warning() {
        let node = Node::Intersection(Intersection {
            parts: vec![
                record(vec![member("a", token(PrimitiveKind::String), true)]),
                record(vec![member("b", token(PrimitiveKind::Number), false)]),
            ],
            doc: None,
        });
        let options = RenderOptions {
            dialect: SchemaDialect::Draft07,
            ..Default::default()
        };
        let (def, diagnostics) = render(&node, &options);
        assert!(diagnostics.has_warnings());
        let value = def.to_value();
        assert_eq!(value.get("type"), None);
        assert_eq!(value.get("unevaluatedProperties"), None);
        assert_eq!(
            value.pointer("/allOf/0/additionalProperties"),
            Some(&json!(false))
        );
        assert_eq!(
            value.pointer("/allOf/1/additionalProperties"),
            Some(&json!(false))
        );
    }

    #[test]
    fn test_mixed_intersection_stays_silent() {
        let node = Node::Intersection(Intersection {
            parts: vec![
                record(vec![member("a", token(PrimitiveKind::String), true)]),
                token(PrimitiveKind::String),
            ],
            doc: None,
        });
        let options = RenderOptions {
            dialect: SchemaDialect::Draft07,
            ..Default::default()
        };
        let (def, diagnostics) = render(&node, &options);
        assert!(diagnostics.is_empty());
        assert!(matches!(
            def,
            Definition::AllOf(AllOfDef {
                unevaluated_properties: None,
                ..
            })
        ));
    }

    #[test]
    fn test_integer_tag_narrows_number() {
        let node = Node::Token(Token {
            primitive: PrimitiveKind::Number,
            doc: Some(Doc {
                comment: None,
                tags: DocTags {
                    integer: true,
                    ..Default::default()
                },
            }),
        });
        let (def, _) = render(&node, &RenderOptions::default());
        assert_eq!(def.to_value().get("type"), Some(&json!("integer")));
    }

    #[test]
    fn test_array_with_constraints() {
        let node = Node::Array(ArrayNode {
            item: Box::new(token(PrimitiveKind::String)),
            doc: Some(Doc {
                comment: None,
                tags: DocTags {
                    array: crate::ast::ArrayConstraints {
                        min_items: Some(1),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            }),
        });
        let (def, _) = render(&node, &RenderOptions::default());
        assert_eq!(
            def.to_value(),
            json!({
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1
            })
        );
    }

    #[test]
    fn test_statement_kind_at_type_position_fails() {
        let node = Node::ExportAssignment(crate::ast::ExportAssignment {
            value: Box::new(token(PrimitiveKind::String)),
            doc: None,
        });
        let mut diagnostics = Diagnostics::new();
        let err = node_to_definition(
            &node,
            "types/main.td",
            &RenderOptions::default(),
            ShallowOptions::default(),
            &mut diagnostics,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnexpectedNode {
                kind: "ExportAssignment"
            }
        ));
    }
}
