//! Statement-to-definition mapping
//!
//! Converts top-level declarations into entries for the definitions
//! container. Every statement is first checked against the ignore
//! predicate; an ignored statement contributes nothing and leaves its
//! siblings untouched.

use indexmap::IndexMap;

use crate::annotations::Annotations;
use crate::ast::Node;
use crate::definition::{Definition, EnumDef};
use crate::diagnostics::Diagnostics;
use crate::dialect::RenderOptions;
use crate::error::{RenderError, Result};
use crate::render::node::{node_to_definition, ShallowOptions};
use crate::render::{RenderContext, JSON_SCHEMA_ENVIRONMENT};

/// Outcome of mapping one top-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    /// A definition to insert under the statement's name
    Definition(Definition),
    /// The statement contributes no entry (export assignment, ignored)
    Skip,
}

/// Convert one top-level statement
pub fn statement_to_definition(
    statement: &Node,
    options: &RenderOptions,
    context: &RenderContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<StatementOutcome> {
    if context
        .ignore
        .is_ignored(statement.doc(), JSON_SCHEMA_ENVIRONMENT)
    {
        return Ok(StatementOutcome::Skip);
    }

    match statement {
        Node::TypeDefinition(definition) => {
            let def = node_to_definition(
                &definition.value,
                context.relative_path,
                options,
                ShallowOptions::default(),
                diagnostics,
            )?;
            Ok(StatementOutcome::Definition(def))
        }

        // Built directly rather than via the node mapper: an enumeration
        // statement is already its own definition.
        Node::Enumeration(enumeration) => Ok(StatementOutcome::Definition(Definition::Enum(
            EnumDef {
                values: enumeration
                    .members
                    .iter()
                    .map(|m| m.value.clone())
                    .collect(),
                annotations: Annotations::from_doc(enumeration.doc.as_ref(), false),
            },
        ))),

        // Only influences the document's top-level `$ref`.
        Node::ExportAssignment(_) => Ok(StatementOutcome::Skip),

        Node::Group(group) => {
            let mut entries = IndexMap::new();
            for (name, nested) in &group.statements {
                match statement_to_definition(nested, options, context, diagnostics)? {
                    StatementOutcome::Definition(def) => {
                        entries.insert(name.clone(), def);
                    }
                    StatementOutcome::Skip => {}
                }
            }
            Ok(StatementOutcome::Definition(Definition::Group(entries)))
        }

        other => Err(RenderError::UnexpectedStatement { kind: other.kind() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        Doc, DocTags, EnumMember, Enumeration, Group, PrimitiveKind, Token, TypeDefinition,
    };
    use serde_json::json;

    fn alias(name: &str, value: Node) -> Node {
        Node::TypeDefinition(TypeDefinition {
            name: name.to_string(),
            value: Box::new(value),
            doc: None,
        })
    }

    fn token() -> Node {
        Node::Token(Token {
            primitive: PrimitiveKind::String,
            doc: None,
        })
    }

    fn map(statement: &Node) -> Result<StatementOutcome> {
        let mut diagnostics = Diagnostics::new();
        let context = RenderContext::new("types/main.td");
        statement_to_definition(statement, &RenderOptions::default(), &context, &mut diagnostics)
    }

    #[test]
    fn test_type_definition_delegates() {
        let outcome = map(&alias("Name", token())).unwrap();
        match outcome {
            StatementOutcome::Definition(def) => {
                assert_eq!(def.to_value(), json!({ "type": "string" }));
            }
            other => panic!("Expected a definition, got {:?}", other),
        }
    }

    #[test]
    fn test_enumeration_statement() {
        let statement = Node::Enumeration(Enumeration {
            name: "Role".to_string(),
            members: vec![
                EnumMember { value: json!("admin") },
                EnumMember { value: json!("member") },
            ],
            doc: None,
        });
        let outcome = map(&statement).unwrap();
        match outcome {
            StatementOutcome::Definition(def) => {
                assert_eq!(def.to_value(), json!({ "enum": ["admin", "member"] }));
            }
            other => panic!("Expected a definition, got {:?}", other),
        }
    }

    #[test]
    fn test_export_assignment_skipped() {
        let statement = Node::ExportAssignment(crate::ast::ExportAssignment {
            value: Box::new(token()),
            doc: None,
        });
        assert_eq!(map(&statement).unwrap(), StatementOutcome::Skip);
    }

    #[test]
    fn test_ignored_statement_skipped() {
        let statement = Node::TypeDefinition(TypeDefinition {
            name: "Hidden".to_string(),
            value: Box::new(token()),
            doc: Some(Doc {
                comment: None,
                tags: DocTags {
                    ignore: vec![JSON_SCHEMA_ENVIRONMENT.to_string()],
                    ..Default::default()
                },
            }),
        });
        assert_eq!(map(&statement).unwrap(), StatementOutcome::Skip);
    }

    #[test]
    fn test_group_recursion_drops_skipped_entries() {
        let mut statements = IndexMap::new();
        statements.insert("Kept".to_string(), alias("Kept", token()));
        statements.insert(
            "Dropped".to_string(),
            Node::TypeDefinition(TypeDefinition {
                name: "Dropped".to_string(),
                value: Box::new(token()),
                doc: Some(Doc {
                    comment: None,
                    tags: DocTags {
                        ignore: vec![JSON_SCHEMA_ENVIRONMENT.to_string()],
                        ..Default::default()
                    },
                }),
            }),
        );
        let statement = Node::Group(Group {
            name: "Api".to_string(),
            statements,
            doc: None,
        });
        let outcome = map(&statement).unwrap();
        match outcome {
            StatementOutcome::Definition(def) => {
                assert_eq!(def.to_value(), json!({ "Kept": { "type": "string" } }));
            }
            other => panic!("Expected a definition, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_type_at_statement_position_fails() {
        let err = map(&token()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnexpectedStatement { kind: "Token" }
        ));
    }
}
