//! Document assembly
//!
//! Builds the top-level schema document for one source file and
//! serializes it: `$schema`, `$id`, an optional top-level `$ref`, then
//! the dialect's definitions container. Key order is insertion order
//! throughout; output is 2-space indented with host line endings and a
//! single trailing newline, so a fixed input renders byte-identically
//! across runs.

use serde_json::{Map, Value};
use tracing::debug;

use crate::ast::{Node, SourceFile};
use crate::dialect::RenderOptions;
use crate::error::{RenderError, Result};
use crate::refpath;
use crate::render::statement::{statement_to_definition, StatementOutcome};
use crate::render::{RenderContext, RenderOutput};

/// Host line separator; schema artifacts follow the platform convention
const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Render one source file into a schema document
pub fn render_document(
    file: &SourceFile,
    context: &RenderContext<'_>,
    options: &RenderOptions,
) -> Result<RenderOutput> {
    let mut diagnostics = crate::diagnostics::Diagnostics::new();
    let keyword = options.dialect.definitions_keyword();

    let mut definitions = Map::new();
    for statement in &file.statements {
        match statement_to_definition(statement, options, context, &mut diagnostics)? {
            StatementOutcome::Definition(def) => {
                let name = statement
                    .name()
                    .ok_or(RenderError::UnexpectedStatement {
                        kind: statement.kind(),
                    })?;
                definitions.insert(name.to_string(), def.to_value());
            }
            StatementOutcome::Skip => {}
        }
    }

    let mut document = Map::new();
    document.insert(
        "$schema".to_string(),
        Value::from(options.dialect.schema_uri()),
    );
    document.insert(
        "$id".to_string(),
        Value::from(format!("/{}", refpath::artifact_path(context.relative_path))),
    );
    if let Some(top_ref) = top_level_ref(file, context, options) {
        document.insert("$ref".to_string(), Value::from(top_ref));
    }
    document.insert(keyword.to_string(), Value::Object(definitions));

    let text = finalize_text(serde_json::to_string_pretty(&Value::Object(document))?);

    debug!(
        file = context.relative_path,
        dialect = %options.dialect,
        warnings = diagnostics.items().len(),
        "rendered schema document"
    );

    Ok(RenderOutput { text, diagnostics })
}

/// Compute the document's top-level `$ref`, if any.
///
/// A file-level `@main` tag wins; otherwise a default export whose
/// expression is a reference node; otherwise none.
fn top_level_ref(
    file: &SourceFile,
    context: &RenderContext<'_>,
    options: &RenderOptions,
) -> Option<String> {
    if let Some(main) = file.doc.as_ref().and_then(|d| d.tags.main.as_ref()) {
        return Some(format!(
            "#/{}/{}",
            options.dialect.definitions_keyword(),
            main
        ));
    }
    file.statements.iter().find_map(|statement| match statement {
        Node::ExportAssignment(export) => match export.value.as_ref() {
            Node::Reference(reference) => Some(refpath::reference_pointer(
                reference,
                context.relative_path,
                options.dialect,
            )),
            _ => None,
        },
        _ => None,
    })
}

/// Normalize line endings and append the trailing newline
fn finalize_text(json: String) -> String {
    let mut text = if LINE_ENDING == "\n" {
        json
    } else {
        json.replace('\n', LINE_ENDING)
    };
    text.push_str(LINE_ENDING);
    text
}
