//! Reference path computation
//!
//! Turns the parser's resolved reference targets into `$ref` pointer
//! strings. A same-file target yields a pure in-document pointer
//! (`#/$defs/Name`); a cross-file target prepends the relative path to
//! the target file's emitted schema artifact.
//!
//! All paths here are project-root-relative with forward slashes; that is
//! the contract with the upstream resolver and the render context.

use crate::ast::Reference;
use crate::dialect::SchemaDialect;

/// Extension of emitted schema artifacts
pub const ARTIFACT_EXTENSION: &str = "schema.json";

/// Replace a source path's extension with the schema artifact extension
/// (`types/user.td` becomes `types/user.schema.json`)
pub fn artifact_path(source: &str) -> String {
    let (dir, file) = match source.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, source),
    };
    let stem = file.split_once('.').map_or(file, |(stem, _)| stem);
    match dir {
        Some(dir) => format!("{dir}/{stem}.{ARTIFACT_EXTENSION}"),
        None => format!("{stem}.{ARTIFACT_EXTENSION}"),
    }
}

/// Relative forward-slash path from `from_file`'s directory to `to_file`
fn relative_path(from_file: &str, to_file: &str) -> String {
    let from_dir: Vec<&str> = match from_file.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let mut to_parts: Vec<&str> = to_file.split('/').collect();
    let to_name = to_parts.pop().unwrap_or(to_file);

    let common = from_dir
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = Vec::new();
    for _ in common..from_dir.len() {
        segments.push("..");
    }
    segments.extend(&to_parts[common..]);
    segments.push(to_name);
    segments.join("/")
}

/// Build the `$ref` pointer for `reference` as seen from
/// `containing_file` (the project-root-relative path of the file being
/// rendered)
pub fn reference_pointer(
    reference: &Reference,
    containing_file: &str,
    dialect: SchemaDialect,
) -> String {
    let external = if reference.declared_in == containing_file {
        String::new()
    } else {
        relative_path(containing_file, &artifact_path(&reference.declared_in))
    };
    format!(
        "{}#/{}/{}",
        external,
        dialect.definitions_keyword(),
        reference.fragment_name()
    )
}
