//! Annotation extraction
//!
//! Pulls titles, descriptions, defaults and validation constraints out of
//! a node's doc-comment tags. Constraint tags are grouped into closed
//! per-category structs in the AST; every arm below destructures the
//! whole struct, so adding a tag without emitting it is a compile error.

use serde_json::{Map, Value};

use crate::ast::{
    ArrayConstraints, Doc, NumberConstraints, ObjectConstraints, StringConstraints,
};

/// Constraint category of a target definition shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintCategory {
    Number,
    String,
    Object,
    Array,
}

/// Shared schema annotations carried by every definition shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Present only when a `@default` tag was written; a declared null
    /// default is `Some(Value::Null)`
    pub default: Option<Value>,
    pub read_only: bool,
}

impl Annotations {
    /// Extract annotations from a doc attachment.
    ///
    /// `read_only` comes from the enclosing record member, not from the
    /// doc tags, and applies to this level only.
    pub fn from_doc(doc: Option<&Doc>, read_only: bool) -> Self {
        Self {
            title: doc.and_then(|d| d.tags.title.clone()),
            description: doc.and_then(|d| d.comment.clone()),
            default: doc.and_then(|d| d.tags.default.clone()),
            read_only,
        }
    }

    /// Append the annotation keys to a definition object, in stable order
    pub(crate) fn write_into(&self, out: &mut Map<String, Value>) {
        if let Some(title) = &self.title {
            out.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(description) = &self.description {
            out.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(default) = &self.default {
            out.insert("default".to_string(), default.clone());
        }
        if self.read_only {
            out.insert("readOnly".to_string(), Value::Bool(true));
        }
    }
}

/// Extract the constraint keys for `category` present in `doc`.
///
/// Only keys the author actually wrote appear in the result.
pub fn constraints_for(doc: Option<&Doc>, category: ConstraintCategory) -> Map<String, Value> {
    let mut out = Map::new();
    let Some(tags) = doc.map(|d| &d.tags) else {
        return out;
    };
    match category {
        ConstraintCategory::Number => {
            let NumberConstraints {
                minimum,
                maximum,
                exclusive_minimum,
                exclusive_maximum,
                multiple_of,
            } = &tags.number;
            put(&mut out, "minimum", *minimum);
            put(&mut out, "maximum", *maximum);
            put(&mut out, "exclusiveMinimum", *exclusive_minimum);
            put(&mut out, "exclusiveMaximum", *exclusive_maximum);
            put(&mut out, "multipleOf", *multiple_of);
        }
        ConstraintCategory::String => {
            let StringConstraints {
                min_length,
                max_length,
                pattern,
                format,
            } = &tags.string;
            put(&mut out, "minLength", *min_length);
            put(&mut out, "maxLength", *max_length);
            put(&mut out, "pattern", pattern.clone());
            put(&mut out, "format", format.clone());
        }
        ConstraintCategory::Object => {
            let ObjectConstraints {
                min_properties,
                max_properties,
            } = &tags.object;
            put(&mut out, "minProperties", *min_properties);
            put(&mut out, "maxProperties", *max_properties);
        }
        ConstraintCategory::Array => {
            let ArrayConstraints {
                min_items,
                max_items,
                unique_items,
            } = &tags.array;
            put(&mut out, "minItems", *min_items);
            put(&mut out, "maxItems", *max_items);
            put(&mut out, "uniqueItems", *unique_items);
        }
    }
    out
}

fn put<T: Into<Value>>(out: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        out.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DocTags;
    use serde_json::json;

    fn doc_with_tags(tags: DocTags) -> Doc {
        Doc {
            comment: Some("A counter.".to_string()),
            tags,
        }
    }

    #[test]
    fn test_number_constraints_partial() {
        let doc = doc_with_tags(DocTags {
            number: NumberConstraints {
                minimum: Some(0.0),
                multiple_of: Some(2.0),
                ..Default::default()
            },
            ..Default::default()
        });
        let out = constraints_for(Some(&doc), ConstraintCategory::Number);
        assert_eq!(out.get("minimum"), Some(&json!(0.0)));
        assert_eq!(out.get("multipleOf"), Some(&json!(2.0)));
        assert!(!out.contains_key("maximum"));
    }

    #[test]
    fn test_category_isolation() {
        // String tags never leak into a number-category extraction
        let doc = doc_with_tags(DocTags {
            string: StringConstraints {
                pattern: Some("^x".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
        let out = constraints_for(Some(&doc), ConstraintCategory::Number);
        assert!(out.is_empty());
    }

    #[test]
    fn test_annotations_from_doc() {
        let doc = doc_with_tags(DocTags {
            title: Some("Counter".to_string()),
            default: Some(json!(0)),
            ..Default::default()
        });
        let annotations = Annotations::from_doc(Some(&doc), true);
        assert_eq!(annotations.title.as_deref(), Some("Counter"));
        assert_eq!(annotations.description.as_deref(), Some("A counter."));
        assert_eq!(annotations.default, Some(json!(0)));
        assert!(annotations.read_only);
    }

    #[test]
    fn test_no_doc_yields_empty() {
        let annotations = Annotations::from_doc(None, false);
        assert_eq!(annotations, Annotations::default());
        assert!(constraints_for(None, ConstraintCategory::Array).is_empty());
    }

    #[test]
    fn test_explicit_null_default_is_kept() {
        let doc = doc_with_tags(DocTags {
            default: Some(Value::Null),
            ..Default::default()
        });
        let annotations = Annotations::from_doc(Some(&doc), false);
        assert_eq!(annotations.default, Some(Value::Null));
        let mut out = Map::new();
        annotations.write_into(&mut out);
        assert!(out.contains_key("default"));
    }
}
