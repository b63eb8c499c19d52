//! Model records built from a `@model` directive and the type declaration that follows it.

use crate::error::{Error, Result};
use crate::routes::RecordContext;
use crate::tags::{TagName, TagTable};
use log::debug;
use std::path::PathBuf;

/// One data schema with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub name: String,
    pub description: Option<String>,
    pub source_file: PathBuf,
    pub line_number: usize,
    pub fields: Vec<ModelField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelField {
    pub name: String,
    pub field_type: FieldType,
}

/// Schema type of a model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Number,
    String,
    Boolean,
    /// `[]T` where `T` is not a primitive, referenced by its unqualified name
    Array(String),
    /// Any other type, referenced by its unqualified name
    Object(String),
}

impl FieldType {
    /// Classifies a declared field type token.
    ///
    /// Leading `[]` and `*` markers are stripped, with `[]` marking the field as an array,
    /// and a qualified name such as `time.Time` is reduced to its final segment. Primitive
    /// names win over the array marker, so `[]string` is a plain `String`.
    pub fn from_token(token: &str) -> FieldType {
        let mut rest = token;
        let mut is_array = false;
        loop {
            if let Some(element) = rest.strip_prefix("[]") {
                is_array = true;
                rest = element;
            } else if let Some(pointee) = rest.strip_prefix('*') {
                rest = pointee;
            } else {
                break;
            }
        }

        let name = rest.rsplit('.').next().unwrap_or(rest);

        if name.starts_with("float") {
            FieldType::Number
        } else if name.starts_with("int") {
            FieldType::Integer
        } else if name == "string" {
            FieldType::String
        } else if name == "bool" {
            FieldType::Boolean
        } else if is_array {
            FieldType::Array(name.to_string())
        } else {
            FieldType::Object(name.to_string())
        }
    }

    /// The schema `type` name; `None` for object references, which are emitted as `$ref`.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            FieldType::Integer => Some("integer"),
            FieldType::Number => Some("number"),
            FieldType::String => Some("string"),
            FieldType::Boolean => Some("boolean"),
            FieldType::Array(_) => Some("array"),
            FieldType::Object(_) => None,
        }
    }

    /// The referenced model name, for object references and arrays of them.
    pub fn reference(&self) -> Option<&str> {
        match self {
            FieldType::Object(name) | FieldType::Array(name) => Some(name),
            _ => None,
        }
    }
}

/// Lexical markers of the annotated type declaration.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationSyntax<'a> {
    /// Keyword opening a type declaration, e.g. `"type "`
    pub keyword: &'a str,
    /// Single-line comment prefix; such lines inside the body are skipped
    pub comment_prefix: &'a str,
}

/// Builds a [`Model`] from a block's tag table and the field lines that follow it.
///
/// Scanning starts at `context.line_number`. Blank lines, the declaration line and
/// comment lines are skipped; the scan stops at a line that is exactly `}` once trimmed,
/// or at end of file. Each remaining line contributes one field from its first two
/// tokens; further tokens (struct tags and the like) are ignored, and single-token
/// lines (embedded types) are skipped.
///
/// # Errors
///
/// [`Error::MissingModelTag`] without `@model`, [`Error::EmptyModelName`] when it names
/// nothing.
pub fn parse_model(
    table: &TagTable,
    lines: &[String],
    context: RecordContext<'_>,
    syntax: DeclarationSyntax<'_>,
) -> Result<Model> {
    let argument = table.first(TagName::Model).ok_or(Error::MissingModelTag)?;
    let name = argument
        .split_whitespace()
        .next()
        .ok_or(Error::EmptyModelName)?;

    let comment_marker = syntax.comment_prefix.trim();
    let mut fields = Vec::new();

    for line in lines.iter().skip(context.line_number) {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if line.trim_start().starts_with(syntax.keyword) {
            continue;
        }
        if trimmed == "}" {
            break;
        }
        if !comment_marker.is_empty() && trimmed.starts_with(comment_marker) {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let (Some(field_name), Some(type_token)) = (tokens.next(), tokens.next()) else {
            debug!(
                "{}: skipping line without a field type in model {}: '{}'",
                context.location(),
                name,
                trimmed
            );
            continue;
        };

        fields.push(ModelField {
            name: field_name.to_string(),
            field_type: FieldType::from_token(type_token),
        });
    }

    Ok(Model {
        name: name.to_string(),
        description: table.description(),
        source_file: context.source_file.to_path_buf(),
        line_number: context.line_number,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::lex_tags;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const GO: DeclarationSyntax<'static> = DeclarationSyntax {
        keyword: "type ",
        comment_prefix: "// ",
    };

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn context(line_number: usize) -> RecordContext<'static> {
        RecordContext {
            source_file: Path::new("some/file/path"),
            line_number,
        }
    }

    #[test]
    fn test_parse_model_fields() {
        let source = lines(&[
            "// @model foo",
            "type Foo struct {",
            "",
            "  FooProp1 int",
            "  FooProp2 string",
            "  FooProp3 float",
            "  FooProp4WExtra string somethingElse",
            "}",
        ]);
        let table = lex_tags(&["@model foo"]);

        let model = parse_model(&table, &source, context(1), GO).unwrap();

        assert_eq!(model.name, "foo");
        let fields: Vec<(&str, FieldType)> = model
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type.clone()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("FooProp1", FieldType::Integer),
                ("FooProp2", FieldType::String),
                ("FooProp3", FieldType::Number),
                ("FooProp4WExtra", FieldType::String),
            ]
        );
    }

    #[test]
    fn test_parse_model_missing_tag() {
        let table = lex_tags(&["@route A GET /a"]);

        let result = parse_model(&table, &lines(&["type A struct {", "}"]), context(0), GO);

        assert!(matches!(result, Err(Error::MissingModelTag)));
    }

    #[test]
    fn test_parse_model_empty_name() {
        let table = lex_tags(&["@model"]);

        let result = parse_model(&table, &lines(&["type A struct {", "}"]), context(0), GO);

        assert!(matches!(result, Err(Error::EmptyModelName)));
    }

    #[test]
    fn test_parse_model_references_and_arrays() {
        let source = lines(&[
            "type Task struct {",
            "\tOwner     *User `json:\"owner\"`",
            "\tCreatedAt time.Time",
            "\tLabels    []string",
            "\tWatchers  []models.User",
            "\tDone      bool",
            "}",
        ]);
        let table = lex_tags(&["@model Task"]);

        let model = parse_model(&table, &source, context(0), GO).unwrap();

        let types: Vec<FieldType> = model.fields.iter().map(|f| f.field_type.clone()).collect();
        assert_eq!(
            types,
            vec![
                FieldType::Object("User".to_string()),
                FieldType::Object("Time".to_string()),
                FieldType::String,
                FieldType::Array("User".to_string()),
                FieldType::Boolean,
            ]
        );
        assert_eq!(model.fields[3].field_type.reference(), Some("User"));
        assert_eq!(model.fields[2].field_type.reference(), None);
    }

    #[test]
    fn test_parse_model_skips_comments_and_embedded_types() {
        let source = lines(&[
            "type Audit struct {",
            "    // when it happened",
            "    Base",
            "    At int64",
            "}",
            "func unrelated() {}",
        ]);
        let table = lex_tags(&["@model Audit"]);

        let model = parse_model(&table, &source, context(0), GO).unwrap();

        assert_eq!(model.fields.len(), 1);
        assert_eq!(model.fields[0].name, "At");
    }

    #[test]
    fn test_parse_model_stops_at_end_of_file() {
        let source = lines(&["type Open struct {", "    A int"]);
        let table = lex_tags(&["@model Open"]);

        let model = parse_model(&table, &source, context(0), GO).unwrap();

        assert_eq!(model.fields.len(), 1);
    }

    #[test]
    fn test_parse_model_description() {
        let table = lex_tags(&["Foo is a thing", "@model Foo"]);

        let model = parse_model(&table, &lines(&["}"]), context(0), GO).unwrap();

        assert_eq!(model.description, Some("Foo is a thing".to_string()));
        assert!(model.fields.is_empty());
    }

    #[test]
    fn test_field_type_prefix_rules() {
        assert_eq!(FieldType::from_token("int64"), FieldType::Integer);
        assert_eq!(FieldType::from_token("float64"), FieldType::Number);
        assert_eq!(FieldType::from_token("pkg.string"), FieldType::String);
        assert_eq!(FieldType::from_token("Stringer"), FieldType::Object("Stringer".to_string()));
        assert_eq!(FieldType::Array("X".to_string()).type_name(), Some("array"));
        assert_eq!(FieldType::Object("X".to_string()).type_name(), None);
    }

    #[test]
    fn test_field_type_primitive_wins_over_array_marker() {
        assert_eq!(FieldType::from_token("[]string"), FieldType::String);
        assert_eq!(FieldType::from_token("[]int64"), FieldType::Integer);
        assert_eq!(FieldType::from_token("[]float32"), FieldType::Number);
        assert_eq!(FieldType::from_token("[]*models.User"), FieldType::Array("User".to_string()));
        assert_eq!(FieldType::from_token("*User"), FieldType::Object("User".to_string()));
    }

    #[test]
    fn test_field_type_long_array_marker_run() {
        let token = format!("{}Node", "[]".repeat(100_000));

        assert_eq!(FieldType::from_token(&token), FieldType::Array("Node".to_string()));
    }
}
