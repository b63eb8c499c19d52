//! Route records built from `@route`, `@param`, `@return` and `@tag` directives.

use crate::error::{Error, Result};
use crate::tags::{TagName, TagTable};
use log::warn;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

/// Number of optional modifier tokens (`in:<location>`, `required`, `optional`) accepted
/// after a param's name and type.
const MODIFIER_SLOTS: usize = 2;

const TRANSPORT_PREFIX: &str = "in:";

/// Schema reference meaning "no body".
const EMPTY_SCHEMA: &str = "empty";

/// Source position of the declaration an annotation block documents.
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub source_file: &'a Path,
    /// Zero-based index of the first line after the comment block
    pub line_number: usize,
}

impl RecordContext<'_> {
    /// `file:line` with a one-based line number, for log output.
    pub fn location(&self) -> String {
        format!("{}:{}", self.source_file.display(), self.line_number + 1)
    }
}

/// One API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub operation_id: String,
    /// HTTP verb as written in the annotation
    pub verb: String,
    pub path: String,
    pub description: Option<String>,
    pub params: Vec<Param>,
    pub responses: Vec<Response>,
    pub tags: Vec<String>,
    pub source_file: PathBuf,
    pub line_number: usize,
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    Path,
    #[default]
    Query,
    Form,
    Header,
    Body,
}

impl ParamLocation {
    /// Parses the value of an `in:<value>` modifier.
    pub fn from_name(name: &str) -> Option<ParamLocation> {
        match name {
            "path" => Some(ParamLocation::Path),
            "query" => Some(ParamLocation::Query),
            "form" => Some(ParamLocation::Form),
            "header" => Some(ParamLocation::Header),
            "body" => Some(ParamLocation::Body),
            _ => None,
        }
    }

    /// The OpenAPI 2.0 `in` value.
    pub fn as_openapi(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Form => "formData",
            ParamLocation::Header => "header",
            ParamLocation::Body => "body",
        }
    }
}

/// A param's declared type: a primitive, or a name resolved against models at assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    Number,
    String,
    Boolean,
    Reference(String),
}

impl ParamType {
    pub fn from_token(token: &str) -> ParamType {
        if token.starts_with("int") {
            ParamType::Integer
        } else if token == "bool" {
            ParamType::Boolean
        } else if token == "string" {
            ParamType::String
        } else if token.starts_with("float") {
            ParamType::Number
        } else {
            ParamType::Reference(token.to_string())
        }
    }

    /// The primitive schema type name, or the reference name.
    pub fn name(&self) -> &str {
        match self {
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
            ParamType::Reference(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub param_type: ParamType,
    pub location: ParamLocation,
    pub required: bool,
    pub description: String,
}

/// A named model reference, optionally marked "array of" with a leading `[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRef {
    pub name: String,
    pub is_array: bool,
}

impl SchemaRef {
    /// Parses a `@return` schema token. `empty` (and a bare `[]`) mean no schema.
    pub fn parse(token: &str) -> Option<SchemaRef> {
        if token == EMPTY_SCHEMA {
            return None;
        }
        let (name, is_array) = match token.strip_prefix("[]") {
            Some(inner) => (inner, true),
            None => (token, false),
        };
        if name.is_empty() {
            return None;
        }
        Some(SchemaRef {
            name: name.to_string(),
            is_array,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub schema_ref: Option<SchemaRef>,
    pub description: String,
}

enum Modifier {
    Location(ParamLocation),
    Required(bool),
}

impl Modifier {
    /// `Ok(None)` when `token` is not a modifier and so starts the description.
    fn parse(token: &str) -> Result<Option<Modifier>> {
        if let Some(value) = token.strip_prefix(TRANSPORT_PREFIX) {
            return ParamLocation::from_name(value)
                .map(|location| Some(Modifier::Location(location)))
                .ok_or_else(|| Error::InvalidTransport(value.to_string()));
        }
        match token {
            "required" => Ok(Some(Modifier::Required(true))),
            "optional" => Ok(Some(Modifier::Required(false))),
            _ => Ok(None),
        }
    }
}

fn rest(tokens: Peekable<SplitWhitespace<'_>>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

/// Parses `<name> <type> [in:<location>] [required|optional] [description...]`.
///
/// The two modifier slots may appear in either order; the first token that is not a
/// modifier, or the token after the second slot, starts the description.
pub fn parse_param(argument: &str) -> Result<Param> {
    let mut tokens = argument.split_whitespace().peekable();

    let (Some(name), Some(type_token)) = (tokens.next(), tokens.next()) else {
        return Err(Error::MalformedParam(argument.to_string()));
    };

    let mut param = Param {
        name: name.to_string(),
        param_type: ParamType::from_token(type_token),
        location: ParamLocation::default(),
        required: true,
        description: String::new(),
    };

    for _ in 0..MODIFIER_SLOTS {
        let Some(token) = tokens.peek() else {
            break;
        };
        match Modifier::parse(token)? {
            Some(Modifier::Location(location)) => param.location = location,
            Some(Modifier::Required(required)) => param.required = required,
            None => break,
        }
        tokens.next();
    }

    param.description = rest(tokens);
    Ok(param)
}

/// Parses `<statusCode> [schemaRef] [description...]`.
pub fn parse_response(argument: &str) -> Result<Response> {
    let mut tokens = argument.split_whitespace().peekable();

    let code = tokens.next().ok_or(Error::MalformedResponse)?;
    let status_code = code
        .parse::<u16>()
        .map_err(|_| Error::InvalidStatusCode(code.to_string()))?;

    let schema_ref = tokens.next().and_then(SchemaRef::parse);

    Ok(Response {
        status_code,
        schema_ref,
        description: rest(tokens),
    })
}

/// Parses a comma-separated `@tag` list.
pub fn parse_tag_list(argument: &str) -> Result<Vec<String>> {
    if argument.is_empty() {
        return Err(Error::EmptyTag);
    }

    let tags: Vec<String> = argument
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    if tags.is_empty() {
        return Err(Error::EmptyTag);
    }
    Ok(tags)
}

/// Builds a [`Route`] from a block's tag table.
///
/// Only the first `@route` argument is consulted. Params, responses and tag lists that
/// fail to parse are logged and dropped without failing the route; when several `@tag`
/// lines parse, the last one wins.
///
/// # Errors
///
/// [`Error::MissingRouteTag`] without `@route`, [`Error::MalformedRoute`] when the
/// route line has fewer than three fields.
pub fn parse_route(table: &TagTable, context: RecordContext<'_>) -> Result<Route> {
    let line = table.first(TagName::Route).ok_or(Error::MissingRouteTag)?;

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [operation_id, verb, path, ..] = &fields[..] else {
        return Err(Error::MalformedRoute(line.to_string()));
    };

    let mut route = Route {
        operation_id: operation_id.to_string(),
        verb: verb.to_string(),
        path: path.to_string(),
        description: table.description(),
        params: Vec::new(),
        responses: Vec::new(),
        tags: Vec::new(),
        source_file: context.source_file.to_path_buf(),
        line_number: context.line_number,
    };

    for argument in table.get(TagName::Param) {
        match parse_param(argument) {
            Ok(param) => route.params.push(param),
            Err(e) => warn!(
                "{}: dropping @param '{}' of {}: {}",
                context.location(),
                argument,
                route.operation_id,
                e
            ),
        }
    }

    for argument in table.get(TagName::Return) {
        match parse_response(argument) {
            Ok(response) => route.responses.push(response),
            Err(e) => warn!(
                "{}: dropping @return '{}' of {}: {}",
                context.location(),
                argument,
                route.operation_id,
                e
            ),
        }
    }

    for argument in table.get(TagName::Tag) {
        match parse_tag_list(argument) {
            Ok(tags) => route.tags = tags,
            Err(e) => warn!(
                "{}: ignoring @tag of {}: {}",
                context.location(),
                route.operation_id,
                e
            ),
        }
    }

    Ok(route)
}
