/// Result type alias for annotation parsing
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for annotation parsing
///
/// Grammar errors are scoped to a single record (route, param, response, tag
/// list, model) and never abort the surrounding file.
#[derive(Debug)]
pub enum Error {
    /// The line source handed to the symbol locator had no lines
    EmptyInput,
    /// A comment block was expected to carry `@route` but did not
    MissingRouteTag,
    /// `@route` did not split into operation id, verb and path
    MalformedRoute(String),
    /// `@param` was missing its name or type
    MalformedParam(String),
    /// `in:<value>` named a location outside path|query|form|header|body
    InvalidTransport(String),
    /// `@return` status code was not an integer
    InvalidStatusCode(String),
    /// `@return` had no tokens at all
    MalformedResponse,
    /// `@tag` had an empty argument
    EmptyTag,
    /// A comment block was expected to carry `@model` but did not
    MissingModelTag,
    /// `@model` was present but named nothing
    EmptyModelName,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "Lines array cannot be empty"),
            Error::MissingRouteTag => write!(f, "No @route tag found in comment block"),
            Error::MalformedRoute(line) => write!(
                f,
                "The tag @route is not in the correct format (expected `<operationId> <verb> <path>`): '{}'",
                line
            ),
            Error::MalformedParam(line) => write!(
                f,
                "The tag @param is not in the correct format (expected `<name> <type> ...`): '{}'",
                line
            ),
            Error::InvalidTransport(value) => write!(f, "Invalid transport '{}'", value),
            Error::InvalidStatusCode(value) => write!(f, "Invalid status code '{}'", value),
            Error::MalformedResponse => write!(f, "The tag @return requires a status code"),
            Error::EmptyTag => write!(f, "Tags cannot be empty"),
            Error::MissingModelTag => write!(f, "No @model tag found in comment block"),
            Error::EmptyModelName => write!(f, "The tag @model requires a model name"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transport_message() {
        let err = Error::InvalidTransport("foo".to_string());
        assert_eq!(err.to_string(), "Invalid transport 'foo'");
    }

    #[test]
    fn test_empty_tag_message() {
        assert_eq!(Error::EmptyTag.to_string(), "Tags cannot be empty");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = Error::MissingRouteTag.into();
        assert!(err.to_string().contains("@route"));
    }
}
