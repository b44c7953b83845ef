//! Error types for the filter parser.

use thiserror::Error;

/// A specialized Result type for filter parsing operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur during filter parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter expression is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// An unexpected token was encountered during parsing.
    #[error("unexpected token: {token}")]
    UnexpectedToken {
        /// The unexpected token that was encountered.
        token: String,
    },

    /// An unexpected end of input was encountered.
    #[error("unexpected end of expression")]
    UnexpectedEndOfInput,

    /// A clause named a field that does not exist.
    #[error("unknown field: {field}{}", did_you_mean(.suggestion))]
    UnknownField {
        /// The unrecognized field name.
        field: String,
        /// The closest known field name, if any is close enough.
        suggestion: Option<String>,
    },

    /// A clause named an operator that does not exist.
    #[error("unknown operator: {operator}{}", did_you_mean(.suggestion))]
    UnknownOperator {
        /// The unrecognized operator.
        operator: String,
        /// The closest known operator name, if any is close enough.
        suggestion: Option<String>,
    },

    /// A binary operator was not followed by a value.
    #[error("operator '{operator}' requires a value")]
    MissingValue {
        /// The operator missing its operand.
        operator: String,
    },

    /// A quoted string was not closed.
    #[error("unterminated string starting at position {position}")]
    UnterminatedString {
        /// The byte position of the opening quote.
        position: usize,
    },

    /// A character that cannot start any token.
    #[error("unexpected character '{character}' at position {position}")]
    Lexer {
        /// The character that could not be tokenized.
        character: char,
        /// The byte position of the character.
        position: usize,
    },
}

impl FilterError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
        }
    }

    /// Creates an unknown field error.
    pub fn unknown_field(field: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownField {
            field: field.into(),
            suggestion,
        }
    }

    /// Creates an unknown operator error.
    pub fn unknown_operator(operator: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownOperator {
            operator: operator.into(),
            suggestion,
        }
    }

    /// Creates a missing value error.
    pub fn missing_value(operator: impl Into<String>) -> Self {
        FilterError::MissingValue {
            operator: operator.into(),
        }
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(". Did you mean '{}'?", s),
        None => String::new(),
    }
}
