use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// Which stage of the pipeline rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at offset {}", .position.0)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnbalancedGeneric { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::PeekPastEof { .. } => ErrorKind::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::MissingQuerySource
            | ErrorImpl::NestedExcept
            | ErrorImpl::ConflictingOrderBy { .. }
            | ErrorImpl::InvalidLimit { .. } => ErrorKind::Parse,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnbalancedGeneric { .. } => "UnbalancedGeneric",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::PeekPastEof { .. } => "PeekPastEof",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::MissingQuerySource => "MissingQuerySource",
            ErrorImpl::NestedExcept => "NestedExcept",
            ErrorImpl::ConflictingOrderBy { .. } => "ConflictingOrderBy",
            ErrorImpl::InvalidLimit { .. } => "InvalidLimit",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing quote"))
            }
            ErrorImpl::UnbalancedGeneric { identifier } => ErrorTip::Suggestion(format!(
                "Generic type `{}` never closes its `<`, add the missing `>`",
                identifier
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::PeekPastEof { depth } => ErrorTip::Suggestion(format!(
                "Lookahead of depth {} reaches past the end of input",
                depth
            )),
            ErrorImpl::UnexpectedToken { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {}, got {}",
                expected, received
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::MissingQuerySource => ErrorTip::Suggestion(String::from(
                "`take` needs a source, start the query with `from <table>` or `for <table>`",
            )),
            ErrorImpl::NestedExcept => ErrorTip::Suggestion(String::from(
                "An `except` block cannot contain another `except` block",
            )),
            ErrorImpl::ConflictingOrderBy { first, second } => ErrorTip::Suggestion(format!(
                "Query is already ordered by `{}`, cannot also order by `{}`",
                first, second
            )),
            ErrorImpl::InvalidLimit { token } => ErrorTip::Suggestion(format!(
                "Limit `{}` must be a whole, non-negative number",
                token
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexing
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unbalanced generic brackets in {identifier:?}")]
    UnbalancedGeneric { identifier: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("cannot peek {depth} tokens ahead, input ends first")]
    PeekPastEof { depth: usize },

    // Parsing
    #[error("expected {expected}, got {received}")]
    UnexpectedToken {
        expected: TokenKind,
        received: TokenKind,
    },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("`take` requires a preceding `from` or `for` clause")]
    MissingQuerySource,
    #[error("`except` blocks cannot be nested")]
    NestedExcept,
    #[error("conflicting `order by` fields: {first:?} and {second:?}")]
    ConflictingOrderBy { first: String, second: String },
    #[error("invalid limit: {token:?}")]
    InvalidLimit { token: String },
}
