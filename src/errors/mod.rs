//! Error types and error handling for the query language.
//!
//! This module defines the error type shared by the lexer and the parser:
//!
//! - An error structure carrying the source position of the failure
//! - Specific error variants for lexing and parsing failures
//! - Classification into lex and parse errors
//! - Helpful error messages and suggestions

pub mod errors;
