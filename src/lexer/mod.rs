//! Lexical analysis module for the query language.
//!
//! This module contains the lexer (tokenizer) that converts query text
//! into a stream of tokens for parsing. It handles:
//!
//! - On-demand tokenization with buffered lookahead
//! - Recognition of keywords (case-insensitive), identifiers, literals and operators
//! - Generic type names such as `Auto<int>` as single identifier tokens
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
