//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms the
//! lexer's token stream into a `QueryRoot`. It handles:
//!
//! - The shared `from`/`for` clause and `take` queries with selection blocks
//! - Mutation statements (`add`, `remove`, `update`, `create table`, `drop table`)
//! - Flat, left-associative expressions
//! - Trailing `order by` and `limit` modifiers
//!
//! Parsing is fail-fast: the first malformed token ends the parse with an error.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod query;
pub mod stmt;

#[cfg(test)]
mod tests;
