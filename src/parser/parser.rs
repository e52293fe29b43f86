//! Parser implementation for building the query AST.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser pulls tokens from the lexer one at a time and keeps a single
//! token of lookahead. Grammar rules live in the sibling modules and are
//! reached through two lookup tables:
//!
//! - Statement handlers, keyed by the keyword that opens a statement
//! - NUD (null denotation) handlers for primary expressions

use std::{collections::HashMap, mem, rc::Rc};

use tracing::debug;

use crate::{
    ast::ast::QueryRoot,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{create_token_lookups, NUDHandler, NUDLookup, StmtHandler, StmtLookup},
    query::{parse_from_clause, parse_modifiers},
};

/// The main parser structure that maintains parsing state.
///
/// This struct owns the lexer, the current lookahead token and the lookup
/// tables for statements and primary expressions.
pub struct Parser {
    /// Token source
    lexer: Lexer,
    /// The single token of lookahead
    current: Token,
    /// The name of the source being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (primary) expression handlers
    nud_lookup: NUDLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// Pulls the first token from the lexer, so lexing errors at the very
    /// start of the input surface here.
    ///
    /// # Arguments
    ///
    /// * `lexer` - A fresh lexer over the source text
    ///
    /// # Returns
    ///
    /// A new Parser instance ready to parse the token stream.
    pub fn new(mut lexer: Lexer) -> Result<Self, Error> {
        let current = lexer.next_token()?;
        let file = lexer.file();

        Ok(Parser {
            lexer,
            current,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
        })
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    /// Advances only if the current token is of the given kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(true) if a token was consumed.
    pub fn match_kind(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.current.kind == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return if expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        expected: expected_kind,
                        received: self.current.kind,
                    },
                    self.get_position(),
                )),
            }
        } else {
            self.advance()
        }
    }

    /// Expects a token of the specified kind with default error message.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns a
    /// "expected X, got Y" error at the current offset.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an error describing the current token as out of place.
    ///
    /// # Arguments
    ///
    /// * `message` - What the grammar expected at this point
    pub fn unexpected(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current.value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Expects an identifier naming a field, failing with `message` otherwise.
    ///
    /// Reserved words get their own message since `take { from }` would
    /// otherwise read as a plain syntax error.
    pub fn expect_field_name(&mut self, message: &str) -> Result<Token, Error> {
        if self.current.kind.is_keyword() {
            return Err(self.unexpected("keywords cannot be used as field names"));
        }

        let error = self.unexpected(message);
        self.expect_error(TokenKind::Identifier, Some(error))
    }

    /// Checks if there are more tokens to parse.
    ///
    /// # Returns
    ///
    /// Returns true if the current token is not EOF.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Registers a null denotation (primary) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `nud_fn` - The handler function for this primary expression
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The keyword that opens the statement
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        Position(self.current.offset(), Rc::clone(&self.file))
    }
}

/// Parses a complete query or mutation into a `QueryRoot`.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, then parses the optional `from`/`for`
/// clause, exactly one statement, and the trailing modifiers up to EOF.
///
/// # Arguments
///
/// * `lexer` - A fresh lexer over the source text
///
/// # Returns
///
/// The root of the AST, or the first lexing or parsing error encountered.
pub fn parse(lexer: Lexer) -> Result<QueryRoot, Error> {
    let mut parser = Parser::new(lexer)?;
    create_token_lookups(&mut parser);

    let from = if parser.current_token().is_one_of_many(&[TokenKind::From, TokenKind::For]) {
        Some(parse_from_clause(&mut parser)?)
    } else {
        None
    };

    let kind = parser.current_token_kind();
    let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() else {
        return Err(parser.unexpected(
            "expected `take`, `add`, `remove`, `update`, `create` or `drop`",
        ));
    };

    debug!(statement = %kind, has_source = from.is_some(), "parsing statement");
    let body = handler(&mut parser, from)?;
    let modifiers = parse_modifiers(&mut parser)?;

    Ok(QueryRoot { body, modifiers })
}
