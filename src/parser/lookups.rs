use std::collections::HashMap;

use crate::{
    ast::{ast::QueryBody, expressions::Expr, query::QueryFrom},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, query::parse_take_stmt, stmt::*};

/// Statement handlers receive the already parsed `from`/`for` clause, if any.
pub type StmtHandler = fn(&mut Parser, Option<QueryFrom>) -> Result<QueryBody, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals and symbols
    parser.nud(TokenKind::Number, parse_literal_expr);
    parser.nud(TokenKind::String, parse_literal_expr);
    parser.nud(TokenKind::Boolean, parse_literal_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Count, parse_function_call_expr);
    parser.nud(TokenKind::Exists, parse_function_call_expr);

    // Statements
    parser.stmt(TokenKind::Take, parse_take_stmt);
    parser.stmt(TokenKind::Add, parse_add_stmt);
    parser.stmt(TokenKind::Remove, parse_remove_stmt);
    parser.stmt(TokenKind::Update, parse_update_stmt);
    parser.stmt(TokenKind::Create, parse_create_table_stmt);
    parser.stmt(TokenKind::Drop, parse_drop_table_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
