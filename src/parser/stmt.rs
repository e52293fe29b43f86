use tracing::debug;

use crate::{
    ast::{
        ast::QueryBody,
        expressions::Expr,
        query::QueryFrom,
        statements::{
            AddBatchStatement, AddStatement, Assignment, AssignmentBlock, CreateTableStatement,
            DropTableStatement, RemoveStatement, Statement, TableField, UpdateStatement,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, parser::Parser};

fn split_source(from: Option<QueryFrom>) -> (Option<String>, Option<Expr>) {
    match from {
        Some(from) => (Some(from.source_name), from.where_clause),
        None => (None, None),
    }
}

pub fn parse_assignment_block(parser: &mut Parser) -> Result<AssignmentBlock, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut entries = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let field = parser.expect_field_name("expected field name in assignment block")?.value;
        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser)?;

        entries.push(Assignment { field, value });

        parser.match_kind(TokenKind::Comma)?;
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(AssignmentBlock { entries })
}

pub fn parse_add_stmt(parser: &mut Parser, from: Option<QueryFrom>) -> Result<QueryBody, Error> {
    parser.expect(TokenKind::Add)?;
    parser.expect(TokenKind::To)?;

    let target = parser.expect(TokenKind::Identifier)?.value;
    let (source_name, where_clause) = split_source(from);

    if parser.match_kind(TokenKind::OpenBracket)? {
        let mut blocks = vec![];
        while parser.current_token_kind() != TokenKind::CloseBracket {
            blocks.push(parse_assignment_block(parser)?);
            parser.match_kind(TokenKind::Comma)?;
        }
        parser.expect(TokenKind::CloseBracket)?;

        debug!(target = %target, rows = blocks.len(), "parsed batch add");
        return Ok(QueryBody::Mutation(Statement::AddBatch(AddBatchStatement {
            source_name,
            where_clause,
            target,
            blocks,
        })));
    }

    let assignments = parse_assignment_block(parser)?;

    Ok(QueryBody::Mutation(Statement::Add(AddStatement {
        source_name,
        where_clause,
        target,
        assignments,
    })))
}

pub fn parse_remove_stmt(parser: &mut Parser, from: Option<QueryFrom>) -> Result<QueryBody, Error> {
    parser.expect(TokenKind::Remove)?;

    // `remove from people` and `remove people` are the same statement
    parser.match_kind(TokenKind::From)?;
    let target = parser.expect(TokenKind::Identifier)?.value;

    let where_clause = if parser.match_kind(TokenKind::Where)? {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    Ok(QueryBody::Mutation(Statement::Remove(RemoveStatement {
        source: from,
        target,
        where_clause,
    })))
}

pub fn parse_update_stmt(parser: &mut Parser, from: Option<QueryFrom>) -> Result<QueryBody, Error> {
    parser.expect(TokenKind::Update)?;

    let else_add = if parser.match_kind(TokenKind::Or)? {
        parser.expect(TokenKind::Add)?;
        true
    } else {
        false
    };

    let assignments = parse_assignment_block(parser)?;
    let (source_name, where_clause) = split_source(from);

    Ok(QueryBody::Mutation(Statement::Update(UpdateStatement {
        source_name,
        where_clause,
        assignments,
        else_add,
    })))
}

pub fn parse_create_table_stmt(
    parser: &mut Parser,
    from: Option<QueryFrom>,
) -> Result<QueryBody, Error> {
    parser.expect(TokenKind::Create)?;
    parser.expect(TokenKind::Table)?;

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        fields.push(parse_table_field(parser)?);
        parser.match_kind(TokenKind::Comma)?;
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(QueryBody::Mutation(Statement::CreateTable(CreateTableStatement {
        source: from,
        name,
        fields,
    })))
}

fn parse_table_field(parser: &mut Parser) -> Result<TableField, Error> {
    let name = parser.expect_field_name("expected field name in table definition")?.value;
    parser.expect(TokenKind::Colon)?;
    let type_name = parser.expect(TokenKind::Identifier)?.value;

    // `pk` is a plain identifier rather than a keyword
    let is_primary_key = parser.current_token_kind() == TokenKind::Identifier
        && parser.current_token().value.eq_ignore_ascii_case("pk");
    if is_primary_key {
        parser.advance()?;
    }

    Ok(TableField {
        name,
        type_name,
        is_primary_key,
    })
}

pub fn parse_drop_table_stmt(
    parser: &mut Parser,
    from: Option<QueryFrom>,
) -> Result<QueryBody, Error> {
    parser.expect(TokenKind::Drop)?;
    parser.expect(TokenKind::Table)?;

    let name = parser.expect(TokenKind::Identifier)?.value;

    Ok(QueryBody::Mutation(Statement::DropTable(DropTableStatement {
        source: from,
        name,
    })))
}
