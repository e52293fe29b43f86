//! Read-query grammar.
//!
//! ```text
//! from games where year > 2000
//! take studio->games(rating >= 8) { title, studio { * except { address } } }
//! order by title descending
//! limit 10
//! ```
//!
//! Covers the shared `from`/`for` clause, `take` with its optional root path
//! and selection block, and the trailing `order by`/`limit` modifiers.

use tracing::debug;

use crate::{
    ast::{
        ast::{LimitModifier, Modifier, OrderByModifier, QueryBody},
        expressions::Literal,
        query::{
            FilterBlock, PathExpression, PathSegment, QueryFrom, QueryTake, SelectionBlock,
            SelectionEntry, SelectionExcept, SelectionItem,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, parser::Parser};

/// `from|for <source> [where <expr>]`
pub fn parse_from_clause(parser: &mut Parser) -> Result<QueryFrom, Error> {
    parser.advance()?;

    let source_name = parser.expect(TokenKind::Identifier)?.value;
    let where_clause = if parser.match_kind(TokenKind::Where)? {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    Ok(QueryFrom {
        source_name,
        where_clause,
    })
}

pub fn parse_take_stmt(parser: &mut Parser, from: Option<QueryFrom>) -> Result<QueryBody, Error> {
    let Some(from) = from else {
        return Err(Error::new(ErrorImpl::MissingQuerySource, parser.get_position()));
    };

    parser.expect(TokenKind::Take)?;

    let root_path = if parser.current_token_kind() == TokenKind::Identifier {
        Some(parse_path_expr(parser)?)
    } else {
        None
    };

    let selection = parse_selection_block(parser, false)?;

    Ok(QueryBody::Query {
        from,
        take: QueryTake {
            root_path,
            selection,
        },
    })
}

pub fn parse_path_expr(parser: &mut Parser) -> Result<PathExpression, Error> {
    let mut segments = vec![parse_path_segment(parser)?];

    while parser.match_kind(TokenKind::Arrow)? {
        segments.push(parse_path_segment(parser)?);
    }

    Ok(PathExpression { segments })
}

fn parse_path_segment(parser: &mut Parser) -> Result<PathSegment, Error> {
    let field = parser.expect(TokenKind::Identifier)?.value;

    let filter = if parser.current_token_kind() == TokenKind::OpenParen {
        Some(parse_filter_block(parser)?)
    } else {
        None
    };

    Ok(PathSegment { field, filter })
}

pub fn parse_filter_block(parser: &mut Parser) -> Result<FilterBlock, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut conditions = vec![parse_expr(parser)?];
    while parser.match_kind(TokenKind::Comma)? {
        conditions.push(parse_expr(parser)?);
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(FilterBlock { conditions })
}

/// Parses `{ ... }`. `in_except` is set for the contents of an `except`
/// block and everything nested below it.
pub fn parse_selection_block(parser: &mut Parser, in_except: bool) -> Result<SelectionBlock, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut entries = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token().is_wildcard() {
            parser.advance()?;

            if parser.current_token_kind() == TokenKind::Except {
                if in_except {
                    return Err(Error::new(ErrorImpl::NestedExcept, parser.get_position()));
                }
                parser.advance()?;

                let block = parse_selection_block(parser, true)?;
                entries.push(SelectionItem::Except(SelectionExcept { block }));
            } else {
                entries.push(SelectionItem::Entry(SelectionEntry {
                    field: String::from(SelectionEntry::WILDCARD),
                    nested: None,
                }));
            }
        } else {
            let field = parser
                .expect_field_name("expected field name or `*` in selection block")?
                .value;

            let nested = if parser.current_token_kind() == TokenKind::OpenCurly {
                Some(parse_selection_block(parser, in_except)?)
            } else {
                None
            };

            entries.push(SelectionItem::Entry(SelectionEntry { field, nested }));
        }

        parser.match_kind(TokenKind::Comma)?;
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(SelectionBlock { entries })
}

/// Parses `order by` and `limit` clauses until EOF.
///
/// Clauses may repeat and interleave; all are kept in source order. Two
/// `order by` clauses naming different fields are rejected.
pub fn parse_modifiers(parser: &mut Parser) -> Result<Vec<Modifier>, Error> {
    let mut modifiers = vec![];
    let mut ordered_by: Option<String> = None;

    while parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::Order => {
                parser.advance()?;
                parser.expect(TokenKind::By)?;

                let position = parser.get_position();
                let field = parser.expect(TokenKind::Identifier)?.value;
                let descending = parser.match_kind(TokenKind::Descending)?;

                if let Some(first) = &ordered_by {
                    if *first != field {
                        return Err(Error::new(
                            ErrorImpl::ConflictingOrderBy {
                                first: first.clone(),
                                second: field,
                            },
                            position,
                        ));
                    }
                }

                debug!(field = %field, descending, "parsed order by");
                ordered_by = Some(field.clone());
                modifiers.push(Modifier::OrderBy(OrderByModifier { field, descending }));
            }
            TokenKind::Limit => {
                parser.advance()?;
                let token = parser.expect(TokenKind::Number)?;

                let count = match token.literal {
                    Some(Literal::Integer(count)) => usize::try_from(count).ok(),
                    _ => None,
                };
                let Some(count) = count else {
                    return Err(Error::new(
                        ErrorImpl::InvalidLimit { token: token.value },
                        token.span.start,
                    ));
                };

                debug!(count, "parsed limit");
                modifiers.push(Modifier::Limit(LimitModifier { count }));
            }
            _ => {
                return Err(parser.unexpected("expected `order by`, `limit` or end of input"));
            }
        }
    }

    Ok(modifiers)
}
