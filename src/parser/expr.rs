use crate::{
    ast::expressions::{BinaryOperator, BuiltinFunction, Expr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Parses an expression.
///
/// There is no precedence: every operator folds into the left operand as it
/// is met, so `1 + 2 * 3` is `(1 + 2) * 3`.
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.current_token_kind() == TokenKind::If {
        return parse_conditional_expr(parser);
    }

    let mut left = parse_primary_expr(parser)?;

    while parser.current_token_kind() == TokenKind::Operator {
        let operator_token = parser.advance()?;
        let Some(operator) = BinaryOperator::from_symbol(&operator_token.value) else {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: operator_token.value,
                    message: String::from("unknown binary operator"),
                },
                operator_token.span.start,
            ));
        };

        let right = parse_primary_expr(parser)?;
        left = Expr::binary(left, operator, right);
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    let Some(handler) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expected an identifier, literal or function call"));
    };

    handler(parser)
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance()?;
    match token.literal {
        Some(literal) => Ok(Expr::Literal(literal)),
        None => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value,
                message: String::from("expected a literal value"),
            },
            token.span.start,
        )),
    }
}

/// `a->b->c` collapses into the single path `Identifier("a->b->c")`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut path = parser.expect(TokenKind::Identifier)?.value;

    while parser.match_kind(TokenKind::Arrow)? {
        let segment = parser.expect(TokenKind::Identifier)?;
        path.push_str("->");
        path.push_str(&segment.value);
    }

    Ok(Expr::Identifier(path))
}

pub fn parse_function_call_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let function = match parser.advance()?.kind {
        TokenKind::Exists => BuiltinFunction::Exists,
        _ => BuiltinFunction::Count,
    };

    parser.expect(TokenKind::OpenParen)?;

    let argument = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(Box::new(parse_expr(parser)?))
    } else {
        None
    };

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::FunctionCall { function, argument })
}

pub fn parse_conditional_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::If)?;
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::Then)?;
    let then_branch = parse_expr(parser)?;
    parser.expect(TokenKind::Else)?;
    let else_branch = parse_expr(parser)?;

    Ok(Expr::Conditional {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    })
}
