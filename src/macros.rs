//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span between two byte offsets of the lexer's source
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$literal` - The decoded literal value, if any
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), Some(Literal::Integer(42)), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $literal:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            literal: $literal,
            span: $span,
        }
    };
}

/// Creates a Span from `$start` to `$end`, tagged with the lexer's source name.
///
/// # Example
///
/// ```ignore
/// let span = MK_SPAN!(lexer, start, lexer.pos);
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($lexer:expr, $start:expr, $end:expr) => {
        Span {
            start: Position($start as u32, Rc::clone(&$lexer.file)),
            end: Position($end as u32, Rc::clone(&$lexer.file)),
        }
    };
}
