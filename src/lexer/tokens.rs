use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{ast::expressions::Literal, Span};

lazy_static! {
    /// Keywords, keyed by their lowercase spelling. Lookups lowercase the
    /// identifier first, so `FROM`, `From` and `from` all match.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("from", TokenKind::From);
        map.insert("where", TokenKind::Where);
        map.insert("take", TokenKind::Take);
        map.insert("add", TokenKind::Add);
        map.insert("to", TokenKind::To);
        map.insert("update", TokenKind::Update);
        map.insert("remove", TokenKind::Remove);
        map.insert("create", TokenKind::Create);
        map.insert("drop", TokenKind::Drop);
        map.insert("table", TokenKind::Table);
        map.insert("for", TokenKind::For);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("except", TokenKind::Except);
        map.insert("order", TokenKind::Order);
        map.insert("by", TokenKind::By);
        map.insert("limit", TokenKind::Limit);
        map.insert("count", TokenKind::Count);
        map.insert("exists", TokenKind::Exists);
        map.insert("or", TokenKind::Or);
        map.insert("descending", TokenKind::Descending);
        map
    };
}

/// Operator spellings, longest first so `->` never lexes as `-` then `>`.
pub const OPERATORS: [(&str, TokenKind); 14] = [
    ("->", TokenKind::Arrow),
    ("==", TokenKind::Operator),
    ("!=", TokenKind::Operator),
    (">=", TokenKind::Operator),
    ("<=", TokenKind::Operator),
    ("&&", TokenKind::Operator),
    ("||", TokenKind::Operator),
    ("+", TokenKind::Operator),
    ("-", TokenKind::Operator),
    ("*", TokenKind::Operator),
    ("/", TokenKind::Operator),
    ("%", TokenKind::Operator),
    (">", TokenKind::Operator),
    ("<", TokenKind::Operator),
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Boolean,
    Identifier,

    Arrow,
    Operator,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Comma,
    Colon,

    // Reserved
    From,
    Where,
    Take,
    Add,
    To,
    Update,
    Remove,
    Create,
    Drop,
    Table,
    For,
    If,
    Then,
    Else,
    Except,
    Order,
    By,
    Limit,
    Count,
    Exists,
    Or,
    Descending,
}

impl TokenKind {
    /// Single-character structural tokens.
    pub fn structural(ch: char) -> Option<TokenKind> {
        match ch {
            '{' => Some(TokenKind::OpenCurly),
            '}' => Some(TokenKind::CloseCurly),
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            _ => None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The token's text exactly as written in the source
    pub value: String,
    /// Decoded value for number, string and boolean tokens
    pub literal: Option<Literal>,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// The byte offset where this token starts.
    pub fn offset(&self) -> u32 {
        self.span.start.0
    }

    /// Whether this is the `*` wildcard operator.
    pub fn is_wildcard(&self) -> bool {
        self.kind == TokenKind::Operator && self.value == "*"
    }
}
