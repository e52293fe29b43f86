use std::{collections::VecDeque, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    ast::expressions::Literal,
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, OPERATORS, RESERVED_LOOKUP};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
    static ref NUMBER: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?").unwrap();
    static ref IDENTIFIER: Regex = Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*").unwrap();
}

/// On-demand tokenizer with arbitrary-depth lookahead.
///
/// Tokens are scanned lazily. Peeked tokens are parked in a ring buffer and
/// handed out by `next_token` before any new scanning happens.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    /// Byte offset of the scan cursor
    pos: usize,
    file: Rc<String>,
    lookahead: VecDeque<Token>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
            lookahead: VecDeque::new(),
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Consumes and returns the next token.
    ///
    /// Once the input is exhausted every call returns an `EOF` token.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        if let Some(token) = self.lookahead.pop_front() {
            return Ok(token);
        }
        self.scan_token()
    }

    /// Returns the token `depth` positions ahead (0 is the next token) without
    /// consuming anything.
    ///
    /// Fails with `PeekPastEof` if that position holds the `EOF` token or lies
    /// beyond it, so `peek_token(0)` on an exhausted lexer is an error. Use
    /// `try_peek_token` to probe without failing.
    pub fn peek_token(&mut self, depth: usize) -> Result<Token, Error> {
        match self.try_peek_token(depth)? {
            Some(token) => Ok(token),
            None => Err(Error::new(
                ErrorImpl::PeekPastEof { depth },
                Position(self.source.len() as u32, Rc::clone(&self.file)),
            )),
        }
    }

    /// Like `peek_token`, but yields `None` at or beyond the end of input.
    ///
    /// Lexing errors in the tokens realized along the way still propagate.
    pub fn try_peek_token(&mut self, depth: usize) -> Result<Option<Token>, Error> {
        while self.lookahead.len() <= depth {
            if self
                .lookahead
                .back()
                .is_some_and(|token| token.kind == TokenKind::EOF)
            {
                break;
            }
            let token = self.scan_token()?;
            self.lookahead.push_back(token);
        }

        Ok(self
            .lookahead
            .get(depth)
            .filter(|token| token.kind != TokenKind::EOF)
            .cloned())
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    #[cfg(test)]
    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<Token, Error> {
        if let Some(matched) = WHITESPACE.find(self.remainder()) {
            let skipped = matched.end();
            self.advance_n(skipped);
        }

        let start = self.pos;
        let Some(ch) = self.at() else {
            return Ok(MK_TOKEN!(TokenKind::EOF, String::new(), None, MK_SPAN!(self, start, start)));
        };

        let token = if let Some(kind) = TokenKind::structural(ch) {
            self.advance_n(ch.len_utf8());
            MK_TOKEN!(kind, ch.to_string(), None, MK_SPAN!(self, start, self.pos))
        } else if ch == '"' || ch == '\'' {
            self.scan_string(ch)?
        } else if let Some((operator, kind)) = OPERATORS
            .iter()
            .find(|(operator, _)| self.remainder().starts_with(operator))
        {
            self.advance_n(operator.len());
            MK_TOKEN!(*kind, operator.to_string(), None, MK_SPAN!(self, start, self.pos))
        } else if let Some(matched) = NUMBER.find(self.remainder()) {
            let end = matched.end();
            self.scan_number(end)?
        } else if let Some(matched) = IDENTIFIER.find(self.remainder()) {
            let end = matched.end();
            self.scan_symbol(end)?
        } else {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: ch.to_string(),
                },
                Position(start as u32, Rc::clone(&self.file)),
            ));
        };

        trace!(kind = %token.kind, offset = start, lexeme = %token.value, "scanned token");
        Ok(token)
    }

    /// Scans a quoted string starting at the opening `quote`.
    fn scan_string(&mut self, quote: char) -> Result<Token, Error> {
        let start = self.pos;
        let mut value = String::new();
        let mut consumed = None;

        {
            let mut chars = self.remainder().char_indices().skip(1);
            while let Some((idx, ch)) = chars.next() {
                match ch {
                    c if c == quote => {
                        consumed = Some(idx + c.len_utf8());
                        break;
                    }
                    '\\' => match chars.next() {
                        Some((_, 'n')) => value.push('\n'),
                        Some((_, 'r')) => value.push('\r'),
                        Some((_, 't')) => value.push('\t'),
                        Some((_, other)) => value.push(other),
                        None => break,
                    },
                    c => value.push(c),
                }
            }
        }

        let Some(consumed) = consumed else {
            return Err(Error::new(
                ErrorImpl::UnterminatedString,
                Position(start as u32, Rc::clone(&self.file)),
            ));
        };

        self.advance_n(consumed);
        Ok(MK_TOKEN!(
            TokenKind::String,
            self.source[start..self.pos].to_string(),
            Some(Literal::String(value)),
            MK_SPAN!(self, start, self.pos)
        ))
    }

    fn scan_number(&mut self, len: usize) -> Result<Token, Error> {
        let start = self.pos;
        let text = self.remainder()[..len].to_string();

        let literal = if text.contains('.') {
            text.parse().map(Literal::Float).ok()
        } else {
            text.parse().map(Literal::Integer).ok()
        };

        let Some(literal) = literal else {
            return Err(Error::new(
                ErrorImpl::NumberParseError { token: text },
                Position(start as u32, Rc::clone(&self.file)),
            ));
        };

        self.advance_n(len);
        Ok(MK_TOKEN!(TokenKind::Number, text, Some(literal), MK_SPAN!(self, start, self.pos)))
    }

    /// Scans an identifier, keyword or boolean whose head is `len` bytes long.
    fn scan_symbol(&mut self, len: usize) -> Result<Token, Error> {
        let start = self.pos;
        let mut text = self.remainder()[..len].to_string();
        self.advance_n(len);

        if self.at() == Some('<') {
            let arguments = self.scan_generic_arguments(start, &text)?;
            text.push_str(&arguments);
            return Ok(MK_TOKEN!(TokenKind::Identifier, text, None, MK_SPAN!(self, start, self.pos)));
        }

        let lowered = text.to_lowercase();
        let span = MK_SPAN!(self, start, self.pos);

        if let Some(kind) = RESERVED_LOOKUP.get(lowered.as_str()) {
            Ok(MK_TOKEN!(*kind, text, None, span))
        } else if lowered == "true" || lowered == "false" {
            Ok(MK_TOKEN!(
                TokenKind::Boolean,
                text,
                Some(Literal::Boolean(lowered == "true")),
                span
            ))
        } else {
            Ok(MK_TOKEN!(TokenKind::Identifier, text, None, span))
        }
    }

    /// Captures a balanced `<...>` run verbatim, e.g. the `<int>` of `Auto<int>`.
    fn scan_generic_arguments(&mut self, start: usize, identifier: &str) -> Result<String, Error> {
        let mut depth = 0usize;
        let mut captured = String::new();

        for ch in self.remainder().chars() {
            captured.push(ch);
            match ch {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }

        if depth != 0 {
            return Err(Error::new(
                ErrorImpl::UnbalancedGeneric {
                    identifier: format!("{}{}", identifier, captured),
                },
                Position(start as u32, Rc::clone(&self.file)),
            ));
        }

        self.advance_n(captured.len());
        Ok(captured)
    }
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
