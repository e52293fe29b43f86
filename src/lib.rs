#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::QueryRoot,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Lexer,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Lexes and parses `source` in one go.
///
/// Positions in any returned error are reported against the source name `shell`.
pub fn parse_query(source: &str) -> Result<QueryRoot, Error> {
    parser::parser::parse(Lexer::new(source.to_string(), None))
}

/// Finds the line containing the byte offset `position`.
///
/// Returns the 1-based line number, the line text and the column of the offset
/// within that line. An offset equal to the source length (the end-of-file
/// token) resolves to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // Offset sits at the very end of the input
    let last = source.split_inclusive('\n').last().unwrap_or("");
    if last.ends_with('\n') || last.is_empty() {
        Some((line_number, String::new(), 0))
    } else {
        Some((line_number - 1, last.to_string(), last.len()))
    }
}

/// Renders an error as a caret diagnostic pointing into `source`.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        error: message
        -> people.tql
           |
        20 | from people take { name age }
           | ------------------------^
    */

    let position = error.get_position();
    let mut output = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    output.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        output.push_str(&format!("at offset {}\n", position.0));
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    // Offsets are in bytes, the caret is placed in characters
    let column = line_text
        .get(..line_pos)
        .map_or(line_pos, |prefix| prefix.chars().count());
    let arrows = column.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
