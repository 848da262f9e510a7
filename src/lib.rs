#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod util;

/// Location of a lexeme: 0-based row and column plus the lexeme length in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub row: usize,
    pub col: usize,
    pub len: usize,
}

impl Span {
    pub fn new(row: usize, col: usize, len: usize) -> Self {
        Span { row, col, len }
    }
}

/// Diagnostic position. Row and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub source: String,
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn null() -> Self {
        Position {
            source: String::from("<null>"),
            row: 0,
            col: 0,
        }
    }

    /// Builds a 1-based position out of 0-based coordinates.
    pub fn from_zero_based(source: &str, row: usize, col: usize) -> Self {
        Position {
            source: source.to_string(),
            row: row + 1,
            col: col + 1,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.row, self.col)
    }
}

/// Returns the 1-based line `row` of `source`, without its line break.
///
/// `\r\n`, `\n` and a bare `\r` all count as one line break, the same way the
/// lexer counts rows.
pub fn get_line_at_row(source: &[u8], row: usize) -> Option<String> {
    if row == 0 {
        return None;
    }

    let mut current = 1;
    let mut start = 0;
    let mut i = 0;

    while i < source.len() {
        let byte = source[i];
        if byte == b'\n' || byte == b'\r' {
            if current == row {
                return Some(String::from_utf8_lossy(&source[start..i]).into_owned());
            }

            if byte == b'\r' && source.get(i + 1) == Some(&b'\n') {
                i += 1;
            }

            current += 1;
            start = i + 1;
        }
        i += 1;
    }

    if current == row {
        Some(String::from_utf8_lossy(&source[start..]).into_owned())
    } else {
        None
    }
}

/// Renders an error the way the `menos` binary prints it:
///
/// ```text
/// Error: UnexpectedToken (Unexpected token `;` ...)
/// -> main.me
///    |
///  3 | x = ;
///    | ----^
/// ```
pub fn render_diagnostic(error: &Error, source: &[u8]) -> String {
    let mut out = String::new();
    let position = error.get_position();

    match error.get_tip() {
        ErrorTip::None => out.push_str(&format!("Error: {}\n", error.get_error_name())),
        tip => out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), tip)),
    }

    let line_text = match get_line_at_row(source, position.row) {
        Some(line_text) => line_text,
        None => return out,
    };

    let line_string = position.row.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("-> {}\n", position.source));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = position.col.saturating_sub(removed_whitespace).max(1);

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
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
