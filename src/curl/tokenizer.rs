//! Splits a "copy as cURL" command line into words.
//!
//! Only the shell subset that browsers emit is understood: single-quoted
//! strings, `$'...'` strings, bare words, `\`-newline continuations and
//! trailing comments. Anything else (double quotes, quotes glued to other
//! text) is rejected rather than guessed at.

use winnow::{
    ModalResult, Parser,
    ascii::line_ending,
    combinator::{alt, delimited, opt, repeat},
    token::{take_till, take_while},
};

use super::escape::escape_string;
use crate::error::LexError;

/// Backslash immediately followed by a line ending.
fn continuation<'i>(s: &mut &'i str) -> ModalResult<&'i str> {
    ('\\', line_ending).take().parse_next(s)
}

/// Whitespace and line continuations between words.
fn blank(s: &mut &str) -> ModalResult<()> {
    repeat(0.., alt((take_while(1.., char::is_whitespace), continuation))).parse_next(s)
}

fn single_quoted<'i>(s: &mut &'i str) -> ModalResult<&'i str> {
    delimited('\'', take_till(0.., '\''), '\'').parse_next(s)
}

/// A run of non-whitespace text, with line continuations spliced out.
fn bare_word(s: &mut &str) -> String {
    let mut word = String::new();
    while let Some(c) = s.chars().next().filter(|c| !c.is_whitespace()) {
        if let Ok(Some(_)) = opt(continuation).parse_next(s) {
            continue;
        }
        word.push(c);
        *s = &s[c.len_utf8()..];
    }
    word
}

/// A quoted word must end the input or be followed by whitespace, possibly
/// after line continuations.
fn expect_separator(rest: &mut &str, offset: impl Fn(&str) -> usize) -> Result<(), LexError> {
    let _: ModalResult<()> = repeat(0.., continuation).parse_next(rest);
    match rest.chars().next() {
        None => Ok(()),
        Some(c) if c.is_whitespace() => Ok(()),
        Some(_) => Err(LexError::MissingSeparator {
            offset: offset(rest),
        }),
    }
}

/// Split `command` into decoded words.
pub fn tokenize(command: &str) -> Result<Vec<String>, LexError> {
    let command = command.trim();
    let mut input = command;
    let mut tokens = Vec::new();
    let offset = |rest: &str| command.len() - rest.len();

    loop {
        // `blank` matches zero or more items and never fails.
        let _ = blank(&mut input);
        let start = offset(input);

        let token = if input.is_empty() || input.starts_with('#') {
            break;
        } else if input.starts_with('\'') {
            let word = single_quoted(&mut input)
                .map_err(|_| LexError::UnterminatedQuote { offset: start })?;
            expect_separator(&mut input, offset)?;
            word.to_string()
        } else if input.starts_with("$'") {
            let word = escape_string(&mut input).map_err(|_| LexError::MalformedEscapeString)?;
            expect_separator(&mut input, offset)?;
            word
        } else {
            let word = bare_word(&mut input);
            if word.contains('"') {
                return Err(LexError::DoubleQuote { token: word });
            }
            if word.contains('\'') {
                return Err(LexError::StrayQuote { token: word });
            }
            word
        };

        tracing::trace!(offset = start, token = %token, "token");
        tokens.push(token);
    }

    Ok(tokens)
}
