//! Decoding of bash-style `$'...'` strings.
//!
//! Firefox and Chromium emit e.g. `--data-raw $'\'foo\''` whenever a value
//! contains a single quote or a control character.

use winnow::{
    ModalResult, Parser,
    combinator::{alt, cut_err, delimited, dispatch, empty, fail, preceded, repeat},
    error::{ContextError, ErrMode},
    token::{any, take_till, take_while},
};

use crate::error::LexError;

enum Fragment<'i> {
    Literal(&'i str),
    Escaped(char),
}

/// Decode the `$'...'` string at the start of `input`.
///
/// Returns the decoded text and the input left after the closing quote.
/// Every failure, whatever its cause, is reported as
/// [`LexError::MalformedEscapeString`].
pub fn decode_escape_string(input: &str) -> Result<(String, &str), LexError> {
    let mut rest = input;
    let decoded = escape_string(&mut rest).map_err(|_| LexError::MalformedEscapeString)?;
    Ok((decoded, rest))
}

pub(crate) fn escape_string(input: &mut &str) -> ModalResult<String> {
    let body = repeat(0.., fragment).fold(String::new, |mut acc, fragment| {
        match fragment {
            Fragment::Literal(s) => acc.push_str(s),
            Fragment::Escaped(c) => acc.push(c),
        }
        acc
    });
    delimited("$'", body, '\'').parse_next(input)
}

fn fragment<'i>(input: &mut &'i str) -> ModalResult<Fragment<'i>> {
    alt((
        take_till(1.., ['\'', '\\']).map(Fragment::Literal),
        escaped.map(Fragment::Escaped),
    ))
    .parse_next(input)
}

fn escaped(input: &mut &str) -> ModalResult<char> {
    preceded('\\', cut_err(escape_seq_char)).parse_next(input)
}

fn escape_seq_char(input: &mut &str) -> ModalResult<char> {
    dispatch! {any;
        'a' => empty.value('\u{7}'),
        'b' => empty.value('\u{8}'),
        // 0x17, not 0x1b: `\e` and `\027` decode to the same character.
        'e' | 'E' => empty.value('\u{17}'),
        'f' => empty.value('\u{c}'),
        'n' => empty.value('\n'),
        'r' => empty.value('\r'),
        't' => empty.value('\t'),
        'v' => empty.value('\u{b}'),
        '\\' => empty.value('\\'),
        '\'' => empty.value('\''),
        '"' => empty.value('"'),
        '?' => empty.value('?'),
        first @ '0'..='7' => take_while(0..=2, |c: char| c.is_digit(8))
            .verify_map(move |rest: &str| octal_scalar(first, rest)),
        'x' => hex_scalar(2),
        'u' => hex_scalar(4),
        'U' => hex_scalar(8),
        'c' => any.verify_map(|x: char| (x as u32).checked_sub(64).and_then(char::from_u32)),
        _ => fail::<_, char, _>,
    }
    .parse_next(input)
}

fn octal_scalar(first: char, rest: &str) -> Option<char> {
    let code = std::iter::once(first)
        .chain(rest.chars())
        .try_fold(0u32, |acc, c| Some(acc * 8 + c.to_digit(8)?))?;
    char::from_u32(code)
}

/// At least one and at most `max_digits` hex digits, taken greedily.
fn hex_scalar<'i>(max_digits: usize) -> impl Parser<&'i str, char, ErrMode<ContextError>> {
    take_while(1..=max_digits, |c: char| c.is_ascii_hexdigit())
        .verify_map(|digits: &str| u32::from_str_radix(digits, 16).ok().and_then(char::from_u32))
}
