//! Rendering a [`NormalizedRequest`] back into code.

use std::fmt::Write;

use serde_json::{Map, Value, json};

use crate::request::NormalizedRequest;

fn python_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double { '"' } else { '\'' }
}

/// Whether Python's `str.isprintable()` holds for `c`: control, format,
/// private-use and separator characters are escaped, except for the space.
/// Unassigned code points are not tracked and count as printable.
fn python_printable(c: char) -> bool {
    !(c.is_control()
        || matches!(
            c,
            // Zs
            '\u{a0}' | '\u{1680}' | '\u{2000}'..='\u{200a}' | '\u{202f}' | '\u{205f}' | '\u{3000}'
            // Zl, Zp
            | '\u{2028}' | '\u{2029}'
            // Cf
            | '\u{ad}' | '\u{600}'..='\u{605}' | '\u{61c}' | '\u{6dd}' | '\u{70f}'
            | '\u{890}'..='\u{891}' | '\u{8e2}' | '\u{180e}' | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{2066}'..='\u{206f}'
            | '\u{feff}' | '\u{fff9}'..='\u{fffb}' | '\u{110bd}' | '\u{110cd}'
            | '\u{13430}'..='\u{1343f}' | '\u{1bca0}'..='\u{1bca3}' | '\u{1d173}'..='\u{1d17a}'
            | '\u{e0001}' | '\u{e0020}'..='\u{e007f}'
            // Co
            | '\u{e000}'..='\u{f8ff}' | '\u{f0000}'..='\u{ffffd}' | '\u{100000}'..='\u{10fffd}'
        ))
}

/// Python `repr()` of a `str`.
pub fn python_str(s: &str) -> String {
    let quote = python_quote(s.contains('\''), s.contains('"'));
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if python_printable(c) => out.push(c),
            c if (c as u32) < 0x100 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push(quote);
    out
}

/// Python `repr()` of a `bytes`.
pub fn python_bytes(b: &[u8]) -> String {
    let quote = python_quote(b.contains(&b'\''), b.contains(&b'"'));
    let mut out = String::with_capacity(b.len() + 3);
    out.push('b');
    out.push(quote);
    for &byte in b {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            byte if byte as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(byte as char),
            byte => {
                let _ = write!(out, "\\x{byte:02x}");
            }
        }
    }
    out.push(quote);
    out
}

/// `requests.request('METHOD', 'URL', headers={...}[, data=b'...'])`
pub fn to_python_code(request: &NormalizedRequest) -> String {
    let headers = request
        .headers
        .iter()
        .map(|(k, v)| format!("{}: {}", python_str(k), python_str(v)))
        .collect::<Vec<_>>()
        .join(", ");
    let data = request
        .body
        .as_deref()
        .map(|b| format!(", data={}", python_bytes(b)))
        .unwrap_or_default();
    format!(
        "requests.request({}, {}, headers={{{}}}{})",
        python_str(request.method.as_str()),
        python_str(&request.url),
        headers,
        data
    )
}

/// `fetch("URL", {"headers": {...}, "body": ..., "method": "..."});`
///
/// Bodies that are not UTF-8 are rendered lossily.
pub fn to_fetch_code(request: &NormalizedRequest) -> String {
    let headers: Map<String, Value> = request
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    let options = json!({
        "headers": headers,
        "body": request.body_text(),
        "method": request.method.as_str(),
    });
    format!("fetch({}, {:#});", Value::String(request.url.clone()), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fetch::fetch_parse,
        request::Method,
    };
    use rstest::*;

    #[rstest]
    #[case("foo", "'foo'")]
    #[case("it's", r#""it's""#)]
    #[case(r#"it's "x""#, r#"'it\'s "x"'"#)]
    #[case("a\\b\n\t", r"'a\\b\n\t'")]
    #[case("\u{1}\u{7f}\u{85}", r"'\x01\x7f\x85'")]
    #[case("猫", "'猫'")]
    #[case("a b", "'a b'")]
    #[case("a\u{a0}b\u{2028}", r"'a\xa0b\u2028'")]
    #[case("\u{200b}\u{feff}\u{3000}", r"'\u200b\ufeff\u3000'")]
    #[case("\u{e0041}\u{100000}", r"'\U000e0041\U00100000'")]
    fn test_python_str(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(python_str(input), expected);
    }

    #[rstest]
    #[case(b"foo", "b'foo'")]
    #[case(b"'foo'", r#"b"'foo'""#)]
    #[case(b"\x00\xff\r", r"b'\x00\xff\r'")]
    fn test_python_bytes(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(python_bytes(input), expected);
    }

    #[test]
    fn test_to_python_code() {
        let mut request = NormalizedRequest::new(Method::Get, "https://example.com");
        request.set_header("User-Agent", "Mozilla/5.0");
        assert_eq!(
            to_python_code(&request),
            "requests.request('GET', 'https://example.com', headers={'User-Agent': 'Mozilla/5.0'})"
        );

        request.method = Method::Post;
        request
            .set_header("Accept", "application/json")
            .set_body("foo");
        assert_eq!(
            to_python_code(&request),
            "requests.request('POST', 'https://example.com', headers={'User-Agent': 'Mozilla/5.0', 'Accept': 'application/json'}, data=b'foo')"
        );
    }

    #[test]
    fn test_to_python_code_without_headers() {
        let request = NormalizedRequest::new(Method::Delete, "u");
        assert_eq!(
            to_python_code(&request),
            "requests.request('DELETE', 'u', headers={})"
        );
    }

    #[test]
    fn test_to_fetch_code_parses_back() {
        let mut request = NormalizedRequest::new(Method::Patch, "https://example.com/?q=\"x\"");
        request
            .set_header("content-type", "application/json")
            .set_header("x-quote", "it's")
            .set_body(r#"{"a": "b\n"}"#);
        let code = to_fetch_code(&request);
        assert!(code.starts_with("fetch(\"https://example.com/?q=\\\"x\\\"\", {"));
        assert!(code.ends_with("});"));
        assert_eq!(fetch_parse(&code).unwrap(), request);
    }
}
