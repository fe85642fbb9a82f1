//! "Copy as fetch" input: `[await] fetch("URL", { ...options... });`

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;
use winnow::{
    ModalResult, Parser,
    ascii::{multispace0, multispace1},
    combinator::{opt, preceded, terminated},
    token::take_while,
};

use crate::{
    error::{FormatError, Result},
    request::{Method, NormalizedRequest},
};

/// Longest fragment of input quoted back in an error message.
const FRAGMENT_LEN: usize = 60;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Reject calls whose options have no `headers` key.
    pub require_headers: bool,
}

impl FetchOptions {
    pub fn strict() -> Self {
        Self {
            require_headers: true,
        }
    }
}

/// `await fetch(` or `fetch(`, returning the function name.
fn call_prefix<'i>(s: &mut &'i str) -> ModalResult<&'i str> {
    preceded(
        opt(("await", multispace1)),
        terminated(
            take_while(1.., |c: char| {
                c.is_alphanumeric() || matches!(c, '_' | '$' | '.')
            }),
            (multispace0, '('),
        ),
    )
    .parse_next(s)
}

fn fragment(s: &str) -> String {
    s.chars().take(FRAGMENT_LEN).collect()
}

fn tail_fragment(s: &str) -> String {
    s.char_indices()
        .rev()
        .nth(FRAGMENT_LEN - 1)
        .map_or(s, |(i, _)| &s[i..])
        .into()
}

/// Turn the call into the two-element literal `["URL", {options}]`.
pub fn strip_call(code: &str) -> Result<String, FormatError> {
    let code = code.trim();
    let mut rest = code;
    let name = call_prefix(&mut rest).map_err(|_| FormatError::CallShape {
        fragment: fragment(code),
    })?;
    let args = rest
        .strip_suffix(");")
        .ok_or_else(|| FormatError::CallShape {
            fragment: tail_fragment(rest),
        })?;
    debug!(function = name, "stripped call wrapper");
    Ok(format!("[{args}]"))
}

fn text_field(options: &mut IndexMap<String, Value>, key: &str) -> Result<Option<String>, FormatError> {
    match options.shift_remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(FormatError::InvalidField {
            key: key.into(),
            expected: "a string or null",
        }),
    }
}

/// Map a decoded options object onto a request.
pub fn normalize(
    url: String,
    mut options: IndexMap<String, Value>,
    config: &FetchOptions,
) -> Result<NormalizedRequest> {
    let method = match options.shift_remove("method") {
        None => Method::Get,
        Some(Value::String(m)) => m.parse()?,
        Some(_) => {
            return Err(FormatError::InvalidField {
                key: "method".into(),
                expected: "a string",
            }
            .into());
        }
    };

    let headers: IndexMap<String, String> = match options.shift_remove("headers") {
        None if config.require_headers => return Err(FormatError::MissingHeaders.into()),
        None => IndexMap::new(),
        Some(value) => {
            serde_json::from_value(value).map_err(|_| FormatError::InvalidField {
                key: "headers".into(),
                expected: "an object of strings",
            })?
        }
    };

    let mut request = NormalizedRequest::new(method, &url);
    request.headers = headers;
    request.body = text_field(&mut options, "body")?.map(String::into_bytes);

    if let Some(referrer) = text_field(&mut options, "referrer")?.filter(|s| !s.is_empty()) {
        request.set_header("referer", &referrer);
    }
    if let Some(policy) = text_field(&mut options, "referrerPolicy")?.filter(|s| !s.is_empty()) {
        request.set_header("referrer-policy", &policy);
    }

    request.ignored = options.into_keys().map(|key| format!("{key}=")).collect();
    debug!(ignored = ?request.ignored, "fetch options not interpreted");
    Ok(request)
}

/// Parse a "copy as fetch" call with explicit options.
pub fn fetch_parse_with(code: &str, config: &FetchOptions) -> Result<NormalizedRequest> {
    let literal = strip_call(code)?;
    let (url, options): (String, IndexMap<String, Value>) = serde_json::from_str(&literal)
        .map_err(|source| FormatError::Literal {
            fragment: fragment(&literal),
            source,
        })?;
    normalize(url, options, config)
}

/// Parse a "copy as fetch" call into a [`NormalizedRequest`].
pub fn fetch_parse(code: &str) -> Result<NormalizedRequest> {
    fetch_parse_with(code, &FetchOptions::default())
}
