use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Options,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Options,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Self::Get
    }
}

/// Method names are matched exactly: `get` is not `GET`.
impl FromStr for Method {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CommandError::UnsupportedMethod { method: s.into() })
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request described by a "copy as cURL" command or a "copy as fetch" call.
///
/// `headers` keeps insertion order and stores names exactly as written.
/// `body` is `None` when nothing is sent, which is distinct from an empty body.
/// `ignored` lists what was recognized but not interpreted, e.g. `--compressed`
/// or `mode=`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NormalizedRequest {
    pub method: Method,
    pub url: String,
    pub headers: IndexMap<String, String>,
    #[serde(serialize_with = "serialize_body")]
    pub body: Option<Vec<u8>>,
    pub ignored: Vec<String>,
}

impl NormalizedRequest {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn set_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// The body as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

fn serialize_body<S: Serializer>(body: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
    match body {
        Some(b) => s.serialize_some(&String::from_utf8_lossy(b)),
        None => s.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("GET", Method::Get)]
    #[case("OPTIONS", Method::Options)]
    #[case("HEAD", Method::Head)]
    #[case("POST", Method::Post)]
    #[case("PUT", Method::Put)]
    #[case("PATCH", Method::Patch)]
    #[case("DELETE", Method::Delete)]
    fn test_method_from_str(#[case] input: &str, #[case] expected: Method) {
        assert_eq!(input.parse::<Method>(), Ok(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    #[case("get")]
    #[case("CONNECT")]
    #[case("TRACE")]
    #[case("")]
    fn test_method_outside_set(#[case] input: &str) {
        assert_eq!(
            input.parse::<Method>(),
            Err(CommandError::UnsupportedMethod {
                method: input.into()
            })
        );
    }

    #[test]
    fn test_header_overwrite_keeps_position() {
        let mut req = NormalizedRequest::new(Method::Get, "https://example.com");
        req.set_header("A", "1").set_header("B", "2").set_header("A", "3");
        let headers: Vec<_> = req.headers.iter().collect();
        assert_eq!(
            headers,
            vec![(&"A".to_string(), &"3".to_string()), (&"B".to_string(), &"2".to_string())]
        );
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let mut req = NormalizedRequest::default();
        req.set_header("Accept", "a").set_header("accept", "b");
        assert_eq!(req.headers.len(), 2);
    }

    #[test]
    fn test_serialize_json() {
        let mut req = NormalizedRequest::new(Method::Post, "https://example.com");
        req.set_header("Accept", "application/json").set_body("foo");
        req.ignored.push("--compressed".into());
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"method":"POST","url":"https://example.com","headers":{"Accept":"application/json"},"body":"foo","ignored":["--compressed"]}"#
        );
    }
}
