//! Parse browser "copy as cURL" commands and "copy as fetch" calls into a
//! [`NormalizedRequest`].
//!
//! ```
//! use curlfetch::{Method, curl_cmd_parse};
//!
//! let request = curl_cmd_parse(
//!     "curl 'https://example.com' -H 'User-Agent: Mozilla/5.0' --compressed",
//! )
//! .unwrap();
//! assert_eq!(request.method, Method::Get);
//! assert_eq!(request.headers["User-Agent"], "Mozilla/5.0");
//! assert_eq!(request.ignored, vec!["--compressed"]);
//! ```

pub mod curl;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod request;

#[cfg(test)]
mod test_util;

pub use curl::curl_cmd_parse;
pub use error::{CommandError, FormatError, LexError, ParseError, Result};
pub use fetch::{FetchOptions, fetch_parse, fetch_parse_with};
pub use request::{Method, NormalizedRequest};
