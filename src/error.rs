use thiserror::Error;

/// Failures while splitting a command line into tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated single-quoted string starting at offset {offset}")]
    UnterminatedQuote { offset: usize },

    #[error("quoted string ending at offset {offset} must be followed by whitespace")]
    MissingSeparator { offset: usize },

    #[error("quote must be preceded by whitespace in token: {token}")]
    StrayQuote { token: String },

    #[error("double-quoted strings are not supported: {token}")]
    DoubleQuote { token: String },

    #[error("malformed escape string")]
    MalformedEscapeString,
}

/// Failures while interpreting tokens as curl options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("expected the command to start with `curl`, found `{found}`")]
    NotCurl { found: String },

    #[error("no target url found")]
    MissingUrl,

    #[error("unknown curl argument: {token}")]
    UnknownOption { token: String },

    #[error("option {option} requires an argument")]
    MissingArgument { option: String },

    #[error("malformed header (expected `Name: Value`): {token}")]
    MalformedHeader { token: String },

    #[error("unsupported method: {method}")]
    UnsupportedMethod { method: String },
}

/// Failures while normalizing a fetch call.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("not a fetch call: {fragment}")]
    CallShape { fragment: String },

    #[error("could not decode fetch arguments `{fragment}`: {source}")]
    Literal {
        fragment: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fetch option `{key}` must be {expected}")]
    InvalidField { key: String, expected: &'static str },

    #[error("fetch options have no `headers` key")]
    MissingHeaders,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),

    #[error(transparent)]
    Structural(#[from] CommandError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
