pub mod escape;
pub mod tokenizer;

use tracing::debug;

use crate::{
    error::{CommandError, Result},
    request::{Method, NormalizedRequest},
};

pub const CURL_CMD: &str = "curl";

/// The options browsers put into "copy as cURL" output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurlOption {
    Header,
    Method,
    DataRaw,
    Compressed,
}

impl CurlOption {
    pub fn lookup(token: &str) -> Option<Self> {
        match token {
            "-H" => Some(Self::Header),
            "-X" => Some(Self::Method),
            "--data-raw" => Some(Self::DataRaw),
            "--compressed" => Some(Self::Compressed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "-H",
            Self::Method => "-X",
            Self::DataRaw => "--data-raw",
            Self::Compressed => "--compressed",
        }
    }

    pub fn takes_argument(&self) -> bool {
        !matches!(self, Self::Compressed)
    }
}

/// One interpreted option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Curl {
    Method(Method),
    Header(String, String),
    Data(Vec<u8>),
    Flag(String),
}

impl Curl {
    pub fn new(option: CurlOption, param: &str) -> Result<Self, CommandError> {
        match option {
            CurlOption::Header => {
                let (name, value) =
                    param
                        .split_once(": ")
                        .ok_or_else(|| CommandError::MalformedHeader {
                            token: param.into(),
                        })?;
                Ok(Curl::Header(name.into(), value.into()))
            }
            CurlOption::Method => Ok(Curl::Method(param.parse()?)),
            CurlOption::DataRaw => Ok(Curl::Data(param.as_bytes().to_vec())),
            CurlOption::Compressed => Ok(Curl::new_as_flag(option)),
        }
    }

    pub fn new_as_flag(option: CurlOption) -> Self {
        Curl::Flag(option.as_str().into())
    }
}

/// Interpret the tokens after the url as a list of options.
pub fn options_parse<I>(tokens: I) -> Result<Vec<Curl>, CommandError>
where
    I: IntoIterator<Item = String>,
{
    let mut tokens = tokens.into_iter();
    let mut curls = Vec::new();

    while let Some(token) = tokens.next() {
        let option = CurlOption::lookup(&token).ok_or(CommandError::UnknownOption { token })?;
        let curl = if option.takes_argument() {
            let param = tokens.next().ok_or_else(|| CommandError::MissingArgument {
                option: option.as_str().into(),
            })?;
            Curl::new(option, &param)?
        } else {
            Curl::new_as_flag(option)
        };
        debug!(?curl, "option");
        curls.push(curl);
    }

    Ok(curls)
}

/// Build the request from a full token sequence: `curl`, the url, then options.
///
/// An explicit `-X` always wins; otherwise the method is POST when a body
/// was given and GET when not.
pub fn interpret<I>(tokens: I) -> Result<NormalizedRequest, CommandError>
where
    I: IntoIterator<Item = String>,
{
    let mut tokens = tokens.into_iter();
    match tokens.next() {
        Some(cmd) if cmd == CURL_CMD => {}
        Some(found) => return Err(CommandError::NotCurl { found }),
        None => return Err(CommandError::NotCurl { found: String::new() }),
    }
    let url = tokens.next().ok_or(CommandError::MissingUrl)?;

    let mut request = NormalizedRequest::new(Method::default(), &url);
    let mut method = None;
    for curl in options_parse(tokens)? {
        match curl {
            Curl::Method(m) => method = Some(m),
            Curl::Header(name, value) => {
                request.headers.insert(name, value);
            }
            Curl::Data(data) => request.body = Some(data),
            Curl::Flag(flag) => request.ignored.push(flag),
        }
    }

    request.method = method.unwrap_or(if request.body.is_some() {
        Method::Post
    } else {
        Method::Get
    });
    Ok(request)
}

/// Parse a "copy as cURL" command into a [`NormalizedRequest`].
pub fn curl_cmd_parse(command: &str) -> Result<NormalizedRequest> {
    let tokens = tokenizer::tokenize(command)?;
    Ok(interpret(tokens)?)
}
