use std::io::Read;

use anyhow::{Context, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use curlfetch::{
    FetchOptions, NormalizedRequest, curl_cmd_parse,
    emit::{to_fetch_code, to_python_code},
    fetch_parse_with,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RequestPart {
    Method,
    Url,
    Header,
    Body,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CodeLang {
    Python,
    Fetch,
}

fn command_arg() -> Arg {
    Arg::new("command")
        .help("The curl command or fetch call; read from stdin when omitted")
        .required(false)
        .index(1)
}

fn cli() -> Command {
    Command::new("curlfetch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse \"copy as cURL\" / \"copy as fetch\" output into a normalized request")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("fetch")
                .long("fetch")
                .help("Parse fetch code instead of a curl command")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict-headers")
                .long("strict-headers")
                .help("With --fetch, require the options to contain a `headers` key")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output to stderr (RUST_LOG overrides)")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the normalized request")
                .arg(command_arg())
                .arg(
                    Arg::new("part")
                        .short('p')
                        .long("part")
                        .value_name("PART")
                        .help("Print only one part of the request")
                        .value_parser(clap::value_parser!(RequestPart)),
                ),
        )
        .subcommand(
            Command::new("code")
                .about("Print code performing the request")
                .arg(command_arg())
                .arg(
                    Arg::new("lang")
                        .short('l')
                        .long("lang")
                        .value_name("LANG")
                        .default_value("python")
                        .value_parser(clap::value_parser!(CodeLang)),
                ),
        )
        .subcommand(
            Command::new("exec")
                .about("Perform the request and print the response body")
                .arg(command_arg())
                .arg(
                    Arg::new("allow-failure")
                        .long("allow-failure")
                        .help("Do not fail on a non-success status")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.get_one::<String>("command") {
        Some(command) => Ok(command.clone()),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        }
    }
}

fn parse_request(matches: &ArgMatches) -> anyhow::Result<NormalizedRequest> {
    let input = read_input(matches)?;
    let request = if matches.get_flag("fetch") {
        let config = FetchOptions {
            require_headers: matches.get_flag("strict-headers"),
        };
        fetch_parse_with(&input, &config)?
    } else {
        curl_cmd_parse(&input)?
    };
    for marker in &request.ignored {
        warn!("ignoring {marker}");
    }
    Ok(request)
}

fn print_part(request: &NormalizedRequest, part: RequestPart) {
    match part {
        RequestPart::Method => println!("{}", request.method),
        RequestPart::Url => println!("{}", request.url),
        RequestPart::Header => {
            for (name, value) in &request.headers {
                println!("{name}: {value}");
            }
        }
        RequestPart::Body => {
            if let Some(body) = request.body_text() {
                println!("{body}");
            }
        }
        RequestPart::Ignored => {
            for marker in &request.ignored {
                println!("{marker}");
            }
        }
    }
}

fn exec(request: &NormalizedRequest, allow_failure: bool) -> anyhow::Result<()> {
    let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())?;
    debug!(method = %request.method, url = %request.url, headers = ?request.headers, "sending request");

    let mut builder = reqwest::blocking::Client::new().request(method, request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }

    let response = builder.send()?;
    let status = response.status();
    if !status.is_success() && !allow_failure {
        bail!("request failed with status {status}");
    }
    print!("{}", response.text()?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("parse", sub_matches)) => {
            let request = parse_request(sub_matches)?;
            match sub_matches.get_one::<RequestPart>("part") {
                Some(part) => print_part(&request, *part),
                None => println!("{}", serde_json::to_string_pretty(&request)?),
            }
        }
        Some(("code", sub_matches)) => {
            let request = parse_request(sub_matches)?;
            match sub_matches.get_one::<CodeLang>("lang") {
                Some(CodeLang::Fetch) => println!("{}", to_fetch_code(&request)),
                _ => println!("{}", to_python_code(&request)),
            }
        }
        Some(("exec", sub_matches)) => {
            let request = parse_request(sub_matches)?;
            exec(&request, sub_matches.get_flag("allow-failure"))?;
        }
        _ => {
            cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
