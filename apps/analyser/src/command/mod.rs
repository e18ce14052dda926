mod history;
mod indicator;
mod quote;

use std::path::{Path, PathBuf};

use stock::{IndicatorKind, OutputSize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{Data, Error};

pub const USAGE: &str = "\
Commands:
  quote SYMBOL            latest quote (a bare SYMBOL works too)
  history SYMBOL [full]   daily prices, last 100 bars or full history
  sma SYMBOL [WINDOW]     simple moving average of close (default 20)
  rsi SYMBOL [WINDOW]     relative strength index of close (default 14)
  help                    show this message
  exit                    quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quote {
        symbol: String,
    },
    History {
        symbol: String,
        size: OutputSize,
    },
    Indicator {
        symbol: String,
        kind: IndicatorKind,
        window: usize,
    },
    Help,
    Exit,
}

impl Command {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Command::Quote { symbol }
            | Command::History { symbol, .. }
            | Command::Indicator { symbol, .. } => Some(symbol),
            Command::Help | Command::Exit => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Please enter a stock symbol.")]
    Empty,

    #[error("{0} needs a symbol")]
    MissingSymbol(&'static str),

    #[error("window must be a positive whole number, got {0:?}")]
    InvalidWindow(String),

    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),

    #[error("unknown command {0:?}")]
    Unknown(String),
}

/// Parses one line typed at the prompt.
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseError::Empty);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "exit" | "quit" => return no_args(Command::Exit, &rest),
        "help" | "?" => return no_args(Command::Help, &rest),
        "quote" => {
            let symbol = symbol_arg("quote", &rest)?;
            return no_args(Command::Quote { symbol }, &rest[1..]);
        }
        "history" => {
            let symbol = symbol_arg("history", &rest)?;
            let size = match rest.get(1).map(|s| s.to_ascii_lowercase()).as_deref() {
                None | Some("compact") => OutputSize::Compact,
                Some("full") => OutputSize::Full,
                Some(_) => return Err(ParseError::UnexpectedArgument(rest[1].to_string())),
            };
            return no_args(Command::History { symbol, size }, rest.get(2..).unwrap_or(&[]));
        }
        "sma" => IndicatorKind::Sma,
        "rsi" => IndicatorKind::Rsi,
        _ if rest.is_empty() => {
            return Ok(Command::Quote {
                symbol: head.to_uppercase(),
            });
        }
        _ => return Err(ParseError::Unknown(head.to_string())),
    };

    let symbol = symbol_arg(command.as_str(), &rest)?;
    let window = match rest.get(1) {
        Some(raw) => parse_window(raw)?,
        None => command.default_window(),
    };
    no_args(
        Command::Indicator {
            symbol,
            kind: command,
            window,
        },
        rest.get(2..).unwrap_or(&[]),
    )
}

fn symbol_arg(command: &'static str, rest: &[&str]) -> Result<String, ParseError> {
    rest.first()
        .map(|s| s.to_uppercase())
        .ok_or(ParseError::MissingSymbol(command))
}

fn no_args(command: Command, extra: &[&str]) -> Result<Command, ParseError> {
    match extra.first() {
        Some(arg) => Err(ParseError::UnexpectedArgument(arg.to_string())),
        None => Ok(command),
    }
}

pub fn parse_window(raw: &str) -> Result<usize, ParseError> {
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).map_err(|_| ParseError::InvalidWindow(raw.to_string())),
        _ => Err(ParseError::InvalidWindow(raw.to_string())),
    }
}

/// Runs a command to completion. Library failures come back as `stock::Error`
/// inside the returned `anyhow::Error`.
pub async fn run(data: &Data, command: &Command) -> Result<(), Error> {
    debug!(?command, "running command");
    match command {
        Command::Quote { symbol } => quote::quote(data, symbol).await,
        Command::History { symbol, size } => history::history(data, symbol, *size).await,
        Command::Indicator {
            symbol,
            kind,
            window,
        } => indicator::indicator(data, symbol, *kind, *window).await,
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Exit => Ok(()),
    }
}

/// Turns a failed command into the line shown to the user.
pub fn describe(symbol: Option<&str>, err: &Error) -> String {
    let symbol = symbol.unwrap_or("?");
    let Some(err) = err.downcast_ref::<stock::Error>() else {
        return format!("Error: {err:#}");
    };

    match err {
        stock::Error::NotConfigured => {
            "API key not loaded. Set ALPHA_VANTAGE_API_KEY in the environment or a .env file."
                .to_string()
        }
        stock::Error::ApiError(message) => format!("API Error for '{symbol}': {message}"),
        stock::Error::MissingSeriesKey { .. } => {
            format!("No data found for symbol '{symbol}'. Please check the symbol.")
        }
        stock::Error::RateLimited(message) => {
            format!("API notice for '{symbol}': {message}")
        }
        stock::Error::Http(e) if e.is_timeout() => {
            format!("Timeout error occurred: {e}. The request took too long.")
        }
        stock::Error::Http(e) if e.is_connect() => {
            format!("Connection error occurred: {e}. Please check your internet connection.")
        }
        stock::Error::Http(e) => match e.status() {
            Some(status) => format!("HTTP error occurred: {e} - Status Code: {}", status.as_u16()),
            None => format!("An unexpected error occurred during API request: {e}"),
        },
        other => format!("Error: {other}"),
    }
}

pub(crate) fn chart_path(dir: &Path, symbol: &str, kind: &str) -> PathBuf {
    dir.join(format!("{}_{}.png", symbol.to_uppercase(), kind))
}

/// Renders on the blocking pool and writes the PNG under the output dir.
pub(crate) async fn save_chart<F>(data: &Data, symbol: &str, kind: &str, render: F) -> Result<(), Error>
where
    F: FnOnce() -> stock::Result<Vec<u8>> + Send + 'static,
{
    if !data.config.charts {
        debug!("chart rendering disabled");
        return Ok(());
    }

    let bytes = tokio::task::spawn_blocking(render).await??;

    tokio::fs::create_dir_all(&data.config.output_dir).await?;
    let path = chart_path(&data.config.output_dir, symbol, kind);
    tokio::fs::write(&path, &bytes).await?;

    info!(path = %path.display(), bytes = bytes.len(), "chart written");
    println!("Chart saved to {}", path.display());
    Ok(())
}
