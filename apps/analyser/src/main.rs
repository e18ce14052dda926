use std::{path::PathBuf, sync::Arc};

use analyser::{
    Data,
    command::{self, Command, ParseError, USAGE},
    config::Config,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use stock::{ApiConfig, IndicatorKind, OutputSize, QueryFacade};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_futures::Instrument;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "analyser", version, about = "Stock quotes, daily history, SMA and RSI")]
struct Cli {
    /// Directory charts are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Run one command and exit instead of starting the prompt
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Latest quote
    Quote { symbol: String },
    /// Daily price history
    History {
        symbol: String,
        /// Fetch the full history instead of the last 100 bars
        #[arg(long)]
        full: bool,
    },
    /// Simple moving average of close
    Sma {
        symbol: String,
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
        window: u64,
    },
    /// Relative strength index of close
    Rsi {
        symbol: String,
        #[arg(short, long, default_value_t = 14, value_parser = clap::value_parser!(u64).range(1..))]
        window: u64,
    },
}

impl From<CliCommand> for Command {
    fn from(cmd: CliCommand) -> Self {
        match cmd {
            CliCommand::Quote { symbol } => Command::Quote {
                symbol: symbol.trim().to_uppercase(),
            },
            CliCommand::History { symbol, full } => Command::History {
                symbol: symbol.trim().to_uppercase(),
                size: if full { OutputSize::Full } else { OutputSize::Compact },
            },
            CliCommand::Sma { symbol, window } => Command::Indicator {
                symbol: symbol.trim().to_uppercase(),
                kind: IndicatorKind::Sma,
                window: window as usize,
            },
            CliCommand::Rsi { symbol, window } => Command::Indicator {
                symbol: symbol.trim().to_uppercase(),
                kind: IndicatorKind::Rsi,
                window: window as usize,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    config.charts = !cli.no_charts;

    let api = ApiConfig::from_env();
    if !api.is_configured() {
        warn!("ALPHA_VANTAGE_API_KEY is not set; every fetch will fail");
    }
    let facade = Arc::new(QueryFacade::new(&api)?);

    info!(version = %config.version, output_dir = %config.output_dir.display(), "starting");
    let data = Data { facade, config };

    match cli.command {
        Some(cmd) => {
            let command = Command::from(cmd);
            if !execute(&data, &command).await {
                std::process::exit(1);
            }
        }
        None => read_loop(&data).await?,
    }

    info!("Shutdown complete.");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("analyser=info,stock=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Runs one command and prints any failure. Returns whether it succeeded.
async fn execute(data: &Data, command: &Command) -> bool {
    let span = tracing::info_span!("command", symbol = command.symbol().unwrap_or("-"));

    match command::run(data, command).instrument(span).await {
        Ok(()) => true,
        Err(e) => {
            println!("{}", command::describe(command.symbol(), &e));
            false
        }
    }
}

async fn read_loop(data: &Data) -> Result<()> {
    println!("Welcome to the Stock Market Data Analyser!");
    println!("Type 'help' for commands or 'exit' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout
            .write_all(b"\nEnter command or ticker symbol (e.g. AAPL, sma MSFT 20): ")
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match command::parse_line(&line) {
            Ok(c) => c,
            Err(ParseError::Empty) => {
                println!("{}", ParseError::Empty);
                continue;
            }
            Err(e) => {
                println!("{e}\n{USAGE}");
                continue;
            }
        };

        if command == Command::Exit {
            println!("Exiting Stock Market Data Analyser. Goodbye!");
            break;
        }

        execute(data, &command).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_shot(args: &[&str]) -> Command {
        let cli = Cli::try_parse_from(args).unwrap();
        Command::from(cli.command.unwrap())
    }

    #[test]
    fn one_shot_symbols_are_upper_cased() {
        assert_eq!(
            one_shot(&["analyser", "history", "ibm"]),
            Command::History {
                symbol: "IBM".into(),
                size: OutputSize::Compact
            }
        );
        assert_eq!(
            one_shot(&["analyser", "quote", "msft"]),
            Command::Quote {
                symbol: "MSFT".into()
            }
        );
        assert_eq!(
            one_shot(&["analyser", "sma", "aapl", "--window", "200"]),
            Command::Indicator {
                symbol: "AAPL".into(),
                kind: IndicatorKind::Sma,
                window: 200
            }
        );
        assert_eq!(one_shot(&["analyser", "rsi", "tsla"]).symbol(), Some("TSLA"));
    }

    #[test]
    fn one_shot_rejects_zero_window() {
        assert!(Cli::try_parse_from(["analyser", "rsi", "ibm", "--window", "0"]).is_err());
    }
}
