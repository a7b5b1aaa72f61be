use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use cnbsync::cli::parse_date;
use cnbsync::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Update every stored currency from today's feed
    Sync,
    /// Update a single stored currency
    Update {
        /// Currency code, e.g. EUR
        code: String,
    },
    /// Print the raw feed
    Fetch {
        /// Feed date (DD.MM.YYYY or YYYY-MM-DD); latest when omitted
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Show the rate of one currency without storing it
    Rate {
        /// Currency code, e.g. USD
        code: String,
        /// Feed date (DD.MM.YYYY or YYYY-MM-DD); latest when omitted
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// List stored currencies and their rates
    List,
}

impl From<Commands> for cnbsync::AppCommand {
    fn from(cmd: Commands) -> cnbsync::AppCommand {
        match cmd {
            Commands::Sync => cnbsync::AppCommand::Sync,
            Commands::Update { code } => cnbsync::AppCommand::Update { code },
            Commands::Fetch { date } => cnbsync::AppCommand::Fetch { date },
            Commands::Rate { code, date } => cnbsync::AppCommand::Rate { code, date },
            Commands::List => cnbsync::AppCommand::List,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => cnbsync::cli::setup::setup_at_path(path),
            None => cnbsync::cli::setup::setup(),
        },
        Some(cmd) => cnbsync::run_command(cmd.into(), cli.config_path.as_deref())
            .await
            .map(|output| println!("{output}")),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
