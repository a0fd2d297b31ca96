use clap::{Parser, Subcommand};
use quitgambling_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "quitgambling", version, about = "QuitGambling recovery tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current recovery state
    Status {
        /// Print a JSON state snapshot instead of text
        #[arg(long)]
        json: bool,
    },
    /// Start recovery, or reset it if already started
    Toggle {
        /// Print the transition event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the elapsed time, refreshing until interrupted
    Watch {
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Status { json } => commands::recovery::status(&config, json).await,
        Commands::Toggle { json } => commands::recovery::toggle(&config, json).await,
        Commands::Watch { ticks } => commands::recovery::watch(&config, ticks).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
