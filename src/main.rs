// YapBattle - debate an AI opponent, get scored, climb the ranks
// Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yapbattle::cli::{format_profile, Repl};
use yapbattle::config::{load_config, pick_topic, Difficulty, GameMode};
use yapbattle::debate::DebateService;
use yapbattle::server;

#[derive(Parser)]
#[command(name = "yapbattle")]
#[command(version, about = "Debate an AI opponent and climb the ranks", long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API for the web front end
    Serve {
        /// Bind address, e.g. 127.0.0.1:5001
        #[arg(long)]
        bind: Option<String>,
    },
    /// Debate in the terminal
    Play {
        /// ranked, hot_takes or podcast
        #[arg(long, default_value = "ranked")]
        mode: String,
        /// easy, medium or hard (ranked only)
        #[arg(long, default_value = "medium")]
        difficulty: String,
    },
    /// Show the player profile
    Stats,
    /// Print a random topic
    Topic {
        #[arg(long, default_value = "ranked")]
        mode: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "yapbattle=debug,tower_http=debug"
    } else {
        "yapbattle=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { bind } => {
            let mut config = load_config()?;
            if let Some(bind) = bind {
                config.server.bind_address = bind;
                config.validate()?;
            }
            server::serve(&config).await?;
        }
        Commands::Play { mode, difficulty } => {
            let config = load_config()?;
            let service = DebateService::from_config(&config)?;
            let mut repl = Repl::new(&service)?;
            repl.run(
                GameMode::parse_lossy(&mode),
                Difficulty::parse_lossy(&difficulty),
            )
            .await?;
        }
        Commands::Stats => {
            let config = load_config()?;
            let service = DebateService::from_config(&config)?;
            let profile = service.profile().await;
            let today = service
                .match_logger()
                .map(|logger| logger.today_summary())
                .transpose()?;
            print!("{}", format_profile(&profile, today.as_ref()));
        }
        Commands::Topic { mode } => {
            println!("{}", pick_topic(GameMode::parse_lossy(&mode)));
        }
    }

    Ok(())
}
