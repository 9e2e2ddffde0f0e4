use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use memory_match::provider::{JsonFileProvider, PgImageStore, StaticProvider};
use memory_match::render::render_error;
use memory_match::{play, server, GameConfig, Session};

/// Memory card-pairs game and its deck service.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve GET /api/images from the PostgreSQL image store.
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Serve the built-in demo deck instead of the database.
        #[arg(long)]
        demo: bool,
    },

    /// Play in the terminal.
    Play {
        /// Deck file in the /api/images response shape.
        #[arg(long, conflicts_with = "db")]
        deck: Option<PathBuf>,

        /// Load the deck from the PostgreSQL image store.
        #[arg(long)]
        db: bool,

        /// Fixed seed for dealing.
        #[arg(long)]
        seed: Option<u64>,

        /// How long a mismatched pair stays face-up.
        #[arg(long, default_value_t = 1000)]
        flip_back_ms: u64,

        /// How long the reset flip lasts.
        #[arg(long, default_value_t = 600)]
        reset_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve { addr, demo } => {
            if demo {
                server::serve(addr, StaticProvider::demo()).await?;
            } else {
                server::serve(addr, PgImageStore::from_env()).await?;
            }
        }
        Command::Play {
            deck,
            db,
            seed,
            flip_back_ms,
            reset_ms,
        } => {
            let mut config = GameConfig::new()
                .with_flip_back_delay(Duration::from_millis(flip_back_ms))
                .with_reset_delay(Duration::from_millis(reset_ms));
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }

            let session = match (deck, db) {
                (Some(path), _) => Session::load(&JsonFileProvider::new(path), config).await,
                (None, true) => Session::load(&PgImageStore::from_env(), config).await,
                (None, false) => Session::load(&StaticProvider::demo(), config).await,
            };

            match session.into_result() {
                Ok(mut engine) => {
                    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                    play::run(&mut engine, stdin, tokio::io::stdout()).await?;
                }
                Err(e) => {
                    eprint!("{}", render_error(&e));
                    bail!(e);
                }
            }
        }
    }

    Ok(())
}
