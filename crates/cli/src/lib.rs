//! # Semantle CLI
//!
//! Wires the guess-session engine to a chat transport: parses the command
//! surface (`!new`, `!guess`, `!hint`, `!top`), runs each command through
//! the per-channel coordinator, and ships the formatted replies back out.
//! The `semantle` binary plays over stdin/stdout; a chat-platform deployment
//! swaps in its own [`ChatTransport`].

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use semantle_client::{SemantleClient, WordService, DEFAULT_BASE_URL};
use semantle_engine::WordList;
use semantle_store::{JsonDb, SessionDb};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod command;
mod service;
mod transport;

pub use command::{Command, DEFAULT_TOP_N};
pub use service::{GameError, GameService};
pub use transport::{ChatTransport, ConsoleTransport, Inbound};

#[derive(Parser)]
#[command(name = "semantle")]
#[command(about = "Semantle-style word-guessing game over chat", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,

    /// Secret word list: a JSON array of words
    #[arg(long, default_value = "secretwords.json")]
    words: PathBuf,

    /// Directory holding one session file per channel
    #[arg(long, default_value = ".semantle/sessions")]
    data_dir: PathBuf,

    /// Base URL of the word-similarity service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    service_url: String,

    /// Channel id used for console play
    #[arg(long, default_value = "semantle")]
    channel: String,

    /// Author name used for console play
    #[arg(long, default_value = "player")]
    author: String,

    /// Seed for the target-word draw (reproducible rounds)
    #[arg(long)]
    seed: Option<u64>,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let words = load_word_list(&cli.words)?;
    let client = SemantleClient::new(cli.service_url)?;
    let game = GameService::new(
        JsonDb::new(&cli.data_dir),
        Arc::new(client),
        words,
        cli.seed,
    );

    log::info!("ready: !guess <word> (or $word), !hint, !top [n], !new");

    let mut transport = ConsoleTransport::new(cli.channel, cli.author);
    run(&game, &mut transport).await
}

/// Pump the transport until it closes. Commands for different channels could
/// be spawned concurrently here; the coordinator already serializes per
/// channel, so a single-channel console loop just awaits in order.
pub async fn run<D, W, T>(game: &GameService<D, W>, transport: &mut T) -> Result<()>
where
    D: SessionDb,
    W: WordService,
    T: ChatTransport,
{
    while let Some(message) = transport.next().await {
        let replies = game
            .handle(&message.channel, &message.author, &message.text)
            .await;
        for reply in replies {
            transport.send(&message.channel, &reply).await?;
        }
    }
    Ok(())
}

fn load_word_list(path: &Path) -> Result<WordList> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read word list {}", path.display()))?;
    let words: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("Word list {} is not a JSON array of words", path.display()))?;
    Ok(WordList::new(words))
}
