use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AnswerView, AskHandler, AskOptions, CachedValue, ChatClient, IncidentCache, TextField,
};
use shared::domain::{INCIDENT_COORDS, RECENT_NEWS};
use storage::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, normalize_store_url, validate_server_url};

#[derive(Parser, Debug)]
#[command(name = "incident-chat", about = "Ask about recent incidents and cache map data")]
struct Cli {
    /// Base URL of the chat server; `/chat` is appended.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// SQLite URL or plain path of the shared incident store.
    #[arg(long, global = true)]
    store_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a question; reads one line from stdin when omitted.
    Ask { question: Option<String> },
    /// Print the cached coords and news.
    Show,
    /// Forget the cached coords and news.
    Clear,
}

struct ConsoleView;

impl AnswerView for ConsoleView {
    fn set_text(&self, text: &str) {
        println!("{text}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(v) = cli.server_url {
        settings.server_url = v;
    }
    if let Some(v) = cli.store_url {
        settings.store_url = v;
    }

    let store_url = normalize_store_url(&settings.store_url);
    let storage = Storage::new(&store_url).await.map_err(|error| {
        error!(%store_url, %error, "failed to open incident store");
        error
    })?;
    storage.health_check().await?;
    let cache = IncidentCache::new(Arc::new(storage));

    match cli.command {
        Command::Ask { question } => {
            let server_url = validate_server_url(&settings.server_url)?;
            let question = match question {
                Some(question) => question,
                None => read_question_line().await?,
            };
            let handler = AskHandler::with_options(
                ChatClient::new(server_url),
                cache,
                AskOptions {
                    reject_empty_questions: settings.reject_empty_questions,
                },
            );
            handler.ask(&TextField::new(question), &ConsoleView).await;
        }
        Command::Show => {
            let snapshot = cache.snapshot().await?;
            print_cached(INCIDENT_COORDS.as_str(), snapshot.coords.as_ref())?;
            print_cached(RECENT_NEWS.as_str(), snapshot.recent_news.as_ref())?;
        }
        Command::Clear => {
            cache.clear().await?;
            info!(%store_url, "cleared cached coords and news");
        }
    }

    Ok(())
}

async fn read_question_line() -> Result<String> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let line = lines
        .next_line()
        .await
        .context("failed to read question from stdin")?;
    Ok(line.unwrap_or_default())
}

fn print_cached(key: &str, cached: Option<&CachedValue>) -> Result<()> {
    match cached {
        Some(cached) => println!(
            "{key} (updated {}): {}",
            cached.updated_at.to_rfc3339(),
            serde_json::to_string_pretty(&cached.value)?
        ),
        None => println!("{key}: not cached yet"),
    }
    Ok(())
}
