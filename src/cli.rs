// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::aggregator::{Aggregator, LatestFilter};
use crate::app_log;
use crate::chat::ChatClient;
use crate::config::ConfigManager;
use crate::output::{render, render_detail, OutputFormat};
use crate::types::ChatMessage;

#[derive(Parser)]
#[command(name = "oppgenie")]
#[command(about = "Find jobs, internships, volunteer roles and open-source issues")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format for listings
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Number of generated placeholder listings to mix in
    #[arg(long, global = true)]
    pub synthetic: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate listings, optionally filtered by location
    Search {
        /// Free text forwarded to the GitHub search
        query: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Match the text against title, description and organization instead
        #[arg(long = "match")]
        match_text: bool,
    },
    /// Ten randomly picked listings
    Trending,
    /// Recently posted listings
    Latest {
        /// internship, volunteer, job, research, ...
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Show one listing in full
    Show { id: String },
    /// Ask OppGenie; without --message starts an interactive session
    Chat {
        #[arg(long, short)]
        message: Option<String>,
    },
}

pub async fn handle_command(cli: Cli, mut config: ConfigManager) -> Result<()> {
    if let Some(count) = cli.synthetic {
        config.sources.synthetic_count = count;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Search {
            query,
            location,
            match_text,
        } => {
            let aggregator = Aggregator::new(&config.sources)?;
            let query = query.unwrap_or_default();
            let location = location.unwrap_or_default();

            let results = if match_text {
                crate::aggregator::filter_by_location(aggregator.search(&query).await, &location)
            } else {
                aggregator.fetch_all(&query, &location).await
            };
            app_log!(info, "search query={:?} location={:?} -> {}", query, location, results.len());
            render(&results, cli.format, &mut out)?;
        }

        Command::Trending => {
            let aggregator = Aggregator::new(&config.sources)?;
            let results = aggregator.trending().await;
            render(&results, cli.format, &mut out)?;
        }

        Command::Latest {
            kind,
            term,
            location,
        } => {
            let aggregator = Aggregator::new(&config.sources)?;
            let filter = LatestFilter {
                kind,
                term,
                location,
            };
            let results = aggregator.latest(&filter).await;
            render(&results, cli.format, &mut out)?;
        }

        Command::Show { id } => {
            let aggregator = Aggregator::new(&config.sources)?;
            match aggregator.find(&id).await {
                Some(opp) => render_detail(&opp, cli.format, &mut out)?,
                None => anyhow::bail!("Opportunity not found: {}", id),
            }
        }

        Command::Chat { message } => {
            let client = ChatClient::new(&config.inference)?;
            match message {
                Some(text) => {
                    let reply = client
                        .generate_response(&[ChatMessage::user(text)])
                        .await
                        .context("Chat is not configured")?;
                    writeln!(out, "{}", reply)?;
                }
                None => {
                    drop(out);
                    run_chat_session(&client).await?;
                }
            }
        }
    }

    Ok(())
}

/// Read user turns from stdin until EOF or `exit`, keeping the running conversation
async fn run_chat_session(client: &ChatClient) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut history: Vec<ChatMessage> = Vec::new();

    println!("OppGenie is here. Ask about opportunities; type `exit` to leave.");
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        history.push(ChatMessage::user(line));
        let reply = client
            .generate_response(&history)
            .await
            .context("Chat is not configured")?;
        println!("\n{}\n", reply);
        history.push(ChatMessage::assistant(reply));
    }

    Ok(())
}
