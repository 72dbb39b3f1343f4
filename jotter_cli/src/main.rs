use clap::Parser;
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // -v raises the default filter; RUST_LOG still wins when set.
    let default_filter = match cli.verbose {
        0 => "jotter_cli=info,jotter_core=info",
        1 => "jotter_cli=debug,jotter_core=debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Ls { folder, limit } => ls::run(&cli, folder.as_deref(), *limit).await,
        Commands::Search {
            query,
            folder,
            limit,
        } => search::run(&cli, query, folder.as_deref(), *limit).await,
        Commands::Show { note_id, copy } => show::run(&cli, note_id, *copy).await,
        Commands::New {
            title,
            body,
            folder,
        } => new::run(&cli, title, body.as_deref(), folder.as_deref()).await,
        Commands::Edit {
            note_id,
            body,
            title,
        } => edit::run(&cli, note_id, body.as_deref(), title.as_deref()).await,
        Commands::Append { note_id, text } => append::run(&cli, note_id, text).await,
        Commands::Rm { note_id, yes } => rm::run(&cli, note_id, *yes).await,
        Commands::Mv { note_id, folder } => mv::run(&cli, note_id, folder).await,
        Commands::Folders => folders::run(&cli).await,
        Commands::Mkdir { name } => mkdir::run(&cli, name).await,
        Commands::Tools => tools::run(&cli).await,
    };

    if let Err(e) = result {
        if cli.no_color {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}: {}", "Error".red().bold(), e);
        }
        process::exit(1);
    }
}
