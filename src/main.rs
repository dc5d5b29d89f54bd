mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use weebcentral::config::load_config;
use weebcentral::prelude::*;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref()).context("loading config")?;
    let source = WeebCentral::new(&cfg).context("building http transport")?;

    match cli.command {
        Commands::Details { series_id } => print_json(&source.fetch_series_details(&series_id).await?)?,
        Commands::Chapters { series_id } => print_json(&source.fetch_chapters(&series_id).await?)?,
        Commands::Pages { series_id, chapter_id } => {
            print_json(&source.fetch_chapter_images(&series_id, &chapter_id).await?)?
        }
        Commands::Home => {
            let mut sections = Vec::new();
            source
                .fetch_home_sections(|s| {
                    eprintln!("section {} ({} items)", s.id, s.items.len());
                    sections.push(s);
                })
                .await?;
            print_json(&sections)?
        }
        Commands::Listing { section, page } => {
            print_json(&source.fetch_listing(&section, Some(PaginationCursor { page })).await?)?
        }
        Commands::Search { title, tags, page } => {
            let query = SearchQuery {
                title,
                included_tags: tags.into_iter().map(|id| Tag { label: id.clone(), id }).collect(),
            };
            print_json(&source.fetch_search_results(&query, Some(PaginationCursor { page })).await?)?
        }
        Commands::Tags => print_json(&source.fetch_search_tags().await?)?,
    }
    Ok(())
}
