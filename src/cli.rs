use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Debugging CLI for the weebcentral adapter. Prints extracted values as JSON.
#[derive(Parser)]
#[command(name = "weebcentral")]
#[command(about = "Fetch and extract weebcentral.com pages", long_about = None)]
pub struct Cli {
    /// Transport config (TOML). Defaults to the user config directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Series details
    Details { series_id: String },
    /// Chapter list of a series
    Chapters { series_id: String },
    /// Image pages of one chapter
    Pages { series_id: String, chapter_id: String },
    /// Homepage sections
    Home,
    /// A "view more" listing (hot_release, new_manga, latest_updates)
    Listing {
        section: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search by title and/or tag ids
    Search {
        #[arg(short, long)]
        title: Option<String>,
        /// Included tag id; repeatable
        #[arg(short = 'g', long = "tag")]
        tags: Vec<String>,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Searchable tag groups
    Tags,
}
