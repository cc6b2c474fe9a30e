use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_SPORT;
use crate::http::FetchMode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find timing ties in Olympic results")]
pub struct Cli {
    /// Command (defaults to `ties` for swimming)
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SourceArgs {
    /// Sport code as it appears in the results URL
    #[arg(short, long, default_value = DEFAULT_SPORT)]
    pub sport: String,

    /// Games code, e.g. tokyo-2020
    #[arg(short, long)]
    pub games: Option<String>,

    /// How to fetch pages missing from the cache
    #[arg(long, value_enum, default_value_t = FetchMode::Webdriver)]
    pub fetcher: FetchMode,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,
}

impl Default for SourceArgs {
    fn default() -> Self {
        Self {
            sport: DEFAULT_SPORT.to_string(),
            games: None,
            fetcher: FetchMode::Webdriver,
            webdriver_url: None,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Detect ties in a sport's finished events and write a markdown report
    Ties {
        #[command(flatten)]
        source: SourceArgs,

        /// Report file (optional, defaults to README.md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how a sport's schedule splits into events and rounds
    Schedule {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the classified schedule as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the timed sports
    Sports,
}

impl Default for Command {
    fn default() -> Self {
        Command::Ties {
            source: SourceArgs::default(),
            output: None,
        }
    }
}
