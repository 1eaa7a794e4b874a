use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::platform::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "search_app")]
#[command(about = "Search page client: one query, every backend, one list")]
#[command(version)]
pub struct Args {
    /// RON configuration file (defaults to ./search_app.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL serving /search, /search_reddit and /search_cfa
    #[arg(short, long, env = "SEARCH_BACKEND_URL")]
    pub backend: Option<String>,

    /// Run one query, print the results page and exit
    #[arg(short, long, conflicts_with = "location")]
    pub query: Option<String>,

    /// Open a page location such as "/results?q=maine+coon" and exit
    #[arg(short = 'L', long)]
    pub location: Option<String>,

    /// Show the joke panel
    #[arg(short, long)]
    pub joke: bool,

    /// Where log output goes
    #[arg(long, value_enum, default_value = "file")]
    pub log: LogDestination,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// The location to open in one-shot mode, if any.
    pub fn one_shot_location(&self) -> Option<String> {
        if let Some(query) = &self.query {
            return Some(search_core::Route::results(query.as_str()).location());
        }
        self.location.clone()
    }
}
