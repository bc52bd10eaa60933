use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "job-radar")]
#[command(about = "Search job postings, rank them by recency and summarize what employers ask for", long_about = None)]
pub struct Args {
    /// Job title or keywords to search for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Location to search in (city, region or country)
    #[arg(short, long, value_name = "LOCATION")]
    pub location: String,

    /// Maximum number of postings to keep (defaults to the config value)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub max_results: Option<usize>,

    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// File remembering postings from earlier runs, used to flag new ones
    #[arg(long, value_name = "FILE")]
    pub seen_file: Option<PathBuf>,

    /// Only show postings not present in the seen file
    #[arg(long, requires = "seen_file")]
    pub only_new: bool,

    /// Skip the LLM summary of the listings
    #[arg(long)]
    pub no_summary: bool,

    /// Print the ranked postings as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Plain-text resume to score against the listings
    #[arg(short, long, value_name = "FILE")]
    pub resume: Option<PathBuf>,

    /// Job description to score the resume against instead of the listings
    #[arg(long, value_name = "FILE", requires = "resume")]
    pub job_file: Option<PathBuf>,

    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,
}

impl Args {
    pub fn needs_llm(&self) -> bool {
        !self.no_summary || self.resume.is_some()
    }
}
