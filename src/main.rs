mod chat;
mod error;
mod models;
mod scraper;
mod utils;

use std::io::Write;

use clap::Parser;
use colored::Colorize;
use eyre::{Result, WrapErr};
use log::{debug, error, info, warn};

use crate::chat::agent::{SummaryAgent, listings_text, summarize_postings};
use crate::models::job::{JobPosting, SeenSet, diff_new};
use crate::scraper::jobs::JobQueryService;
use crate::utils::cli::Args;
use crate::utils::config::{Config, config};
use crate::utils::display;
use crate::utils::log::Logger;
use crate::utils::seen;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Logger::init(args.verbosity);

    info!(
        "starting job-radar {}",
        format!("v{}", env!("CARGO_PKG_VERSION")).magenta()
    );

    let config: Config = config(args.config.clone())?;

    // Credentials are checked up front so a missing key fails before any request.
    let service = JobQueryService::new(&config.search)?;
    let agent = if args.needs_llm() {
        Some(SummaryAgent::new(&config.llm)?)
    } else {
        None
    };

    let max_results = args.max_results.unwrap_or(config.search.default_max_results);
    let postings = service
        .search(&args.query, &args.location, max_results)
        .await?;
    debug!("ranked postings: {:#?}", postings);

    let mut seen_set = match &args.seen_file {
        Some(path) => Some(seen::load(path)?),
        None => None,
    };

    let shown = select_postings(&postings, seen_set.as_ref(), args.only_new);
    if let Some(previous) = &seen_set {
        info!(
            "{} of {} postings are new since the last run",
            diff_new(&postings, previous).len(),
            postings.len()
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        display::print_postings(&shown, seen_set.as_ref());
    }

    if let (Some(path), Some(previous)) = (&args.seen_file, seen_set.as_mut()) {
        seen::remember(previous, &postings);
        seen::save(path, previous)?;
    }

    let Some(agent) = agent else {
        return Ok(());
    };

    // Keep stdout parseable when it carries JSON.
    let mut report: Box<dyn Write> = if args.json {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };

    if !args.no_summary {
        match summarize_postings(&agent, &shown).await {
            Ok(Some(summary)) => display::write_section(&mut *report, "Summary", &summary)?,
            Ok(None) => warn!("no listings to summarize"),
            Err(e) => {
                error!("summarization failed: {}", e);
                display::write_failure(&mut *report, "Summarization", &e)?;
            }
        }
    }

    if let Some(resume_path) = &args.resume {
        let resume = tokio::fs::read_to_string(resume_path)
            .await
            .wrap_err_with(|| format!("failed to read resume {}", resume_path.display()))?;

        let job_file = match &args.job_file {
            Some(path) => Some(
                tokio::fs::read_to_string(path)
                    .await
                    .wrap_err_with(|| format!("failed to read job description {}", path.display()))?,
            ),
            None => None,
        };

        match compatibility_target(job_file, &shown) {
            Some(job_description) => {
                match agent.check_compatibility(&job_description, &resume).await {
                    Ok(result) => {
                        display::write_section(&mut *report, "Resume Compatibility", &result)?
                    }
                    Err(e) => {
                        error!("compatibility check failed: {}", e);
                        display::write_failure(&mut *report, "Compatibility check", &e)?;
                    }
                }
            }
            None => warn!("no listings to score the resume against, pass --job-file to use a job description"),
        }
    }

    Ok(())
}

/// Text the resume is scored against: the job file when given, else the listings.
fn compatibility_target(job_file: Option<String>, shown: &[JobPosting]) -> Option<String> {
    match job_file {
        Some(text) => Some(text),
        None if shown.is_empty() => None,
        None => Some(listings_text(shown)),
    }
}

fn select_postings(
    postings: &[JobPosting],
    seen: Option<&SeenSet>,
    only_new: bool,
) -> Vec<JobPosting> {
    match seen {
        Some(previous) if only_new => diff_new(postings, previous),
        _ => postings.to_vec(),
    }
}
