use std::io::{self, Write};

use colored::Colorize;

use crate::models::job::{JobPosting, SeenSet};

pub fn print_postings(postings: &[JobPosting], seen: Option<&SeenSet>) {
    println!("\n{}", "=== Job Listings ===".cyan().bold());

    if postings.is_empty() {
        println!(
            "{}",
            "No job postings found for the given query and location.".yellow()
        );
        return;
    }

    for (index, posting) in postings.iter().enumerate() {
        let is_new = seen.is_some_and(|seen| !seen.contains(&posting.dedup_key()));
        let marker = if is_new {
            format!(" {}", "NEW".green().bold())
        } else {
            String::new()
        };

        println!(
            "{}. {}{}",
            index + 1,
            posting.title().bold(),
            marker
        );
        println!(
            "   {} · {} · {}",
            posting.company(),
            posting.location(),
            posting.portal().dimmed()
        );
        println!("   {}\n", posted_label(posting).dimmed());
    }
}

pub fn write_section(out: &mut dyn Write, title: &str, body: &str) -> io::Result<()> {
    writeln!(out, "\n{}", format!("=== {} ===", title).cyan().bold())?;
    writeln!(out, "{}", body)
}

pub fn write_failure(
    out: &mut dyn Write,
    what: &str,
    error: &dyn std::fmt::Display,
) -> io::Result<()> {
    writeln!(out, "\n{}", format!("✗ {} failed: {}", what, error).red())
}

fn posted_label(posting: &JobPosting) -> String {
    match (posting.posted_raw(), posting.posted_at()) {
        (Some(raw), Some(at)) => format!("posted {} ({})", raw, at.format("%Y-%m-%d")),
        (Some(raw), None) => format!("posted {}", raw),
        (None, _) => "posting date unknown".to_string(),
    }
}
