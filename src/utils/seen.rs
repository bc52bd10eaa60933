use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};
use log::{debug, info};

use crate::models::job::{JobPosting, SeenSet};

/// Loads the set of previously seen postings, empty if the file doesn't exist yet.
pub fn load(path: &Path) -> Result<SeenSet> {
    if !path.exists() {
        debug!("no seen file at {}, starting fresh", path.display());
        return Ok(SeenSet::new());
    }

    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read seen file {}", path.display()))?;
    let seen: SeenSet = serde_json::from_str(&content)
        .wrap_err_with(|| format!("seen file {} is not valid", path.display()))?;

    debug!("loaded {} seen postings from {}", seen.len(), path.display());
    Ok(seen)
}

/// Writes the set, creating parent directories as needed.
pub fn save(path: &Path, seen: &SeenSet) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
        info!("created seen file directory: {}", parent.display());
    }

    fs::write(path, serde_json::to_string_pretty(seen)?)?;
    debug!("saved {} seen postings to {}", seen.len(), path.display());
    Ok(())
}

pub fn remember(seen: &mut SeenSet, postings: &[JobPosting]) {
    seen.extend(postings.iter().map(JobPosting::dedup_key));
}
