use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::models::job::JobPosting;

/// Body of a SerpAPI `google_jobs` search.
///
/// SerpAPI leaves out `jobs_results` entirely (and sets `error`) when nothing matched.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs_results: Vec<RawJob>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawJob {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub via: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detected_extensions: DetectedExtensions,
}

#[derive(Debug, Deserialize, Default)]
pub struct DetectedExtensions {
    pub posted_at: Option<String>,
    pub source: Option<String>,
}

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn strip_via(portal: &str) -> &str {
    match portal.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("via ") => portal[4..].trim_start(),
        _ => portal,
    }
}

impl RawJob {
    /// The portal the listing came from, e.g. "via LinkedIn" -> "LinkedIn".
    fn portal(&self) -> Option<&str> {
        self.via
            .as_deref()
            .map(|via| via.trim())
            .map(strip_via)
            .filter(|via| !via.is_empty())
            .or(self.detected_extensions.source.as_deref())
    }

    pub fn into_posting(self, now: DateTime<Utc>) -> JobPosting {
        JobPosting::new(
            self.title.as_deref(),
            self.company_name.as_deref(),
            self.portal(),
            self.location.as_deref(),
            self.detected_extensions.posted_at.as_deref(),
            now,
        )
    }
}
