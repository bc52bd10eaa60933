use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde_json::{Value, json};

use crate::error::{ConfigError, ServiceError};
use crate::models::job::JobPosting;
use crate::utils::config::LLMConfig;

const SUMMARY_PROMPT: &str = include_str!("summary_prompt.txt");
const COMPATIBILITY_PROMPT: &str = include_str!("compatibility_prompt.txt");

const TEMPERATURE: f64 = 0.3;
const MAX_OUTPUT_TOKENS: u32 = 800;

/// Free-text completion over a block of listings. The response is not interpreted.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, ServiceError>;
}

pub struct SummaryAgent {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl SummaryAgent {
    pub fn new(config: &LLMConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential("llm.api_key"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    /// Scores a resume against a job description, out of 100, with suggestions.
    pub async fn check_compatibility(
        &self,
        job_description: &str,
        resume: &str,
    ) -> Result<String, ServiceError> {
        let prompt = compatibility_prompt(job_description, resume)?;

        info!("checking resume compatibility (model: {})", self.model);
        self.call_gemini_api(&prompt).await
    }

    /// Single attempt; failures go straight back to the caller.
    async fn call_gemini_api(&self, prompt: &str) -> Result<String, ServiceError> {
        debug!("prompt length: {} characters", prompt.len());

        let request_body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS
            }
        });

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        // The URL carries the api key, so it is stripped from any transport error.
        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;
        let text = extract_text(&body).ok_or(ServiceError::EmptyResponse)?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl Summarizer for SummaryAgent {
    async fn summarize(&self, text: &str) -> Result<String, ServiceError> {
        info!("summarizing job listings (model: {})", self.model);
        self.call_gemini_api(&SUMMARY_PROMPT.replace("{listings}", text))
            .await
    }
}

/// Summarizes the listings, or returns `None` when there is nothing to summarize.
pub async fn summarize_postings(
    summarizer: &dyn Summarizer,
    postings: &[JobPosting],
) -> Result<Option<String>, ServiceError> {
    if postings.is_empty() {
        return Ok(None);
    }

    summarizer.summarize(&listings_text(postings)).await.map(Some)
}

/// Plain-text block describing each posting, as handed to the completion service.
pub fn listings_text(postings: &[JobPosting]) -> String {
    postings
        .iter()
        .map(|p| {
            format!(
                "Title: {}\nCompany: {}\nJob Portal: {}\nLocation: {}\n",
                p.title(),
                p.company(),
                p.portal(),
                p.location()
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n\n")
}

fn compatibility_prompt(job_description: &str, resume: &str) -> Result<String, ServiceError> {
    let job_description = job_description.trim();
    if job_description.is_empty() {
        return Err(ServiceError::InvalidInput("job description must not be empty"));
    }
    let resume = resume.trim();
    if resume.is_empty() {
        return Err(ServiceError::InvalidInput("resume must not be empty"));
    }

    Ok(COMPATIBILITY_PROMPT
        .replace("{job_description}", job_description)
        .replace("{resume}", resume))
}

fn extract_text(body: &Value) -> Option<&str> {
    body.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .filter(|t| !t.trim().is_empty())
}
