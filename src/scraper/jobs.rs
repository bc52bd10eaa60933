use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use reqwest::Url;

use crate::error::{ConfigError, QueryError, UpstreamError};
use crate::models::job::{JobPosting, rank};
use crate::models::serpapi::SearchResponse;
use crate::utils::config::SearchConfig;

/// Parameters of one outbound search request.
#[derive(Clone)]
pub struct SearchRequest {
    pub engine: String,
    pub query: String,
    pub location: String,
    pub api_key: String,
}

impl SearchRequest {
    fn params(&self) -> [(&'static str, &str); 4] {
        [
            ("engine", self.engine.as_str()),
            ("q", self.query.as_str()),
            ("location", self.location.as_str()),
            ("api_key", self.api_key.as_str()),
        ]
    }
}

/// Sends a search request and returns the raw response body.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn fetch(&self, request: &SearchRequest) -> Result<String, UpstreamError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("job-radar/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn fetch(&self, request: &SearchRequest) -> Result<String, UpstreamError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(request.params());

        // The URL carries the api_key, so it is stripped from any transport error.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await.map_err(reqwest::Error::without_url)?)
    }
}

/// Runs job searches against the provider and turns the results into ranked postings.
pub struct JobQueryService<T = HttpTransport> {
    transport: T,
    engine: String,
    api_key: String,
}

impl JobQueryService<HttpTransport> {
    pub fn new(config: &SearchConfig) -> Result<Self, ConfigError> {
        let transport =
            HttpTransport::new(&config.endpoint, Duration::from_secs(config.timeout_secs))?;
        Self::with_transport(transport, config)
    }
}

impl<T: SearchTransport> JobQueryService<T> {
    pub fn with_transport(transport: T, config: &SearchConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential("search.api_key"))?;

        Ok(Self {
            transport,
            engine: config.engine.clone(),
            api_key: api_key.to_string(),
        })
    }

    pub async fn search(
        &self,
        query: &str,
        location: &str,
        max_results: usize,
    ) -> Result<Vec<JobPosting>, QueryError> {
        self.search_at(query, location, max_results, Utc::now())
            .await
    }

    /// Same as [`search`](Self::search) with relative dates resolved against `now`.
    pub async fn search_at(
        &self,
        query: &str,
        location: &str,
        max_results: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<JobPosting>, QueryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QueryError::InvalidArgument("query must not be empty"));
        }
        let location = location.trim();
        if location.is_empty() {
            return Err(QueryError::InvalidArgument("location must not be empty"));
        }

        info!("searching {} for '{}' in '{}'", self.engine, query, location);

        let request = SearchRequest {
            engine: self.engine.clone(),
            query: query.to_string(),
            location: location.to_string(),
            api_key: self.api_key.clone(),
        };
        let body = self.transport.fetch(&request).await?;
        debug!("search response length: {}", body.len());

        let response: SearchResponse =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        if response.jobs_results.is_empty() {
            if let Some(message) = response.error {
                warn!("provider reported: {}", message);
            }
            info!("no job postings found");
            return Ok(Vec::new());
        }

        let total = response.jobs_results.len();
        let mut postings: Vec<JobPosting> = response
            .jobs_results
            .into_iter()
            .take(max_results)
            .map(|raw| raw.into_posting(now))
            .collect();
        rank(&mut postings);

        info!("normalized {} of {} job postings", postings.len(), total);
        Ok(postings)
    }
}
