use std::path::PathBuf;
use std::sync::Arc;

use easy_config_store::ConfigStore;
use eyre::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub type Config = Arc<ConfigInner>;

const SEARCH_KEY_VAR: &str = "SERPAPI_API_KEY";
const LLM_KEY_VAR: &str = "GEMINI_API_KEY";

pub fn config(path: PathBuf) -> Result<Config> {
    let config_store = ConfigStore::<ConfigInner>::read(path, "config".to_string())?;
    let inner = (*config_store)
        .clone()
        .with_env_overrides(|name| std::env::var(name).ok());

    info!("config parsing successful");
    debug!(
        "loaded configuration:\n{}",
        toml::to_string_pretty(&inner.redacted())?
    );

    Ok(Arc::new(inner))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ConfigInner {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub llm: LLMConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_search_engine")]
    pub engine: String,
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_search_endpoint() -> String {
    "https://serpapi.com/search".to_string()
}

fn default_search_engine() -> String {
    "google_jobs".to_string()
}

fn default_search_timeout() -> u64 {
    30
}

fn default_max_results() -> usize {
    10
}

fn default_llm_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_llm_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

impl ConfigInner {
    /// Credentials from the environment win over the ones in the file.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(SEARCH_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.search.api_key = Some(key);
        }
        if let Some(key) = lookup(LLM_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
        self
    }

    fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let hide = |key: &mut Option<String>| {
            if key.is_some() {
                *key = Some("********".to_string());
            }
        };
        hide(&mut copy.search.api_key);
        hide(&mut copy.llm.api_key);
        copy
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_search_endpoint(),
            engine: default_search_engine(),
            timeout_secs: default_search_timeout(),
            default_max_results: default_max_results(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_llm_model(),
            endpoint: default_llm_endpoint(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl Default for ConfigInner {
    fn default() -> Self {
        let cfg = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.default.toml",));

        toml::from_str(cfg).unwrap() // should be okay
    }
}
