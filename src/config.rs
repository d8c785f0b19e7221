use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::arxiv::client::{DEFAULT_API_URL, DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT};
use crate::pipeline::search::SearchSettings;
use crate::topics::ranking::DEFAULT_TOP_N;

/// Central configuration loaded from environment variables.
///
/// Nothing here is secret; the arXiv API is public. A .env file is
/// loaded at startup via dotenvy, and CLI flags override these values.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// arXiv query endpoint (ARXIV_API_URL)
    pub api_url: String,
    /// Papers requested per search (PAPERSCOPE_MAX_RESULTS)
    pub max_results: usize,
    /// How many top terms to report (PAPERSCOPE_TOP_N)
    pub top_n: usize,
    /// HTTP request timeout (PAPERSCOPE_TIMEOUT_SECS)
    pub timeout: Duration,
    /// Extra stop terms, comma separated (PAPERSCOPE_EXTRA_STOP_TERMS)
    pub extra_stop_terms: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            top_n: DEFAULT_TOP_N,
            timeout: DEFAULT_TIMEOUT,
            extra_stop_terms: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys fall back to defaults;
    /// set-but-unparsable numbers are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("ARXIV_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_url);
        let max_results =
            parse_var(&lookup, "PAPERSCOPE_MAX_RESULTS")?.unwrap_or(defaults.max_results);
        let top_n = parse_var(&lookup, "PAPERSCOPE_TOP_N")?.unwrap_or(defaults.top_n);
        let timeout = parse_var::<u64, _>(&lookup, "PAPERSCOPE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let extra_stop_terms = lookup("PAPERSCOPE_EXTRA_STOP_TERMS")
            .map(|v| parse_term_list(&v))
            .unwrap_or_default();

        Ok(Self {
            api_url,
            max_results,
            top_n,
            timeout,
            extra_stop_terms,
        })
    }

    /// Reject values that would make a search meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            anyhow::bail!("max_results must be at least 1");
        }
        if self.top_n == 0 {
            anyhow::bail!("top_n must be at least 1");
        }
        if self.timeout.is_zero() {
            anyhow::bail!("PAPERSCOPE_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    /// Settings for the search pipeline.
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            max_results: self.max_results,
            top_n: self.top_n,
            extra_stop_terms: self.extra_stop_terms.clone(),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} is not a valid number: {raw:?}")),
        _ => Ok(None),
    }
}

/// Split a comma separated list, lowercasing and dropping blanks.
fn parse_term_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
