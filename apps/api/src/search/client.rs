//! Tavily search client. Advanced depth, restricted to job boards, raw page content included.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::SearchError;
use crate::config::Config;

pub const JOB_BOARD_DOMAINS: [&str; 4] = ["linkedin.com", "indeed.com", "glassdoor.com", "monster.com"];

const UNTITLED: &str = "Untitled Job";
const NO_LINK: &str = "#";
const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    include_domains: &'a [&'a str],
    max_results: u8,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    url: Option<String>,
    raw_content: Option<String>,
}

/// One search hit with defaults filled in for missing fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl From<TavilyResult> for SearchHit {
    fn from(result: TavilyResult) -> Self {
        Self {
            title: result.title.unwrap_or_else(|| UNTITLED.to_string()),
            url: result.url.unwrap_or_else(|| NO_LINK.to_string()),
            snippet: result
                .raw_content
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

/// Why a search came back without anything to rank. Not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoResultsReason {
    Empty,
    UpstreamStatus { status: u16, body: String },
}

impl NoResultsReason {
    pub fn message(&self) -> String {
        match self {
            NoResultsReason::Empty => "No job results found".to_string(),
            NoResultsReason::UpstreamStatus { status, body } => {
                format!("Search API error: {status}\n{body}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    Hits(Vec<SearchHit>),
    NoResults(NoResultsReason),
}

/// The search API seam. `TavilyClient` in production.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// False when no API key is configured; checked before any work starts.
    fn is_configured(&self) -> bool;

    async fn search(&self, query: &str, max_results: u8) -> Result<SearchResponse, SearchError>;
}

#[derive(Clone)]
pub struct TavilyClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
}

impl TavilyClient {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
                .build()?,
            api_key: config.tavily_api_key.clone(),
            api_url: config.tavily_api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchBackend for TavilyClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str, max_results: u8) -> Result<SearchResponse, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let request_body = TavilyRequest {
            api_key,
            query,
            search_depth: "advanced",
            include_domains: &JOB_BOARD_DOMAINS,
            max_results,
            include_raw_content: true,
        };

        debug!("Tavily search: {query}");
        let response = self
            .client
            .post(format!("{}/search", self.api_url))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        interpret_response(status, &body)
    }
}

/// Anything but 200 and an empty `results` list are both terminal "no results"
/// outcomes. Only an unreadable 200 body is an error.
pub fn interpret_response(status: u16, body: &str) -> Result<SearchResponse, SearchError> {
    if status != 200 {
        warn!("Tavily returned {status}");
        return Ok(SearchResponse::NoResults(NoResultsReason::UpstreamStatus {
            status,
            body: body.to_string(),
        }));
    }

    let parsed: TavilyResponse = serde_json::from_str(body)?;
    if parsed.results.is_empty() {
        return Ok(SearchResponse::NoResults(NoResultsReason::Empty));
    }

    Ok(SearchResponse::Hits(
        parsed.results.into_iter().map(SearchHit::from).collect(),
    ))
}
