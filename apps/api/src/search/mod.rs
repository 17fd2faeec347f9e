//! Search Augmentation — job-board search seeded from the resume and job
//! description, with per-result relevance commentary from the model.
//!
//! Flow: key check → skills (model) → job title (model) → query → search API →
//!       one relevance call per hit, sequentially.
//! A failed relevance call is kept on its item; it never aborts the batch.

pub mod client;
pub mod handlers;
pub mod prompts;
pub mod query;
pub mod render;

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::fill_template;
use crate::llm_client::{LlmError, ModelGateway, Part};
use client::{NoResultsReason, SearchBackend, SearchHit, SearchResponse};
use prompts::{JOB_CONTEXT_PROMPT_TEMPLATE, RELEVANCE_PROMPT_TEMPLATE, SKILLS_PROMPT_TEMPLATE};
use query::{build_query, parse_job_title};

pub const DEFAULT_RESULT_COUNT: u8 = 5;
pub const MAX_RESULT_COUNT: u8 = 10;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API key is not configured")]
    MissingApiKey,

    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search response could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not find a job title in the model reply")]
    TitleNotFound,

    #[error("Model call failed: {0}")]
    Llm(#[from] LlmError),
}

/// A search hit plus the model's commentary on it, or why that commentary is missing.
#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    #[serde(flatten)]
    pub hit: SearchHit,
    #[serde(serialize_with = "serialize_relevance")]
    pub relevance: Result<String, String>,
}

fn serialize_relevance<S: Serializer>(
    relevance: &Result<String, String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(tag = "status", rename_all = "snake_case")]
    enum Wire<'a> {
        Ok { commentary: &'a str },
        Failed { error: &'a str },
    }

    match relevance {
        Ok(commentary) => Wire::Ok { commentary }.serialize(serializer),
        Err(error) => Wire::Failed { error }.serialize(serializer),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found {
        query: String,
        results: Vec<JobMatch>,
    },
    NoResults {
        query: String,
        reason: NoResultsReason,
    },
}

pub async fn find_jobs(
    backend: &dyn SearchBackend,
    gateway: &dyn ModelGateway,
    resume_text: &str,
    job_description: &str,
    count: u8,
) -> Result<SearchOutcome, SearchError> {
    if !backend.is_configured() {
        return Err(SearchError::MissingApiKey);
    }

    let skills_prompt = SKILLS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let profile_skills = gateway
        .generate(&[Part::text(skills_prompt)])
        .await?
        .trim()
        .to_string();

    let context_prompt = JOB_CONTEXT_PROMPT_TEMPLATE.replace("{job_description}", job_description);
    let job_context = gateway.generate(&[Part::text(context_prompt)]).await?;
    let job_title = parse_job_title(&job_context).ok_or(SearchError::TitleNotFound)?;

    let query = build_query(&job_title, &profile_skills);
    info!("Searching job boards: {query}");

    let hits = match backend.search(&query, count).await? {
        SearchResponse::Hits(hits) => hits,
        SearchResponse::NoResults(reason) => {
            info!("No search results: {}", reason.message());
            return Ok(SearchOutcome::NoResults { query, reason });
        }
    };

    let mut results = Vec::with_capacity(hits.len());
    for hit in hits {
        let relevance = assess_relevance(gateway, &profile_skills, &hit).await;
        results.push(JobMatch { hit, relevance });
    }

    Ok(SearchOutcome::Found { query, results })
}

async fn assess_relevance(
    gateway: &dyn ModelGateway,
    profile_skills: &str,
    hit: &SearchHit,
) -> Result<String, String> {
    let prompt = fill_template(
        RELEVANCE_PROMPT_TEMPLATE,
        &[
            ("skills", profile_skills),
            ("title", &hit.title),
            ("snippet", &hit.snippet),
        ],
    );

    gateway
        .generate(&[Part::text(prompt)])
        .await
        .map_err(|e| {
            warn!("Relevance analysis failed for '{}': {e}", hit.title);
            e.to_string()
        })
}
