//! Markdown report of a job search, one section per result.

use std::fmt::Write;

use super::{JobMatch, SearchOutcome};

const HEADER: &str = "## Personalized Job Search Results\n\n";

pub fn render_markdown(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::NoResults { reason, .. } => reason.message(),
        SearchOutcome::Found { results, .. } => render_results(results),
    }
}

fn render_results(results: &[JobMatch]) -> String {
    let mut out = String::from(HEADER);
    for (idx, job) in results.iter().enumerate() {
        let analysis = match &job.relevance {
            Ok(commentary) => commentary.clone(),
            Err(error) => format!("Relevance analysis failed: {error}"),
        };
        let _ = write!(
            out,
            "### {}. {}\n\n**Link:** [{url}]({url})\n\n**Description:** {}\n\n**Relevance Analysis:**\n{}\n\n---\n\n",
            idx + 1,
            job.hit.title,
            job.hit.snippet,
            analysis,
            url = job.hit.url,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::client::{NoResultsReason, SearchHit};

    fn job(title: &str, relevance: Result<String, String>) -> JobMatch {
        JobMatch {
            hit: SearchHit {
                title: title.to_string(),
                url: "https://linkedin.com/jobs/1".to_string(),
                snippet: "Build pipelines".to_string(),
            },
            relevance,
        }
    }

    #[test]
    fn test_render_numbers_sections_and_inlines_failures() {
        let outcome = SearchOutcome::Found {
            query: "q".to_string(),
            results: vec![
                job("Data Engineer", Ok("85% match".to_string())),
                job("Analyst", Err("API error (status 503): busy".to_string())),
            ],
        };
        let md = render_markdown(&outcome);

        assert!(md.starts_with("## Personalized Job Search Results"));
        assert!(md.contains("### 1. Data Engineer"));
        assert!(md.contains("**Link:** [https://linkedin.com/jobs/1](https://linkedin.com/jobs/1)"));
        assert!(md.contains("**Relevance Analysis:**\n85% match"));
        assert!(md.contains("### 2. Analyst"));
        assert!(md.contains("Relevance analysis failed: API error (status 503): busy"));
        assert_eq!(md.matches("---").count(), 2);
    }

    #[test]
    fn test_render_no_results_uses_reason_message() {
        let outcome = SearchOutcome::NoResults {
            query: "q".to_string(),
            reason: NoResultsReason::Empty,
        };
        assert_eq!(render_markdown(&outcome), "No job results found");
    }
}
