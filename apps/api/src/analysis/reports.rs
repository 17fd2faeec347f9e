//! Report generation: one model call per report, then best-effort interpretation.

use serde::Serialize;
use tracing::info;

use super::composer::{compose, cover_letter_prompt, keywords_prompt, CoverLetterOptions, ReportKind};
use super::interpreter::{extract_match_score, highlight, parse_keywords, Highlight, KeywordSet, MatchScore};
use crate::ingestion::UploadedResume;
use crate::llm_client::{LlmError, ModelGateway, Part};

#[derive(Debug, Clone, Serialize)]
pub struct MatchAnalysis {
    pub match_score: MatchScore,
    /// `match_score` with a miss read as 0, for gauges that need a number.
    pub match_percent: u32,
    pub report: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordHighlight {
    pub keywords: KeywordSet,
    #[serde(flatten)]
    pub highlight: Highlight,
}

pub async fn generate_report(
    gateway: &dyn ModelGateway,
    kind: ReportKind,
    resume: &UploadedResume,
    job_description: &str,
) -> Result<String, LlmError> {
    info!("Generating {kind:?} report");
    let parts = compose(kind.instruction(), &resume.first_page, job_description);
    gateway.generate(&parts).await
}

pub async fn analyze_match(
    gateway: &dyn ModelGateway,
    resume: &UploadedResume,
    job_description: &str,
) -> Result<MatchAnalysis, LlmError> {
    let report = generate_report(gateway, ReportKind::Analysis, resume, job_description).await?;
    let match_score = extract_match_score(&report);
    info!("Match score: {match_score:?}");
    Ok(MatchAnalysis {
        match_score,
        match_percent: match_score.value_or_zero(),
        report,
    })
}

pub async fn generate_cover_letter(
    gateway: &dyn ModelGateway,
    resume: &UploadedResume,
    job_description: &str,
    options: &CoverLetterOptions,
) -> Result<String, LlmError> {
    info!(
        "Generating cover letter ({} focus area(s))",
        options.focus_areas.len()
    );
    let parts = compose(&cover_letter_prompt(options), &resume.first_page, job_description);
    gateway.generate(&parts).await
}

/// Text-only call: the resume image is not sent.
pub async fn extract_keywords(
    gateway: &dyn ModelGateway,
    job_description: &str,
) -> Result<KeywordSet, LlmError> {
    let reply = gateway
        .generate(&[Part::text(keywords_prompt(job_description))])
        .await?;
    Ok(parse_keywords(&reply))
}

pub async fn highlight_resume(
    gateway: &dyn ModelGateway,
    resume_text: &str,
    job_description: &str,
) -> Result<KeywordHighlight, LlmError> {
    let keywords = extract_keywords(gateway, job_description).await?;
    let highlight = highlight(resume_text, keywords.as_slice());
    info!(
        "Highlighted {} span(s) from {} keyword(s)",
        highlight.spans.len(),
        keywords.as_slice().len()
    );
    Ok(KeywordHighlight {
        keywords,
        highlight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::composer::FocusArea;
    use crate::llm_client::testing::ScriptedGateway;
    use crate::llm_client::InlineImage;
    use chrono::Utc;

    fn resume() -> UploadedResume {
        UploadedResume {
            first_page: InlineImage::jpeg(b"page-one"),
            page_count: 1,
            text: "I used Python and python daily".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_analyze_match_extracts_score() {
        let gateway = ScriptedGateway::replying(&["82%\nOVERVIEW: solid"]);
        let analysis = analyze_match(&gateway, &resume(), "Data role").await.unwrap();
        assert_eq!(analysis.match_score, MatchScore::Parsed { percent: 82 });
        assert_eq!(analysis.report, "82%\nOVERVIEW: solid");

        let calls = gateway.calls();
        assert_eq!(calls[0].len(), 3);
        assert_eq!(calls[0][1], Part::InlineImage(InlineImage::jpeg(b"page-one")));
    }

    #[tokio::test]
    async fn test_analyze_match_without_percentage_is_unparsed() {
        let gateway = ScriptedGateway::replying(&["Looks fine overall."]);
        let analysis = analyze_match(&gateway, &resume(), "Data role").await.unwrap();
        assert_eq!(analysis.match_score, MatchScore::Unparsed);
        assert_eq!(analysis.match_percent, 0);
    }

    #[tokio::test]
    async fn test_generate_report_propagates_failure() {
        let gateway = ScriptedGateway::new(vec![Err(LlmError::Api {
            status: 429,
            message: "quota".to_string(),
        })]);
        let err = generate_report(&gateway, ReportKind::SkillPlan, &resume(), "jd")
            .await
            .unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_cover_letter_prompt_reaches_model() {
        let gateway = ScriptedGateway::replying(&["Dear Hiring Manager,"]);
        let options = CoverLetterOptions {
            company_name: Some("Acme".to_string()),
            hiring_manager: None,
            focus_areas: vec![FocusArea::ProjectHighlights],
        };
        let letter = generate_cover_letter(&gateway, &resume(), "jd", &options)
            .await
            .unwrap();
        assert_eq!(letter, "Dear Hiring Manager,");

        match &gateway.calls()[0][0] {
            Part::Text(prompt) => {
                assert!(prompt.contains("- Company: Acme"));
                assert!(prompt.contains("Focus areas: Project Highlights"));
            }
            other => panic!("expected text instruction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_highlight_resume_sends_text_only_prompt() {
        let gateway = ScriptedGateway::replying(&["Python, on"]);
        let result = highlight_resume(&gateway, &resume().text, "Python developer")
            .await
            .unwrap();

        assert_eq!(
            result.keywords,
            KeywordSet::Parsed(vec!["Python".to_string(), "on".to_string()])
        );
        assert_eq!(
            result.highlight.text,
            "I used **Python** and **python** daily"
        );
        assert_eq!(gateway.calls()[0].len(), 1);
    }

    #[tokio::test]
    async fn test_highlight_resume_with_blank_reply_leaves_text() {
        let gateway = ScriptedGateway::replying(&[""]);
        let result = highlight_resume(&gateway, "plain", "jd").await.unwrap();
        assert_eq!(result.keywords, KeywordSet::Unparsed);
        assert_eq!(result.highlight.text, "plain");
    }
}
