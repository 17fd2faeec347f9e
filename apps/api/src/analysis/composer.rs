//! Pairs fixed task instructions with the resume image and
//! the job description.

use serde::{Deserialize, Serialize};

use super::prompts::{
    ANALYSIS_PROMPT, COVER_LETTER_PROMPT_TEMPLATE, INTERVIEW_PREP_PROMPT,
    KEYWORDS_PROMPT_TEMPLATE, MARKET_POSITION_PROMPT, SKILL_PLAN_PROMPT, SUGGESTIONS_PROMPT,
};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{InlineImage, Part};

/// The reports that are a single model call over (instruction, resume, job description).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Analysis,
    Suggestions,
    InterviewPrep,
    MarketPosition,
    SkillPlan,
}

impl ReportKind {
    pub fn instruction(&self) -> &'static str {
        match self {
            ReportKind::Analysis => ANALYSIS_PROMPT,
            ReportKind::Suggestions => SUGGESTIONS_PROMPT,
            ReportKind::InterviewPrep => INTERVIEW_PREP_PROMPT,
            ReportKind::MarketPosition => MARKET_POSITION_PROMPT,
            ReportKind::SkillPlan => SKILL_PLAN_PROMPT,
        }
    }
}

/// `[instruction, resume image, job description]`, in that order.
pub fn compose(instruction: &str, resume_image: &InlineImage, job_description: &str) -> Vec<Part> {
    vec![
        Part::text(instruction),
        Part::InlineImage(resume_image.clone()),
        Part::text(job_description),
    ]
}

pub fn keywords_prompt(job_description: &str) -> String {
    KEYWORDS_PROMPT_TEMPLATE.replace("{job_description}", job_description)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    #[serde(rename = "Technical Skills")]
    TechnicalSkills,
    #[serde(rename = "Leadership Experience")]
    LeadershipExperience,
    #[serde(rename = "Project Highlights")]
    ProjectHighlights,
    #[serde(rename = "Cultural Fit")]
    CulturalFit,
    #[serde(rename = "Problem-Solving Abilities")]
    ProblemSolving,
    #[serde(rename = "Industry Knowledge")]
    IndustryKnowledge,
}

impl FocusArea {
    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::TechnicalSkills => "Technical Skills",
            FocusArea::LeadershipExperience => "Leadership Experience",
            FocusArea::ProjectHighlights => "Project Highlights",
            FocusArea::CulturalFit => "Cultural Fit",
            FocusArea::ProblemSolving => "Problem-Solving Abilities",
            FocusArea::IndustryKnowledge => "Industry Knowledge",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoverLetterOptions {
    #[serde(default)]
    pub company_name: Option<String>,
    /// Leave blank if unknown.
    #[serde(default)]
    pub hiring_manager: Option<String>,
    #[serde(default)]
    pub focus_areas: Vec<FocusArea>,
}

pub fn cover_letter_prompt(options: &CoverLetterOptions) -> String {
    let company = non_blank(options.company_name.as_deref()).unwrap_or("[Company Name]");
    let hiring_manager = non_blank(options.hiring_manager.as_deref()).unwrap_or("Hiring Manager");
    let focus_areas = if options.focus_areas.is_empty() {
        "balanced approach".to_string()
    } else {
        options
            .focus_areas
            .iter()
            .map(FocusArea::label)
            .collect::<Vec<_>>()
            .join(", ")
    };

    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("company", company),
            ("hiring_manager", hiring_manager),
            ("focus_areas", &focus_areas),
        ],
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_orders_parts() {
        let image = InlineImage::jpeg(b"page");
        let parts = compose(ReportKind::Suggestions.instruction(), &image, "Rust engineer");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], Part::text(SUGGESTIONS_PROMPT));
        assert_eq!(parts[1], Part::InlineImage(image));
        assert_eq!(parts[2], Part::text("Rust engineer"));
    }

    #[test]
    fn test_analysis_prompt_asks_for_leading_percentage() {
        assert!(ReportKind::Analysis.instruction().contains("\"XX%\""));
    }

    #[test]
    fn test_keywords_prompt_embeds_job_description() {
        let prompt = keywords_prompt("Senior SQL analyst");
        assert!(prompt.contains("top 15"));
        assert!(prompt.ends_with("Senior SQL analyst"));
    }

    #[test]
    fn test_cover_letter_defaults() {
        let prompt = cover_letter_prompt(&CoverLetterOptions::default());
        assert!(prompt.contains("- Company: [Company Name]"));
        assert!(prompt.contains("- Hiring Manager: Hiring Manager"));
        assert!(prompt.contains("Focus areas: balanced approach"));
    }

    #[test]
    fn test_cover_letter_blank_fields_use_defaults() {
        let options = CoverLetterOptions {
            company_name: Some("   ".to_string()),
            hiring_manager: Some(String::new()),
            focus_areas: vec![],
        };
        let prompt = cover_letter_prompt(&options);
        assert!(prompt.contains("- Company: [Company Name]"));
        assert!(prompt.contains("- Hiring Manager: Hiring Manager"));
    }

    #[test]
    fn test_cover_letter_uses_provided_details() {
        let options = CoverLetterOptions {
            company_name: Some("Acme".to_string()),
            hiring_manager: Some("Dana Lee".to_string()),
            focus_areas: vec![FocusArea::TechnicalSkills, FocusArea::CulturalFit],
        };
        let prompt = cover_letter_prompt(&options);
        assert!(prompt.contains("- Company: Acme"));
        assert!(prompt.contains("- Hiring Manager: Dana Lee"));
        assert!(prompt.contains("Focus areas: Technical Skills, Cultural Fit"));
    }

    #[test]
    fn test_cover_letter_values_are_not_substituted_twice() {
        let options = CoverLetterOptions {
            company_name: Some("Acme".to_string()),
            hiring_manager: Some("{company}".to_string()),
            focus_areas: vec![],
        };
        let prompt = cover_letter_prompt(&options);
        assert!(prompt.contains("- Hiring Manager: {company}"));
        assert!(prompt.contains("- Company: Acme"));
    }

    #[test]
    fn test_focus_area_deserializes_from_label() {
        let areas: Vec<FocusArea> =
            serde_json::from_str(r#"["Problem-Solving Abilities", "Industry Knowledge"]"#).unwrap();
        assert_eq!(
            areas,
            vec![FocusArea::ProblemSolving, FocusArea::IndustryKnowledge]
        );
        assert!(serde_json::from_str::<FocusArea>(r#""Juggling""#).is_err());
    }
}
