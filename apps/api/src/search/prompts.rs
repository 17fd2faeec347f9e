// Prompts for the search augmentation pipeline. All are text-only.

/// Replace: {resume_text}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Extract the top 10 most relevant professional skills from this resume:
{resume_text}
Return as a comma-separated list of skills."#;

/// The "Job Title:" line is what the title parser keys on.
/// Replace: {job_description}
pub const JOB_CONTEXT_PROMPT_TEMPLATE: &str = r#"Extract the exact job title and 3-5 most critical requirements from this job description:
{job_description}

Format your response as:
Job Title: [Exact Job Title]
Key Requirements:
1. [Requirement 1]
2. [Requirement 2]
3. [Requirement 3]"#;

/// Replace: {skills}, {title}, {snippet}
pub const RELEVANCE_PROMPT_TEMPLATE: &str = r#"Analyze the relevance of this job to the candidate's profile:

Candidate Skills: {skills}
Job Title: {title}
Job Description: {snippet}

Provide:
1. Relevance Score (0-100%)
2. Key Matching Skills
3. Potential Fit Commentary"#;
