//! Search query construction from model-extracted profile data.

const TITLE_MARKER: &str = "Job Title:";
const QUERY_SKILL_COUNT: usize = 3;

/// `"<title>" jobs <first three skills> hiring now`.
///
/// Skills are the comma-separated model reply. The first three entries are
/// taken as they come and trimmed; blank ones among them add nothing.
pub fn build_query(job_title: &str, profile_skills: &str) -> String {
    let skills: Vec<&str> = profile_skills
        .split(',')
        .take(QUERY_SKILL_COUNT)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    format!("\"{}\" jobs {} hiring now", job_title, skills.join(" "))
}

/// Reads the rest of the line after the first `Job Title:` marker.
/// Markdown bold around the value is stripped.
pub fn parse_job_title(reply: &str) -> Option<String> {
    let (_, rest) = reply.split_once(TITLE_MARKER)?;
    let title = rest
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches('*')
        .trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
