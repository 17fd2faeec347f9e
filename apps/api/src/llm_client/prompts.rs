// Cross-cutting prompt fragments used by the gateway itself and by ingestion.
// Task prompts live in analysis/prompts.rs and search/prompts.rs.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Liveness probe. The reply is expected to contain "OK".
pub const STATUS_PROBE: &str = "Hello, please respond with 'OK' if you can receive this message.";

/// Per-page optical text extraction prompt, sent with one page image.
pub const OCR_PROMPT: &str =
    "Extract all text from this image, preserve formatting as much as possible.";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Substitutes `{name}` placeholders in a single pass. Inserted values are
/// never rescanned, and unknown placeholders are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
