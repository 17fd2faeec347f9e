//! Response Interpreter — best-effort parsing of free-text model replies.
//!
//! Nothing here validates model output against a schema. Misses are reported as
//! explicit `Unparsed` variants so callers can tell "0%" from "no score found".

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::warn;

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)%").unwrap());

const EMPHASIS: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchScore {
    /// The first `<digits>%` in the reply. Not clamped: "150%" stays 150.
    Parsed { percent: u32 },
    Unparsed,
}

impl MatchScore {
    pub fn value_or_zero(&self) -> u32 {
        match self {
            MatchScore::Parsed { percent } => *percent,
            MatchScore::Unparsed => 0,
        }
    }
}

/// Takes the first run of digits immediately followed by `%`. An earlier,
/// unrelated percentage in the reply wins; that is accepted lossiness.
pub fn extract_match_score(reply: &str) -> MatchScore {
    PERCENT_RE
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|percent| MatchScore::Parsed { percent })
        .unwrap_or(MatchScore::Unparsed)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "keywords", rename_all = "snake_case")]
pub enum KeywordSet {
    Parsed(Vec<String>),
    Unparsed,
}

impl KeywordSet {
    pub fn as_slice(&self) -> &[String] {
        match self {
            KeywordSet::Parsed(keywords) => keywords,
            KeywordSet::Unparsed => &[],
        }
    }
}

/// Comma split with trimming. Order and duplicates are kept, and so are empty
/// tokens from a malformed reply.
pub fn split_keywords(reply: &str) -> Vec<String> {
    reply.split(',').map(|kw| kw.trim().to_string()).collect()
}

pub fn parse_keywords(reply: &str) -> KeywordSet {
    let keywords = split_keywords(reply);
    if keywords.iter().all(|kw| kw.is_empty()) {
        KeywordSet::Unparsed
    } else {
        KeywordSet::Parsed(keywords)
    }
}

/// Byte range into the unmarked source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// Source text with every merged span wrapped in `**`.
    pub text: String,
    pub spans: Vec<Span>,
}

/// Marks every case-insensitive literal occurrence of each keyword.
///
/// All matches are found against the unmarked source text before anything is
/// rendered. Overlapping or touching matches are merged into their union, so a
/// keyword nested inside another match ("on" in "Python") never produces
/// nested or doubled markers. Marked text keeps the source's casing.
pub fn highlight(text: &str, keywords: &[String]) -> Highlight {
    let spans = merge_spans(collect_spans(text, keywords));
    Highlight {
        text: render(text, &spans),
        spans,
    }
}

fn collect_spans(text: &str, keywords: &[String]) -> Vec<Span> {
    let mut spans = Vec::new();
    for keyword in keywords.iter().filter(|kw| !kw.is_empty()) {
        let pattern = match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("Skipping keyword {keyword:?}: {e}");
                continue;
            }
        };
        spans.extend(pattern.find_iter(text).map(|m| Span {
            start: m.start(),
            end: m.end(),
        }));
    }
    spans
}

fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

fn render(text: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * EMPHASIS.len() * 2);
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(EMPHASIS);
        out.push_str(&text[span.start..span.end]);
        out.push_str(EMPHASIS);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
