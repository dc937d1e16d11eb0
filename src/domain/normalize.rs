//! Response normalization: turns raw model text into a best-effort JSON candidate.
//!
//! Lenient by construction. The goal is to hand the contract validator
//! something parseable whenever the model wrapped an otherwise valid object in
//! code fences or prose; it never fails and never guarantees valid JSON.

const FENCE: &str = "```";

/// Normalize raw model text into a JSON candidate string.
pub fn normalize(text: &str) -> String {
    let unfenced = strip_code_fences(text);
    let trimmed = unfenced.trim();

    if is_brace_block(trimmed) {
        return trimmed.to_string();
    }

    match extract_brace_span(trimmed) {
        Some(span) => span.to_string(),
        None => trimmed.to_string(),
    }
}

/// Span from the first `{` through the last `}`, if both exist in order.
///
/// Not bracket-balanced: multiple objects or stray braces inside prose widen
/// the span. Kept standalone so a stricter extractor can replace it.
pub fn extract_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn is_brace_block(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('{') && text.ends_with('}')
}

/// Drop fence markers that open or close a line. Opening markers also lose
/// their language tag. Backticks elsewhere in a line are content.
fn strip_code_fences(text: &str) -> String {
    text.lines().filter_map(strip_fence_line).collect::<Vec<_>>().join("\n")
}

fn strip_fence_line(line: &str) -> Option<&str> {
    let mut line = line;
    if let Some(rest) = line.trim_start().strip_prefix(FENCE) {
        let rest = rest.trim_start_matches('`');
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        line = &rest[tag_len..];
    }
    if let Some(rest) = line.trim_end().strip_suffix(FENCE) {
        line = rest.trim_end_matches('`');
    }
    (!line.trim().is_empty()).then_some(line)
}
