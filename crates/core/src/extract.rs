//! Best-effort location of a JSON object inside model output.
//!
//! Models are asked for bare JSON but sometimes wrap it in prose. This is a
//! heuristic, not a parser: it takes the span from the first `{` to the last
//! `}` and will happily return something that is not valid JSON when the
//! text holds several brace-delimited blocks or prose with stray braces.

/// Returns the JSON object candidate in `text`, if any.
///
/// If the trimmed text already starts with `{` and ends with `}` it is
/// returned as is. Otherwise the greedy span from the first `{` to the last
/// `}` after it is returned.
pub fn extract_json(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.starts_with('{') && text.ends_with('}') {
        return Some(text);
    }

    let start = text.find('{')?;
    let end = text[start..].rfind('}')? + start;
    Some(&text[start..=end])
}
