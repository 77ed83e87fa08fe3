//! Embedded JSON payload extraction from script tags.
//!
//! Booking pages ship their initial state as `window.IBU_HOTEL = {...};`
//! inside an inline `<script>`. The search here is a best-effort regex cut
//! followed by a JSON parse; callers only see parsed values or parse errors.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ExtractionError;

/// Global the booking site assigns its page state to.
pub const IBU_HOTEL_MARKER: &str = "window.IBU_HOTEL";

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex"));

/// Builds the assignment pattern for `marker`: the shortest `{...};` that
/// follows `<marker> =`, spanning newlines.
fn assignment_regex(marker: &str) -> Regex {
    let pattern = format!(r"(?s){}\s*=\s*(\{{.*?\}});", regex::escape(marker));
    Regex::new(&pattern).expect("escaped marker forms a valid regex")
}

/// Lazily extracts the payload assigned to `marker` from each fragment.
///
/// Fragments without an assignment are skipped. A fragment whose captured
/// object fails to parse yields [`ExtractionError::Parse`] and extraction
/// continues with the next fragment.
pub fn extract_payloads<I>(
    fragments: I,
    marker: &str,
) -> impl Iterator<Item = Result<Value, ExtractionError>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let re = assignment_regex(marker);
    fragments
        .into_iter()
        .enumerate()
        .filter_map(move |(fragment_index, fragment)| {
            let json = re.captures(fragment.as_ref())?.get(1)?.as_str();
            Some(
                serde_json::from_str::<Value>(json).map_err(|source| ExtractionError::Parse {
                    fragment_index,
                    source,
                }),
            )
        })
}

/// Returns the bodies of `<script>` tags in `html` that mention `marker`.
pub fn script_fragments<'a>(html: &'a str, marker: &str) -> Vec<&'a str> {
    SCRIPT_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .filter(|content| content.contains(marker))
        .collect()
}

/// Extracts every `marker` payload from the inline scripts of an HTML page.
pub fn extract_from_html(html: &str, marker: &str) -> Vec<Result<Value, ExtractionError>> {
    extract_payloads(script_fragments(html, marker), marker).collect()
}
