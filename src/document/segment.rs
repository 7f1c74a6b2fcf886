// src/document/segment.rs

//! Path segments derived from document ids.

use std::sync::LazyLock;

use regex::Regex;

static INVALID_SEGMENT_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("static regex is valid")
});

/// Fallback directory name when neither the document id nor the plugin id
/// leaves anything usable.
pub const FALLBACK_SEGMENT: &str = "document";

/// Strip characters that are not allowed in a single path segment.
///
/// Returns `None` when nothing usable is left (empty, `.` or `..`).
pub fn sanitize_segment(raw: &str) -> Option<String> {
    let cleaned = INVALID_SEGMENT_CHARS.replace_all(raw, "").into_owned();
    match cleaned.as_str() {
        "" | "." | ".." => None,
        _ => Some(cleaned),
    }
}

/// Directory name for the document with resolved id `document_id`.
///
/// Two documents of one invocation must never map to the same name; the
/// normalizer rejects payloads where they would.
pub fn directory_segment(document_id: &str, plugin_id: &str) -> String {
    sanitize_segment(document_id)
        .or_else(|| sanitize_segment(plugin_id))
        .unwrap_or_else(|| FALLBACK_SEGMENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_reserved_characters() {
        assert_eq!(
            sanitize_segment("0.aws:runScript").as_deref(),
            Some("0.awsrunScript")
        );
        assert_eq!(sanitize_segment("a/b\\c").as_deref(), Some("abc"));
        assert_eq!(sanitize_segment("../"), None);
        assert_eq!(sanitize_segment(""), None);
    }

    #[test]
    fn directory_segment_falls_back_in_order() {
        assert_eq!(directory_segment("doc-1", "aws:runScript1"), "doc-1");
        assert_eq!(directory_segment("..", "aws:runScript1"), "awsrunScript1");
        assert_eq!(directory_segment("..", "::"), FALLBACK_SEGMENT);
    }
}
