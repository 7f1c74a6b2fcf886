// src/engine/fold.rs

//! Pure fold of per-document results into one invocation output.
//!
//! Streams are concatenated in input order. Every document after the first
//! is preceded by a `----- <id> -----` line, so a one-document fold is the
//! document's own output.

use crate::engine::DocumentResult;
use crate::output::PluginOutput;

pub fn section_header(document_id: &str) -> String {
    format!("----- {document_id} -----")
}

fn join_sections<'a>(
    documents: &'a [DocumentResult],
    stream: impl Fn(&'a DocumentResult) -> &'a str,
) -> String {
    let mut joined = String::new();
    for (index, doc) in documents.iter().enumerate() {
        if index > 0 {
            joined.push('\n');
            joined.push_str(&section_header(&doc.document_id));
            joined.push('\n');
        }
        joined.push_str(stream(doc));
    }
    joined
}

/// Fold document results; `Failed` (exit code 1) if any document failed.
pub fn fold(documents: &[DocumentResult]) -> PluginOutput {
    let stdout = join_sections(documents, |d| d.output.stdout.as_str());
    let stderr = join_sections(documents, |d| d.output.stderr.as_str());

    if documents.iter().all(|d| d.output.is_success()) {
        PluginOutput::success(stdout, stderr)
    } else {
        PluginOutput::failed(stdout, stderr, 1)
    }
}
