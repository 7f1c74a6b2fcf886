// src/document/normalize.rs

//! Input normalization: raw plugin properties into an ordered document list.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

use crate::document::model::Document;
use crate::document::segment::directory_segment;
use crate::errors::{Result, RunScriptError};

/// The two payload shapes an invocation may carry.
///
/// Resolved exactly once, here; nothing downstream branches on shape.
#[derive(Debug, Clone, Copy)]
pub enum RawPayload<'a> {
    /// Legacy single-document invocation.
    One(&'a Value),
    /// Ordered list of documents.
    Many(&'a [Value]),
}

impl<'a> From<&'a Value> for RawPayload<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => RawPayload::Many(items),
            other => RawPayload::One(other),
        }
    }
}

impl<'a> RawPayload<'a> {
    fn elements(self) -> Vec<&'a Value> {
        match self {
            RawPayload::One(v) => vec![v],
            RawPayload::Many(items) => items.iter().collect(),
        }
    }
}

/// Turn raw plugin properties into validated documents, preserving order.
///
/// Fails as a whole on the first malformed element; there are no partial
/// results. `plugin_id` is used to resolve empty document ids when checking
/// id uniqueness.
pub fn normalize(raw: &Value, plugin_id: &str) -> Result<Vec<Document>> {
    if raw.is_null() {
        return Err(RunScriptError::InvalidPayload(
            "no plugin input supplied".to_string(),
        ));
    }

    let elements = RawPayload::from(raw).elements();
    if elements.is_empty() {
        return Err(RunScriptError::InvalidPayload(
            "plugin input contains no documents".to_string(),
        ));
    }

    let mut documents = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let doc: Document = serde_json::from_value(element.clone()).map_err(|e| {
            RunScriptError::InvalidPayload(format!("document #{index}: {e}"))
        })?;
        documents.push(doc);
    }

    validate_documents(&documents, plugin_id)?;

    debug!(count = documents.len(), "normalized plugin input");
    Ok(documents)
}

fn validate_documents(documents: &[Document], plugin_id: &str) -> Result<()> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut seen_dirs: HashMap<String, &str> = HashMap::new();

    for doc in documents {
        let id = doc.resolved_id(plugin_id);

        if doc.commands.iter().all(|c| c.trim().is_empty()) {
            return Err(RunScriptError::InvalidPayload(format!(
                "document '{id}': no commands specified"
            )));
        }

        if !seen_ids.insert(id) {
            return Err(RunScriptError::InvalidPayload(format!(
                "duplicate document id '{id}'"
            )));
        }

        let dir = directory_segment(id, plugin_id);
        if let Some(other) = seen_dirs.insert(dir.clone(), id) {
            return Err(RunScriptError::InvalidPayload(format!(
                "document ids '{other}' and '{id}' both map to output directory '{dir}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PLUGIN_ID: &str = "aws:runScript1";

    #[test]
    fn single_object_becomes_one_document() {
        let raw = json!({ "ID": "0.aws:runScript", "RunCommand": ["echo 0"] });
        let docs = normalize(&raw, PLUGIN_ID).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "0.aws:runScript");
    }

    #[test]
    fn list_order_is_preserved() {
        let raw = json!([
            { "ID": "b", "RunCommand": ["echo b"] },
            { "ID": "a", "RunCommand": ["echo a"] },
            { "ID": "c", "RunCommand": ["echo c"] },
        ]);
        let ids: Vec<String> = normalize(&raw, PLUGIN_ID)
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn malformed_element_fails_everything() {
        let raw = json!([
            { "ID": "ok", "RunCommand": ["echo ok"] },
            "not a document",
        ]);
        match normalize(&raw, PLUGIN_ID) {
            Err(RunScriptError::InvalidPayload(msg)) => assert!(msg.starts_with("document #1")),
            other => panic!("expected InvalidPayload, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let raw = json!({ "ID": 42, "RunCommand": ["echo"] });
        assert!(matches!(
            normalize(&raw, PLUGIN_ID),
            Err(RunScriptError::InvalidPayload(_))
        ));
    }

    #[test]
    fn empty_commands_are_a_validation_error() {
        let raw = json!({ "ID": "x", "RunCommand": [] });
        match normalize(&raw, PLUGIN_ID) {
            Err(RunScriptError::InvalidPayload(msg)) => {
                assert_eq!(msg, "document 'x': no commands specified")
            }
            other => panic!("expected InvalidPayload, got {other:?}"),
        }

        let raw = json!({ "ID": "y", "RunCommand": ["   "] });
        assert!(normalize(&raw, PLUGIN_ID).is_err());
    }

    #[test]
    fn duplicate_resolved_ids_are_rejected() {
        let raw = json!([
            { "RunCommand": ["echo 1"] },
            { "ID": PLUGIN_ID, "RunCommand": ["echo 2"] },
        ]);
        match normalize(&raw, PLUGIN_ID) {
            Err(RunScriptError::InvalidPayload(msg)) => assert!(msg.contains("duplicate")),
            other => panic!("expected InvalidPayload, got {other:?}"),
        }
    }

    #[test]
    fn null_and_empty_payloads_are_rejected() {
        assert!(normalize(&Value::Null, PLUGIN_ID).is_err());
        assert!(normalize(&json!([]), PLUGIN_ID).is_err());
    }

    #[test]
    fn ids_sharing_an_output_directory_are_rejected() {
        let raw = json!([
            { "ID": "a:b", "RunCommand": ["echo 1"] },
            { "ID": "ab", "RunCommand": ["echo 2"] },
        ]);
        match normalize(&raw, PLUGIN_ID) {
            Err(RunScriptError::InvalidPayload(msg)) => {
                assert_eq!(
                    msg,
                    "document ids 'a:b' and 'ab' both map to output directory 'ab'"
                )
            }
            other => panic!("expected InvalidPayload, got {other:?}"),
        }
    }

    #[test]
    fn unusable_id_collides_with_plugin_id_directory() {
        let raw = json!([
            { "ID": "..", "RunCommand": ["echo 1"] },
            { "ID": "awsrunScript1", "RunCommand": ["echo 2"] },
        ]);
        assert!(matches!(
            normalize(&raw, PLUGIN_ID),
            Err(RunScriptError::InvalidPayload(_))
        ));
    }
}
