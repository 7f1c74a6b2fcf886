// src/document/model.rs

use serde::{Deserialize, Deserializer, Serialize};

/// One executable unit: an ordered command list plus metadata.
///
/// Field names mirror the agent's document schema (`ID`, `RunCommand`,
/// `WorkingDirectory`, `TimeoutSeconds`); camelCase spellings are accepted as
/// aliases. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier used to namespace the document's output directory.
    ///
    /// May be empty for a legacy single-document payload; see
    /// [`Document::resolved_id`].
    #[serde(rename = "ID", alias = "id", default)]
    pub id: String,

    /// Command lines, executed as one logical unit.
    #[serde(
        rename = "RunCommand",
        alias = "runCommand",
        default,
        deserialize_with = "deserialize_commands"
    )]
    pub commands: Vec<String>,

    /// Directory the commands run in; empty means the agent's own cwd.
    #[serde(rename = "WorkingDirectory", alias = "workingDirectory", default)]
    pub working_directory: String,

    /// String-encoded timeout in seconds. JSON numbers are accepted and kept
    /// in their decimal form.
    #[serde(
        rename = "TimeoutSeconds",
        alias = "timeoutSeconds",
        default,
        deserialize_with = "deserialize_timeout"
    )]
    pub timeout_seconds: String,
}

impl Document {
    pub fn new(id: impl Into<String>, commands: Vec<String>) -> Self {
        Self {
            id: id.into(),
            commands,
            working_directory: String::new(),
            timeout_seconds: String::new(),
        }
    }

    /// The id to use for paths and remote keys: the document id, or the
    /// plugin id when the document carries none.
    pub fn resolved_id<'a>(&'a self, plugin_id: &'a str) -> &'a str {
        if self.id.is_empty() {
            plugin_id
        } else {
            &self.id
        }
    }

    /// Commands joined into a single script body.
    pub fn script_body(&self) -> String {
        let mut body = self.commands.join("\n");
        body.push('\n');
        body
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn deserialize_commands<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(line) => vec![line],
        OneOrMany::Many(lines) => lines,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_timeout<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => match n.as_f64() {
            // `30.0` is a whole number of seconds, keep it parseable.
            Some(f) if n.is_f64() && f.fract() == 0.0 && f >= 0.0 => format!("{f:.0}"),
            _ => n.to_string(),
        },
    })
}
