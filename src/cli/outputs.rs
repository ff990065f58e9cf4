//! Side-channel outputs for downstream CI steps.
//!
//! Values are written in the `GITHUB_OUTPUT` file format: `name=value` for
//! single-line values and a heredoc block for multi-line ones.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::cli::WorkflowResult;
use crate::error::Result;

const HEREDOC_DELIMITER: &str = "RELEASE_NOTES_EOF";

/// Machine-readable view of a workflow run, printed by `--format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub notes: &'a crate::changelog::ReleaseNotes,
    pub base: &'a str,
    pub head: &'a str,
    pub previous_tag: Option<&'a str>,
    pub next_version: String,
    pub next_tag: &'a str,
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a WorkflowResult) -> Self {
        JsonReport {
            notes: &result.notes,
            base: &result.base,
            head: &result.head,
            previous_tag: result.previous_tag.as_deref(),
            next_version: result.next_version.to_string(),
            next_tag: &result.next_tag,
        }
    }
}

/// Named output values, in a stable order.
///
/// `changes`, `tasks` and `pull_requests` are JSON-encoded string arrays.
pub fn output_values(result: &WorkflowResult) -> Result<Vec<(&'static str, String)>> {
    let notes = &result.notes;
    Ok(vec![
        ("changes", serde_json::to_string(&notes.change_shas)?),
        ("tasks", serde_json::to_string(&notes.task_ids)?),
        ("pull_requests", serde_json::to_string(&notes.pull_request_ids)?),
        ("next_version_type", notes.next_version_type.to_string()),
        ("next_version", result.next_version.to_string()),
        ("next_tag", result.next_tag.clone()),
        ("changelog", notes.changes.clone()),
    ])
}

/// Formats one output entry, switching to heredoc syntax for multi-line values.
pub fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        format!(
            "{name}<<{delim}\n{value}\n{delim}\n",
            delim = HEREDOC_DELIMITER
        )
    } else {
        format!("{}={}\n", name, value)
    }
}

/// Appends every output value to the file at `path`.
pub fn write_github_output(path: &Path, result: &WorkflowResult) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (name, value) in output_values(result)? {
        file.write_all(format_output(name, &value).as_bytes())?;
    }
    tracing::debug!(path = %path.display(), "wrote step outputs");
    Ok(())
}
