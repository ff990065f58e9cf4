//! Cross-reference extraction from commit messages.
//!
//! Three independent scans run over each original (un-split) message:
//! pull-request references such as `(#123)`, task identifiers such as
//! `JIRA-42`, and the `#MAJOR` bump marker.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::Result;

/// `(#<ASCII digits>)`, anywhere in the message.
static PULL_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#([0-9]+)\)").expect("Invalid regex"));

/// `#MAJOR` closing the message or followed by any line terminator
/// (`\n`, `\r`, U+2028, U+2029).
static MAJOR_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#MAJOR(?:$|[\n\r\x{2028}\x{2029}])").expect("Invalid regex")
});

/// References collected from a commit range, in discovery order.
///
/// Duplicates are kept: the same task may be referenced by several commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct References {
    pub pull_requests: Vec<String>,
    pub tasks: Vec<String>,
    pub major: bool,
}

impl References {
    /// Appends `other` after `self`.
    pub fn merge(mut self, other: References) -> Self {
        self.pull_requests.extend(other.pull_requests);
        self.tasks.extend(other.tasks);
        self.major |= other.major;
        self
    }
}

/// Scans messages for pull requests, task identifiers and the major marker.
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    task: Regex,
}

impl ReferenceExtractor {
    /// Builds an extractor for task identifiers of the form `<task_prefix><ASCII digits>`.
    ///
    /// The prefix is matched literally and case-insensitively.
    pub fn new(task_prefix: &str) -> Result<Self> {
        let task = RegexBuilder::new(&format!(r"{}[0-9]+", regex::escape(task_prefix)))
            .case_insensitive(true)
            .build()?;
        Ok(ReferenceExtractor { task })
    }

    /// Pull-request numbers, without parentheses or `#`.
    pub fn pull_requests(&self, message: &str) -> Vec<String> {
        PULL_REQUEST
            .captures_iter(message)
            .filter_map(|captures| captures.get(1))
            .map(|number| number.as_str().to_string())
            .collect()
    }

    /// Task identifiers exactly as written.
    pub fn tasks(&self, message: &str) -> Vec<String> {
        self.task
            .find_iter(message)
            .map(|task| task.as_str().to_string())
            .collect()
    }

    pub fn has_major_marker(&self, message: &str) -> bool {
        MAJOR_MARKER.is_match(message)
    }

    /// Runs all three scans over one message.
    pub fn extract(&self, message: &str) -> References {
        References {
            pull_requests: self.pull_requests(message),
            tasks: self.tasks(message),
            major: self.has_major_marker(message),
        }
    }
}
