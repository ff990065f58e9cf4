//! Commit range analysis - classification, references and bump decision

pub mod changelog_analyzer;

pub use changelog_analyzer::{Analysis, ChangelogAnalyzer};
