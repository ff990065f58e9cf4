//! Command-line plumbing shared by the binary and the integration tests

pub mod orchestration;
pub mod outputs;

pub use orchestration::{run_release_notes, ReleaseNotesArgs, WorkflowResult};
