//! Command implementations for repo-cli

pub mod completions;
pub mod sync;

pub use completions::run_completions;
pub use sync::{run_apply, run_sync};
