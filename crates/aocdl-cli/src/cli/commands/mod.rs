//! CLI command handlers.

mod completions;
mod download;

pub use completions::run_completions;
pub use download::run_download;
