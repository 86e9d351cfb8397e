//! Matching-and-extraction pipeline.
//!
//! Records are visited one at a time in document order. Each record that passes
//! every pattern and facet filter gets a folder from the run's [`FolderNamer`],
//! a pretty-printed `conversation.json`, and copies of the attachments it names.

pub mod folder;
pub mod pipeline;
pub mod writer;

pub use folder::FolderNamer;
pub use pipeline::{ExtractOptions, ExtractSummary, run, run_with_output};
pub use writer::{ensure_dir, write_file, write_pretty_json};
