//! Chat Export Extractor - pull matching conversations out of a ChatGPT export archive
//!
//! The export ZIP holds one `conversations.json` document with every conversation
//! plus loose attachment files under `files/`. This library:
//!
//! - Loads the archive into memory and locates the conversation document
//! - Selects records by AND-combined literal/regex patterns
//! - Filters by detected content types and programming languages
//! - Writes each match to its own timestamp-named folder with the attachments it names
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use chat_export_extractor::{ExtractOptions, run};
//!
//! let options = ExtractOptions {
//!     archive_path: PathBuf::from("export.zip"),
//!     patterns: vec!["tokio".to_string(), "select!".to_string()],
//!     output_root: PathBuf::from("out"),
//!     languages: vec!["rust".to_string()],
//!     ..Default::default()
//! };
//! let summary = run(&options)?;
//! println!("Extracted {} conversations", summary.matched());
//! # Ok::<(), chat_export_extractor::ExtractError>(())
//! ```

pub mod archive;
pub mod cli;
pub mod error;
pub mod extract;
pub mod filters;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use archive::{ArchiveContents, load_archive};
pub use error::ExtractError;
pub use extract::{ExtractOptions, ExtractSummary, FolderNamer, run, run_with_output};
pub use filters::{FacetFilter, PatternMatcher, normalize_language};
pub use models::{ConversationRecord, RecordStore};
