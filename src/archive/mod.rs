//! Export archive access.
//!
//! The archive is loaded once, fully into memory, before any record is examined.
//! [`reader`] owns the path-to-bytes map and locates `conversations.json`;
//! [`attachments`] resolves which bundled files a conversation refers to.

pub mod attachments;
pub mod reader;

pub use attachments::{LinkedFile, collect_linked_files};
pub use reader::{ArchiveContents, load_archive};
