use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ExtractError;
use crate::models::RecordStore;

const CONVERSATIONS_FILE: &str = "conversations.json";
const MAX_ENTRY_BYTES: u64 = 1024 * 1024 * 1024;

/// Every entry of an export archive, keyed by slash-separated path.
///
/// The map is sorted by path, so iteration order is deterministic. Directory
/// entries are kept (with empty content) exactly as the archive lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveContents {
    entries: BTreeMap<String, Vec<u8>>,
}

impl ArchiveContents {
    /// Build contents from in-memory entries, normalizing each path.
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<u8>)>,
        P: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(path, content)| (normalize_entry_path(path.as_ref()), content))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(path, content)| (path.as_str(), content.as_slice()))
    }

    /// Path of the conversation-list document.
    ///
    /// Candidates are entries named `conversations.json` (case-insensitive) at any
    /// depth; the lexicographically first candidate wins.
    pub fn conversations_path(&self) -> Result<&str, ExtractError> {
        // BTreeMap keys are already ascending, so the first hit is the winner.
        self.entries
            .keys()
            .map(String::as_str)
            .find(|path| is_conversations_document(path))
            .ok_or(ExtractError::NotFound)
    }

    /// Locate and parse the conversation-list document.
    pub fn load_records(&self) -> Result<RecordStore, ExtractError> {
        let path = self.conversations_path()?;
        let raw = self.get(path).unwrap_or_default();

        let store = RecordStore::from_slice(raw)
            .map_err(|source| ExtractError::Parse { document: path.to_string(), source })?;

        debug!(document = path, records = store.len(), "parsed conversation document");
        Ok(store)
    }
}

/// Load every entry of the ZIP archive at `path` into memory.
///
/// Fails if the archive cannot be opened or any single entry cannot be read in full.
/// Entries larger than `MAX_ENTRY_BYTES`, whether declared in the header or found
/// while inflating, are treated as unreadable.
pub fn load_archive(path: &Path) -> Result<ArchiveContents, ExtractError> {
    let archive_error =
        |source: ZipError| ExtractError::Archive { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(|e| archive_error(ZipError::Io(e)))?;
    let mut archive = ZipArchive::new(file).map_err(archive_error)?;

    let mut entries = BTreeMap::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(archive_error)?;

        if entry.size() > MAX_ENTRY_BYTES {
            return Err(archive_error(entry_too_large(entry.name(), entry.size())));
        }

        let mut content = Vec::new();
        (&mut entry)
            .take(MAX_ENTRY_BYTES + 1)
            .read_to_end(&mut content)
            .map_err(|e| archive_error(ZipError::Io(e)))?;
        if content.len() as u64 > MAX_ENTRY_BYTES {
            return Err(archive_error(entry_too_large(entry.name(), content.len() as u64)));
        }

        entries.insert(normalize_entry_path(entry.name()), content);
    }

    debug!(archive = %path.display(), entries = entries.len(), "loaded archive");
    Ok(ArchiveContents { entries })
}

fn entry_too_large(name: &str, size: u64) -> ZipError {
    ZipError::Io(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("entry {} too large ({} bytes, max {} bytes)", name, size, MAX_ENTRY_BYTES),
    ))
}

/// Convert an archive entry name to forward-slash form.
pub fn normalize_entry_path(name: &str) -> String {
    name.replace('\\', "/")
}

fn is_conversations_document(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower == CONVERSATIONS_FILE || lower.ends_with(&format!("/{}", CONVERSATIONS_FILE))
}
