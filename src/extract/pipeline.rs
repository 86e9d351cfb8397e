//! Extraction pipeline.
//!
//! # Error Handling Strategy
//!
//! - **Setup failures** (output root, archive, conversation document, pattern
//!   compilation) abort the run immediately with an [`ExtractError`].
//! - **Per-record failures** (serialization, directory creation, writes) are logged
//!   and only that record's output is abandoned. A folder may be left partially
//!   populated; there is no rollback.
//! - **Zero matches** is reported as [`ExtractError::NoMatch`] after the full pass.

use std::collections::HashSet;
use std::io::Write;
use std::path::{self, Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::archive::{ArchiveContents, collect_linked_files, load_archive};
use crate::error::ExtractError;
use crate::extract::folder::FolderNamer;
use crate::extract::writer::{ensure_dir, write_file, write_pretty_json};
use crate::filters::{FacetFilter, PatternMatcher};
use crate::models::ConversationRecord;

const CONVERSATION_FILE: &str = "conversation.json";
const FILES_DIR: &str = "files";

/// Inputs for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub archive_path: PathBuf,
    pub patterns: Vec<String>,
    pub output_root: PathBuf,
    pub content_types: Vec<String>,
    pub languages: Vec<String>,
}

/// What a successful run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Records examined.
    pub scanned: usize,
    /// Output folders written, in processing order.
    pub folders: Vec<PathBuf>,
    /// Attachment files copied across all folders.
    pub attachments: usize,
}

impl ExtractSummary {
    pub fn matched(&self) -> usize {
        self.folders.len()
    }
}

/// Run an extraction, printing each written folder to stdout.
pub fn run(options: &ExtractOptions) -> Result<ExtractSummary, ExtractError> {
    let stdout = std::io::stdout();
    run_with_output(options, &mut stdout.lock())
}

/// Run an extraction, writing one line per output folder to `out`.
pub fn run_with_output<W: Write>(
    options: &ExtractOptions,
    out: &mut W,
) -> Result<ExtractSummary, ExtractError> {
    let output_root = prepare_output_root(&options.output_root)?;

    let archive = load_archive(&options.archive_path)?;
    let records = archive.load_records()?;
    let matcher = PatternMatcher::new(options.patterns.iter().cloned())?;
    let facets = FacetFilter::new(options.content_types.clone(), options.languages.clone());

    let mut namer = FolderNamer::new();
    let mut summary = ExtractSummary { scanned: records.len(), ..Default::default() };

    for record in &records {
        let extracted =
            extract_record(record, &archive, &matcher, &facets, &mut namer, &output_root);
        let Some(extracted) = extracted else {
            continue;
        };

        if let Err(e) = writeln!(out, "{}{}", extracted.folder.display(), path::MAIN_SEPARATOR) {
            warn!(error = %e, "failed to report output folder");
        }
        summary.attachments += extracted.attachments;
        summary.folders.push(extracted.folder);
    }

    info!(
        scanned = summary.scanned,
        matched = summary.matched(),
        attachments = summary.attachments,
        "extraction finished"
    );

    if summary.folders.is_empty() {
        return Err(ExtractError::no_match(
            &options.patterns,
            &options.content_types,
            &options.languages,
        ));
    }
    Ok(summary)
}

struct ExtractedRecord {
    folder: PathBuf,
    attachments: usize,
}

/// Filter one record and, on a match, write it out. `None` means the record was
/// filtered out or its `conversation.json` could not be written.
fn extract_record(
    record: &ConversationRecord,
    archive: &ArchiveContents,
    matcher: &PatternMatcher,
    facets: &FacetFilter,
    namer: &mut FolderNamer,
    output_root: &Path,
) -> Option<ExtractedRecord> {
    let canonical = match record.canonical_json() {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "serialize conversation");
            return None;
        }
    };

    if !matcher.matches_canonical(&canonical) || !facets.matches(&canonical) {
        return None;
    }

    let folder = output_root.join(namer.assign_for_record(record));
    if let Err(e) = ensure_dir(&folder) {
        error!(folder = %folder.display(), error = %format!("{e:#}"), "create output subfolder");
        return None;
    }

    let conversation_path = folder.join(CONVERSATION_FILE);
    if let Err(e) = write_pretty_json(&conversation_path, canonical.as_bytes()) {
        error!(
            path = %conversation_path.display(),
            error = %format!("{e:#}"),
            "write conversation.json"
        );
        return None;
    }

    let attachments = copy_linked_files(&canonical, archive, &folder);
    debug!(folder = %folder.display(), attachments, "wrote conversation");
    Some(ExtractedRecord { folder, attachments })
}

/// Copy attachments referenced by the record into `<folder>/files/`, flattening
/// archive subdirectories. Failures are logged. Returns the number of distinct
/// files left in `files/`; a later entry with the same name overwrites an earlier one.
fn copy_linked_files(canonical: &str, archive: &ArchiveContents, folder: &Path) -> usize {
    let linked = collect_linked_files(canonical, archive);
    if linked.is_empty() {
        return 0;
    }

    let files_dir = folder.join(FILES_DIR);
    if let Err(e) = ensure_dir(&files_dir) {
        error!(folder = %files_dir.display(), error = %format!("{e:#}"), "create files subfolder");
        return 0;
    }

    let mut copied = HashSet::new();
    for file in linked {
        let target = files_dir.join(file.file_name());
        match write_file(&target, file.content) {
            Ok(()) => {
                if copied.contains(&target) {
                    warn!(
                        archive_path = file.archive_path,
                        target_path = %target.display(),
                        "linked file overwrote an earlier one with the same name"
                    );
                }
                copied.insert(target);
            }
            Err(e) => error!(
                archive_path = file.archive_path,
                target_path = %target.display(),
                error = %format!("{e:#}"),
                "write linked file"
            ),
        }
    }
    copied.len()
}

fn prepare_output_root(output_root: &Path) -> Result<PathBuf, ExtractError> {
    let absolute = path::absolute(output_root).map_err(|source| ExtractError::Io {
        message: "resolve output folder",
        path: output_root.to_path_buf(),
        source,
    })?;
    std::fs::create_dir_all(&absolute).map_err(|source| ExtractError::Io {
        message: "create output folder",
        path: absolute.clone(),
        source,
    })?;
    Ok(absolute)
}
