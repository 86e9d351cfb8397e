//! Error taxonomy for an extraction run.
//!
//! Setup failures (`Archive`, `NotFound`, `Parse`, `Pattern`) abort a run as soon as
//! they occur. `Io` is fatal only while preparing the output root; per-record write
//! failures are logged and skipped by the pipeline instead of surfacing here.
//! `NoMatch` is raised after a full pass over the records found nothing.

use std::path::PathBuf;

/// Errors that can end an extraction run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("conversations.json not found in archive")]
    NotFound,

    #[error("parse {document}: {source}")]
    Parse {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{message} {path}: {source}")]
    Io {
        message: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    NoMatch(String),
}

impl ExtractError {
    /// Builds the end-of-run error naming every filter that was applied.
    pub fn no_match(patterns: &[String], content_types: &[String], languages: &[String]) -> Self {
        let pattern_csv = patterns.join(",");
        let ct = content_types.join(",");
        let lang = languages.join(",");

        let message = match (ct.is_empty(), lang.is_empty()) {
            (false, false) => format!(
                "no conversations matched patterns [{}] with content type(s) {:?} and language(s) {:?}",
                pattern_csv, ct, lang
            ),
            (false, true) => format!(
                "no conversations matched patterns [{}] with content type(s) {:?}",
                pattern_csv, ct
            ),
            (true, false) => format!(
                "no conversations matched patterns [{}] with language(s) {:?}",
                pattern_csv, lang
            ),
            (true, true) => format!("no conversations matched patterns [{}]", pattern_csv),
        };

        ExtractError::NoMatch(message)
    }
}
