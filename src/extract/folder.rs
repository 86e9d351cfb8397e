use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::models::ConversationRecord;
use crate::utils::{create_time_or_now, format_datestamp};

/// Run-scoped folder name allocator.
///
/// The first record for a timestamp token gets the bare token; later ones get
/// `_2`, `_3`, and so on, counting occurrences of that token so far.
#[derive(Debug, Default)]
pub struct FolderNamer {
    used: HashMap<String, usize>,
}

impl FolderNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a unique folder name for `base`.
    pub fn assign(&mut self, base: &str) -> String {
        let count = self.used.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 { base.to_string() } else { format!("{}_{}", base, count) }
    }

    pub fn assign_for_instant(&mut self, instant: &DateTime<FixedOffset>) -> String {
        self.assign(&format_datestamp(instant))
    }

    /// Folder name for a record, from its creation time or the current time.
    pub fn assign_for_record(&mut self, record: &ConversationRecord) -> String {
        self.assign_for_instant(&create_time_or_now(record))
    }
}
