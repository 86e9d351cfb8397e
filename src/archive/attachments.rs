use crate::archive::ArchiveContents;

const FILES_PREFIX: &str = "files/";

/// An archive-bundled file referenced by a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedFile<'a> {
    pub archive_path: &'a str,
    pub content: &'a [u8],
}

impl<'a> LinkedFile<'a> {
    /// Filename the attachment is written under (subdirectories are flattened).
    pub fn file_name(&self) -> &'a str {
        base_name(self.archive_path)
    }
}

/// Find attachments under `files/` whose filename appears in the conversation text.
///
/// This is a substring heuristic, not a referential check: a short or generic
/// filename is included whenever its text occurs anywhere in the record.
pub fn collect_linked_files<'a>(
    canonical_json: &str,
    archive: &'a ArchiveContents,
) -> Vec<LinkedFile<'a>> {
    let haystack = canonical_json.to_lowercase();

    archive
        .iter()
        .filter(|(path, _)| is_attachment_path(path))
        .filter(|(path, _)| {
            let name = base_name(path).to_lowercase();
            !name.is_empty() && haystack.contains(&name)
        })
        .map(|(archive_path, content)| LinkedFile { archive_path, content })
        .collect()
}

fn is_attachment_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.starts_with(FILES_PREFIX) && !lower.ends_with('/')
}

/// Last slash-separated component of an archive path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
