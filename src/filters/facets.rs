//! Content-type and language facets.
//!
//! Facets come from a best-effort token scan over a record's canonical JSON text,
//! not from a structural walk of the JSON tree. Anything shaped like
//! `"content_type":"..."` counts, wherever it sits in the record.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Set of normalized facet values found in a record.
pub type FacetSet = BTreeSet<String>;

static CONTENT_TYPE_FIELD: LazyLock<TokenScan> =
    LazyLock::new(|| TokenScan::new(r#""content_type"\s*:\s*"([^"]+)""#));
static TYPE_FIELD: LazyLock<TokenScan> =
    LazyLock::new(|| TokenScan::new(r#""type"\s*:\s*"([^"]+)""#));
static LANGUAGE_FIELD: LazyLock<TokenScan> =
    LazyLock::new(|| TokenScan::new(r#""language"\s*:\s*"([^"]+)""#));
static CODE_FENCE_LANGUAGE: LazyLock<TokenScan> =
    LazyLock::new(|| TokenScan::new(r"```([A-Za-z0-9_+-]+)"));

/// A regex with one capture group, yielding every captured token in a text.
#[derive(Debug, Clone)]
pub struct TokenScan {
    regex: Regex,
}

impl TokenScan {
    fn new(pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => Self { regex },
            // Only called with the static patterns above, all covered by tests.
            Err(err) => panic!("invalid facet pattern `{pattern}`: {err}"),
        }
    }

    pub fn tokens<'s, 't>(
        &'s self,
        text: &'t str,
    ) -> impl Iterator<Item = &'t str> + use<'s, 't> {
        self.regex.captures_iter(text).filter_map(|caps| caps.get(1)).map(|m| m.as_str())
    }
}

/// Content types declared by `content_type` and `type` fields, lowercased.
pub fn content_types(canonical_json: &str) -> FacetSet {
    CONTENT_TYPE_FIELD
        .tokens(canonical_json)
        .chain(TYPE_FIELD.tokens(canonical_json))
        .map(normalize_content_type)
        .collect()
}

/// Languages declared by `language` fields and Markdown code-fence tags, normalized.
pub fn languages(canonical_json: &str) -> FacetSet {
    LANGUAGE_FIELD
        .tokens(canonical_json)
        .chain(CODE_FENCE_LANGUAGE.tokens(canonical_json))
        .map(normalize_language)
        .collect()
}

pub fn normalize_content_type(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Map a language name or alias to its canonical token.
///
/// Idempotent: every canonical token maps to itself.
pub fn normalize_language(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let canonical = match lowered.as_str() {
        "js" | "node" | "nodejs" | "javascript" => "javascript",
        "golang" => "go",
        "sh" | "bash" | "zsh" | "shell" => "shell",
        "py" | "python3" => "python",
        "ts" | "typescript" => "typescript",
        "c++" | "cpp" => "cpp",
        "c#" => "csharp",
        _ => return lowered,
    };
    canonical.to_string()
}

/// True if every desired value, normalized, is in `found`. Empty `desired` passes.
pub fn has_all_desired<S: AsRef<str>>(
    found: &FacetSet,
    desired: &[S],
    normalize: fn(&str) -> String,
) -> bool {
    desired.iter().all(|value| found.contains(&normalize(value.as_ref())))
}

/// Content-type and language requirements for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilter {
    pub content_types: Vec<String>,
    pub languages: Vec<String>,
}

impl FacetFilter {
    pub fn new(content_types: Vec<String>, languages: Vec<String>) -> Self {
        Self { content_types, languages }
    }

    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty() && self.languages.is_empty()
    }

    /// True if the record text carries every required content type and language.
    pub fn matches(&self, canonical_json: &str) -> bool {
        if !self.content_types.is_empty()
            && !has_all_desired(
                &content_types(canonical_json),
                &self.content_types,
                normalize_content_type,
            )
        {
            return false;
        }

        self.languages.is_empty()
            || has_all_desired(&languages(canonical_json), &self.languages, normalize_language)
    }
}
