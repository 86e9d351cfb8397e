use regex::{Regex, RegexBuilder};

use crate::error::ExtractError;

/// Characters whose presence marks a pattern as a raw regular expression.
const REGEX_METACHARACTERS: &[char] = &['[', ']', '(', ')', '|', '+', '\\', '^', '$'];

/// Lookaround openers that also mark a pattern as a regular expression.
const LOOKAROUND_MARKERS: &[&str] = &["?=", "?<=", "?!"];

/// How a user pattern was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Escaped and matched case-insensitively.
    Literal,
    /// Compiled verbatim.
    Regex,
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    source: String,
    kind: PatternKind,
    regex: Regex,
}

/// AND-conjunction of user patterns.
///
/// Matching runs against the lowercased canonical form of a record. A raw regex
/// that contains uppercase literals therefore never matches; that behavior is
/// kept as-is.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<CompiledPattern>,
}

impl PatternMatcher {
    /// Compile every pattern, failing on the first one that does not compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, ExtractError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| compile_user_pattern(p.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern texts as supplied, in order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }

    pub fn kinds(&self) -> impl Iterator<Item = PatternKind> + '_ {
        self.patterns.iter().map(|p| p.kind)
    }

    /// True if every pattern matches `lowered`, which must already be lowercased.
    /// An empty matcher accepts everything.
    pub fn is_match(&self, lowered: &str) -> bool {
        self.patterns.iter().all(|p| p.regex.is_match(lowered))
    }

    /// Lowercase a record's canonical text and test it.
    pub fn matches_canonical(&self, canonical_json: &str) -> bool {
        self.is_match(&canonical_json.to_lowercase())
    }
}

/// Classify a pattern: inline-flag prefix, metacharacters or lookaround mean regex.
pub fn looks_like_regex(pattern: &str) -> bool {
    pattern.starts_with("(?")
        || pattern.contains(REGEX_METACHARACTERS)
        || LOOKAROUND_MARKERS.iter().any(|marker| pattern.contains(marker))
}

pub fn classify(pattern: &str) -> PatternKind {
    if looks_like_regex(pattern) { PatternKind::Regex } else { PatternKind::Literal }
}

fn compile_user_pattern(source: String) -> Result<CompiledPattern, ExtractError> {
    let kind = classify(&source);
    let compiled = match kind {
        PatternKind::Regex => Regex::new(&source),
        PatternKind::Literal => {
            RegexBuilder::new(&regex::escape(&source)).case_insensitive(true).build()
        }
    };

    match compiled {
        Ok(regex) => Ok(CompiledPattern { source, kind, regex }),
        Err(err) => Err(ExtractError::Pattern { pattern: source, source: err }),
    }
}
