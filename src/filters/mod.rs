pub mod facets;
pub mod pattern;

pub use facets::{FacetFilter, FacetSet, normalize_language};
pub use pattern::{PatternKind, PatternMatcher};
