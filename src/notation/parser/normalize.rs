//! Input normalization
//!
//! Mutation tables mix `p.A267C`, `P.a267c` and bare `A267C`. Everything is
//! upper-cased before any rule runs, and the protein prefix is split off so
//! the rules can look at the variant body.

/// Protein-notation prefix after case folding.
const PROTEIN_PREFIX: &str = "P.";

/// An upper-cased notation with its protein prefix located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedNotation {
    full: String,
    body_start: usize,
}

impl NormalizedNotation {
    /// The whole upper-cased input, prefix included.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// The variant body with any `P.` prefix removed.
    pub fn body(&self) -> &str {
        &self.full[self.body_start..]
    }

    pub fn has_prefix(&self) -> bool {
        self.body_start > 0
    }
}

/// Upper-case `input` and locate the variant body.
///
/// # Examples
///
/// ```
/// use ferro_protchange::notation::parser::normalize;
///
/// assert_eq!(normalize("p.r97fs*13").body(), "R97FS*13");
/// assert_eq!(normalize("A267C").body(), "A267C");
/// assert_eq!(normalize("").body(), "");
/// ```
pub fn normalize(input: &str) -> NormalizedNotation {
    let full = input.to_uppercase();
    let body_start = if full.starts_with(PROTEIN_PREFIX) {
        PROTEIN_PREFIX.len()
    } else {
        0
    };
    NormalizedNotation { full, body_start }
}
