//! Protein change notation types and parser
//!
//! This module covers the protein-level subset of HGVS found in mutation
//! databases, including their non-standard conventions (`p.?_?ins?`,
//! `p.R97fs*13`, single-letter residues).

pub mod category;
pub mod parser;
pub mod record;

pub use category::MutationCategory;
pub use parser::{NotationParser, ParseConfig};
pub use record::{EvidenceStatus, MutationNotation};
