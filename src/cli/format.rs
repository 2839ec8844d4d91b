//! Output formatting utilities for CLI operations

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::ProtChangeError;
use crate::notation::MutationNotation;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable one-line summary (default)
    #[default]
    Text,
    /// Tab-separated columns with a header line
    Tsv,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_protchange::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("TSV").unwrap(), OutputFormat::Tsv);
    /// assert!(OutputFormat::from_str("vcf").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{}' (expected text, tsv or json)",
                other
            )),
        }
    }
}

/// Column names written by [`write_tsv_header`].
pub const TSV_COLUMNS: [&str; 10] = [
    "notation",
    "category",
    "positions",
    "initial",
    "mutated",
    "stop_offset",
    "missing_info",
    "unknown_effect",
    "no_protein",
    "multiplicity",
];

/// Write the TSV header line
pub fn write_tsv_header<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", TSV_COLUMNS.join("\t"))
}

/// Write one classified notation
///
/// # Examples
///
/// ```
/// use ferro_protchange::cli::{write_record, OutputFormat};
/// use ferro_protchange::parse_notation;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// write_record(&mut buffer, &parse_notation("p.A267C"), OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert_eq!(result, "p.A267C -> missense 267 A>C\n");
/// ```
pub fn write_record<W: Write>(
    writer: &mut W,
    record: &MutationNotation,
    format: OutputFormat,
) -> Result<(), ProtChangeError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, record)?;
            writeln!(writer)?;
        }
        OutputFormat::Tsv => writeln!(writer, "{}", tsv_row(record))?,
        OutputFormat::Text => writeln!(writer, "{} -> {}", record.raw(), describe(record))?,
    }
    Ok(())
}

fn join_positions(record: &MutationNotation) -> String {
    record
        .positions()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn tsv_row(record: &MutationNotation) -> String {
    let evidence = record.evidence();
    let initial: String = record.initial_residues().iter().collect();
    let stop = record
        .stop_offset()
        .map(|s| s.to_string())
        .unwrap_or_default();
    [
        sanitize_field(record.raw()),
        record.category().to_string(),
        join_positions(record),
        initial,
        record.mutated_residues().to_string(),
        stop,
        evidence.missing_info.to_string(),
        evidence.unknown_effect.to_string(),
        evidence.no_protein.to_string(),
        record.multiplicity().to_string(),
    ]
    .join("\t")
}

/// Tabs and newlines in the raw input would break the row.
fn sanitize_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

/// Short human readable description of a record.
///
/// ```
/// use ferro_protchange::cli::format::describe;
/// use ferro_protchange::parse_notation;
///
/// assert_eq!(describe(&parse_notation("p.R97fs*13")), "frameshift 97 R stop+13");
/// assert_eq!(describe(&parse_notation("p.?_?ins?")), "insertion [missing info]");
/// assert_eq!(describe(&parse_notation("p.(=)")), "invalid [unknown effect]");
/// ```
pub fn describe(record: &MutationNotation) -> String {
    let mut out = record.category().to_string();

    if !record.positions().is_empty() {
        let _ = write!(out, " {}", join_positions(record));
    }

    let initial: String = record.initial_residues().iter().collect();
    if !initial.is_empty() {
        if record.category().is_indel() || !record.mutated_residues().is_empty() {
            let _ = write!(out, " {}>{}", initial, record.mutated_residues());
        } else {
            let _ = write!(out, " {}", initial);
        }
    }

    if let Some(stop) = record.stop_offset() {
        let _ = write!(out, " stop+{}", stop);
    }

    let evidence = record.evidence();
    let mut flags = Vec::new();
    if evidence.missing_info {
        flags.push("missing info");
    }
    if evidence.unknown_effect {
        flags.push("unknown effect");
    }
    if evidence.no_protein {
        flags.push("no protein");
    }
    if !flags.is_empty() {
        let _ = write!(out, " [{}]", flags.join(", "));
    }

    if record.multiplicity().get() > 1 {
        let _ = write!(out, " x{}", record.multiplicity());
    }

    out
}
