//! Diagnostic mode for debugging classification
//!
//! Records each step of the parse pipeline (normalization, evidence flags,
//! rule cascade, field extraction) so a surprising category can be traced
//! back to the rule that produced it. Used by the `explain` command.
//!
//! # Example
//!
//! ```
//! use ferro_protchange::diagnostic::{DiagnosticConfig, ParseDiagnostics};
//! use ferro_protchange::MutationCategory;
//!
//! let mut diagnostics = ParseDiagnostics::new(DiagnosticConfig::verbose());
//! let notation = diagnostics.parse_with_trace("p.R97fs*13");
//! assert_eq!(notation.category(), MutationCategory::Frameshift);
//! println!("{}", diagnostics.format_trace());
//! ```

use std::fmt;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::notation::parser::{Classification, NotationParser, ParseConfig};
use crate::notation::{MutationCategory, MutationNotation};

/// Configuration for diagnostic output
#[derive(Debug, Clone)]
pub struct DiagnosticConfig {
    /// Parser settings to trace with
    pub parse: ParseConfig,
    /// Include timing information
    pub include_timing: bool,
    /// Maximum trace entries to keep
    pub max_trace_entries: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            parse: ParseConfig::default(),
            include_timing: false,
            max_trace_entries: 1000,
        }
    }
}

impl DiagnosticConfig {
    /// Create a new diagnostic config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a verbose configuration
    pub fn verbose() -> Self {
        Self {
            include_timing: true,
            ..Self::default()
        }
    }

    /// Set the parser configuration
    pub fn with_parse_config(mut self, parse: ParseConfig) -> Self {
        self.parse = parse;
        self
    }

    /// Enable timing information
    pub fn with_timing(mut self) -> Self {
        self.include_timing = true;
        self
    }
}

/// A trace entry for diagnostic output
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    /// Timestamp relative to start
    #[serde(skip)]
    pub elapsed: Duration,
    /// Pipeline phase
    pub phase: &'static str,
    /// What happened
    pub operation: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Result status
    pub status: TraceStatus,
}

/// Status of a traced operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStatus {
    /// Operation started
    Started,
    /// Operation completed successfully
    Success,
    /// Operation failed
    Failed,
    /// Operation skipped
    Skipped,
}

impl fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceStatus::Started => write!(f, "STARTED"),
            TraceStatus::Success => write!(f, "OK"),
            TraceStatus::Failed => write!(f, "FAILED"),
            TraceStatus::Skipped => write!(f, "SKIPPED"),
        }
    }
}

/// Diagnostics for parsing operations
pub struct ParseDiagnostics {
    config: DiagnosticConfig,
    trace: Vec<TraceEntry>,
    start_time: Option<Instant>,
}

impl ParseDiagnostics {
    /// Create a new parse diagnostics instance
    pub fn new(config: DiagnosticConfig) -> Self {
        Self {
            config,
            trace: Vec::new(),
            start_time: None,
        }
    }

    fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.trace.clear();
    }

    fn add_trace(
        &mut self,
        phase: &'static str,
        operation: String,
        details: Option<String>,
        status: TraceStatus,
    ) {
        if self.trace.len() >= self.config.max_trace_entries {
            return;
        }

        let elapsed = self
            .start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO);

        self.trace.push(TraceEntry {
            elapsed,
            phase,
            operation,
            details,
            status,
        });
    }

    /// Parse with tracing.
    ///
    /// The trace is built from the same parse that produces the returned
    /// record, so both always agree with [`NotationParser::parse`].
    pub fn parse_with_trace(&mut self, input: &str) -> MutationNotation {
        self.start();
        self.add_trace("input", format!("{:?}", input), None, TraceStatus::Started);

        let (record, steps) = NotationParser::with_config(self.config.parse)
            .parse_with_steps(input, NonZeroU32::MIN);

        let prefix = if steps.normalized.has_prefix() {
            "stripped P. prefix"
        } else {
            "no P. prefix"
        };
        self.add_trace(
            "normalize",
            format!("body {:?}", steps.normalized.body()),
            Some(prefix.to_string()),
            TraceStatus::Success,
        );

        let evidence = steps.evidence;
        let mut flags = Vec::new();
        if evidence.unknown_effect {
            flags.push("unknown effect");
        }
        if evidence.missing_info {
            flags.push("missing info");
        }
        if evidence.no_protein {
            flags.push("no protein");
        }
        let evidence_text = if flags.is_empty() {
            "none".to_string()
        } else {
            flags.join(", ")
        };
        self.add_trace("evidence", evidence_text, None, TraceStatus::Success);

        let matching = self.config.parse.marker_matching;
        let rule = steps.rules.category();
        self.add_trace(
            "classify",
            format!("rule {}", rule),
            Some(format!("{} markers: {}", matching, matched_rules(&steps.rules))),
            if rule == MutationCategory::Invalid {
                TraceStatus::Failed
            } else {
                TraceStatus::Success
            },
        );

        if rule == MutationCategory::Invalid {
            self.add_trace(
                "extract",
                "no rule matched".to_string(),
                None,
                TraceStatus::Skipped,
            );
        } else if !record.is_valid() {
            self.add_trace(
                "extract",
                format!("{} fields could not be read", rule),
                None,
                TraceStatus::Failed,
            );
        } else {
            self.add_trace(
                "extract",
                extracted_summary(&record),
                None,
                TraceStatus::Success,
            );
        }

        self.add_trace(
            "result",
            record.category().to_string(),
            (record.reported_category() != record.category())
                .then(|| format!("reported as {}", record.reported_category())),
            TraceStatus::Success,
        );

        record
    }

    /// Get the trace entries
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Format the trace for display
    pub fn format_trace(&self) -> String {
        let mut output = String::new();

        output.push_str("=== Parse Trace ===\n");

        for entry in &self.trace {
            if self.config.include_timing {
                output.push_str(&format!("[{:?}] ", entry.elapsed));
            }
            output.push_str(&format!(
                "[{}] {} - {}\n",
                entry.phase, entry.status, entry.operation
            ));
            if let Some(ref details) = entry.details {
                output.push_str(&format!("    {}\n", details));
            }
        }

        output
    }
}

impl Default for ParseDiagnostics {
    fn default() -> Self {
        Self::new(DiagnosticConfig::default())
    }
}

fn matched_rules(rules: &Classification) -> String {
    let names: Vec<&str> = [
        (rules.missense, "missense"),
        (rules.insertion, "insertion"),
        (rules.deletion, "deletion"),
        (rules.premature_stop, "premature-stop"),
        (rules.nonsense, "nonsense"),
        (rules.frameshift, "frameshift"),
    ]
    .into_iter()
    .filter_map(|(hit, name)| hit.then_some(name))
    .collect();

    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

fn extracted_summary(record: &MutationNotation) -> String {
    let positions: Vec<String> = record.positions().iter().map(|p| p.to_string()).collect();
    let initial: String = record.initial_residues().iter().collect();
    let mut out = format!(
        "positions [{}] initial {:?} mutated {:?}",
        positions.join(", "),
        initial,
        record.mutated_residues()
    );
    if let Some(stop) = record.stop_offset() {
        out.push_str(&format!(" stop {}", stop));
    }
    out
}
