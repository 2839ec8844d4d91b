//! Batch processor implementation.

use std::fmt;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::notation::parser::{NotationParser, ParseConfig};
use crate::notation::MutationNotation;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Parser settings applied to every item.
    pub parse: ParseConfig,
    /// Callback frequency (call progress callback every N items).
    pub progress_interval: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parse: ParseConfig::default(),
            progress_interval: 10_000,
        }
    }
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parser configuration.
    pub fn parse_config(mut self, parse: ParseConfig) -> Self {
        self.parse = parse;
        self
    }

    /// Set the progress callback interval.
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }
}

/// Progress information for batch operations.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Total items to process.
    pub total: usize,
    /// Items processed so far.
    pub processed: usize,
    /// Items classified as invalid so far.
    pub invalid: usize,
    /// Time elapsed since start.
    pub elapsed: Duration,
}

impl BatchProgress {
    /// Calculate completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }

    /// Calculate processing rate (items per second).
    ///
    /// Returns 0.0 if no time has elapsed yet.
    pub fn items_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.processed as f64 / secs
        }
    }
}

/// Result of a batch operation.
///
/// Records are in input order.
#[derive(Debug)]
pub struct BatchResult {
    /// One record per input.
    pub records: Vec<MutationNotation>,
    /// Total processing time.
    pub duration: Duration,
}

/// Operational counts for a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub invalid: usize,
    pub missing_info: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} notations, {} invalid, {} with missing info",
            self.total, self.invalid, self.missing_info
        )
    }
}

impl BatchResult {
    /// Create a new batch result.
    pub fn new(records: Vec<MutationNotation>, duration: Duration) -> Self {
        Self { records, duration }
    }

    /// Get the total number of items processed.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Number of records tagged invalid.
    pub fn invalid_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_valid()).count()
    }

    /// Number of records carrying a missing-info placeholder.
    pub fn missing_info_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_missing_info()).count()
    }

    /// Calculate processing rate (items per second).
    ///
    /// Returns 0.0 if the duration is too short to provide a meaningful rate.
    pub fn items_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.records.len() as f64 / secs
        }
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.total(),
            invalid: self.invalid_count(),
            missing_info: self.missing_info_count(),
        }
    }

    /// Take the records, dropping timing information.
    pub fn into_records(self) -> Vec<MutationNotation> {
        self.records
    }
}

/// Batch classifier for protein change notations.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    parser: NotationParser,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new batch processor with configuration.
    pub fn with_config(config: BatchConfig) -> Self {
        Self {
            parser: NotationParser::with_config(config.parse),
            config,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Classify multiple notations.
    pub fn classify<S: AsRef<str>>(&self, notations: &[S]) -> BatchResult {
        self.classify_with_progress(notations, |_| {})
    }

    /// Classify multiple notations with progress callback.
    pub fn classify_with_progress<S, F>(&self, notations: &[S], progress_fn: F) -> BatchResult
    where
        S: AsRef<str>,
        F: FnMut(BatchProgress),
    {
        let items: Vec<(&str, NonZeroU32)> = notations
            .iter()
            .map(|n| (n.as_ref(), NonZeroU32::MIN))
            .collect();
        self.classify_weighted_with_progress(&items, progress_fn)
    }

    /// Classify `(notation, weight)` pairs.
    pub fn classify_weighted<S: AsRef<str>>(&self, items: &[(S, NonZeroU32)]) -> BatchResult {
        self.classify_weighted_with_progress(items, |_| {})
    }

    /// Classify `(notation, weight)` pairs with progress callback.
    pub fn classify_weighted_with_progress<S, F>(
        &self,
        items: &[(S, NonZeroU32)],
        mut progress_fn: F,
    ) -> BatchResult
    where
        S: AsRef<str>,
        F: FnMut(BatchProgress),
    {
        let start = Instant::now();
        let total = items.len();
        let mut records = Vec::with_capacity(total);
        let mut invalid = 0;

        for (i, (notation, weight)) in items.iter().enumerate() {
            let record = self.parser.parse_weighted(notation.as_ref(), *weight);
            if !record.is_valid() {
                invalid += 1;
            }
            records.push(record);

            if (i + 1) % self.config.progress_interval == 0 || i + 1 == total {
                progress_fn(BatchProgress {
                    total,
                    processed: i + 1,
                    invalid,
                    elapsed: start.elapsed(),
                });
            }
        }

        let result = BatchResult::new(records, start.elapsed());
        info!("classified {}", result.summary());
        result
    }

    /// Classify `(notation, weight)` pairs on the rayon thread pool.
    ///
    /// Output order matches input order.
    #[cfg(feature = "parallel")]
    pub fn classify_weighted_parallel<S>(&self, items: &[(S, NonZeroU32)]) -> BatchResult
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let parser = self.parser;
        let records: Vec<MutationNotation> = items
            .par_iter()
            .map(|(notation, weight)| parser.parse_weighted(notation.as_ref(), *weight))
            .collect();

        let result = BatchResult::new(records, start.elapsed());
        info!("classified {} in parallel", result.summary());
        result
    }

    /// Classify multiple notations on the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn classify_parallel<S>(&self, notations: &[S]) -> BatchResult
    where
        S: AsRef<str> + Sync,
    {
        let items: Vec<(&str, NonZeroU32)> = notations
            .iter()
            .map(|n| (n.as_ref(), NonZeroU32::MIN))
            .collect();
        self.classify_weighted_parallel(&items)
    }
}

/// Classify notations in input order, in parallel when the `parallel`
/// feature is enabled.
pub fn classify_all<S>(notations: &[S], config: ParseConfig) -> Vec<MutationNotation>
where
    S: AsRef<str> + Sync,
{
    let processor = BatchProcessor::with_config(BatchConfig::new().parse_config(config));
    #[cfg(feature = "parallel")]
    let result = processor.classify_parallel(notations);
    #[cfg(not(feature = "parallel"))]
    let result = processor.classify(notations);
    result.into_records()
}
