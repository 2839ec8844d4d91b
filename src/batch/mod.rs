//! Batch classification of protein change notations.
//!
//! Mutation tables are classified one column at a time, often millions of
//! rows. This module wraps the parser with progress tracking and summary
//! counts, and runs on the rayon thread pool when the `parallel` feature is
//! enabled. Records always come back in input order.
//!
//! # Examples
//!
//! ```
//! use ferro_protchange::batch::BatchProcessor;
//!
//! let processor = BatchProcessor::new();
//! let result = processor.classify(&["p.A267C", "p.G12del", "p.?"]);
//! println!("{}", result.summary());
//! assert_eq!(result.invalid_count(), 1);
//! ```
//!
//! ## With Progress Callback
//!
//! ```
//! use ferro_protchange::batch::{BatchConfig, BatchProcessor};
//!
//! let processor = BatchProcessor::with_config(BatchConfig::new().progress_interval(1000));
//! let result = processor.classify_with_progress(&["p.W25*"], |progress| {
//!     println!("Progress: {:.1}%", progress.percent());
//! });
//! assert_eq!(result.total(), 1);
//! ```

mod processor;

pub use processor::{
    classify_all, BatchConfig, BatchProcessor, BatchProgress, BatchResult, BatchSummary,
};
