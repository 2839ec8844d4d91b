// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-protchange CLI
//!
//! Command-line interface for classifying protein change notations.

use clap::{Parser, Subcommand};
use ferro_protchange::batch::{BatchConfig, BatchProcessor};
use ferro_protchange::cli::format::describe;
use ferro_protchange::cli::{
    process_input_line, split_weighted_line, write_record, write_tsv_header, OutputFormat,
};
use ferro_protchange::config::ProtChangeConfig;
use ferro_protchange::diagnostic::{DiagnosticConfig, ParseDiagnostics};
use ferro_protchange::{MarkerMatching, ParseConfig};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ferro-protchange")]
#[command(author, version, about = "Protein change notation classifier")]
#[command(
    long_about = "Classify protein-level mutation notations from mutation tables.

Input lines are a notation, optionally followed by a tab and an occurrence
count. Blank lines and '#' comments are ignored.

Examples:
  ferro-protchange classify 'p.R97fs*13'
  ferro-protchange classify -i mutations.txt -f tsv -o classified.tsv
  cut -f3 mutations.tsv | ferro-protchange classify -f json
  ferro-protchange explain 'p.?_?ins?'"
)]
struct Cli {
    /// Log level or filter directive (e.g. debug, ferro_protchange=trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify protein change notations
    Classify {
        /// Notation to classify (reads from input file or stdin if not provided)
        notation: Option<String>,

        /// Input file (one notation per line, optional tab-separated count)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: text, tsv or json
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,

        /// Marker matching mode: substring or edit-site
        #[arg(long)]
        marker_matching: Option<MarkerMatching>,

        /// Configuration file (default: .ferro-protchange.toml or ~/.config/ferro/protchange.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show each parsing step for one notation
    Explain {
        /// Notation to explain
        notation: String,

        /// Marker matching mode: substring or edit-site
        #[arg(long)]
        marker_matching: Option<MarkerMatching>,

        /// Print the trace and record as JSON
        #[arg(long)]
        json: bool,

        /// Include step timings
        #[arg(long)]
        timing: bool,

        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Classify {
            notation,
            input,
            output,
            format,
            marker_matching,
            config,
        } => {
            let file_config = load_config(config.as_deref())?;
            let (parse_config, format) = file_config.merge_with_cli(marker_matching, format);
            run_classify(
                notation.as_deref(),
                input.as_deref(),
                output.as_deref(),
                format,
                parse_config,
            )
        }
        Commands::Explain {
            notation,
            marker_matching,
            json,
            timing,
            config,
        } => {
            let file_config = load_config(config.as_deref())?;
            let (parse_config, _) = file_config.merge_with_cli(marker_matching, None);
            run_explain(&notation, parse_config, json, timing)
        }
    }
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    // stdout carries results
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    debug!("Tracing initialized with level: {}", level);

    Ok(())
}

/// An explicit `--config` path must load; the default locations are optional.
fn load_config(path: Option<&Path>) -> Result<ProtChangeConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ProtChangeConfig::load_from_path(path)?),
        None => Ok(ProtChangeConfig::load().unwrap_or_default()),
    }
}

fn read_notations<R: BufRead>(
    reader: R,
) -> Result<Vec<(String, NonZeroU32)>, Box<dyn std::error::Error>> {
    let mut items = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(content) = process_input_line(&line, line_num == 0) {
            let (notation, weight) = split_weighted_line(content, line_num + 1)?;
            items.push((notation.to_string(), weight));
        }
    }
    Ok(items)
}

fn run_classify(
    notation: Option<&str>,
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    parse_config: ParseConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = if let Some(n) = notation {
        vec![(n.to_string(), NonZeroU32::MIN)]
    } else if let Some(input_path) = input {
        read_notations(BufReader::new(File::open(input_path)?))?
    } else {
        read_notations(io::stdin().lock())?
    };
    info!(count = items.len(), "read notations");

    let processor = BatchProcessor::with_config(BatchConfig::new().parse_config(parse_config));
    #[cfg(feature = "parallel")]
    let result = processor.classify_weighted_parallel(&items);
    #[cfg(not(feature = "parallel"))]
    let result = processor.classify_weighted(&items);

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if format == OutputFormat::Tsv {
        write_tsv_header(&mut writer)?;
    }
    for record in &result.records {
        write_record(&mut writer, record, format)?;
    }
    writer.flush()?;

    info!(
        "{} in {:.2?} ({:.0} notations/s)",
        result.summary(),
        result.duration,
        result.items_per_second()
    );
    Ok(())
}

fn run_explain(
    notation: &str,
    parse_config: ParseConfig,
    json: bool,
    timing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = DiagnosticConfig::new().with_parse_config(parse_config);
    if timing {
        config = config.with_timing();
    }
    let mut diagnostics = ParseDiagnostics::new(config);
    let record = diagnostics.parse_with_trace(notation);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if json {
        let value = serde_json::json!({
            "trace": diagnostics.trace(),
            "record": record,
        });
        serde_json::to_writer_pretty(&mut handle, &value)?;
        writeln!(handle)?;
    } else {
        write!(handle, "{}", diagnostics.format_trace())?;
        writeln!(handle, "{} -> {}", record.raw(), describe(&record))?;
    }
    Ok(())
}
