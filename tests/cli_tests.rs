//! Integration tests for the CLI-facing library surface
//!
//! Covers configuration files on disk, weighted input lines, batch
//! classification and the three output formats end to end.

use ferro_protchange::batch::{BatchConfig, BatchProcessor};
use ferro_protchange::cli::{
    process_input_line, split_weighted_line, write_record, write_tsv_header, OutputFormat,
};
use ferro_protchange::config::ProtChangeConfig;
use ferro_protchange::{MarkerMatching, MutationCategory, ProtChangeError};
use std::fs;
use std::io::Cursor;
use std::num::NonZeroU32;
use tempfile::TempDir;

fn read_items(text: &str) -> Result<Vec<(String, NonZeroU32)>, ProtChangeError> {
    let mut items = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        if let Some(content) = process_input_line(line, line_num == 0) {
            let (notation, weight) = split_weighted_line(content, line_num + 1)?;
            items.push((notation.to_string(), weight));
        }
    }
    Ok(items)
}

// =============================================================================
// Configuration files
// =============================================================================

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("protchange.toml");
    fs::write(
        &path,
        "[parser]\nmarker-matching = \"edit-site\"\n\n[output]\nformat = \"tsv\"\n",
    )
    .unwrap();

    let config = ProtChangeConfig::load_from_path(&path).unwrap();
    let (parse, format) = config.merge_with_cli(None, None);
    assert_eq!(parse.marker_matching, MarkerMatching::EditSite);
    assert_eq!(format, OutputFormat::Tsv);
}

#[test]
fn test_invalid_config_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[parser]\nmarker-matching = 3\n").unwrap();

    let err = ProtChangeConfig::load_from_path(&path).unwrap_err();
    match err {
        ProtChangeError::Config { source_name, .. } => {
            assert!(source_name.ends_with("broken.toml"));
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_missing_config_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ProtChangeConfig::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ProtChangeError::Io { .. }));
}

#[test]
fn test_rendered_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.toml");
    let config = ProtChangeConfig::parse("[output]\nformat = \"json\"\n").unwrap();
    fs::write(&path, config.to_toml().unwrap()).unwrap();
    assert_eq!(ProtChangeConfig::load_from_path(&path).unwrap(), config);
}

// =============================================================================
// Input handling
// =============================================================================

#[test]
fn test_read_weighted_input() {
    let text = "\u{feff}# mutation table export\np.V600E\t12\n\np.G12del  # KRAS\np.?_?ins?\t3\n";
    let items = read_items(text).unwrap();
    let notations: Vec<&str> = items.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(notations, vec!["p.V600E", "p.G12del", "p.?_?ins?"]);
    let weights: Vec<u32> = items.iter().map(|(_, w)| w.get()).collect();
    assert_eq!(weights, vec![12, 1, 3]);
}

#[test]
fn test_bad_weight_reports_line() {
    let err = read_items("p.V600E\np.G12del\tlots\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        ProtChangeError::InvalidWeight {
            line: 2,
            value: "lots".to_string()
        }
        .to_string()
    );
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn test_classify_and_write_tsv() {
    let items = read_items("p.A267C\t2\np.W25*\njunk\n").unwrap();
    let result = BatchProcessor::new().classify_weighted(&items);
    assert_eq!(result.summary().invalid, 1);

    let mut buffer = Cursor::new(Vec::new());
    write_tsv_header(&mut buffer).unwrap();
    for record in &result.records {
        write_record(&mut buffer, record, OutputFormat::Tsv).unwrap();
    }
    let output = String::from_utf8(buffer.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("notation\tcategory"));
    assert_eq!(
        lines[1],
        "p.A267C\tmissense\t267\tA\tC\t\tfalse\tfalse\tfalse\t2"
    );
    assert_eq!(
        lines[2],
        "p.W25*\tnonsense\t25\tW\t\t0\tfalse\tfalse\tfalse\t1"
    );
    assert!(lines[3].starts_with("junk\tinvalid\t"));
}

#[test]
fn test_classify_and_write_json_lines() {
    let items = read_items("p.R97fs*13\np.0?\n").unwrap();
    let result = BatchProcessor::new().classify_weighted(&items);

    let mut buffer = Cursor::new(Vec::new());
    for record in &result.records {
        write_record(&mut buffer, record, OutputFormat::Json).unwrap();
    }
    let output = String::from_utf8(buffer.into_inner()).unwrap();
    let values: Vec<serde_json::Value> = output
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(values.len(), 2);
    assert_eq!(values[0]["category"], "frameshift");
    assert_eq!(values[0]["stop_offset"], 13);
    assert_eq!(values[1]["category"], "invalid");
    assert_eq!(values[1]["no_protein"], true);
    assert_eq!(values[1]["missing_info"], true);
}

#[test]
fn test_config_drives_batch() {
    let config = ProtChangeConfig::parse("[parser]\nmarker-matching = \"edit-site\"\n").unwrap();
    let (parse, _) = config.merge_with_cli(None, None);
    let processor = BatchProcessor::with_config(BatchConfig::new().parse_config(parse));
    let result = processor.classify(&["p.DEL1A", "p.G12del"]);
    assert_eq!(result.records[0].category(), MutationCategory::Invalid);
    assert_eq!(result.records[1].category(), MutationCategory::Deletion);

    let (loose, _) = config.merge_with_cli(Some(MarkerMatching::Substring), None);
    let processor = BatchProcessor::with_config(BatchConfig::new().parse_config(loose));
    assert_eq!(
        processor.classify(&["p.DEL1A"]).records[0].category(),
        MutationCategory::Deletion
    );
}
