// src/output/verify.rs

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use glob::{glob, Pattern};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    path::{Path, PathBuf},
};
use tracing::warn;

use super::{names::normalize_name_casing, write::country_code};
use crate::config::{FIELD_COUNT, FIELD_DELIMITER, HEADER, OUTPUT_EXTENSION, OUTPUT_PREFIX};
use crate::source::Roster;

/// Findings for one `data_<code>.csv` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub code: String,
    pub header_ok: bool,
    pub rows: usize,
    /// 1-based line numbers of rows without exactly four fields.
    pub malformed_lines: Vec<usize>,
    /// Names that are not a current roster member for this code.
    pub unknown_names: Vec<String>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.header_ok && self.malformed_lines.is_empty() && self.unknown_names.is_empty()
    }
}

/// Normalized roster names per country code. Countries without a code are skipped.
fn names_by_code(roster: &Roster) -> HashMap<String, HashSet<String>> {
    let mut map: HashMap<String, HashSet<String>> = HashMap::new();
    for country in roster.list_countries() {
        let code = match country_code(&country) {
            Ok(code) => code,
            Err(e) => {
                warn!("skipping roster country: {}", e);
                continue;
            }
        };
        map.entry(code.to_string()).or_default().extend(
            roster
                .list_current_names(&country)
                .into_iter()
                .map(normalize_name_casing),
        );
    }
    map
}

/// Check every output file under `output_dir` against the roster.
pub fn verify_output_dir<P: AsRef<Path>>(output_dir: P, roster: &Roster) -> Result<Vec<FileReport>> {
    let output_dir = output_dir.as_ref();
    let pattern = format!(
        "{}/{}*.{}",
        Pattern::escape(&output_dir.to_string_lossy()),
        OUTPUT_PREFIX,
        OUTPUT_EXTENSION
    );
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();

    let known = names_by_code(roster);
    let empty = HashSet::new();
    paths
        .into_iter()
        .map(|path| {
            let code = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_prefix(OUTPUT_PREFIX))
                .unwrap_or_default()
                .to_string();
            let names = known.get(&code).unwrap_or(&empty);
            verify_file(path, code, names)
        })
        .collect()
}

fn verify_file(path: PathBuf, code: String, names: &HashSet<String>) -> Result<FileReport> {
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(FIELD_DELIMITER)
        .from_reader(file);

    let mut report = FileReport {
        path: path.clone(),
        code,
        header_ok: false,
        rows: 0,
        malformed_lines: Vec::new(),
        unknown_names: Vec::new(),
    };

    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("reading {} at record {}", path.display(), idx))?;
        if idx == 0 {
            report.header_ok = record.len() == 1 && record.get(0) == Some(HEADER);
            continue;
        }
        report.rows += 1;
        if record.len() != FIELD_COUNT {
            report.malformed_lines.push(idx + 1);
            continue;
        }
        let name = record.get(0).unwrap_or_default();
        if !names.contains(name) {
            report.unknown_names.push(name.to_string());
        }
    }
    Ok(report)
}
