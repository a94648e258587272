// src/pipeline.rs

use anyhow::Result;
use std::{path::PathBuf, time::Instant};
use tracing::{info, instrument};

use crate::config::CollateConfig;
use crate::output::write_country_file;
use crate::process::{collect, prune_departed, records_for_country};
use crate::source::{read_all, Roster};

/// What a run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub countries: usize,
    pub members_written: usize,
    pub members_pruned: usize,
    pub files: Vec<PathBuf>,
}

/// Read everything once, then collect → prune → write for each roster country.
/// The first error aborts the run; files already written stay on disk.
#[instrument(level = "info", skip(cfg), fields(input = %cfg.input_dir.display(), output = %cfg.output_dir.display()))]
pub fn run(cfg: &CollateConfig) -> Result<RunSummary> {
    let start = Instant::now();

    // 1) inputs
    let records = read_all(&cfg.input_dir, &cfg.detail_prefix)?;
    let roster = Roster::load(cfg.roster_path())?;
    let countries = roster.list_countries();
    info!("{} countries in roster", countries.len());

    // 2) one file per country
    let mut summary = RunSummary::default();
    for country in &countries {
        let matching = records_for_country(&records, country);
        let mut reconciled = collect(matching.iter().copied(), country)?;
        let pruned = prune_departed(country, &mut reconciled, &roster.list_current_names(country));
        info!(
            country = %country,
            records = matching.len(),
            pruned,
            kept = reconciled.len(),
            "reconciled"
        );
        let path = write_country_file(&cfg.output_dir, country, &reconciled)?;

        summary.countries += 1;
        summary.members_written += reconciled.len();
        summary.members_pruned += pruned;
        summary.files.push(path);
    }

    info!("completed in {:?}", start.elapsed());
    Ok(summary)
}
