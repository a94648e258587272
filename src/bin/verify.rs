// src/bin/verify.rs

use anyhow::{bail, Result};
use mep_contacts::{output::verify_output_dir, source::Roster, CollateConfig};

fn main() -> Result<()> {
    let cfg = CollateConfig::default();

    // 1) current roster, for name checks
    let roster = Roster::load(cfg.roster_path())?;

    // 2) every data_*.csv under the output directory
    let reports = verify_output_dir(&cfg.output_dir, &roster)?;
    if reports.is_empty() {
        bail!("No output files found under '{}'", cfg.output_dir.display());
    }

    // 3) summary table
    println!(
        "\n{: <10} {:>8} {:>8} {:>10} {:>10}",
        "Code", "Header", "Rows", "Malformed", "Unknown"
    );
    println!("{:-<50}", "");
    let mut dirty = 0;
    for r in &reports {
        println!(
            "{: <10} {:>8} {:>8} {:>10} {:>10}",
            r.code,
            if r.header_ok { "ok" } else { "BAD" },
            r.rows,
            r.malformed_lines.len(),
            r.unknown_names.len()
        );
        if !r.is_clean() {
            dirty += 1;
        }
    }

    for r in reports.iter().filter(|r| !r.is_clean()) {
        for line in &r.malformed_lines {
            println!("{}: line {} does not have 4 fields", r.path.display(), line);
        }
        for name in &r.unknown_names {
            println!("{}: {} is not a current member", r.path.display(), name);
        }
    }

    if dirty > 0 {
        bail!("{} of {} files have issues", dirty, reports.len());
    }
    Ok(())
}
