// src/output/write.rs

use anyhow::{anyhow, bail, Context, Result};
use celes::Country;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{info, instrument};

use super::names::normalize_name_casing;
use crate::config::{output_file_name, FIELD_DELIMITER, HEADER};
use crate::process::Reconciled;

/// ISO 3166-1 alpha-2 code for a country name, e.g. "United Kingdom" → "GB".
///
/// Only names are accepted: spaces are ignored and case doesn't matter, but
/// alpha-2, alpha-3 and numeric codes are rejected.
pub fn country_code(country: &str) -> Result<&'static str> {
    let key: String = country.chars().filter(|c| !c.is_whitespace()).collect();
    let countries = Country::get_countries();

    let is_code = key.chars().all(|c| c.is_ascii_digit())
        || countries
            .iter()
            .any(|c| c.alpha2.eq_ignore_ascii_case(&key) || c.alpha3.eq_ignore_ascii_case(&key));
    if is_code {
        bail!("{:?} is a country code, not a country name", country);
    }

    // long names first, then the aliases celes knows (short forms like "UnitedKingdom")
    let by_name = countries.iter().find(|c| {
        c.long_name
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect::<String>()
            .eq_ignore_ascii_case(&key)
    });
    match by_name {
        Some(c) => Ok(c.alpha2),
        None => key
            .parse::<Country>()
            .map(|c| c.alpha2)
            .map_err(|_| anyhow!("no ISO 3166 country matches {:?}", country)),
    }
}

/// Write `<output_dir>/data_<code>.csv`, replacing any previous file.
///
/// - header: `name,email,eu_group,national_group`
/// - rows: normalized name, email, EU group, national group joined by `#`
#[instrument(level = "info", skip(output_dir, reconciled), fields(rows = reconciled.len()))]
pub fn write_country_file<P: AsRef<Path>>(
    output_dir: P,
    country: &str,
    reconciled: &Reconciled,
) -> Result<PathBuf> {
    // 1) resolve the file name before touching the disk
    let code = country_code(country)?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let path = output_dir.join(output_file_name(code));

    // 2) header goes out raw, it uses commas
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{}", HEADER).with_context(|| format!("writing header to {}", path.display()))?;

    // 3) rows, unquoted, `#` separated
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .delimiter(FIELD_DELIMITER)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    for (name, row) in reconciled {
        let display_name = normalize_name_casing(name);
        wtr.write_record([
            display_name.as_str(),
            row.email.as_str(),
            row.eu_group.as_str(),
            row.national_group.as_str(),
        ])
        .with_context(|| format!("writing row for {} to {}", name, path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!("wrote {} rows to {}", reconciled.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NO_EMAIL;
    use crate::process::ContactRow;
    use tempfile::tempdir;

    fn row(email: &str) -> ContactRow {
        ContactRow {
            email: email.to_string(),
            eu_group: "Group of the European People's Party".to_string(),
            national_group: "Les Républicains".to_string(),
        }
    }

    #[test]
    fn test_country_code_lookup() -> Result<()> {
        assert_eq!(country_code("France")?, "FR");
        assert_eq!(country_code("Germany")?, "DE");
        Ok(())
    }

    #[test]
    fn test_country_code_multi_word_names() -> Result<()> {
        assert_eq!(country_code("United Kingdom")?, "GB");
        assert_eq!(country_code("North Macedonia")?, "MK");
        assert_eq!(country_code("New Zealand")?, "NZ");
        Ok(())
    }

    #[test]
    fn test_country_code_rejects_codes() {
        for code in ["FR", "fr", "FRA", "250", ""] {
            assert!(country_code(code).is_err(), "{:?} should not resolve", code);
        }
    }

    #[test]
    fn test_country_code_miss_is_error() {
        assert!(country_code("Atlantis").is_err());
    }

    #[test]
    fn test_writes_header_and_hash_rows() -> Result<()> {
        let dir = tempdir()?;
        let out_dir = dir.path().join("contact_details");
        let mut rec = Reconciled::new();
        rec.insert("MARTIN CLAIRE".to_string(), row("claire@x.eu"));
        rec.insert("DUPONT JEAN".to_string(), row(NO_EMAIL));

        let path = write_country_file(&out_dir, "France", &rec)?;
        assert_eq!(path, out_dir.join("data_FR.csv"));

        let text = fs::read_to_string(&path)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,email,eu_group,national_group");
        assert_eq!(
            lines[1],
            "Dupont Jean#NO EMAIL ADDRESS FOUND#Group of the European People's Party#Les Républicains"
        );
        assert_eq!(lines[2].split('#').next(), Some("Martin Claire"));
        for line in &lines[1..] {
            assert_eq!(line.split('#').count(), 4);
        }
        Ok(())
    }

    #[test]
    fn test_overwrites_previous_file() -> Result<()> {
        let dir = tempdir()?;
        let mut rec = Reconciled::new();
        rec.insert("DUPONT JEAN".to_string(), row("a@x.eu"));
        rec.insert("MARTIN CLAIRE".to_string(), row("b@x.eu"));
        write_country_file(dir.path(), "France", &rec)?;

        rec.remove("MARTIN CLAIRE");
        let path = write_country_file(dir.path(), "France", &rec)?;
        assert_eq!(fs::read_to_string(path)?.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_country_writes_header_only() -> Result<()> {
        let dir = tempdir()?;
        let path = write_country_file(dir.path(), "Malta", &Reconciled::new())?;
        assert_eq!(fs::read_to_string(path)?, format!("{}\n", HEADER));
        Ok(())
    }

    #[test]
    fn test_unknown_country_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        assert!(write_country_file(dir.path(), "Atlantis", &Reconciled::new()).is_err());
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }
}
