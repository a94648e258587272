// src/source/details.rs

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

use super::types::{ensure_meps_root, DetailDocument, MemberRecord};

/// Regular files in `dir` whose name starts with `prefix`, sorted by path.
pub fn select_detail_files<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let pattern = format!(
        "{}/{}*",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(prefix)
    );
    let mut files: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Parse one detail batch. A batch without a member collection yields nothing.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_detail_file<P: AsRef<Path>>(path: P) -> Result<Vec<MemberRecord>> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)
        .with_context(|| format!("reading detail file {}", path.display()))?;
    ensure_meps_root(&xml).with_context(|| format!("parsing detail file {}", path.display()))?;
    let doc: DetailDocument = quick_xml::de::from_str(&xml)
        .with_context(|| format!("parsing detail file {}", path.display()))?;
    if doc.members.is_empty() {
        warn!("no members in {}", path.display());
    }
    Ok(doc.members.into_iter().map(MemberRecord::from).collect())
}

/// Read every `<prefix>*` batch under `dir`, in sorted filename order, into one list.
#[instrument(level = "info", skip(dir), fields(dir = %dir.as_ref().display()))]
pub fn read_all<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<Vec<MemberRecord>> {
    let files = select_detail_files(&dir, prefix)?;
    let mut records = Vec::new();
    for file in &files {
        let batch = read_detail_file(file)?;
        debug!(file = %file.display(), records = batch.len(), "read detail batch");
        records.extend(batch);
    }
    info!(
        "read {} member records from {} detail files",
        records.len(),
        files.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn member(name: &str, country: &str) -> String {
        format!(
            "<mep><fullName>{}</fullName><country>{}</country>\
             <politicalGroup>G</politicalGroup>\
             <nationalPoliticalGroup>N</nationalPoliticalGroup></mep>",
            name, country
        )
    }

    #[test]
    fn test_selects_prefixed_files_sorted() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("mep_details_2.xml"), "<meps/>")?;
        fs::write(dir.path().join("mep_details_1.xml"), "<meps/>")?;
        fs::write(dir.path().join("full_list.xml"), "<meps/>")?;
        fs::create_dir(dir.path().join("mep_details_dir"))?;

        let files = select_detail_files(dir.path(), "mep_details")?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["mep_details_1.xml", "mep_details_2.xml"]);
        Ok(())
    }

    #[test]
    fn test_read_all_concatenates_in_order() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("mep_details_b.xml"),
            format!("<meps>{}</meps>", member("LATE ONE", "France")),
        )?;
        fs::write(
            dir.path().join("mep_details_a.xml"),
            format!(
                "<meps>{}{}</meps>",
                member("EARLY ONE", "France"),
                member("EARLY TWO", "Malta")
            ),
        )?;
        fs::write(dir.path().join("mep_details_c.xml"), "<meps></meps>")?;

        let records = read_all(dir.path(), "mep_details")?;
        let names: Vec<&str> = records.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["EARLY ONE", "EARLY TWO", "LATE ONE"]);
        Ok(())
    }

    #[test]
    fn test_parse_error_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("mep_details_1.xml"), "<meps><mep>")?;
        assert!(read_all(dir.path(), "mep_details").is_err());
        Ok(())
    }

    #[test]
    fn test_wrong_root_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("mep_details_1.xml"),
            format!("<members>{}</members>", member("DUPONT JEAN", "France")),
        )?;
        assert!(read_all(dir.path(), "mep_details").is_err());
        Ok(())
    }

    #[test]
    fn test_no_files_is_empty() -> Result<()> {
        let dir = tempdir()?;
        assert!(read_all(dir.path(), "mep_details")?.is_empty());
        Ok(())
    }
}
