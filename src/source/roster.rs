// src/source/roster.rs

use anyhow::{Context, Result};
use std::{collections::BTreeSet, fs, path::Path};
use tracing::{debug, instrument};

use super::types::{ensure_meps_root, RosterDocument, RosterEntry};

/// Every member ever elected, with the country they represent.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Read and parse the roster file. Missing file, bad XML or a root
    /// without `mep` entries are all errors.
    #[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)
            .with_context(|| format!("reading roster {}", path.display()))?;
        let roster = Self::parse(&xml)
            .with_context(|| format!("parsing roster {}", path.display()))?;
        debug!(entries = roster.entries.len(), "roster loaded");
        Ok(roster)
    }

    pub fn parse(xml: &str) -> Result<Self> {
        ensure_meps_root(xml)?;
        let doc: RosterDocument = quick_xml::de::from_str(xml)?;
        Ok(Self::from_entries(doc.entries))
    }

    pub fn from_entries(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Distinct country names, sorted.
    pub fn list_countries(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Names listed under exactly `country`, in roster order.
    pub fn list_current_names(&self, country: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.country == country)
            .map(|e| e.full_name.as_str())
            .collect()
    }
}
