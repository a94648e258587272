// src/process/mod.rs

use anyhow::{ensure, Result};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::config::{EMAIL_TYPE, NO_EMAIL};
use crate::source::{ContactMethod, MemberRecord};

/// What gets written for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub email: String,
    pub eu_group: String,
    pub national_group: String,
}

/// Members of one country keyed by raw full name. Inserting an existing
/// name replaces the earlier row, so the last record seen wins.
pub type Reconciled = BTreeMap<String, ContactRow>;

/// Text of the first `EMA` method in scan order, or the no-email sentinel.
pub fn extract_email(methods: &[ContactMethod]) -> String {
    methods
        .iter()
        .find(|m| m.kind == EMAIL_TYPE)
        .map(|m| m.value.clone())
        .unwrap_or_else(|| NO_EMAIL.to_string())
}

/// Records whose country is exactly `country`, in their original order.
pub fn records_for_country<'a>(
    records: &'a [MemberRecord],
    country: &str,
) -> Vec<&'a MemberRecord> {
    records.iter().filter(|r| r.country == country).collect()
}

/// Build the per-name rows for `country`. Every record must already belong
/// to that country; anything else is an internal error.
pub fn collect<'a, I>(records: I, country: &str) -> Result<Reconciled>
where
    I: IntoIterator<Item = &'a MemberRecord>,
{
    let mut out = Reconciled::new();
    for rec in records {
        ensure!(
            rec.country == country,
            "record for {} belongs to {}, not {}",
            rec.full_name,
            rec.country,
            country
        );
        let row = ContactRow {
            email: extract_email(&rec.contact_methods),
            eu_group: rec.political_group.clone(),
            national_group: rec.national_political_group.clone(),
        };
        if out.insert(rec.full_name.clone(), row).is_some() {
            debug!(name = %rec.full_name, country, "duplicate record, keeping the later one");
        }
    }
    Ok(out)
}

/// Drop every member not listed in the current roster for `country`.
/// Returns how many were removed.
pub fn prune_departed(country: &str, reconciled: &mut Reconciled, current_names: &[&str]) -> usize {
    let current: HashSet<&str> = current_names.iter().copied().collect();
    let before = reconciled.len();
    reconciled.retain(|name, _| {
        let keep = current.contains(name.as_str());
        if !keep {
            debug!(name = %name, country, "no longer a current member");
        }
        keep
    });
    before - reconciled.len()
}
