// src/source/types.rs

use anyhow::{bail, ensure, Result};
use quick_xml::{events::Event, Reader};
use serde::Deserialize;

use crate::config::ROOT_ELEMENT;

/// One way of reaching a member, tagged with its type code (`EMA`, `PHO`, ...).
#[derive(Debug, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct ContactMethod {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl ContactMethod {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// A member as described by a detail batch, after boundary normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub full_name: String,
    pub country: String,
    pub political_group: String,
    pub national_political_group: String,
    /// Always a sequence, whatever the source shape was.
    pub contact_methods: Vec<ContactMethod>,
}

/// A (name, country) pair from the historical roster.
#[derive(Debug, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct RosterEntry {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub country: String,
}

// ─── raw XML shapes ──────────────────────────────────────────────────

/// Name of the first element in `xml`.
pub(crate) fn root_element(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) => {
                return Ok(String::from_utf8_lossy(e.name().as_ref()).to_string());
            }
            Event::Eof => bail!("document has no root element"),
            _ => {}
        }
    }
}

/// serde ignores the root tag, so check it separately.
pub(crate) fn ensure_meps_root(xml: &str) -> Result<()> {
    let root = root_element(xml)?;
    ensure!(
        root == ROOT_ELEMENT,
        "expected <{}> root element, found <{}>",
        ROOT_ELEMENT,
        root
    );
    Ok(())
}

/// Text element that may carry attributes we don't use, e.g. `<country abbr="FR">France</country>`.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct XmlText {
    #[serde(rename = "$text", default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterDocument {
    #[serde(rename = "mep")]
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailDocument {
    #[serde(rename = "mep", default)]
    pub members: Vec<DetailEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DetailEntry {
    pub full_name: String,
    pub country: XmlText,
    pub political_group: XmlText,
    pub national_political_group: XmlText,
    #[serde(rename = "eContact", default)]
    pub e_contact: Vec<ContactMethod>,
}

impl From<DetailEntry> for MemberRecord {
    fn from(raw: DetailEntry) -> Self {
        MemberRecord {
            full_name: raw.full_name,
            country: raw.country.text,
            political_group: raw.political_group.text,
            national_political_group: raw.national_political_group.text,
            contact_methods: raw.e_contact,
        }
    }
}
