// src/config.rs

use std::path::{Path, PathBuf};

/// Directory holding the roster and the detail batches.
pub const INPUT_DIR: &str = "meps_xml";
/// Full historical roster, inside `INPUT_DIR`.
pub const ROSTER_FILE: &str = "full_list.xml";
/// Detail batch files start with this prefix.
pub const DETAIL_PREFIX: &str = "mep_details";
/// Per-country files land here.
pub const OUTPUT_DIR: &str = "contact_details";
/// Root element of both the roster and the detail batches.
pub const ROOT_ELEMENT: &str = "meps";

pub const OUTPUT_PREFIX: &str = "data_";
pub const OUTPUT_EXTENSION: &str = "csv";

/// Header line of every output file. Comma separated, unlike the data rows.
pub const HEADER: &str = "name,email,eu_group,national_group";
/// Separator between fields of a data row.
pub const FIELD_DELIMITER: u8 = b'#';
/// Number of fields in a data row.
pub const FIELD_COUNT: usize = 4;

/// `type` attribute value marking an email contact.
pub const EMAIL_TYPE: &str = "EMA";
/// Written in place of an email when a member has none.
pub const NO_EMAIL: &str = "NO EMAIL ADDRESS FOUND";

/// Hyphen-group components dropped from output names.
pub const NAME_PARTICLES: &[&str] = &["VAN", "VON"];

/// Locations of the inputs and outputs of a collation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollateConfig {
    pub input_dir: PathBuf,
    pub roster_file: String,
    pub detail_prefix: String,
    pub output_dir: PathBuf,
}

impl Default for CollateConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(INPUT_DIR),
            roster_file: ROSTER_FILE.to_string(),
            detail_prefix: DETAIL_PREFIX.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}

impl CollateConfig {
    /// Same file names as the default, rooted somewhere else.
    pub fn rooted_at(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn roster_path(&self) -> PathBuf {
        self.input_dir.join(&self.roster_file)
    }
}

/// `data_<code>.csv`
pub fn output_file_name(country_code: &str) -> String {
    format!("{}{}.{}", OUTPUT_PREFIX, country_code, OUTPUT_EXTENSION)
}
