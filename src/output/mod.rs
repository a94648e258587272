pub mod names;
pub mod verify;
pub mod write;

pub use names::normalize_name_casing;
pub use verify::{verify_output_dir, FileReport};
pub use write::{country_code, write_country_file};
