pub mod details;
pub mod roster;
pub mod types;

pub use details::{read_all, select_detail_files};
pub use roster::Roster;
pub use types::{ContactMethod, MemberRecord, RosterEntry};
