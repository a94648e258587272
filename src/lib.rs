pub mod config;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod source;

pub use config::CollateConfig;
pub use pipeline::{run, RunSummary};
