use anyhow::Result;
use mep_contacts::{run, CollateConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) collate every roster country ─────────────────────────────
    let cfg = CollateConfig::default();
    let summary = run(&cfg)?;

    info!(
        countries = summary.countries,
        written = summary.members_written,
        pruned = summary.members_pruned,
        "all done"
    );
    Ok(())
}
