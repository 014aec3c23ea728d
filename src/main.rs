//! VolScan — interactive disk usage reporter.
//!
//! Thin binary entry point. All logic lives in the `volscan-core`
//! and `volscan-cli` crates.
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = volscan_cli::Args::parse();

    // Logs share stderr with diagnostics; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("VolScan starting");

    volscan_cli::run(&args)?;

    tracing::info!("VolScan exiting");
    Ok(())
}
