//! Command-line arguments.
use clap::Parser;
use tracing::Level;
use volscan_core::model::VolumeId;
use volscan_core::ScanSettings;

/// Interactive disk usage reporter.
#[derive(Debug, Clone, Parser)]
#[command(name = "volscan", version, about)]
pub struct Args {
    /// Print a "this may take a while" notice for volumes larger than this many GiB.
    #[arg(long, value_name = "GIB", default_value_t = 50)]
    pub large_volume_threshold_gib: u64,

    /// Volume treated as the main drive (defaults to C:\ on Windows, / elsewhere).
    #[arg(long, value_name = "VOLUME")]
    pub primary: Option<String>,

    /// Maximum log level written to stderr.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: Level,
}

impl Args {
    pub fn settings(&self) -> ScanSettings {
        ScanSettings::with_threshold_gib(self.large_volume_threshold_gib)
    }

    pub fn primary_override(&self) -> Option<VolumeId> {
        self.primary.as_deref().map(VolumeId::from)
    }
}
