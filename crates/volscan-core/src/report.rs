//! Per-volume reporting: capacity snapshot followed by the ranked
//! subdirectory breakdown of the volume root.
use crate::config::ScanSettings;
use crate::error::VolumeError;
use crate::model::{RankedReport, VolumeId, VolumeSnapshot, VolumeTotals};
use crate::platform::VolumeProvider;
use crate::scanner::{rank, ProgressSink, TreeWalker};
use std::io::{self, Write};
use tracing::{debug, info};

/// Printed before scanning a volume larger than the configured threshold.
pub const LARGE_VOLUME_ADVISORY: &str =
    "Please wait while the program scans your directories. This may take a while...";

/// What happened to one volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeOutcome {
    Reported {
        snapshot: VolumeSnapshot,
        report: RankedReport,
    },
    /// The capacity query failed; the volume was not scanned.
    Failed(VolumeError),
}

/// Drives the capacity query and directory ranking for volumes.
///
/// Report text goes to `out`, failures to `diag`. Only write errors on those
/// streams are returned as `Err`; a volume that cannot be read is an
/// ordinary [`VolumeOutcome::Failed`].
pub struct VolumeReporter<'a> {
    provider: &'a dyn VolumeProvider,
    walker: &'a dyn TreeWalker,
    settings: &'a ScanSettings,
}

impl<'a> VolumeReporter<'a> {
    pub fn new(
        provider: &'a dyn VolumeProvider,
        walker: &'a dyn TreeWalker,
        settings: &'a ScanSettings,
    ) -> Self {
        Self {
            provider,
            walker,
            settings,
        }
    }

    /// Report a single volume.
    pub fn report(
        &self,
        volume: &VolumeId,
        out: &mut dyn Write,
        diag: &mut dyn Write,
        sink: &mut dyn ProgressSink,
    ) -> io::Result<VolumeOutcome> {
        writeln!(out, "Checking drive: {volume}")?;

        let capacity = match self.provider.query_capacity(volume) {
            Ok(c) => c,
            Err(err) => {
                info!("Skipping {volume}: {err}");
                writeln!(
                    diag,
                    "Error getting disk free space for drive {volume}: {err}"
                )?;
                writeln!(diag, "{}", err.advice())?;
                return Ok(VolumeOutcome::Failed(err));
            }
        };

        let snapshot = VolumeSnapshot::new(volume.clone(), capacity);
        debug!(
            "{volume}: total={} free={} used={}",
            snapshot.total_bytes(),
            snapshot.free_bytes(),
            snapshot.used_bytes()
        );
        writeln!(out)?;
        write!(out, "{snapshot}")?;
        writeln!(out)?;

        if snapshot.total_bytes() > self.settings.large_volume_threshold {
            writeln!(out, "{LARGE_VOLUME_ADVISORY}")?;
            writeln!(out)?;
        }
        out.flush()?;

        let report = rank(self.walker, volume.root(), sink);
        write!(out, "{report}")?;
        out.flush()?;

        Ok(VolumeOutcome::Reported { snapshot, report })
    }

    /// Report each volume in turn. A failed volume never stops the ones after it.
    pub fn report_many(
        &self,
        volumes: &[VolumeId],
        out: &mut dyn Write,
        diag: &mut dyn Write,
        sink: &mut dyn ProgressSink,
    ) -> io::Result<VolumeTotals> {
        let mut totals = VolumeTotals::default();
        for volume in volumes {
            match self.report(volume, out, diag, sink)? {
                VolumeOutcome::Reported { snapshot, .. } => totals.add(&snapshot),
                VolumeOutcome::Failed(_) => totals.add_failure(),
            }
        }
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GIB;
    use crate::model::Capacity;
    use crate::scanner::fake::FakeWalker;
    use crate::scanner::ScanProgress;
    use std::collections::HashMap;

    struct FakeVolumes {
        volumes: HashMap<String, Result<Capacity, VolumeError>>,
    }

    impl FakeVolumes {
        fn new(entries: &[(&str, Result<Capacity, VolumeError>)]) -> Self {
            Self {
                volumes: entries
                    .iter()
                    .map(|(id, r)| (id.to_string(), r.clone()))
                    .collect(),
            }
        }
    }

    impl VolumeProvider for FakeVolumes {
        fn list_volumes(&self) -> Result<Vec<VolumeId>, VolumeError> {
            Ok(self.volumes.keys().map(|k| VolumeId::new(k.as_str())).collect())
        }

        fn query_capacity(&self, volume: &VolumeId) -> Result<Capacity, VolumeError> {
            self.volumes
                .get(volume.as_str())
                .cloned()
                .unwrap_or(Err(VolumeError::NotReady))
        }

        fn primary_volume(&self) -> VolumeId {
            VolumeId::new("/vol")
        }
    }

    fn cap(total: u64, free: u64) -> Capacity {
        Capacity {
            total_bytes: total,
            free_bytes: free,
        }
    }

    fn run(
        provider: &FakeVolumes,
        walker: &FakeWalker,
        settings: &ScanSettings,
        volume: &str,
    ) -> (VolumeOutcome, String, String) {
        let reporter = VolumeReporter::new(provider, walker, settings);
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let (mut tx, _rx) = crossbeam_channel::unbounded::<ScanProgress>();
        let outcome = reporter
            .report(&VolumeId::new(volume), &mut out, &mut diag, &mut tx)
            .unwrap();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn test_access_denied_skips_ranking() {
        let provider = FakeVolumes::new(&[("/vol", Err(VolumeError::AccessDenied))]);
        let walker = FakeWalker::new().dir("/vol/a").file("/vol/a/f", 10);

        let (outcome, out, diag) = run(&provider, &walker, &ScanSettings::default(), "/vol");

        assert_eq!(outcome, VolumeOutcome::Failed(VolumeError::AccessDenied));
        assert_eq!(walker.invocations(), 0);
        assert_eq!(out, "Checking drive: /vol\n");
        assert_eq!(
            diag,
            "Error getting disk free space for drive /vol: access denied\n\
             Access denied. Try running the program as an administrator.\n"
        );
    }

    #[test]
    fn test_not_ready_and_unknown_have_distinct_messages() {
        let provider = FakeVolumes::new(&[
            ("E:\\", Err(VolumeError::NotReady)),
            (
                "F:\\",
                Err(VolumeError::Unknown {
                    code: 1117,
                    message: "I/O device error".into(),
                }),
            ),
        ]);
        let walker = FakeWalker::new();
        let settings = ScanSettings::default();

        let (_, _, not_ready) = run(&provider, &walker, &settings, "E:\\");
        let (_, _, unknown) = run(&provider, &walker, &settings, "F:\\");

        assert!(not_ready.ends_with("The drive is not ready.\n"));
        assert!(unknown.contains("error 1117: I/O device error"));
        assert!(unknown.ends_with("Unknown error.\n"));
        assert_eq!(walker.invocations(), 0);
    }

    #[test]
    fn test_success_prints_snapshot_then_ranking() {
        let provider = FakeVolumes::new(&[("/vol", Ok(cap(4 * GIB, GIB)))]);
        let walker = FakeWalker::new()
            .dir("/vol/small")
            .file("/vol/small/f", 1024)
            .dir("/vol/large")
            .file("/vol/large/f", 3 * 1024 * 1024);

        let (outcome, out, diag) = run(&provider, &walker, &ScanSettings::default(), "/vol");

        assert_eq!(
            out,
            "Checking drive: /vol\n\
             \n\
             Drive: /vol\n\
             Total Space: 4.00 GB\n\
             Free Space: 1.00 GB\n\
             Used Space: 3.00 GB\n\
             \n\
             /vol/large: 3.00 MB\n\
             /vol/small: 1.00 KB\n"
        );
        assert!(diag.is_empty());
        match outcome {
            VolumeOutcome::Reported { snapshot, report } => {
                assert_eq!(snapshot.used_bytes(), 3 * GIB);
                assert_eq!(report.len(), 2);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_advisory_only_above_threshold() {
        let provider = FakeVolumes::new(&[
            ("/big", Ok(cap(51 * GIB, GIB))),
            ("/edge", Ok(cap(50 * GIB, GIB))),
        ]);
        let walker = FakeWalker::new();
        let settings = ScanSettings::default();

        let (_, big, _) = run(&provider, &walker, &settings, "/big");
        let (_, edge, _) = run(&provider, &walker, &settings, "/edge");
        assert!(big.contains(LARGE_VOLUME_ADVISORY));
        assert!(!edge.contains(LARGE_VOLUME_ADVISORY));

        let low = ScanSettings::with_threshold_gib(1);
        let (_, edge_low, _) = run(&provider, &walker, &low, "/edge");
        assert!(edge_low.contains(LARGE_VOLUME_ADVISORY));
    }

    #[test]
    fn test_failure_does_not_stop_later_volumes() {
        let provider = FakeVolumes::new(&[
            ("/locked", Err(VolumeError::AccessDenied)),
            ("/ok", Ok(cap(10 * GIB, 4 * GIB))),
            ("/also-ok", Ok(cap(6 * GIB, 2 * GIB))),
        ]);
        let walker = FakeWalker::new().dir("/ok/a").file("/ok/a/f", 5);
        let settings = ScanSettings::default();
        let reporter = VolumeReporter::new(&provider, &walker, &settings);
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let (mut tx, _rx) = crossbeam_channel::unbounded::<ScanProgress>();

        let volumes = [
            VolumeId::new("/locked"),
            VolumeId::new("/ok"),
            VolumeId::new("/also-ok"),
        ];
        let totals = reporter
            .report_many(&volumes, &mut out, &mut diag, &mut tx)
            .unwrap();

        assert_eq!(totals.volumes, 2);
        assert_eq!(totals.failed, 1);
        assert_eq!(totals.total_bytes, 16 * GIB);
        assert_eq!(totals.used_bytes(), 10 * GIB);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Drive: /ok\n"));
        assert!(out.contains("Drive: /also-ok\n"));
        assert!(out.contains("/ok/a: 5.00 B"));
        // One listing per scanned volume, none for the locked one.
        assert_eq!(walker.list_calls.get(), 2);
    }
}
