//! Menu loop and dispatch to the core reporter.
use crate::menu::{Menu, MenuChoice};
use std::io::{BufRead, Write};
use tracing::{info, warn};
use volscan_core::model::VolumeId;
use volscan_core::platform::VolumeProvider;
use volscan_core::scanner::{ProgressSink, TreeWalker};
use volscan_core::{ScanSettings, VolumeReporter};

/// Where the session writes: report text, diagnostics, and scan progress.
pub struct Console<'a> {
    pub out: &'a mut dyn Write,
    pub diag: &'a mut dyn Write,
    pub progress: &'a mut dyn ProgressSink,
}

/// Whether the loop keeps going after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One interactive session.
pub struct App<'a> {
    provider: &'a dyn VolumeProvider,
    walker: &'a dyn TreeWalker,
    settings: ScanSettings,
    primary: VolumeId,
}

impl<'a> App<'a> {
    pub fn new(
        provider: &'a dyn VolumeProvider,
        walker: &'a dyn TreeWalker,
        settings: ScanSettings,
    ) -> Self {
        let primary = provider.primary_volume();
        Self {
            provider,
            walker,
            settings,
            primary,
        }
    }

    /// Use `primary` as the main drive instead of the provider's default.
    pub fn with_primary(mut self, primary: VolumeId) -> Self {
        self.primary = primary;
        self
    }

    /// Show the menu until the operator exits or input runs out.
    pub fn run(&self, mut input: impl BufRead, console: &mut Console<'_>) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            write!(
                console.out,
                "{}",
                Menu {
                    primary: self.primary.as_str()
                }
            )?;
            console.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                info!("Input closed, leaving menu");
                writeln!(console.out)?;
                return Ok(());
            }

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(console.out, "Invalid choice. Please try again.")?;
                continue;
            };
            if self.dispatch(choice, console)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Carry out one menu choice.
    pub fn dispatch(&self, choice: MenuChoice, console: &mut Console<'_>) -> anyhow::Result<Flow> {
        info!("Menu choice {}", choice.number());
        let reporter = VolumeReporter::new(self.provider, self.walker, &self.settings);

        match choice {
            MenuChoice::ScanPrimary => {
                reporter.report(&self.primary, console.out, console.diag, console.progress)?;
            }
            MenuChoice::ScanAttached => {
                writeln!(
                    console.out,
                    "Please wait while the program scans attached drives."
                )?;
                let Some(volumes) = self.volumes(console)? else {
                    return Ok(Flow::Continue);
                };
                let attached: Vec<VolumeId> =
                    volumes.into_iter().filter(|v| *v != self.primary).collect();
                if attached.is_empty() {
                    writeln!(console.out, "No attached drives found.")?;
                } else {
                    reporter.report_many(&attached, console.out, console.diag, console.progress)?;
                }
            }
            MenuChoice::ScanAll => {
                writeln!(console.out, "Please wait while the program scans all drives.")?;
                let Some(volumes) = self.volumes(console)? else {
                    return Ok(Flow::Continue);
                };
                let totals =
                    reporter.report_many(&volumes, console.out, console.diag, console.progress)?;
                writeln!(console.out)?;
                write!(console.out, "{totals}")?;
            }
            MenuChoice::ListDrives => {
                let Some(volumes) = self.volumes(console)? else {
                    return Ok(Flow::Continue);
                };
                writeln!(console.out)?;
                writeln!(console.out, "Current drives on the system:")?;
                for volume in &volumes {
                    writeln!(console.out, "{volume}")?;
                }
                writeln!(console.out)?;
            }
            MenuChoice::Exit => {
                writeln!(console.out, "Exiting program.")?;
                return Ok(Flow::Exit);
            }
        }
        console.out.flush()?;
        Ok(Flow::Continue)
    }

    /// List volumes, printing the failure and returning `None` if the
    /// platform cannot enumerate them.
    fn volumes(&self, console: &mut Console<'_>) -> anyhow::Result<Option<Vec<VolumeId>>> {
        match self.provider.list_volumes() {
            Ok(volumes) => Ok(Some(volumes)),
            Err(err) => {
                warn!("Volume enumeration failed: {err}");
                writeln!(console.diag, "Error getting logical drives: {err}")?;
                Ok(None)
            }
        }
    }
}
