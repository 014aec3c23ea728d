//! Console progress line using indicatif.
//!
//! One bar per ranked root, redrawn in place as each subdirectory finishes.
//! Access errors are printed above the bar on stderr so the report on
//! stdout stays clean.
use indicatif::{ProgressBar, ProgressStyle};
use volscan_core::scanner::{ProgressSink, ScanProgress};

#[derive(Default)]
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("  Scanning [{bar:30.cyan/dim}] {pos}/{len} folders {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸─")
    }

    fn finish_bar(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn send(&mut self, event: ScanProgress) {
        match event {
            ScanProgress::Started { total } => {
                self.finish_bar();
                let pb = ProgressBar::new(total);
                pb.set_style(Self::style());
                self.bar = Some(pb);
            }
            ScanProgress::Update {
                processed,
                current_path,
                ..
            } => {
                if let Some(pb) = &self.bar {
                    pb.set_position(processed);
                    pb.set_message(current_path);
                }
            }
            ScanProgress::Error { path, message } => {
                let line = format!("Error accessing {path}: {message}");
                match &self.bar {
                    Some(pb) => pb.suspend(|| eprintln!("{line}")),
                    None => eprintln!("{line}"),
                }
            }
            ScanProgress::Complete { .. } => self.finish_bar(),
        }
    }
}

impl Drop for ConsoleProgress {
    fn drop(&mut self) {
        self.finish_bar();
    }
}
