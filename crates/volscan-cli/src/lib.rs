//! VolScan CLI — interactive console frontend over `volscan-core`.
//!
//! Owns everything that touches the terminal: argument parsing, the menu
//! loop, and the progress line.
pub mod app;
pub mod args;
pub mod menu;
pub mod progress;

pub use app::{App, Console, Flow};
pub use args::Args;
pub use menu::MenuChoice;
pub use progress::ConsoleProgress;

use std::io;
use volscan_core::platform::SystemVolumes;
use volscan_core::scanner::JwalkWalker;

/// Run an interactive session on the real system volumes and stdio.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let provider = SystemVolumes::new();
    let walker = JwalkWalker::new();

    let mut app = App::new(&provider, &walker, args.settings());
    if let Some(primary) = args.primary_override() {
        app = app.with_primary(primary);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    let mut progress = ConsoleProgress::new();
    let mut console = Console {
        out: &mut stdout,
        diag: &mut stderr,
        progress: &mut progress,
    };
    app.run(stdin.lock(), &mut console)
}
