//! File logging.
//!
//! The terminal is in raw mode and owned by the renderer, so log output
//! goes to a file under the data directory instead.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `item_tetris=debug`.
pub const LOG_ENV: &str = "ITEM_TETRIS_LOG";

pub const LOG_FILE: &str = "item-tetris.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns the log file path, or `None` when no file could be created, in
/// which case events are discarded.
pub fn init(dir: Option<&Path>) -> Option<PathBuf> {
    let opened = dir.and_then(|dir| {
        std::fs::create_dir_all(dir).ok()?;
        let path = dir.join(LOG_FILE);
        let file = File::create(&path).ok()?;
        Some((path, file))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false);

    match opened {
        Some((path, file)) => {
            let _ = builder.with_writer(Mutex::new(file)).try_init();
            Some(path)
        }
        None => {
            let _ = builder.with_writer(std::io::sink).try_init();
            None
        }
    }
}
