use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Send log output to `path`.
///
/// The terminal belongs to the UI while a session runs, so nothing is ever
/// logged to stderr. The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // a second init (tests, embedding) keeps the first logger
    if let Err(e) = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
    {
        log::debug!("logger already set, not logging to {}: {e}", path.display());
    }
    Ok(())
}
