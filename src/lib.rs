// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds the CLI and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod language;
pub mod logging;
pub mod matcher;
pub mod metrics;
pub mod observer;
pub mod pool;
pub mod reshuffle;
pub mod runtime;
pub mod session;
pub mod ui;

pub use error::{Error, Result};
