//! File logging.
//!
//! The terminal belongs to the UI, so log output goes to
//! `<data dir>/dimen6.log` and only when `DIMEN6_LOG` holds a filter
//! directive such as `debug` or `dimen6=trace`.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DIMEN6_LOG";

/// Log file name inside the data directory.
pub const LOG_FILE: &str = "dimen6.log";

/// Install the file subscriber if logging was requested.
pub fn init() -> color_eyre::Result<()> {
    let Ok(directive) = std::env::var(LOG_ENV) else {
        return Ok(());
    };

    let dir = dimen6_config::data_dir()?;
    fs::create_dir_all(&dir).wrap_err("creating log directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
        .wrap_err("opening log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
