//! File-backed logger. The terminal is in raw mode while the sandbox runs, so
//! records go to `lifesandbox.log` in the temp dir instead of stderr.

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("lifesandbox.log")
}

/// Install the global logger. `RUST_LOG` overrides the `info` default.
pub fn init() -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())?;

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Pipe(Box::new(file)));
    // A second init in the same process is harmless
    let _ = builder.try_init();
    Ok(())
}
