//! Structured logging for the dashboard core.
//!
//! All modules emit through `tracing` macros and spans; this module only
//! installs the subscriber that decides where events go.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → rotating file | stderr
//! ```
//!
//! # Configuration
//!
//! Verbosity is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! When `trace_file` is set, output goes to that file, rotated at 10 MB with
//! three backups retained.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
