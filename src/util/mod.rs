//! Filesystem helpers for reading the log and writing reports.

pub mod fs;

pub use fs::{ensure_dir_exists, open_input, write_output};
