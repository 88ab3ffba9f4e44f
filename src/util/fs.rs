use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::core::error::{Error, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir_exists(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Open the input log for buffered line reading.
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| Error::input_open(path, e))?;
    Ok(BufReader::new(file))
}

/// Write `contents` to `path`, creating parent directories as needed.
///
/// A failure partway through can leave a partial file behind.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent).map_err(|e| Error::output(path, e))?;
    }

    let file = File::create(path).map_err(|e| Error::output(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::output(path, e))?;
    Ok(())
}
