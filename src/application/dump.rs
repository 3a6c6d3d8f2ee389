//! Dump use case: print the journals held in a container

use crate::error::Result;
use crate::infrastructure::Archive;
use std::io::Write;
use std::path::Path;

/// Load the container at `path` and pretty-print every journal to `writer`
pub fn dump<W: Write>(path: &Path, writer: W) -> Result<usize> {
    let archive = Archive::load(path)?;
    archive.dump(writer)?;
    Ok(archive.journals.len())
}
