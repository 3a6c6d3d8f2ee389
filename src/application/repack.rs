//! Repack use case: load a container and save it again

use crate::error::Result;
use crate::infrastructure::Archive;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepackSummary {
    pub journals: usize,
    pub photos: usize,
}

/// Read `input` and write an equivalent container to `output`
pub fn repack(input: &Path, output: &Path) -> Result<RepackSummary> {
    let archive = Archive::load(input)?;
    archive.save(output)?;
    Ok(RepackSummary {
        journals: archive.journals.len(),
        photos: archive.blobs().len(),
    })
}
