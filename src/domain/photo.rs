//! Photo value object and content digests

use crate::error::{DayportError, Result};
use chrono::{DateTime, Utc};
use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// MD5 of a byte sequence as lowercase hex
pub fn digest_bytes(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

/// A photo attached to an entry.
///
/// Photos built from a local file own that path and compute their digest on
/// first request. Photos recovered from a journal document carry only the
/// digest that was recorded there.
#[derive(Debug, Clone)]
pub struct Photo {
    pub id: Uuid,
    pub timestamp: Option<DateTime<Utc>>,
    path: Option<PathBuf>,
    digest: OnceCell<String>,
}

impl Photo {
    /// Photo backed by a local file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Photo {
            id: Uuid::new_v4(),
            timestamp: None,
            path: Some(path.into()),
            digest: OnceCell::new(),
        }
    }

    /// Photo known only by identifier and recorded digest
    pub fn from_digest(
        id: Uuid,
        digest: Option<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        let cell = OnceCell::new();
        if let Some(digest) = digest {
            let _ = cell.set(digest);
        }
        Photo {
            id,
            timestamp,
            path: None,
            digest: cell,
        }
    }

    pub fn with_timestamp(mut self, timestamp: Option<DateTime<Utc>>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Local byte source, absent for photos read back from a document
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the full byte source
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| DayportError::MissingPhotoSource(self.id.simple().to_string()))?;
        fs::read(path).map_err(|source| DayportError::Digest {
            path: path.clone(),
            source,
        })
    }

    /// Content digest, computed from the byte source once and cached
    pub fn digest(&self) -> Result<&str> {
        if let Some(digest) = self.digest.get() {
            return Ok(digest);
        }
        let computed = digest_bytes(&self.read_bytes()?);
        Ok(self.digest.get_or_init(|| computed))
    }

    /// Digest to record for this photo.
    ///
    /// Photos with a byte source always have one; a photo read back from a
    /// document without `md5` has none, which is not an error.
    pub fn recorded_digest(&self) -> Result<Option<&str>> {
        match self.path {
            Some(_) => self.digest().map(Some),
            None => Ok(self.digest.get().map(String::as_str)),
        }
    }

    /// Embed reference resolved by the journaling app, not locally
    pub fn markdown(&self) -> String {
        format!("![](dayone-moment://{})", self.id.simple())
    }
}
