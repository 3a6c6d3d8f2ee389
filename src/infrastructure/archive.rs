//! Archive container
//!
//! A zip file holding one `<name>.json` document per journal plus a shared
//! pool of photo blobs stored under `photos/<md5>.jpeg`. Blob names derive
//! from content, so identical photos collapse to a single member.

use crate::domain::{Journal, Photo};
use crate::error::Result;
use log::{debug, info, warn};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Base name used for journals without a usable name
pub const DEFAULT_JOURNAL_NAME: &str = "Journal";

pub const JOURNAL_SUFFIX: &str = ".json";

pub const PHOTO_PREFIX: &str = "photos/";

// Content type detection is not done yet; every blob is written as jpeg.
pub const PHOTO_EXTENSION: &str = "jpeg";

fn unsafe_chars() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9 _-]").unwrap())
}

/// Strip every character outside `[A-Za-z0-9 _-]`
pub fn sanitize_name(name: &str) -> String {
    unsafe_chars().replace_all(name, "").into_owned()
}

/// Member name of a journal document
pub fn journal_file_name(name: Option<&str>) -> String {
    let safe = name.map(sanitize_name).unwrap_or_default();
    let base = if safe.is_empty() {
        DEFAULT_JOURNAL_NAME
    } else {
        safe.as_str()
    };
    format!("{}{}", base, JOURNAL_SUFFIX)
}

/// Member name of a photo blob with the given digest
pub fn photo_member_name(digest: &str) -> String {
    format!("{}{}.{}", PHOTO_PREFIX, digest, PHOTO_EXTENSION)
}

/// Pick a member name not already taken, suffixing `-2`, `-3`, ...
fn unique_member_name(name: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&name) {
        return name;
    }
    let stem = name.strip_suffix(JOURNAL_SUFFIX).unwrap_or(&name);
    (2..)
        .map(|n| format!("{}-{}{}", stem, n, JOURNAL_SUFFIX))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(name)
}

/// A set of journals plus any photo blobs read from an existing container.
///
/// Blobs loaded from a container stay in an archive-level pool; they are not
/// re-attached to the photos of loaded entries, which only know their digest.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    pub journals: Vec<Journal>,
    blobs: BTreeMap<String, Vec<u8>>,
}

impl Archive {
    pub fn new() -> Self {
        Archive::default()
    }

    pub fn add(&mut self, journal: Journal) {
        self.journals.push(journal);
    }

    /// Photo blobs carried over from a loaded container, keyed by member name
    pub fn blobs(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.blobs
    }

    fn photos(&self) -> impl Iterator<Item = &Photo> {
        self.journals
            .iter()
            .flat_map(|journal| journal.entries.iter())
            .flat_map(|entry| entry.photos.iter())
    }

    /// Write the archive as a new container at `path`.
    ///
    /// The container is assembled in a temporary file next to `path` and
    /// renamed into place only once complete; on failure nothing is left at
    /// `path`.
    pub fn export(&self, path: &Path) -> Result<()> {
        let tmp_path = temp_path_for(path);

        let result = self
            .write_container(&tmp_path)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(Into::into));

        if result.is_err() && tmp_path.exists() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    /// Write a loaded archive back out
    pub fn save(&self, path: &Path) -> Result<()> {
        self.export(path)
    }

    fn write_container(&self, path: &Path) -> Result<()> {
        let mut zip = ZipWriter::new(File::create(path)?);
        let documents =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let blobs = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let mut written: HashSet<String> = HashSet::new();

        for journal in &self.journals {
            let name = unique_member_name(journal_file_name(journal.name.as_deref()), &written);
            let json = journal.to_json()?;

            zip.start_file(name.as_str(), documents)?;
            zip.write_all(json.as_bytes())?;
            debug!("wrote {} ({} entries)", name, journal.entries.len());
            written.insert(name);
        }

        let mut photo_count = 0;
        for photo in self.photos() {
            let Some(digest) = photo.recorded_digest()? else {
                warn!("photo {} has no recorded digest, leaving it out", photo.id.simple());
                continue;
            };
            let member = photo_member_name(digest);
            if written.contains(&member) {
                debug!("{} already in container, skipping", member);
                continue;
            }
            if photo.path().is_none() {
                if !self.blobs.contains_key(&member) {
                    warn!("no bytes available for {}, leaving it out", member);
                }
                continue;
            }

            let bytes = photo.read_bytes()?;
            zip.start_file(member.as_str(), blobs)?;
            zip.write_all(&bytes)?;
            written.insert(member);
            photo_count += 1;
        }

        for (member, bytes) in &self.blobs {
            if written.insert(member.clone()) {
                zip.start_file(member.as_str(), blobs)?;
                zip.write_all(bytes)?;
                photo_count += 1;
            }
        }

        zip.finish()?;
        info!(
            "wrote {} journal(s) and {} photo(s) to {}",
            self.journals.len(),
            photo_count,
            path.display()
        );
        Ok(())
    }

    /// Read every journal document in the container at `path`.
    ///
    /// Any unreadable member or corrupt document fails the whole load.
    pub fn load(path: &Path) -> Result<Archive> {
        let file = File::open(path)?;
        let mut zip = ZipArchive::new(BufReader::new(file))?;
        let mut archive = Archive::new();

        for index in 0..zip.len() {
            let mut member = zip.by_index(index)?;
            if member.is_dir() {
                continue;
            }
            let name = member.name().to_string();

            if name.ends_with(JOURNAL_SUFFIX) {
                let mut json = String::new();
                member.read_to_string(&mut json)?;
                let journal = Journal::from_json(&json)?;
                debug!("read {} ({} entries)", name, journal.entries.len());
                archive.add(journal);
            } else if name.starts_with(PHOTO_PREFIX) {
                let mut bytes = Vec::new();
                member.read_to_end(&mut bytes)?;
                archive.blobs.insert(name, bytes);
            } else {
                debug!("ignoring unknown member {}", name);
            }
        }

        info!(
            "loaded {} journal(s) and {} photo(s) from {}",
            archive.journals.len(),
            archive.blobs.len(),
            path.display()
        );
        Ok(archive)
    }

    /// Pretty-print every journal document
    pub fn dump<W: Write>(&self, mut writer: W) -> Result<()> {
        for journal in &self.journals {
            serde_json::to_writer_pretty(&mut writer, &journal.serialize()?)?;
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl From<Journal> for Archive {
    fn from(journal: Journal) -> Self {
        Archive {
            journals: vec![journal],
            blobs: BTreeMap::new(),
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let tmp_name = format!(
        ".{}.dayport-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("archive.zip"),
        std::process::id()
    );
    path.with_file_name(tmp_name)
}
