//! Import use case: build a journal from source adapters and export it

use crate::application::facebook::{discover_post_files, FacebookAdapter};
use crate::domain::Journal;
use crate::error::{DayportError, Result};
use crate::infrastructure::{geocoder_from_config, Archive, Config, Geocoder};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Name used when neither the command line nor the config names the journal
pub const DEFAULT_IMPORT_NAME: &str = "Facebook";

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Export directories to search for `your_posts*.json`
    pub facebook_exports: Vec<PathBuf>,
    /// Individual posts files
    pub post_files: Vec<PathBuf>,
    /// Directory media in `post_files` is relative to (default: the file's directory)
    pub media_root: Option<PathBuf>,
    pub name: Option<String>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub entries: usize,
    pub photos: usize,
    pub output: PathBuf,
}

/// Run an import using the resolver described by `config`
pub fn import(config: &Config, options: ImportOptions) -> Result<ImportSummary> {
    let geocoder = geocoder_from_config(&config.geocode);
    let name = options
        .name
        .clone()
        .or_else(|| config.journal.name.clone())
        .unwrap_or_else(|| DEFAULT_IMPORT_NAME.to_string());
    import_with(geocoder.as_ref(), &name, &options)
}

/// Run an import with an explicit resolver
pub fn import_with(
    geocoder: &dyn Geocoder,
    name: &str,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let mut journal = Journal::named(name);

    for export_dir in &options.facebook_exports {
        if !export_dir.is_dir() {
            return Err(DayportError::MalformedInput(format!(
                "Not an export directory: {}",
                export_dir.display()
            )));
        }
        let files = discover_post_files(export_dir);
        if files.is_empty() {
            warn!("no posts files found under {}", export_dir.display());
        }
        let adapter = FacebookAdapter::new(export_dir, geocoder);
        for file in files {
            journal.extend(adapter.load_posts(&file)?);
        }
    }

    for file in &options.post_files {
        let media_root = options
            .media_root
            .clone()
            .unwrap_or_else(|| default_media_root(file));
        let adapter = FacebookAdapter::new(media_root, geocoder);
        journal.extend(adapter.load_posts(file)?);
    }

    let summary = ImportSummary {
        entries: journal.entries.len(),
        photos: journal.photo_count(),
        output: options.output.clone(),
    };

    Archive::from(journal).export(&options.output)?;
    info!(
        "exported {} entries to {}",
        summary.entries,
        summary.output.display()
    );
    Ok(summary)
}

fn default_media_root(posts_file: &Path) -> PathBuf {
    posts_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::OfflineGeocoder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_import_without_sources_writes_empty_journal() {
        let temp = TempDir::new().unwrap();
        let options = ImportOptions {
            output: temp.path().join("out.zip"),
            ..ImportOptions::default()
        };

        let summary = import_with(&OfflineGeocoder, "Empty", &options).unwrap();
        assert_eq!(summary.entries, 0);

        let archive = Archive::load(&options.output).unwrap();
        assert_eq!(archive.journals.len(), 1);
        assert_eq!(archive.journals[0].name.as_deref(), Some("Empty"));
    }

    #[test]
    fn test_name_falls_back_to_config_then_default() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.geocode.enabled = false;
        config.journal.name = Some("From Config".to_string());

        let options = ImportOptions {
            output: temp.path().join("a.zip"),
            ..ImportOptions::default()
        };
        import(&config, options.clone()).unwrap();
        let archive = Archive::load(&options.output).unwrap();
        assert_eq!(archive.journals[0].name.as_deref(), Some("From Config"));

        config.journal.name = None;
        import(&config, options.clone()).unwrap();
        let archive = Archive::load(&options.output).unwrap();
        assert_eq!(archive.journals[0].name.as_deref(), Some(DEFAULT_IMPORT_NAME));
    }

    #[test]
    fn test_missing_export_dir_is_error() {
        let temp = TempDir::new().unwrap();
        let options = ImportOptions {
            facebook_exports: vec![temp.path().join("nope")],
            output: temp.path().join("out.zip"),
            ..ImportOptions::default()
        };
        assert!(import_with(&OfflineGeocoder, "X", &options).is_err());
        assert!(!options.output.exists());
    }

    #[test]
    fn test_export_dir_discovery() {
        let temp = TempDir::new().unwrap();
        let posts_dir = temp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(posts_dir.join("your_posts_1.json"), r#"[{"data":[{"post":"a"}]}]"#).unwrap();
        fs::write(posts_dir.join("your_posts_2.json"), r#"[{"data":[{"post":"b"}]}]"#).unwrap();
        fs::write(posts_dir.join("other.json"), "not json").unwrap();

        let options = ImportOptions {
            facebook_exports: vec![temp.path().to_path_buf()],
            output: temp.path().join("out.zip"),
            ..ImportOptions::default()
        };
        let summary = import_with(&OfflineGeocoder, "FB", &options).unwrap();
        assert_eq!(summary.entries, 2);

        let archive = Archive::load(&options.output).unwrap();
        let bodies: Vec<_> = archive.journals[0]
            .entries
            .iter()
            .map(|e| e.body().unwrap_or_default().to_string())
            .collect();
        assert_eq!(bodies, vec!["a", "b"]);
    }
}
