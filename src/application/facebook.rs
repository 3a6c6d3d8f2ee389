//! Facebook posts adapter
//!
//! Maps the posts export (`posts/your_posts*.json`) onto entries. The export
//! is loosely structured: any key may be missing at any level, and a missing
//! key simply leaves the corresponding entry field alone.

use crate::domain::{timestamp, Entry, Photo};
use crate::error::{DayportError, Result};
use crate::infrastructure::{GeocodeQuery, Geocoder};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Keys under which wrapped posts files keep their posts
const POSTS_WRAPPER_KEYS: [&str; 2] = ["status_updates_v2", "posts"];

/// Tags appended to every adapted entry, in this order
pub const PROVENANCE_TAGS: [&str; 2] = ["Facebook", "Facebook-Post"];

/// Treat an explicit `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<DataBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub tags: Option<Vec<PostTag>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Attachment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<DataBlock>,
}

/// Tags appear either as plain strings or as `{"name": ...}` objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostTag {
    Name(String),
    Object { name: Option<String> },
}

impl PostTag {
    fn into_name(self) -> Option<String> {
        match self {
            PostTag::Name(name) => Some(name),
            PostTag::Object { name } => name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DataBlock {
    pub post: Option<String>,
    pub media: Option<Media>,
    pub place: Option<PlaceBlock>,
    pub external_context: Option<ExternalContext>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Media {
    pub uri: Option<String>,
    pub creation_timestamp: Option<i64>,
    pub description: Option<String>,
    pub media_metadata: Option<MediaMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaMetadata {
    pub photo_metadata: Option<PhotoMetadata>,
    pub video_metadata: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PhotoMetadata {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub taken_timestamp: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exif_data: Vec<ExifData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExifData {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub taken_timestamp: Option<i64>,
}

impl PhotoMetadata {
    fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude).or_else(|| {
            self.exif_data
                .iter()
                .find_map(|exif| exif.latitude.zip(exif.longitude))
        })
    }

    fn taken_timestamp(&self) -> Option<i64> {
        self.taken_timestamp
            .or_else(|| self.exif_data.iter().find_map(|exif| exif.taken_timestamp))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceBlock {
    pub name: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub address: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Coordinate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExternalContext {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Parse a posts file: either a bare array of posts, or an object wrapping
/// them. The wrapper's array is taken from a known key when present,
/// otherwise from its only array-valued field.
pub fn parse_posts(json: &str) -> Result<Vec<Post>> {
    let value: Value = serde_json::from_str(json)?;
    let posts = match value {
        Value::Array(_) => value,
        Value::Object(mut fields) => {
            let known = POSTS_WRAPPER_KEYS
                .iter()
                .find(|key| fields.get(**key).is_some_and(Value::is_array))
                .and_then(|key| fields.remove(*key));
            match known {
                Some(posts) => posts,
                None => {
                    let mut arrays = fields.into_iter().map(|(_, v)| v).filter(Value::is_array);
                    match (arrays.next(), arrays.next()) {
                        (Some(posts), None) => posts,
                        (None, _) => {
                            return Err(DayportError::MalformedInput(
                                "Posts object holds no array of posts".to_string(),
                            ))
                        }
                        (Some(_), Some(_)) => {
                            return Err(DayportError::MalformedInput(
                                "Posts object holds several arrays; cannot tell which are posts"
                                    .to_string(),
                            ))
                        }
                    }
                }
            }
        }
        _ => {
            return Err(DayportError::MalformedInput(
                "Posts file must hold an array of posts".to_string(),
            ))
        }
    };
    Ok(serde_json::from_value(posts)?)
}

/// Find every posts file below an export directory, in name order
pub fn discover_post_files(export_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(export_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with("your_posts") && name.ends_with(".json"))
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Turns posts into entries, resolving places through a [`Geocoder`]
pub struct FacebookAdapter<'a> {
    media_root: PathBuf,
    geocoder: &'a dyn Geocoder,
}

impl<'a> FacebookAdapter<'a> {
    /// `media_root` is the export directory media `uri`s are relative to
    pub fn new(media_root: impl Into<PathBuf>, geocoder: &'a dyn Geocoder) -> Self {
        FacebookAdapter {
            media_root: media_root.into(),
            geocoder,
        }
    }

    /// Load and adapt every post in a posts file
    pub fn load_posts(&self, path: &Path) -> Result<Vec<Entry>> {
        let json = fs::read_to_string(path)?;
        let posts = parse_posts(&json)?;
        let entries = self.adapt(posts)?;
        info!("adapted {} post(s) from {}", entries.len(), path.display());
        Ok(entries)
    }

    pub fn adapt(&self, posts: Vec<Post>) -> Result<Vec<Entry>> {
        posts.into_iter().map(|post| self.post_as_entry(post)).collect()
    }

    pub fn post_as_entry(&self, post: Post) -> Result<Entry> {
        let mut entry = Entry::new();

        if let Some(tags) = post.tags {
            entry.tags = tags.into_iter().filter_map(PostTag::into_name).collect();
        }
        entry.title = post.title;

        let blocks = post
            .data
            .iter()
            .chain(post.attachments.iter().flat_map(|a| a.data.iter()));
        for block in blocks {
            self.apply_block(block, &mut entry)?;
        }

        if let Some(seconds) = post.timestamp {
            match timestamp::from_epoch_seconds(seconds) {
                Some(instant) => entry.timestamp = instant,
                None => debug!("ignoring out-of-range timestamp {}", seconds),
            }
        }

        entry
            .tags
            .extend(PROVENANCE_TAGS.iter().map(|tag| tag.to_string()));

        Ok(entry)
    }

    fn apply_block(&self, block: &DataBlock, entry: &mut Entry) -> Result<()> {
        if let Some(text) = &block.post {
            entry.append(text);
        }
        if let Some(media) = &block.media {
            self.apply_media(media, entry)?;
        }
        if let Some(place) = &block.place {
            self.apply_place(place, entry)?;
        }
        if let Some(context) = &block.external_context {
            apply_external_context(context, entry);
        }
        Ok(())
    }

    fn apply_media(&self, media: &Media, entry: &mut Entry) -> Result<()> {
        let Some(metadata) = &media.media_metadata else {
            return Ok(());
        };
        // Facebook repeats the post text as the media description.
        let body_was_empty = entry.body().is_none();

        if let Some(photo_metadata) = &metadata.photo_metadata {
            if let Some(uri) = &media.uri {
                let taken = photo_metadata
                    .taken_timestamp()
                    .or(media.creation_timestamp)
                    .and_then(timestamp::from_epoch_seconds);
                let photo = self.photo_for(uri, taken);
                entry.append(&photo.markdown());
                entry.photos.push(photo);
            }

            if entry.place.is_none() {
                if let Some((latitude, longitude)) = photo_metadata.coordinates() {
                    let place = self
                        .geocoder
                        .lookup(&GeocodeQuery::reverse(latitude, longitude))?;
                    entry.place = Some(place);
                }
            }
        }

        if metadata.video_metadata.is_some() {
            if let Some(uri) = &media.uri {
                entry.append(&format!("[Video: {}]", uri));
            }
        }

        if body_was_empty {
            if let Some(description) = &media.description {
                entry.append(&format!("> {}", description));
            }
        }

        Ok(())
    }

    fn photo_for(&self, uri: &str, taken: Option<DateTime<Utc>>) -> Photo {
        debug!("attaching photo {}", uri);
        Photo::new(self.media_root.join(uri)).with_timestamp(taken)
    }

    fn apply_place(&self, block: &PlaceBlock, entry: &mut Entry) -> Result<()> {
        let coordinates = block
            .coordinate
            .as_ref()
            .and_then(|c| c.latitude.zip(c.longitude));

        let mut place = match coordinates {
            Some((latitude, longitude)) => self
                .geocoder
                .lookup(&GeocodeQuery::reverse(latitude, longitude))?,
            None => Default::default(),
        };
        if let Some(name) = &block.name {
            place.name = Some(name.clone());
        }

        let markdown = place.markdown();
        if !markdown.is_empty() {
            entry.append(&markdown);
        }
        if coordinates.is_some() || block.name.is_some() {
            entry.place = Some(place);
        }

        if let Some(url) = &block.url {
            entry.append(&format!("<{}>", url));
        }
        if let Some(address) = &block.address {
            entry.append(address);
        }

        Ok(())
    }
}

fn apply_external_context(context: &ExternalContext, entry: &mut Entry) {
    match (&context.name, &context.url) {
        (Some(name), Some(url)) => entry.append(&format!("[{}]({})", name, url)),
        (None, Some(url)) => entry.append(&format!("<{}>", url)),
        _ => {}
    }
}
