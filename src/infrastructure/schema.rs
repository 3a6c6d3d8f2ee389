//! Day One interchange schema
//!
//! Typed documents for the JSON the journaling app imports, and the mapping
//! between them and the entity model. Every key is optional on read; unknown
//! keys are ignored. On write, the required keys of an entry (`uuid`,
//! `creationDate`, `tags`, `text`) are always present and `photos` is omitted
//! rather than written as an empty list.

use crate::domain::timestamp::{format_timestamp, parse_timestamp};
use crate::domain::{Entry, Journal, Photo, Place, Weather};
use crate::error::{DayportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Version string written into every journal document
pub const SCHEMA_VERSION: &str = "1.0";

/// Fixed region radius, in meters
pub const REGION_RADIUS: u32 = 75;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalDocument {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub entries: Vec<EntryDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            version: SCHEMA_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<PhotoDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<CenterDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CenterDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        DayportError::MalformedInput(format!("Invalid identifier '{}': {}", value, e))
    })
}

fn hex(id: &Uuid) -> String {
    id.simple().to_string()
}

impl Place {
    pub fn serialize(&self) -> LocationDocument {
        LocationDocument {
            place_name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            locality_name: self.city.clone(),
            administrative_area: self.state.clone(),
            country: self.country.clone(),
            region: Some(RegionDocument {
                identifier: self.name.clone(),
                radius: Some(REGION_RADIUS.into()),
                center: Some(CenterDocument {
                    latitude: self.latitude,
                    longitude: self.longitude,
                }),
            }),
        }
    }

    pub fn deserialize(doc: LocationDocument) -> Place {
        let center = doc.region.as_ref().and_then(|region| region.center.as_ref());
        Place {
            name: doc
                .place_name
                .or_else(|| doc.region.as_ref().and_then(|r| r.identifier.clone())),
            city: doc.locality_name,
            state: doc.administrative_area,
            country: doc.country,
            latitude: doc.latitude.or_else(|| center.and_then(|c| c.latitude)),
            longitude: doc.longitude.or_else(|| center.and_then(|c| c.longitude)),
        }
    }
}

impl Weather {
    pub fn serialize(&self) -> WeatherDocument {
        WeatherDocument {
            conditions_description: self.conditions.clone(),
            temperature_celsius: self.temperature,
        }
    }

    pub fn deserialize(doc: WeatherDocument) -> Weather {
        Weather {
            conditions: doc.conditions_description,
            temperature: doc.temperature_celsius,
        }
    }
}

impl Photo {
    /// Fails when the digest cannot be computed from the byte source
    pub fn serialize(&self) -> Result<PhotoDocument> {
        Ok(PhotoDocument {
            identifier: Some(hex(&self.id)),
            md5: self.recorded_digest()?.map(str::to_string),
            date: self.timestamp.as_ref().map(format_timestamp),
        })
    }

    pub fn deserialize(doc: PhotoDocument) -> Result<Photo> {
        let id = match doc.identifier.as_deref() {
            Some(identifier) => parse_uuid(identifier)?,
            None => Uuid::new_v4(),
        };
        let timestamp = doc.date.as_deref().map(parse_timestamp).transpose()?;
        Ok(Photo::from_digest(id, doc.md5, timestamp))
    }
}

impl Entry {
    pub fn serialize(&self) -> Result<EntryDocument> {
        let photos = self
            .photos
            .iter()
            .map(Photo::serialize)
            .collect::<Result<Vec<_>>>()?;

        Ok(EntryDocument {
            uuid: Some(hex(&self.id)),
            creation_date: Some(format_timestamp(&self.timestamp)),
            tags: self.tags.clone(),
            text: Some(self.markdown()),
            location: self.place.as_ref().map(Place::serialize),
            time_zone_name: self.timezone.clone(),
            weather: self.weather.as_ref().map(Weather::serialize),
            photos,
        })
    }

    pub fn deserialize(doc: EntryDocument) -> Result<Entry> {
        let mut entry = Entry::new();

        if let Some(uuid) = doc.uuid.as_deref() {
            entry.id = parse_uuid(uuid)?;
        }
        if let Some(date) = doc.creation_date.as_deref() {
            entry.timestamp = parse_timestamp(date)?;
        }
        if let Some(text) = doc.text.as_deref() {
            entry.set_text(text);
        }

        entry.tags = doc.tags;
        entry.place = doc.location.map(Place::deserialize);
        entry.timezone = doc.time_zone_name;
        entry.weather = doc.weather.map(Weather::deserialize);
        entry.photos = doc
            .photos
            .into_iter()
            .map(Photo::deserialize)
            .collect::<Result<Vec<_>>>()?;

        Ok(entry)
    }
}

impl Journal {
    pub fn serialize(&self) -> Result<JournalDocument> {
        Ok(JournalDocument {
            metadata: Metadata::default(),
            entries: self
                .entries
                .iter()
                .map(Entry::serialize)
                .collect::<Result<Vec<_>>>()?,
            name: self.name.clone(),
        })
    }

    /// Rejects documents that reuse an entry identifier
    pub fn deserialize(doc: JournalDocument) -> Result<Journal> {
        let mut journal = Journal {
            name: doc.name,
            entries: Vec::with_capacity(doc.entries.len()),
        };
        let mut seen = HashSet::new();

        for entry in doc.entries {
            let entry = Entry::deserialize(entry)?;
            if !seen.insert(entry.id) {
                return Err(DayportError::MalformedInput(format!(
                    "Duplicate entry identifier {}",
                    hex(&entry.id)
                )));
            }
            journal.add(entry);
        }

        Ok(journal)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.serialize()?)?)
    }

    pub fn from_json(json: &str) -> Result<Journal> {
        let doc: JournalDocument = serde_json::from_str(json)?;
        Journal::deserialize(doc)
    }
}
