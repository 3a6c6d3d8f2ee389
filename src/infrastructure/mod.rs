//! Infrastructure layer - Serialization, containers and external services

pub mod archive;
pub mod config;
pub mod geocode;
pub mod logging;
pub mod schema;

pub use archive::Archive;
pub use config::Config;
pub use geocode::{geocoder_from_config, GeocodeQuery, Geocoder, OfflineGeocoder};
pub use schema::JournalDocument;
