//! Geocode resolver
//!
//! Forward lookups take a free-text address, reverse lookups a coordinate
//! pair. Lookups are blocking and are not retried; a provider failure is
//! returned to the caller as [`DayportError::Geocode`].

use crate::domain::Place;
use crate::error::{DayportError, Result};
use crate::infrastructure::config::GeocodeConfig;
use isahc::ReadResponseExt;
use log::debug;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use url::Url;

/// What to look up
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeQuery {
    /// Forward lookup of an address string
    Address(String),
    /// Reverse lookup of a coordinate pair
    Coordinates { latitude: f64, longitude: f64 },
}

impl GeocodeQuery {
    pub fn reverse(latitude: f64, longitude: f64) -> Self {
        GeocodeQuery::Coordinates {
            latitude,
            longitude,
        }
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, GeocodeQuery::Coordinates { .. })
    }

    fn cache_key(&self) -> String {
        match self {
            GeocodeQuery::Address(address) => format!("q:{}", address),
            GeocodeQuery::Coordinates {
                latitude,
                longitude,
            } => format!("ll:{},{}", latitude, longitude),
        }
    }
}

/// Resolves queries into places
pub trait Geocoder {
    fn lookup(&self, query: &GeocodeQuery) -> Result<Place>;
}

/// Build the resolver described by the configuration.
///
/// Without an API key, or with lookups disabled, places are built from the
/// query alone.
pub fn geocoder_from_config(config: &GeocodeConfig) -> Box<dyn Geocoder> {
    match (&config.api_key, config.enabled) {
        (Some(key), true) if !key.is_empty() => Box::new(CachedGeocoder::new(
            LocationIqGeocoder::new(&config.endpoint, key),
        )),
        _ => {
            debug!("geocoding disabled, using offline resolver");
            Box::new(OfflineGeocoder)
        }
    }
}

/// Resolver that never leaves the process
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

impl Geocoder for OfflineGeocoder {
    fn lookup(&self, query: &GeocodeQuery) -> Result<Place> {
        Ok(match query {
            GeocodeQuery::Address(address) => Place {
                name: Some(address.clone()),
                ..Place::default()
            },
            GeocodeQuery::Coordinates {
                latitude,
                longitude,
            } => Place::at(*latitude, *longitude),
        })
    }
}

/// Remembers every answer of the wrapped resolver for the life of the run
pub struct CachedGeocoder<G> {
    inner: G,
    cache: RefCell<HashMap<String, Place>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G) -> Self {
        CachedGeocoder {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn lookup(&self, query: &GeocodeQuery) -> Result<Place> {
        let key = query.cache_key();
        if let Some(place) = self.cache.borrow().get(&key) {
            debug!("geocode cache hit for {}", key);
            return Ok(place.clone());
        }

        let place = self.inner.lookup(query)?;
        self.cache.borrow_mut().insert(key, place.clone());
        Ok(place)
    }
}

/// Client for the LocationIQ API (Nominatim-compatible responses)
#[derive(Debug, Clone)]
pub struct LocationIqGeocoder {
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct LocationIqPlace {
    lat: Option<String>,
    lon: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    address: LocationIqAddress,
}

#[derive(Debug, Default, Deserialize)]
struct LocationIqAddress {
    name: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl From<LocationIqPlace> for Place {
    fn from(found: LocationIqPlace) -> Self {
        let address = found.address;
        let name = address.name.or_else(|| {
            found
                .display_name
                .as_deref()
                .and_then(|display| display.split(',').next())
                .map(|first| first.trim().to_string())
        });
        Place {
            name,
            city: address.city.or(address.town).or(address.village),
            state: address.state,
            country: address.country,
            latitude: found.lat.and_then(|lat| lat.parse().ok()),
            longitude: found.lon.and_then(|lon| lon.parse().ok()),
        }
    }
}

impl LocationIqGeocoder {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        LocationIqGeocoder {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn request_url(&self, query: &GeocodeQuery) -> Result<Url> {
        let url = match query {
            GeocodeQuery::Address(address) => Url::parse_with_params(
                &format!("{}/search", self.endpoint),
                &[
                    ("key", self.api_key.as_str()),
                    ("q", address.as_str()),
                    ("format", "json"),
                    ("limit", "1"),
                ],
            ),
            GeocodeQuery::Coordinates {
                latitude,
                longitude,
            } => Url::parse_with_params(
                &format!("{}/reverse", self.endpoint),
                &[
                    ("key", self.api_key.as_str()),
                    ("lat", latitude.to_string().as_str()),
                    ("lon", longitude.to_string().as_str()),
                    ("format", "json"),
                ],
            ),
        };
        url.map_err(|e| DayportError::Config(format!("Invalid geocode endpoint: {}", e)))
    }

    fn fetch(&self, url: &Url) -> Result<String> {
        let mut response =
            isahc::get(url.as_str()).map_err(|e| DayportError::Geocode(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DayportError::Geocode(format!(
                "provider answered HTTP {}",
                status.as_u16()
            )));
        }
        response
            .text()
            .map_err(|e| DayportError::Geocode(e.to_string()))
    }
}

fn parse_response(query: &GeocodeQuery, body: &str) -> Result<Place> {
    let invalid =
        |e: serde_json::Error| DayportError::Geocode(format!("unexpected response: {}", e));
    let found = if query.is_reverse() {
        serde_json::from_str::<LocationIqPlace>(body).map_err(invalid)?
    } else {
        serde_json::from_str::<Vec<LocationIqPlace>>(body)
            .map_err(invalid)?
            .into_iter()
            .next()
            .ok_or_else(|| DayportError::Geocode(format!("no match for {:?}", query)))?
    };
    Ok(found.into())
}

impl Geocoder for LocationIqGeocoder {
    fn lookup(&self, query: &GeocodeQuery) -> Result<Place> {
        let url = self.request_url(query)?;
        debug!("geocoding {:?}", query);
        let body = self.fetch(&url)?;
        parse_response(query, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingGeocoder {
        calls: Cell<usize>,
    }

    impl Geocoder for CountingGeocoder {
        fn lookup(&self, query: &GeocodeQuery) -> Result<Place> {
            self.calls.set(self.calls.get() + 1);
            OfflineGeocoder.lookup(query)
        }
    }

    #[test]
    fn test_query_direction() {
        assert!(GeocodeQuery::reverse(1.0, 2.0).is_reverse());
        assert!(!GeocodeQuery::Address("Main St".to_string()).is_reverse());
    }

    #[test]
    fn test_offline_reverse_keeps_coordinates() {
        let place = OfflineGeocoder
            .lookup(&GeocodeQuery::reverse(45.5, -122.6))
            .unwrap();
        assert_eq!(place, Place::at(45.5, -122.6));
    }

    #[test]
    fn test_cache_answers_repeat_queries() {
        let cached = CachedGeocoder::new(CountingGeocoder {
            calls: Cell::new(0),
        });
        let query = GeocodeQuery::reverse(10.0, 20.0);

        let first = cached.lookup(&query).unwrap();
        let second = cached.lookup(&query).unwrap();
        cached.lookup(&GeocodeQuery::reverse(10.0, 21.0)).unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner.calls.get(), 2);
    }

    #[test]
    fn test_reverse_url() {
        let geocoder = LocationIqGeocoder::new("https://example.test/v1/", "secret");
        let url = geocoder
            .request_url(&GeocodeQuery::reverse(45.5, -122.6))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/v1/reverse?key=secret&lat=45.5&lon=-122.6&format=json"
        );
    }

    #[test]
    fn test_search_url_encodes_address() {
        let geocoder = LocationIqGeocoder::new("https://example.test/v1", "k");
        let url = geocoder
            .request_url(&GeocodeQuery::Address("1 Main St, Portland".to_string()))
            .unwrap();
        assert!(url.as_str().starts_with("https://example.test/v1/search?"));
        assert!(url.as_str().contains("q=1+Main+St%2C+Portland"));
    }

    #[test]
    fn test_parse_reverse_response() {
        let body = r#"{
            "lat": "45.5152", "lon": "-122.6784",
            "display_name": "Pioneer Square, Portland, Oregon, USA",
            "address": { "city": "Portland", "state": "Oregon", "country": "USA" }
        }"#;
        let place = parse_response(&GeocodeQuery::reverse(45.5, -122.6), body).unwrap();
        assert_eq!(place.name.as_deref(), Some("Pioneer Square"));
        assert_eq!(place.city.as_deref(), Some("Portland"));
        assert_eq!(place.state.as_deref(), Some("Oregon"));
        assert_eq!(place.country.as_deref(), Some("USA"));
        assert_eq!(place.coordinates(), Some((45.5152, -122.6784)));
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"[{ "lat": "1", "lon": "2", "address": { "name": "Hut", "village": "Alm" } }]"#;
        let query = GeocodeQuery::Address("hut".to_string());
        let place = parse_response(&query, body).unwrap();
        assert_eq!(place.name.as_deref(), Some("Hut"));
        assert_eq!(place.city.as_deref(), Some("Alm"));

        assert!(matches!(
            parse_response(&query, "[]"),
            Err(DayportError::Geocode(_))
        ));
    }
}
