#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use dayport::domain::Place;
use dayport::error::Result;
use dayport::infrastructure::{GeocodeQuery, Geocoder};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

pub fn dayport_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dayport").unwrap();
    cmd.env_remove("DAYPORT_GEOCODE_KEY");
    cmd.env_remove("DAYPORT_LOG");
    cmd
}

/// Geocoder answering every reverse query with a fixed town
#[derive(Default)]
pub struct StubGeocoder {
    pub queries: RefCell<Vec<GeocodeQuery>>,
}

impl Geocoder for StubGeocoder {
    fn lookup(&self, query: &GeocodeQuery) -> Result<Place> {
        self.queries.borrow_mut().push(query.clone());
        let (latitude, longitude) = match query {
            GeocodeQuery::Coordinates {
                latitude,
                longitude,
            } => (Some(*latitude), Some(*longitude)),
            GeocodeQuery::Address(_) => (None, None),
        };
        Ok(Place {
            name: Some("Stub Place".to_string()),
            city: Some("Springfield".to_string()),
            state: None,
            country: Some("USA".to_string()),
            latitude,
            longitude,
        })
    }
}

/// Names of every member in a zip container
pub fn member_names(path: &Path) -> BTreeSet<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

pub fn photo_members(path: &Path) -> Vec<String> {
    member_names(path)
        .into_iter()
        .filter(|name| name.starts_with("photos/"))
        .collect()
}
