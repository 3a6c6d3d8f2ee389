//! Domain layer - Journal entity model

pub mod entry;
pub mod journal;
pub mod photo;
pub mod place;
pub mod timestamp;
pub mod weather;

pub use entry::Entry;
pub use journal::Journal;
pub use photo::{digest_bytes, Photo};
pub use place::Place;
pub use weather::Weather;
