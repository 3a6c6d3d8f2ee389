//! dayport - Social-media exports to Day One journals
//!
//! Adapts loosely-structured export dumps into a normalized journal model and
//! packages journals, with their photos, into a portable archive container.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DayportError;
