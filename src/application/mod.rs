//! Application layer - Source adapters and use cases

pub mod dump;
pub mod facebook;
pub mod import;
pub mod repack;

pub use dump::dump;
pub use facebook::FacebookAdapter;
pub use import::{import, import_with, ImportOptions, ImportSummary};
pub use repack::{repack, RepackSummary};
