//! Team import/export.
//!
//! Serializes a team with its resource directory and sprints for backup and
//! transfer, and brings such documents back in under fresh identifiers.

pub mod exporter;
pub mod importer;
pub mod models;

pub use exporter::TeamExporter;
pub use importer::TeamImporter;
pub use models::{AllTeamsExport, TeamExport};
