//! Pure helpers shared by the importer, exporter and aggregator

pub mod dates;
pub mod text;
