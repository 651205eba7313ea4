//! Aggregation engine over the loaded dataset.
//!
//! [`analyzer::Analyzer`] is the query interface: grouped counts, numeric
//! summaries, satisfaction rates, service rankings, filters and lookups.
//! Everything is computed on demand in a single pass over the records.

pub mod aggregate;
pub mod analyzer;
pub mod buckets;
pub mod report;
pub mod types;
pub mod utility;
