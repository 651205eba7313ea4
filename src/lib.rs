pub mod analyzers;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod output;
pub mod record;
pub mod shell;
pub mod stats;

pub use analyzers::analyzer::Analyzer;
pub use dataset::Dataset;
pub use error::LoadError;
pub use loader::{LoaderOptions, load, load_from_reader};
pub use record::{PassengerRecord, Service};
pub use stats::LoadStats;
