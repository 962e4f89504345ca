mod catalog;
/// YAML plan snapshot files and the persistence sink.
pub mod plan_file;

pub use catalog::load_catalog;
pub use plan_file::{LoadError, PlanFile, PlanSink, SaveError, SinkError};
