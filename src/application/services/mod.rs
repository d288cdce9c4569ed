//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` boundary trait but are themselves
//! concrete structs, not traits.

mod config;
mod dataset;
mod table;

pub use config::ConfigService;
pub use dataset::DatasetService;
pub use table::{OutputFormat, TableService, ViewOptions};
