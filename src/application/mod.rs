//! Application layer: dataset loading and table services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod dataset;
pub mod error;
pub mod error_ext;
pub mod services;

pub use dataset::{ColumnKind, ColumnSpec, Dataset, DatasetFormat};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::PathContextExt;
