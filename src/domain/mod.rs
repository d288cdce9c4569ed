//! Domain layer: tree data model, expansion state and the flattener
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod expansion;
pub mod flatten;
pub mod rows;

pub use entities::{ChildMapping, DataSource, Group, Node};
pub use error::DomainError;
pub use expansion::{ExpansionState, ExpansionStore};
pub use flatten::{ChildSource, Embedded, Flattener, VisibleRows, DEFAULT_MAX_DEPTH};
pub use rows::{GroupHeaderRow, Row, RowAttributes, TitleRow, VisibleRow};
