//! Hierarchical tree tables.
//!
//! Nested records (embedded child lists or a separate id -> children
//! mapping, optionally partitioned into labeled groups) are flattened into
//! the rows currently visible under a per-node expand/collapse state. Each
//! row carries its depth, root, sibling and "leaf chain" metadata so cell,
//! title and group renderers can draw indentation and tree decorations.
//!
//! Layers:
//! * [`domain`]: data model, expansion state, the flattener
//! * [`render`]: columns, renderer strategies, rendered output
//! * [`application`]: dataset loading and table services
//! * [`infrastructure`]: filesystem boundary and service wiring
//! * [`cli`]: the `treetable` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod render;
pub mod util;
