//! Presentation layer: columns, collaborator renderers and rendered output
//!
//! Maps the flattener's row descriptors to rendered rows, one descriptor at a time.

pub mod collaborators;
pub mod column;
pub mod outline;
pub mod output;
pub mod requests;
pub mod table;
pub mod text;

pub use collaborators::{
    GroupTitleContext, GroupTitleRenderer, MarkerContext, MarkerRenderer, PlainGroupTitle,
    PlainTitle, TitleContext, TitleRenderer,
};
pub use column::{CellContext, CellRenderer, Column, FieldCell, TreeCell};
pub use outline::to_outline;
pub use output::{RenderedCell, RenderedHeader, RenderedRow, RenderedTable};
pub use requests::{ExpandHandle, ExpandRequest, UpdateQueue};
pub use table::{RenderPass, TreeTable};
pub use text::{format_attributes, format_table, TextOptions};
