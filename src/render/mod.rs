//! Output encodings
//!
//! Both serializers walk the same [`TableModel`](crate::core::table::TableModel):
//! - `html`: inline-styled `<table>`
//! - `latex`: `tabularx`, optionally inside a `table` float

pub mod html;
pub mod latex;

pub use html::to_html;
pub use latex::{to_latex, LatexMode};
