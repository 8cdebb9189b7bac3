//! Abstract regression table
//!
//! The table is built once per render as a flat list of rows and rules,
//! independent of the output markup.
//!
//! # Architecture
//!
//! ```text
//! NormalizedData + RenderConfig -> TableBuilder -> TableModel -> HTML / LaTeX
//! ```
//!
//! # Example
//!
//! ```ignore
//! let model = TableBuilder::new(&data, &config).build();
//! for row in model.rows_of(RowKind::Estimate) {
//!     println!("{}", row.cells[0].plain_text());
//! }
//! ```

mod builder;
mod cell;
mod rule;

#[cfg(test)]
mod tests;

// Re-export public API
pub use builder::{RowKind, TableBuilder, TableItem, TableModel, TableRow};
pub use cell::{CellAlign, Span, TableCell};
pub use rule::{RuleStyle, TableRule};
