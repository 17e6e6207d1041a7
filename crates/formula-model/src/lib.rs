//! `formula-model` defines the worksheet addressing vocabulary shared by the formula crates.
//!
//! The crate is intentionally small so it can be reused by:
//! - the formula token codecs (`formula-ptg`)
//! - `.xlsx` feature builders (pivot tables/caches)
//! - IPC boundaries via `serde` (JSON-safe schema)

mod address;
pub mod pivots;

pub use address::{push_column_label, A1ParseError, A1Ref, CellRef, Range, RangeParseError};
pub use pivots::{data_field_caption, DataConsolidateFunction, NoSuchFunctionError};

/// Excel-compatible maximum rows per worksheet (1,048,576).
pub const EXCEL_MAX_ROWS: u32 = 1_048_576;

/// Excel-compatible maximum columns per worksheet (16,384).
pub const EXCEL_MAX_COLS: u32 = 16_384;
