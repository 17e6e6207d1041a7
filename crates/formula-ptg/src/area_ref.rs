//! 2-D area references (`A1:C10`, `$A$1:$C10`) with per-coordinate relative/absolute flags.

use core::fmt;
use core::str::FromStr;

use formula_model::{A1ParseError, A1Ref, CellRef, Range};
use serde::{Deserialize, Serialize};

/// A rectangular cell range as stored in a formula.
///
/// Each of the four coordinates carries its own relativity flag. Corners are stored exactly as
/// given: `first_row > last_row` (or `first_col > last_col`) is allowed and is never reordered by
/// parsing, formatting, or the binary codec. [`AreaRef::normalized`] gives the covered rectangle.
///
/// Text round-trips only inside the Excel grid (rows below 1,048,576, columns below 16,384).
/// The fields are public, so a literal can hold `first_col: 16_384`; it formats as `XFE1`, which
/// [`AreaRef::parse`] rejects. Areas decoded from a ptg are always inside the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRef {
    pub first_row: u32,
    pub last_row: u32,
    pub first_col: u32,
    pub last_col: u32,
    pub first_row_relative: bool,
    pub last_row_relative: bool,
    pub first_col_relative: bool,
    pub last_col_relative: bool,
}

/// Text rendering options for [`AreaRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaFormatOptions {
    /// Emit `$` before absolute coordinates. Pivot cache worksheet sources are written without
    /// markers.
    pub absolute_markers: bool,
    /// Render an area whose corners are identical (coordinates and flags) as a single cell.
    pub collapse_single_cell: bool,
}

impl Default for AreaFormatOptions {
    fn default() -> Self {
        Self {
            absolute_markers: true,
            collapse_single_cell: true,
        }
    }
}

/// Malformed area text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AreaParseError {
    #[error("empty area reference")]
    Empty,
    #[error("area reference `{text}` has {count} range separators (expected at most 1)")]
    TooManySeparators { text: String, count: usize },
    #[error("invalid cell `{text}` in area reference: {source}")]
    Cell {
        text: String,
        #[source]
        source: A1ParseError,
    },
}

impl AreaRef {
    /// Build an area from its two corners.
    pub const fn new(first: A1Ref, last: A1Ref) -> Self {
        Self {
            first_row: first.cell.row,
            last_row: last.cell.row,
            first_col: first.cell.col,
            last_col: last.cell.col,
            first_row_relative: first.row_relative,
            last_row_relative: last.row_relative,
            first_col_relative: first.col_relative,
            last_col_relative: last.col_relative,
        }
    }

    /// A degenerate area whose corners are both `cell`.
    pub const fn single(cell: A1Ref) -> Self {
        Self::new(cell, cell)
    }

    /// Parse `Cell1:Cell2` or a single `Cell`.
    pub fn parse(text: &str) -> Result<Self, AreaParseError> {
        let s = text.trim();
        if s.is_empty() {
            return Err(AreaParseError::Empty);
        }

        let count = s.matches(':').count();
        if count > 1 {
            return Err(AreaParseError::TooManySeparators {
                text: s.to_string(),
                count,
            });
        }

        match s.split_once(':') {
            None => Ok(Self::single(parse_corner(s)?)),
            Some((first, last)) => Ok(Self::new(parse_corner(first)?, parse_corner(last)?)),
        }
    }

    pub const fn first_cell(&self) -> A1Ref {
        A1Ref::new(
            CellRef::new(self.first_row, self.first_col),
            self.first_row_relative,
            self.first_col_relative,
        )
    }

    pub const fn last_cell(&self) -> A1Ref {
        A1Ref::new(
            CellRef::new(self.last_row, self.last_col),
            self.last_row_relative,
            self.last_col_relative,
        )
    }

    /// True when both corners agree on every coordinate and every flag.
    ///
    /// `A1:$A$1` is not single-cell: its corners differ in relativity, so it keeps both halves
    /// when formatted.
    pub fn is_single_cell(&self) -> bool {
        self.first_cell() == self.last_cell()
    }

    /// `last_row - first_row`; negative when rows are stored reversed.
    pub const fn span_rows(&self) -> i64 {
        self.last_row as i64 - self.first_row as i64
    }

    /// `last_col - first_col`; negative when columns are stored reversed.
    pub const fn span_cols(&self) -> i64 {
        self.last_col as i64 - self.first_col as i64
    }

    /// The covered rectangle with corners in ascending order (flags dropped).
    pub const fn normalized(&self) -> Range {
        Range::new(
            CellRef::new(self.first_row, self.first_col),
            CellRef::new(self.last_row, self.last_col),
        )
    }

    pub fn to_a1_with(&self, opts: &AreaFormatOptions) -> String {
        let first = self.first_cell().to_a1_with_markers(opts.absolute_markers);
        if opts.collapse_single_cell && self.is_single_cell() {
            return first;
        }
        let last = self.last_cell().to_a1_with_markers(opts.absolute_markers);
        format!("{first}:{last}")
    }
}

fn parse_corner(text: &str) -> Result<A1Ref, AreaParseError> {
    A1Ref::parse(text).map_err(|source| AreaParseError::Cell {
        text: text.trim().to_string(),
        source,
    })
}

impl fmt::Display for AreaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_with(&AreaFormatOptions::default()))
    }
}

impl FromStr for AreaRef {
    type Err = AreaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AreaRef::parse(s)
    }
}

impl From<Range> for AreaRef {
    /// A fully relative area covering `range`.
    fn from(range: Range) -> Self {
        AreaRef::new(A1Ref::relative(range.start), A1Ref::relative(range.end))
    }
}
