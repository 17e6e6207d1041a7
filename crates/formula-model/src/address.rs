use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{EXCEL_MAX_COLS, EXCEL_MAX_ROWS};

/// A reference to a single cell within a worksheet.
///
/// Rows and columns are **0-indexed**:
/// - `row = 0` is Excel row `1`
/// - `col = 0` is Excel column `A`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub col: u32,
}

impl CellRef {
    /// Construct a new [`CellRef`].
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert to Excel A1 notation (e.g. `A1`, `BC32`).
    pub fn to_a1(self) -> String {
        format!("{}{}", col_to_name(self.col), self.row as u64 + 1)
    }

    /// Parse an Excel A1-style reference (e.g. `A1`, `$B$2`).
    ///
    /// `$` markers are accepted and discarded; use [`A1Ref::parse`] to keep them.
    pub fn from_a1(a1: &str) -> Result<Self, A1ParseError> {
        A1Ref::parse(a1).map(|r| r.cell)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A cell reference as written in formula text, including its `$` markers.
///
/// `row_relative` / `col_relative` are independent: `$A1` is an absolute column with a relative
/// row. A relative coordinate renders bare; an absolute one is prefixed with `$`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A1Ref {
    pub cell: CellRef,
    pub row_relative: bool,
    pub col_relative: bool,
}

impl A1Ref {
    #[inline]
    pub const fn new(cell: CellRef, row_relative: bool, col_relative: bool) -> Self {
        Self {
            cell,
            row_relative,
            col_relative,
        }
    }

    /// A fully relative reference (`A1`).
    #[inline]
    pub const fn relative(cell: CellRef) -> Self {
        Self::new(cell, true, true)
    }

    /// A fully absolute reference (`$A$1`).
    #[inline]
    pub const fn absolute(cell: CellRef) -> Self {
        Self::new(cell, false, false)
    }

    /// Parse `[$]Col[$]Row`, keeping track of which coordinates carry a `$` marker.
    pub fn parse(a1: &str) -> Result<Self, A1ParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(A1ParseError::Empty);
        }

        let mut idx = 0usize;
        let bytes = s.as_bytes();
        let col_absolute = bytes.get(idx) == Some(&b'$');
        if col_absolute {
            idx += 1;
        }

        let col_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_alphabetic() {
            idx += 1;
        }

        if idx == col_start {
            return Err(A1ParseError::MissingColumn);
        }

        let col_str = &s[col_start..idx];
        let row_absolute = bytes.get(idx) == Some(&b'$');
        if row_absolute {
            idx += 1;
        }

        let row_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }

        if idx == row_start {
            return Err(A1ParseError::MissingRow);
        }
        if idx != bytes.len() {
            return Err(A1ParseError::TrailingCharacters);
        }

        let col = name_to_col(col_str)?;
        if col >= EXCEL_MAX_COLS {
            return Err(A1ParseError::InvalidColumn);
        }
        let row_1_based: u32 = s[row_start..idx]
            .parse()
            .map_err(|_| A1ParseError::InvalidRow)?;
        if row_1_based == 0 || row_1_based > EXCEL_MAX_ROWS {
            return Err(A1ParseError::InvalidRow);
        }

        Ok(Self {
            cell: CellRef::new(row_1_based - 1, col),
            row_relative: !row_absolute,
            col_relative: !col_absolute,
        })
    }

    /// Render as A1 text. When `absolute_markers` is false the `$` markers are dropped.
    pub fn to_a1_with_markers(self, absolute_markers: bool) -> String {
        let mut out = String::new();
        if absolute_markers && !self.col_relative {
            out.push('$');
        }
        push_column_label(self.cell.col, &mut out);
        if absolute_markers && !self.row_relative {
            out.push('$');
        }
        out.push_str(&(self.cell.row as u64 + 1).to_string());
        out
    }
}

impl fmt::Display for A1Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_with_markers(true))
    }
}

impl core::str::FromStr for A1Ref {
    type Err = A1ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        A1Ref::parse(s)
    }
}

/// A rectangular region within a worksheet.
///
/// The range is inclusive and always normalized such that:
/// - `start.row <= end.row`
/// - `start.col <= end.col`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: CellRef,
    pub end: CellRef,
}

impl Range {
    /// Construct a new range, normalizing coordinates if needed.
    pub const fn new(a: CellRef, b: CellRef) -> Self {
        let start_row = if a.row <= b.row { a.row } else { b.row };
        let end_row = if a.row <= b.row { b.row } else { a.row };
        let start_col = if a.col <= b.col { a.col } else { b.col };
        let end_col = if a.col <= b.col { b.col } else { a.col };
        Self {
            start: CellRef::new(start_row, start_col),
            end: CellRef::new(end_row, end_col),
        }
    }

    /// Returns true if the range is exactly one cell.
    #[inline]
    pub const fn is_single_cell(&self) -> bool {
        self.start.row == self.end.row && self.start.col == self.end.col
    }

    /// Parse an Excel A1-style range like `A1:B2` or a single-cell reference like `C3`.
    pub fn from_a1(a1: &str) -> Result<Self, RangeParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }

        match s.split_once(':') {
            None => {
                let cell = CellRef::from_a1(s).map_err(RangeParseError::Cell)?;
                Ok(Range::new(cell, cell))
            }
            Some((a, b)) => {
                let start = CellRef::from_a1(a).map_err(RangeParseError::Cell)?;
                let end = CellRef::from_a1(b).map_err(RangeParseError::Cell)?;
                Ok(Range::new(start, end))
            }
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

/// Errors that can occur when parsing an A1 cell reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum A1ParseError {
    #[error("empty A1 reference")]
    Empty,
    #[error("missing column in A1 reference")]
    MissingColumn,
    #[error("missing row in A1 reference")]
    MissingRow,
    #[error("invalid column in A1 reference")]
    InvalidColumn,
    #[error("invalid row in A1 reference")]
    InvalidRow,
    #[error("trailing characters in A1 reference")]
    TrailingCharacters,
}

/// Errors that can occur when parsing an A1 range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    #[error("empty A1 range")]
    Empty,
    #[error("invalid cell reference in range: {0}")]
    Cell(#[source] A1ParseError),
}

/// Append the Excel column label for a 0-indexed column (`0 -> A`, `26 -> AA`).
pub fn push_column_label(col: u32, out: &mut String) {
    // Excel columns are 1-based in A1 notation. We store 0-based internally.
    let mut n = col as u64 + 1;
    let mut buf = [0u8; 8];
    let mut len = 0usize;
    while n > 0 {
        let rem = (n - 1) % 26;
        buf[len] = b'A' + rem as u8;
        len += 1;
        n = (n - 1) / 26;
    }
    for &b in buf[..len].iter().rev() {
        out.push(b as char);
    }
}

fn col_to_name(col: u32) -> String {
    let mut out = String::new();
    push_column_label(col, &mut out);
    out
}

fn name_to_col(s: &str) -> Result<u32, A1ParseError> {
    let mut col: u32 = 0;
    for b in s.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(A1ParseError::InvalidColumn);
        }
        let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(v))
            .ok_or(A1ParseError::InvalidColumn)?;
    }
    if col == 0 {
        return Err(A1ParseError::InvalidColumn);
    }
    Ok(col - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn a1_roundtrip() {
        let c = CellRef::new(0, 0);
        assert_eq!(c.to_a1(), "A1");
        assert_eq!(CellRef::from_a1("A1").unwrap(), c);
        assert_eq!(CellRef::from_a1("$A$1").unwrap(), c);

        let c2 = CellRef::new(31, 54); // BC32
        assert_eq!(c2.to_a1(), "BC32");
        assert_eq!(CellRef::from_a1("bc32").unwrap(), c2);
    }

    #[test]
    fn a1_ref_keeps_markers() {
        let r = A1Ref::parse("$B7").unwrap();
        assert_eq!(r.cell, CellRef::new(6, 1));
        assert!(!r.col_relative);
        assert!(r.row_relative);
        assert_eq!(r.to_string(), "$B7");

        let r = A1Ref::parse("c$10").unwrap();
        assert!(r.col_relative);
        assert!(!r.row_relative);
        assert_eq!(r.to_string(), "C$10");
        assert_eq!(r.to_a1_with_markers(false), "C10");
    }

    #[test]
    fn a1_ref_rejects_malformed_text() {
        assert_eq!(A1Ref::parse(""), Err(A1ParseError::Empty));
        assert_eq!(A1Ref::parse("$"), Err(A1ParseError::MissingColumn));
        assert_eq!(A1Ref::parse("12"), Err(A1ParseError::MissingColumn));
        assert_eq!(A1Ref::parse("A"), Err(A1ParseError::MissingRow));
        assert_eq!(A1Ref::parse("A$"), Err(A1ParseError::MissingRow));
        assert_eq!(A1Ref::parse("A1B"), Err(A1ParseError::TrailingCharacters));
        assert_eq!(A1Ref::parse("$$A1"), Err(A1ParseError::MissingColumn));
        assert_eq!(A1Ref::parse("A0"), Err(A1ParseError::InvalidRow));
    }

    #[test]
    fn a1_range_parsing() {
        let r = Range::from_a1("A1:B2").unwrap();
        assert_eq!(r.start, CellRef::new(0, 0));
        assert_eq!(r.end, CellRef::new(1, 1));

        let single = Range::from_a1("C3").unwrap();
        assert!(single.is_single_cell());
        assert_eq!(single.start, CellRef::new(2, 2));
    }

    #[test]
    fn range_normalizes_corners() {
        let r = Range::new(CellRef::new(9, 2), CellRef::new(0, 0));
        assert_eq!(r.start, CellRef::new(0, 0));
        assert_eq!(r.end, CellRef::new(9, 2));
        assert_eq!(r, Range::from_a1("C10:A1").unwrap());
        assert_eq!(r.to_string(), "A1:C10");

        let last = CellRef::new(u32::MAX, u32::MAX);
        assert!(Range::new(last, last).is_single_cell());
    }

    #[test]
    fn a1_bounds_are_excel_compatible() {
        assert!(CellRef::from_a1("XFD1048576").is_ok());
        assert!(CellRef::from_a1("XFE1").is_err()); // col 16385 is out of bounds
        assert!(CellRef::from_a1("A1048577").is_err()); // row 1,048,577 is out of bounds
    }
}
