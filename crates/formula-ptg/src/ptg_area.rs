//! Fixed-width BIFF8 2-D area tokens (`PtgArea`, `PtgAreaN`).
//!
//! Layout (9 bytes):
//!
//! ```text
//! [ptg: u8][rwFirst: u16][rwLast: u16][colFirst: u16][colLast: u16]
//! ```
//!
//! The ptg byte is the token's base id plus its class offset (`0x00` reference, `0x20` value,
//! `0x40` array), so `PtgArea` appears as `0x25`/`0x45`/`0x65`. Each column word holds a 14-bit
//! column index plus the flags of its own corner: bit 15 = column relative, bit 14 = row relative.
//! Row words are plain row indices.

use crate::le::{put_u16_le, put_u8, LittleEndianInput, PtgCursor};
use crate::AreaRef;

/// Encoded size of every token in this family.
pub const AREA_PTG_LEN: usize = 9;

/// Largest row index the 16-bit row field can hold.
pub const MAX_ROW: u32 = u16::MAX as u32;
/// Largest column index the 14-bit column field can hold.
pub const MAX_COL: u32 = COL_INDEX_MASK as u32;

const COL_INDEX_MASK: u16 = 0x3FFF;
const ROW_RELATIVE_BIT: u16 = 0x4000;
const COL_RELATIVE_BIT: u16 = 0x8000;

const CLASS_SHIFT: u8 = 5;

/// Evaluation context a token's result is consumed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PtgClass {
    #[default]
    Reference,
    Value,
    Array,
}

impl PtgClass {
    pub const ALL: [PtgClass; 3] = [PtgClass::Reference, PtgClass::Value, PtgClass::Array];

    const fn index(self) -> u8 {
        match self {
            PtgClass::Reference => 0,
            PtgClass::Value => 1,
            PtgClass::Array => 2,
        }
    }

    /// Amount added to a token's base id for this class.
    pub const fn offset(self) -> u8 {
        self.index() << CLASS_SHIFT
    }

    /// Inverse of [`PtgClass::offset`]; `None` for anything outside `{0x00, 0x20, 0x40}`.
    pub const fn from_offset(offset: u8) -> Option<Self> {
        match offset {
            0x00 => Some(PtgClass::Reference),
            0x20 => Some(PtgClass::Value),
            0x40 => Some(PtgClass::Array),
            _ => None,
        }
    }
}

/// Token shapes sharing the 9-byte 2-D area layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaPtgKind {
    /// `PtgArea`: coordinates as written in the formula.
    Area,
    /// `PtgAreaN`: the shared-formula variant, stored with the same layout.
    AreaN,
}

impl AreaPtgKind {
    pub const ALL: [AreaPtgKind; 2] = [AreaPtgKind::Area, AreaPtgKind::AreaN];

    /// Class-independent ptg id (reference-class value).
    pub const fn base_id(self) -> u8 {
        match self {
            AreaPtgKind::Area => 0x25,
            AreaPtgKind::AreaN => 0x2D,
        }
    }

    pub const fn ptg(self, class: PtgClass) -> u8 {
        self.base_id() + class.offset()
    }

    /// Recover the class encoded in `ptg` for this token kind.
    pub fn class_of(self, ptg: u8) -> Option<PtgClass> {
        ptg.checked_sub(self.base_id())
            .and_then(PtgClass::from_offset)
    }

    /// Identify which area token (and class) a ptg byte denotes.
    pub fn split_ptg(ptg: u8) -> Option<(AreaPtgKind, PtgClass)> {
        Self::ALL
            .into_iter()
            .find_map(|kind| kind.class_of(ptg).map(|class| (kind, class)))
    }
}

/// Decoding failure for an area token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodePtgError {
    /// The ptg byte does not belong to the 2-D area family.
    #[error("ptg=0x{ptg:02X} at offset {offset} is not a 2-D area token")]
    UnexpectedPtg { offset: usize, ptg: u8 },
    /// The ptg byte names an area token but its class offset is not 0x00/0x20/0x40.
    #[error(
        "ptg=0x{ptg:02X} at offset {offset} has invalid class offset 0x{:02X} from base 0x{base:02X}",
        ptg.wrapping_sub(*base)
    )]
    InvalidClass { offset: usize, ptg: u8, base: u8 },
    #[error(
        "unexpected eof at offset {offset} (needed {needed} bytes, remaining {remaining})"
    )]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}

/// Encoding failure for an area token. Nothing is written to the buffer when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodePtgError {
    #[error("buffer too small: need {needed} bytes at offset {offset}, buffer has {available}")]
    BufferTooSmall {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("row {row} does not fit the 16-bit row field (max 65535)")]
    RowOutOfRange { row: u32 },
    #[error("column {col} does not fit the 14-bit column field (max 16383)")]
    ColumnOutOfRange { col: u32 },
}

/// A decoded 2-D area token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaPtg {
    pub kind: AreaPtgKind,
    pub class: PtgClass,
    pub area: AreaRef,
}

impl AreaPtg {
    /// Build a token programmatically (no byte layer involved).
    pub const fn new(kind: AreaPtgKind, class: PtgClass, area: AreaRef) -> Self {
        Self { kind, class, area }
    }

    /// A reference-class `PtgArea`.
    pub const fn area(area: AreaRef) -> Self {
        Self::new(AreaPtgKind::Area, PtgClass::Reference, area)
    }

    pub const fn encoded_size(&self) -> usize {
        AREA_PTG_LEN
    }

    pub const fn ptg(&self) -> u8 {
        self.kind.ptg(self.class)
    }

    /// Decode a token whose ptg byte has already been consumed from `input`.
    pub fn decode<R: LittleEndianInput>(ptg: u8, input: &mut R) -> Result<Self, DecodePtgError> {
        // The ptg byte sits just before the reader's current position.
        let ptg_offset = input.position().saturating_sub(1);
        let (kind, class) = classify(ptg, ptg_offset)?;

        let payload = read_payload(input).map_err(|err| {
            log::debug!("truncated area ptg=0x{ptg:02X} at offset {ptg_offset}: {err}");
            err
        })?;
        let area = unpack_area(payload);
        log::trace!("decoded area ptg=0x{ptg:02X} at offset {ptg_offset}: {area}");

        Ok(Self { kind, class, area })
    }

    /// Read the ptg byte and its payload from `input`.
    pub fn read<R: LittleEndianInput>(input: &mut R) -> Result<Self, DecodePtgError> {
        let ptg = input.read_u8()?;
        Self::decode(ptg, input)
    }

    /// Decode a token from the start of `bytes`. Trailing bytes are ignored.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, DecodePtgError> {
        Self::read(&mut PtgCursor::new(bytes))
    }

    /// Write the 9-byte token at `offset`, returning the number of bytes written.
    ///
    /// Buffer space and coordinate ranges are validated before the first byte is written, so an
    /// error leaves `buf` untouched.
    pub fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize, EncodePtgError> {
        let fits = offset
            .checked_add(AREA_PTG_LEN)
            .is_some_and(|end| end <= buf.len());
        if !fits {
            return Err(EncodePtgError::BufferTooSmall {
                offset,
                needed: AREA_PTG_LEN,
                available: buf.len(),
            });
        }

        let [row1, row2, col1, col2] = pack_area(&self.area)?;
        put_u8(buf, offset, self.ptg());
        put_u16_le(buf, offset + 1, row1);
        put_u16_le(buf, offset + 3, row2);
        put_u16_le(buf, offset + 5, col1);
        put_u16_le(buf, offset + 7, col2);

        log::trace!(
            "encoded area ptg=0x{:02X} at offset {offset}: {}",
            self.ptg(),
            self.area
        );
        Ok(AREA_PTG_LEN)
    }

    pub fn to_bytes(&self) -> Result<[u8; AREA_PTG_LEN], EncodePtgError> {
        let mut out = [0u8; AREA_PTG_LEN];
        self.write(&mut out, 0)?;
        Ok(out)
    }

    /// Formula text for this operand (e.g. `$A$1:C10`).
    pub fn to_formula_text(&self) -> String {
        self.area.to_string()
    }
}

fn classify(ptg: u8, offset: usize) -> Result<(AreaPtgKind, PtgClass), DecodePtgError> {
    if let Some(found) = AreaPtgKind::split_ptg(ptg) {
        return Ok(found);
    }

    // Distinguish "right family, bad class" from "not an area token at all": class bits only
    // touch 0x60, so the low five bits identify the token in every class.
    let low = ptg & 0x1F;
    let err = match AreaPtgKind::ALL
        .into_iter()
        .find(|k| k.base_id() & 0x1F == low)
    {
        Some(kind) => DecodePtgError::InvalidClass {
            offset,
            ptg,
            base: kind.base_id(),
        },
        None => DecodePtgError::UnexpectedPtg { offset, ptg },
    };
    log::debug!("rejecting area token: {err}");
    Err(err)
}

fn read_payload<R: LittleEndianInput>(input: &mut R) -> Result<[u16; 4], DecodePtgError> {
    Ok([
        input.read_u16_le()?,
        input.read_u16_le()?,
        input.read_u16_le()?,
        input.read_u16_le()?,
    ])
}

fn unpack_area([row1, row2, col1, col2]: [u16; 4]) -> AreaRef {
    AreaRef {
        first_row: row1 as u32,
        last_row: row2 as u32,
        first_col: (col1 & COL_INDEX_MASK) as u32,
        last_col: (col2 & COL_INDEX_MASK) as u32,
        first_row_relative: col1 & ROW_RELATIVE_BIT != 0,
        last_row_relative: col2 & ROW_RELATIVE_BIT != 0,
        first_col_relative: col1 & COL_RELATIVE_BIT != 0,
        last_col_relative: col2 & COL_RELATIVE_BIT != 0,
    }
}

fn pack_area(area: &AreaRef) -> Result<[u16; 4], EncodePtgError> {
    Ok([
        pack_row(area.first_row)?,
        pack_row(area.last_row)?,
        pack_col(area.first_col, area.first_row_relative, area.first_col_relative)?,
        pack_col(area.last_col, area.last_row_relative, area.last_col_relative)?,
    ])
}

fn pack_row(row: u32) -> Result<u16, EncodePtgError> {
    u16::try_from(row).map_err(|_| EncodePtgError::RowOutOfRange { row })
}

fn pack_col(col: u32, row_relative: bool, col_relative: bool) -> Result<u16, EncodePtgError> {
    if col > MAX_COL {
        return Err(EncodePtgError::ColumnOutOfRange { col });
    }
    let mut v = col as u16;
    if row_relative {
        v |= ROW_RELATIVE_BIT;
    }
    if col_relative {
        v |= COL_RELATIVE_BIT;
    }
    Ok(v)
}
