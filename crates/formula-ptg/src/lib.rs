//! BIFF8 reference-token helpers.
//!
//! This crate covers the 2-D area operand of Excel's legacy `rgce` formula token stream:
//! - [`AreaRef`]: the in-memory range (`$A$1:C10`) with independent relative/absolute flags for
//!   each row and column bound, plus its A1 text form
//! - [`AreaPtg`]: the fixed 9-byte `PtgArea` / `PtgAreaN` encoding of an [`AreaRef`] together
//!   with its evaluation class
//!
//! Full formula parsing/evaluation is out of scope; callers walking an `rgce` stream dispatch to
//! [`AreaPtg::decode`] once they have read an area ptg byte (see [`AreaPtgKind::split_ptg`]).
//!
//! Decoding and encoding are pure functions of their inputs. Nothing is cached and no state is
//! shared between calls.

mod area_ref;
pub mod le;
mod ptg_area;

pub use area_ref::{AreaFormatOptions, AreaParseError, AreaRef};
pub use le::{LittleEndianInput, PtgCursor};
pub use ptg_area::{
    AreaPtg, AreaPtgKind, DecodePtgError, EncodePtgError, PtgClass, AREA_PTG_LEN, MAX_COL,
    MAX_ROW,
};
