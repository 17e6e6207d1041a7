use formula_ptg::{AreaPtg, AreaRef, EncodePtgError, MAX_COL, MAX_ROW};
use pretty_assertions::assert_eq;

fn sample() -> AreaPtg {
    AreaPtg::area(AreaRef::parse("$A$1:C10").unwrap())
}

#[test]
fn short_buffer_fails_before_writing() {
    let mut buf = [0x11u8; 12];
    let err = sample().write(&mut buf, 4).unwrap_err();
    assert_eq!(
        err,
        EncodePtgError::BufferTooSmall {
            offset: 4,
            needed: 9,
            available: 12,
        }
    );
    assert_eq!(buf, [0x11u8; 12], "buffer must be untouched on error");
}

#[test]
fn exact_fit_at_end_of_buffer_succeeds() {
    let mut buf = [0u8; 12];
    assert_eq!(sample().write(&mut buf, 3), Ok(9));
    assert_eq!(buf[3], 0x25);
}

#[test]
fn offset_overflow_is_buffer_too_small() {
    let mut buf = [0u8; 9];
    assert!(matches!(
        sample().write(&mut buf, usize::MAX),
        Err(EncodePtgError::BufferTooSmall { .. })
    ));
}

#[test]
fn coordinates_beyond_field_width_are_rejected_without_writing() {
    // Excel 2007+ rows beyond the BIFF8 16-bit row field.
    let tall = AreaPtg::area(AreaRef::parse("A1:A70000").unwrap());
    let mut buf = [0u8; 9];
    assert_eq!(
        tall.write(&mut buf, 0),
        Err(EncodePtgError::RowOutOfRange { row: 69_999 })
    );
    assert_eq!(buf, [0u8; 9]);

    let mut wide = sample();
    wide.area.last_col = MAX_COL + 1;
    assert_eq!(
        wide.to_bytes(),
        Err(EncodePtgError::ColumnOutOfRange { col: MAX_COL + 1 })
    );

    let mut edge = sample();
    edge.area.first_row = MAX_ROW;
    edge.area.last_col = MAX_COL;
    assert!(edge.to_bytes().is_ok());
}
