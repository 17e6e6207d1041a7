#![no_main]

use libfuzzer_sys::fuzz_target;

use formula_ptg::{AreaPtg, AreaRef, LittleEndianInput, PtgCursor};

/// Area tokens are 9 bytes; longer inputs only add more tokens to walk.
const MAX_INPUT_BYTES: usize = 9 * 256;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > MAX_INPUT_BYTES {
        &data[..MAX_INPUT_BYTES]
    } else {
        data
    };

    // Walk the input as a stream of back-to-back area tokens until decoding fails.
    let mut cursor = PtgCursor::new(data);
    while !cursor.is_empty() {
        let start = cursor.position();
        let Ok(ptg) = AreaPtg::read(&mut cursor) else {
            break;
        };

        // Every decoded token must re-encode to the exact bytes it came from.
        let bytes = ptg.to_bytes().expect("decoded coordinates always fit the token fields");
        assert_eq!(&bytes[..], &data[start..start + bytes.len()]);

        // And its text form must parse back to the same area.
        let text = ptg.to_formula_text();
        let reparsed = AreaRef::parse(&text).expect("formatted area text parses");
        assert_eq!(reparsed, ptg.area, "text {text}");
    }

    // Arbitrary text must never panic the parser.
    let text = String::from_utf8_lossy(data);
    let _ = AreaRef::parse(&text);
});
