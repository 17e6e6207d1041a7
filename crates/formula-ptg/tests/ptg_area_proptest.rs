use formula_ptg::{AreaPtg, AreaPtgKind, AreaRef, PtgClass};
use proptest::prelude::*;

fn arb_area() -> impl Strategy<Value = AreaRef> {
    (
        (0u32..=16_383, 0u32..=16_383, 0u32..=16_383, 0u32..=16_383),
        any::<[bool; 4]>(),
    )
        .prop_map(|((r1, r2, c1, c2), [fr, lr, fc, lc])| AreaRef {
            first_row: r1,
            last_row: r2,
            first_col: c1,
            last_col: c2,
            first_row_relative: fr,
            last_row_relative: lr,
            first_col_relative: fc,
            last_col_relative: lc,
        })
}

/// Areas anywhere on the Excel 2007+ grid, beyond what the 16-bit row field can encode.
fn arb_grid_area() -> impl Strategy<Value = AreaRef> {
    (
        (0u32..1_048_576, 0u32..1_048_576, 0u32..16_384, 0u32..16_384),
        any::<[bool; 4]>(),
    )
        .prop_map(|((r1, r2, c1, c2), [fr, lr, fc, lc])| AreaRef {
            first_row: r1,
            last_row: r2,
            first_col: c1,
            last_col: c2,
            first_row_relative: fr,
            last_row_relative: lr,
            first_col_relative: fc,
            last_col_relative: lc,
        })
}

fn arb_kind() -> impl Strategy<Value = AreaPtgKind> {
    prop::sample::select(AreaPtgKind::ALL.to_vec())
}

fn arb_class() -> impl Strategy<Value = PtgClass> {
    prop::sample::select(PtgClass::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn binary_roundtrip(area in arb_area(), kind in arb_kind(), class in arb_class()) {
        let ptg = AreaPtg::new(kind, class, area);
        let bytes = ptg.to_bytes().expect("coordinates are in range");
        prop_assert_eq!(bytes.len(), ptg.encoded_size());
        prop_assert_eq!(AreaPtg::decode_bytes(&bytes).expect("decode"), ptg);
    }

    #[test]
    fn text_roundtrip(area in arb_grid_area()) {
        let text = area.to_string();
        prop_assert_eq!(AreaRef::parse(&text).expect("parse"), area);
    }

    #[test]
    fn binary_then_text_roundtrip(area in arb_area(), class in arb_class()) {
        let bytes = AreaPtg::new(AreaPtgKind::Area, class, area).to_bytes().expect("encode");
        let text = AreaPtg::decode_bytes(&bytes).expect("decode").to_formula_text();
        let reparsed = AreaRef::parse(&text).expect("parse");
        prop_assert_eq!(
            AreaPtg::new(AreaPtgKind::Area, class, reparsed).to_bytes().expect("re-encode"),
            bytes
        );
    }

    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..=16)) {
        if let Ok(ptg) = AreaPtg::decode_bytes(&bytes) {
            let encoded = ptg.to_bytes().expect("re-encode");
            prop_assert_eq!(&encoded[..], &bytes[..9]);
        }
    }
}
