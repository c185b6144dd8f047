//! Property tests for the soft-wrap layout and its offset mapping.

use core_text::{grapheme, str_width, wrap};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    // Mix of ASCII words, blanks, hard newlines and wide/multibyte clusters.
    prop::collection::vec(
        prop_oneof![
            4 => "[a-z]{1,12}",
            2 => Just(" ".to_string()),
            1 => Just("  ".to_string()),
            1 => Just("\n".to_string()),
            1 => Just("界".to_string()),
            1 => Just("é".to_string()),
            1 => Just("😀".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    // Dropping soft breaks reproduces the original text.
    #[test]
    fn round_trip(text in text_strategy(), width in 1usize..30, first in proptest::option::of(1usize..30)) {
        let map = wrap(&text, width, first);
        let bytes: Vec<u8> = map
            .wrapped
            .bytes()
            .enumerate()
            .filter(|(idx, _)| map.wrapped_to_original[*idx].is_some())
            .map(|(_, b)| b)
            .collect();
        prop_assert_eq!(String::from_utf8(bytes).unwrap(), text);
    }

    // Mapping tables have the documented shape and agree with each other.
    #[test]
    fn mapping_is_monotonic_and_inverse(text in text_strategy(), width in 1usize..30) {
        let map = wrap(&text, width, None);
        prop_assert_eq!(map.original_to_wrapped.len(), text.len() + 1);
        prop_assert_eq!(map.wrapped_to_original.len(), map.wrapped.len() + 1);
        for pair in map.original_to_wrapped.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        for (p, &q) in map.original_to_wrapped.iter().enumerate() {
            prop_assert_eq!(map.wrapped_to_original[q], Some(p));
        }
    }

    // Rows stay strictly under their budget unless the row is one cluster
    // too wide to fit anywhere. Only the first row uses `first`.
    #[test]
    fn width_bound(text in text_strategy(), width in 1usize..30, first in proptest::option::of(1usize..30)) {
        let map = wrap(&text, width, first);
        for (idx, row) in map.wrapped.split('\n').enumerate() {
            let budget = if idx == 0 { first.unwrap_or(width) } else { width };
            let w = str_width(row);
            if grapheme::iter(row).count() == 1 {
                prop_assert!(w < budget || w <= 2, "row {} {:?} width {}", idx, row, w);
            } else {
                prop_assert!(w < budget, "row {} {:?} width {} >= {}", idx, row, w, budget);
            }
        }
    }
}
