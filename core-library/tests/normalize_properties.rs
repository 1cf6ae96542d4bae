//! Property tests for name normalization

use core_library::normalize;
use proptest::prelude::*;

/// Names built from the characters normalization treats specially
fn tricky_name() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('('),
            Just(')'),
            Just(' '),
            Just('\t'),
            Just('\n'),
            Just('\u{00A0}'),
            Just('\u{2003}'),
            Just('\u{3000}'),
            Just('-'),
            Just('!'),
            Just('é'),
            Just('Σ'),
            Just('東'),
            Just('\u{0301}'),
            Just('7'),
            Just('a'),
            Just('Z'),
        ],
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(input in any::<String>()) {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_normalize_is_idempotent_on_tricky_names(input in tricky_name()) {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_output_is_letters_digits_and_single_spaces(input in tricky_name()) {
        let output = normalize(&input);

        prop_assert!(!output.starts_with(' ') && !output.ends_with(' '));
        prop_assert!(!output.contains("  "));
        prop_assert!(output
            .chars()
            .all(|c| c == ' ' || c.is_ascii_digit() || c.is_alphabetic()));
    }
}
