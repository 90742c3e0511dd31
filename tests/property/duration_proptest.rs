//! Property-based tests for token lifetime parsing

use std::time::Duration;

use proptest::prelude::*;
use userauth::backend::server::config::parse_duration;

fn unit() -> impl Strategy<Value = (char, u64)> {
    prop_oneof![
        Just(('s', 1)),
        Just(('m', 60)),
        Just(('h', 60 * 60)),
        Just(('d', 24 * 60 * 60)),
    ]
}

proptest! {
    #[test]
    fn test_unit_suffix_scales_amount(amount in 0u64..1_000_000, (suffix, seconds) in unit()) {
        let parsed = parse_duration(&format!("{amount}{suffix}")).unwrap();
        prop_assert_eq!(parsed, Duration::from_secs(amount * seconds));
    }

    #[test]
    fn test_bare_number_is_seconds(amount in 0u64..1_000_000_000) {
        prop_assert_eq!(parse_duration(&amount.to_string()).unwrap(), Duration::from_secs(amount));
    }

    #[test]
    fn test_padding_is_ignored(amount in 0u64..10_000, (suffix, _) in unit(), pad in "[ \t]{0,3}") {
        let padded = format!("{pad}{amount}{suffix}{pad}");
        prop_assert_eq!(parse_duration(&padded), parse_duration(&format!("{amount}{suffix}")));
    }

    #[test]
    fn test_unknown_suffix_is_rejected(amount in 0u64..10_000, suffix in "[a-ce-gi-ln-rt-zA-Z]") {
        let input = format!("{amount}{suffix}");
        prop_assert!(parse_duration(&input).is_err());
    }
}
