//! Property-based tests for swatchmeta-types.

use proptest::prelude::*;
use swatchmeta_types::{resolve_color, ColorValue};

proptest! {
    #[test]
    fn six_digit_hex_codes_resolve_to_themselves_lowercased(digits in "[0-9a-fA-F]{6}") {
        let input = format!("#{digits}");
        let resolved = resolve_color(&input).expect("hex code resolves");
        prop_assert_eq!(resolved.as_str(), input.to_ascii_lowercase());
        prop_assert!(resolved.is_hex_code());
    }

    #[test]
    fn resolved_colors_are_always_hex_codes(input in "\\PC{0,24}") {
        if let Some(color) = resolve_color(&input) {
            prop_assert!(color.is_hex_code());
        }
    }

    #[test]
    fn name_resolution_ignores_case_and_spacing(upper in proptest::bool::ANY) {
        let name = if upper { "DARK SLATE GRAY" } else { "dark slate gray" };
        prop_assert_eq!(resolve_color(name), Some(ColorValue::from("#2f4f4f")));
    }
}
