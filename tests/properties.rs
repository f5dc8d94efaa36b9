use modecalc::formatting::{format_bits, format_hex, ungroup, whole_number};
use modecalc::{evaluate, format, group_digits, Mode, VariableStore};

use proptest::prelude::*;

proptest! {
    /// Grouping only inserts spaces
    #[test]
    fn prop_grouping_preserves_digits(n in 0i64..=i64::MAX) {
        prop_assert_eq!(ungroup(&format_hex(n)), format!("{n:X}"));
        prop_assert_eq!(ungroup(&format_bits(n)), format!("{n:b}"));
    }

    /// Every group but the leading one is full
    #[test]
    fn prop_groups_align_right(digits in "[0-9A-F]{1,40}", size in 1usize..6) {
        let grouped = group_digits(&digits, size);
        let groups: Vec<&str> = grouped.split(' ').collect();
        prop_assert!(groups[0].len() <= size && !groups[0].is_empty());
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), size);
        }
    }

    #[test]
    fn prop_integers_are_whole(n in -(1i64 << 53)..(1i64 << 53)) {
        let output = format(n as f64);
        prop_assert_eq!(output.decimal, n.to_string());
        prop_assert!(!output.hex.is_empty());
        prop_assert!(!output.bits.is_empty());
    }

    #[test]
    fn prop_halves_are_not_whole(n in -1_000_000i64..1_000_000) {
        let value = n as f64 + 0.5;
        prop_assert_eq!(whole_number(value), None);
        let output = format(value);
        prop_assert!(output.hex.is_empty());
        prop_assert!(output.bits.is_empty());
    }

    #[test]
    fn prop_programming_division_truncates(a in -100_000i64..100_000, b in 1i64..1000) {
        let store = VariableStore::new();
        let input = format!("({a}) / {b}");
        prop_assert_eq!(evaluate(&input, Mode::programming, &store), Ok((a / b) as f64));
    }

    #[test]
    fn prop_bitwise_matches_i64(a in any::<i32>(), b in any::<i32>()) {
        let store = VariableStore::new();
        let (a, b) = (a as i64, b as i64);
        prop_assert_eq!(evaluate(&format!("({a}) & ({b})"), Mode::programming, &store), Ok((a & b) as f64));
        prop_assert_eq!(evaluate(&format!("({a}) | ({b})"), Mode::programming, &store), Ok((a | b) as f64));
        prop_assert_eq!(evaluate(&format!("({a}) ^ ({b})"), Mode::programming, &store), Ok((a ^ b) as f64));
    }
}
