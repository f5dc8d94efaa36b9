use crate::evaluating::truncate_to_i64;

pub const HEX_GROUP: usize = 2;
pub const BITS_GROUP: usize = 4;

/// The three display strings for one result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedOutput {
    pub decimal: String,
    pub hex: String,
    pub bits: String,
}

impl FormattedOutput {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.decimal.is_empty() && self.hex.is_empty() && self.bits.is_empty()
    }
}

/// Splits `digits` into groups of `size` counted from the least significant
/// (rightmost) digit: `group_digits("ABCDE", 2)` is `"A BC DE"`.
pub fn group_digits(digits: &str, size: usize) -> String {
    if size == 0 {
        return digits.into();
    }
    let reversed: Vec<char> = digits.chars().rev().collect();
    let joined = reversed
        .chunks(size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().rev().collect()
}

/// Removes the spaces `group_digits` inserted.
pub fn ungroup(grouped: &str) -> String {
    grouped.chars().filter(|c| *c != ' ').collect()
}

/// `value` as an `i64` when it is exactly a whole number in range.
pub fn whole_number(value: f64) -> Option<i64> {
    truncate_to_i64(value).filter(|whole| *whole as f64 == value)
}

pub fn format_hex(value: i64) -> String {
    group_digits(&format!("{value:X}"), HEX_GROUP)
}

pub fn format_bits(value: i64) -> String {
    group_digits(&format!("{value:b}"), BITS_GROUP)
}

/// Plain notation for everyday magnitudes, scientific notation outside them.
pub fn format_decimal(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        "0".into()
    } else if (1e-5..1e16).contains(&magnitude) {
        value.to_string()
    } else {
        format!("{value:e}")
    }
}

pub fn format(value: f64) -> FormattedOutput {
    let decimal = format_decimal(value);
    match whole_number(value) {
        Some(whole) => FormattedOutput {
            decimal,
            hex: format_hex(whole),
            bits: format_bits(whole),
        },
        None => FormattedOutput {
            decimal,
            ..FormattedOutput::blank()
        },
    }
}
