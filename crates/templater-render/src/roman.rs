//! Roman numeral conversion.
//!
//! Uses standard subtractive notation (`IV`, `IX`, `XL`, ...). Thousands are
//! written as repeated `M`, so the largest representable value is 4999
//! (`MMMMCMXCIX`).

use std::fmt;

/// Smallest value with a Roman representation.
pub const MIN_ROMAN: i64 = 1;

/// Largest value with a Roman representation.
pub const MAX_ROMAN: i64 = 4999;

const NUMERALS: [(i64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// The value has no Roman representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange(pub i64);

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "number out of range (must be {}..={}): {}",
            MIN_ROMAN, MAX_ROMAN, self.0
        )
    }
}

impl std::error::Error for OutOfRange {}

/// Converts an integer to its Roman numeral form.
///
/// ```rust
/// use templater_render::roman::to_roman;
///
/// assert_eq!(to_roman(1994).unwrap(), "MCMXCIV");
/// assert!(to_roman(0).is_err());
/// ```
pub fn to_roman(number: i64) -> Result<String, OutOfRange> {
    if !(MIN_ROMAN..=MAX_ROMAN).contains(&number) {
        return Err(OutOfRange(number));
    }

    let mut remaining = number;
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while remaining >= value {
            out.push_str(numeral);
            remaining -= value;
        }
    }
    Ok(out)
}
