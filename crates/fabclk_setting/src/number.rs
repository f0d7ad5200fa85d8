//! Unsigned integer parsing shared by every input reader.

/// Parses a decimal or `0x`-prefixed hexadecimal unsigned integer.
///
/// Returns `None` for empty, signed, fractional or out-of-range text rather
/// than falling back to zero; callers decide what a bad value means.
pub(crate) fn parse_unsigned(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None if text.starts_with('+') => None,
        None => text.parse().ok(),
    }
}
