//! Discount code format helpers.
//!
//! Generation lives in the festival service (it needs a store round-trip for
//! uniqueness); the format itself is shared so anything handling a code can
//! normalize and check it the same way.

/// Whether a string is a well-formed discount code:
/// six uppercase ASCII letters followed by two digits.
pub fn is_valid_discount_code_format(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 8
        && bytes[..6].iter().all(u8::is_ascii_uppercase)
        && bytes[6..].iter().all(u8::is_ascii_digit)
}

/// Normalize user input for lookup: strip surrounding whitespace, uppercase.
pub fn format_discount_code(input: &str) -> String {
    input.trim().to_uppercase()
}
