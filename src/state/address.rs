//! Goto address parsing.
//!
//! Accepted forms, all optionally negative and surrounded by whitespace:
//! decimal (`42`), `0x`-prefixed hex (`0x2A`), and `h`-suffixed hex (`2Ah`).

use crate::model::AddressError;

/// Parse a typed goto address into a signed line number.
///
/// The result is not range checked; navigation clamps it.
///
/// ```
/// # use hexview::state::address::parse_address;
/// assert_eq!(parse_address("42"), Ok(42));
/// assert_eq!(parse_address(" 0x2a "), Ok(42));
/// assert_eq!(parse_address("2Ah"), Ok(42));
/// assert_eq!(parse_address("-5"), Ok(-5));
/// assert!(parse_address("xyz").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<i64, AddressError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AddressError::Empty);
    }

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (digits, radix) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (hex, 16)
    } else if let Some(hex) = body.strip_suffix(['h', 'H']) {
        (hex, 16)
    } else {
        (body, 10)
    };

    let invalid = || AddressError::Invalid {
        input: trimmed.to_string(),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let value = i64::from_str_radix(digits, radix).map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}
