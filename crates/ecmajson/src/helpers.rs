//! Pure functions over characters: hex/octal digit decoding, character-class
//! predicates, and surrogate-pair conversion.
//!
//! These mirror the free functions `demjson.py` hangs off its `helpers`
//! class, but as plain functions since Rust has no need for a namespacing
//! class full of `@staticmethod`s.

/// Decodes a hexadecimal digit string into its integer value.
///
/// Returns `None` if any character is not `[0-9a-fA-F]`.
#[must_use]
pub fn decode_hex(digits: &str) -> Option<u32> {
    let mut n: u32 = 0;
    for c in digits.chars() {
        let d = c.to_digit(16)?;
        n = n.checked_mul(16)?.checked_add(d)?;
    }
    Some(n)
}

/// Decodes an octal digit string into its integer value.
///
/// Returns `None` if any character is not `[0-7]`.
#[must_use]
pub fn decode_octal(digits: &str) -> Option<u32> {
    let mut n: u32 = 0;
    for c in digits.chars() {
        let d = c.to_digit(8)?;
        n = n.checked_mul(8)?.checked_add(d)?;
    }
    Some(n)
}

/// A JSON (strict) whitespace character: space, tab, CR, or LF.
#[must_use]
pub fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// A Unicode `Zs`-category separator, widened with the ECMAScript extras
/// (`\v`, form feed) that aren't themselves `Zs`.
///
/// There is no Unicode Character Database dependency in this crate; the
/// table below is the closed set of `Zs` code points in Unicode (stable
/// since the category was defined) plus the two ECMAScript whitespace
/// controls not otherwise covered.
#[must_use]
pub fn is_unicode_whitespace(c: char) -> bool {
    if is_json_whitespace(c) || c == '\u{0B}' || c == '\u{0C}' {
        return true;
    }
    matches!(
        c,
        '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// A JSON line terminator: CR or LF.
#[must_use]
pub fn is_json_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// A Unicode line/paragraph terminator: CR, LF, U+2028, or U+2029.
#[must_use]
pub fn is_unicode_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Is `c` a control character, `Cf` format control character, or line/
/// paragraph separator that must always be `\u`-escaped when emitting a
/// JSON string, and can never be copied through verbatim even in the most
/// permissive non-strict mode?
#[must_use]
pub fn is_unsafe_string_char(c: char) -> bool {
    c == '"' || c == '\\' || c.is_control() || is_format_control_char(c) || matches!(c, '\u{2028}' | '\u{2029}')
}

/// Unicode "format control characters" (general category `Cf`): invisible
/// characters that affect layout of surrounding text but have no visible
/// glyph. ECMAScript permits these anywhere in source text; JSON does not
/// (except inside string literals).
///
/// This is a hand-maintained table of the `Cf` code points rather than a
/// dependency on a Unicode Character Database crate, matching the pack's
/// observed preference to avoid a UCD dependency when only a handful of
/// ranges are needed (see `write_escaped_string` in the teacher crate,
/// which hand-codes its own narrower set of "always escape" categories).
#[must_use]
pub fn is_format_control_char(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x13438
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
    )
}

/// May `c` begin a JavaScript identifier?
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// May `c` continue a JavaScript identifier (after the first character)?
#[must_use]
pub fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '\u{200C}' | '\u{200D}')
}

/// Combines a UTF-16 surrogate pair into the scalar value it encodes.
///
/// `high` must be in `0xD800..=0xDBFF` and `low` in `0xDC00..=0xDFFF`.
#[must_use]
pub fn surrogate_pair_to_scalar(high: u32, low: u32) -> Option<char> {
    if !(0xD800..=0xDBFF).contains(&high) || !(0xDC00..=0xDFFF).contains(&low) {
        return None;
    }
    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(combined)
}

/// Splits a scalar value outside the Basic Multilingual Plane into the
/// UTF-16 surrogate pair that represents it. Returns `None` for scalars
/// already inside the BMP (no splitting needed).
#[must_use]
pub fn scalar_to_surrogate_pair(c: char) -> Option<(u16, u16)> {
    let n = c as u32;
    if n < 0x1_0000 {
        return None;
    }
    let v = n - 0x1_0000;
    let high = 0xD800 | (v >> 10);
    let low = 0xDC00 | (v & 0x3FF);
    Some((u16::try_from(high).ok()?, u16::try_from(low).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_octal_roundtrip() {
        assert_eq!(decode_hex("1D11E"), Some(0x1D11E));
        assert_eq!(decode_hex("zz"), None);
        assert_eq!(decode_octal("777"), Some(0o777));
        assert_eq!(decode_octal("8"), None);
    }

    #[test]
    fn surrogate_pair_roundtrip() {
        // U+1D11E MUSICAL SYMBOL G CLEF
        let c = surrogate_pair_to_scalar(0xD834, 0xDD1E).unwrap();
        assert_eq!(c, '\u{1D11E}');
        let (high, low) = scalar_to_surrogate_pair(c).unwrap();
        assert_eq!(high, 0xD834);
        assert_eq!(low, 0xDD1E);
    }

    #[test]
    fn bmp_scalar_has_no_surrogate_pair() {
        assert_eq!(scalar_to_surrogate_pair('A'), None);
    }

    #[test]
    fn whitespace_classes() {
        assert!(is_json_whitespace(' '));
        assert!(!is_json_whitespace('\u{00A0}'));
        assert!(is_unicode_whitespace('\u{00A0}'));
        assert!(is_unicode_whitespace('\u{3000}'));
    }
}
