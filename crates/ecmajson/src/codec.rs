//! The Unicode transcoding layer: byte-order-mark-aware encoding
//! auto-detection (RFC 4627 §3), a small codec registry, and a hand-rolled
//! UTF-32 codec (the one encoding Rust's standard library has no native
//! support for).
//!
//! Grounded on `demjson.py`'s `utf32` class and `helpers.lookup_codec`/
//! `helpers.auto_detect_encoding`, translated from Python's `codecs`
//! module idiom (there is no platform codec registry to lean on in Rust,
//! so every codec here is implemented locally).

use bstr::ByteSlice;

use crate::error::EncodingError;

/// A recognized text encoding, used both to pin
/// [`crate::options::DecodeOptions::encoding`]/
/// [`crate::options::EncodeOptions::encoding`] and as the result of
/// auto-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingName {
    /// UTF-8.
    Utf8,
    /// UTF-16, big-endian.
    Utf16Be,
    /// UTF-16, little-endian.
    Utf16Le,
    /// UTF-32, big-endian.
    Utf32Be,
    /// UTF-32, little-endian.
    Utf32Le,
    /// 7-bit ASCII (errors on any byte `>= 0x80`, subject to
    /// [`ErrorPolicy`]).
    Ascii,
    /// ISO-8859-1 (Latin-1): every byte maps to the code point of the
    /// same numeric value.
    Latin1,
}

impl EncodingName {
    /// The canonical lowercase name for this encoding, as accepted by
    /// [`lookup`] and returned for display/diagnostics.
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        match self {
            EncodingName::Utf8 => "utf-8",
            EncodingName::Utf16Be => "utf-16be",
            EncodingName::Utf16Le => "utf-16le",
            EncodingName::Utf32Be => "utf-32be",
            EncodingName::Utf32Le => "utf-32le",
            EncodingName::Ascii => "ascii",
            EncodingName::Latin1 => "iso-8859-1",
        }
    }
}

/// Looks up an [`EncodingName`] by its canonical or a common alias (case-
/// insensitive), the Rust analogue of `demjson.py`'s `helpers.lookup_codec`
/// call into Python's `codecs.lookup`.
#[must_use]
pub fn lookup(name: &str) -> Option<EncodingName> {
    let normalized = name.to_ascii_lowercase().replace(['_', ' '], "-");
    Some(match normalized.as_str() {
        "utf-8" | "utf8" | "u8" => EncodingName::Utf8,
        "utf-16be" | "utf16be" => EncodingName::Utf16Be,
        "utf-16le" | "utf16le" => EncodingName::Utf16Le,
        "utf-32be" | "utf32be" => EncodingName::Utf32Be,
        "utf-32le" | "utf32le" => EncodingName::Utf32Le,
        "ascii" | "us-ascii" => EncodingName::Ascii,
        "iso-8859-1" | "latin-1" | "latin1" | "l1" => EncodingName::Latin1,
        _ => return None,
    })
}

/// What to do with a byte sequence that isn't valid in the chosen
/// encoding, or a code point that has no representation in it.
///
/// Mirrors Python's `codecs` error-handling names, which `demjson.py`
/// passes straight through to `str.encode`/`bytes.decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail with an [`EncodingError`].
    #[default]
    Strict,
    /// Drop the offending byte(s)/character silently.
    Ignore,
    /// Substitute U+FFFD (decoding) or `?` (encoding).
    Replace,
    /// Substitute a `\xHH`/`\uHHHH`/`\UHHHHHHHH` backslash escape.
    BackslashReplace,
    /// Substitute an XML numeric character reference (`&#NNNN;`),
    /// encoding only.
    XmlCharRefReplace,
}

/// Detects the likely text encoding of a byte slice, per RFC 4627 §3: a
/// JSON document's first two bytes, when no BOM is present, reveal
/// whether alternating bytes are zero (indicating UTF-16/32 and which
/// half the ASCII content sits in), since the first character of any
/// top-level JSON value is always itself ASCII.
///
/// BOM-prefixed input is detected first and takes priority.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> EncodingName {
    if let Some(encoding) = detect_bom(bytes) {
        return encoding;
    }
    match bytes {
        [0, 0, 0, _, ..] => EncodingName::Utf32Be,
        [_, 0, 0, 0, ..] => EncodingName::Utf32Le,
        [0, _, 0, _, ..] => EncodingName::Utf16Be,
        [_, 0, _, 0, ..] => EncodingName::Utf16Le,
        _ => EncodingName::Utf8,
    }
}

/// The length, in bytes, of the byte-order mark [`detect_bom`] matched,
/// if any. Callers that need to strip the BOM before transcoding use this
/// alongside [`detect_bom`].
#[must_use]
pub fn bom_len(bytes: &[u8]) -> usize {
    match bytes {
        [0x00, 0x00, 0xFE, 0xFF, ..] | [0xFF, 0xFE, 0x00, 0x00, ..] => 4,
        [0xEF, 0xBB, 0xBF, ..] => 3,
        [0xFE, 0xFF, ..] | [0xFF, 0xFE, ..] => 2,
        _ => 0,
    }
}

fn detect_bom(bytes: &[u8]) -> Option<EncodingName> {
    match bytes {
        [0x00, 0x00, 0xFE, 0xFF, ..] => Some(EncodingName::Utf32Be),
        [0xFF, 0xFE, 0x00, 0x00, ..] => Some(EncodingName::Utf32Le),
        [0xEF, 0xBB, 0xBF, ..] => Some(EncodingName::Utf8),
        [0xFE, 0xFF, ..] => Some(EncodingName::Utf16Be),
        [0xFF, 0xFE, ..] => Some(EncodingName::Utf16Le),
        _ => None,
    }
}

/// Decodes `bytes` (with any leading BOM already stripped by the caller)
/// as `encoding` into a `String`, applying `policy` to any invalid
/// sequences encountered.
pub fn decode_bytes(
    bytes: &[u8],
    encoding: EncodingName,
    policy: ErrorPolicy,
) -> Result<String, EncodingError> {
    match encoding {
        EncodingName::Utf8 => decode_utf8(bytes, policy),
        EncodingName::Ascii => decode_ascii(bytes, policy),
        EncodingName::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        EncodingName::Utf16Be | EncodingName::Utf16Le => decode_utf16(bytes, encoding, policy),
        EncodingName::Utf32Be | EncodingName::Utf32Le => decode_utf32(bytes, encoding, policy),
    }
}

/// Encodes `text` as `encoding`, applying `policy` to any character with
/// no representation in the target encoding.
pub fn encode_bytes(
    text: &str,
    encoding: EncodingName,
    policy: ErrorPolicy,
) -> Result<Vec<u8>, EncodingError> {
    match encoding {
        EncodingName::Utf8 => Ok(text.as_bytes().to_vec()),
        EncodingName::Ascii => encode_ascii(text, policy),
        EncodingName::Latin1 => encode_latin1(text, policy),
        EncodingName::Utf16Be => Ok(encode_utf16(text, true)),
        EncodingName::Utf16Le => Ok(encode_utf16(text, false)),
        EncodingName::Utf32Be => Ok(encode_utf32(text, true)),
        EncodingName::Utf32Le => Ok(encode_utf32(text, false)),
    }
}

fn decode_utf8(bytes: &[u8], policy: ErrorPolicy) -> Result<String, EncodingError> {
    match bytes.to_str() {
        Ok(s) => Ok(s.to_owned()),
        Err(_) if policy == ErrorPolicy::Strict => {
            Err(EncodingError::new("invalid UTF-8 byte sequence"))
        }
        Err(_) => Ok(bytes.to_str_lossy().into_owned()),
    }
}

fn decode_ascii(bytes: &[u8], policy: ErrorPolicy) -> Result<String, EncodingError> {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if b < 0x80 {
            out.push(b as char);
        } else {
            apply_decode_error_policy(b as u32, policy, &mut out)?;
        }
    }
    Ok(out)
}

fn apply_decode_error_policy(
    byte: u32,
    policy: ErrorPolicy,
    out: &mut String,
) -> Result<(), EncodingError> {
    match policy {
        ErrorPolicy::Strict => Err(EncodingError::new(format!(
            "byte {byte:#x} is not representable in this encoding"
        ))),
        ErrorPolicy::Ignore => Ok(()),
        ErrorPolicy::Replace => {
            out.push('\u{FFFD}');
            Ok(())
        }
        ErrorPolicy::BackslashReplace => {
            out.push_str(&format!("\\x{byte:02x}"));
            Ok(())
        }
        ErrorPolicy::XmlCharRefReplace => {
            out.push_str(&format!("&#{byte};"));
            Ok(())
        }
    }
}

fn decode_utf16(
    bytes: &[u8],
    encoding: EncodingName,
    policy: ErrorPolicy,
) -> Result<String, EncodingError> {
    let big_endian = matches!(encoding, EncodingName::Utf16Be);
    if bytes.len() % 2 != 0 && policy == ErrorPolicy::Strict {
        return Err(EncodingError::new("UTF-16 input has an odd number of bytes"));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    match policy {
        ErrorPolicy::Strict => String::from_utf16(&units)
            .map_err(|_| EncodingError::new("invalid UTF-16 sequence (unpaired surrogate)")),
        _ => Ok(String::from_utf16_lossy(&units)),
    }
}

fn decode_utf32(
    bytes: &[u8],
    encoding: EncodingName,
    policy: ErrorPolicy,
) -> Result<String, EncodingError> {
    let big_endian = matches!(encoding, EncodingName::Utf32Be);
    if bytes.len() % 4 != 0 && policy == ErrorPolicy::Strict {
        return Err(EncodingError::new("UTF-32 input length is not a multiple of 4"));
    }
    let mut out = String::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        let n = if big_endian {
            u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        } else {
            u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        };
        match char::from_u32(n) {
            Some(c) => out.push(c),
            None => apply_decode_error_policy(n, policy, &mut out)?,
        }
    }
    Ok(out)
}

fn encode_ascii(text: &str, policy: ErrorPolicy) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c as u8);
        } else {
            apply_encode_error_policy(c, policy, &mut out)?;
        }
    }
    Ok(out)
}

fn encode_latin1(text: &str, policy: ErrorPolicy) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let n = c as u32;
        if n <= 0xFF {
            out.push(n as u8);
        } else {
            apply_encode_error_policy(c, policy, &mut out)?;
        }
    }
    Ok(out)
}

fn apply_encode_error_policy(
    c: char,
    policy: ErrorPolicy,
    out: &mut Vec<u8>,
) -> Result<(), EncodingError> {
    match policy {
        ErrorPolicy::Strict => Err(EncodingError::new(format!(
            "character {c:?} is not representable in this encoding"
        ))),
        ErrorPolicy::Ignore => Ok(()),
        ErrorPolicy::Replace => {
            out.push(b'?');
            Ok(())
        }
        ErrorPolicy::BackslashReplace => {
            out.extend_from_slice(format!("\\u{:04x}", c as u32).as_bytes());
            Ok(())
        }
        ErrorPolicy::XmlCharRefReplace => {
            out.extend_from_slice(format!("&#{};", c as u32).as_bytes());
            Ok(())
        }
    }
}

fn encode_utf16(text: &str, big_endian: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        let bytes = if big_endian { unit.to_be_bytes() } else { unit.to_le_bytes() };
        out.extend_from_slice(&bytes);
    }
    out
}

fn encode_utf32(text: &str, big_endian: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 4);
    for c in text.chars() {
        let n = c as u32;
        let bytes = if big_endian { n.to_be_bytes() } else { n.to_le_bytes() };
        out.extend_from_slice(&bytes);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_aliases() {
        assert_eq!(lookup("UTF8"), Some(EncodingName::Utf8));
        assert_eq!(lookup("latin_1"), Some(EncodingName::Latin1));
        assert_eq!(lookup("nonsense"), None);
    }

    #[test]
    fn detect_bom_takes_priority_over_heuristic() {
        let bytes = [0xEF, 0xBB, 0xBF, b'"', b'a', b'"'];
        assert_eq!(detect_encoding(&bytes), EncodingName::Utf8);
        assert_eq!(bom_len(&bytes), 3);
    }

    #[test]
    fn detect_heuristic_without_bom() {
        // '"' == 0x22, followed by a second ASCII byte: UTF-8/ASCII shape.
        assert_eq!(detect_encoding(b"\"a\"123"), EncodingName::Utf8);
        // UTF-16BE: every other byte zero, first nonzero byte leads.
        assert_eq!(detect_encoding(&[0x00, b'"', 0x00, b'a']), EncodingName::Utf16Be);
        assert_eq!(detect_encoding(&[b'"', 0x00, b'a', 0x00]), EncodingName::Utf16Le);
    }

    #[test]
    fn utf32_roundtrip_both_endiannesses() {
        let text = "hi \u{1F600}";
        for (encoding, big_endian) in [
            (EncodingName::Utf32Be, true),
            (EncodingName::Utf32Le, false),
        ] {
            let bytes = encode_utf32(text, big_endian);
            let decoded = decode_utf32(&bytes, encoding, ErrorPolicy::Strict).unwrap();
            assert_eq!(decoded, text);
        }
    }

    #[test]
    fn ascii_strict_rejects_non_ascii() {
        assert!(encode_bytes("café", EncodingName::Ascii, ErrorPolicy::Strict).is_err());
        let replaced = encode_bytes("café", EncodingName::Ascii, ErrorPolicy::Replace).unwrap();
        assert_eq!(replaced, b"caf?");
    }
}
