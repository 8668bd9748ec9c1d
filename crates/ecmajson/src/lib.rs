//! A JSON encoder/decoder with configurable RFC 7158 / ECMAScript
//! strictness, hook-based extension points, and a built-in Unicode
//! transcoding layer.
//!
//! The crate is organized the way the original decomposition calls for:
//! a strictness controller ([`options`]), a Unicode/codec layer
//! ([`codec`]), a decoder ([`decoder`]), an encoder ([`encoder`]), and a
//! hook dispatch system ([`hooks`]) sitting across both. [`decode`]/
//! [`decode_bytes`] and [`encode`]/[`encode_bytes`] are the entry points;
//! [`decode_with_hooks`]/[`encode_with_hooks`] are their hook-aware
//! counterparts.

mod codec;
mod decoder;
mod encoder;
mod error;
mod helpers;
mod hooks;
mod options;
mod value;

pub use codec::{EncodingName, ErrorPolicy};
pub use error::{DecodeError, EncodeError, EncodingError, Error, HookError};
pub use hooks::{HookOutcome, Hooks};
pub use options::{Behavior, Behaviors, DecodeOptions, EncodeOptions};
pub use value::{Key, Object, Value};

/// Decodes `text` into a [`Value`] under `options`.
pub fn decode(text: &str, options: &DecodeOptions) -> Result<Value, Error> {
    decoder::decode_value(text, options, None).map_err(Error::from)
}

/// Decodes `text` into a [`Value`] under `options`, invoking `hooks` at
/// each applicable extension point.
pub fn decode_with_hooks(
    text: &str,
    options: &DecodeOptions,
    hooks: &Hooks,
) -> Result<Value, Error> {
    decoder::decode_value(text, options, Some(hooks)).map_err(Error::from)
}

/// Decodes a byte sequence into a [`Value`].
///
/// If `options.encoding` is `None`, the input's text encoding is detected
/// per RFC 4627 §3 ([`codec::detect_encoding`]), after which a short
/// sanity check ("does this look like plausible decoded text, or
/// gibberish from a wrong encoding guess?") runs on the first couple of
/// decoded characters, the same safety net `demjson.py`'s top-level
/// `decode()` applies after `auto_unicode_decode`.
pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Value, Error> {
    let text = decode_bytes_to_string(bytes, options)?;
    decode(&text, options)
}

/// Decodes a byte sequence into a [`Value`], invoking `hooks` at each
/// applicable extension point. See [`decode_bytes`] for the encoding
/// detection behavior.
pub fn decode_bytes_with_hooks(
    bytes: &[u8],
    options: &DecodeOptions,
    hooks: &Hooks,
) -> Result<Value, Error> {
    let text = decode_bytes_to_string(bytes, options)?;
    decode_with_hooks(&text, options, hooks)
}

fn decode_bytes_to_string(bytes: &[u8], options: &DecodeOptions) -> Result<String, Error> {
    let encoding = options.encoding.unwrap_or_else(|| codec::detect_encoding(bytes));
    let content = &bytes[codec::bom_len(bytes)..];
    let text = codec::decode_bytes(content, encoding, ErrorPolicy::Strict)?;
    check_not_gibberish(&text)?;
    Ok(text)
}

/// A minimal sanity check that the first couple of non-whitespace
/// characters look like the start of a plausible JSON/ECMAScript document
/// rather than mojibake produced by guessing the wrong encoding: the
/// first meaningful character of any valid top-level value is one of a
/// small closed set (`{[\"'`, a sign, a digit, or an identifier-starting
/// letter).
fn check_not_gibberish(text: &str) -> Result<(), Error> {
    let Some(first) = text.chars().find(|c| !helpers::is_unicode_whitespace(*c)) else {
        return Ok(());
    };
    let plausible = matches!(first, '{' | '[' | '"' | '\'' | '-' | '+' | '.')
        || first.is_ascii_digit()
        || helpers::is_identifier_start(first);
    if plausible {
        Ok(())
    } else {
        Err(Error::Encoding(EncodingError::new(
            "decoded text does not look like JSON; the wrong encoding may have been guessed",
        )))
    }
}

/// Serializes `value` to text under `options`.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String, Error> {
    encoder::encode_value(value, options, None).map_err(Error::from)
}

/// Serializes `value` to text under `options`, invoking `hooks` at each
/// applicable extension point.
pub fn encode_with_hooks(
    value: &Value,
    options: &EncodeOptions,
    hooks: &Hooks,
) -> Result<String, Error> {
    encoder::encode_value(value, options, Some(hooks)).map_err(Error::from)
}

/// Serializes `value` to a byte sequence in `options.encoding`.
pub fn encode_bytes(value: &Value, options: &EncodeOptions) -> Result<Vec<u8>, Error> {
    let text = encode(value, options)?;
    Ok(codec::encode_bytes(&text, options.encoding, ErrorPolicy::Strict)?)
}

/// Serializes `value` to a byte sequence in `options.encoding`, invoking
/// `hooks` at each applicable extension point.
pub fn encode_bytes_with_hooks(
    value: &Value,
    options: &EncodeOptions,
    hooks: &Hooks,
) -> Result<Vec<u8>, Error> {
    let text = encode_with_hooks(value, options, hooks)?;
    Ok(codec::encode_bytes(&text, options.encoding, ErrorPolicy::Strict)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_then_encode_roundtrips_an_object() {
        let text = r#"{"a": 1, "b": [true, null, "x"]}"#;
        let value = decode(text, &DecodeOptions::strict()).unwrap();
        let encoded = encode(&value, &EncodeOptions::strict().compactly(true)).unwrap();
        let reparsed = decode(&encoded, &DecodeOptions::strict()).unwrap();
        assert_eq!(value, reparsed);
    }

    #[test]
    fn decode_bytes_detects_utf16be_via_bom() {
        let text = "[1]";
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let value = decode_bytes(&bytes, &DecodeOptions::strict()).unwrap();
        assert_eq!(value, Value::Array(vec![Value::from(1i64)]));
    }

    #[test]
    fn encode_bytes_roundtrips_through_utf32le() {
        let value = Value::from("héllo");
        let options = EncodeOptions::strict().with_encoding(EncodingName::Utf32Le);
        let bytes = encode_bytes(&value, &options).unwrap();
        let decoded = decode_bytes(
            &bytes,
            &DecodeOptions::strict().with_encoding(EncodingName::Utf32Le),
        )
        .unwrap();
        assert_eq!(decoded, value);
    }
}
