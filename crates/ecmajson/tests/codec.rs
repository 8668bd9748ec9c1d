//! Byte-level encoding detection and transcoding, including the
//! `serde_json`-as-oracle comparison for the common UTF-8 path.

use ecmajson::{decode_bytes, encode_bytes, DecodeOptions, EncodeOptions, EncodingName, Value};

#[test]
fn plain_utf8_bytes_decode_without_bom() {
    let value = decode_bytes(br#"{"ok":true}"#, &DecodeOptions::strict()).unwrap();
    assert_eq!(value, decode_bytes_via_oracle(r#"{"ok":true}"#));
}

#[test]
fn utf8_bom_is_stripped_before_decoding() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(br#"["x"]"#);
    let value = decode_bytes(&bytes, &DecodeOptions::strict()).unwrap();
    assert_eq!(value, Value::Array(vec![Value::from("x")]));
}

#[test]
fn utf32_be_without_bom_is_detected_by_heuristic() {
    let text = "[true]";
    let mut bytes = Vec::new();
    for c in text.chars() {
        bytes.extend_from_slice(&(c as u32).to_be_bytes());
    }
    let value = decode_bytes(&bytes, &DecodeOptions::strict()).unwrap();
    assert_eq!(value, Value::Array(vec![Value::from(true)]));
}

#[test]
fn encode_bytes_then_decode_bytes_roundtrips_latin1() {
    let value = Value::from("café");
    let options_enc = EncodeOptions::strict().with_encoding(EncodingName::Latin1);
    let bytes = encode_bytes(&value, &options_enc).unwrap();
    let options_dec = DecodeOptions::strict().with_encoding(EncodingName::Latin1);
    let decoded = decode_bytes(&bytes, &options_dec).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn garbage_bytes_that_guess_wrong_are_rejected() {
    // Four NUL bytes decode to U+0000 repeated, which is not a plausible
    // JSON document start and should trip the post-decode sanity check.
    let bytes = [0u8, 0, 0, 0];
    assert!(decode_bytes(&bytes, &DecodeOptions::strict()).is_err());
}

fn decode_bytes_via_oracle(text: &str) -> Value {
    let oracle: serde_json::Value = serde_json::from_str(text).unwrap();
    from_serde_json(&oracle)
}

fn from_serde_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else {
                Value::from(n.as_f64().unwrap())
            }
        }
        serde_json::Value::String(s) => Value::from(s.as_str()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(from_serde_json).collect()),
        serde_json::Value::Object(map) => {
            let mut object = ecmajson::Object::new();
            for (k, v) in map {
                object.insert(k.as_str().into(), from_serde_json(v));
            }
            Value::Object(object)
        }
    }
}
