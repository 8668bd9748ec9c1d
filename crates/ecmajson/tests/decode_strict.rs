//! Table-driven strict RFC 7158 decode cases.

use ecmajson::{decode, DecodeOptions, Value};
use rstest::rstest;

#[rstest]
#[case("null", Value::Null)]
#[case("true", Value::Bool(true))]
#[case("false", Value::Bool(false))]
#[case("0", Value::from(0i64))]
#[case("-17", Value::from(-17i64))]
#[case(r#""hello""#, Value::from("hello"))]
#[case("[]", Value::Array(vec![]))]
#[case("[1,2,3]", Value::Array(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]))]
fn decodes_valid_strict_json(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(input, &DecodeOptions::strict()).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("{")]
#[case("[1,2,]")]
#[case("{'a':1}")]
#[case("{a:1}")]
#[case("undefined")]
#[case("NaN")]
#[case("/* comment */ 1")]
#[case("01")]
#[case("0x1")]
#[case("[1,,2]")]
fn rejects_non_strict_constructs(#[case] input: &str) {
    assert!(decode(input, &DecodeOptions::strict()).is_err());
}

#[test]
fn nested_document_decodes_correctly() {
    let text = r#"{"name": "ecmajson", "tags": ["json", "parser"], "stable": true, "extra": null}"#;
    let value = decode(text, &DecodeOptions::strict()).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.get_str("name"), Some(&Value::from("ecmajson")));
    assert_eq!(object.get_str("stable"), Some(&Value::from(true)));
    assert_eq!(object.get_str("extra"), Some(&Value::Null));
    let tags = object.get_str("tags").unwrap().as_array().unwrap();
    assert_eq!(tags, &[Value::from("json"), Value::from("parser")]);
}

#[test]
fn deeply_nested_arrays_decode_without_overflow() {
    let depth = 200;
    let text = format!("{}{}{}", "[".repeat(depth), "0", "]".repeat(depth));
    assert!(decode(&text, &DecodeOptions::strict()).is_ok());
}
