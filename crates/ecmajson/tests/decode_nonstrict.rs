//! Table-driven non-strict (ECMAScript-superset) decode cases, covering
//! each permissive behavior individually.

use ecmajson::{decode, Behavior, DecodeOptions, Value};
use rstest::rstest;

#[rstest]
#[case("undefined", Value::Undefined)]
#[case("NaN", Value::Float(f64::NAN))]
#[case("{a:1}", Value::Object({
    let mut o = ecmajson::Object::new();
    o.insert("a".into(), Value::from(1i64));
    o
}))]
#[case("{'a':1}", Value::Object({
    let mut o = ecmajson::Object::new();
    o.insert("a".into(), Value::from(1i64));
    o
}))]
#[case("'hi'", Value::from("hi"))]
#[case("[1,2,]", Value::Array(vec![Value::from(1i64), Value::from(2i64)]))]
#[case("[1,,2]", Value::Array(vec![Value::from(1i64), Value::Undefined, Value::from(2i64)]))]
fn decodes_permissive_constructs(#[case] input: &str, #[case] expected: Value) {
    let value = decode(input, &DecodeOptions::non_strict()).unwrap();
    match (&value, &expected) {
        (Value::Float(a), Value::Float(b)) if a.is_nan() && b.is_nan() => {}
        _ => assert_eq!(value, expected),
    }
}

#[test]
fn octal_numbers_stay_disallowed_even_non_strict() {
    assert!(decode("017", &DecodeOptions::non_strict()).is_err());
}

#[test]
fn numeric_object_keys_round_trip_as_numbers() {
    let value = decode("{1: \"a\", 2.5: \"b\"}", &DecodeOptions::non_strict()).unwrap();
    let object = value.as_object().unwrap();
    let (key, val) = object.iter().next().unwrap();
    assert!(matches!(key, ecmajson::Key::Int(_)));
    assert_eq!(val, &Value::from("a"));
}

#[test]
fn explicitly_preventing_a_behavior_overrides_non_strict_default() {
    let options = DecodeOptions::non_strict()
        .with_behaviors(DecodeOptions::non_strict().behaviors.prevent(Behavior::TrailingCommaInLiteral));
    assert!(decode("[1,]", &options).is_err());
}

#[test]
fn comments_are_skipped() {
    let text = "// leading comment\n[1, /* inline */ 2]";
    let value = decode(text, &DecodeOptions::non_strict()).unwrap();
    assert_eq!(value, Value::Array(vec![Value::from(1i64), Value::from(2i64)]));
}
