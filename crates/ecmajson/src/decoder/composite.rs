//! Array and object literal parsing: elision, trailing commas, and the
//! several key spellings non-strict mode accepts.
//!
//! Grounded on `demjson.py`'s `decode_composite`, which parses both arrays
//! and objects in one state machine driven by the opening delimiter; this
//! split keeps that shared structure (comma/closer handling, trailing-
//! comma and elision rules) but as two focused methods instead of one
//! flag-driven one, which reads more naturally in Rust's match-heavy
//! style.

use super::Decoder;
use crate::error::Error;
use crate::options::Behavior;
use crate::value::{Key, Object, Value};

impl<'a> Decoder<'a> {
    pub(super) fn parse_array(&mut self) -> Result<Value, Error> {
        let start = self.pos;
        self.expect('[')?;
        let mut items = Vec::new();
        self.skip_ws_and_comments()?;
        if self.peek() == Some(']') {
            self.pos += 1;
            return Ok(Value::Array(items));
        }
        loop {
            self.skip_ws_and_comments()?;
            if self.peek() == Some(',') {
                if !self.allow(Behavior::OmittedArrayElements) {
                    return Err(self.error("elided array element is not allowed").into());
                }
                items.push(self.elided_array_element());
                self.pos += 1;
                continue;
            }
            if self.peek() == Some(']') {
                if !self.allow(Behavior::TrailingCommaInLiteral) {
                    return Err(self.error("trailing comma is not allowed").into());
                }
                break;
            }
            items.push(self.parse_value()?);
            self.skip_ws_and_comments()?;
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some(']') => break,
                Some(c) => return Err(self.error(format!("expected ',' or ']', found {c:?}")).into()),
                None => return Err(self.error_at(start, "unterminated array").into()),
            }
        }
        self.expect(']')?;
        Ok(Value::Array(items))
    }

    /// The value an elided array slot (`[1,,3]`) decodes as: `undefined`
    /// if that's allowed, `null` otherwise (`demjson.py`'s
    /// `decode_composite`, which appends `None` instead of `undefined`
    /// when `_allow_undefined_values` is off).
    fn elided_array_element(&self) -> Value {
        if self.allow(Behavior::UndefinedValues) {
            Value::Undefined
        } else {
            Value::Null
        }
    }

    pub(super) fn parse_object(&mut self) -> Result<Value, Error> {
        let start = self.pos;
        self.expect('{')?;
        let mut object = Object::new();
        self.skip_ws_and_comments()?;
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Value::Object(object));
        }
        loop {
            self.skip_ws_and_comments()?;
            if self.peek() == Some('}') {
                if !self.allow(Behavior::TrailingCommaInLiteral) {
                    return Err(self.error("trailing comma is not allowed").into());
                }
                break;
            }
            let key = self.parse_object_key()?;
            self.skip_ws_and_comments()?;
            self.expect(':')?;
            self.skip_ws_and_comments()?;
            let value = self.parse_value()?;
            object.insert(key, value);
            self.skip_ws_and_comments()?;
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some('}') => break,
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found {c:?}")).into()),
                None => return Err(self.error_at(start, "unterminated object").into()),
            }
        }
        self.expect('}')?;
        Ok(Value::Object(object))
    }

    fn parse_object_key(&mut self) -> Result<Key, Error> {
        match self.peek() {
            Some('"') => Ok(Key::String(self.parse_json_string()?)),
            Some('\'') if self.allow(Behavior::SingleQuotedStrings) => {
                Ok(Key::String(self.parse_single_quoted_string()?))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => {
                if !self.allow(Behavior::NonstringKeys) {
                    return Err(self.error("numeric object keys are not allowed").into());
                }
                match self.parse_number()? {
                    Value::Int(n) => Ok(Key::Int(n)),
                    Value::Float(n) => Ok(Key::Float(n)),
                    Value::Decimal(n) => Ok(Key::Float(
                        num_traits::ToPrimitive::to_f64(&n).unwrap_or(f64::NAN),
                    )),
                    _ => unreachable!("parse_number only returns numeric values"),
                }
            }
            Some(c) if crate::helpers::is_identifier_start(c) => {
                if !self.allow(Behavior::NonstringKeys) {
                    return Err(self.error("unquoted identifier keys are not allowed").into());
                }
                let start = self.pos;
                let mut ident = String::new();
                while let Some(c) = self.peek() {
                    if crate::helpers::is_identifier_continue(c) {
                        ident.push(c);
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                if ident.is_empty() {
                    return Err(self.error_at(start, "expected an object key").into());
                }
                Ok(Key::String(ident))
            }
            Some(c) => Err(self
                .error(format!("unexpected character {c:?} where an object key was expected"))
                .into()),
            None => Err(self
                .error("unexpected end of input where an object key was expected")
                .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::options::DecodeOptions;
    use crate::value::Value;

    fn decode(text: &str, options: &DecodeOptions) -> Result<Value, crate::error::Error> {
        super::super::decode_value(text, options, None)
    }

    #[test]
    fn empty_array_and_object() {
        assert_eq!(decode("[]", &DecodeOptions::strict()).unwrap(), Value::Array(vec![]));
        assert_eq!(
            decode("{}", &DecodeOptions::strict()).unwrap(),
            Value::Object(crate::value::Object::new())
        );
    }

    #[test]
    fn trailing_comma_requires_behavior() {
        assert!(decode("[1,2,]", &DecodeOptions::strict()).is_err());
        assert!(decode("[1,2,]", &DecodeOptions::non_strict()).is_ok());
        assert!(decode("{\"a\":1,}", &DecodeOptions::strict()).is_err());
        assert!(decode("{\"a\":1,}", &DecodeOptions::non_strict()).is_ok());
    }

    #[test]
    fn elided_array_elements_require_behavior() {
        assert!(decode("[1,,3]", &DecodeOptions::strict()).is_err());
        let v = decode("[1,,3]", &DecodeOptions::non_strict()).unwrap();
        assert_eq!(v.as_array().unwrap()[1], Value::Undefined);
    }

    #[test]
    fn elided_array_elements_fall_back_to_null_without_undefined_values() {
        use crate::options::Behavior;
        let allowing_elision_only = DecodeOptions::non_strict().with_behaviors(
            DecodeOptions::non_strict()
                .behaviors
                .prevent(Behavior::UndefinedValues),
        );
        let v = decode("[1,,3]", &allowing_elision_only).unwrap();
        assert_eq!(v.as_array().unwrap()[1], Value::Null);
    }

    #[test]
    fn identifier_and_numeric_keys_require_behavior() {
        assert!(decode("{foo: 1}", &DecodeOptions::strict()).is_err());
        assert!(decode("{foo: 1}", &DecodeOptions::non_strict()).is_ok());
        assert!(decode("{1: \"a\"}", &DecodeOptions::strict()).is_err());
        assert!(decode("{1: \"a\"}", &DecodeOptions::non_strict()).is_ok());
    }

    #[test]
    fn duplicate_keys_overwrite_in_place() {
        let v = decode("{\"a\":1,\"b\":2,\"a\":3}", &DecodeOptions::strict()).unwrap();
        let object = v.as_object().unwrap();
        assert_eq!(object.get_str("a"), Some(&Value::from(3i64)));
        let keys: Vec<_> = object.iter().map(|(k, _)| k.as_text()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
