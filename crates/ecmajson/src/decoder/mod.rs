//! The recursive-descent decoder: turns a character sequence into a
//! [`Value`] tree.
//!
//! Unlike the teacher crate's incremental, zero-copy streaming parser
//! (`crates/jsonmodem/src/parser/mod.rs`), this decoder materializes the
//! whole input as `Vec<char>` and walks it with simple lookahead — the
//! non-streaming, full-document parse this crate's scope calls for. The
//! module split (`number`, `string`, `composite`) mirrors the teacher's
//! practice of giving each grammar production its own file.

mod composite;
mod number;
mod string;

use crate::error::{DecodeError, Error, HookError};
use crate::hooks::{HookOutcome, Hooks};
use crate::options::{Behavior, DecodeOptions};
use crate::value::Value;

pub(crate) struct Decoder<'a> {
    chars: Vec<char>,
    pos: usize,
    options: &'a DecodeOptions,
    hooks: Option<&'a Hooks>,
}

/// Parses `text` into a [`Value`] under `options`, invoking `hooks` (if
/// any) at each applicable extension point.
pub(crate) fn decode_value(
    text: &str,
    options: &DecodeOptions,
    hooks: Option<&Hooks>,
) -> Result<Value, Error> {
    let mut decoder = Decoder::new(text, options, hooks);
    decoder.skip_ws_and_comments()?;
    if decoder.peek().is_none() {
        return Err(decoder.error("no value found (empty input)").into());
    }
    let value = decoder.parse_value()?;
    decoder.skip_ws_and_comments()?;
    if let Some(c) = decoder.peek() {
        return Err(decoder
            .error(format!("unexpected trailing character {c:?} after value"))
            .into());
    }
    if !decoder.options.behaviors.is_allowed(Behavior::AnyTypeAtStart)
        && !matches!(value, Value::Array(_) | Value::Object(_))
    {
        return Err(decoder
            .error_at(0, "top-level value must be an array or object in strict mode")
            .into());
    }
    Ok(value)
}

impl<'a> Decoder<'a> {
    fn new(text: &str, options: &'a DecodeOptions, hooks: Option<&'a Hooks>) -> Self {
        let mut chars: Vec<char> = text.chars().collect();
        if options.behaviors.is_allowed(Behavior::UnicodeFormatControlChars) {
            chars.retain(|c| !crate::helpers::is_format_control_char(*c));
        }
        Self {
            chars,
            pos: 0,
            options,
            hooks,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, expected: char) -> Result<(), DecodeError> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected {expected:?}, found {c:?}"))),
            None => Err(self.error(format!("expected {expected:?}, found end of input"))),
        }
    }

    fn error(&self, message: impl Into<String>) -> DecodeError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> DecodeError {
        DecodeError::new(message, &self.chars, offset)
    }

    fn allow(&self, behavior: Behavior) -> bool {
        self.options.behaviors.is_allowed(behavior)
    }

    fn skip_ws_and_comments(&mut self) -> Result<(), DecodeError> {
        loop {
            let before = self.pos;
            self.skip_whitespace();
            if self.allow(Behavior::Comments) {
                self.skip_comment()?;
            }
            if self.pos == before {
                break;
            }
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        let unicode_ws = self.allow(Behavior::UnicodeWhitespace);
        while let Some(c) = self.peek() {
            let is_ws = if unicode_ws {
                crate::helpers::is_unicode_whitespace(c)
            } else {
                crate::helpers::is_json_whitespace(c)
            };
            if is_ws {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), DecodeError> {
        if self.peek() == Some('/') && self.peek_at(1) == Some('/') {
            self.pos += 2;
            while let Some(c) = self.peek() {
                if crate::helpers::is_unicode_line_terminator(c) {
                    break;
                }
                self.pos += 1;
            }
        } else if self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            self.pos += 2;
            loop {
                match (self.peek(), self.peek_at(1)) {
                    (Some('*'), Some('/')) => {
                        self.pos += 2;
                        break;
                    }
                    (Some(_), _) => self.pos += 1,
                    (None, _) => return Err(self.error("unterminated block comment")),
                }
            }
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        let start = self.pos;
        let value = match self.peek() {
            Some('"') => Value::String(self.parse_json_string()?),
            Some('\'') if self.allow(Behavior::SingleQuotedStrings) => {
                Value::String(self.parse_single_quoted_string()?)
            }
            Some('[') => self.parse_array()?,
            Some('{') => self.parse_object()?,
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() || c == '.' => self.parse_number()?,
            Some(c) if crate::helpers::is_identifier_start(c) => self.parse_keyword_or_nan()?,
            Some(c) => return Err(self.error_at(start, format!("unexpected character {c:?}")).into()),
            None => return Err(self.error_at(start, "unexpected end of input").into()),
        };
        self.run_post_decode_hooks(value)
    }

    fn run_post_decode_hooks(&mut self, value: Value) -> Result<Value, Error> {
        let Some(hooks) = self.hooks else {
            return Ok(value);
        };
        let (hook_name, outcome) = match &value {
            Value::String(s) => (
                "decode_string",
                hooks.decode_string.as_ref().map(|hook| hook(s)),
            ),
            Value::Array(items) => (
                "decode_array",
                hooks.decode_array.as_ref().map(|hook| hook(items)),
            ),
            Value::Object(object) => (
                "decode_object",
                hooks.decode_object.as_ref().map(|hook| hook(object)),
            ),
            _ => ("", None),
        };
        match outcome {
            None => Ok(value),
            Some(HookOutcome::Keep | HookOutcome::Skip) => Ok(value),
            Some(HookOutcome::Replace(new_value)) => Ok(new_value),
            Some(HookOutcome::Fail(source)) => Err(Error::Hook(HookError::new(
                hook_name,
                value.kind_name(),
                source,
            ))),
        }
    }

    fn parse_keyword_or_nan(&mut self) -> Result<Value, DecodeError> {
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
        match ident.as_str() {
            "null" => Ok(Value::Null),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "undefined" if self.allow(Behavior::UndefinedValues) => Ok(Value::Undefined),
            "NaN" if self.allow(Behavior::NonNumbers) => Ok(Value::Float(f64::NAN)),
            "Infinity" if self.allow(Behavior::NonNumbers) => Ok(Value::Float(f64::INFINITY)),
            _ => Err(self.error_at(start, format!("unrecognized literal {ident:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DecodeOptions;

    fn decode(text: &str, options: &DecodeOptions) -> Result<Value, Error> {
        decode_value(text, options, None)
    }

    #[test]
    fn decodes_simple_literals() {
        assert_eq!(decode("null", &DecodeOptions::strict()).unwrap(), Value::Null);
        assert_eq!(decode("true", &DecodeOptions::strict()).unwrap(), Value::Bool(true));
        assert_eq!(decode("false", &DecodeOptions::strict()).unwrap(), Value::Bool(false));
    }

    #[test]
    fn strict_mode_rejects_undefined() {
        assert!(decode("undefined", &DecodeOptions::strict()).is_err());
        assert_eq!(
            decode("undefined", &DecodeOptions::non_strict()).unwrap(),
            Value::Undefined
        );
    }

    #[test]
    fn strict_mode_rejects_nan_and_infinity() {
        assert!(decode("NaN", &DecodeOptions::strict()).is_err());
        let v = decode("NaN", &DecodeOptions::non_strict()).unwrap();
        assert!(matches!(v, Value::Float(f) if f.is_nan()));
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        assert!(decode("null null", &DecodeOptions::strict()).is_err());
    }

    #[test]
    fn comments_require_behavior() {
        assert!(decode("/* hi */ null", &DecodeOptions::strict()).is_err());
        assert_eq!(
            decode("/* hi */ null // trailing\n", &DecodeOptions::non_strict()).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn strict_top_level_scalar_is_allowed_by_default() {
        // any_type_at_start defaults to allowed even in strict mode.
        assert_eq!(decode("42", &DecodeOptions::strict()).unwrap(), Value::from(42i64));
    }

    #[test]
    fn unicode_format_control_chars_are_stripped_before_lexing() {
        let input = "\"a\u{200B}b\"";
        assert_eq!(decode(input, &DecodeOptions::strict()).unwrap(), Value::from("a\u{200B}b"));
        assert_eq!(decode(input, &DecodeOptions::non_strict()).unwrap(), Value::from("ab"));
    }
}
