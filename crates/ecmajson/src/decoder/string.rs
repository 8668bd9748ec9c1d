//! String literal parsing: quoting, escape sequences, and surrogate pair
//! handling.
//!
//! Escape handling follows `demjson.py`'s `decode_string`, which keeps two
//! escape tables (`_escapes_json` and the wider `_escapes_js`) and selects
//! between them based on whether JavaScript-only escapes are allowed.

use crate::error::DecodeError;
use crate::helpers;
use crate::options::Behavior;

use super::Decoder;

impl<'a> Decoder<'a> {
    pub(super) fn parse_json_string(&mut self) -> Result<String, DecodeError> {
        self.parse_quoted_string('"')
    }

    pub(super) fn parse_single_quoted_string(&mut self) -> Result<String, DecodeError> {
        self.parse_quoted_string('\'')
    }

    fn parse_quoted_string(&mut self, quote: char) -> Result<String, DecodeError> {
        let start = self.pos;
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.advance() {
                None => return Err(self.error_at(start, "unterminated string literal")),
                Some(c) if c == quote => break,
                Some('\\') => self.parse_escape(&mut out, start)?,
                Some(c) if helpers::is_unicode_line_terminator(c) => {
                    return Err(self.error_at(self.pos - 1, "unescaped line terminator in string"));
                }
                Some(c) if (c as u32) <= 0x1F && !self.allow(Behavior::ControlCharInString) => {
                    return Err(self.error_at(self.pos - 1, format!("raw control character {:?} in string", c)));
                }
                Some(c) => out.push(c),
            }
        }
        Ok(out)
    }

    fn parse_escape(&mut self, out: &mut String, string_start: usize) -> Result<(), DecodeError> {
        let escape_start = self.pos - 1;
        match self.advance() {
            None => Err(self.error_at(string_start, "unterminated escape sequence")),
            Some('"') => {
                out.push('"');
                Ok(())
            }
            Some('\'') => {
                out.push('\'');
                Ok(())
            }
            Some('\\') => {
                out.push('\\');
                Ok(())
            }
            Some('/') => {
                out.push('/');
                Ok(())
            }
            Some('b') => {
                out.push('\u{08}');
                Ok(())
            }
            Some('f') => {
                out.push('\u{0C}');
                Ok(())
            }
            Some('n') => {
                out.push('\n');
                Ok(())
            }
            Some('r') => {
                out.push('\r');
                Ok(())
            }
            Some('t') => {
                out.push('\t');
                Ok(())
            }
            Some('u') => self.parse_unicode_escape(out, escape_start),
            Some('v') if self.allow(Behavior::JsStringEscapes) => {
                out.push('\u{0B}');
                Ok(())
            }
            Some('x') if self.allow(Behavior::JsStringEscapes) => {
                self.parse_hex_byte_escape(out, escape_start)
            }
            Some(c @ '0'..='7') if self.allow(Behavior::OctalNumbers) => {
                self.parse_octal_escape(out, c)
            }
            Some(c) if helpers::is_unicode_line_terminator(c) && self.allow(Behavior::NonescapeCharacters) => {
                if c == '\r' && self.peek() == Some('\n') {
                    self.pos += 1;
                }
                Ok(())
            }
            Some(c) if self.allow(Behavior::NonescapeCharacters) => {
                out.push(c);
                Ok(())
            }
            Some(c) => Err(self.error_at(escape_start, format!("invalid escape sequence \\{c}"))),
        }
    }

    fn parse_unicode_escape(&mut self, out: &mut String, escape_start: usize) -> Result<(), DecodeError> {
        let high = self.read_hex4(escape_start)?;
        if (0xD800..=0xDBFF).contains(&high) && self.peek() == Some('\\') && self.peek_at(1) == Some('u') {
            let checkpoint = self.pos;
            self.pos += 2;
            let low = self.read_hex4(escape_start)?;
            if let Some(combined) = helpers::surrogate_pair_to_scalar(high, low) {
                out.push(combined);
                return Ok(());
            }
            self.pos = checkpoint;
        }
        match char::from_u32(high) {
            Some(c) => {
                out.push(c);
                Ok(())
            }
            None if self.allow(Behavior::NonescapeCharacters) => {
                out.push('\u{FFFD}');
                Ok(())
            }
            None => Err(self.error_at(escape_start, format!("lone surrogate \\u{high:04x}"))),
        }
    }

    fn read_hex4(&mut self, escape_start: usize) -> Result<u32, DecodeError> {
        let digits_start = self.pos;
        for _ in 0..4 {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => self.pos += 1,
                _ => {
                    return Err(self.error_at(escape_start, "invalid \\u escape: expected 4 hex digits"));
                }
            }
        }
        let digits: String = self.chars[digits_start..self.pos].iter().collect();
        helpers::decode_hex(&digits).ok_or_else(|| self.error_at(escape_start, "invalid \\u escape"))
    }

    fn parse_hex_byte_escape(&mut self, out: &mut String, escape_start: usize) -> Result<(), DecodeError> {
        let digits_start = self.pos;
        for _ in 0..2 {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => self.pos += 1,
                _ => return Err(self.error_at(escape_start, "invalid \\x escape: expected 2 hex digits")),
            }
        }
        let digits: String = self.chars[digits_start..self.pos].iter().collect();
        let n = helpers::decode_hex(&digits).ok_or_else(|| self.error_at(escape_start, "invalid \\x escape"))?;
        out.push(char::from_u32(n).unwrap_or('\u{FFFD}'));
        Ok(())
    }

    fn parse_octal_escape(&mut self, out: &mut String, first: char) -> Result<(), DecodeError> {
        let mut digits = String::new();
        digits.push(first);
        for _ in 0..2 {
            match self.peek() {
                Some(c @ '0'..='7') => {
                    digits.push(c);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let n = helpers::decode_octal(&digits).unwrap_or(0);
        out.push(char::from_u32(n).unwrap_or('\u{FFFD}'));
        Ok(())
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
    fn basic_escapes() {
        let v = decode(r#""a\nb\tc\"d""#, &DecodeOptions::strict()).unwrap();
        assert_eq!(v, Value::from("a\nb\tc\"d"));
    }

    #[test]
    fn unicode_escape_and_surrogate_pair() {
        let v = decode(r#""A""#, &DecodeOptions::strict()).unwrap();
        assert_eq!(v, Value::from("A"));
        let v = decode(r#""𝄞""#, &DecodeOptions::strict()).unwrap();
        assert_eq!(v, Value::from("\u{1D11E}"));
    }

    #[test]
    fn single_quoted_strings_require_behavior() {
        assert!(decode("'hi'", &DecodeOptions::strict()).is_err());
        assert_eq!(decode("'hi'", &DecodeOptions::non_strict()).unwrap(), Value::from("hi"));
    }

    #[test]
    fn extra_escapes_require_behavior() {
        assert!(decode(r#""\x41""#, &DecodeOptions::strict()).is_err());
        assert_eq!(decode(r#""\x41""#, &DecodeOptions::non_strict()).unwrap(), Value::from("A"));
    }

    #[test]
    fn unrecognized_escape_requires_nonescape_characters() {
        assert!(decode(r#""\z""#, &DecodeOptions::strict()).is_err());
        assert_eq!(decode(r#""\z""#, &DecodeOptions::non_strict()).unwrap(), Value::from("z"));
    }

    #[test]
    fn octal_escape_requires_octal_numbers_not_js_string_escapes() {
        use crate::options::Behavior;
        assert!(decode(r#""\101""#, &DecodeOptions::non_strict()).is_err());
        let allowing = DecodeOptions::non_strict()
            .with_behaviors(DecodeOptions::non_strict().behaviors.allow(Behavior::OctalNumbers));
        assert_eq!(decode(r#""\101""#, &allowing).unwrap(), Value::from("A"));
    }

    #[test]
    fn raw_control_char_requires_behavior() {
        let input = "\"a\u{0001}b\"";
        assert!(decode(input, &DecodeOptions::strict()).is_err());
        let allowing = DecodeOptions::strict().with_behaviors(
            DecodeOptions::strict().behaviors.allow(Behavior::ControlCharInString),
        );
        assert_eq!(decode(input, &allowing).unwrap(), Value::from("a\u{0001}b"));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(decode("\"abc", &DecodeOptions::strict()).is_err());
    }
}
