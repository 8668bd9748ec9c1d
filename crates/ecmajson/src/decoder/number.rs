//! Number literal parsing and promotion to [`Value::Int`]/
//! [`Value::Float`]/[`Value::Decimal`].
//!
//! Grammar and promotion rules are translated from `demjson.py`'s
//! `decode_number`, which inspects the raw numeral text for a decimal
//! point or exponent to decide between an integer and a floating-point
//! result, and recognizes `0x`/leading-zero numerals as hex/octal when the
//! corresponding behavior is allowed.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

use super::Decoder;
use crate::error::{DecodeError, Error, HookError};
use crate::hooks::HookOutcome;
use crate::options::Behavior;
use crate::value::Value;

impl<'a> Decoder<'a> {
    pub(super) fn parse_number(&mut self) -> Result<Value, Error> {
        let start = self.pos;
        let negative = self.consume_number_sign(start)?;

        if self.consume_keyword("NaN") {
            return self.finish_number(start, negative, |_| Value::Float(f64::NAN), Behavior::NonNumbers, "NaN literals are not allowed in strict JSON");
        }
        if self.consume_keyword("Infinity") {
            return self.finish_number(
                start,
                negative,
                |negative| Value::Float(if negative { f64::NEG_INFINITY } else { f64::INFINITY }),
                Behavior::NonNumbers,
                "Infinity literals are not allowed in strict JSON",
            );
        }

        if let Some(value) = self.try_parse_radix_literal(negative)? {
            let text: String = self.chars[start..self.pos].iter().collect();
            return self.apply_decode_number_hook(value, &text);
        }

        let digits_start = self.pos;
        self.consume_decimal_digits();
        let int_digit_count = self.pos - digits_start;
        if int_digit_count == 0 && self.peek() != Some('.') {
            return Err(self.error_at(start, "invalid number: no digits found").into());
        }
        if int_digit_count == 0 && !self.allow(Behavior::InitialDecimalPoint) {
            return Err(self
                .error_at(start, "numbers in strict JSON must have at least one digit before the decimal point")
                .into());
        }
        if int_digit_count > 1 && self.chars[digits_start] == '0' {
            return Err(self
                .error_at(start, "initial zero digit must not be followed by other digits")
                .into());
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            let frac_start = self.pos;
            self.consume_decimal_digits();
            if self.pos == frac_start {
                return Err(self
                    .error_at(start, "decimal point must be followed by at least one digit")
                    .into());
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            self.consume_decimal_digits();
            if self.pos == exp_start {
                return Err(self.error_at(start, "invalid number: missing exponent digits").into());
            }
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        let value = self.promote_decimal_literal(&text, is_float, start)?;
        self.apply_decode_number_hook(value, &text)
    }

    /// Consumes a run of `+`/`-` sign characters, returning whether the
    /// net sign is negative. A lone `-` is always allowed; anything else
    /// (a lone `+`, or two or more sign characters) requires
    /// [`Behavior::AllNumericSigns`].
    fn consume_number_sign(&mut self, start: usize) -> Result<bool, DecodeError> {
        let first = self.peek();
        let second = self.peek_at(1);
        let multi_sign = matches!(first, Some('-')) && matches!(second, Some('+' | '-'));
        if (matches!(first, Some('+')) || multi_sign) && !self.allow(Behavior::AllNumericSigns) {
            return Err(self.error_at(start, "numbers in strict JSON may only have a single \"-\" as a sign prefix"));
        }
        let mut negative = false;
        while matches!(self.peek(), Some('+' | '-')) {
            if self.peek() == Some('-') {
                negative = !negative;
            }
            self.pos += 1;
        }
        Ok(negative)
    }

    fn consume_keyword(&mut self, keyword: &str) -> bool {
        let chars: Vec<char> = keyword.chars().collect();
        if self.chars[self.pos..].starts_with(&chars) {
            self.pos += chars.len();
            true
        } else {
            false
        }
    }

    fn finish_number(
        &mut self,
        start: usize,
        negative: bool,
        make_value: impl Fn(bool) -> Value,
        behavior: Behavior,
        error_message: &str,
    ) -> Result<Value, Error> {
        if !self.allow(behavior) {
            return Err(self.error_at(start, error_message).into());
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        self.apply_decode_number_hook(make_value(negative), &text)
    }

    fn apply_decode_number_hook(&self, value: Value, text: &str) -> Result<Value, Error> {
        let Some(hooks) = self.hooks else {
            return Ok(value);
        };
        let Some(hook) = hooks.decode_number.as_ref() else {
            return Ok(value);
        };
        match hook(text) {
            HookOutcome::Keep | HookOutcome::Skip => Ok(value),
            HookOutcome::Replace(replacement) => Ok(replacement),
            HookOutcome::Fail(source) => Err(Error::Hook(HookError::new(
                "decode_number",
                value.kind_name(),
                source,
            ))),
        }
    }

    fn consume_decimal_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn try_parse_radix_literal(&mut self, negative: bool) -> Result<Option<Value>, DecodeError> {
        let start = self.pos;
        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            if !self.allow(Behavior::HexNumbers) {
                return Ok(None);
            }
            self.pos += 2;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            if self.pos == digits_start {
                return Err(self.error_at(start, "invalid hex number: no digits"));
            }
            let digits: String = self.chars[digits_start..self.pos].iter().collect();
            let mut n = BigInt::from(0);
            for c in digits.chars() {
                let d = c.to_digit(16).expect("validated hex digit");
                n = n * BigInt::from(16) + BigInt::from(d);
            }
            if negative {
                n = -n;
            }
            return Ok(Some(Value::Int(n)));
        }

        if self.peek() == Some('0')
            && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit())
            && self.allow(Behavior::OctalNumbers)
        {
            self.pos += 1;
            let digits_start = self.pos;
            while matches!(self.peek(), Some('0'..='7')) {
                self.pos += 1;
            }
            if self.pos == digits_start {
                return Err(self.error_at(start, "invalid octal number: no digits"));
            }
            let digits: String = self.chars[digits_start..self.pos].iter().collect();
            let mut n = BigInt::from(0);
            for c in digits.chars() {
                let d = c.to_digit(8).expect("validated octal digit");
                n = n * BigInt::from(8) + BigInt::from(d);
            }
            if negative {
                n = -n;
            }
            return Ok(Some(Value::Int(n)));
        }

        Ok(None)
    }

    fn promote_decimal_literal(
        &self,
        text: &str,
        is_float: bool,
        start: usize,
    ) -> Result<Value, DecodeError> {
        if is_float {
            BigDecimal::from_str(text)
                .map(Value::Decimal)
                .map_err(|_| self.error_at(start, format!("invalid number literal {text:?}")))
        } else {
            BigInt::from_str(text)
                .map(Value::Int)
                .map_err(|_| self.error_at(start, format!("invalid number literal {text:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::options::{Behavior, DecodeOptions};
    use crate::value::Value;

    fn decode(text: &str, options: &DecodeOptions) -> Result<Value, crate::error::Error> {
        super::super::decode_value(text, options, None)
    }

    #[test]
    fn parses_integers_and_decimals() {
        assert_eq!(decode("42", &DecodeOptions::strict()).unwrap(), Value::from(42i64));
        assert_eq!(decode("-7", &DecodeOptions::strict()).unwrap(), Value::from(-7i64));
        assert!(matches!(
            decode("3.14", &DecodeOptions::strict()).unwrap(),
            Value::Decimal(_)
        ));
        assert!(matches!(
            decode("1e10", &DecodeOptions::strict()).unwrap(),
            Value::Decimal(_)
        ));
    }

    #[test]
    fn hex_numbers_require_behavior() {
        assert!(decode("0x1F", &DecodeOptions::strict()).is_err());
        let allowing = DecodeOptions::strict()
            .with_behaviors(DecodeOptions::strict().behaviors.allow(Behavior::HexNumbers));
        assert_eq!(decode("0x1F", &allowing).unwrap(), Value::from(31i64));
    }

    #[test]
    fn octal_numbers_stay_off_even_non_strict() {
        assert!(decode("017", &DecodeOptions::non_strict()).is_err());
        let allowing = DecodeOptions::non_strict()
            .with_behaviors(DecodeOptions::non_strict().behaviors.allow(Behavior::OctalNumbers));
        assert_eq!(decode("017", &allowing).unwrap(), Value::from(15i64));
    }

    #[test]
    fn lone_decimal_point_is_an_error() {
        assert!(decode(".", &DecodeOptions::strict()).is_err());
    }

    #[test]
    fn leading_zero_integer_is_rejected_in_strict_mode() {
        assert!(decode("01", &DecodeOptions::strict()).is_err());
        assert!(decode("00", &DecodeOptions::strict()).is_err());
        assert_eq!(decode("0", &DecodeOptions::strict()).unwrap(), Value::from(0i64));
        assert!(matches!(decode("0.5", &DecodeOptions::strict()).unwrap(), Value::Decimal(_)));
    }

    #[test]
    fn initial_decimal_point_requires_behavior() {
        assert!(decode(".5", &DecodeOptions::strict()).is_err());
        assert!(matches!(decode(".5", &DecodeOptions::non_strict()).unwrap(), Value::Decimal(_)));
    }

    #[test]
    fn trailing_decimal_point_with_no_digit_is_an_error() {
        assert!(decode("5.", &DecodeOptions::non_strict()).is_err());
    }

    #[test]
    fn all_numeric_signs_gates_plus_and_multiple_signs() {
        assert!(decode("+3", &DecodeOptions::strict()).is_err());
        assert!(decode("--3", &DecodeOptions::non_strict()).is_err());
        let allowing = DecodeOptions::non_strict()
            .with_behaviors(DecodeOptions::non_strict().behaviors.allow(Behavior::AllNumericSigns));
        assert_eq!(decode("+3", &allowing).unwrap(), Value::from(3i64));
        assert_eq!(decode("--3", &allowing).unwrap(), Value::from(3i64));
        assert_eq!(decode("-3", &DecodeOptions::strict()).unwrap(), Value::from(-3i64));
    }

    #[test]
    fn negative_infinity_requires_non_numbers_behavior() {
        assert!(decode("-Infinity", &DecodeOptions::strict()).is_err());
        let v = decode("-Infinity", &DecodeOptions::non_strict()).unwrap();
        assert!(matches!(v, Value::Float(f) if f == f64::NEG_INFINITY));
    }
}
