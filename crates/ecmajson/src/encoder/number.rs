//! Number formatting.
//!
//! `BigInt`/`BigDecimal` both have a `Display` impl that already produces
//! the textual form JSON expects (no leading `+`, no grouping); the only
//! behavior-gated case is `f64`'s `NaN`/`Infinity`/`-Infinity` sentinels,
//! which strict mode rejects outright (matching `demjson.py`'s
//! `encode_number`, which raises `JSONEncodeError` for non-finite floats
//! unless `allow_nan`-equivalent behaviors are enabled).

use super::Encoder;
use crate::error::EncodeError;
use crate::options::Behavior;
use crate::value::Value;

impl<'a> Encoder<'a> {
    pub(super) fn write_number(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Int(n) => {
                self.out.push_str(&n.to_string());
                Ok(())
            }
            Value::Decimal(n) => {
                self.out.push_str(&n.to_string());
                Ok(())
            }
            Value::Float(n) => self.write_float(*n),
            _ => unreachable!("write_number only called for numeric values"),
        }
    }

    fn write_float(&mut self, n: f64) -> Result<(), EncodeError> {
        if n.is_nan() || n.is_infinite() {
            if !self.options.behaviors.is_allowed(Behavior::NonNumbers) {
                return Err(EncodeError::new(
                    "NaN/Infinity cannot be encoded in this mode",
                    "float",
                ));
            }
            let literal = if n.is_nan() {
                "NaN"
            } else if n > 0.0 {
                "Infinity"
            } else {
                "-Infinity"
            };
            self.out.push_str(literal);
            return Ok(());
        }
        if n == 0.0 && n.is_sign_negative() {
            self.out.push_str("-0");
        } else {
            self.out.push_str(&format_finite_float(n));
        }
        Ok(())
    }
}

/// Renders a finite `f64` the way JSON expects: always with either a
/// decimal point or exponent, never Rust's occasional bare-integer
/// `Display` form for whole numbers (`2.0` rather than `2`), so a
/// round-trip can't silently reinterpret it as an integer.
fn format_finite_float(n: f64) -> String {
    let text = format!("{n}");
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}
