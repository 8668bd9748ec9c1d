//! The encoder: turns a [`Value`] tree back into text.
//!
//! Grounded on `demjson.py`'s `encode`/`encode_helper`/`encode_composite`
//! dispatch: classify the value, run the applicable hook, then format.
//! Unlike `demjson.py`, this crate's [`Value`] is a tree of owned data
//! with no aliasing, so the "trying to encode an infinite sequence"
//! self-reference check `encode_composite` performs has no counterpart
//! here — an owned `Vec`/`Object` tree cannot contain itself (see
//! `DESIGN.md`).

mod composite;
mod number;
mod string;

use crate::error::{Error, HookError};
use crate::hooks::{HookOutcome, Hooks};
use crate::options::EncodeOptions;
use crate::value::Value;

pub(crate) struct Encoder<'a> {
    options: &'a EncodeOptions,
    hooks: Option<&'a Hooks>,
    out: String,
}

/// Serializes `value` to text under `options`, invoking `hooks` (if any)
/// at each applicable extension point.
pub(crate) fn encode_value(
    value: &Value,
    options: &EncodeOptions,
    hooks: Option<&Hooks>,
) -> Result<String, Error> {
    let mut encoder = Encoder {
        options,
        hooks,
        out: String::new(),
    };
    encoder.write_value(value, 0)?;
    Ok(encoder.out)
}

impl<'a> Encoder<'a> {
    fn write_value(&mut self, value: &Value, depth: usize) -> Result<(), Error> {
        let resolved = self.apply_encode_value_hook(value)?;
        let value = resolved.as_ref().unwrap_or(value);
        match value {
            Value::Null => {
                self.out.push_str("null");
                Ok(())
            }
            Value::Undefined => self.write_undefined(),
            Value::Bool(b) => {
                self.out.push_str(if *b { "true" } else { "false" });
                Ok(())
            }
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => Ok(self.write_number(value)?),
            Value::String(s) => {
                self.write_string_literal(s);
                Ok(())
            }
            Value::Array(items) => self.write_array(items, depth),
            Value::Object(object) => self.write_object(object, depth),
        }
    }

    fn apply_encode_value_hook(&self, value: &Value) -> Result<Option<Value>, Error> {
        let Some(hooks) = self.hooks else {
            return Ok(None);
        };
        let Some(hook) = hooks.encode_value.as_ref() else {
            return Ok(None);
        };
        match hook(value) {
            HookOutcome::Keep | HookOutcome::Skip => Ok(None),
            HookOutcome::Replace(replacement) => Ok(Some(replacement)),
            HookOutcome::Fail(source) => Err(Error::Hook(HookError::new(
                "encode_value",
                value.kind_name(),
                source,
            ))),
        }
    }

    fn write_undefined(&mut self) -> Result<(), Error> {
        if self.options.behaviors.is_allowed(crate::options::Behavior::UndefinedValues) {
            self.out.push_str("undefined");
            return Ok(());
        }
        if let Some(hook) = self.hooks.and_then(|h| h.encode_default.as_ref()) {
            return match hook(&Value::Undefined) {
                HookOutcome::Replace(v) => self.write_value(&v, 0),
                HookOutcome::Keep | HookOutcome::Skip => Err(Error::Encode(
                    crate::error::EncodeError::new("undefined values cannot be encoded in this mode", "undefined"),
                )),
                HookOutcome::Fail(source) => Err(Error::Hook(HookError::new(
                    "encode_default",
                    "undefined",
                    source,
                ))),
            };
        }
        Err(Error::Encode(crate::error::EncodeError::new(
            "undefined values cannot be encoded in this mode",
            "undefined",
        )))
    }

    fn indent(&mut self, depth: usize) {
        if !self.options.compact {
            self.out.push('\n');
            for _ in 0..depth {
                self.out.push_str("  ");
            }
        }
    }
}
