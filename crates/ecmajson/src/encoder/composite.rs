//! Array and object formatting: indentation, key sorting, and the
//! sequence/dict-level hooks.
//!
//! Grounded on `demjson.py`'s `encode_composite`, which iterates the
//! sequence or mapping, invoking the matching hook once for the whole
//! container before formatting its entries (rather than per-entry).

use super::Encoder;
use crate::error::{Error, HookError};
use crate::hooks::HookOutcome;
use crate::value::{Key, Object, Value};

impl<'a> Encoder<'a> {
    pub(super) fn write_array(&mut self, items: &[Value], depth: usize) -> Result<(), Error> {
        let resolved = self.apply_encode_sequence_hook(items)?;
        let items = resolved.as_deref().unwrap_or(items);

        if items.is_empty() {
            self.out.push_str("[]");
            return Ok(());
        }
        self.out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.indent(depth + 1);
            self.write_value(item, depth + 1)?;
        }
        self.indent(depth);
        self.out.push(']');
        Ok(())
    }

    pub(super) fn write_object(&mut self, object: &Object, depth: usize) -> Result<(), Error> {
        let resolved = self.apply_encode_dict_hook(object)?;
        let mut owned_sorted;
        let object = match &resolved {
            Some(replaced) => replaced,
            None => object,
        };
        let object = if self.options.sort_keys {
            owned_sorted = object.clone();
            owned_sorted.sort_by_key_text();
            &owned_sorted
        } else {
            object
        };

        if object.is_empty() {
            self.out.push_str("{}");
            return Ok(());
        }
        self.out.push('{');
        let mut first = true;
        for (key, value) in object.iter() {
            let key = self.apply_encode_dict_key_hook(key)?;
            if !first {
                self.out.push(',');
            }
            first = false;
            self.indent(depth + 1);
            self.write_string_literal(&key.as_text());
            self.out.push(':');
            if !self.options.compact {
                self.out.push(' ');
            }
            self.write_value(value, depth + 1)?;
        }
        self.indent(depth);
        self.out.push('}');
        Ok(())
    }

    fn apply_encode_sequence_hook(&self, items: &[Value]) -> Result<Option<Vec<Value>>, Error> {
        let Some(hook) = self.hooks.and_then(|h| h.encode_sequence.as_ref()) else {
            return Ok(None);
        };
        match hook(items) {
            HookOutcome::Keep | HookOutcome::Skip => Ok(None),
            HookOutcome::Replace(replacement) => Ok(Some(replacement)),
            HookOutcome::Fail(source) => Err(Error::Hook(HookError::new(
                "encode_sequence",
                "array",
                source,
            ))),
        }
    }

    fn apply_encode_dict_hook(&self, object: &Object) -> Result<Option<Object>, Error> {
        let Some(hook) = self.hooks.and_then(|h| h.encode_dict.as_ref()) else {
            return Ok(None);
        };
        match hook(object) {
            HookOutcome::Keep | HookOutcome::Skip => Ok(None),
            HookOutcome::Replace(replacement) => Ok(Some(replacement)),
            HookOutcome::Fail(source) => Err(Error::Hook(HookError::new(
                "encode_dict",
                "object",
                source,
            ))),
        }
    }

    fn apply_encode_dict_key_hook(&self, key: &Key) -> Result<Key, Error> {
        let Some(hook) = self.hooks.and_then(|h| h.encode_dict_key.as_ref()) else {
            return Ok(key.clone());
        };
        match hook(key) {
            HookOutcome::Keep | HookOutcome::Skip => Ok(key.clone()),
            HookOutcome::Replace(replacement) => Ok(replacement),
            HookOutcome::Fail(source) => Err(Error::Hook(HookError::new(
                "encode_dict_key",
                "string",
                source,
            ))),
        }
    }
}
