//! The hook dispatch system: named extension points callers can register
//! to observe or override decoding/encoding of specific value shapes.
//!
//! `demjson.py` implements this with `setattr(self, 'hook_'+name, func)`
//! and a tuple of known hook names (`all_hook_names`). Rust has no dynamic
//! attribute dispatch, so each hook is a typed optional field holding a
//! boxed closure, and `Hooks::is_empty`/builder methods replace the
//! string-keyed `set_hook`/`has_hook`/`clear_hook` trio.

use crate::value::{Key, Value};

/// What a hook decided to do with the value it was given.
pub enum HookOutcome<T> {
    /// Replace the value with this one.
    Replace(T),
    /// Leave the value as originally decoded/about to be encoded.
    Keep,
    /// Decline the call; equivalent to the hook not being registered for
    /// this particular invocation, leaving the value unchanged.
    Skip,
    /// The hook itself failed; wrapped into a
    /// [`crate::error::HookError`] by the caller.
    Fail(Box<dyn std::error::Error + Send + Sync>),
}

type DecodeStringHook = Box<dyn Fn(&str) -> HookOutcome<Value> + Send + Sync>;
type DecodeNumberHook = Box<dyn Fn(&str) -> HookOutcome<Value> + Send + Sync>;
type DecodeArrayHook = Box<dyn Fn(&[Value]) -> HookOutcome<Value> + Send + Sync>;
type DecodeObjectHook = Box<dyn Fn(&crate::value::Object) -> HookOutcome<Value> + Send + Sync>;
type EncodeValueHook = Box<dyn Fn(&Value) -> HookOutcome<Value> + Send + Sync>;
type EncodeDictHook = Box<dyn Fn(&crate::value::Object) -> HookOutcome<crate::value::Object> + Send + Sync>;
type EncodeDictKeyHook = Box<dyn Fn(&Key) -> HookOutcome<Key> + Send + Sync>;
type EncodeSequenceHook = Box<dyn Fn(&[Value]) -> HookOutcome<Vec<Value>> + Send + Sync>;
type EncodeDefaultHook = Box<dyn Fn(&Value) -> HookOutcome<Value> + Send + Sync>;

/// A registry of optional decode/encode extension hooks.
///
/// Every field is `None` by default; a `decode`/`encode` call with a
/// default-constructed `Hooks` behaves exactly as if hooks didn't exist.
/// Build one with the `on_*` setters, which consume and return `self` for
/// chaining (the same builder style as
/// [`crate::options::DecodeOptions`]/[`crate::options::EncodeOptions`]).
#[derive(Default)]
pub struct Hooks {
    pub(crate) decode_string: Option<DecodeStringHook>,
    pub(crate) decode_number: Option<DecodeNumberHook>,
    pub(crate) decode_array: Option<DecodeArrayHook>,
    pub(crate) decode_object: Option<DecodeObjectHook>,
    pub(crate) encode_value: Option<EncodeValueHook>,
    pub(crate) encode_dict: Option<EncodeDictHook>,
    pub(crate) encode_dict_key: Option<EncodeDictKeyHook>,
    pub(crate) encode_sequence: Option<EncodeSequenceHook>,
    pub(crate) encode_default: Option<EncodeDefaultHook>,
}

impl Hooks {
    /// Builds an empty hook registry (equivalent to [`Hooks::default`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook called with the raw text of every decoded string,
    /// before it becomes a [`Value::String`].
    #[must_use]
    pub fn on_decode_string(
        mut self,
        hook: impl Fn(&str) -> HookOutcome<Value> + Send + Sync + 'static,
    ) -> Self {
        self.decode_string = Some(Box::new(hook));
        self
    }

    /// Registers a hook called with the raw numeral text of every decoded
    /// number, before numeric promotion (this collapses `demjson.py`'s
    /// separate `decode_number`/`decode_float` hooks into one, since the
    /// promotion rules already determine the `Value` arm from the same raw
    /// text; see `DESIGN.md`).
    #[must_use]
    pub fn on_decode_number(
        mut self,
        hook: impl Fn(&str) -> HookOutcome<Value> + Send + Sync + 'static,
    ) -> Self {
        self.decode_number = Some(Box::new(hook));
        self
    }

    /// Registers a hook called with every fully-decoded array, before it
    /// becomes a [`Value::Array`].
    #[must_use]
    pub fn on_decode_array(
        mut self,
        hook: impl Fn(&[Value]) -> HookOutcome<Value> + Send + Sync + 'static,
    ) -> Self {
        self.decode_array = Some(Box::new(hook));
        self
    }

    /// Registers a hook called with every fully-decoded object, before it
    /// becomes a [`Value::Object`].
    #[must_use]
    pub fn on_decode_object(
        mut self,
        hook: impl Fn(&crate::value::Object) -> HookOutcome<Value> + Send + Sync + 'static,
    ) -> Self {
        self.decode_object = Some(Box::new(hook));
        self
    }

    /// Registers a hook called with every value immediately before it is
    /// encoded, regardless of kind.
    #[must_use]
    pub fn on_encode_value(
        mut self,
        hook: impl Fn(&Value) -> HookOutcome<Value> + Send + Sync + 'static,
    ) -> Self {
        self.encode_value = Some(Box::new(hook));
        self
    }

    /// Registers a hook called with every object immediately before it is
    /// encoded.
    #[must_use]
    pub fn on_encode_dict(
        mut self,
        hook: impl Fn(&crate::value::Object) -> HookOutcome<crate::value::Object> + Send + Sync + 'static,
    ) -> Self {
        self.encode_dict = Some(Box::new(hook));
        self
    }

    /// Registers a hook called with every object key immediately before it
    /// is encoded.
    #[must_use]
    pub fn on_encode_dict_key(
        mut self,
        hook: impl Fn(&Key) -> HookOutcome<Key> + Send + Sync + 'static,
    ) -> Self {
        self.encode_dict_key = Some(Box::new(hook));
        self
    }

    /// Registers a hook called with every array immediately before it is
    /// encoded.
    #[must_use]
    pub fn on_encode_sequence(
        mut self,
        hook: impl Fn(&[Value]) -> HookOutcome<Vec<Value>> + Send + Sync + 'static,
    ) -> Self {
        self.encode_sequence = Some(Box::new(hook));
        self
    }

    /// Registers a fallback hook invoked only when a value otherwise has
    /// no representation in the target encoding mode.
    #[must_use]
    pub fn on_encode_default(
        mut self,
        hook: impl Fn(&Value) -> HookOutcome<Value> + Send + Sync + 'static,
    ) -> Self {
        self.encode_default = Some(Box::new(hook));
        self
    }

    /// Whether no hooks are registered at all (the common case; lets
    /// callers skip the dispatch overhead entirely).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decode_string.is_none()
            && self.decode_number.is_none()
            && self.decode_array.is_none()
            && self.decode_object.is_none()
            && self.encode_value.is_none()
            && self.encode_dict.is_none()
            && self.encode_dict_key.is_none()
            && self.encode_sequence.is_none()
            && self.encode_default.is_none()
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks").field("is_empty", &self.is_empty()).finish_non_exhaustive()
    }
}
