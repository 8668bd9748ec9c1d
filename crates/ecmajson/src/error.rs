//! Structured error types.
//!
//! Mirrors the shape of `crates/jsonmodem/src/parser/error.rs` in the
//! teacher crate: a `thiserror`-derived tree instead of string errors, with
//! `#[from]`/`#[source]` wiring so callers can match on variants or just
//! propagate with `?`.

use alloc_fmt::format_excerpt;
use thiserror::Error;

/// Any failure from [`crate::decode`], [`crate::decode_bytes`],
/// [`crate::encode`], or [`crate::encode_bytes`].
#[derive(Debug, Error)]
pub enum Error {
    /// Failed while parsing JSON/JS text into a [`crate::Value`].
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Failed while serializing a [`crate::Value`] to text.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A user-supplied hook returned or raised an error.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// Failed while transcoding bytes to or from a text encoding.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// A decode-time syntax or semantic error.
///
/// Carries a 0-based character offset into the input and a short excerpt of
/// the offending text, the same diagnostic shape as `demjson.py`'s
/// `JSONDecodeError.pretty_description`, which prints the error message
/// followed by a `repr()`-truncated slice of nearby source.
#[derive(Debug, Error)]
#[error("{message} at offset {offset} (near {excerpt:?})")]
pub struct DecodeError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// 0-based character offset into the input where the error was
    /// detected.
    pub offset: usize,
    /// A short excerpt of the input surrounding `offset`, for diagnostics.
    pub excerpt: String,
}

impl DecodeError {
    /// Builds a [`DecodeError`], deriving `excerpt` from `chars` around
    /// `offset`.
    #[must_use]
    pub fn new(message: impl Into<String>, chars: &[char], offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
            excerpt: format_excerpt(chars, offset),
        }
    }
}

/// An encode-time error: a value couldn't be represented in the chosen
/// output mode.
#[derive(Debug, Error)]
#[error("{message} (value kind: {value_kind})")]
pub struct EncodeError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// A short name for the kind of value that triggered the error, for
    /// diagnostics (e.g. `"float"`, `"object"`).
    pub value_kind: &'static str,
}

impl EncodeError {
    /// Builds an [`EncodeError`].
    #[must_use]
    pub fn new(message: impl Into<String>, value_kind: &'static str) -> Self {
        Self {
            message: message.into(),
            value_kind,
        }
    }
}

/// A user-supplied hook either returned a failure or the hook machinery
/// itself rejected the hook's outcome (e.g. an unknown hook name).
#[derive(Debug, Error)]
#[error("hook {hook_name:?} failed for {value_kind}: {source}")]
pub struct HookError {
    /// Which hook failed, e.g. `"decode_number"`.
    pub hook_name: &'static str,
    /// A short name for the kind of value being processed when the hook
    /// failed.
    pub value_kind: &'static str,
    /// The underlying failure reported by the hook.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// A failure transcoding bytes to or from a named text encoding.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EncodingError {
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl HookError {
    /// Builds a [`HookError`].
    #[must_use]
    pub fn new(
        hook_name: &'static str,
        value_kind: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self {
            hook_name,
            value_kind,
            source,
        }
    }
}

impl EncodingError {
    /// Builds an [`EncodingError`].
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Small private helper module so [`DecodeError::new`] doesn't repeat the
/// excerpt-truncation logic at every call site.
mod alloc_fmt {
    /// Renders up to 20 characters starting at `offset` (or the nearest
    /// valid position) as a short diagnostic excerpt, the same bound
    /// `demjson.py` uses in `JSONError.pretty_description`.
    pub(super) fn format_excerpt(chars: &[char], offset: usize) -> String {
        const EXCERPT_LEN: usize = 20;
        let start = offset.min(chars.len());
        let end = (start + EXCERPT_LEN).min(chars.len());
        chars[start..end].iter().collect()
    }
}
