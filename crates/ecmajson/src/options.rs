//! The strictness controller: named behaviors layered over a strict/
//! non-strict baseline, plus the `DecodeOptions`/`EncodeOptions` surfaces
//! that carry them.
//!
//! Grounded on `demjson.py`'s `JSON` class, which stores one
//! `_allow_<name>` boolean per behavior and exposes `allow`/`prevent`/
//! `behaviors`/`allowed_behaviors`/`prevented_behaviors`. Rust has no
//! `setattr`/`getattr`, so the per-behavior booleans become a fixed-size
//! array indexed by `Behavior as usize`.

use crate::codec::EncodingName;

/// One of the named permissive behaviors that distinguish
/// strict RFC 7158 JSON from the broader ECMAScript-superset grammar this
/// crate also accepts.
///
/// `Behavior::AnyTypeAtStart` defaults to allowed regardless of the
/// strict/non-strict baseline (top-level scalars are permitted even by
/// strict RFC 7158 parsers in practice); `Behavior::OctalNumbers` defaults
/// to disallowed even in non-strict mode, since it's ambiguous with
/// leading-zero decimal integers and `demjson.py` itself defaults it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Behavior {
    /// A top-level value may be any JSON type, not just array/object.
    AnyTypeAtStart,
    /// A run of more than one sign character, or a lone `+`, before a
    /// number (`+3`, `--3`); a single leading `-` is always allowed.
    AllNumericSigns,
    /// `/* ... */` and `//` comments.
    Comments,
    /// Raw control characters (`< U+0020`) appearing literally inside a
    /// quoted string, unescaped.
    ControlCharInString,
    /// Hexadecimal (`0x..`) integer literals.
    HexNumbers,
    /// A number with no digit before its decimal point (`.5`).
    InitialDecimalPoint,
    /// The extra backslash escapes JavaScript allows (`\x41`, `\v`, `\'`).
    JsStringEscapes,
    /// `NaN`, `Infinity`, `-Infinity` as number literals.
    NonNumbers,
    /// A backslash escape not otherwise recognized (e.g. `\z`) is kept as
    /// the escaped character itself, rather than being an error.
    NonescapeCharacters,
    /// Object keys that are bare identifiers or numbers rather than
    /// quoted strings.
    NonstringKeys,
    /// Elided array elements (`[1,,3]`) decoding as `undefined` (or
    /// `null` when [`Behavior::UndefinedValues`] is off).
    OmittedArrayElements,
    /// Strings quoted with `'` instead of `"`.
    SingleQuotedStrings,
    /// A trailing comma before `]` or `}`.
    TrailingCommaInLiteral,
    /// The `undefined` literal.
    UndefinedValues,
    /// Strip Unicode format-control characters (category `Cf`) before
    /// lexing, rather than treating them as lexical errors.
    UnicodeFormatControlChars,
    /// Unicode whitespace beyond the four ASCII whitespace characters.
    UnicodeWhitespace,
    /// Leading-zero octal integer literals specifically (off by default
    /// even when non-strict).
    OctalNumbers,
}

impl Behavior {
    /// All behaviors, in a stable order (the order used for
    /// `Behaviors::allowed_names`/`prevented_names` iteration).
    pub const ALL: [Behavior; 17] = [
        Behavior::AnyTypeAtStart,
        Behavior::AllNumericSigns,
        Behavior::Comments,
        Behavior::ControlCharInString,
        Behavior::HexNumbers,
        Behavior::InitialDecimalPoint,
        Behavior::JsStringEscapes,
        Behavior::NonNumbers,
        Behavior::NonescapeCharacters,
        Behavior::NonstringKeys,
        Behavior::OmittedArrayElements,
        Behavior::SingleQuotedStrings,
        Behavior::TrailingCommaInLiteral,
        Behavior::UndefinedValues,
        Behavior::UnicodeFormatControlChars,
        Behavior::UnicodeWhitespace,
        Behavior::OctalNumbers,
    ];

    /// The name used in `allow_<name>`/`prevent_<name>` keyword options
    /// and in `Behaviors::allow_name`/`prevent_name`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Behavior::AnyTypeAtStart => "any_type_at_start",
            Behavior::AllNumericSigns => "all_numeric_signs",
            Behavior::Comments => "comments",
            Behavior::ControlCharInString => "control_char_in_string",
            Behavior::HexNumbers => "hex_numbers",
            Behavior::InitialDecimalPoint => "initial_decimal_point",
            Behavior::JsStringEscapes => "js_string_escapes",
            Behavior::NonNumbers => "non_numbers",
            Behavior::NonescapeCharacters => "nonescape_characters",
            Behavior::NonstringKeys => "nonstring_keys",
            Behavior::OmittedArrayElements => "omitted_array_elements",
            Behavior::SingleQuotedStrings => "single_quoted_strings",
            Behavior::TrailingCommaInLiteral => "trailing_comma_in_literal",
            Behavior::UndefinedValues => "undefined_values",
            Behavior::UnicodeFormatControlChars => "unicode_format_control_chars",
            Behavior::UnicodeWhitespace => "unicode_whitespace",
            Behavior::OctalNumbers => "octal_numbers",
        }
    }

    /// Looks up a [`Behavior`] by its [`Behavior::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Behavior> {
        Behavior::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Whether this behavior defaults to allowed in strict mode,
    /// regardless of the caller's strict/non-strict choice.
    #[must_use]
    pub fn forced_default(self) -> Option<bool> {
        match self {
            Behavior::AnyTypeAtStart => Some(true),
            Behavior::OctalNumbers => Some(false),
            _ => None,
        }
    }
}

/// A set of allowed/prevented [`Behavior`]s layered over a strict or
/// non-strict baseline.
///
/// Internally a fixed-size boolean table indexed by behavior, rather than
/// one struct field per behavior, so `allow`/`prevent`/iteration are
/// uniform instead of requiring a match arm per field (see spec Design
/// Notes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behaviors {
    strict: bool,
    flags: [bool; 17],
}

fn index(behavior: Behavior) -> usize {
    match behavior {
        Behavior::AnyTypeAtStart => 0,
        Behavior::AllNumericSigns => 1,
        Behavior::Comments => 2,
        Behavior::ControlCharInString => 3,
        Behavior::HexNumbers => 4,
        Behavior::InitialDecimalPoint => 5,
        Behavior::JsStringEscapes => 6,
        Behavior::NonNumbers => 7,
        Behavior::NonescapeCharacters => 8,
        Behavior::NonstringKeys => 9,
        Behavior::OmittedArrayElements => 10,
        Behavior::SingleQuotedStrings => 11,
        Behavior::TrailingCommaInLiteral => 12,
        Behavior::UndefinedValues => 13,
        Behavior::UnicodeFormatControlChars => 14,
        Behavior::UnicodeWhitespace => 15,
        Behavior::OctalNumbers => 16,
    }
}

impl Behaviors {
    /// Builds a behavior set from the strict/non-strict baseline: every
    /// behavior defaults to `!strict`, except for the two behaviors with a
    /// [`Behavior::forced_default`].
    #[must_use]
    pub fn new(strict: bool) -> Self {
        let mut flags = [!strict; 17];
        for behavior in [Behavior::AnyTypeAtStart, Behavior::OctalNumbers] {
            if let Some(default) = behavior.forced_default() {
                flags[index(behavior)] = default;
            }
        }
        Self { strict, flags }
    }

    /// The strict baseline this set started from (informational only —
    /// individual behaviors may have been toggled away from it since).
    #[must_use]
    pub fn is_strict_baseline(&self) -> bool {
        self.strict
    }

    /// Is the given behavior currently allowed?
    #[must_use]
    pub fn is_allowed(&self, behavior: Behavior) -> bool {
        self.flags[index(behavior)]
    }

    /// Allows `behavior`, returning `self` for chaining.
    #[must_use]
    pub fn allow(mut self, behavior: Behavior) -> Self {
        self.flags[index(behavior)] = true;
        self
    }

    /// Prevents `behavior`, returning `self` for chaining.
    #[must_use]
    pub fn prevent(mut self, behavior: Behavior) -> Self {
        self.flags[index(behavior)] = false;
        self
    }

    /// Allows a behavior looked up by [`Behavior::name`]. Returns `false`
    /// if the name is unknown (the set is left unchanged).
    pub fn allow_name(&mut self, name: &str) -> bool {
        let Some(behavior) = Behavior::from_name(name) else {
            return false;
        };
        self.flags[index(behavior)] = true;
        true
    }

    /// Prevents a behavior looked up by [`Behavior::name`]. Returns
    /// `false` if the name is unknown (the set is left unchanged).
    pub fn prevent_name(&mut self, name: &str) -> bool {
        let Some(behavior) = Behavior::from_name(name) else {
            return false;
        };
        self.flags[index(behavior)] = false;
        true
    }

    /// Names of every currently-allowed behavior, in [`Behavior::ALL`]
    /// order.
    #[must_use]
    pub fn allowed_names(&self) -> Vec<&'static str> {
        Behavior::ALL
            .iter()
            .copied()
            .filter(|b| self.is_allowed(*b))
            .map(Behavior::name)
            .collect()
    }

    /// Names of every currently-prevented behavior, in [`Behavior::ALL`]
    /// order.
    #[must_use]
    pub fn prevented_names(&self) -> Vec<&'static str> {
        Behavior::ALL
            .iter()
            .copied()
            .filter(|b| !self.is_allowed(*b))
            .map(Behavior::name)
            .collect()
    }
}

/// Options controlling [`crate::decode`]/[`crate::decode_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Which permissive behaviors are allowed during this decode.
    pub behaviors: Behaviors,
    /// The input's text encoding, or `None` to auto-detect (byte input
    /// only; ignored by [`crate::decode`], which always receives `&str`).
    pub encoding: Option<EncodingName>,
}

impl DecodeOptions {
    /// Strict RFC 7158 JSON decoding: no comments, no trailing commas, no
    /// single-quoted strings, quoted string keys only, etc.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            behaviors: Behaviors::new(true),
            encoding: None,
        }
    }

    /// Permissive ECMAScript-superset decoding: comments, trailing
    /// commas, single-quoted strings, identifier keys, `NaN`/`Infinity`,
    /// and the rest of the behaviors in [`Behavior::ALL`] (other than
    /// [`Behavior::OctalNumbers`], which stays off even here).
    #[must_use]
    pub fn non_strict() -> Self {
        Self {
            behaviors: Behaviors::new(false),
            encoding: None,
        }
    }

    /// Overrides the behavior set entirely.
    #[must_use]
    pub fn with_behaviors(mut self, behaviors: Behaviors) -> Self {
        self.behaviors = behaviors;
        self
    }

    /// Pins the input's text encoding instead of auto-detecting it.
    #[must_use]
    pub fn with_encoding(mut self, encoding: EncodingName) -> Self {
        self.encoding = Some(encoding);
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Options controlling [`crate::encode`]/[`crate::encode_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Which permissive behaviors are allowed while choosing an output
    /// representation (e.g. whether `Undefined` may be emitted at all).
    pub behaviors: Behaviors,
    /// Emit compact output (no inter-token whitespace) rather than
    /// indented, human-readable output.
    pub compact: bool,
    /// Sort object keys textually before emitting them, rather than
    /// preserving insertion order.
    pub sort_keys: bool,
    /// Escape all non-ASCII characters as `\uXXXX` rather than emitting
    /// them verbatim in the output encoding.
    pub escape_unicode: bool,
    /// The output text encoding.
    pub encoding: EncodingName,
}

impl EncodeOptions {
    /// Strict RFC 7158-conformant output: no `undefined`, no `NaN`/
    /// `Infinity` literals (those become encode errors instead).
    #[must_use]
    pub fn strict() -> Self {
        Self {
            behaviors: Behaviors::new(true),
            compact: false,
            sort_keys: false,
            escape_unicode: false,
            encoding: EncodingName::Utf8,
        }
    }

    /// Permissive ECMAScript-superset output.
    #[must_use]
    pub fn non_strict() -> Self {
        Self {
            behaviors: Behaviors::new(false),
            compact: false,
            sort_keys: false,
            escape_unicode: false,
            encoding: EncodingName::Utf8,
        }
    }

    /// Sets [`EncodeOptions::compact`].
    #[must_use]
    pub fn compactly(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Sets [`EncodeOptions::sort_keys`].
    #[must_use]
    pub fn sorting_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Sets [`EncodeOptions::escape_unicode`].
    #[must_use]
    pub fn escaping_unicode(mut self, escape_unicode: bool) -> Self {
        self.escape_unicode = escape_unicode;
        self
    }

    /// Sets [`EncodeOptions::encoding`].
    #[must_use]
    pub fn with_encoding(mut self, encoding: EncodingName) -> Self {
        self.encoding = encoding;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_baseline_disallows_non_strict_behaviors() {
        let b = Behaviors::new(true);
        assert!(!b.is_allowed(Behavior::Comments));
        assert!(!b.is_allowed(Behavior::TrailingCommaInLiteral));
        assert!(b.is_allowed(Behavior::AnyTypeAtStart));
        assert!(!b.is_allowed(Behavior::OctalNumbers));
    }

    #[test]
    fn non_strict_baseline_allows_most_behaviors_but_not_octal() {
        let b = Behaviors::new(false);
        assert!(b.is_allowed(Behavior::Comments));
        assert!(b.is_allowed(Behavior::TrailingCommaInLiteral));
        assert!(b.is_allowed(Behavior::AnyTypeAtStart));
        assert!(!b.is_allowed(Behavior::OctalNumbers));
    }

    #[test]
    fn allow_and_prevent_override_the_baseline() {
        let b = Behaviors::new(true).allow(Behavior::OctalNumbers).prevent(Behavior::AnyTypeAtStart);
        assert!(b.is_allowed(Behavior::OctalNumbers));
        assert!(!b.is_allowed(Behavior::AnyTypeAtStart));
    }

    #[test]
    fn name_lookup_roundtrips() {
        for behavior in Behavior::ALL {
            let name = behavior.name();
            assert_eq!(Behavior::from_name(name), Some(behavior));
        }
    }

    #[test]
    fn all_contains_exactly_seventeen_behaviors() {
        assert_eq!(Behavior::ALL.len(), 17);
    }

    #[test]
    fn string_keyed_allow_prevent() {
        let mut b = Behaviors::new(true);
        assert!(b.allow_name("trailing_comma_in_literal"));
        assert!(b.is_allowed(Behavior::TrailingCommaInLiteral));
        assert!(!b.allow_name("not_a_real_behavior"));
    }
}
