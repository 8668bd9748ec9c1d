//! String literal formatting.
//!
//! Grounded on `demjson.py`'s `encode_string`, which walks the string
//! once, fast-pathing ASCII-printable runs and falling back to per-
//! character `\u` escaping for anything control, `Cf`, or (when
//! `escape_unicode` is set) non-ASCII.

use super::Encoder;
use crate::codec::EncodingName;
use crate::helpers;

impl<'a> Encoder<'a> {
    pub(super) fn write_string_literal(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            self.write_string_char(c);
        }
        self.out.push('"');
    }

    /// The lowest code point the chosen output encoding cannot represent
    /// directly, above which a character must be `\u`-escaped regardless
    /// of [`crate::options::EncodeOptions::escape_unicode`] so the codec
    /// step that follows can still represent the result.
    fn forced_escape_threshold(&self) -> Option<u32> {
        match self.options.encoding {
            EncodingName::Ascii => Some(0x80),
            EncodingName::Latin1 => Some(0x100),
            _ => None,
        }
    }

    fn write_string_char(&mut self, c: char) {
        let forced = self.forced_escape_threshold().is_some_and(|threshold| (c as u32) >= threshold);
        match c {
            '"' => self.out.push_str("\\\""),
            '\\' => self.out.push_str("\\\\"),
            '\u{08}' => self.out.push_str("\\b"),
            '\u{0C}' => self.out.push_str("\\f"),
            '\n' => self.out.push_str("\\n"),
            '\r' => self.out.push_str("\\r"),
            '\t' => self.out.push_str("\\t"),
            c if c.is_control() || helpers::is_format_control_char(c) || matches!(c, '\u{2028}' | '\u{2029}') => {
                self.write_unicode_escape(c);
            }
            c if (self.options.escape_unicode && !c.is_ascii()) || forced => self.write_unicode_escape(c),
            c => self.out.push(c),
        }
    }

    fn write_unicode_escape(&mut self, c: char) {
        if let Some((high, low)) = helpers::scalar_to_surrogate_pair(c) {
            self.out.push_str(&format!("\\u{high:04x}\\u{low:04x}"));
        } else {
            self.out.push_str(&format!("\\u{:04x}", c as u32));
        }
    }
}
