// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Unicode range classification for shaper dispatch

use crate::DecodeChars;

// Pairs of begin (inclusive) and end (exclusive) code points; must stay
// sorted.
const FAST_RANGES: &[u32] = &[
    0x0020, 0x007f, // Common punctuation, digits, LATIN
    0x00a0, 0x02b0, // LATIN
    0x0370, 0x0483, // GREEK, COPTIC, CYRILLIC
    0x048a, 0x0524, // CYRILLIC
    0x3041, 0x3097, // HIRAGANA
    0x30a0, 0x3100, // KATAKANA
    0x31f0, 0x3200, // KATAKANA LETTER SMALL
    0x3400, 0x4db5, // CJK Ideograph Extension A
    0x4e00, 0x9fc4, // CJK Ideographs
];

/// True if no character in `line` requires complex text layout
///
/// Characters inside the fast ranges each have a single reasonable glyph
/// with no ligature or combining behaviour. Anything outside (combining
/// marks, Indic or Arabic scripts, etc.) needs a shaping engine to place
/// correctly.
///
/// Only decoded code points are inspected; an encoding error ends inspection
/// without forcing a `false` result.
pub fn is_fast_text(line: &[u8]) -> bool {
    for c in DecodeChars::new(line) {
        let c = u32::from(c);
        // Find the first table entry greater than c. Range begins sit at
        // even table positions, so an even result index means c is at or
        // past the previous range's end: out of range.
        let index = FAST_RANGES.partition_point(|&bound| bound <= c);
        if index % 2 == 0 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_fast() {
        assert!(is_fast_text(b"hello"));
        assert!(is_fast_text(b"Line 42, col 7!"));
        assert!(is_fast_text(b""));
    }

    #[test]
    fn cjk_is_fast() {
        // U+3442 lies in CJK Ideograph Extension A
        assert!(is_fast_text("a\u{3442}b".as_bytes()));
        assert!(is_fast_text("こんにちは".as_bytes()));
    }

    #[test]
    fn combining_mark_is_not_fast() {
        // U+0300 COMBINING GRAVE ACCENT is outside every fast range
        assert!(!is_fast_text("e\u{300}".as_bytes()));
        // Arabic requires shaping
        assert!(!is_fast_text("مرحبا".as_bytes()));
    }

    #[test]
    fn range_boundaries() {
        assert!(is_fast_text(" ".as_bytes())); // 0x20: first range begin
        assert!(!is_fast_text("\u{7f}".as_bytes())); // end is exclusive
        assert!(!is_fast_text("\u{1f}".as_bytes())); // below first range
        assert!(!is_fast_text("\u{4db5}".as_bytes())); // exclusive end of Ext A
        assert!(is_fast_text("\u{4db4}".as_bytes()));
    }

    #[test]
    fn decode_error_does_not_force_false() {
        // Valid fast prefix, then a malformed tail: still fast
        assert!(is_fast_text(b"ok\xFF\x80"));
        // Non-fast code point before the error still wins
        assert!(!is_fast_text(b"\xCC\x80\xFF"));
    }
}
