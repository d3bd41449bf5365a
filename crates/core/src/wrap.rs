//! Word wrapping for the console scrollback.
//!
//! A logical line is cut into visual segments no wider than `max_width`.
//! The cut point is found by guessing a generous character count from the
//! width of a wide glyph and shrinking it until the prefix fits, so only a
//! handful of measurements are needed per segment.

use crate::render::Font;
use crate::types::WRAP_GUESS_SLACK;

/// Wrap `line` using `font` for measurement.
pub fn wrap<'a, F: Font + ?Sized>(line: &'a str, max_width: f32, font: &F) -> Vec<&'a str> {
    let glyph = font.measure("W").x + font.spacing();
    wrap_with(line, max_width, glyph, |s| font.measure(s).x)
}

/// Wrap `line` with an explicit average glyph width and measure callback.
///
/// Segments come out in reading order and concatenate back to `line`.
/// Every segment holds at least one character, even when that character is
/// wider than `max_width`. An empty line yields no segments.
pub fn wrap_with<'a>(
    line: &'a str,
    max_width: f32,
    glyph_width: f32,
    measure: impl Fn(&str) -> f32,
) -> Vec<&'a str> {
    let mut out = Vec::new();
    let guess = if glyph_width > 0.0 && max_width.is_finite() && max_width > 0.0 {
        ((max_width / glyph_width).ceil() as usize).saturating_add(WRAP_GUESS_SLACK)
    } else {
        WRAP_GUESS_SLACK
    };

    let mut rest = line;
    while !rest.is_empty() {
        let mut count = guess.min(rest.chars().count()).max(1);
        let cut = loop {
            let end = byte_offset(rest, count);
            if count <= 1 || measure(&rest[..end]) <= max_width {
                break end;
            }
            count -= 1;
        };
        out.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    out
}

// Byte offset just past the first `chars` characters (or the end of `s`).
fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::MonoFont;

    #[test]
    fn short_line_is_one_segment() {
        let font = MonoFont::new(1.0, 1.0);
        assert_eq!(wrap("hello", 10.0, &font), vec!["hello"]);
    }

    #[test]
    fn long_line_splits_at_width() {
        let font = MonoFont::new(2.0, 1.0);
        assert_eq!(wrap("abcdefghij", 8.0, &font), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn segments_concatenate_back() {
        let font = MonoFont::new(3.0, 1.0);
        let line = "the quick brown fox jumps over the lazy dog";
        for width in [3.0, 4.0, 7.5, 10.0, 31.0, 500.0] {
            let segs = wrap(line, width, &font);
            assert_eq!(segs.concat(), line, "width {width}");
            assert!(segs.iter().all(|s| !s.is_empty()));
            assert!(segs.iter().all(|s| font.measure(s).x <= width));
        }
    }

    #[test]
    fn over_wide_char_still_progresses() {
        let font = MonoFont::new(10.0, 1.0);
        assert_eq!(wrap("abc", 4.0, &font), vec!["a", "b", "c"]);
    }

    #[test]
    fn zero_width_still_progresses() {
        assert_eq!(wrap_with("ab", 0.0, 0.0, |s| s.len() as f32), vec!["a", "b"]);
    }

    #[test]
    fn multibyte_chars_are_not_split() {
        let font = MonoFont::new(1.0, 1.0);
        let segs = wrap("héllo wörld", 3.0, &font);
        assert_eq!(segs.concat(), "héllo wörld");
        assert_eq!(segs[0], "hél");
    }

    #[test]
    fn empty_line_has_no_segments() {
        let font = MonoFont::new(1.0, 1.0);
        assert!(wrap("", 10.0, &font).is_empty());
    }

    #[test]
    fn huge_width_ratio_keeps_whole_line() {
        let measure = |s: &str| s.len() as f32;
        assert_eq!(wrap_with("abc", 1.0e30, 1.0e-10, measure), vec!["abc"]);
        assert_eq!(wrap_with("abc", f32::MAX, f32::MIN_POSITIVE, measure), vec!["abc"]);
    }
}
