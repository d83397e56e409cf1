#![forbid(unsafe_code)]

//! Text layout helpers: word wrapping and signed-origin span drawing.

use tourkit_render::buffer::Buffer;
use tourkit_render::cell::Cell;
use tourkit_core::geometry::Rect;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::apply_style;
use crate::style::Style;

pub use tourkit_render::display_width;

/// Greedy word wrap to at most `max_width` cells per line.
///
/// Paragraph breaks (`\n`) are kept; a blank paragraph yields an empty line.
/// Words wider than `max_width` are split at grapheme boundaries.
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            if width > 0 && width + 1 + word_width <= max_width {
                line.push(' ');
                line.push_str(word);
                width += 1 + word_width;
                continue;
            }
            if width > 0 {
                lines.push(std::mem::take(&mut line));
                width = 0;
            }
            if word_width <= max_width {
                line.push_str(word);
                width = word_width;
                continue;
            }
            for grapheme in word.graphemes(true) {
                let w = UnicodeWidthStr::width(grapheme);
                if width + w > max_width && width > 0 {
                    lines.push(std::mem::take(&mut line));
                    width = 0;
                }
                line.push_str(grapheme);
                width += w;
            }
        }
        lines.push(line);
    }
    lines
}

/// Draw `text` with its first cell at signed position (`x`, `y`).
///
/// Only cells inside `clip` are written, so a panel hanging off the left
/// edge still shows its visible part. At most `max_width` cells are used.
/// Returns the signed x after the last glyph.
///
/// A cell holds one `char`. Graphemes are NFC-composed first, so `e` plus a
/// combining acute lands as `é`; clusters with no single-codepoint form keep
/// only their base character.
pub fn draw_span_at(
    buf: &mut Buffer,
    clip: Rect,
    x: i32,
    y: i32,
    text: &str,
    style: Style,
    max_width: usize,
) -> i32 {
    let mut cx = x;
    let mut used = 0usize;
    let Ok(row) = u16::try_from(y) else {
        return x + display_width(text).min(max_width) as i32;
    };

    for grapheme in text.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if used + w > max_width {
            break;
        }
        if let Ok(col) = u16::try_from(cx)
            && clip.contains(col, row)
            && usize::from(col) + w <= usize::from(clip.right())
            && let Some(c) = cell_char(grapheme)
        {
            let mut cell = Cell::from_char(c);
            apply_style(&mut cell, style);
            buf.set(col, row, cell);
        }
        cx += w as i32;
        used += w;
    }
    cx
}

/// The single `char` a grapheme is stored as.
fn cell_char(grapheme: &str) -> Option<char> {
    grapheme.nfc().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_area(buf: &Buffer) -> Rect {
        Rect::new(0, 0, buf.width(), buf.height())
    }

    #[test]
    fn wrap_packs_words_greedily() {
        assert_eq!(
            wrap("track every order in one place", 12),
            vec!["track every", "order in one", "place"]
        );
    }

    #[test]
    fn wrap_keeps_paragraphs() {
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn wrap_zero_width_is_empty() {
        assert!(wrap("anything", 0).is_empty());
    }

    #[test]
    fn wrap_measures_wide_glyphs() {
        assert_eq!(wrap("界界界", 4), vec!["界界", "界"]);
    }

    #[test]
    fn span_clips_negative_origin() {
        let mut buf = Buffer::new(5, 1);
        let area = buf_area(&buf);
        let end = draw_span_at(&mut buf, area, -2, 0, "abcd", Style::new(), 10);
        assert_eq!(end, 2);
        assert_eq!(buf.row_text(0), "cd   ");
    }

    #[test]
    fn span_above_buffer_draws_nothing() {
        let mut buf = Buffer::new(5, 1);
        let area = buf_area(&buf);
        draw_span_at(&mut buf, area, 0, -1, "abcd", Style::new(), 10);
        assert_eq!(buf.row_text(0), "     ");
    }

    #[test]
    fn span_respects_max_width_and_keeps_bg() {
        let mut buf = Buffer::new(6, 1);
        let bg = tourkit_render::cell::PackedRgba::rgb(9, 9, 9);
        buf.set(1, 0, Cell::default().with_bg(bg));
        let area = buf_area(&buf);
        draw_span_at(&mut buf, area, 0, 0, "hello", Style::new(), 3);
        assert_eq!(buf.row_text(0), "hel   ");
        assert_eq!(buf.get(1, 0).map(|c| c.bg), Some(bg));
    }

    #[test]
    fn span_skips_cells_outside_clip() {
        let mut buf = Buffer::new(8, 2);
        let end = draw_span_at(&mut buf, Rect::new(2, 0, 3, 1), 0, 0, "abcdefg", Style::new(), 10);
        assert_eq!(end, 7);
        assert_eq!(buf.row_text(0), "  cde   ");
        draw_span_at(&mut buf, Rect::new(0, 0, 8, 1), 0, 1, "abc", Style::new(), 10);
        assert_eq!(buf.row_text(1), "        ");
    }

    #[test]
    fn span_composes_combining_marks() {
        let mut buf = Buffer::new(4, 1);
        let area = buf_area(&buf);
        let end = draw_span_at(&mut buf, area, 0, 0, "e\u{301}x", Style::new(), 10);
        assert_eq!(end, 2);
        assert_eq!(buf.get(0, 0).and_then(|c| c.content.as_char()), Some('\u{e9}'));
        assert_eq!(buf.get(1, 0).and_then(|c| c.content.as_char()), Some('x'));
    }
}
