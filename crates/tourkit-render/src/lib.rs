#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, hit grids, and ANSI presentation.
//!
//! Widgets draw into a [`frame::Frame`]; the host hands the finished
//! [`buffer::Buffer`] to a [`presenter::Presenter`], which writes only the
//! cells that changed since the previous frame.

pub mod buffer;
pub mod cell;
pub mod drawing;
pub mod frame;
#[cfg(not(target_arch = "wasm32"))]
pub mod presenter;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal cells, measured per grapheme cluster.
#[inline]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.bytes().filter(|b| (0x20..=0x7E).contains(b)).count();
    }
    text.graphemes(true).map(UnicodeWidthStr::width).sum()
}

#[cfg(test)]
mod tests {
    use super::display_width;

    #[test]
    fn ascii_width_counts_printables() {
        assert_eq!(display_width("Next →"), 6);
        assert_eq!(display_width("a\tb"), 2);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn wide_and_combining_text() {
        assert_eq!(display_width("界面"), 4);
        assert_eq!(display_width("e\u{301}"), 1);
    }
}
