//! Text measurement and greedy line breaking.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "When the total width of the inline boxes on a line is less than the
//! width of the line box containing them... When an inline box exceeds the
//! width of a line box, it is split into several boxes."
//!
//! Text runs are split at word boundaries only. A word is never broken, so a
//! single word wider than the line overflows it.

use wisp_common::warning::warn_once;

use crate::config::LayoutConfig;

use super::box_model::Size;

/// Glyph measurement supplied by the embedder.
///
/// Implementations must be pure: the engine may measure the same string
/// several times during one pass.
pub trait TextMeasurer {
    /// Size of `text` set on one line at `font_size` pixels.
    fn measure_text(&self, text: &str, font_size: i32) -> Size;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, i32) -> Size,
{
    fn measure_text(&self, text: &str, font_size: i32) -> Size {
        self(text, font_size)
    }
}

/// Approximate font metrics using fixed ratios.
///
/// The average advance of Latin glyphs in a proportional font is about
/// 0.6× the font size; line height uses 1.2×, the upper end of the
/// recommended range for `line-height: normal`.
///
/// Used when no font is available, and by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl TextMeasurer for ApproximateFontMetrics {
    fn measure_text(&self, text: &str, font_size: i32) -> Size {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        let font_size = font_size as f32;
        Size {
            width: (text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO).round() as i32,
            height: (font_size * LINE_HEIGHT_RATIO).round() as i32,
        }
    }
}

/// Split `text` into lines no wider than `max_width`.
///
/// Words are separated by single spaces. Each word is appended to the
/// current line while the measured line stays within `max_width`; otherwise
/// the current line is emitted and the word starts a new one. Only the first
/// [`LayoutConfig::max_words_per_break`] words are considered; the rest are
/// dropped with a warning.
///
/// ```
/// use wisp_css::{LayoutConfig, Size, break_text};
///
/// let measure = |text: &str, _: i32| Size::new(5 * text.len() as i32, 10);
/// let config = LayoutConfig::default();
/// assert_eq!(break_text("aa bb cc", 25, &measure, &config), ["aa bb", "cc"]);
/// ```
#[must_use]
pub fn break_text(
    text: &str,
    max_width: i32,
    measurer: &dyn TextMeasurer,
    config: &LayoutConfig,
) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > config.max_words_per_break {
        let _ = warn_once(
            "Layout",
            &format!(
                "text run truncated to {} words: {:?}",
                config.max_words_per_break,
                words[..config.max_words_per_break].join(" ")
            ),
        );
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in words.into_iter().take(config.max_words_per_break) {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measurer.measure_text(&candidate, config.base_font_size).width > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
