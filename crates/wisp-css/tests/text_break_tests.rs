//! Integration tests for greedy text breaking.

use wisp_css::{LayoutConfig, Size, break_text};

fn five_per_char(text: &str, _font_size: i32) -> Size {
    Size::new(5 * text.chars().count() as i32, 10)
}

fn wrap(text: &str, max_width: i32) -> Vec<String> {
    break_text(text, max_width, &five_per_char, &LayoutConfig::default())
}

#[test]
fn test_greedy_wrap_rejects_line_one_unit_too_wide() {
    // "aa bb" measures 25.
    assert_eq!(wrap("aa bb cc", 24), ["aa", "bb", "cc"]);
}

#[test]
fn test_greedy_wrap_accepts_exact_fit() {
    assert_eq!(wrap("aa bb cc", 25), ["aa bb", "cc"]);
    assert_eq!(wrap("aa bb cc", 40), ["aa bb cc"]);
}

#[test]
fn test_no_fragment_exceeds_width_unless_single_word() {
    let text = "the quick brown fox jumps over the extraordinarily lazy dog";
    for max_width in [10, 30, 45, 60, 100] {
        for line in wrap(text, max_width) {
            let width = five_per_char(&line, 16).width;
            assert!(
                width <= max_width || !line.contains(' '),
                "{line:?} is {width} wide at {max_width}"
            );
        }
    }
}

#[test]
fn test_wide_word_is_kept_whole() {
    assert_eq!(wrap("supercalifragilistic tiny", 30), ["supercalifragilistic", "tiny"]);
}

#[test]
fn test_whitespace_runs_collapse() {
    assert_eq!(wrap("  aa \n\t bb  ", 100), ["aa bb"]);
}

#[test]
fn test_measurer_receives_base_font_size() {
    let config = LayoutConfig {
        base_font_size: 20,
        ..LayoutConfig::default()
    };
    let by_font = |text: &str, font_size: i32| Size::new(text.len() as i32 * font_size, font_size);
    assert_eq!(break_text("a b", 59, &by_font, &config), ["a", "b"]);
    assert_eq!(break_text("a b", 60, &by_font, &config), ["a b"]);
}
