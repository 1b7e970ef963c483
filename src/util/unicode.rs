use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Scripts whose characters take two columns in the list's fixed-width fields
static WIDE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]$").expect("static pattern")
});

/// True for Han, Hiragana, Katakana and Hangul characters.
pub fn is_wide_char(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    let mut buf = [0u8; 4];
    WIDE_SCRIPT.is_match(c.encode_utf8(&mut buf))
}

/// Column width used for list alignment: 2 for CJK script characters, 1 for
/// everything else.
pub fn column_width(c: char) -> usize {
    if is_wide_char(c) { 2 } else { 1 }
}

/// Sum of [`column_width`] over the string.
pub fn display_width(s: &str) -> usize {
    s.chars().map(column_width).sum()
}

/// Fit `text` into exactly `width` columns.
///
/// The text is trimmed, then characters are kept until the next one would
/// push past `width` (a wide character never gets split), and the result is
/// padded with spaces up to `width`.
pub fn pad_display_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.trim().chars() {
        let w = column_width(c);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if used < width {
        out.push_str(&" ".repeat(width - used));
    }
    out
}

/// Width in terminal cells, as the terminal will actually draw it.
/// Control characters count as zero.
pub fn terminal_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if terminal_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > budget {
            break;
        }
        width += cw;
        result.push(c);
    }
    result.push('\u{2026}');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── is_wide_char ───────────────────────────────────────────────

    #[test]
    fn wide_scripts() {
        assert!(is_wide_char('日')); // Han
        assert!(is_wide_char('ひ')); // Hiragana
        assert!(is_wide_char('カ')); // Katakana
        assert!(is_wide_char('한')); // Hangul
    }

    #[test]
    fn narrow_chars() {
        assert!(!is_wide_char('a'));
        assert!(!is_wide_char('é'));
        assert!(!is_wide_char('─'));
        assert!(!is_wide_char('🎉'));
    }

    // ── display_width ──────────────────────────────────────────────

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn display_width_mixed() {
        assert_eq!(display_width("hello你好"), 9);
    }

    #[test]
    fn display_width_empty() {
        assert_eq!(display_width(""), 0);
    }

    // ── pad_display_width ──────────────────────────────────────────

    #[test]
    fn pad_short_ascii() {
        assert_eq!(pad_display_width("web", 8), "web     ");
    }

    #[test]
    fn pad_truncates_ascii() {
        assert_eq!(pad_display_width("newsletter", 8), "newslett");
    }

    #[test]
    fn pad_cjk() {
        let out = pad_display_width("日本語", 8);
        assert_eq!(out, "日本語  ");
        assert_eq!(display_width(&out), 8);
    }

    #[test]
    fn pad_cjk_never_splits_wide_char() {
        // 4 wide chars fill 8 columns, the 5th is dropped
        assert_eq!(pad_display_width("日本語日本", 8), "日本語日");
        // 7 narrow + wide would be 9: the wide char is dropped and padded
        assert_eq!(pad_display_width("abcdefg日", 8), "abcdefg ");
    }

    #[test]
    fn pad_trims_input() {
        assert_eq!(pad_display_width("  cli  ", 5), "cli  ");
    }

    #[test]
    fn pad_zero_width() {
        assert_eq!(pad_display_width("anything", 0), "");
        assert_eq!(pad_display_width("", 0), "");
    }

    #[test]
    fn pad_width_invariant() {
        let samples = ["", "a", "日", "ab日本cd", "한국어 텍스트", "mixed カタカナ text", "  x  "];
        for s in samples {
            for w in 0..12 {
                let out = pad_display_width(s, w);
                assert_eq!(display_width(&out), w, "input {:?} width {}", s, w);
            }
        }
    }

    // ── truncate_to_width ──────────────────────────────────────────

    #[test]
    fn truncate_no_truncation_needed() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
    }

    #[test]
    fn truncate_exact_fit() {
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
    }

    #[test]
    fn truncate_cjk_boundary() {
        // "你好世界" is 8 cells. Truncating to 5: "你好" = 4 + "…" = 1 = 5
        assert_eq!(truncate_to_width("你好世界", 5), "你好\u{2026}");
    }

    #[test]
    fn truncate_zero() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn truncate_one() {
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }
}
