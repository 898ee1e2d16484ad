//! Font tier selection and greedy word wrap for sticker text blocks.

/// Longest text (in characters) that still gets the largest font.
const SHORT_TEXT_MAX: f64 = 15.0;
/// Longest text that gets the middle font.
const MEDIUM_TEXT_MAX: f64 = SHORT_TEXT_MAX * 1.5;

/// A text block never takes more than this many lines; the rest is dropped.
pub const MAX_LINES: usize = 2;

/// One of the three font sizes used on the label. 3 is the largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontTier(u8);

impl FontTier {
    pub const SMALL: FontTier = FontTier(1);
    pub const MEDIUM: FontTier = FontTier(2);
    pub const LARGE: FontTier = FontTier(3);

    /// Tier by character count: `<= 15` → 3, `<= 22.5` → 2, otherwise 1.
    pub fn for_text(text: &str) -> FontTier {
        let len = text.chars().count() as f64;
        let tier = if len <= SHORT_TEXT_MAX {
            3
        } else if len <= MEDIUM_TEXT_MAX {
            2
        } else {
            1
        };
        FontTier(tier.max(1))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Built-in TSPL font name.
    pub fn font(self) -> &'static str {
        match self.0 {
            3 => "3",
            2 => "2",
            _ => "1",
        }
    }

    /// Characters that fit on one line at this size.
    pub fn line_budget(self) -> usize {
        match self.0 {
            3 => 12,
            2 => 16,
            _ => 20,
        }
    }

    /// Vertical distance between consecutive lines, in dots.
    pub fn line_advance(self) -> u32 {
        match self.0 {
            3 => 32,
            2 => 26,
            _ => 20,
        }
    }
}

/// Greedily packs whitespace-separated words into at most [`MAX_LINES`]
/// lines of `budget` characters. A word longer than the budget gets a line
/// of its own, unsplit.
pub fn wrap(text: &str, budget: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= budget {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.truncate(MAX_LINES);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(FontTier::for_text(""), FontTier::LARGE);
        assert_eq!(FontTier::for_text(&"x".repeat(15)), FontTier::LARGE);
        assert_eq!(FontTier::for_text(&"x".repeat(16)), FontTier::MEDIUM);
        assert_eq!(FontTier::for_text(&"x".repeat(22)), FontTier::MEDIUM);
        assert_eq!(FontTier::for_text(&"x".repeat(23)), FontTier::SMALL);
        assert_eq!(FontTier::for_text(&"x".repeat(500)), FontTier::SMALL);
    }

    #[test]
    fn tier_counts_characters_not_bytes() {
        // 15 characters, 18 bytes.
        assert_eq!(FontTier::for_text("Cámara pequeñañ"), FontTier::LARGE);
    }

    #[test]
    fn wraps_greedily() {
        assert_eq!(
            wrap("Projector Epson X200 HD Ultra", 20),
            vec!["Projector Epson X200", "HD Ultra"]
        );
    }

    #[test]
    fn never_more_than_two_lines() {
        let lines = wrap("one two three four five six seven eight nine ten", 8);
        assert_eq!(lines, vec!["one two", "three"]);
    }

    #[test]
    fn long_word_is_kept_whole() {
        let lines = wrap("Supercalifragilistic lamp", 12);
        assert_eq!(lines, vec!["Supercalifragilistic", "lamp"]);
    }

    #[test]
    fn collapses_whitespace_and_handles_empty() {
        assert_eq!(wrap("  Mesa   alta  ", 12), vec!["Mesa alta"]);
        assert!(wrap("   ", 12).is_empty());
    }
}
