/// End-of-text sentinel. Characters after this one are never parsed.
pub const EOT: char = '\u{0003}';
/// Colour-directive sentinel; must be followed by exactly `"%03d,%03d,%03d"`
/// (red, green, blue in 0-255)
pub const COLOUR_DIRECTIVE: char = '\u{0007}';
/// Bold-toggle sentinel
pub const BOLD_TOGGLE: char = '\u{000E}';
/// Italic-toggle sentinel
pub const ITALIC_TOGGLE: char = '\u{000F}';

/// Source text with in-band formatting directives.
///
/// The wire format reserves four C0 control characters, all outside the range
/// of valid caller-supplied text:
///
/// 1. [EOT] ends the text. Any characters after it are not parsed.
/// 2. [COLOUR_DIRECTIVE] is followed by exactly eleven characters of the form
///    `"%03d,%03d,%03d"` giving the red, green, and blue components of the new
///    fill colour in 0-255. A directive with a malformed or truncated payload
///    is silently dropped.
/// 3. [BOLD_TOGGLE] toggles bold text on and off.
/// 4. [ITALIC_TOGGLE] toggles italic text on and off. The two toggles combine
///    to switch among the four members of a [FontFamily](crate::FontFamily).
///
/// The format has no escape mechanism, so [FormatText::push_str] strips the
/// sentinel values from caller text; use [FormatText::bold],
/// [FormatText::italic], and [FormatText::colour] to emit directives.
///
/// # Example
///
/// ```
/// use pdf_typeset::FormatText;
///
/// let mut text = FormatText::new();
/// text.push_str("The ");
/// text.bold();
/// text.push_str("quick");
/// text.bold();
/// text.colour(127, 0, 90);
/// text.push_str(" brown fox");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatText(pub Vec<char>);

fn is_sentinel(ch: char) -> bool {
    matches!(ch, EOT | COLOUR_DIRECTIVE | BOLD_TOGGLE | ITALIC_TOGGLE)
}

impl FormatText {
    pub fn new() -> FormatText {
        FormatText::default()
    }

    /// Append plain text. Any sentinel code points embedded in `s` are
    /// stripped, so caller text can never collide with a formatting directive.
    pub fn push_str(&mut self, s: &str) {
        self.0.extend(s.chars().filter(|&ch| !is_sentinel(ch)));
    }

    /// Toggle bold text on or off
    pub fn bold(&mut self) {
        self.0.push(BOLD_TOGGLE);
    }

    /// Toggle italic text on or off
    pub fn italic(&mut self) {
        self.0.push(ITALIC_TOGGLE);
    }

    /// Change the fill colour for subsequent text. Components are 0-255.
    pub fn colour(&mut self, r: u8, g: u8, b: u8) {
        self.0.push(COLOUR_DIRECTIVE);
        self.0.extend(format!("{r:03},{g:03},{b:03}").chars());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }
}

impl From<&str> for FormatText {
    fn from(s: &str) -> FormatText {
        let mut text = FormatText::new();
        text.push_str(s);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_str_strips_sentinels() {
        let mut text = FormatText::new();
        text.push_str("a\u{0003}b\u{0007}c\u{000E}d\u{000F}e");
        assert_eq!(text.0, vec!['a', 'b', 'c', 'd', 'e']);
    }

    #[test]
    fn colour_directive_payload_is_fixed_width() {
        let mut text = FormatText::new();
        text.colour(5, 255, 0);
        let payload: String = text.0[1..].iter().collect();
        assert_eq!(text.0[0], COLOUR_DIRECTIVE);
        assert_eq!(payload, "005,255,000");
    }
}
