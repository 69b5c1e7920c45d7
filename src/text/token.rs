use crate::font::FontVariant;
use crate::units::Pt;

/// An unbreakable run of glyphs. `advances` and `kerns` are per-glyph values
/// in font units; each kern attaches to the trailing edge of its glyph, so the
/// last kern in a box is reconciled against whatever token follows.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxToken {
    pub chars: Vec<char>,
    pub advances: Vec<i32>,
    pub kerns: Vec<i32>,
}

impl BoxToken {
    pub fn new(chars: Vec<char>, advances: Vec<i32>, kerns: Vec<i32>) -> BoxToken {
        debug_assert!(chars.len() == advances.len() && chars.len() == kerns.len());
        BoxToken {
            chars,
            advances,
            kerns,
        }
    }

    /// Sum of advances and kerns, in font units
    pub fn width(&self) -> f64 {
        let total: i32 = self.advances.iter().sum::<i32>() + self.kerns.iter().sum::<i32>();
        total as f64
    }
}

/// One element of the tokenized source text. Widths are in font units; the
/// style markers (font weight, colour, indent) are all zero-width.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An unbreakable run of glyphs
    Box(BoxToken),
    /// An inter-word breakable space, carrying the space glyph's advance.
    /// A zero-advance skip is the finishing glue at the end of a paragraph.
    Skip(f64),
    /// A forced line break
    Newline,
    /// Switch the active font for subsequent boxes
    FontWeight(FontVariant),
    /// Switch the active fill colour for subsequent boxes; components are 0-255
    ColourChange { r: u8, g: u8, b: u8 },
    /// Offset for the first line of a paragraph, pre-converted to points
    FirstLineIndent(Pt),
    /// An optional hyphenation point, carrying the hyphen glyph's advance
    Hyphen(f64),
}

impl Token {
    /// The horizontal extent this token contributes to a line, in font units
    pub fn width(&self) -> f64 {
        match self {
            Token::Box(b) => b.width(),
            Token::Skip(advance) => *advance,
            Token::Hyphen(advance) => *advance,
            Token::Newline => 0.0,
            Token::FontWeight(_) => 0.0,
            Token::ColourChange { .. } => 0.0,
            Token::FirstLineIndent(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_width_sums_advances_and_kerns() {
        let b = BoxToken::new(vec!['a', 'b'], vec![500, 520], vec![-10, 0]);
        assert_eq!(b.width(), 1010.0);
    }

    #[test]
    fn control_tokens_are_zero_width() {
        assert_eq!(Token::Newline.width(), 0.0);
        assert_eq!(Token::FontWeight(FontVariant::Bold).width(), 0.0);
        assert_eq!(Token::ColourChange { r: 1, g: 2, b: 3 }.width(), 0.0);
        assert_eq!(Token::FirstLineIndent(Pt(12.0)).width(), 0.0);
    }
}
