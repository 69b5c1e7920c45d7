use crate::{Error, Pt};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};

/// The glyph-metrics interface consumed by the text layout engine. All values
/// are in font units normalized to 1000 units per em, independent of the point
/// size the text will eventually be set at.
///
/// [Font] provides the production implementation; tests can substitute
/// synthetic metrics.
pub trait FontMetrics {
    /// The horizontal advance of `ch`, in font units
    fn glyph_advance(&self, ch: char) -> i32;

    /// The horizontal advance of `ch` and the kerning adjustment between `ch`
    /// and the glyph that follows it, in font units. The kern attaches to the
    /// trailing edge of `ch`.
    fn shaped_pair_advance(&self, ch: char, next: char) -> (i32, i32);
}

/// A parsed font object. Fonts can be TTF or OTF fonts. Metrics are read from
/// the font's horizontal metrics and legacy kerning tables and normalized to
/// 1000 units per em.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, Error> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face.as_face_ref().units_per_em() as f32;
        scaling * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face.as_face_ref().units_per_em() as f32;
        scaling * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face.as_face_ref().units_per_em() as f32;
        let leading: Pt = scaling * self.face.as_face_ref().line_gap() as f32;
        let ascent: Pt = scaling * self.face.as_face_ref().ascender() as f32;
        let descent: Pt = scaling * self.face.as_face_ref().descender() as f32;
        leading + ascent - descent
    }

    /// Look up the glyph id for a character, substituting the font's
    /// replacement glyph (or '?') for characters the font does not cover
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face
            .as_face_ref()
            .glyph_index(ch)
            .or_else(|| self.face.as_face_ref().glyph_index('\u{FFFD}'))
            .or_else(|| self.face.as_face_ref().glyph_index('?'))
            .map(|i| i.0)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> i16 {
        let Some(kern) = self.face.as_face_ref().tables().kern else {
            return 0;
        };
        kern.subtables
            .into_iter()
            .filter(|st| st.horizontal && !st.variable)
            .find_map(|st| st.glyphs_kerning(left, right))
            .unwrap_or(0)
    }

    fn normalize(&self, units: i32) -> i32 {
        let upem = self.face.as_face_ref().units_per_em() as i64;
        (units as i64 * 1000 / upem) as i32
    }
}

impl FontMetrics for Font {
    fn glyph_advance(&self, ch: char) -> i32 {
        let Some(gid) = self.glyph_id(ch) else {
            return 0;
        };
        let advance = self
            .face
            .as_face_ref()
            .glyph_hor_advance(GlyphId(gid))
            .unwrap_or_default();
        self.normalize(advance as i32)
    }

    fn shaped_pair_advance(&self, ch: char, next: char) -> (i32, i32) {
        let advance = self.glyph_advance(ch);
        let kern = match (self.glyph_id(ch), self.glyph_id(next)) {
            (Some(left), Some(right)) => {
                self.normalize(self.kerning(GlyphId(left), GlyphId(right)) as i32)
            }
            _ => 0,
        };
        (advance, kern)
    }
}

/// One of the four weight/slant members of a [FontFamily]. The tokenizer,
/// breaker, and writer each track their own active variant by replaying the
/// same toggle tokens, so the three stages can never disagree about which font
/// is live at a given token index.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FontVariant {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    /// Select the variant matching a pair of bold/italic flags
    pub fn from_flags(bold: bool, italic: bool) -> FontVariant {
        match (bold, italic) {
            (false, false) => FontVariant::Regular,
            (true, false) => FontVariant::Bold,
            (false, true) => FontVariant::Italic,
            (true, true) => FontVariant::BoldItalic,
        }
    }
}

/// The set of fonts a paragraph can switch among via bold/italic toggles. The
/// members need not belong to the same actual typeface family.
#[derive(Debug)]
pub struct FontFamily<'f, F = Font> {
    pub regular: &'f F,
    pub bold: &'f F,
    pub italic: &'f F,
    pub bold_italic: &'f F,
}

impl<'f, F> Clone for FontFamily<'f, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'f, F> Copy for FontFamily<'f, F> {}

impl<'f, F> FontFamily<'f, F> {
    /// Construct a family with all four members backed by the same font.
    /// Bold and italic toggles will still switch the writer's active font
    /// resource, but metrics will be uniform.
    pub fn uniform(font: &'f F) -> FontFamily<'f, F> {
        FontFamily {
            regular: font,
            bold: font,
            italic: font,
            bold_italic: font,
        }
    }

    /// The family member for the given variant
    pub fn variant(&self, variant: FontVariant) -> &'f F {
        match variant {
            FontVariant::Regular => self.regular,
            FontVariant::Bold => self.bold,
            FontVariant::Italic => self.italic,
            FontVariant::BoldItalic => self.bold_italic,
        }
    }
}
