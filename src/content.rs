use crate::colour::Colour;
use crate::font::{Font, FontFamily, FontVariant};
use crate::units::Pt;
use pdf_writer::{Content, Name, Str};

/// The operations the text writer needs from a content stream. The production
/// implementation is [PdfContentSink], which emits PDF text operators; tests
/// substitute recording sinks.
///
/// All horizontal values are in points except the kerns passed to
/// [ContentSink::show_text], which are font units (1000 per em) as PDF `TJ`
/// adjustments expect.
pub trait ContentSink {
    /// Begin a text object; BT
    fn begin_text(&mut self);
    /// End the current text object; ET
    fn end_text(&mut self);
    /// Set the vertical distance between baselines; TL
    fn set_leading(&mut self, leading: Pt);
    /// Set the active font and size; Tf
    fn set_font(&mut self, size: Pt, variant: FontVariant);
    /// Set the fill (non-stroking) colour; rg/k/g
    fn set_fill_colour(&mut self, colour: Colour);
    /// Set the stroking colour, used for outlined render modes; RG/K/G
    fn set_stroke_colour(&mut self, colour: Colour);
    /// Set the word spacing applied to every space glyph; Tw
    fn set_word_spacing(&mut self, spacing: Pt);
    /// Offset the text cursor, starting a new line origin at the offset
    /// position; Td
    fn move_text_cursor(&mut self, dx: Pt, dy: Pt);
    /// Move to the start of the next line, one leading below the current line
    /// origin; T*
    fn next_line(&mut self);
    /// Show a run of glyphs with per-glyph trailing kern adjustments; TJ.
    /// `chars` and `kerns` have equal lengths.
    fn show_text(&mut self, chars: &[char], kerns: &[i32]);
    /// The current line origin, tracked across cursor moves and line advances
    fn text_cursor(&self) -> (Pt, Pt);
}

/// A [ContentSink] that writes PDF text operators to a [pdf_writer::Content],
/// resolving glyph ids through a [FontFamily] and naming each variant's font
/// resource (e.g. `/F0` through `/F3`) for `Tf` operations.
pub struct PdfContentSink<'a, 'f> {
    content: &'a mut Content,
    family: FontFamily<'f, Font>,
    variant_names: [String; 4],
    active: FontVariant,
    leading: Pt,
    cursor: (Pt, Pt),
}

impl<'a, 'f> PdfContentSink<'a, 'f> {
    /// `variant_names` are the page's font resource names for the regular,
    /// bold, italic, and bold-italic family members, in that order.
    pub fn new(
        content: &'a mut Content,
        family: FontFamily<'f, Font>,
        variant_names: [String; 4],
    ) -> PdfContentSink<'a, 'f> {
        PdfContentSink {
            content,
            family,
            variant_names,
            active: FontVariant::Regular,
            leading: Pt(0.0),
            cursor: (Pt(0.0), Pt(0.0)),
        }
    }

}

/// Index into a [PdfContentSink]'s `variant_names`, matching the member order
/// of [FontFamily].
fn variant_index(variant: FontVariant) -> usize {
    match variant {
        FontVariant::Regular => 0,
        FontVariant::Bold => 1,
        FontVariant::Italic => 2,
        FontVariant::BoldItalic => 3,
    }
}

fn encode_glyphs(font: &Font, chars: &[char], out: &mut Vec<u8>) {
    for &ch in chars {
        let gid = font.glyph_id(ch).unwrap_or_default();
        out.extend_from_slice(&gid.to_be_bytes());
    }
}

impl ContentSink for PdfContentSink<'_, '_> {
    fn begin_text(&mut self) {
        self.content.begin_text();
    }

    fn end_text(&mut self) {
        self.content.end_text();
    }

    fn set_leading(&mut self, leading: Pt) {
        self.leading = leading;
        self.content.set_leading(leading.0);
    }

    fn set_font(&mut self, size: Pt, variant: FontVariant) {
        self.active = variant;
        let name = &self.variant_names[variant_index(variant)];
        self.content.set_font(Name(name.as_bytes()), size.0);
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        match colour {
            Colour::RGB { r, g, b } => self.content.set_fill_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => self.content.set_fill_cmyk(c, m, y, k),
            Colour::Grey { g } => self.content.set_fill_gray(g),
        };
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        match colour {
            Colour::RGB { r, g, b } => self.content.set_stroke_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => self.content.set_stroke_cmyk(c, m, y, k),
            Colour::Grey { g } => self.content.set_stroke_gray(g),
        };
    }

    fn set_word_spacing(&mut self, spacing: Pt) {
        self.content.set_word_spacing(spacing.0);
    }

    fn move_text_cursor(&mut self, dx: Pt, dy: Pt) {
        self.cursor.0 += dx;
        self.cursor.1 += dy;
        self.content.next_line(dx.0, dy.0);
    }

    fn next_line(&mut self) {
        self.cursor.1 -= self.leading;
        self.content.next_line_using_leading();
    }

    fn show_text(&mut self, chars: &[char], kerns: &[i32]) {
        debug_assert_eq!(chars.len(), kerns.len());

        let font = self.family.variant(self.active);
        let mut positioned = self.content.show_positioned();
        let mut items = positioned.items();
        let mut pending: Vec<u8> = Vec::with_capacity(chars.len() * 2);
        let mut group_start = 0;
        for (i, &kern) in kerns.iter().enumerate() {
            if kern != 0 {
                encode_glyphs(font, &chars[group_start..=i], &mut pending);
                items.show(Str(&pending));
                items.adjust(-kern as f32);
                pending.clear();
                group_start = i + 1;
            }
        }
        if group_start < chars.len() {
            encode_glyphs(font, &chars[group_start..], &mut pending);
            items.show(Str(&pending));
        }
    }

    fn text_cursor(&self) -> (Pt, Pt) {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_indices_follow_the_family_member_order() {
        assert_eq!(variant_index(FontVariant::Regular), 0);
        assert_eq!(variant_index(FontVariant::Bold), 1);
        assert_eq!(variant_index(FontVariant::Italic), 2);
        assert_eq!(variant_index(FontVariant::BoldItalic), 3);
    }
}
