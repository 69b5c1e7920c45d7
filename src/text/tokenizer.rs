use crate::font::{FontFamily, FontMetrics, FontVariant};
use crate::format::{BOLD_TOGGLE, COLOUR_DIRECTIVE, EOT, ITALIC_TOGGLE};
use crate::units::{fu_to_pt, Pt};

use super::token::{BoxToken, Token};

/// Style state the tokenizer starts from; the controller passes its own
/// configured state so the token stream replays it exactly.
pub(crate) struct TokenizerState {
    pub is_bold: bool,
    pub is_italic: bool,
    /// First-line paragraph indent in font units; 0 disables indent tokens
    pub first_indent: f64,
    pub font_size: Pt,
}

fn flush(out: &mut Vec<Token>, run: &mut Vec<char>, advances: &mut Vec<i32>, kerns: &mut Vec<i32>) {
    if !run.is_empty() {
        out.push(Token::Box(BoxToken::new(
            std::mem::take(run),
            std::mem::take(advances),
            std::mem::take(kerns),
        )));
    }
}

/// Parses `"%03d,%03d,%03d"` starting at `payload`. Returns None for any
/// malformed payload, in which case the directive is dropped.
fn parse_colour(payload: &[char]) -> Option<(u8, u8, u8)> {
    if payload.len() < 11 || payload[3] != ',' || payload[7] != ',' {
        return None;
    }
    let group = |chars: &[char]| -> Option<u8> {
        let s: String = chars.iter().collect();
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        s.parse::<u16>().ok().and_then(|v| u8::try_from(v).ok())
    };
    let r = group(&payload[0..3])?;
    let g = group(&payload[4..7])?;
    let b = group(&payload[8..11])?;
    Some((r, g, b))
}

/// Converts formatted source text into a flat token stream. The scan is
/// purely functional over its input: identical input always produces an
/// identical stream.
///
/// The source is suffixed with a sentinel newline and end-of-text marker
/// before scanning, which guarantees a valid lookahead character at every
/// position and terminates the final paragraph.
pub(crate) fn tokenize<F: FontMetrics>(
    src: &[char],
    family: FontFamily<'_, F>,
    state: &TokenizerState,
) -> Vec<Token> {
    let mut is_bold = state.is_bold;
    let mut is_italic = state.is_italic;
    let mut cur_font = family.variant(FontVariant::from_flags(is_bold, is_italic));

    let padded: Vec<char> = src.iter().copied().chain(['\n', EOT]).collect();
    let mut out: Vec<Token> = Vec::with_capacity(padded.len());
    let mut run: Vec<char> = Vec::new();
    let mut advances: Vec<i32> = Vec::new();
    let mut kerns: Vec<i32> = Vec::new();

    let mut i = 0;
    while i < padded.len() {
        match padded[i] {
            '\n' | '\r' => {
                flush(&mut out, &mut run, &mut advances, &mut kerns);
                // finishing glue, so the final line of the paragraph is never
                // stretched
                out.push(Token::Skip(0.0));
                out.push(Token::Newline);
                if state.first_indent != 0.0 {
                    out.push(Token::FirstLineIndent(fu_to_pt(
                        state.first_indent,
                        state.font_size,
                    )));
                }
            }
            ' ' => {
                flush(&mut out, &mut run, &mut advances, &mut kerns);
                out.push(Token::Skip(cur_font.glyph_advance(' ') as f64));
            }
            '\u{00AD}' => {
                flush(&mut out, &mut run, &mut advances, &mut kerns);
                out.push(Token::Hyphen(cur_font.glyph_advance('-') as f64));
            }
            COLOUR_DIRECTIVE => {
                flush(&mut out, &mut run, &mut advances, &mut kerns);
                if i + 12 <= padded.len() {
                    if let Some((r, g, b)) = parse_colour(&padded[i + 1..i + 12]) {
                        out.push(Token::ColourChange { r, g, b });
                        i += 11;
                    }
                }
            }
            BOLD_TOGGLE => {
                flush(&mut out, &mut run, &mut advances, &mut kerns);
                is_bold = !is_bold;
                let variant = FontVariant::from_flags(is_bold, is_italic);
                cur_font = family.variant(variant);
                out.push(Token::FontWeight(variant));
            }
            ITALIC_TOGGLE => {
                flush(&mut out, &mut run, &mut advances, &mut kerns);
                is_italic = !is_italic;
                let variant = FontVariant::from_flags(is_bold, is_italic);
                cur_font = family.variant(variant);
                out.push(Token::FontWeight(variant));
            }
            EOT => {
                flush(&mut out, &mut run, &mut advances, &mut kerns);
                return out;
            }
            ch => {
                run.push(ch);
                let (advance, kern) = cur_font.shaped_pair_advance(ch, padded[i + 1]);
                advances.push(advance);
                kerns.push(kern);
            }
        }
        i += 1;
    }
    out
}
