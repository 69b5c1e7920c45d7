use std::collections::HashSet;

use crate::colour::Colour;
use crate::content::ContentSink;
use crate::font::FontMetrics;
use crate::units::{fu_to_pt, Pt};

use super::controller::{Alignment, TextController};
use super::token::Token;

impl<F: FontMetrics> TextController<'_, F> {
    /// Replays the token stream from the pagination cursor, emitting at most
    /// `max_lines` lines. Glyphs and their kerns accumulate into a run that
    /// flushes at line breaks and at style changes, so each `show_text` call
    /// carries a single font and colour. Advances the cursor to the first
    /// unwritten token and line.
    pub(crate) fn write_lines<S: ContentSink>(&mut self, sink: &mut S, max_lines: usize) {
        let mut line_count = self.ln;
        let breaks: HashSet<usize> = self.breaks.breakpoints.iter().copied().collect();

        let mut run: Vec<char> = Vec::new();
        let mut kerns: Vec<i32> = Vec::new();

        // the indent and alignment offsets shift the line origin, so each
        // must be unwound before the T* that starts the next line
        let mut indent = Pt(0.0);
        if self.first_indent != 0.0 && self.n == 0 {
            indent = fu_to_pt(self.first_indent, self.font_size);
            sink.move_text_cursor(indent, Pt(0.0));
        }
        let mut line_offset = Pt(0.0);

        let mut i = self.n;
        while i < self.tokens.len() && line_count < self.breaks.breakpoints.len() {
            if breaks.contains(&i) {
                self.flush(sink, &mut run, &mut kerns, line_count, &mut line_offset);
                if line_offset != Pt(0.0) {
                    sink.move_text_cursor(-line_offset, Pt(0.0));
                    line_offset = Pt(0.0);
                }
                sink.next_line();
                if indent != Pt(0.0) {
                    sink.move_text_cursor(-indent, Pt(0.0));
                    indent = Pt(0.0);
                }
                line_count += 1;
                if line_count >= max_lines {
                    self.n = i + 1;
                    self.ln = line_count;
                    return;
                }
                i += 1;
                continue;
            }
            match &self.tokens[i] {
                Token::Box(b) => {
                    run.extend_from_slice(&b.chars);
                    kerns.extend_from_slice(&b.kerns);
                }
                Token::Skip(advance) => {
                    if *advance != 0.0 {
                        run.push(' ');
                        kerns.push(0);
                    }
                }
                Token::FontWeight(variant) => {
                    let variant = *variant;
                    self.flush(sink, &mut run, &mut kerns, line_count, &mut line_offset);
                    sink.set_font(self.font_size, variant);
                    self.cur_variant = variant;
                }
                Token::ColourChange { r, g, b } => {
                    let colour = Colour::new_rgb_bytes(*r, *g, *b);
                    self.flush(sink, &mut run, &mut kerns, line_count, &mut line_offset);
                    sink.set_fill_colour(colour);
                    self.fill_colour = Some(colour);
                }
                Token::FirstLineIndent(offset) => {
                    indent = *offset;
                    sink.move_text_cursor(indent, Pt(0.0));
                }
                Token::Newline | Token::Hyphen(_) => {}
            }
            i += 1;
        }
        self.n = i;
        self.ln = line_count;
    }

    /// Show the pending run, applying word spacing on adjusted lines and, on
    /// unadjusted lines, the alignment offset for the line's leftover width.
    /// The offset is applied once per line, at its first non-empty flush, and
    /// reported back through `line_offset` for the caller to unwind.
    fn flush<S: ContentSink>(
        &self,
        sink: &mut S,
        run: &mut Vec<char>,
        kerns: &mut Vec<i32>,
        line: usize,
        line_offset: &mut Pt,
    ) {
        if run.is_empty() {
            return;
        }

        let adjustment = self.breaks.adjustments[line];
        if adjustment == 0.0
            && matches!(self.alignment, Alignment::Center | Alignment::Right)
            && *line_offset == Pt(0.0)
        {
            let leftover = self.line_width - self.breaks.line_widths[line];
            let offset = match self.alignment {
                Alignment::Center => leftover / 2.0,
                _ => leftover,
            };
            *line_offset = fu_to_pt(offset, self.font_size);
            sink.move_text_cursor(*line_offset, Pt(0.0));
        }

        if adjustment != 0.0 {
            sink.set_word_spacing(fu_to_pt(adjustment, self.font_size));
            sink.show_text(run, kerns);
            sink.set_word_spacing(Pt(0.0));
        } else {
            sink.show_text(run, kerns);
        }
        run.clear();
        kerns.clear();
    }
}
