use crate::error::Error;
use crate::font::{FontFamily, FontMetrics, FontVariant};

use super::token::Token;

/// The breaker's output: one entry per line. `breakpoints` are token indices
/// of the `Skip` (or finishing glue) each line ends at; `line_widths` are the
/// natural, unadjusted widths in font units; `adjustments` are the per-space
/// word-spacing deltas in font units (negative squishes, positive stretches).
#[derive(Debug, Clone, Default)]
pub(crate) struct Breaks {
    pub breakpoints: Vec<usize>,
    pub line_widths: Vec<f64>,
    pub adjustments: Vec<f64>,
}

/// A candidate line-start point in the dynamic program. Nodes are created at
/// every feasible breakpoint and pruned (via the `line_start` cursor) once no
/// future line could begin at them, which bounds the scan well below O(n²).
struct ActiveNode {
    /// this node's index in the active list
    n_index: usize,
    /// token index of the skip this node breaks at
    t_index: usize,
    /// total width of the paragraph up to and including this node
    p_width: f64,
    /// number of spaces in the paragraph up to and including this node
    p_spaces: f64,
    /// n_index of the optimal line-start node for the line ending here
    best_start: usize,
    /// natural width of the line ending at this node
    best_lw: f64,
    /// adjustment ratio of the line ending at this node
    best_r: f64,
    /// sum of demerits along the optimal path ending at this node
    d_sum: f64,
}

fn root(t_index: usize) -> ActiveNode {
    ActiveNode {
        n_index: 0,
        t_index,
        p_width: 0.0,
        p_spaces: 0.0,
        best_start: 0,
        best_lw: 0.0,
        best_r: 0.0,
        d_sum: 0.0,
    }
}

pub(crate) struct BreakParams {
    /// ideal line width in font units
    pub line_width: f64,
    /// first-line paragraph indent in font units
    pub first_indent: f64,
    /// the font variant live at the start of the token stream
    pub start_variant: FontVariant,
    /// ragged mode zeroes all adjustment ratios after the scan
    pub ragged: bool,
}

/// Chooses line breakpoints with a modified Knuth-Plass dynamic program.
///
/// Tolerances are expressed as ratios of the active font's space advance: a
/// line is feasible when its per-space adjustment `r` satisfies
/// `-squish_tolerance * space_advance <= r <= stretch_tolerance * space_advance`.
/// Among feasible candidates the predecessor minimizing the cumulative r²
/// demerits wins. Paragraph-final lines break at zero-width finishing glue and
/// are clamped to `r = 0`, so a last line is never stretched.
pub(crate) fn break_lines<F: FontMetrics>(
    tokens: &[Token],
    family: FontFamily<'_, F>,
    params: &BreakParams,
    squish_tolerance: f64,
    stretch_tolerance: f64,
) -> Result<Breaks, Error> {
    let mut cur_font = family.variant(params.start_variant);

    let mut breaks = Breaks::default();
    let mut active_nodes: Vec<ActiveNode> = vec![root(0)];

    let mut num_spaces = 0.0_f64;
    let mut line_start = 0_usize;
    let mut cur_width = params.first_indent;
    let mut run_width = 0.0_f64;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Box(b) => {
                cur_width += b.width();
                run_width += b.width();
                if run_width > params.line_width {
                    return Err(Error::WordTooLong {
                        word: b.chars.iter().collect(),
                    });
                }
            }
            Token::Skip(skip_width) => {
                let skip_width = *skip_width;
                run_width = 0.0;
                cur_width += skip_width;
                num_spaces += 1.0;

                // font changes move the feasibility window, so the space
                // advance is re-read at every breakpoint
                let space_advance = cur_font.glyph_advance(' ') as f64;
                let mut best: Option<(usize, f64, f64, f64)> = None;

                let window = line_start..active_nodes.len();
                for j in window {
                    let node = &active_nodes[j];
                    let mut r = (params.line_width + node.p_width - cur_width + skip_width)
                        / (num_spaces - node.p_spaces - 1.0);
                    if skip_width == 0.0 {
                        // finishing glue: the paragraph's last line is never
                        // stretched, and nodes that don't terminate here are
                        // no longer candidates
                        if r > 0.0 || r.is_nan() {
                            r = 0.0;
                            line_start = j + 1;
                        }
                    }
                    if r.is_nan() {
                        continue;
                    }

                    // node j can never satisfy a future, longer line either
                    if r < -space_advance * squish_tolerance {
                        line_start = j + 1;
                    }

                    if r >= -space_advance * squish_tolerance
                        && r <= space_advance * stretch_tolerance
                    {
                        let demerits = r * r + node.d_sum;
                        if best.map_or(true, |(_, _, _, d)| demerits < d) {
                            let line_width = cur_width - node.p_width - skip_width;
                            best = Some((node.n_index, line_width, r, demerits));
                        }
                    }
                }

                if let Some((best_start, best_lw, best_r, d_sum)) = best {
                    active_nodes.push(ActiveNode {
                        n_index: active_nodes.len(),
                        t_index: i,
                        p_width: cur_width,
                        p_spaces: num_spaces,
                        best_start,
                        best_lw,
                        best_r,
                        d_sum,
                    });
                }
                // no active node remains in range: unable to proceed
                if line_start == active_nodes.len() {
                    return Err(Error::ToleranceExhausted {
                        squish: squish_tolerance,
                        stretch: stretch_tolerance,
                    });
                }
            }
            Token::FontWeight(variant) => {
                cur_font = family.variant(*variant);
            }
            Token::Newline => {
                run_width = 0.0;
                // the last appended node is optimal by construction; walk its
                // predecessor chain back to the paragraph root
                let Some(end_node) = active_nodes.last() else {
                    return Err(Error::ToleranceExhausted {
                        squish: squish_tolerance,
                        stretch: stretch_tolerance,
                    });
                };

                let mut chain: Vec<usize> = vec![end_node.n_index];
                let mut next = end_node.best_start;
                while next > 0 {
                    chain.push(next);
                    next = active_nodes[next].best_start;
                }
                chain.reverse();

                for n_index in chain {
                    let node = &active_nodes[n_index];
                    breaks.breakpoints.push(node.t_index);
                    breaks.line_widths.push(node.best_lw);
                    breaks.adjustments.push(node.best_r);
                }

                active_nodes.clear();
                active_nodes.push(root(i));
                cur_width = params.first_indent;
                num_spaces = 0.0;
                line_start = 0;
            }
            Token::ColourChange { .. } | Token::Hyphen(_) | Token::FirstLineIndent(_) => {}
        }
    }

    if params.ragged {
        breaks.adjustments = vec![0.0; breaks.adjustments.len()];
    }
    Ok(breaks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenizer::{tokenize, TokenizerState};
    use crate::units::Pt;

    /// Fixed-width metrics: every glyph 500 units, spaces 250, no kerning.
    struct MonoMetrics;

    impl FontMetrics for MonoMetrics {
        fn glyph_advance(&self, ch: char) -> i32 {
            if ch == ' ' {
                250
            } else {
                500
            }
        }

        fn shaped_pair_advance(&self, ch: char, _next: char) -> (i32, i32) {
            (self.glyph_advance(ch), 0)
        }
    }

    const FONT: MonoMetrics = MonoMetrics;

    fn tokens_of(src: &str) -> Vec<Token> {
        let family = FontFamily::uniform(&FONT);
        let chars: Vec<char> = src.chars().collect();
        let state = TokenizerState {
            is_bold: false,
            is_italic: false,
            first_indent: 0.0,
            font_size: Pt(12.0),
        };
        tokenize(&chars, family, &state)
    }

    fn params(line_width: f64, ragged: bool) -> BreakParams {
        BreakParams {
            line_width,
            first_indent: 0.0,
            start_variant: FontVariant::Regular,
            ragged,
        }
    }

    fn break_justified(src: &str, line_width: f64) -> Breaks {
        let tokens = tokens_of(src);
        let family = FontFamily::uniform(&FONT);
        break_lines(&tokens, family, &params(line_width, false), 0.25, 2.0)
            .expect("feasible breaks")
    }

    #[test]
    fn simple_paragraph_breaks_into_justified_lines() {
        // each word is 4 glyphs = 2000 units; a line fits roughly 4 words
        let src = "aaaa bbbb cccc dddd eeee ffff gggg hhhh";
        let breaks = break_justified(src, 9000.0);

        assert!(breaks.breakpoints.len() >= 2);
        // last line ends at finishing glue and is never adjusted
        assert_eq!(*breaks.adjustments.last().unwrap(), 0.0);
        // non-final justified lines fill the target width exactly once the
        // adjustment is distributed over the line's inner spaces
        let tokens = tokens_of(src);
        for (line, &bp) in breaks.breakpoints.iter().enumerate() {
            if line + 1 == breaks.breakpoints.len() {
                continue;
            }
            let start = if line == 0 {
                0
            } else {
                breaks.breakpoints[line - 1] + 1
            };
            let spaces = tokens[start..bp]
                .iter()
                .filter(|t| matches!(t, Token::Skip(a) if *a != 0.0))
                .count() as f64;
            let adjusted = breaks.line_widths[line] + breaks.adjustments[line] * spaces;
            assert!(
                (adjusted - 9000.0).abs() < 1e-6,
                "line {line}: adjusted width {adjusted}"
            );
        }
    }

    #[test]
    fn breakpoints_are_strictly_increasing_skips() {
        let src = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj";
        let breaks = break_justified(src, 9000.0);
        let tokens = tokens_of(src);
        let mut prev = None;
        for &bp in &breaks.breakpoints {
            if let Some(p) = prev {
                assert!(bp > p);
            }
            assert!(matches!(tokens[bp], Token::Skip(_)));
            prev = Some(bp);
        }
    }

    #[test]
    fn line_widths_stay_within_the_tolerance_band() {
        let src = "aa bbbb cc dddddd ee ffff gg hhhhhh ii jjjj kk";
        let (squish, stretch) = (0.25, 2.0);
        let tokens = tokens_of(src);
        let family = FontFamily::uniform(&FONT);
        let breaks = break_lines(&tokens, family, &params(8000.0, false), squish, stretch)
            .expect("feasible breaks");
        for (line, &adj) in breaks.adjustments.iter().enumerate() {
            if line + 1 == breaks.adjustments.len() {
                continue;
            }
            assert!(adj >= -squish * 250.0 - 1e-9, "line {line} over-squished");
            assert!(adj <= stretch * 250.0 + 1e-9, "line {line} over-stretched");
        }
    }

    #[test]
    fn oversized_word_is_fatal() {
        let word: String = std::iter::repeat('x').take(50).collect();
        let tokens = tokens_of(&word);
        let family = FontFamily::uniform(&FONT);
        // line fits 10 glyphs
        let err = break_lines(&tokens, family, &params(5000.0, false), 0.25, 2.0).unwrap_err();
        match err {
            Error::WordTooLong { word: w } => assert_eq!(w.len(), 50),
            other => panic!("expected WordTooLong, got {other:?}"),
        }
        // widening the tolerances cannot help
        let err = break_lines(&tokens, family, &params(5000.0, false), 10.0, 10.0).unwrap_err();
        assert!(matches!(err, Error::WordTooLong { .. }));
    }

    #[test]
    fn ragged_mode_zeroes_every_adjustment() {
        let src = "aaaa bbbb cccc dddd eeee ffff gggg hhhh";
        let tokens = tokens_of(src);
        let family = FontFamily::uniform(&FONT);
        let breaks =
            break_lines(&tokens, family, &params(9000.0, true), 0.25, 2.0).expect("feasible");
        assert!(breaks.adjustments.iter().all(|&a| a == 0.0));
        assert!(!breaks.adjustments.is_empty());
    }

    #[test]
    fn forced_newline_always_breaks() {
        let breaks = break_justified("aa bb\ncc dd", 20000.0);
        // two paragraphs, one line each, even though both fit on one line
        assert_eq!(breaks.breakpoints.len(), 2);
        assert_eq!(breaks.adjustments, vec![0.0, 0.0]);
    }

    #[test]
    fn infeasible_tolerances_surface_the_attempt() {
        // one long word per line-ish width, with single spaces: spaces must
        // stretch far beyond a zero stretch tolerance
        let src = "aaaaaa bb cccccc dd";
        let tokens = tokens_of(src);
        let family = FontFamily::uniform(&FONT);
        let err = break_lines(&tokens, family, &params(4000.0, false), 0.0, 0.0).unwrap_err();
        match err {
            Error::ToleranceExhausted { squish, stretch } => {
                assert_eq!(squish, 0.0);
                assert_eq!(stretch, 0.0);
            }
            other => panic!("expected ToleranceExhausted, got {other:?}"),
        }
    }

    #[test]
    fn font_change_moves_the_space_advance() {
        struct VarMetrics {
            glyph: i32,
            space: i32,
        }
        impl FontMetrics for VarMetrics {
            fn glyph_advance(&self, ch: char) -> i32 {
                if ch == ' ' {
                    self.space
                } else {
                    self.glyph
                }
            }
            fn shaped_pair_advance(&self, ch: char, _next: char) -> (i32, i32) {
                (self.glyph_advance(ch), 0)
            }
        }

        let regular = VarMetrics {
            glyph: 500,
            space: 250,
        };
        let bold = VarMetrics {
            glyph: 600,
            space: 500,
        };
        let family = FontFamily {
            regular: &regular,
            bold: &bold,
            italic: &regular,
            bold_italic: &bold,
        };
        let chars: Vec<char> = "aaaa \u{000E}bbbb cccc dddd".chars().collect();
        let state = TokenizerState {
            is_bold: false,
            is_italic: false,
            first_indent: 0.0,
            font_size: Pt(12.0),
        };
        let tokens = tokenize(&chars, family, &state);
        let breaks =
            break_lines(&tokens, family, &params(9000.0, false), 0.25, 2.0).expect("feasible");
        assert!(!breaks.breakpoints.is_empty());
    }
}
