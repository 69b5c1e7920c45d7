//! Paragraph layout for PDF content streams.
//!
//! The pipeline has three stages, driven by a [TextController]:
//!
//! 1. The [tokenizer](token::Token) converts [FormatText](crate::FormatText)
//!    into a flat token stream of glyph boxes, breakable skips, forced
//!    newlines, and zero-width style markers.
//! 2. The line breaker runs a Knuth-Plass style dynamic program over the
//!    token stream, choosing the breakpoints that minimize the total squared
//!    space adjustment across each paragraph.
//! 3. The line writer replays the tokens between breakpoints, emitting
//!    show-text operations to a [ContentSink](crate::ContentSink) with
//!    justification, alignment offsets, and mid-line font/colour switches.
//!
//! A controller is constructed once per source text (tokenizing and breaking
//! eagerly, which can fail) and then drawn incrementally: each
//! [TextController::draw] call fills one target area and leaves the cursor
//! positioned for the next, so a long paragraph can flow across several pages
//! or columns without re-running the breaker.

mod breaker;
mod controller;
pub mod hyphen;
mod token;
mod tokenizer;
mod writer;

pub use controller::*;
pub use token::*;
