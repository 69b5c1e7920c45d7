use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    /// The source text contains an unbreakable word that is longer than the
    /// maximum line width. Fatal for the paragraph; never retried.
    #[error("unbreakable word is longer than the maximum line width: {word}")]
    WordTooLong { word: String },

    /// No feasible set of breakpoints exists at the given tolerances. The
    /// controller retries with escalated tolerances before surfacing this.
    #[error("unable to break lines at the current tolerances (squish: {squish}, stretch: {stretch})")]
    ToleranceExhausted { squish: f64, stretch: f64 },

    /// The draw target area is narrower than the configured line width
    #[error("target area must be at least as wide as the maximum line width")]
    AreaTooNarrow,

    /// The draw target area is shorter than a single line of text
    #[error("target area must be at least as tall as the font leading")]
    AreaTooShort,

    /// Leading must be a positive number of points
    #[error("font leading must be greater than 0")]
    InvalidLeading,

    /// All lines have already been drawn; there is nothing left to do
    #[error("source text buffer is empty")]
    BufferExhausted,
}
