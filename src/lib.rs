mod colour;
pub use colour::*;

mod content;
pub use content::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod format;
pub use format::*;

mod rect;
pub use rect::*;

/// Paragraph layout: tokenization, optimal line breaking, and line writing
pub mod text;

mod units;
pub use units::*;

/// Re-export pdf-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
