//! Markdown to message-block transformation
//!
//! This crate parses GitHub-flavored Markdown and assembles it into the
//! structured block payload a chat platform message carries: sections,
//! headers, images, dividers, tables and rich-text lists. The pipeline is
//! parse, assemble, validate: the tokenizer's event stream becomes a
//! document tree, the assembler walks the tree and dispatches each node to
//! a renderer, and every emitted block honors the platform's field-length
//! and count ceilings.
//!
//! ```
//! use blockdown::{to_blocks, Options};
//!
//! let blocks = to_blocks("# Release\n\nIt *shipped*.", &Options::default()).unwrap();
//! assert_eq!(blocks.len(), 2);
//! ```

mod assembler;
pub mod blocks;
mod document;
mod error;
mod html;
pub mod limits;
mod options;
mod render;
mod text;
mod url;

pub use blocks::builders;
pub use blocks::{
    ColumnAlign, ColumnSetting, MessageBlock, RichListStyle, RichTextElement, RichTextRun,
    RunStyle, TableCell, TextKind, TextObject,
};
pub use error::{Error, LimitError, ParseError, SecurityError, ValidationError};
pub use options::{ListMode, ListOptions, Options};

use text::utf16_len;

/// Transform Markdown text into a sequence of message blocks.
///
/// # Parameters
///
/// - `markdown`: the input text; must be non-empty and at most
///   [`limits::MAX_INPUT_LENGTH`] UTF-16 code units.
/// - `options`: rendering options, see [`Options`].
///
/// # Errors
///
/// Returns a [`ValidationError`] for empty or oversized input and for
/// structural violations found while building blocks, a [`ParseError`] when
/// the token stream cannot be interpreted, a [`LimitError`] when the output
/// would exceed the block-count ceiling, and a [`SecurityError`] when a
/// block field carries a URL with a disallowed scheme.
pub fn to_blocks(markdown: &str, options: &Options) -> Result<Vec<MessageBlock>, Error> {
    if markdown.is_empty() {
        return Err(ValidationError::EmptyInput.into());
    }
    let length = utf16_len(markdown);
    if length > limits::MAX_INPUT_LENGTH {
        return Err(ValidationError::InputTooLong {
            length,
            max: limits::MAX_INPUT_LENGTH,
        }
        .into());
    }

    let nodes = document::parse_document(markdown)?;
    assembler::assemble(&nodes, options)
}
