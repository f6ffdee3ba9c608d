//! Block assembly
//!
//! The assembler walks the top-level document nodes in order, dispatching
//! each to a renderer and collecting the output blocks. Adjacent
//! paragraphs accumulate into one section block; everything else closes
//! the open section first and emits its own block(s). The block-count
//! ceiling is checked once the walk completes.

use crate::blocks::builders;
use crate::blocks::MessageBlock;
use crate::document::{DocumentNode, Inline};
use crate::error::{Error, LimitError};
use crate::html;
use crate::limits;
use crate::options::{ListMode, Options};
use crate::render::{fenced, inline, list, quote, table};
use crate::text::utf16_len;
use crate::url;

/// The open section's pending text buffer.
#[derive(Debug, Default)]
struct Accumulator {
    buffer: String,
}

impl Accumulator {
    /// Append a rendered text run, joining with a newline. When the join
    /// would push the buffer past the section ceiling, the buffer flushes
    /// first and the run starts a fresh one.
    fn append(&mut self, text: &str, out: &mut Vec<MessageBlock>) -> Result<(), Error> {
        if self.buffer.is_empty() {
            self.buffer.push_str(text);
            return Ok(());
        }
        if utf16_len(&self.buffer) + 1 + utf16_len(text) > limits::MAX_TEXT_LENGTH {
            self.flush(out)?;
            self.buffer.push_str(text);
        } else {
            self.buffer.push('\n');
            self.buffer.push_str(text);
        }
        Ok(())
    }

    /// Close the open section, if any, into an output block.
    fn flush(&mut self, out: &mut Vec<MessageBlock>) -> Result<(), Error> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        out.push(builders::section(&self.buffer)?);
        self.buffer.clear();
        Ok(())
    }
}

/// Assemble parsed document nodes into output blocks.
pub fn assemble(nodes: &[DocumentNode], options: &Options) -> Result<Vec<MessageBlock>, Error> {
    let mut out = Vec::new();
    let mut open = Accumulator::default();

    for node in nodes {
        match node {
            DocumentNode::Paragraph(inlines) => {
                paragraph(inlines, &mut open, &mut out)?;
            }

            DocumentNode::Heading { content, .. } => {
                open.flush(&mut out)?;
                heading(content, &mut out)?;
            }

            DocumentNode::List(meta) => {
                open.flush(&mut out)?;
                match options.lists.mode {
                    ListMode::RichText => {
                        let elements = list::rich(meta, &options.lists, 0)?;
                        if !elements.is_empty() {
                            out.push(builders::rich_text(elements)?);
                        }
                    }
                    ListMode::Flat => {
                        let text = list::flat(meta, &options.lists, 0)?;
                        if !text.is_empty() {
                            out.push(builders::section(&text)?);
                        }
                    }
                }
            }

            DocumentNode::Table(node) => {
                open.flush(&mut out)?;
                let model = table::from_markdown(node, 0)?;
                out.push(table::build(&model, 0)?);
            }

            DocumentNode::BlockQuote(children) => {
                open.flush(&mut out)?;
                let text = quote::flat(children, options, 0)?;
                if !text.is_empty() {
                    out.push(builders::section(&text)?);
                }
            }

            DocumentNode::CodeBlock { code, .. } => {
                open.flush(&mut out)?;
                out.push(builders::section(&fenced(code))?);
            }

            DocumentNode::ThematicBreak => {
                open.flush(&mut out)?;
                out.push(builders::divider());
            }

            DocumentNode::HtmlFragment(fragment) => {
                html_fragment(fragment, &mut open, &mut out)?;
            }
        }
    }
    open.flush(&mut out)?;

    if !limits::fits_block_count(out.len()) {
        return Err(LimitError::BlockCount {
            count: out.len(),
            max: limits::MAX_BLOCK_COUNT,
        }
        .into());
    }
    Ok(out)
}

/// Render a paragraph, splitting around direct-child images: text between
/// images accumulates, each image emits its own block.
fn paragraph(
    inlines: &[Inline],
    open: &mut Accumulator,
    out: &mut Vec<MessageBlock>,
) -> Result<(), Error> {
    let mut segment_start = 0;
    for (idx, node) in inlines.iter().enumerate() {
        let Inline::Image { url, alt, title } = node else {
            continue;
        };

        let text = inline::mrkdwn(&inlines[segment_start..idx], 0)?;
        if !text.trim().is_empty() {
            open.append(text.trim(), out)?;
        }
        segment_start = idx + 1;

        if url::is_valid_image(url) {
            open.flush(out)?;
            out.push(builders::image(url, alt, title.as_deref())?);
        } else {
            log::warn!("skipping image with invalid url: {}", url);
        }
    }

    let text = inline::mrkdwn(&inlines[segment_start..], 0)?;
    if !text.trim().is_empty() {
        open.append(text.trim(), out)?;
    }
    Ok(())
}

/// Render a heading: plain text for the header block, with a section
/// fallback when stripping formatting leaves nothing.
fn heading(content: &[Inline], out: &mut Vec<MessageBlock>) -> Result<(), Error> {
    let plain = inline::plain(content, 0)?;
    let trimmed = plain.trim();
    if !trimmed.is_empty() {
        out.push(builders::header(trimmed)?);
        return Ok(());
    }
    let formatted = inline::mrkdwn(content, 0)?;
    if !formatted.trim().is_empty() {
        out.push(builders::section(&formatted)?);
    }
    Ok(())
}

/// Handle a raw HTML fragment: decompose a table or image, or skip it.
fn html_fragment(
    fragment: &str,
    open: &mut Accumulator,
    out: &mut Vec<MessageBlock>,
) -> Result<(), Error> {
    if let Some(parsed) = html::parse_table(fragment) {
        open.flush(out)?;
        let model = table::from_html(parsed);
        out.push(table::build(&model, 0)?);
        return Ok(());
    }
    if let Some(image) = html::parse_image(fragment) {
        if url::is_valid_image(&image.url) {
            open.flush(out)?;
            out.push(builders::image(&image.url, &image.alt, None)?);
        } else {
            log::warn!("skipping html image with invalid url: {}", image.url);
        }
        return Ok(());
    }
    log::warn!("skipping html fragment with no table or image");
    Ok(())
}
