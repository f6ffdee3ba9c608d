//! Block quote rendering
//!
//! Quotes flatten to mrkdwn text: children render first, then every line
//! gains a `> ` prefix. Nested quotes recurse before prefixing, so each
//! nesting level contributes one more prefix.

use super::{check_depth, fenced, inline, list};
use crate::document::DocumentNode;
use crate::error::Error;
use crate::options::Options;
use itertools::Itertools;

/// Render the children of a block quote to prefixed mrkdwn text.
pub fn flat(children: &[DocumentNode], options: &Options, depth: usize) -> Result<String, Error> {
    check_depth(depth)?;

    let mut parts = Vec::new();
    for child in children {
        match child {
            DocumentNode::Paragraph(inlines) => {
                parts.push(inline::mrkdwn(inlines, depth + 1)?);
            }
            DocumentNode::Heading { content, .. } => {
                let text = inline::mrkdwn(content, depth + 1)?;
                parts.push(format!("*{}*", text));
            }
            DocumentNode::List(meta) => {
                parts.push(list::flat(meta, &options.lists, depth + 1)?);
            }
            DocumentNode::CodeBlock { code, .. } => parts.push(fenced(code)),
            DocumentNode::BlockQuote(inner) => parts.push(flat(inner, options, depth + 1)?),
            DocumentNode::ThematicBreak => parts.push("---".to_string()),
            DocumentNode::Table(_) | DocumentNode::HtmlFragment(_) => {
                log::debug!("skipping unsupported node inside block quote");
            }
        }
    }

    let joined = parts.join("\n");
    Ok(joined.lines().map(|line| format!("> {}", line)).join("\n"))
}
