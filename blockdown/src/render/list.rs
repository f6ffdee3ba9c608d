//! List rendering
//!
//! Two targets: legacy flat text with bullet/number prefixes, and the
//! platform's native rich-text list structure. Nesting renders beneath the
//! parent item in both, bounded by the recursion ceiling.

use super::{check_depth, inline};
use crate::blocks::{RichListStyle, RichTextElement, RichTextRun, RunStyle};
use crate::document::ListMeta;
use crate::error::Error;
use crate::options::ListOptions;

/// Render a list as bullet/number-prefixed lines.
pub fn flat(meta: &ListMeta, options: &ListOptions, depth: usize) -> Result<String, Error> {
    let mut lines = Vec::new();
    flat_into(meta, options, 0, depth, &mut lines)?;
    Ok(lines.join("\n"))
}

fn flat_into(
    meta: &ListMeta,
    options: &ListOptions,
    indent_level: usize,
    depth: usize,
    lines: &mut Vec<String>,
) -> Result<(), Error> {
    check_depth(depth)?;

    let indent = "    ".repeat(indent_level);
    for (idx, item) in meta.items.iter().enumerate() {
        let prefix = if let Some(checked) = item.checked {
            (options.checkbox_prefix)(checked)
        } else if meta.ordered {
            format!("{}. ", meta.start + idx as u64)
        } else {
            "• ".to_string()
        };

        let text = inline::mrkdwn(&item.content, depth + 1)?;
        let mut item_lines = text.lines();
        let first = item_lines.next().unwrap_or("");
        lines.push(format!("{}{}{}", indent, prefix, first));
        for continuation in item_lines {
            lines.push(format!("{}{}", indent, continuation));
        }

        if let Some(nested) = &item.nested {
            flat_into(nested, options, indent_level + 1, depth + 1, lines)?;
        }
    }
    Ok(())
}

/// Render a list as native rich-text list elements.
///
/// A nested list interrupts its parent: the items so far flush as one
/// `rich_text_list`, the nested list follows at a deeper indent, and any
/// remaining items continue in a further element with their number offset
/// carried over.
pub fn rich(
    meta: &ListMeta,
    options: &ListOptions,
    depth: usize,
) -> Result<Vec<RichTextElement>, Error> {
    let mut out = Vec::new();
    rich_into(meta, options, 0, depth, &mut out)?;
    Ok(out)
}

fn rich_into(
    meta: &ListMeta,
    options: &ListOptions,
    indent: usize,
    depth: usize,
    out: &mut Vec<RichTextElement>,
) -> Result<(), Error> {
    check_depth(depth)?;

    let mut sections: Vec<RichTextElement> = Vec::new();
    let mut chunk_start = 0;
    for (idx, item) in meta.items.iter().enumerate() {
        let mut runs = Vec::new();
        if let Some(checked) = item.checked {
            runs.push(RichTextRun::text(
                (options.checkbox_prefix)(checked),
                RunStyle::default(),
            ));
        }
        runs.extend(inline::rich(&item.content, depth + 1)?);
        sections.push(RichTextElement::RichTextSection { elements: runs });

        if let Some(nested) = &item.nested {
            emit_chunk(out, &mut sections, meta, chunk_start, indent);
            chunk_start = idx + 1;
            rich_into(nested, options, indent + 1, depth + 1, out)?;
        }
    }
    emit_chunk(out, &mut sections, meta, chunk_start, indent);
    Ok(())
}

/// Flush accumulated item sections as one `rich_text_list` element.
fn emit_chunk(
    out: &mut Vec<RichTextElement>,
    sections: &mut Vec<RichTextElement>,
    meta: &ListMeta,
    chunk_start: usize,
    indent: usize,
) {
    if sections.is_empty() {
        return;
    }
    let offset = if meta.ordered {
        // First item number of this chunk, zero-based; 0 is the default.
        // A list may start at 0, so the subtraction must not wrap.
        (meta.start + chunk_start as u64)
            .checked_sub(1)
            .filter(|o| *o > 0)
    } else {
        None
    };
    out.push(RichTextElement::RichTextList {
        style: if meta.ordered {
            RichListStyle::Ordered
        } else {
            RichListStyle::Bullet
        },
        indent: if indent > 0 { Some(indent) } else { None },
        offset,
        elements: std::mem::take(sections),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Inline, ListItem};

    fn item(text: &str) -> ListItem {
        ListItem {
            checked: None,
            content: vec![Inline::Text(text.to_string())],
            nested: None,
        }
    }

    fn unordered(items: Vec<ListItem>) -> ListMeta {
        ListMeta {
            ordered: false,
            start: 1,
            items,
        }
    }

    #[test]
    fn test_flat_unordered_bullets() {
        let meta = unordered(vec![item("one"), item("two")]);
        let out = flat(&meta, &ListOptions::default(), 0).unwrap();
        assert_eq!(out, "• one\n• two");
    }

    #[test]
    fn test_flat_ordered_numbers_from_start() {
        let meta = ListMeta {
            ordered: true,
            start: 4,
            items: vec![item("a"), item("b"), item("c")],
        };
        let out = flat(&meta, &ListOptions::default(), 0).unwrap();
        assert_eq!(out, "4. a\n5. b\n6. c");
    }

    #[test]
    fn test_flat_checkbox_prefixes() {
        let mut done = item("done");
        done.checked = Some(true);
        let mut todo = item("todo");
        todo.checked = Some(false);

        let meta = unordered(vec![done, todo]);
        let out = flat(&meta, &ListOptions::default(), 0).unwrap();
        assert_eq!(out, "☑ done\n☐ todo");
    }

    #[test]
    fn test_flat_custom_checkbox_prefix() {
        let mut done = item("done");
        done.checked = Some(true);
        let meta = unordered(vec![done]);

        let options = ListOptions {
            checkbox_prefix: |checked| if checked { "[x] " } else { "[ ] " }.to_string(),
            ..Default::default()
        };
        assert_eq!(flat(&meta, &options, 0).unwrap(), "[x] done");
    }

    #[test]
    fn test_flat_nested_list_indents() {
        let mut outer = item("outer");
        outer.nested = Some(Box::new(unordered(vec![item("inner")])));
        let meta = unordered(vec![outer, item("after")]);

        let out = flat(&meta, &ListOptions::default(), 0).unwrap();
        assert_eq!(out, "• outer\n    • inner\n• after");
    }

    #[test]
    fn test_rich_single_bullet_list() {
        let meta = unordered(vec![item("one"), item("two")]);
        let elements = rich(&meta, &ListOptions::default(), 0).unwrap();

        assert_eq!(elements.len(), 1);
        let RichTextElement::RichTextList {
            style,
            indent,
            offset,
            elements: sections,
        } = &elements[0]
        else {
            panic!("expected list element");
        };
        assert_eq!(*style, RichListStyle::Bullet);
        assert_eq!(*indent, None);
        assert_eq!(*offset, None);
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_rich_nested_list_splits_chunks() {
        let mut outer = item("outer");
        outer.nested = Some(Box::new(unordered(vec![item("inner")])));
        let meta = ListMeta {
            ordered: true,
            start: 1,
            items: vec![outer, item("after")],
        };

        let elements = rich(&meta, &ListOptions::default(), 0).unwrap();
        assert_eq!(elements.len(), 3);

        let RichTextElement::RichTextList { indent, .. } = &elements[1] else {
            panic!("expected nested list element");
        };
        assert_eq!(*indent, Some(1));

        // The continuation chunk resumes numbering after the first item
        let RichTextElement::RichTextList { offset, .. } = &elements[2] else {
            panic!("expected continuation element");
        };
        assert_eq!(*offset, Some(1));
    }

    #[test]
    fn test_ordered_list_starting_at_zero() {
        let meta = ListMeta {
            ordered: true,
            start: 0,
            items: vec![item("zero"), item("one")],
        };
        assert_eq!(flat(&meta, &ListOptions::default(), 0).unwrap(), "0. zero\n1. one");

        let elements = rich(&meta, &ListOptions::default(), 0).unwrap();
        let RichTextElement::RichTextList { offset, .. } = &elements[0] else {
            panic!("expected list element");
        };
        assert_eq!(*offset, None);
    }

    #[test]
    fn test_rich_depth_ceiling() {
        let mut meta = unordered(vec![item("leaf")]);
        for _ in 0..60 {
            let mut parent = item("parent");
            parent.nested = Some(Box::new(meta));
            meta = unordered(vec![parent]);
        }
        assert!(rich(&meta, &ListOptions::default(), 0).is_err());
        assert!(flat(&meta, &ListOptions::default(), 0).is_err());
    }
}
