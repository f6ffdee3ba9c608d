//! Markdown event stream parser
//!
//! Converts the tokenizer's event stream into the document tree. Inline
//! spans and block scopes are tracked with explicit stacks, so the tree
//! comes out properly nested regardless of how deeply the source nests.

use super::{Alignment, DocumentNode, Inline, ListItem, ListMeta, TableNode};
use crate::error::ParseError;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Parse Markdown/GFM source into a document tree.
///
/// Tables, strikethrough and task lists are enabled; everything else is
/// CommonMark. The tokenizer guarantees balanced events for well-formed
/// input, so an unbalanced stream surfaces as [`ParseError`].
pub fn parse_document(markdown: &str) -> Result<Vec<DocumentNode>, ParseError> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, options) {
        builder.process_event(event)?;
    }
    builder.finish()
}

/// An open inline span with the sibling run it interrupted.
struct InlineFrame {
    kind: SpanKind,
    saved: Vec<Inline>,
}

enum SpanKind {
    Strong,
    Emphasis,
    Strikethrough,
    Link { url: String },
    Image { url: String, title: Option<String> },
}

/// An open block-level scope.
enum BlockScope {
    Heading {
        level: u8,
    },
    Quote(Vec<DocumentNode>),
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
        current: Option<ListItem>,
    },
    Table {
        alignments: Vec<Alignment>,
        header: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
        current_row: Vec<Vec<Inline>>,
        in_header: bool,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Html(String),
}

struct TreeBuilder {
    /// Completed top-level nodes
    nodes: Vec<DocumentNode>,
    /// The current run of inline siblings
    inlines: Vec<Inline>,
    /// Open styled spans
    inline_stack: Vec<InlineFrame>,
    /// Open block scopes
    blocks: Vec<BlockScope>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            inlines: Vec::new(),
            inline_stack: Vec::new(),
            blocks: Vec::new(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) -> Result<(), ParseError> {
        match event {
            Event::Start(tag) => self.handle_start_tag(tag),
            Event::End(tag_end) => self.handle_end_tag(tag_end),
            Event::Text(text) => {
                self.handle_text(text.to_string());
                Ok(())
            }
            Event::Code(code) => {
                self.inlines.push(Inline::Code(code.to_string()));
                Ok(())
            }
            Event::SoftBreak => {
                self.inlines.push(Inline::Text(" ".to_string()));
                Ok(())
            }
            Event::HardBreak => {
                self.inlines.push(Inline::LineBreak);
                Ok(())
            }
            Event::Html(html) => {
                self.handle_block_html(html.to_string());
                Ok(())
            }
            Event::InlineHtml(html) => {
                // Inline HTML has no mrkdwn counterpart; keep it as literal text
                self.inlines.push(Inline::Text(html.to_string()));
                Ok(())
            }
            Event::Rule => self.push_node(DocumentNode::ThematicBreak),
            Event::TaskListMarker(checked) => {
                self.handle_task_marker(checked);
                Ok(())
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                // Math renders as inline code
                self.inlines.push(Inline::Code(math.to_string()));
                Ok(())
            }
            Event::FootnoteReference(_) => Ok(()),
        }
    }

    fn handle_start_tag(&mut self, tag: Tag<'_>) -> Result<(), ParseError> {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading { level, .. } => {
                self.blocks.push(BlockScope::Heading {
                    level: level as u8,
                });
            }
            Tag::BlockQuote(_) => {
                self.blocks.push(BlockScope::Quote(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    pulldown_cmark::CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                        Some(lang.to_string())
                    }
                    _ => None,
                };
                self.blocks.push(BlockScope::CodeBlock {
                    language,
                    code: String::new(),
                });
            }
            Tag::List(start) => {
                // A nested list opening inside a tight item: the pending
                // inline text belongs to the enclosing item, not the list
                self.flush_pending_into_item();
                self.blocks.push(BlockScope::List {
                    ordered: start.is_some(),
                    start: start.unwrap_or(1),
                    items: Vec::new(),
                    current: None,
                });
            }
            Tag::Item => {
                if let Some(BlockScope::List { current, .. }) = self.blocks.last_mut() {
                    *current = Some(ListItem::new());
                }
            }
            Tag::Table(alignments) => {
                self.blocks.push(BlockScope::Table {
                    alignments: alignments.iter().map(|a| (*a).into()).collect(),
                    header: Vec::new(),
                    rows: Vec::new(),
                    current_row: Vec::new(),
                    in_header: false,
                });
            }
            Tag::TableHead => {
                if let Some(BlockScope::Table { in_header, .. }) = self.blocks.last_mut() {
                    *in_header = true;
                }
            }
            Tag::TableRow => {
                if let Some(BlockScope::Table { current_row, .. }) = self.blocks.last_mut() {
                    current_row.clear();
                }
            }
            Tag::TableCell => {
                self.inlines.clear();
            }
            Tag::Strong => self.open_span(SpanKind::Strong),
            Tag::Emphasis => self.open_span(SpanKind::Emphasis),
            Tag::Strikethrough => self.open_span(SpanKind::Strikethrough),
            Tag::Link { dest_url, .. } => self.open_span(SpanKind::Link {
                url: dest_url.to_string(),
            }),
            Tag::Image {
                dest_url, title, ..
            } => self.open_span(SpanKind::Image {
                url: dest_url.to_string(),
                title: if title.is_empty() {
                    None
                } else {
                    Some(title.to_string())
                },
            }),
            Tag::HtmlBlock => {
                self.blocks.push(BlockScope::Html(String::new()));
            }
            Tag::Superscript
            | Tag::Subscript
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => {}
        }
        Ok(())
    }

    fn handle_end_tag(&mut self, tag_end: TagEnd) -> Result<(), ParseError> {
        match tag_end {
            TagEnd::Paragraph => self.finish_paragraph(),
            TagEnd::Heading(_) => self.finish_heading(),
            TagEnd::BlockQuote(_) => self.finish_quote(),
            TagEnd::CodeBlock => self.finish_code_block(),
            TagEnd::List(_) => self.finish_list(),
            TagEnd::Item => self.finish_item(),
            TagEnd::Table => self.finish_table(),
            TagEnd::TableHead => {
                if let Some(BlockScope::Table { in_header, .. }) = self.blocks.last_mut() {
                    *in_header = false;
                }
                Ok(())
            }
            TagEnd::TableRow => {
                self.finish_table_row();
                Ok(())
            }
            TagEnd::TableCell => {
                self.finish_table_cell();
                Ok(())
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link
            | TagEnd::Image => self.close_span(tag_end),
            TagEnd::HtmlBlock => self.finish_html_block(),
            TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::MetadataBlock(_) => Ok(()),
        }
    }

    fn handle_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        match self.blocks.last_mut() {
            Some(BlockScope::CodeBlock { code, .. }) => code.push_str(&text),
            Some(BlockScope::Html(buffer)) => buffer.push_str(&text),
            _ => self.inlines.push(Inline::Text(text)),
        }
    }

    fn handle_block_html(&mut self, html: String) {
        match self.blocks.last_mut() {
            Some(BlockScope::Html(buffer)) => buffer.push_str(&html),
            // HTML arriving outside an HtmlBlock scope still forms a fragment
            _ => self.nodes.push(DocumentNode::HtmlFragment(html)),
        }
    }

    /// Move pending inline content into the currently open list item.
    fn flush_pending_into_item(&mut self) {
        if self.inlines.is_empty() {
            return;
        }
        if let Some(BlockScope::List {
            current: Some(item),
            ..
        }) = self.blocks.last_mut()
        {
            let pending = std::mem::take(&mut self.inlines);
            if !item.content.is_empty() {
                item.content.push(Inline::LineBreak);
            }
            item.content.extend(pending);
        }
    }

    fn handle_task_marker(&mut self, checked: bool) {
        if let Some(BlockScope::List {
            current: Some(item),
            ..
        }) = self.blocks.last_mut()
        {
            item.checked = Some(checked);
        }
    }

    fn open_span(&mut self, kind: SpanKind) {
        let saved = std::mem::take(&mut self.inlines);
        self.inline_stack.push(InlineFrame { kind, saved });
    }

    fn close_span(&mut self, tag_end: TagEnd) -> Result<(), ParseError> {
        let frame = self.inline_stack.pop().ok_or(ParseError::UnbalancedEvent {
            kind: "inline span",
        })?;
        let children = std::mem::replace(&mut self.inlines, frame.saved);

        let node = match (frame.kind, tag_end) {
            (SpanKind::Strong, TagEnd::Strong) => Inline::Strong(children),
            (SpanKind::Emphasis, TagEnd::Emphasis) => Inline::Emphasis(children),
            (SpanKind::Strikethrough, TagEnd::Strikethrough) => Inline::Strikethrough(children),
            (SpanKind::Link { url }, TagEnd::Link) => Inline::Link { url, children },
            (SpanKind::Image { url, title }, TagEnd::Image) => Inline::Image {
                url,
                alt: plain_text_of(&children),
                title,
            },
            _ => {
                return Err(ParseError::UnbalancedEvent {
                    kind: "inline span",
                })
            }
        };
        self.inlines.push(node);
        Ok(())
    }

    fn finish_paragraph(&mut self) -> Result<(), ParseError> {
        let inlines = std::mem::take(&mut self.inlines);
        if inlines.is_empty() {
            return Ok(());
        }
        self.push_node(DocumentNode::Paragraph(inlines))
    }

    fn finish_heading(&mut self) -> Result<(), ParseError> {
        let Some(BlockScope::Heading { level }) = self.blocks.pop() else {
            return Err(ParseError::UnbalancedEvent { kind: "heading" });
        };
        let content = std::mem::take(&mut self.inlines);
        self.push_node(DocumentNode::Heading { level, content })
    }

    fn finish_quote(&mut self) -> Result<(), ParseError> {
        let Some(BlockScope::Quote(children)) = self.blocks.pop() else {
            return Err(ParseError::UnbalancedEvent { kind: "blockquote" });
        };
        self.push_node(DocumentNode::BlockQuote(children))
    }

    fn finish_code_block(&mut self) -> Result<(), ParseError> {
        let Some(BlockScope::CodeBlock { language, code }) = self.blocks.pop() else {
            return Err(ParseError::UnbalancedEvent { kind: "code block" });
        };
        self.push_node(DocumentNode::CodeBlock { language, code })
    }

    fn finish_list(&mut self) -> Result<(), ParseError> {
        let Some(BlockScope::List {
            ordered,
            start,
            items,
            ..
        }) = self.blocks.pop()
        else {
            return Err(ParseError::UnbalancedEvent { kind: "list" });
        };
        self.push_node(DocumentNode::List(ListMeta {
            ordered,
            start,
            items,
        }))
    }

    fn finish_item(&mut self) -> Result<(), ParseError> {
        // Tight list items carry their text directly, without a paragraph
        let pending = std::mem::take(&mut self.inlines);

        let Some(BlockScope::List { items, current, .. }) = self.blocks.last_mut() else {
            return Err(ParseError::UnbalancedEvent { kind: "list item" });
        };
        let Some(mut item) = current.take() else {
            return Err(ParseError::UnbalancedEvent { kind: "list item" });
        };
        if !pending.is_empty() {
            if !item.content.is_empty() {
                item.content.push(Inline::LineBreak);
            }
            item.content.extend(pending);
        }
        items.push(item);
        Ok(())
    }

    fn finish_table(&mut self) -> Result<(), ParseError> {
        let Some(BlockScope::Table {
            alignments,
            header,
            rows,
            ..
        }) = self.blocks.pop()
        else {
            return Err(ParseError::UnbalancedEvent { kind: "table" });
        };
        self.push_node(DocumentNode::Table(TableNode {
            alignments,
            header,
            rows,
        }))
    }

    fn finish_table_row(&mut self) {
        if let Some(BlockScope::Table {
            header,
            rows,
            current_row,
            in_header,
            ..
        }) = self.blocks.last_mut()
        {
            let row = std::mem::take(current_row);
            if *in_header {
                *header = row;
            } else {
                rows.push(row);
            }
        }
    }

    fn finish_table_cell(&mut self) {
        let cell = std::mem::take(&mut self.inlines);
        if let Some(BlockScope::Table { current_row, .. }) = self.blocks.last_mut() {
            current_row.push(cell);
        }
    }

    fn finish_html_block(&mut self) -> Result<(), ParseError> {
        let Some(BlockScope::Html(buffer)) = self.blocks.pop() else {
            return Err(ParseError::UnbalancedEvent { kind: "html block" });
        };
        if buffer.trim().is_empty() {
            return Ok(());
        }
        self.push_node(DocumentNode::HtmlFragment(buffer))
    }

    /// Route a completed node into the innermost open scope.
    fn push_node(&mut self, node: DocumentNode) -> Result<(), ParseError> {
        match self.blocks.last_mut() {
            Some(BlockScope::Quote(children)) => {
                children.push(node);
                Ok(())
            }
            Some(BlockScope::List {
                current: Some(item),
                ..
            }) => {
                absorb_into_item(item, node);
                Ok(())
            }
            _ => {
                self.nodes.push(node);
                Ok(())
            }
        }
    }

    fn finish(mut self) -> Result<Vec<DocumentNode>, ParseError> {
        // A well-formed stream leaves nothing open; stray inline content
        // still becomes a paragraph rather than being dropped.
        self.finish_paragraph()?;
        if !self.blocks.is_empty() || !self.inline_stack.is_empty() {
            return Err(ParseError::UnbalancedEvent { kind: "document" });
        }
        Ok(self.nodes)
    }
}

/// Fold a node produced inside a list item into that item.
///
/// Items own inline content plus at most one nested list, so paragraphs
/// join the item's content and lists nest beneath it. Code blocks keep
/// their text as an inline code span; anything else has no place inside
/// an item and is dropped.
fn absorb_into_item(item: &mut ListItem, node: DocumentNode) {
    match node {
        DocumentNode::Paragraph(inlines) => {
            if !item.content.is_empty() {
                item.content.push(Inline::LineBreak);
            }
            item.content.extend(inlines);
        }
        DocumentNode::List(meta) => match item.nested.as_mut() {
            Some(existing) => existing.items.extend(meta.items),
            None => item.nested = Some(Box::new(meta)),
        },
        DocumentNode::CodeBlock { code, .. } => {
            if !item.content.is_empty() {
                item.content.push(Inline::LineBreak);
            }
            item.content.push(Inline::Code(code));
        }
        other => {
            log::debug!("dropping unsupported node inside list item: {:?}", other);
        }
    }
}

/// Flatten inline content to its plain text.
fn plain_text_of(nodes: &[Inline]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(children)
            | Inline::Emphasis(children)
            | Inline::Strikethrough(children)
            | Inline::Link { children, .. } => out.push_str(&plain_text_of(children)),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::LineBreak => out.push('\n'),
        }
    }
    out
}
