//! Document tree model
//!
//! This module defines the structured representation of a parsed Markdown
//! document: block-level nodes, inline nodes, list metadata and table
//! nodes. The tree is built once from the tokenizer's event stream and is
//! read-only input to the assembler; the engine never mutates it.

mod parser;

pub use parser::parse_document;

/// Block-level document node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// A heading with level and inline content
    Heading {
        /// Heading level (1 = h1, 2 = h2, etc.)
        level: u8,
        /// Inline content of the heading
        content: Vec<Inline>,
    },

    /// A paragraph of inline content
    Paragraph(Vec<Inline>),

    /// An ordered, unordered or task list
    List(ListMeta),

    /// A pipe-syntax table
    Table(TableNode),

    /// A block quote containing other nodes
    BlockQuote(Vec<DocumentNode>),

    /// A fenced or indented code block
    CodeBlock {
        /// Language hint from the fence info string
        language: Option<String>,
        /// Raw code content
        code: String,
    },

    /// A horizontal rule
    ThematicBreak,

    /// A raw HTML fragment, preserved verbatim for later decomposition
    HtmlFragment(String),
}

/// Inline content node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text
    Text(String),

    /// Bold span
    Strong(Vec<Inline>),

    /// Italic span
    Emphasis(Vec<Inline>),

    /// Strikethrough span
    Strikethrough(Vec<Inline>),

    /// Inline code span; content is never re-escaped for markers
    Code(String),

    /// Hyperlink with inline label
    Link {
        /// Destination URL as written in the source
        url: String,
        /// Inline label content
        children: Vec<Inline>,
    },

    /// Inline image reference
    Image {
        /// Source URL as written
        url: String,
        /// Alt text
        alt: String,
        /// Optional hover title
        title: Option<String>,
    },

    /// Hard line break
    LineBreak,
}

impl Inline {
    /// Whether this node is plain unstyled text with no link or image.
    pub fn is_plain(&self) -> bool {
        matches!(self, Inline::Text(_))
    }
}

/// Metadata for a list node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMeta {
    /// Ordered (numbered) versus unordered (bulleted)
    pub ordered: bool,
    /// First item number for ordered lists
    pub start: u64,
    /// The list's items, in order
    pub items: Vec<ListItem>,
}

/// One list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Task-list checkbox state, when the item carries one
    pub checked: Option<bool>,
    /// The item's own inline content
    pub content: Vec<Inline>,
    /// A list nested beneath this item
    pub nested: Option<Box<ListMeta>>,
}

impl ListItem {
    /// Create a new empty list item
    pub fn new() -> Self {
        Self {
            checked: None,
            content: Vec::new(),
            nested: None,
        }
    }
}

impl Default for ListItem {
    fn default() -> Self {
        Self::new()
    }
}

/// A pipe-syntax table as parsed from Markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    /// Column alignments (left, center, right, none), one per column
    pub alignments: Vec<Alignment>,
    /// Header row cells, each cell a run of inline content
    pub header: Vec<Vec<Inline>>,
    /// Body rows, each row a sequence of cells
    pub rows: Vec<Vec<Vec<Inline>>>,
}

/// Table column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(align: pulldown_cmark::Alignment) -> Self {
        match align {
            pulldown_cmark::Alignment::None => Alignment::None,
            pulldown_cmark::Alignment::Left => Alignment::Left,
            pulldown_cmark::Alignment::Center => Alignment::Center,
            pulldown_cmark::Alignment::Right => Alignment::Right,
        }
    }
}
