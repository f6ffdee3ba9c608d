//! Output block schema
//!
//! The platform's message block shapes as closed sum types, serialized with
//! a `type` tag exactly as the block API expects. Blocks are immutable once
//! constructed; use the [`builders`] module to construct validated values.

pub mod builders;

use serde::Serialize;

/// One unit of the platform's structured-message schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBlock {
    /// Formatted text block
    Section { text: TextObject },

    /// Large plain-text heading
    Header { text: TextObject },

    /// Horizontal separator
    Divider,

    /// Standalone image
    Image {
        image_url: String,
        alt_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<TextObject>,
    },

    /// Tabular data
    Table {
        rows: Vec<Vec<TableCell>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        column_settings: Option<Vec<ColumnSetting>>,
    },

    /// Structured rich-text container (lists, quotes, preformatted runs)
    RichText { elements: Vec<RichTextElement> },

    /// Embedded video player
    Video {
        title: TextObject,
        #[serde(skip_serializing_if = "Option::is_none")]
        title_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<TextObject>,
        video_url: String,
        alt_text: String,
        thumbnail_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        author_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        provider_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        provider_icon_url: Option<String>,
    },

    /// Reference to a remote file
    File { external_id: String, source: String },
}

/// A text object carried inside section, header, image and video blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
}

impl TextObject {
    /// A formatted (mrkdwn) text object.
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
        }
    }

    /// A plain-text object.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
        }
    }
}

/// Whether a text object is formatted or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    Mrkdwn,
    PlainText,
}

/// One table cell: raw literal text or a rich-text element tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableCell {
    RawText { text: String },
    RichText { elements: Vec<RichTextElement> },
}

/// Per-column table display settings. The field is omitted entirely when
/// no alignment needs stating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSetting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<ColumnAlign>,
}

impl ColumnSetting {
    pub fn aligned(align: ColumnAlign) -> Self {
        Self { align: Some(align) }
    }
}

/// Explicit column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

/// One element of a rich-text block or rich-text cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextElement {
    RichTextSection {
        elements: Vec<RichTextRun>,
    },
    RichTextList {
        style: RichListStyle,
        #[serde(skip_serializing_if = "Option::is_none")]
        indent: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        offset: Option<u64>,
        elements: Vec<RichTextElement>,
    },
    RichTextQuote {
        elements: Vec<RichTextRun>,
    },
    RichTextPreformatted {
        elements: Vec<RichTextRun>,
    },
}

/// Rich list rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RichListStyle {
    Bullet,
    Ordered,
}

/// A single styled run inside a rich-text section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextRun {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<RunStyle>,
    },
    Link {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<RunStyle>,
    },
}

impl RichTextRun {
    /// A plain text run, attaching the style only when it is non-empty.
    pub fn text(text: impl Into<String>, style: RunStyle) -> Self {
        Self::Text {
            text: text.into(),
            style: style.into_option(),
        }
    }

    /// A link run, attaching the style only when it is non-empty.
    pub fn link(url: impl Into<String>, text: impl Into<String>, style: RunStyle) -> Self {
        Self::Link {
            url: url.into(),
            text: Some(text.into()),
            style: style.into_option(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Style flags on a rich-text run. Inactive flags are not serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStyle {
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strike: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub code: bool,
}

impl RunStyle {
    /// Check whether any style flag is set.
    pub fn is_empty(&self) -> bool {
        !(self.bold || self.italic || self.strike || self.code)
    }

    /// `Some(self)` when any flag is set, `None` otherwise.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
