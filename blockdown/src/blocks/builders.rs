//! Validating constructors for output blocks
//!
//! Each builder checks its own field constraints, truncates text fields
//! against their ceilings and validates URLs before a block is constructed.
//! Absolute URLs that fail validation are an error; relative paths and
//! unrecognized schemes pass through unchanged for backward compatibility.

use super::{ColumnSetting, MessageBlock, TableCell, TextObject};
use crate::error::{Error, SecurityError, ValidationError};
use crate::limits;
use crate::text::truncate;
use crate::url::{self, UrlKind};

/// Build a section block with mrkdwn text, truncated to its ceiling.
pub fn section(text: &str) -> Result<MessageBlock, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "section text",
        });
    }
    Ok(MessageBlock::Section {
        text: TextObject::mrkdwn(truncate(text, limits::MAX_TEXT_LENGTH)),
    })
}

/// Build a header block with plain text, truncated to its ceiling.
pub fn header(text: &str) -> Result<MessageBlock, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "header text",
        });
    }
    Ok(MessageBlock::Header {
        text: TextObject::plain(truncate(text, limits::MAX_HEADER_LENGTH)),
    })
}

/// Build a divider block.
pub fn divider() -> MessageBlock {
    MessageBlock::Divider
}

/// Build an image block. The URL must be acceptable for images.
pub fn image(url: &str, alt_text: &str, title: Option<&str>) -> Result<MessageBlock, Error> {
    validate_field_url(url, "image_url")?;
    if url.is_empty() {
        return Err(ValidationError::EmptyField { field: "image_url" }.into());
    }
    let alt = if alt_text.is_empty() { url } else { alt_text };
    Ok(MessageBlock::Image {
        image_url: url.to_string(),
        alt_text: truncate(alt, limits::MAX_ALT_TEXT_LENGTH).to_string(),
        title: title
            .filter(|t| !t.is_empty())
            .map(|t| TextObject::plain(truncate(t, limits::MAX_IMAGE_TITLE_LENGTH))),
    })
}

/// Build a table block, enforcing row, cell and column-setting ceilings and
/// that every cell matches its declared shape.
pub fn table(
    rows: Vec<Vec<TableCell>>,
    column_settings: Option<Vec<ColumnSetting>>,
) -> Result<MessageBlock, ValidationError> {
    if rows.len() > limits::MAX_TABLE_ROWS {
        return Err(ValidationError::TooManyRows {
            count: rows.len(),
            max: limits::MAX_TABLE_ROWS,
        });
    }
    for row in &rows {
        if row.len() > limits::MAX_CELLS_PER_ROW {
            return Err(ValidationError::TooManyCells {
                count: row.len(),
                max: limits::MAX_CELLS_PER_ROW,
            });
        }
        for cell in row {
            validate_cell(cell)?;
        }
    }
    if let Some(settings) = &column_settings {
        if settings.len() > limits::MAX_COLUMN_SETTINGS {
            return Err(ValidationError::TooManyColumnSettings {
                count: settings.len(),
                max: limits::MAX_COLUMN_SETTINGS,
            });
        }
    }
    Ok(MessageBlock::Table {
        rows,
        column_settings: column_settings.filter(|s| !s.is_empty()),
    })
}

/// Build a rich-text block.
pub fn rich_text(
    elements: Vec<super::RichTextElement>,
) -> Result<MessageBlock, ValidationError> {
    if elements.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "rich_text elements",
        });
    }
    Ok(MessageBlock::RichText { elements })
}

/// Fields for a video block; optional fields may stay `None`.
#[derive(Debug, Clone, Default)]
pub struct VideoFields {
    pub title: String,
    pub title_url: Option<String>,
    pub description: Option<String>,
    pub video_url: String,
    pub alt_text: String,
    pub thumbnail_url: String,
    pub author_name: Option<String>,
    pub provider_name: Option<String>,
    pub provider_icon_url: Option<String>,
}

/// Build a video block, truncating text fields and validating every URL.
pub fn video(fields: VideoFields) -> Result<MessageBlock, Error> {
    if fields.title.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "video title",
        }
        .into());
    }
    if fields.video_url.is_empty() {
        return Err(ValidationError::EmptyField { field: "video_url" }.into());
    }
    if fields.thumbnail_url.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "thumbnail_url",
        }
        .into());
    }
    validate_field_url(&fields.video_url, "video_url")?;
    validate_field_url(&fields.thumbnail_url, "thumbnail_url")?;
    if let Some(url) = &fields.title_url {
        validate_field_url(url, "title_url")?;
    }
    if let Some(url) = &fields.provider_icon_url {
        validate_field_url(url, "provider_icon_url")?;
    }

    Ok(MessageBlock::Video {
        title: TextObject::plain(truncate(&fields.title, limits::MAX_VIDEO_TITLE_LENGTH)),
        title_url: fields.title_url,
        description: fields
            .description
            .filter(|d| !d.is_empty())
            .map(|d| TextObject::plain(truncate(&d, limits::MAX_VIDEO_DESCRIPTION_LENGTH))),
        video_url: fields.video_url,
        alt_text: truncate(&fields.alt_text, limits::MAX_ALT_TEXT_LENGTH).to_string(),
        thumbnail_url: fields.thumbnail_url,
        author_name: fields
            .author_name
            .map(|n| truncate(&n, limits::MAX_AUTHOR_NAME_LENGTH).to_string()),
        provider_name: fields.provider_name,
        provider_icon_url: fields.provider_icon_url,
    })
}

/// Build a remote file block.
pub fn file(external_id: &str) -> Result<MessageBlock, ValidationError> {
    if external_id.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "external_id",
        });
    }
    Ok(MessageBlock::File {
        external_id: external_id.to_string(),
        source: "remote".to_string(),
    })
}

/// Check a builder URL field against the validator.
fn validate_field_url(value: &str, field: &'static str) -> Result<(), Error> {
    match url::classify(value) {
        UrlKind::Http | UrlKind::Relative | UrlKind::DataImage | UrlKind::OtherScheme => Ok(()),
        UrlKind::Scriptable => Err(SecurityError::DisallowedScheme {
            url: value.to_string(),
        }
        .into()),
        UrlKind::Rejected => Err(ValidationError::InvalidUrl {
            field,
            url: value.to_string(),
        }
        .into()),
    }
}

/// Check a table cell against its declared shape.
fn validate_cell(cell: &TableCell) -> Result<(), ValidationError> {
    match cell {
        TableCell::RawText { .. } => Ok(()),
        TableCell::RichText { elements } => {
            if elements.is_empty() {
                return Err(ValidationError::InvalidCell {
                    reason: "rich cell must carry at least one element",
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{RichTextElement, RichTextRun, RunStyle};

    #[test]
    fn test_section_truncates_to_ceiling() {
        let long = "x".repeat(4000);
        let MessageBlock::Section { text } = section(&long).unwrap() else {
            panic!("expected section");
        };
        assert_eq!(text.text.len(), limits::MAX_TEXT_LENGTH);
    }

    #[test]
    fn test_section_rejects_empty_text() {
        assert!(matches!(
            section(""),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn test_header_truncates_to_ceiling() {
        let long = "h".repeat(200);
        let MessageBlock::Header { text } = header(&long).unwrap() else {
            panic!("expected header");
        };
        assert_eq!(text.text.len(), limits::MAX_HEADER_LENGTH);
    }

    #[test]
    fn test_image_falls_back_to_url_for_alt() {
        let MessageBlock::Image { alt_text, .. } =
            image("https://example.com/x.png", "", None).unwrap()
        else {
            panic!("expected image");
        };
        assert_eq!(alt_text, "https://example.com/x.png");
    }

    #[test]
    fn test_image_rejects_hostless_url() {
        let err = image("http://", "alt", None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_image_rejects_script_scheme_as_security_error() {
        let err = image("javascript:alert(1)", "alt", None).unwrap_err();
        assert!(matches!(err, Error::Security(_)));
    }

    #[test]
    fn test_image_accepts_relative_url_unchanged() {
        let MessageBlock::Image { image_url, .. } = image("img/x.png", "alt", None).unwrap()
        else {
            panic!("expected image");
        };
        assert_eq!(image_url, "img/x.png");
    }

    #[test]
    fn test_table_rejects_too_many_rows() {
        let rows = vec![vec![TableCell::RawText { text: "v".into() }]; 101];
        assert!(matches!(
            table(rows, None),
            Err(ValidationError::TooManyRows { count: 101, .. })
        ));
    }

    #[test]
    fn test_table_rejects_wide_row() {
        let row = vec![TableCell::RawText { text: "v".into() }; 21];
        assert!(matches!(
            table(vec![row], None),
            Err(ValidationError::TooManyCells { count: 21, .. })
        ));
    }

    #[test]
    fn test_table_rejects_empty_rich_cell() {
        let row = vec![TableCell::RichText { elements: vec![] }];
        assert!(matches!(
            table(vec![row], None),
            Err(ValidationError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_video_truncates_author_name() {
        let fields = VideoFields {
            title: "t".into(),
            video_url: "https://example.com/v".into(),
            thumbnail_url: "https://example.com/t.png".into(),
            alt_text: "alt".into(),
            author_name: Some("a".repeat(80)),
            ..Default::default()
        };
        let MessageBlock::Video { author_name, .. } = video(fields).unwrap() else {
            panic!("expected video");
        };
        assert_eq!(author_name.unwrap().len(), limits::MAX_AUTHOR_NAME_LENGTH);
    }

    #[test]
    fn test_file_requires_external_id() {
        assert!(file("").is_err());
        let MessageBlock::File { source, .. } = file("F123").unwrap() else {
            panic!("expected file");
        };
        assert_eq!(source, "remote");
    }

    #[test]
    fn test_rich_text_requires_elements() {
        assert!(rich_text(vec![]).is_err());
        let elements = vec![RichTextElement::RichTextSection {
            elements: vec![RichTextRun::text("x", RunStyle::default())],
        }];
        assert!(rich_text(elements).is_ok());
    }
}
