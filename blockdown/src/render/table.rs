//! Table rendering
//!
//! Markdown pipe tables and decomposed HTML tables converge on one model
//! here, so both sources produce identical table blocks. Cells that carry
//! only plain text serialize as raw cells; styled content becomes a
//! rich-text cell.

use super::{check_depth, inline};
use crate::blocks::builders;
use crate::blocks::{ColumnAlign, ColumnSetting, MessageBlock, RichTextElement, TableCell};
use crate::document::{Alignment, Inline, TableNode};
use crate::error::Error;
use crate::html::HtmlTable;

/// One cell of the common table model. `content` is present for cells
/// parsed from Markdown; HTML cells only ever carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellModel {
    pub text: String,
    pub content: Option<Vec<Inline>>,
}

/// The common table model both sources produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub rows: Vec<Vec<CellModel>>,
    pub alignments: Vec<Alignment>,
}

/// Build the common model from a parsed pipe table.
pub fn from_markdown(node: &TableNode, depth: usize) -> Result<TableModel, Error> {
    check_depth(depth)?;

    let mut rows = Vec::with_capacity(node.rows.len() + 1);
    if !node.header.is_empty() {
        rows.push(cells_from_inline(&node.header, depth)?);
    }
    for row in &node.rows {
        rows.push(cells_from_inline(row, depth)?);
    }
    Ok(TableModel {
        rows,
        alignments: node.alignments.clone(),
    })
}

fn cells_from_inline(row: &[Vec<Inline>], depth: usize) -> Result<Vec<CellModel>, Error> {
    row.iter()
        .map(|content| {
            Ok(CellModel {
                text: inline::plain(content, depth + 1)?,
                content: Some(content.clone()),
            })
        })
        .collect()
}

/// Build the common model from a decomposed HTML table.
pub fn from_html(table: HtmlTable) -> TableModel {
    TableModel {
        rows: table
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|text| CellModel {
                        text,
                        content: None,
                    })
                    .collect()
            })
            .collect(),
        alignments: table.alignments,
    }
}

/// Build a table block from the common model.
pub fn build(model: &TableModel, depth: usize) -> Result<MessageBlock, Error> {
    check_depth(depth)?;

    let mut rows = Vec::with_capacity(model.rows.len());
    for row in &model.rows {
        let mut cells = Vec::with_capacity(row.len());
        for cell in row {
            cells.push(build_cell(cell, depth)?);
        }
        rows.push(cells);
    }
    Ok(builders::table(rows, column_settings(&model.alignments))?)
}

fn build_cell(cell: &CellModel, depth: usize) -> Result<TableCell, Error> {
    if let Some(content) = &cell.content {
        if !content.iter().all(Inline::is_plain) {
            let runs = inline::rich(content, depth + 1)?;
            if !runs.is_empty() {
                return Ok(TableCell::RichText {
                    elements: vec![RichTextElement::RichTextSection { elements: runs }],
                });
            }
        }
    }
    Ok(TableCell::RawText {
        text: cell.text.clone(),
    })
}

/// Derive per-column display settings from source alignments.
///
/// The first column never receives a setting; the display default already
/// matches every source alignment there. From the second column on, center
/// and right are always stated, left only once a preceding column has
/// stated something, and positions with nothing to state carry an empty
/// setting to keep later ones in place. Trailing empty settings are
/// dropped, and a run of nothing at all becomes `None`.
pub fn column_settings(alignments: &[Alignment]) -> Option<Vec<ColumnSetting>> {
    let mut settings: Vec<ColumnSetting> = Vec::new();
    let mut saw_explicit = false;
    for alignment in alignments.iter().skip(1) {
        match alignment {
            Alignment::Center => {
                saw_explicit = true;
                settings.push(ColumnSetting::aligned(ColumnAlign::Center));
            }
            Alignment::Right => {
                saw_explicit = true;
                settings.push(ColumnSetting::aligned(ColumnAlign::Right));
            }
            Alignment::Left if saw_explicit => {
                settings.push(ColumnSetting::aligned(ColumnAlign::Left));
            }
            Alignment::Left | Alignment::None => settings.push(ColumnSetting::default()),
        }
    }
    while settings.last().is_some_and(|s| s.align.is_none()) {
        settings.pop();
    }
    if settings.is_empty() {
        None
    } else {
        Some(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::RichTextRun;

    fn text_cell(text: &str) -> Vec<Inline> {
        vec![Inline::Text(text.to_string())]
    }

    fn markdown_table() -> TableNode {
        TableNode {
            alignments: vec![Alignment::None, Alignment::Center, Alignment::Right],
            header: vec![text_cell("a"), text_cell("b"), text_cell("c")],
            rows: vec![vec![text_cell("1"), text_cell("2"), text_cell("3")]],
        }
    }

    #[test]
    fn test_markdown_header_is_first_row() {
        let model = from_markdown(&markdown_table(), 0).unwrap();
        assert_eq!(model.rows.len(), 2);
        assert_eq!(model.rows[0][0].text, "a");
        assert_eq!(model.rows[1][2].text, "3");
    }

    #[test]
    fn test_plain_cells_build_as_raw_text() {
        let model = from_markdown(&markdown_table(), 0).unwrap();
        let MessageBlock::Table { rows, .. } = build(&model, 0).unwrap() else {
            panic!("expected table");
        };
        assert_eq!(rows[0][0], TableCell::RawText { text: "a".into() });
    }

    #[test]
    fn test_styled_cell_builds_as_rich_text() {
        let node = TableNode {
            alignments: vec![Alignment::None],
            header: vec![vec![Inline::Strong(vec![Inline::Text("bold".into())])]],
            rows: vec![],
        };
        let model = from_markdown(&node, 0).unwrap();
        let MessageBlock::Table { rows, .. } = build(&model, 0).unwrap() else {
            panic!("expected table");
        };

        let TableCell::RichText { elements } = &rows[0][0] else {
            panic!("expected rich cell");
        };
        let RichTextElement::RichTextSection { elements: runs } = &elements[0] else {
            panic!("expected section");
        };
        assert!(matches!(&runs[0], RichTextRun::Text { style: Some(s), .. } if s.bold));
    }

    #[test]
    fn test_raw_cell_text_is_not_escaped() {
        let node = TableNode {
            alignments: vec![Alignment::None],
            header: vec![vec![Inline::Text("a & b < c".into())]],
            rows: vec![],
        };
        let model = from_markdown(&node, 0).unwrap();
        assert_eq!(model.rows[0][0].text, "a & b < c");
    }

    #[test]
    fn test_html_model_matches_markdown_model_shape() {
        let html = HtmlTable {
            rows: vec![
                vec!["a".into(), "b".into(), "c".into()],
                vec!["1".into(), "2".into(), "3".into()],
            ],
            alignments: vec![Alignment::None, Alignment::Center, Alignment::Right],
        };
        let from_html_block = build(&from_html(html), 0).unwrap();
        let from_md_block = build(&from_markdown(&markdown_table(), 0).unwrap(), 0).unwrap();
        assert_eq!(
            serde_json::to_value(&from_html_block).unwrap(),
            serde_json::to_value(&from_md_block).unwrap()
        );
    }

    #[test]
    fn test_column_settings_skip_first_column() {
        let settings =
            column_settings(&[Alignment::Center, Alignment::Center, Alignment::Right]).unwrap();
        assert_eq!(
            settings,
            vec![
                ColumnSetting::aligned(ColumnAlign::Center),
                ColumnSetting::aligned(ColumnAlign::Right),
            ]
        );
    }

    #[test]
    fn test_column_settings_left_only_after_explicit() {
        // Left before anything explicit matches the default and is omitted
        let settings = column_settings(&[
            Alignment::None,
            Alignment::Left,
            Alignment::Center,
            Alignment::Left,
        ])
        .unwrap();
        assert_eq!(
            settings,
            vec![
                ColumnSetting::default(),
                ColumnSetting::aligned(ColumnAlign::Center),
                ColumnSetting::aligned(ColumnAlign::Left),
            ]
        );
    }

    #[test]
    fn test_column_settings_trailing_defaults_dropped() {
        let settings = column_settings(&[
            Alignment::None,
            Alignment::Right,
            Alignment::None,
            Alignment::None,
        ])
        .unwrap();
        assert_eq!(settings, vec![ColumnSetting::aligned(ColumnAlign::Right)]);
    }

    #[test]
    fn test_all_default_alignments_yield_none() {
        assert_eq!(
            column_settings(&[Alignment::None, Alignment::Left, Alignment::None]),
            None
        );
        assert_eq!(column_settings(&[]), None);
    }
}
