//! HTML fragment decomposition
//!
//! Raw HTML found in a document is only ever mined for two things: `<table>`
//! fragments, decomposed into a row/cell record with per-cell alignment, and
//! `<img>` fragments, decomposed into a URL/alt pair. A fragment that cannot
//! be decomposed yields `None`; the caller skips it.

use crate::document::Alignment;
use once_cell::sync::Lazy;
use regex::Regex;

static TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<table\b[^>]*>(.*?)</table>").expect("valid table regex"));
static ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").expect("valid row regex"));
static CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(th|td)\b([^>]*)>(.*?)</(?:th|td)\s*>").expect("valid cell regex")
});
static ALIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)align\s*=\s*["']?(left|center|right)"#).expect("valid align regex")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static IMG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid img regex"));
static SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)\bsrc\s*=\s*["']([^"']*)["']"#).expect("valid src regex"));
static ALT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)\balt\s*=\s*["']([^"']*)["']"#).expect("valid alt regex"));

/// A decomposed HTML table: header row (if any) is row 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTable {
    /// Rows of cell text, header first
    pub rows: Vec<Vec<String>>,
    /// Per-column alignment, from the first cell in each column carrying
    /// an explicit `align` attribute
    pub alignments: Vec<Alignment>,
}

/// A decomposed HTML image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlImage {
    pub url: String,
    pub alt: String,
}

/// Decompose the first `<table>` in `html`, or `None` when there is none
/// or it has no cells.
pub fn parse_table(html: &str) -> Option<HtmlTable> {
    let body = TABLE.captures(html)?.get(1)?.as_str();

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut aligns: Vec<Vec<Alignment>> = Vec::new();
    for row in ROW.captures_iter(body) {
        let mut cells = Vec::new();
        let mut cell_aligns = Vec::new();
        for cell in CELL.captures_iter(&row[1]) {
            cells.push(cell_text(&cell[3]));
            cell_aligns.push(cell_align(&cell[2]));
        }
        if !cells.is_empty() {
            rows.push(cells);
            aligns.push(cell_aligns);
        }
    }
    if rows.is_empty() {
        return None;
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let alignments = (0..columns)
        .map(|col| {
            aligns
                .iter()
                .filter_map(|row| row.get(col).copied())
                .find(|a| *a != Alignment::None)
                .unwrap_or(Alignment::None)
        })
        .collect();

    Some(HtmlTable { rows, alignments })
}

/// Decompose the first `<img>` in `html`, or `None` without a usable `src`.
pub fn parse_image(html: &str) -> Option<HtmlImage> {
    let tag = IMG.find(html)?.as_str();
    let url = SRC.captures(tag)?.get(1)?.as_str().to_string();
    if url.is_empty() {
        return None;
    }
    let alt = ALT
        .captures(tag)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Some(HtmlImage { url, alt })
}

/// Strip inner tags, decode the basic entities and collapse whitespace.
fn cell_text(inner: &str) -> String {
    let stripped = TAG.replace_all(inner, "");
    let decoded = decode_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Alignment from a cell's attribute list.
fn cell_align(attrs: &str) -> Alignment {
    match ALIGN.captures(attrs) {
        Some(caps) => match caps[1].to_ascii_lowercase().as_str() {
            "left" => Alignment::Left,
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::None,
        },
        None => Alignment::None,
    }
}

/// Decode the entities HTML sources commonly carry in cell text.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
