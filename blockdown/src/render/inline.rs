//! Inline content rendering
//!
//! One walker, three target shapes: flat mrkdwn text for section blocks,
//! plain text for header blocks, and styled runs for rich-text targets
//! (table cells, rich lists). Style state is threaded through the walk so
//! nested same-kind markers compose instead of doubling up.

use super::check_depth;
use crate::blocks::{RichTextRun, RunStyle};
use crate::document::Inline;
use crate::error::Error;
use crate::text::escape_text;
use crate::url;

/// Styles already applied by an enclosing span in flat mode.
#[derive(Debug, Clone, Copy, Default)]
struct ActiveStyles {
    bold: bool,
    italic: bool,
    strike: bool,
}

/// Render inline content to flat mrkdwn text.
pub fn mrkdwn(nodes: &[Inline], depth: usize) -> Result<String, Error> {
    mrkdwn_styled(nodes, depth, ActiveStyles::default())
}

fn mrkdwn_styled(nodes: &[Inline], depth: usize, active: ActiveStyles) -> Result<String, Error> {
    check_depth(depth)?;

    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&escape_text(text)),

            Inline::Strong(children) => {
                let inner = mrkdwn_styled(
                    children,
                    depth + 1,
                    ActiveStyles {
                        bold: true,
                        ..active
                    },
                )?;
                if active.bold {
                    out.push_str(&inner);
                } else {
                    out.push('*');
                    out.push_str(&inner);
                    out.push('*');
                }
            }

            Inline::Emphasis(children) => {
                let inner = mrkdwn_styled(
                    children,
                    depth + 1,
                    ActiveStyles {
                        italic: true,
                        ..active
                    },
                )?;
                if active.italic {
                    out.push_str(&inner);
                } else {
                    out.push('_');
                    out.push_str(&inner);
                    out.push('_');
                }
            }

            Inline::Strikethrough(children) => {
                let inner = mrkdwn_styled(
                    children,
                    depth + 1,
                    ActiveStyles {
                        strike: true,
                        ..active
                    },
                )?;
                if active.strike {
                    out.push_str(&inner);
                } else {
                    out.push('~');
                    out.push_str(&inner);
                    out.push('~');
                }
            }

            // Markers inside a code span stay literal
            Inline::Code(code) => {
                out.push('`');
                out.push_str(&escape_text(code));
                out.push('`');
            }

            Inline::Link { url, children } => {
                let label = mrkdwn_styled(children, depth + 1, active)?;
                if url::is_valid_link(url) {
                    out.push('<');
                    out.push_str(url);
                    out.push('|');
                    out.push_str(&label);
                    out.push('>');
                } else {
                    log::debug!("link url rejected, keeping label only: {}", url);
                    out.push_str(&label);
                }
            }

            // Images only ever become standalone blocks, never inline text
            Inline::Image { url, .. } => {
                log::debug!("dropping image in inline position: {}", url);
            }

            Inline::LineBreak => out.push('\n'),
        }
    }
    Ok(out)
}

/// Render inline content to unformatted plain text (header targets).
pub fn plain(nodes: &[Inline], depth: usize) -> Result<String, Error> {
    check_depth(depth)?;

    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(children)
            | Inline::Emphasis(children)
            | Inline::Strikethrough(children)
            | Inline::Link { children, .. } => out.push_str(&plain(children, depth + 1)?),
            Inline::Image { .. } => {}
            Inline::LineBreak => out.push(' '),
        }
    }
    Ok(out)
}

/// Render inline content to a sequence of styled rich-text runs.
pub fn rich(nodes: &[Inline], depth: usize) -> Result<Vec<RichTextRun>, Error> {
    let mut out = Vec::new();
    rich_styled(nodes, depth, RunStyle::default(), &mut out)?;
    Ok(out)
}

fn rich_styled(
    nodes: &[Inline],
    depth: usize,
    style: RunStyle,
    out: &mut Vec<RichTextRun>,
) -> Result<(), Error> {
    check_depth(depth)?;

    for node in nodes {
        match node {
            Inline::Text(text) => out.push(RichTextRun::text(text.clone(), style)),

            Inline::Strong(children) => rich_styled(
                children,
                depth + 1,
                RunStyle { bold: true, ..style },
                out,
            )?,

            Inline::Emphasis(children) => rich_styled(
                children,
                depth + 1,
                RunStyle {
                    italic: true,
                    ..style
                },
                out,
            )?,

            Inline::Strikethrough(children) => rich_styled(
                children,
                depth + 1,
                RunStyle {
                    strike: true,
                    ..style
                },
                out,
            )?,

            Inline::Code(code) => out.push(RichTextRun::text(
                code.clone(),
                RunStyle { code: true, ..style },
            )),

            Inline::Link { url, children } => {
                // Link runs carry one style, so the label flattens to text
                let label = plain(children, depth + 1)?;
                if url::is_valid_link(url) {
                    out.push(RichTextRun::link(url.clone(), label, style));
                } else {
                    log::debug!("link url rejected, keeping label only: {}", url);
                    out.push(RichTextRun::text(label, style));
                }
            }

            Inline::Image { url, .. } => {
                log::debug!("dropping image in inline position: {}", url);
            }

            Inline::LineBreak => out.push(RichTextRun::text("\n", style)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_mrkdwn_plain_text_escapes_three_characters() {
        let out = mrkdwn(&[text("a & b < c > \"d\"")], 0).unwrap();
        assert_eq!(out, "a &amp; b &lt; c &gt; \"d\"");
    }

    #[test]
    fn test_mrkdwn_styles() {
        let nodes = vec![
            text("a "),
            Inline::Strong(vec![text("b")]),
            text(" "),
            Inline::Emphasis(vec![text("c")]),
            text(" "),
            Inline::Strikethrough(vec![text("d")]),
        ];
        assert_eq!(mrkdwn(&nodes, 0).unwrap(), "a *b* _c_ ~d~");
    }

    #[test]
    fn test_mrkdwn_nested_styles_compose() {
        let nodes = vec![Inline::Strong(vec![
            text("b "),
            Inline::Emphasis(vec![text("i")]),
        ])];
        assert_eq!(mrkdwn(&nodes, 0).unwrap(), "*b _i_*");
    }

    #[test]
    fn test_mrkdwn_same_marker_never_doubles() {
        let nodes = vec![Inline::Strong(vec![Inline::Strong(vec![text("x")])])];
        assert_eq!(mrkdwn(&nodes, 0).unwrap(), "*x*");
    }

    #[test]
    fn test_mrkdwn_link() {
        let nodes = vec![Inline::Link {
            url: "https://example.com".into(),
            children: vec![text("site")],
        }];
        assert_eq!(mrkdwn(&nodes, 0).unwrap(), "<https://example.com|site>");
    }

    #[test]
    fn test_mrkdwn_invalid_link_degrades_to_label() {
        let nodes = vec![Inline::Link {
            url: "javascript:alert(1)".into(),
            children: vec![text("click")],
        }];
        assert_eq!(mrkdwn(&nodes, 0).unwrap(), "click");
    }

    #[test]
    fn test_mrkdwn_code_span_keeps_markers_literal() {
        let nodes = vec![Inline::Code("*not bold* <tag>".into())];
        assert_eq!(mrkdwn(&nodes, 0).unwrap(), "`*not bold* &lt;tag&gt;`");
    }

    #[test]
    fn test_plain_strips_formatting() {
        let nodes = vec![
            text("a "),
            Inline::Strong(vec![text("b")]),
            text(" "),
            Inline::Emphasis(vec![text("c")]),
        ];
        assert_eq!(plain(&nodes, 0).unwrap(), "a b c");
    }

    #[test]
    fn test_rich_runs_carry_combined_styles() {
        let nodes = vec![Inline::Strong(vec![
            text("b"),
            Inline::Emphasis(vec![text("bi")]),
        ])];
        let runs = rich(&nodes, 0).unwrap();
        assert_eq!(
            runs,
            vec![
                RichTextRun::text(
                    "b",
                    RunStyle {
                        bold: true,
                        ..Default::default()
                    }
                ),
                RichTextRun::text(
                    "bi",
                    RunStyle {
                        bold: true,
                        italic: true,
                        ..Default::default()
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_rich_link_run() {
        let nodes = vec![Inline::Link {
            url: "https://example.com".into(),
            children: vec![text("site")],
        }];
        let runs = rich(&nodes, 0).unwrap();
        assert_eq!(
            runs,
            vec![RichTextRun::link(
                "https://example.com",
                "site",
                RunStyle::default()
            )]
        );
    }

    fn nested_emphasis(levels: usize) -> Vec<Inline> {
        let mut node = text("core");
        for _ in 0..levels {
            node = Inline::Emphasis(vec![node]);
        }
        vec![node]
    }

    #[test]
    fn test_forty_levels_of_nesting_complete() {
        assert!(mrkdwn(&nested_emphasis(40), 0).is_ok());
        assert!(rich(&nested_emphasis(40), 0).is_ok());
    }

    #[test]
    fn test_sixty_levels_of_nesting_fail() {
        let err = mrkdwn(&nested_emphasis(60), 0).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DepthExceeded { .. })
        ));
        assert!(rich(&nested_emphasis(60), 0).is_err());
    }
}
