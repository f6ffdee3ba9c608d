//! Renderers from document nodes to block content
//!
//! Each renderer takes its depth by value and checks it against the
//! recursion ceiling before descending, so pathological nesting fails with
//! a reported error instead of unbounded stack growth.

pub mod inline;
pub mod list;
pub mod quote;
pub mod table;

use crate::error::ValidationError;
use crate::limits;

/// Fail when `depth` has gone past the recursion ceiling.
pub(crate) fn check_depth(depth: usize) -> Result<(), ValidationError> {
    if limits::within_depth(depth) {
        Ok(())
    } else {
        Err(ValidationError::DepthExceeded {
            depth,
            max: limits::MAX_NESTING_DEPTH,
        })
    }
}

/// Wrap code in mrkdwn fences, keeping the closing fence on its own line.
pub(crate) fn fenced(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + 8);
    out.push_str("```\n");
    out.push_str(code);
    if !code.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("```");
    out
}
