//! Structural ceilings imposed by the target platform's block API
//!
//! Every limit the engine enforces lives here so that the builders, the
//! renderers, and the assembler all agree on the same numbers.

/// Maximum length of a section block's mrkdwn text, in UTF-16 code units.
pub const MAX_TEXT_LENGTH: usize = 3000;

/// Maximum length of a header block's plain text.
pub const MAX_HEADER_LENGTH: usize = 150;

/// Maximum length of an image block's alt text.
pub const MAX_ALT_TEXT_LENGTH: usize = 2000;

/// Maximum length of an image block's title text.
pub const MAX_IMAGE_TITLE_LENGTH: usize = 2000;

/// Maximum length of a video block's title.
pub const MAX_VIDEO_TITLE_LENGTH: usize = 200;

/// Maximum length of a video block's description.
pub const MAX_VIDEO_DESCRIPTION_LENGTH: usize = 200;

/// Maximum length of a video block's author name.
pub const MAX_AUTHOR_NAME_LENGTH: usize = 50;

/// Maximum number of blocks in one message payload.
pub const MAX_BLOCK_COUNT: usize = 50;

/// Maximum nesting depth while rendering inline content, lists and quotes.
pub const MAX_NESTING_DEPTH: usize = 50;

/// Maximum number of rows in a table block.
pub const MAX_TABLE_ROWS: usize = 100;

/// Maximum number of cells in one table row.
pub const MAX_CELLS_PER_ROW: usize = 20;

/// Maximum number of column settings on a table block.
pub const MAX_COLUMN_SETTINGS: usize = 20;

/// Maximum accepted input length, in UTF-16 code units.
pub const MAX_INPUT_LENGTH: usize = 1_000_000;

/// Check whether `count` blocks fit under the block-count ceiling.
pub fn fits_block_count(count: usize) -> bool {
    count <= MAX_BLOCK_COUNT
}

/// Check whether `depth` is still inside the recursion ceiling.
pub fn within_depth(depth: usize) -> bool {
    depth <= MAX_NESTING_DEPTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_count_boundary() {
        assert!(fits_block_count(49));
        assert!(fits_block_count(MAX_BLOCK_COUNT));
        assert!(!fits_block_count(MAX_BLOCK_COUNT + 1));
    }

    #[test]
    fn test_depth_boundary() {
        assert!(within_depth(0));
        assert!(within_depth(MAX_NESTING_DEPTH));
        assert!(!within_depth(MAX_NESTING_DEPTH + 1));
    }
}
