//! Caller-facing transform options

/// How list nodes are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Native rich-text list structures
    #[default]
    RichText,
    /// Bullet/number-prefixed section text
    Flat,
}

/// Options for list rendering.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Flat sections versus native rich-text lists
    pub mode: ListMode,
    /// Prefix for task-list items, given the checked state
    pub checkbox_prefix: fn(bool) -> String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            mode: ListMode::default(),
            checkbox_prefix: default_checkbox_prefix,
        }
    }
}

/// Default task-list glyphs: filled when checked, empty otherwise.
fn default_checkbox_prefix(checked: bool) -> String {
    if checked { "☑ " } else { "☐ " }.to_string()
}

/// Options for one transform call.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub lists: ListOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_checkbox_glyphs() {
        let options = Options::default();
        assert_eq!((options.lists.checkbox_prefix)(true), "☑ ");
        assert_eq!((options.lists.checkbox_prefix)(false), "☐ ");
    }

    #[test]
    fn test_default_list_mode_is_rich() {
        assert_eq!(ListOptions::default().mode, ListMode::RichText);
    }
}
