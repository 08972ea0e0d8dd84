//! Rendering configuration.

use std::borrow::Cow;
use std::fmt;

use crate::escape::escape_html;

/// Escape function applied to templates and source text in HTML mode.
pub type EscapeFn = for<'a> fn(&'a str) -> Cow<'a, str>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Plain text, nothing escaped.
    #[default]
    Text,
    /// HTML fragments: escaped text, list markup and a `tree-node` span per node.
    Html,
}

/// Builder-style options for [`render`](crate::render).
///
/// ```
/// use code2text_lib::{RenderMode, RenderOptions};
///
/// let options = RenderOptions::new().mode(RenderMode::Html);
/// assert!(options.is_html());
/// ```
#[derive(Clone, Copy)]
pub struct RenderOptions {
    mode: RenderMode,
    escape: EscapeFn,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Text,
            escape: escape_html,
        }
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `RenderOptions::new().mode(RenderMode::Html)`.
    pub fn html() -> Self {
        Self::new().mode(RenderMode::Html)
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the HTML escape function.
    pub fn escape(mut self, escape: EscapeFn) -> Self {
        self.escape = escape;
        self
    }

    pub fn get_mode(&self) -> RenderMode {
        self.mode
    }

    pub fn is_html(&self) -> bool {
        self.mode == RenderMode::Html
    }

    /// Escape `text` in HTML mode, pass it through otherwise.
    pub fn escape_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.is_html() {
            (self.escape)(text)
        } else {
            Cow::Borrowed(text)
        }
    }
}
