//! Locator abstraction for element selection.
//!
//! A locator is a CSS selector, optionally narrowed to elements whose text
//! contains a given string (Playwright's `hasText`). Drivers either render it
//! to a DOM query expression or resolve it natively.

use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., "button.btn-success")
    Css(String),
    /// CSS selector filtered by contained text
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// The underlying CSS selector
    #[must_use]
    pub fn css_part(&self) -> &str {
        match self {
            Self::Css(css) | Self::CssWithText { css, .. } => css,
        }
    }

    /// The text filter, if any
    #[must_use]
    pub fn text_filter(&self) -> Option<&str> {
        match self {
            Self::Css(_) => None,
            Self::CssWithText { text, .. } => Some(text),
        }
    }

    /// JavaScript predicate applying the text filter to an element
    fn text_predicate(&self) -> String {
        match self.text_filter() {
            Some(text) => format!("el => el.textContent.includes({text:?})"),
            None => "() => true".to_string(),
        }
    }

    /// JavaScript expression evaluating to an array of all matching elements
    #[must_use]
    pub fn to_query_all(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::CssWithText { css, .. } => format!(
                "Array.from(document.querySelectorAll({css:?})).filter({})",
                self.text_predicate()
            ),
        }
    }

    /// JavaScript expression evaluating to the position of the first match
    /// among the elements matching the CSS part alone, or -1
    #[must_use]
    pub fn to_first_index_query(&self) -> String {
        format!(
            "Array.from(document.querySelectorAll({:?})).findIndex({})",
            self.css_part(),
            self.text_predicate()
        )
    }

    /// JavaScript expression evaluating to the number of matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("{}.length", self.to_query_all())
    }

    /// Whether an element with the given selector and text matches
    #[must_use]
    pub fn matches(&self, css: &str, text: &str) -> bool {
        self.css_part() == css && self.text_filter().map_or(true, |t| text.contains(t))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "{css}"),
            Self::CssWithText { css, text } => write!(f, "{css} >> has-text={text:?}"),
        }
    }
}

/// A locator for finding elements on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
        }
    }

    /// Filter by text content
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let css = match self.selector {
            Selector::Css(css) | Selector::CssWithText { css, .. } => css,
        };
        Self {
            selector: Selector::CssWithText {
                css,
                text: text.into(),
            },
        }
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl From<&str> for Locator {
    fn from(selector: &str) -> Self {
        Self::new(selector)
    }
}

impl From<&Locator> for Locator {
    fn from(locator: &Locator) -> Self {
        locator.clone()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}
