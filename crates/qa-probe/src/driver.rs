//! PageDriver - abstract page automation trait
//!
//! Scenarios and fixtures talk to the page only through [`PageDriver`], so the
//! same suites run against a real Chromium tab (`ChromiumPage`, `browser`
//! feature) or against [`MockQaPage`](crate::MockQaPage) in unit tests.
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌─────────────────────┐
//! │  Scenario    │────►│  PageDriver    │────►│  ChromiumPage (CDP) │
//! │  + Fixture   │     │  (async trait) │     ├─────────────────────┤
//! └──────────────┘     └────────────────┘────►│  MockQaPage         │
//!                                             └─────────────────────┘
//! ```

use crate::locator::Locator;
use crate::result::{QaError, QaResult};
use async_trait::async_trait;

/// Abstract driver for a single browser page
///
/// Queries take `&self`; interactions that change page state take
/// `&mut self`. Every call is a suspension point.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to URL and wait for the load to complete
    async fn goto(&mut self, url: &str) -> QaResult<()>;

    /// Current page URL
    async fn url(&self) -> QaResult<String>;

    /// Number of elements matching the locator
    async fn count(&self, locator: &Locator) -> QaResult<usize>;

    /// Rendered text of every matching element, in document order
    async fn inner_texts(&self, locator: &Locator) -> QaResult<Vec<String>>;

    /// Whether the first matching element is rendered and visible
    async fn is_visible(&self, locator: &Locator) -> QaResult<bool>;

    /// Computed CSS property of the first matching element
    async fn computed_style(&self, locator: &Locator, property: &str) -> QaResult<String>;

    /// Click the first matching element
    async fn click(&mut self, locator: &Locator) -> QaResult<()>;

    /// Replace the value of the first matching input
    async fn fill(&mut self, locator: &Locator, text: &str) -> QaResult<()>;

    /// Move the pointer over the first matching element
    async fn hover(&mut self, locator: &Locator) -> QaResult<()>;

    /// Rendered text of the first matching element
    async fn inner_text(&self, locator: &Locator) -> QaResult<String> {
        self.inner_texts(locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| QaError::ElementNotFound {
                selector: locator.to_string(),
            })
    }

    /// Release the page
    async fn close(&mut self) -> QaResult<()> {
        Ok(())
    }
}

/// Source of fresh, isolated pages, one per scenario
#[async_trait]
pub trait PageFactory: Send + Sync {
    /// Open a new page
    async fn new_page(&self) -> QaResult<Box<dyn PageDriver>>;
}

#[async_trait]
impl<F> PageFactory for F
where
    F: Fn() -> QaResult<Box<dyn PageDriver>> + Send + Sync,
{
    async fn new_page(&self) -> QaResult<Box<dyn PageDriver>> {
        self()
    }
}
