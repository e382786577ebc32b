//! Per-scenario hooks and shared page checks.
//!
//! A [`Fixture`] wraps every scenario of a suite: `before_each` prepares the
//! page, `after_each` runs afterwards whatever the body did.
//!
//! # Example
//!
//! ```ignore
//! use qa_probe::prelude::*;
//!
//! struct ClearStorage;
//!
//! #[async_trait]
//! impl Fixture for ClearStorage {
//!     fn name(&self) -> &str {
//!         "clear-storage"
//!     }
//!
//!     async fn before_each(&self, page: &mut dyn PageDriver, ctx: &ScenarioContext) -> QaResult<()> {
//!         page.goto(&ctx.base_url).await
//!     }
//! }
//! ```

use crate::assertion::Assertion;
use crate::data::{CONSTANTS, LOCATORS};
use crate::driver::PageDriver;
use crate::harness::ScenarioContext;
use crate::locator::Locator;
use crate::result::{QaError, QaResult};
use crate::wait::{wait_for_text, WaitOptions};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

/// Hooks run around every scenario of a suite
#[async_trait]
pub trait Fixture: Send + Sync {
    /// Get fixture name
    fn name(&self) -> &str;

    /// Prepare the page before the scenario body
    async fn before_each(&self, _page: &mut dyn PageDriver, _ctx: &ScenarioContext) -> QaResult<()> {
        Ok(())
    }

    /// Runs after the scenario body, whatever its outcome
    async fn after_each(&self, _page: &mut dyn PageDriver, _ctx: &ScenarioContext) -> QaResult<()> {
        Ok(())
    }
}

/// The two fixtures the suites use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFixture {
    /// Navigate to the application before each scenario
    Basic,
    /// Navigate before, then remove every question and check the empty state after
    WithCleanup,
}

impl PageFixture {
    /// Navigation only
    #[must_use]
    pub const fn basic() -> Self {
        Self::Basic
    }

    /// Navigation plus cleanup
    #[must_use]
    pub const fn with_cleanup() -> Self {
        Self::WithCleanup
    }
}

#[async_trait]
impl Fixture for PageFixture {
    fn name(&self) -> &str {
        match self {
            Self::Basic => "basic",
            Self::WithCleanup => "with-cleanup",
        }
    }

    async fn before_each(&self, page: &mut dyn PageDriver, ctx: &ScenarioContext) -> QaResult<()> {
        tracing::debug!(url = %ctx.base_url, "navigating");
        page.goto(&ctx.base_url).await
    }

    async fn after_each(&self, page: &mut dyn PageDriver, _ctx: &ScenarioContext) -> QaResult<()> {
        if *self == Self::Basic {
            return Ok(());
        }
        remove_all_questions(page).await
    }
}

async fn remove_all_questions(page: &mut dyn PageDriver) -> QaResult<()> {
    page.click(&LOCATORS.remove_button.into()).await?;
    let remaining = page.count(&LOCATORS.existing_question.into()).await?;
    Assertion::has_count(remaining, 0)
        .context("questions after removal")
        .into_result()?;
    let body = page.inner_text(&LOCATORS.body.into()).await?;
    Assertion::contains(&body, CONSTANTS.no_questions_message)
        .context("page body after removal")
        .into_result()
}

/// Check a button's label and background color
///
/// Exactly one element must match `locator`.
///
/// # Errors
///
/// Returns [`QaError::AssertionFailed`] on a missing button, wrong text or
/// wrong color; driver errors pass through.
pub async fn verify_button(
    page: &dyn PageDriver,
    locator: &Locator,
    expected_text: &str,
    expected_color: &str,
) -> QaResult<()> {
    let count = page.count(locator).await?;
    Assertion::has_count(count, 1)
        .context(&format!("button '{locator}'"))
        .into_result()?;

    let text = page.inner_text(locator).await?;
    Assertion::equals(expected_text, text.as_str())
        .context(&format!("text of '{locator}'"))
        .into_result()?;

    let color = page.computed_style(locator, "background-color").await?;
    Assertion::equals(expected_color, color.as_str())
        .context(&format!("background-color of '{locator}'"))
        .into_result()
}

/// Hover an element and check the page text then contains `expected_text`
///
/// # Errors
///
/// Returns [`QaError::Timeout`] if the text does not appear within `wait`.
pub async fn verify_hover_text(
    page: &mut dyn PageDriver,
    locator: &Locator,
    expected_text: &str,
    wait: &WaitOptions,
) -> QaResult<()> {
    page.hover(locator).await?;
    let body = Locator::new(LOCATORS.body);
    wait_for_text(&*page, &body, expected_text, wait).await?;
    let text = page.inner_text(&body).await?;
    Assertion::contains(&text, expected_text)
        .context("page body after hover")
        .into_result()
}

static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| Regex::new(r"\d+").expect("Invalid number regex"))
}

/// First run of decimal digits in `text`
#[must_use]
pub fn first_number(text: &str) -> Option<u64> {
    number_regex()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Question count shown in the sidebar
///
/// # Errors
///
/// Returns [`QaError::AssertionFailed`] if the sidebar shows no number.
pub async fn question_count_indicator(page: &dyn PageDriver) -> QaResult<u64> {
    let text = page.inner_text(&LOCATORS.sidebar.into()).await?;
    first_number(&text)
        .ok_or_else(|| QaError::assertion(format!("no number in sidebar text {text:?}")))
}

/// Compare URLs ignoring a trailing slash
#[must_use]
pub fn same_url(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CREATE_BUTTON, REMOVE_BUTTON, SORT_BUTTON};
    use crate::mock::MockQaPage;
    use proptest::prelude::*;
    use std::time::Duration;

    async fn prepared(page: MockQaPage, fixture: PageFixture) -> MockQaPage {
        let mut page = page;
        fixture
            .before_each(&mut page, &ScenarioContext::default())
            .await
            .unwrap();
        page
    }

    fn fast_wait() -> WaitOptions {
        WaitOptions::new().with_timeout(40).with_poll_interval(5)
    }

    mod page_fixture_tests {
        use super::*;

        #[test]
        fn test_names() {
            assert_eq!(PageFixture::basic().name(), "basic");
            assert_eq!(PageFixture::with_cleanup().name(), "with-cleanup");
        }

        #[tokio::test]
        async fn test_before_each_navigates_to_base_url() {
            let page = prepared(MockQaPage::new(), PageFixture::basic()).await;
            assert!(page.was_called("goto:http://localhost:8000"));
            assert_eq!(page.questions().len(), 1);
        }

        #[tokio::test]
        async fn test_before_each_propagates_navigation_error() {
            let mut page = MockQaPage::new().unreachable();
            let err = PageFixture::basic()
                .before_each(&mut page, &ScenarioContext::default())
                .await
                .unwrap_err();
            assert!(matches!(err, QaError::Navigation { .. }));
        }

        #[tokio::test]
        async fn test_basic_after_each_leaves_page_alone() {
            let mut page = prepared(MockQaPage::new(), PageFixture::basic()).await;
            PageFixture::basic()
                .after_each(&mut page, &ScenarioContext::default())
                .await
                .unwrap();
            assert_eq!(page.questions().len(), 1);
            assert!(!page.was_called("click"));
        }

        #[tokio::test]
        async fn test_cleanup_removes_questions() {
            let mut page = prepared(MockQaPage::new(), PageFixture::with_cleanup()).await;
            PageFixture::with_cleanup()
                .after_each(&mut page, &ScenarioContext::default())
                .await
                .unwrap();
            assert!(page.questions().is_empty());
        }

        #[tokio::test]
        async fn test_cleanup_fails_when_remove_is_broken() {
            let mut page = prepared(
                MockQaPage::new().with_broken_remove(),
                PageFixture::with_cleanup(),
            )
            .await;
            let err = PageFixture::with_cleanup()
                .after_each(&mut page, &ScenarioContext::default())
                .await
                .unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("expected count 0, got 1"));
        }

        #[tokio::test]
        async fn test_cleanup_fails_without_empty_state_message() {
            let mut page = prepared(
                MockQaPage::new().without_empty_state(),
                PageFixture::with_cleanup(),
            )
            .await;
            let err = PageFixture::with_cleanup()
                .after_each(&mut page, &ScenarioContext::default())
                .await
                .unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("page body after removal"));
            assert!(page.questions().is_empty());
        }
    }

    mod verify_button_tests {
        use super::*;

        #[tokio::test]
        async fn test_all_buttons_match() {
            let page = prepared(MockQaPage::new(), PageFixture::basic()).await;
            for button in [CREATE_BUTTON, SORT_BUTTON, REMOVE_BUTTON] {
                verify_button(&page, &button.locator.into(), button.text, button.color)
                    .await
                    .unwrap();
            }
        }

        #[tokio::test]
        async fn test_wrong_color() {
            let page = prepared(
                MockQaPage::new().with_button(REMOVE_BUTTON.locator, REMOVE_BUTTON.text, "rgb(0, 0, 0)"),
                PageFixture::basic(),
            )
            .await;
            let err = verify_button(
                &page,
                &REMOVE_BUTTON.locator.into(),
                REMOVE_BUTTON.text,
                REMOVE_BUTTON.color,
            )
            .await
            .unwrap_err();
            assert!(err.is_assertion());
            assert!(err.to_string().contains("background-color"));
        }

        #[tokio::test]
        async fn test_wrong_text() {
            let page = prepared(
                MockQaPage::new().with_button(SORT_BUTTON.locator, "Sort", SORT_BUTTON.color),
                PageFixture::basic(),
            )
            .await;
            let err = verify_button(&page, &SORT_BUTTON.locator.into(), SORT_BUTTON.text, SORT_BUTTON.color)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("text of"));
        }

        #[tokio::test]
        async fn test_missing_button() {
            let page = MockQaPage::new();
            let err = verify_button(&page, &CREATE_BUTTON.locator.into(), CREATE_BUTTON.text, CREATE_BUTTON.color)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("expected count 1, got 0"));
        }
    }

    mod hover_tests {
        use super::*;

        #[tokio::test]
        async fn test_hover_reveals_tooltip() {
            let mut page = prepared(MockQaPage::new(), PageFixture::basic()).await;
            verify_hover_text(
                &mut page,
                &LOCATORS.created_questions_text.into(),
                CONSTANTS.created_questions_tooltip,
                &fast_wait(),
            )
            .await
            .unwrap();
        }

        #[tokio::test]
        async fn test_delayed_tooltip_within_wait() {
            let mut page = prepared(
                MockQaPage::new().with_tooltip_delay(Duration::from_millis(15)),
                PageFixture::basic(),
            )
            .await;
            let wait = WaitOptions::new().with_timeout(1_000).with_poll_interval(5);
            verify_hover_text(
                &mut page,
                &LOCATORS.created_questions_text.into(),
                CONSTANTS.created_questions_tooltip,
                &wait,
            )
            .await
            .unwrap();
        }

        #[tokio::test]
        async fn test_missing_tooltip_times_out() {
            let mut page = prepared(MockQaPage::new().without_tooltip(), PageFixture::basic()).await;
            let err = verify_hover_text(
                &mut page,
                &LOCATORS.created_questions_text.into(),
                CONSTANTS.created_questions_tooltip,
                &fast_wait(),
            )
            .await
            .unwrap_err();
            assert!(matches!(err, QaError::Timeout { ms: 40, .. }));
        }
    }

    mod indicator_tests {
        use super::*;

        #[test]
        fn test_first_number() {
            assert_eq!(first_number("Here you can find 12 questions."), Some(12));
            assert_eq!(first_number("3 then 4"), Some(3));
            assert_eq!(first_number("none"), None);
        }

        #[tokio::test]
        async fn test_question_count_indicator() {
            let page = prepared(MockQaPage::new(), PageFixture::basic()).await;
            assert_eq!(question_count_indicator(&page).await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_indicator_missing_sidebar() {
            let page = MockQaPage::new();
            let err = question_count_indicator(&page).await.unwrap_err();
            assert!(matches!(err, QaError::ElementNotFound { .. }));
        }

        #[test]
        fn test_same_url() {
            assert!(same_url("http://localhost:8000/", "http://localhost:8000"));
            assert!(!same_url("http://localhost:8000/a", "http://localhost:8000"));
        }

        proptest! {
            #[test]
            fn prop_first_number_finds_embedded_count(n in 0u64..1_000_000, prefix in "[a-zA-Z ,.]{0,20}", suffix in "[a-zA-Z ,.]{0,20}") {
                let text = format!("{prefix}{n}{suffix}");
                prop_assert_eq!(first_number(&text), Some(n));
            }
        }
    }
}
