//! Wait mechanisms
//!
//! Bounded polling for page-side changes that happen asynchronously, such as
//! a tooltip revealed by hovering or an element appearing after a click. A
//! wait either observes its condition within the timeout or fails with
//! [`QaError::Timeout`]; it never hangs.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::{QaError, QaResult};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

/// Poll `probe` until it returns `true` or the timeout elapses.
///
/// The probe runs at least once, even with a zero timeout. Errors from the
/// probe abort the wait.
pub async fn wait_until<F, Fut>(
    waited_for: impl Into<String>,
    options: &WaitOptions,
    mut probe: F,
) -> QaResult<WaitResult>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = QaResult<bool>>,
{
    let waited_for = waited_for.into();
    let start = Instant::now();

    loop {
        if probe().await? {
            tracing::trace!(%waited_for, elapsed_ms = start.elapsed().as_millis() as u64, "wait satisfied");
            return Ok(WaitResult {
                elapsed: start.elapsed(),
                waited_for,
            });
        }
        if start.elapsed() >= options.timeout() {
            return Err(QaError::Timeout {
                ms: options.timeout_ms,
                waited_for,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Wait for at least one element to match the locator
pub async fn wait_for_selector(
    page: &dyn PageDriver,
    locator: &Locator,
    options: &WaitOptions,
) -> QaResult<WaitResult> {
    wait_until(format!("selector '{locator}'"), options, || async move {
        let count = page.count(locator).await?;
        Ok::<bool, QaError>(count > 0)
    })
    .await
}

/// Wait for the first element matching the locator to become visible
pub async fn wait_for_visible(
    page: &dyn PageDriver,
    locator: &Locator,
    options: &WaitOptions,
) -> QaResult<WaitResult> {
    wait_until(format!("'{locator}' to be visible"), options, || async move {
        page.is_visible(locator).await
    })
    .await
}

/// Wait for the text of the first element matching the locator to contain `expected`
pub async fn wait_for_text(
    page: &dyn PageDriver,
    locator: &Locator,
    expected: &str,
    options: &WaitOptions,
) -> QaResult<WaitResult> {
    wait_until(
        format!("'{locator}' to contain {expected:?}"),
        options,
        || async move {
            match page.inner_text(locator).await {
                Ok(text) => Ok(text.contains(expected)),
                Err(QaError::ElementNotFound { .. }) => Ok(false),
                Err(e) => Err(e),
            }
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CONSTANTS, LOCATORS, PAGE_URL};
    use crate::mock::MockQaPage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        }

        #[test]
        fn test_builders() {
            let opts = WaitOptions::new().with_timeout(100).with_poll_interval(5);
            assert_eq!(opts.timeout(), Duration::from_millis(100));
            assert_eq!(opts.poll_interval(), Duration::from_millis(5));
        }
    }

    mod wait_until_tests {
        use super::*;

        #[tokio::test]
        async fn test_immediate_success() {
            let result = wait_until("always", &WaitOptions::new(), || async { Ok(true) })
                .await
                .unwrap();
            assert_eq!(result.waited_for, "always");
        }

        #[tokio::test]
        async fn test_succeeds_after_polls() {
            let counter = AtomicUsize::new(0);
            let calls = &counter;
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            wait_until("third call", &opts, || async move {
                Ok(calls.fetch_add(1, Ordering::SeqCst) >= 2)
            })
            .await
            .unwrap();
            assert_eq!(calls.load(Ordering::SeqCst), 3);
        }

        #[tokio::test]
        async fn test_times_out() {
            let opts = WaitOptions::new().with_timeout(20).with_poll_interval(5);
            let err = wait_until("never", &opts, || async { Ok(false) })
                .await
                .unwrap_err();
            assert!(matches!(err, QaError::Timeout { ms: 20, .. }));
        }

        #[tokio::test]
        async fn test_zero_timeout_probes_once() {
            let counter = AtomicUsize::new(0);
            let calls = &counter;
            let opts = WaitOptions::new().with_timeout(0);
            let _ = wait_until("once", &opts, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(false)
            })
            .await;
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_probe_error_aborts() {
            let err = wait_until("error", &WaitOptions::new(), || async {
                Err::<bool, _>(QaError::page("detached"))
            })
            .await
            .unwrap_err();
            assert!(matches!(err, QaError::Page { .. }));
        }
    }

    mod page_wait_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_selector_on_loaded_page() {
            let mut page = MockQaPage::new();
            page.goto(PAGE_URL).await.unwrap();
            wait_for_selector(&page, &LOCATORS.page_title.into(), &WaitOptions::new())
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_wait_for_missing_selector_times_out() {
            let mut page = MockQaPage::new();
            page.goto(PAGE_URL).await.unwrap();
            let opts = WaitOptions::new().with_timeout(30).with_poll_interval(5);
            let err = wait_for_selector(&page, &LOCATORS.no_questions_text.into(), &opts)
                .await
                .unwrap_err();
            assert!(matches!(err, QaError::Timeout { .. }));
        }

        #[tokio::test]
        async fn test_wait_for_delayed_text() {
            let mut page = MockQaPage::new().with_tooltip_delay(Duration::from_millis(30));
            page.goto(PAGE_URL).await.unwrap();
            page.hover(&LOCATORS.created_questions_text.into())
                .await
                .unwrap();
            let opts = WaitOptions::new().with_timeout(2_000).with_poll_interval(5);
            let result = wait_for_text(
                &page,
                &LOCATORS.body.into(),
                CONSTANTS.created_questions_tooltip,
                &opts,
            )
            .await
            .unwrap();
            assert!(result.elapsed >= Duration::from_millis(30));
        }

        #[tokio::test]
        async fn test_wait_for_visible_times_out_for_hidden_answer() {
            let mut page = MockQaPage::new();
            page.goto(PAGE_URL).await.unwrap();
            let opts = WaitOptions::new().with_timeout(20).with_poll_interval(5);
            let err = wait_for_visible(&page, &LOCATORS.existing_answer.into(), &opts)
                .await
                .unwrap_err();
            assert!(matches!(err, QaError::Timeout { .. }));
        }
    }
}
