//! Browser control over the Chrome DevTools Protocol.
//!
//! [`BrowserConfig`] is always available. With the `browser` feature,
//! [`ChromiumBrowser`] launches Chromium through chromiumoxide and hands out
//! one [`ChromiumPage`] per scenario.

use crate::config::RunConfig;
use std::path::PathBuf;

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<PathBuf>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::from_run_config(&RunConfig::default())
    }
}

impl BrowserConfig {
    /// Derive browser settings from a run configuration
    #[must_use]
    pub fn from_run_config(config: &RunConfig) -> Self {
        Self {
            headless: config.headless,
            viewport_width: config.viewport.width,
            viewport_height: config.viewport.height,
            chromium_path: config.chromium_path.clone(),
            sandbox: true,
        }
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::{PageDriver, PageFactory};
    use crate::locator::Locator;
    use crate::result::{QaError, QaResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::element::Element;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use std::fmt::Display;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn page_error(e: impl Display) -> QaError {
        QaError::Page {
            message: e.to_string(),
        }
    }

    fn launch_error(e: impl Display) -> QaError {
        QaError::BrowserLaunch {
            message: e.to_string(),
        }
    }

    /// Chromium instance with a live CDP connection
    #[derive(Debug)]
    pub struct ChromiumBrowser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl ChromiumBrowser {
        /// Launch a new browser instance
        ///
        /// # Errors
        ///
        /// Returns error if browser cannot be launched
        pub async fn launch(config: BrowserConfig) -> QaResult<Self> {
            let mut builder = CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(launch_error)?;
            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(launch_error)?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::debug!(error = %e, "CDP handler stopped");
                        break;
                    }
                }
            });

            tracing::info!(headless = config.headless, "chromium launched");
            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a blank page
        ///
        /// # Errors
        ///
        /// Returns error if page cannot be created
        pub async fn open_page(&self) -> QaResult<ChromiumPage> {
            let browser = self.inner.lock().await;
            let page = browser.new_page("about:blank").await.map_err(page_error)?;
            Ok(ChromiumPage { inner: page })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        ///
        /// # Errors
        ///
        /// Returns error if the browser does not shut down cleanly
        pub async fn close(self) -> QaResult<()> {
            let result = {
                let mut browser = self.inner.lock().await;
                browser.close().await.map(|_| ()).map_err(launch_error)
            };
            self.handle.abort();
            result
        }
    }

    #[async_trait]
    impl PageFactory for ChromiumBrowser {
        async fn new_page(&self) -> QaResult<Box<dyn PageDriver>> {
            Ok(Box::new(self.open_page().await?))
        }
    }

    /// A browser tab driven over CDP
    #[derive(Debug)]
    pub struct ChromiumPage {
        inner: CdpPage,
    }

    impl ChromiumPage {
        async fn eval<T: DeserializeOwned>(&self, expr: String) -> QaResult<T> {
            let result = self.inner.evaluate(expr).await.map_err(|e| QaError::Script {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| QaError::Script {
                message: e.to_string(),
            })
        }

        /// First element matching the locator, resolved with the same text
        /// filter as the query expressions
        async fn element(&self, locator: &Locator) -> QaResult<Element> {
            let selector = locator.selector();
            let not_found = || QaError::ElementNotFound {
                selector: locator.to_string(),
            };
            let index: i64 = self.eval(selector.to_first_index_query()).await?;
            let index = usize::try_from(index).map_err(|_| not_found())?;
            self.inner
                .find_elements(selector.css_part())
                .await
                .map_err(page_error)?
                .into_iter()
                .nth(index)
                .ok_or_else(not_found)
        }
    }

    #[async_trait]
    impl PageDriver for ChromiumPage {
        async fn goto(&mut self, url: &str) -> QaResult<()> {
            tracing::debug!(%url, "goto");
            self.inner
                .goto(url)
                .await
                .map_err(|e| QaError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn url(&self) -> QaResult<String> {
            Ok(self
                .inner
                .url()
                .await
                .map_err(page_error)?
                .unwrap_or_default())
        }

        async fn count(&self, locator: &Locator) -> QaResult<usize> {
            self.eval(locator.selector().to_count_query()).await
        }

        async fn inner_texts(&self, locator: &Locator) -> QaResult<Vec<String>> {
            self.eval(format!(
                "{}.map(el => el.innerText)",
                locator.selector().to_query_all()
            ))
            .await
        }

        async fn is_visible(&self, locator: &Locator) -> QaResult<bool> {
            self.eval(format!(
                "(() => {{ const el = {}[0]; if (!el) return false; \
                 const s = getComputedStyle(el); const r = el.getBoundingClientRect(); \
                 return s.visibility !== 'hidden' && s.display !== 'none' && r.width > 0 && r.height > 0; }})()",
                locator.selector().to_query_all()
            ))
            .await
        }

        async fn computed_style(&self, locator: &Locator, property: &str) -> QaResult<String> {
            let value: Option<String> = self
                .eval(format!(
                    "(() => {{ const el = {}[0]; return el ? getComputedStyle(el).getPropertyValue({property:?}) : null; }})()",
                    locator.selector().to_query_all()
                ))
                .await?;
            value.ok_or_else(|| QaError::ElementNotFound {
                selector: locator.to_string(),
            })
        }

        async fn click(&mut self, locator: &Locator) -> QaResult<()> {
            tracing::debug!(%locator, "click");
            self.element(locator).await?.click().await.map_err(page_error)?;
            Ok(())
        }

        async fn fill(&mut self, locator: &Locator, text: &str) -> QaResult<()> {
            tracing::debug!(%locator, "fill");
            let element = self.element(locator).await?;
            element
                .call_js_fn(
                    "function() { this.value = ''; this.dispatchEvent(new Event('input', { bubbles: true })); }",
                    false,
                )
                .await
                .map_err(page_error)?;
            element.focus().await.map_err(page_error)?;
            element.type_str(text).await.map_err(page_error)?;
            Ok(())
        }

        async fn hover(&mut self, locator: &Locator) -> QaResult<()> {
            tracing::debug!(%locator, "hover");
            self.element(locator).await?.hover().await.map_err(page_error)?;
            Ok(())
        }

        async fn close(&mut self) -> QaResult<()> {
            self.inner.clone().close().await.map_err(page_error)
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{ChromiumBrowser, ChromiumPage};
