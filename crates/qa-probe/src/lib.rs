//! qa-probe: end-to-end UI suites for the Q/A tool
//!
//! The Q/A tool is a single page that lists questions, reveals an answer
//! when its question is clicked, and offers a form plus "Create", "Sort" and
//! "Remove" buttons. This crate describes that page as data, wraps every
//! scenario in a page fixture, and runs four suites against it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      QA-PROBE Architecture                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────────────┐    │
//! │   │ Suites     │    │ Test       │    │ PageDriver         │    │
//! │   │ + Test     │───►│ Harness    │───►│ ChromiumPage (CDP) │    │
//! │   │   Data     │    │ + Fixture  │    │ MockQaPage         │    │
//! │   └────────────┘    └────────────┘    └────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use qa_probe::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let pages = || -> QaResult<Box<dyn PageDriver>> { Ok(Box::new(MockQaPage::new())) };
//! let harness = TestHarness::new(RunConfig::default());
//! let results = harness.run_suite(&suites::buttons(), &pages).await;
//! assert!(results.all_passed());
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod assertion;
mod browser;
mod config;
mod data;
mod driver;
mod fixture;
mod harness;
mod locator;
mod result;
mod wait;

/// In-memory Q/A page for tests
pub mod mock;

/// The Q/A tool suites
pub mod suites;

pub use assertion::{Assertion, AssertionResult};
pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::{ChromiumBrowser, ChromiumPage};
pub use config::{RunConfig, Viewport, BASE_URL_ENV, DEFAULT_SCENARIO_TIMEOUT_MS};
pub use data::{
    marked_question, numbered, ButtonSpec, Constants, Locators, CONSTANTS, CREATE_BUTTON,
    LOCATORS, PAGE_URL, REMOVE_BUTTON, SORT_BUTTON,
};
pub use driver::{PageDriver, PageFactory};
pub use fixture::{
    first_number, question_count_indicator, same_url, verify_button, verify_hover_text, Fixture,
    PageFixture,
};
pub use harness::{
    Hook, Outcome, RunObserver, RunReport, Scenario, ScenarioContext, ScenarioFn,
    ScenarioFuture, ScenarioResult, Suite, SuiteMode, SuiteResults, TestHarness,
};
pub use locator::{Locator, Selector};
pub use mock::MockQaPage;
pub use result::{QaError, QaResult};
pub use wait::{
    wait_for_selector, wait_for_text, wait_for_visible, wait_until, WaitOptions, WaitResult,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::assertion::*;
    pub use super::browser::*;
    pub use super::config::*;
    pub use super::data::*;
    pub use super::driver::*;
    pub use super::fixture::*;
    pub use super::harness::*;
    pub use super::locator::*;
    pub use super::mock::MockQaPage;
    pub use super::result::*;
    pub use super::suites;
    pub use super::wait::*;
    pub use async_trait::async_trait;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_prelude_exports() {
        use crate::prelude::*;
        let _ = RunConfig::default();
        let _ = Locator::new(LOCATORS.body);
        let _ = PageFixture::basic();
        assert_eq!(suites::all().len(), 4);
    }
}
