//! The Q/A tool suites.
//!
//! | id           | fixture        | covers                                   |
//! |--------------|----------------|------------------------------------------|
//! | `navigation` | basic          | URL, heading, initial question, tooltip  |
//! | `buttons`    | basic          | label and color of the three buttons     |
//! | `negative`   | basic          | empty state, rejected form submissions   |
//! | `questions`  | with cleanup   | create, reveal answer, sort, counter     |

mod buttons;
mod navigation;
mod negative;
mod questions;

use crate::harness::Suite;

pub use buttons::buttons;
pub use navigation::navigation;
pub use negative::negative;
pub use questions::questions;

/// Every suite, in run order
#[must_use]
pub fn all() -> Vec<Suite> {
    vec![navigation(), buttons(), negative(), questions()]
}

/// Identifiers accepted by [`find`]
pub const SUITE_IDS: [&str; 4] = ["navigation", "buttons", "negative", "questions"];

/// Look up a suite by identifier
#[must_use]
pub fn find(id: &str) -> Option<Suite> {
    all().into_iter().find(|suite| suite.id == id)
}

/// Number of elements matching the question selector
async fn question_count(page: &dyn crate::PageDriver) -> crate::QaResult<usize> {
    page.count(&crate::data::LOCATORS.existing_question.into()).await
}
