//! Negative paths: empty state and rejected submissions.

use super::question_count;
use crate::assertion::Assertion;
use crate::data::{CONSTANTS, LOCATORS};
use crate::driver::PageDriver;
use crate::fixture::PageFixture;
use crate::harness::{Scenario, ScenarioContext, Suite};
use crate::locator::Locator;
use crate::result::QaResult;
use crate::wait::wait_for_selector;

/// Negative-path suite
#[must_use]
pub fn negative() -> Suite {
    Suite::new("negative", "Negative auto tests", PageFixture::basic())
        .with_scenario(Scenario::new(
            "verify no questions text appears after clicking \"Remove questions\" button with 0 questions created",
            |p, c| Box::pin(remove_shows_empty_state(p, c)),
        ))
        .with_scenario(Scenario::new(
            "submit empty form and verify field is highlighted and no new question created",
            |p, c| Box::pin(submit_rejected(p, c, None, None)),
        ))
        .with_scenario(Scenario::new(
            "submit form with only question filled and verify \"answer\" field is highlighted and no new question created",
            |p, c| Box::pin(submit_rejected(p, c, Some(CONSTANTS.new_question_text), None)),
        ))
        .with_scenario(Scenario::new(
            "submit form with only answer filled and verify \"question\" field is highlighted and no new question created",
            |p, c| Box::pin(submit_rejected(p, c, None, Some(CONSTANTS.new_answer_text))),
        ))
}

/// Removing twice must leave the same empty state
async fn remove_shows_empty_state(page: &mut dyn PageDriver, ctx: &ScenarioContext) -> QaResult<()> {
    let alert = Locator::new(LOCATORS.no_questions_text);
    for _ in 0..2 {
        page.click(&LOCATORS.remove_button.into()).await?;
        wait_for_selector(page, &alert, &ctx.wait).await?;
        let text = page.inner_text(&alert).await?;
        Assertion::equals(CONSTANTS.no_questions_message, text.as_str())
            .context("empty-state message")
            .into_result()?;
        Assertion::has_count(question_count(page).await?, 0)
            .context("questions after removal")
            .into_result()?;
    }
    Ok(())
}

async fn submit_rejected(
    page: &mut dyn PageDriver,
    _ctx: &ScenarioContext,
    question: Option<&str>,
    answer: Option<&str>,
) -> QaResult<()> {
    let before = question_count(page).await?;
    if let Some(text) = question {
        page.fill(&LOCATORS.new_question_field.into(), text).await?;
    }
    if let Some(text) = answer {
        page.fill(&LOCATORS.new_answer_field.into(), text).await?;
    }
    page.click(&LOCATORS.create_questions_button.into()).await?;
    Assertion::has_count(question_count(page).await?, before)
        .context("questions after incomplete submission")
        .into_result()
}
