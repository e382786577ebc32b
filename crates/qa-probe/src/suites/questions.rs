//! Question creation and management.
//!
//! Runs with the cleanup fixture, so every scenario ends with an empty list.

use super::question_count;
use crate::assertion::Assertion;
use crate::data::{marked_question, numbered, CONSTANTS, LOCATORS};
use crate::driver::PageDriver;
use crate::fixture::{question_count_indicator, PageFixture};
use crate::harness::{Scenario, ScenarioContext, Suite};
use crate::locator::Locator;
use crate::result::QaResult;
use crate::wait::wait_for_visible;

/// Questions created by the counter scenario
const CREATED_COUNT: usize = 4;

/// Creation & management suite
#[must_use]
pub fn questions() -> Suite {
    Suite::new(
        "questions",
        "Question Creation and Management Tests",
        PageFixture::with_cleanup(),
    )
    .with_scenario(Scenario::new(
        "verify if new question and answer is created",
        |p, c| Box::pin(create_and_reveal(p, c)),
    ))
    .with_scenario(Scenario::new(
        "verify if questions are sorted alphabetically after sort button is clicked",
        |p, c| Box::pin(sort_orders_questions(p, c)),
    ))
    .with_scenario(Scenario::new(
        "verify if text with number of questions is correct",
        |p, c| Box::pin(counter_matches_list(p, c)),
    ))
}

async fn create_question(page: &mut dyn PageDriver, question: &str, answer: &str) -> QaResult<()> {
    page.fill(&LOCATORS.new_question_field.into(), question).await?;
    page.fill(&LOCATORS.new_answer_field.into(), answer).await?;
    page.click(&LOCATORS.create_questions_button.into()).await
}

async fn create_and_reveal(page: &mut dyn PageDriver, ctx: &ScenarioContext) -> QaResult<()> {
    create_question(page, CONSTANTS.new_question_text, CONSTANTS.new_answer_text).await?;

    let question = Locator::new(LOCATORS.new_question_selector).with_text(CONSTANTS.new_question_text);
    wait_for_visible(page, &question, &ctx.wait).await?;
    page.click(&question).await?;

    let answer = Locator::new(LOCATORS.new_answer_selector).with_text(CONSTANTS.new_answer_text);
    wait_for_visible(page, &answer, &ctx.wait).await?;
    Ok(())
}

async fn sort_orders_questions(page: &mut dyn PageDriver, _ctx: &ScenarioContext) -> QaResult<()> {
    for (i, letter) in CONSTANTS.random_letters.iter().enumerate() {
        let answer = numbered(CONSTANTS.new_answer_text, i + 1);
        create_question(page, &marked_question(letter), &answer).await?;
    }
    page.click(&LOCATORS.sort_button.into()).await?;

    let texts = page
        .inner_texts(&LOCATORS.existing_question.into())
        .await?;
    Assertion::is_sorted(&texts)
        .context("question order after sort")
        .into_result()
}

/// The sidebar counter must equal both the rendered list length and the
/// initial length plus the questions created here.
async fn counter_matches_list(page: &mut dyn PageDriver, _ctx: &ScenarioContext) -> QaResult<()> {
    let initial = question_count(page).await?;
    for i in 1..=CREATED_COUNT {
        create_question(
            page,
            &numbered(CONSTANTS.new_question_text, i),
            &numbered(CONSTANTS.new_answer_text, i),
        )
        .await?;
    }

    let indicator = question_count_indicator(page).await?;
    let rendered = question_count(page).await?;
    Assertion::has_count(rendered, indicator as usize)
        .context("questions rendered vs. sidebar counter")
        .into_result()?;
    Assertion::has_count(rendered.saturating_sub(initial), CREATED_COUNT)
        .context("questions added")
        .into_result()
}
