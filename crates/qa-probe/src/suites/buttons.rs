//! Button label and color checks.

use crate::data::{ButtonSpec, CREATE_BUTTON, REMOVE_BUTTON, SORT_BUTTON};
use crate::driver::PageDriver;
use crate::fixture::{verify_button, PageFixture};
use crate::harness::{Scenario, ScenarioContext, Suite};
use crate::result::QaResult;

/// Button verification suite
#[must_use]
pub fn buttons() -> Suite {
    Suite::new("buttons", "Button Color and Text Test", PageFixture::basic())
        .with_scenario(button_scenario(CREATE_BUTTON))
        .with_scenario(button_scenario(SORT_BUTTON))
        .with_scenario(button_scenario(REMOVE_BUTTON))
}

fn button_scenario(button: ButtonSpec) -> Scenario {
    Scenario::new(
        format!(
            "verify that \"{}\" button has correct color and text",
            button.text
        ),
        move |p, c| Box::pin(check_button(p, c, button)),
    )
}

async fn check_button(
    page: &mut dyn PageDriver,
    _ctx: &ScenarioContext,
    button: ButtonSpec,
) -> QaResult<()> {
    verify_button(page, &button.locator.into(), button.text, button.color).await
}
