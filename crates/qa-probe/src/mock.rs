//! In-memory model of the Q/A page for unit testing.
//!
//! `MockQaPage` implements [`PageDriver`] over a small element model that
//! mirrors the live page: the heading, the "Created questions" tooltip, the
//! sidebar counter, the question list, the creation form and the three
//! buttons. Builder switches break individual behaviors so suites can be
//! checked for the failures they are meant to catch.

use crate::data::{CONSTANTS, CREATE_BUTTON, LOCATORS, PAGE_URL, REMOVE_BUTTON, SORT_BUTTON};
use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::result::{QaError, QaResult};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Answer the application ships with for its initial question
pub const INITIAL_ANSWER_TEXT: &str = "Just use the form below!";

/// Background of elements without one
const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// A question in the mock list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockQuestion {
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Whether the answer is revealed
    pub expanded: bool,
}

impl MockQuestion {
    fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            expanded: false,
        }
    }
}

#[derive(Debug, Clone)]
struct MockButton {
    locator: &'static str,
    text: String,
    color: String,
}

/// Switchable page behaviors
#[derive(Debug, Clone)]
struct Behavior {
    reachable: bool,
    validate_form: bool,
    remove_clears: bool,
    sort_works: bool,
    empty_state_shown: bool,
    counter_offset: usize,
    answers_reveal: bool,
    tooltip_delay: Option<Duration>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            reachable: true,
            validate_form: true,
            remove_clears: true,
            sort_works: true,
            empty_state_shown: true,
            counter_offset: 0,
            answers_reveal: true,
            tooltip_delay: Some(Duration::ZERO),
        }
    }
}

/// One rendered element
#[derive(Debug, Clone)]
struct MockElement {
    selectors: &'static [&'static str],
    text: String,
    visible: bool,
    background: Option<String>,
}

impl MockElement {
    fn new(selectors: &'static [&'static str], text: impl Into<String>) -> Self {
        Self {
            selectors,
            text: text.into(),
            visible: true,
            background: None,
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        self.selectors
            .iter()
            .any(|css| selector.matches(css, &self.text))
    }
}

const TITLE: &[&str] = &[LOCATORS.page_title];
const CREATED_LABEL: &[&str] = &[LOCATORS.created_questions_text];
const TOOLTIP: &[&str] = &[".tooltipped-title__tooltip"];
const SIDEBAR: &[&str] = &[LOCATORS.sidebar];
const ALERT: &[&str] = &[LOCATORS.no_questions_text];
const QUESTION: &[&str] = &[LOCATORS.existing_question, LOCATORS.new_question_selector];
const ANSWER: &[&str] = &[LOCATORS.existing_answer, LOCATORS.new_answer_selector];
const QUESTION_INPUT: &[&str] = &[LOCATORS.new_question_field];
const ANSWER_INPUT: &[&str] = &[LOCATORS.new_answer_field];
const CREATE: &[&str] = &[LOCATORS.create_questions_button];
const SORT: &[&str] = &[LOCATORS.sort_button];
const REMOVE: &[&str] = &[LOCATORS.remove_button];

/// Mock Q/A page
#[derive(Debug)]
pub struct MockQaPage {
    app_url: String,
    url: String,
    loaded: bool,
    questions: Vec<MockQuestion>,
    question_input: String,
    answer_input: String,
    hovered_at: Option<Instant>,
    buttons: Vec<MockButton>,
    behavior: Behavior,
    call_history: Vec<String>,
}

impl Default for MockQaPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MockQaPage {
    /// Create a page serving the application at [`PAGE_URL`]
    #[must_use]
    pub fn new() -> Self {
        Self::serving(PAGE_URL)
    }

    /// Create a page serving the application at `app_url`
    #[must_use]
    pub fn serving(app_url: impl Into<String>) -> Self {
        let buttons = [CREATE_BUTTON, SORT_BUTTON, REMOVE_BUTTON]
            .iter()
            .map(|b| MockButton {
                locator: b.locator,
                text: b.text.to_string(),
                color: b.color.to_string(),
            })
            .collect();
        Self {
            app_url: app_url.into(),
            url: "about:blank".to_string(),
            loaded: false,
            questions: Vec::new(),
            question_input: String::new(),
            answer_input: String::new(),
            hovered_at: None,
            buttons,
            behavior: Behavior::default(),
            call_history: Vec::new(),
        }
    }

    /// Every navigation fails
    #[must_use]
    pub fn unreachable(mut self) -> Self {
        self.behavior.reachable = false;
        self
    }

    /// The form accepts submissions with empty fields
    #[must_use]
    pub fn without_validation(mut self) -> Self {
        self.behavior.validate_form = false;
        self
    }

    /// "Remove questions" leaves the list untouched
    #[must_use]
    pub fn with_broken_remove(mut self) -> Self {
        self.behavior.remove_clears = false;
        self
    }

    /// "Sort questions" reverses the list instead of sorting it
    #[must_use]
    pub fn with_broken_sort(mut self) -> Self {
        self.behavior.sort_works = false;
        self
    }

    /// An empty list renders no "No questions yet" alert
    #[must_use]
    pub fn without_empty_state(mut self) -> Self {
        self.behavior.empty_state_shown = false;
        self
    }

    /// The sidebar counter reports one question more than the list holds
    #[must_use]
    pub fn with_wrong_counter(mut self) -> Self {
        self.behavior.counter_offset = 1;
        self
    }

    /// Clicking a question never expands its answer
    #[must_use]
    pub fn without_answer_reveal(mut self) -> Self {
        self.behavior.answers_reveal = false;
        self
    }

    /// The tooltip appears only after `delay` of hovering
    #[must_use]
    pub fn with_tooltip_delay(mut self, delay: Duration) -> Self {
        self.behavior.tooltip_delay = Some(delay);
        self
    }

    /// Hovering never reveals the tooltip
    #[must_use]
    pub fn without_tooltip(mut self) -> Self {
        self.behavior.tooltip_delay = None;
        self
    }

    /// Override the label and color of the button at `locator`
    #[must_use]
    pub fn with_button(mut self, locator: &str, text: &str, color: &str) -> Self {
        for button in self.buttons.iter_mut().filter(|b| b.locator == locator) {
            button.text = text.to_string();
            button.color = color.to_string();
        }
        self
    }

    /// Questions currently in the list
    #[must_use]
    pub fn questions(&self) -> &[MockQuestion] {
        &self.questions
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    fn reset_app(&mut self) {
        self.questions = vec![MockQuestion::new(
            CONSTANTS.initial_question_text,
            INITIAL_ANSWER_TEXT,
        )];
        self.question_input.clear();
        self.answer_input.clear();
        self.hovered_at = None;
    }

    fn tooltip_shown(&self) -> bool {
        match (self.hovered_at, self.behavior.tooltip_delay) {
            (Some(at), Some(delay)) => at.elapsed() >= delay,
            _ => false,
        }
    }

    fn sidebar_text(&self) -> String {
        let n = self.questions.len() + self.behavior.counter_offset;
        let noun = if n == 1 { "question" } else { "questions" };
        format!("Here you can find {n} {noun}. Feel free to create your own questions!")
    }

    /// Elements in document order
    fn elements(&self) -> Vec<MockElement> {
        if !self.loaded {
            return Vec::new();
        }

        let mut elements = vec![
            MockElement::new(TITLE, CONSTANTS.page_title_text),
            MockElement::new(CREATED_LABEL, "Created questions"),
            MockElement {
                visible: self.tooltip_shown(),
                ..MockElement::new(TOOLTIP, CONSTANTS.created_questions_tooltip)
            },
            MockElement::new(SIDEBAR, self.sidebar_text()),
        ];

        if self.questions.is_empty() && self.behavior.empty_state_shown {
            elements.push(MockElement::new(ALERT, CONSTANTS.no_questions_message));
        }
        for q in &self.questions {
            elements.push(MockElement::new(QUESTION, q.question.clone()));
            elements.push(MockElement {
                visible: q.expanded,
                ..MockElement::new(ANSWER, q.answer.clone())
            });
        }

        elements.push(MockElement::new(QUESTION_INPUT, ""));
        elements.push(MockElement::new(ANSWER_INPUT, ""));
        for button in &self.buttons {
            let selectors = match button.locator {
                l if l == LOCATORS.create_questions_button => CREATE,
                l if l == LOCATORS.sort_button => SORT,
                _ => REMOVE,
            };
            elements.push(MockElement {
                background: Some(button.color.clone()),
                ..MockElement::new(selectors, button.text.clone())
            });
        }
        elements
    }

    fn body_text(&self) -> String {
        self.elements()
            .into_iter()
            .filter(|e| e.visible)
            .map(|e| e.text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn matching(&self, locator: &Locator) -> Vec<MockElement> {
        let selector = locator.selector();
        if self.loaded && selector.css_part() == LOCATORS.body {
            let body = MockElement::new(&["body"], self.body_text());
            return if body.matches(selector) {
                vec![body]
            } else {
                Vec::new()
            };
        }
        self.elements()
            .into_iter()
            .filter(|e| e.matches(selector))
            .collect()
    }

    fn require(&self, locator: &Locator) -> QaResult<MockElement> {
        self.matching(locator)
            .into_iter()
            .next()
            .ok_or_else(|| QaError::ElementNotFound {
                selector: locator.to_string(),
            })
    }

    fn submit_form(&mut self) {
        let complete =
            !self.question_input.trim().is_empty() && !self.answer_input.trim().is_empty();
        if complete || !self.behavior.validate_form {
            let question = std::mem::take(&mut self.question_input);
            let answer = std::mem::take(&mut self.answer_input);
            self.questions.push(MockQuestion::new(question, answer));
        }
    }
}

#[async_trait]
impl PageDriver for MockQaPage {
    async fn goto(&mut self, url: &str) -> QaResult<()> {
        self.call_history.push(format!("goto:{url}"));
        if !self.behavior.reachable {
            return Err(QaError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_REFUSED".to_string(),
            });
        }
        let bare = url.trim_end_matches('/');
        self.loaded = bare == self.app_url.trim_end_matches('/');
        self.url = if bare.matches('/').count() == 2 {
            format!("{bare}/")
        } else {
            url.to_string()
        };
        if self.loaded {
            self.reset_app();
        }
        Ok(())
    }

    async fn url(&self) -> QaResult<String> {
        Ok(self.url.clone())
    }

    async fn count(&self, locator: &Locator) -> QaResult<usize> {
        Ok(self.matching(locator).len())
    }

    async fn inner_texts(&self, locator: &Locator) -> QaResult<Vec<String>> {
        Ok(self.matching(locator).into_iter().map(|e| e.text).collect())
    }

    async fn is_visible(&self, locator: &Locator) -> QaResult<bool> {
        Ok(self
            .matching(locator)
            .first()
            .is_some_and(|element| element.visible))
    }

    async fn computed_style(&self, locator: &Locator, property: &str) -> QaResult<String> {
        let element = self.require(locator)?;
        match property {
            "background-color" => Ok(element
                .background
                .unwrap_or_else(|| TRANSPARENT.to_string())),
            other => Err(QaError::Script {
                message: format!("mock page does not model '{other}'"),
            }),
        }
    }

    async fn click(&mut self, locator: &Locator) -> QaResult<()> {
        self.call_history.push(format!("click:{locator}"));
        let element = self.require(locator)?;

        if element.selectors == REMOVE {
            if self.behavior.remove_clears {
                self.questions.clear();
            }
        } else if element.selectors == SORT {
            if self.behavior.sort_works {
                self.questions.sort_by(|a, b| a.question.cmp(&b.question));
            } else {
                self.questions.reverse();
            }
        } else if element.selectors == CREATE {
            self.submit_form();
        } else if element.selectors == QUESTION && self.behavior.answers_reveal {
            let selector = locator.selector();
            if let Some(q) = self
                .questions
                .iter_mut()
                .find(|q| QUESTION.iter().any(|css| selector.matches(css, &q.question)))
            {
                q.expanded = !q.expanded;
            }
        }
        Ok(())
    }

    async fn fill(&mut self, locator: &Locator, text: &str) -> QaResult<()> {
        self.call_history.push(format!("fill:{locator}"));
        let element = self.require(locator)?;
        if element.selectors == QUESTION_INPUT {
            self.question_input = text.to_string();
        } else if element.selectors == ANSWER_INPUT {
            self.answer_input = text.to_string();
        } else {
            return Err(QaError::page(format!("{locator} is not an input")));
        }
        Ok(())
    }

    async fn hover(&mut self, locator: &Locator) -> QaResult<()> {
        self.call_history.push(format!("hover:{locator}"));
        let element = self.require(locator)?;
        self.hovered_at = (element.selectors == CREATED_LABEL).then(Instant::now);
        Ok(())
    }

    async fn close(&mut self) -> QaResult<()> {
        self.call_history.push("close".to_string());
        Ok(())
    }
}
