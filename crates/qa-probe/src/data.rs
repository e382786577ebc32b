//! Test data: selectors and literal values describing the Q/A page.
//!
//! Everything here is `const`. Suites read fields directly, so a locator
//! that does not exist is a compile error rather than a runtime lookup miss.

/// Base address of the application under test
pub const PAGE_URL: &str = "http://localhost:8000";

/// Selectors for the elements the suites interact with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locators {
    /// Page heading
    pub page_title: &'static str,
    /// Question text of every listed question
    pub existing_question: &'static str,
    /// Answer text of every listed question
    pub existing_answer: &'static str,
    /// Question input of the creation form
    pub new_question_field: &'static str,
    /// Answer input of the creation form
    pub new_answer_field: &'static str,
    /// "Create question" button
    pub create_questions_button: &'static str,
    /// "Sort questions" button
    pub sort_button: &'static str,
    /// "Remove questions" button
    pub remove_button: &'static str,
    /// Question text inside a list item
    pub new_question_selector: &'static str,
    /// Answer text inside a list item
    pub new_answer_selector: &'static str,
    /// "Created questions" label carrying the tooltip
    pub created_questions_text: &'static str,
    /// Empty-state alert
    pub no_questions_text: &'static str,
    /// Sidebar holding the question counter
    pub sidebar: &'static str,
    /// Document body
    pub body: &'static str,
}

/// Selectors of the Q/A page
pub const LOCATORS: Locators = Locators {
    page_title: "header.header h1",
    existing_question: ".question__question",
    existing_answer: ".question__answer",
    new_question_field: "#question",
    new_answer_field: "#answer",
    create_questions_button: "button.btn-success",
    sort_button: "button.btn-primary",
    remove_button: "button.btn-danger",
    new_question_selector: ".list-group-item .question__question",
    new_answer_selector: ".list-group-item .question__answer",
    created_questions_text: ".tooltipped-title__title",
    no_questions_text: ".alert.alert-danger",
    sidebar: ".sidebar",
    body: "body",
};

/// Literal inputs and expected outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constants {
    /// Marker letters prefixed to questions in the sort scenario
    pub random_letters: [&'static str; 3],
    /// Question the application ships with
    pub initial_question_text: &'static str,
    /// Question text used when creating questions
    pub new_question_text: &'static str,
    /// Answer text used when creating questions
    pub new_answer_text: &'static str,
    /// Expected page heading
    pub page_title_text: &'static str,
    /// Empty-state message
    pub no_questions_message: &'static str,
    /// Text revealed by hovering the "Created questions" label
    pub created_questions_tooltip: &'static str,
}

/// Values used by the suites
pub const CONSTANTS: Constants = Constants {
    random_letters: ["A", "B", "C"],
    initial_question_text: "How to add a question?",
    new_question_text: "What is Playwright?",
    new_answer_text: "Playwright is a testing framework.",
    page_title_text: "The awesome Q/A tool",
    no_questions_message: "No questions yet :-(",
    created_questions_tooltip: "Here you can find the created questions and their answers.",
};

/// Expected label and computed background color of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    /// Selector of the button
    pub locator: &'static str,
    /// Exact inner text
    pub text: &'static str,
    /// Computed `background-color`, normalized as `rgb(r, g, b)`
    pub color: &'static str,
}

/// Green "success" button
pub const CREATE_BUTTON: ButtonSpec = ButtonSpec {
    locator: LOCATORS.create_questions_button,
    text: "Create question",
    color: "rgb(92, 184, 92)",
};

/// Blue "primary" button
pub const SORT_BUTTON: ButtonSpec = ButtonSpec {
    locator: LOCATORS.sort_button,
    text: "Sort questions",
    color: "rgb(2, 117, 216)",
};

/// Red "danger" button
pub const REMOVE_BUTTON: ButtonSpec = ButtonSpec {
    locator: LOCATORS.remove_button,
    text: "Remove questions",
    color: "rgb(217, 83, 79)",
};

/// Question text prefixed with a marker letter, e.g. `B What is Playwright?`
#[must_use]
pub fn marked_question(letter: &str) -> String {
    format!("{letter} {}", CONSTANTS.new_question_text)
}

/// Numbered text, e.g. `What is Playwright? 3`
#[must_use]
pub fn numbered(base: &str, n: usize) -> String {
    format!("{base} {n}")
}
