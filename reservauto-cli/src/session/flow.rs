//! The login handshake as a sans-IO state machine.
//!
//! Each handshake page carries the next form to submit at index 0. The flow
//! consumes page bodies and produces ready-to-send submissions, so the
//! login contract is testable against fixture pages without a live site.
//!
//! Step 1 (region selection) and step 3 (region confirmation) submit their
//! form unchanged; step 2 fills in the `Username` and `Password` fields.

use std::fmt;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use super::error::AuthError;

/// Steps of the login handshake, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    SelectRegion,
    SubmitCredentials,
    ConfirmRegion,
}

impl LoginStep {
    fn next(self) -> Option<LoginStep> {
        match self {
            LoginStep::SelectRegion => Some(LoginStep::SubmitCredentials),
            LoginStep::SubmitCredentials => Some(LoginStep::ConfirmRegion),
            LoginStep::ConfirmRegion => None,
        }
    }
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoginStep::SelectRegion => "region selection",
            LoginStep::SubmitCredentials => "credentials submission",
            LoginStep::ConfirmRegion => "region confirmation",
        };
        f.write_str(name)
    }
}

/// State of the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for the page that carries the given step's form.
    Pending(LoginStep),
    /// All three forms have been produced.
    Authenticated,
}

/// HTTP method of a form. Anything other than an explicit `method="post"`
/// submits as GET, per the HTML default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

/// A ready-to-send form submission.
#[derive(Debug, Clone)]
pub struct FormSubmission {
    /// Absolute form action, resolved against the page URL.
    pub action: Url,
    pub method: FormMethod,
    pub fields: Vec<(String, String)>,
}

/// The three-step login handshake.
///
/// Feed it each fetched page via [`advance`](Self::advance); it hands back
/// the form submission for that page and moves to the next state. The
/// machine never retries or skips a step.
#[derive(Debug)]
pub struct LoginFlow {
    state: LoginState,
    username: String,
    password: String,
}

impl LoginFlow {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            state: LoginState::Pending(LoginStep::SelectRegion),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == LoginState::Authenticated
    }

    /// Consume the current page and produce the next form submission.
    ///
    /// `page_url` is the URL the page was fetched from; relative form
    /// actions resolve against it. Advances the state on success; a page
    /// without a form fails with the step that expected one.
    pub fn advance(&mut self, page_url: &Url, body: &str) -> Result<FormSubmission, AuthError> {
        let LoginState::Pending(step) = self.state else {
            return Err(AuthError::AlreadyAuthenticated);
        };

        let html = Html::parse_document(body);
        let form = first_form(&html).ok_or(AuthError::UnexpectedPageStructure {
            step,
            reason: "no form on page",
        })?;

        let mut submission = read_form(form, page_url, step)?;

        if step == LoginStep::SubmitCredentials {
            set_field(&mut submission.fields, "Username", &self.username);
            set_field(&mut submission.fields, "Password", &self.password);
        }

        self.state = match step.next() {
            Some(next) => LoginState::Pending(next),
            None => LoginState::Authenticated,
        };

        Ok(submission)
    }
}

fn first_form(html: &Html) -> Option<ElementRef<'_>> {
    let form_sel = Selector::parse("form").unwrap();
    html.select(&form_sel).next()
}

/// Read a form the way a browser about to submit it would: action resolved
/// against the page, text-like inputs and checked radios/checkboxes
/// collected, selects contributing their selected (or first) option, and
/// only the first submit control included.
fn read_form(
    form: ElementRef<'_>,
    page_url: &Url,
    step: LoginStep,
) -> Result<FormSubmission, AuthError> {
    let action_attr = form.attr("action").unwrap_or("").trim();
    let action = if action_attr.is_empty() {
        page_url.clone()
    } else {
        page_url
            .join(action_attr)
            .map_err(|_| AuthError::BadFormAction {
                step,
                action: action_attr.to_string(),
            })?
    };

    let method = match form.attr("method") {
        Some(m) if m.eq_ignore_ascii_case("post") => FormMethod::Post,
        _ => FormMethod::Get,
    };

    let input_sel = Selector::parse("input").unwrap();
    let select_sel = Selector::parse("select").unwrap();
    let option_sel = Selector::parse("option").unwrap();

    let mut fields = Vec::new();
    let mut submit_seen = false;

    for input in form.select(&input_sel) {
        let Some(name) = input.attr("name").filter(|n| !n.is_empty()) else {
            continue;
        };
        let kind = input.attr("type").unwrap_or("text").to_ascii_lowercase();
        match kind.as_str() {
            // Only the first submit control is sent, as a plain click would.
            "submit" => {
                if submit_seen {
                    continue;
                }
                submit_seen = true;
            }
            "button" | "image" | "reset" => continue,
            "radio" | "checkbox" if input.attr("checked").is_none() => continue,
            _ => {}
        }
        fields.push((
            name.to_string(),
            input.attr("value").unwrap_or_default().to_string(),
        ));
    }

    for select in form.select(&select_sel) {
        let Some(name) = select.attr("name").filter(|n| !n.is_empty()) else {
            continue;
        };
        let options: Vec<ElementRef> = select.select(&option_sel).collect();
        let picked = options
            .iter()
            .find(|o| o.attr("selected").is_some())
            .or_else(|| options.first());
        if let Some(option) = picked {
            let value = match option.attr("value") {
                Some(v) => v.to_string(),
                None => option.text().collect::<String>().trim().to_string(),
            };
            fields.push((name.to_string(), value));
        }
    }

    Ok(FormSubmission {
        action,
        method,
        fields,
    })
}

fn set_field(fields: &mut Vec<(String, String)>, name: &str, value: &str) {
    match fields.iter_mut().find(|(n, _)| n == name) {
        Some((_, v)) => *v = value.to_string(),
        None => fields.push((name.to_string(), value.to_string())),
    }
}
