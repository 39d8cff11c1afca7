//! Interactive behaviors for the Next Level Prospects landing page, hosted on a
//! small deterministic page runtime.
//!
//! A [`Page`] parses the page markup into an in-memory DOM, wires every
//! behavior on [`Page::ready`], and is then driven by user actions
//! ([`Page::click`], [`Page::scroll_window_to`], [`Page::swipe`], ...) and a
//! virtual clock ([`Page::advance_time`]). The pure state machines behind the
//! behaviors live in [`behaviors`] and can be used without a page.

use std::error::Error as StdError;
use std::fmt;

pub mod behaviors;
mod config;
mod dom;
mod html;
mod page;
mod scheduler;
mod selector;
mod trace;

pub use config::{PageConfig, Viewport};
pub use dom::LayoutBox;
pub use page::{FormSubmission, Page};
pub use scheduler::PendingTimer;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    InvalidConfig(String),
    Runtime(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::InvalidConfig(msg) => write!(f, "invalid page config: {msg}"),
            Self::Runtime(msg) => write!(f, "page runtime error: {msg}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests;
