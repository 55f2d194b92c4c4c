//! Message formatting and per-page outcomes.

use std::fmt;

use daybell_core::config::TITLE_PLACEHOLDER;

/// Render the announcement for a page title.
pub fn render_message(template: &str, title: &str) -> String {
    template.replace(TITLE_PLACEHOLDER, title)
}

/// What happened to a single page during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The checkbox was already set; nothing was sent.
    AlreadyNotified { page_id: String, title: String },
    /// Dry run: the message that would have been sent.
    WouldNotify { page_id: String, title: String, message: String },
    /// Message sent and page marked.
    Notified { page_id: String, title: String },
    /// Webhook failed; the page was left untouched.
    NotifyFailed { page_id: String, title: String, error: String },
    /// Message went out but the checkbox update failed; the page will be re-sent next run.
    MarkFailed { page_id: String, title: String, error: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::NotifyFailed { .. } | Outcome::MarkFailed { .. })
    }
}

/// One console line per page.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AlreadyNotified { page_id, title } => {
                write!(f, "Already notified: {title} (page {page_id})")
            }
            Outcome::WouldNotify { title, message, .. } => {
                write!(f, "Would notify for: {title} -> {message}")
            }
            Outcome::Notified { title, .. } => write!(f, "Notified Discord for: {title}"),
            Outcome::NotifyFailed { title, error, .. } => {
                write!(f, "Error notifying for {title}: {error}")
            }
            Outcome::MarkFailed { title, error, .. } => {
                write!(f, "Error marking notified for {title}: {error}")
            }
        }
    }
}
