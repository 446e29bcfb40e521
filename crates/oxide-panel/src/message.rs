//! Operation results and the banner rendered above a form.

use std::fmt;

use ironhtml::html;
use ironhtml_elements::Div;

use crate::widgets::html_escape;

/// Outcome of the operation that preceded the render, e.g. a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// The operation succeeded, optionally carrying its own message.
    Success { message: Option<String> },
    /// The operation failed with the given messages, in order.
    Failure { errors: Vec<String> },
}

impl OperationResult {
    /// Creates a success without a message of its own.
    pub fn success() -> Self {
        Self::Success { message: None }
    }

    /// Creates a success carrying a message.
    pub fn success_with(message: impl Into<String>) -> Self {
        Self::Success {
            message: Some(message.into()),
        }
    }

    /// Creates a failure from error messages.
    pub fn failure<S: Into<String>>(errors: impl IntoIterator<Item = S>) -> Self {
        Self::Failure {
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the error messages; empty on success.
    pub fn error_messages(&self) -> &[String] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { errors } => errors,
        }
    }

    /// Renders the banner for this result.
    ///
    /// `default_ok` is shown for a success whose message is missing or empty.
    pub fn banner(&self, default_ok: &str) -> String {
        match self {
            Self::Success { message } => {
                let message = message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(default_ok);
                render_banner(MessageType::Ok, &html_escape(message))
            }
            Self::Failure { errors } => {
                let body = errors
                    .iter()
                    .map(|e| html_escape(e))
                    .collect::<Vec<_>>()
                    .join("<br>");
                render_banner(MessageType::Error, &body)
            }
        }
    }
}

/// The two banner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Ok,
    Error,
}

impl MessageType {
    /// Returns the banner tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            Self::Ok => "adm-info-message-wrap adm-info-message-green",
            Self::Error => "adm-info-message-wrap adm-info-message-red",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a banner around already escaped `body` markup.
pub fn render_banner(kind: MessageType, body: &str) -> String {
    let class = kind.css_class();

    html! { div.class(#class) }
        .attr("data-type", kind.as_str())
        .child::<Div, _>(|d| {
            d.class("adm-info-message")
                .raw(body)
                .child::<Div, _>(|icon| icon.class("adm-info-message-icon"))
        })
        .render()
}

/// Renders the banner for an optional result; no result renders nothing.
pub fn render_result_message(result: Option<&OperationResult>, default_ok: &str) -> String {
    result.map(|r| r.banner(default_ok)).unwrap_or_default()
}
