//! Error types for building XML trees.

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Result type alias for xmldoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort building a tree.
///
/// Lookups that find nothing are not errors: the query methods on
/// [`Element`](crate::Element) return `None` or an empty `Vec` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input was empty or contained only whitespace.
    #[error("Empty XML input: nothing to parse")]
    EmptyInput,

    /// The lexer rejected the input as not well-formed.
    ///
    /// `line` and `column` are 0-based and `position` is a character offset
    /// into the source, the same units used by [`Position`](crate::Position).
    #[error("Malformed XML: {message} (line {}, column {})", .line + 1, .column + 1)]
    MalformedXml {
        message: String,
        line: usize,
        column: usize,
        position: usize,
    },

    /// The event stream closed more tags than it opened, or ended while
    /// elements were still open.
    #[error("Unbalanced tag: {message}")]
    UnbalancedTag { message: String },
}

impl Error {
    pub(crate) fn unbalanced(message: impl Into<String>) -> Self {
        Error::UnbalancedTag {
            message: message.into(),
        }
    }

    /// Character offset into the source where the error was detected, if known.
    pub fn location(&self) -> Option<usize> {
        match self {
            Error::MalformedXml { position, .. } => Some(*position),
            Error::EmptyInput | Error::UnbalancedTag { .. } => None,
        }
    }

    /// Render a source-annotated report for this error.
    ///
    /// The output is uncoloured so it can be logged or compared in tests.
    /// Returns `None` when the error carries no location to point at.
    pub fn render_report(&self, source_name: &str, source: &str) -> Option<String> {
        let Error::MalformedXml { message, .. } = self else {
            return None;
        };
        let len = source.chars().count();
        let offset = self.location()?.min(len);
        let span = offset..(offset + 1).min(len);

        let name = source_name.to_string();
        let report = Report::build(ReportKind::Error, name.clone(), offset)
            .with_config(Config::default().with_color(false))
            .with_message("Malformed XML")
            .with_label(Label::new((name.clone(), span)).with_message(message.as_str()))
            .finish();

        let mut output = Vec::new();
        report
            .write((name, Source::from(source)), &mut output)
            .ok()?;
        String::from_utf8(output).ok()
    }
}
