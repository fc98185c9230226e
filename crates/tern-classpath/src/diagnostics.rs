//! Build messages
//!
//! Builders around the classpath closure report through a [`MessageSink`]
//! supplied by the host. A message is a severity, a text and an optional
//! source path; that shape is the whole contract with the host.

use std::collections::BTreeMap;
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

// =============================================================================
// SEVERITY
// =============================================================================

/// Severity of a build message as the host understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Message kinds reported by external packaging tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolMessageKind {
    Error,
    Warning,
    Information,
}

impl From<ToolMessageKind> for Severity {
    fn from(kind: ToolMessageKind) -> Self {
        match kind {
            ToolMessageKind::Error => Severity::Error,
            ToolMessageKind::Warning => Severity::Warning,
            ToolMessageKind::Information => Severity::Info,
        }
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

/// One message for the host's build log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMessage {
    /// Name of the builder that produced the message
    pub builder: String,
    pub severity: Severity,
    pub text: String,
    pub source_path: Option<Utf8PathBuf>,
}

impl BuildMessage {
    pub fn new(builder: impl Into<String>, severity: Severity, text: impl Into<String>) -> Self {
        Self {
            builder: builder.into(),
            severity,
            text: text.into(),
            source_path: None,
        }
    }

    pub fn error(builder: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(builder, Severity::Error, text)
    }

    pub fn with_source_path(mut self, path: Option<&Utf8Path>) -> Self {
        self.source_path = path.map(|p| p.to_owned());
        self
    }
}

impl fmt::Display for BuildMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.builder, self.severity)?;
        if let Some(path) = &self.source_path {
            write!(f, "{path}: ")?;
        }
        write!(f, "{}", self.text)
    }
}

/// Receives build messages on behalf of the host.
pub trait MessageSink {
    fn process_message(&mut self, message: BuildMessage);
}

impl MessageSink for Vec<BuildMessage> {
    fn process_message(&mut self, message: BuildMessage) {
        self.push(message);
    }
}

/// Forward tool output grouped by kind, all attributed to `source_path`.
pub fn add_messages(
    sink: &mut dyn MessageSink,
    messages: &BTreeMap<ToolMessageKind, Vec<String>>,
    source_path: Option<&Utf8Path>,
    builder: &str,
) {
    for (kind, texts) in messages {
        let severity = Severity::from(*kind);
        for text in texts {
            sink.process_message(
                BuildMessage::new(builder, severity, text.as_str()).with_source_path(source_path),
            );
        }
    }
}

/// Report a failure as an error message.
///
/// Errors with an empty display text are reported by their debug form.
pub fn report_error(
    sink: &mut dyn MessageSink,
    file_path: Option<&Utf8Path>,
    error: &(dyn std::error::Error + 'static),
    builder: &str,
) {
    let mut text = error.to_string();
    if text.is_empty() {
        text = format!("{error:?}");
    }
    tracing::debug!(builder, error = ?error, "reporting build error");

    sink.process_message(BuildMessage::error(builder, text).with_source_path(file_path));
}
