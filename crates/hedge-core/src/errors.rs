//! Structured errors shared by all hedge crates.
//!
//! Every failure carries one [`ErrorInfo`]: a stable machine readable code,
//! a human readable message, and the identifiers involved. Callers branch on
//! the code, humans read the rendered line.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic payload carried by every [`HedgeError`] variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable code, e.g. `duplicate-id`.
    pub code: String,
    /// What went wrong, for humans.
    pub message: String,
    /// Identifiers and labels involved, keyed by role.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    /// Optional remediation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Builds a payload from a code and a message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorInfo {
            code: code.into(),
            message: message.into(),
            ..ErrorInfo::default()
        }
    }

    /// Records an involved identifier or label under `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// Rendered as one line: "[code] message; key=value; key=value (hint)".
impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for (key, value) in &self.context {
            write!(f, "; {key}={value}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

/// Canonical error type of the hedge engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum HedgeError {
    /// Structural failures of the raw hypergraph.
    #[error("hypergraph: {0}")]
    Graph(ErrorInfo),
    /// Failures in the concept and common-concept vocabulary layers.
    #[error("concept layer: {0}")]
    Concept(ErrorInfo),
    /// Failures while matching a query graph.
    #[error("matching: {0}")]
    Match(ErrorInfo),
    /// Failures while rewriting a host graph.
    #[error("rewriting: {0}")]
    Rewrite(ErrorInfo),
    /// Failures while encoding or decoding the textual format.
    #[error("serialization: {0}")]
    Serde(ErrorInfo),
}

impl HedgeError {
    /// The diagnostic payload, regardless of the failing layer.
    pub fn info(&self) -> &ErrorInfo {
        let (HedgeError::Graph(info)
        | HedgeError::Concept(info)
        | HedgeError::Match(info)
        | HedgeError::Rewrite(info)
        | HedgeError::Serde(info)) = self;
        info
    }

    /// Shorthand for the machine readable code.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
