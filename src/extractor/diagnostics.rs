use crate::error::{DiagnosticClass, ExtractError};
use crate::graph::NodeId;
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The node was dropped from the result.
    Error,
    /// The node was kept.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One step from an extraction root towards a failing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub node: NodeId,
    pub input: String,
}

/// A localized, non-fatal extraction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub node: NodeId,
    /// Tag of the failing node as found in the graph, or empty if unreadable.
    pub block_type: String,
    /// The inputs descended through from the extraction root, outermost first.
    pub path: Vec<PathSegment>,
    pub severity: Severity,
    pub error: ExtractError,
}

impl Diagnostic {
    pub fn class(&self) -> DiagnosticClass {
        self.error.class()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}' {}", self.severity, self.block_type, self.node)?;
        if !self.path.is_empty() {
            let path = self
                .path
                .iter()
                .map(|s| format!("{}.{}", s.node, s.input))
                .join(" > ");
            write!(f, " (via {})", path)?;
        }
        write!(f, ": {}", self.error)
    }
}

/// The result of an extraction: the best-effort value plus everything that
/// went wrong on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Extraction<T> {
    /// `true` if nothing at all was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// `true` if any node was dropped.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extraction<U> {
        Extraction {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}
