//! Machine-readable containment diagnostics.
//!
//! A [`Diagnostic`] describes one geometry violation found while enforcing a
//! scene. Violations are data, never Rust errors: a badly broken scene simply
//! yields many diagnostics.
//!
//! # Example
//!
//! ```
//! # use enclave_core::diagnostic::{Actual, Diagnostic, DiagnosticCode, SuggestedFix};
//! # use enclave_core::geometry::{Point, Rect};
//! let diag = Diagnostic::error(DiagnosticCode::OutOfBounds, "db", "node `db` overflows `vpc`")
//!     .with_boundary("vpc")
//!     .with_actual(Actual::Rect(Rect::new(150.0, 80.0, 100.0, 50.0)))
//!     .with_suggested_fix(SuggestedFix::move_to(Point::new(100.0, 50.0)));
//!
//! assert_eq!(diag.to_string(), "error[OUT_OF_BOUNDS]: node `db` overflows `vpc`");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// The kind of violation a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    /// A node's rectangle escapes its enclosing boundary.
    OutOfBounds,
    /// A node declares a negative width or height.
    NegSize,
    /// A port's attachment point escapes its host's boundary.
    PortOutside,
    /// A connector crosses the edge of a boundary that enforces nothing.
    ConnectorLeak,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfBounds => "OUT_OF_BOUNDS",
            Self::NegSize => "NEG_SIZE",
            Self::PortOutside => "PORT_OUTSIDE",
            Self::ConnectorLeak => "CONNECTOR_LEAK",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] marks a strict-mode violation or an escaping port
/// - [`Severity::Warning`] marks a loose-mode violation that was left in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The offending geometry recorded on a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Actual {
    Rect(Rect),
    Point(Point),
    Size(Size),
}

/// A correction the engine computed while detecting the violation.
///
/// `at` is expressed in the node's local coordinates (relative to its parent
/// origin), so it can be written straight back to the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl SuggestedFix {
    pub fn move_to(at: Point) -> Self {
        Self {
            at: Some(at),
            size: None,
        }
    }

    pub fn resize_to(size: Size) -> Self {
        Self {
            at: None,
            size: Some(size),
        }
    }
}

/// A single containment or geometry violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    code: DiagnosticCode,
    node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    boundary_id: Option<String>,
    severity: Severity,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actual: Option<Actual>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suggested_fix: Option<SuggestedFix>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(
        code: DiagnosticCode,
        node_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(code, Severity::Error, node_id, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(
        code: DiagnosticCode,
        node_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(code, Severity::Warning, node_id, message)
    }

    /// Create a diagnostic with an explicit severity.
    pub fn new(
        code: DiagnosticCode,
        severity: Severity,
        node_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            node_id: node_id.into(),
            boundary_id: None,
            severity,
            message: message.into(),
            actual: None,
            suggested_fix: None,
        }
    }

    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn boundary_id(&self) -> Option<&str> {
        self.boundary_id.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn actual(&self) -> Option<Actual> {
        self.actual
    }

    pub fn suggested_fix(&self) -> Option<SuggestedFix> {
        self.suggested_fix
    }

    /// Set the boundary the violation was measured against.
    pub fn with_boundary(mut self, boundary_id: impl Into<String>) -> Self {
        self.boundary_id = Some(boundary_id.into());
        self
    }

    /// Record the offending geometry.
    pub fn with_actual(mut self, actual: Actual) -> Self {
        self.actual = Some(actual);
        self
    }

    /// Attach the computed correction.
    pub fn with_suggested_fix(mut self, fix: SuggestedFix) -> Self {
        self.suggested_fix = Some(fix);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Error and warning counts over a list of diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl DiagnosticSummary {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        diagnostics
            .iter()
            .fold(Self::default(), |mut summary, diag| {
                match diag.severity() {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                }
                summary
            })
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
