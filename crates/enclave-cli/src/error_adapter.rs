//! Adapters for rendering library errors and scene diagnostics with miette.
//!
//! This module provides the bridge between the library's plain error and
//! diagnostic types and miette's rich report formatting used in the CLI.
//!
//! Containment diagnostics carry no source spans: a scene is a JSON
//! document and diagnostics point at node ids, not byte offsets. Each one is
//! rendered with its code, severity, message, and a help line derived from
//! its suggested fix.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity};

use enclave::{
    EnclaveError,
    diagnostic::{Diagnostic, DiagnosticCode, Severity},
};

/// Adapter for a single scene diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }

    /// Human-readable advice for the diagnostic, if there is any.
    fn help_text(&self) -> Option<String> {
        let diag = self.diag;
        if let Some(fix) = diag.suggested_fix() {
            return match (fix.at, fix.size) {
                (Some(at), Some(size)) => Some(format!(
                    "move `{}` to ({}, {}) and resize it to {} x {}",
                    diag.node_id(),
                    at.x(),
                    at.y(),
                    size.width(),
                    size.height()
                )),
                (Some(at), None) => Some(format!(
                    "move `{}` to ({}, {})",
                    diag.node_id(),
                    at.x(),
                    at.y()
                )),
                (None, Some(size)) => Some(format!(
                    "resize `{}` to {} x {}",
                    diag.node_id(),
                    size.width(),
                    size.height()
                )),
                (None, None) => None,
            };
        }

        match (diag.code(), diag.boundary_id()) {
            (DiagnosticCode::ConnectorLeak, Some(boundary_id)) => Some(format!(
                "add a containment policy to boundary `{boundary_id}`"
            )),
            _ => None,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diag.code().as_str()))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }
}

/// Adapter for [`EnclaveError`] values.
pub struct ErrorAdapter<'a>(pub &'a EnclaveError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            EnclaveError::Io(_) => "enclave::io",
            EnclaveError::Json(_) => "enclave::json",
            EnclaveError::Config(_) => "enclave::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            EnclaveError::Json(_) => Some(Box::new("the input must be a scene JSON document")),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable item that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A containment diagnostic produced by a successful run.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error that stopped the run.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`EnclaveError`] into a reportable error.
pub fn to_reportables(err: &EnclaveError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// Wrap each scene diagnostic for rendering, in order.
pub fn diagnostic_reportables(diagnostics: &[Diagnostic]) -> Vec<Reportable<'_>> {
    diagnostics
        .iter()
        .map(|diag| Reportable::Diagnostic(DiagnosticAdapter::new(diag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use enclave::{
        diagnostic::SuggestedFix,
        geometry::{Point, Size},
    };

    use super::*;

    fn help_of(reportable: &Reportable<'_>) -> Option<String> {
        reportable.help().map(|help| help.to_string())
    }

    #[test]
    fn test_diagnostic_code_severity_and_help() {
        let diags = vec![
            Diagnostic::error(DiagnosticCode::OutOfBounds, "db", "node `db` overflows `vpc`")
                .with_boundary("vpc")
                .with_suggested_fix(SuggestedFix::move_to(Point::new(100.0, 50.0))),
            Diagnostic::warning(DiagnosticCode::NegSize, "n", "negative size")
                .with_suggested_fix(SuggestedFix::resize_to(Size::new(10.0, 10.0))),
        ];

        let reportables = diagnostic_reportables(&diags);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "node `db` overflows `vpc`");
        assert_eq!(
            reportables[0].code().map(|code| code.to_string()),
            Some("OUT_OF_BOUNDS".to_string())
        );
        assert_eq!(reportables[0].severity(), Some(MietteSeverity::Error));
        assert_eq!(
            help_of(&reportables[0]),
            Some("move `db` to (100, 50)".to_string())
        );

        assert_eq!(reportables[1].severity(), Some(MietteSeverity::Warning));
        assert_eq!(
            help_of(&reportables[1]),
            Some("resize `n` to 10 x 10".to_string())
        );
    }

    #[test]
    fn test_connector_leak_suggests_policy() {
        let diags = vec![
            Diagnostic::warning(DiagnosticCode::ConnectorLeak, "c", "leak").with_boundary("left"),
        ];
        let reportables = diagnostic_reportables(&diags);

        assert_eq!(
            help_of(&reportables[0]),
            Some("add a containment policy to boundary `left`".to_string())
        );
    }

    #[test]
    fn test_error_codes() {
        let err = EnclaveError::Config("bad".to_string());
        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.code().unwrap().to_string(), "enclave::config");
                assert!(e.help().is_none());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }
}
