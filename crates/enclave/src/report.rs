//! Diagnostic reports and auto-fix suggestions.
//!
//! A [`DiagnosticReport`] is the stable, serializable summary of one
//! validation run, meant for external tooling. Each diagnostic may yield an
//! [`AutoFixSuggestion`]; [`apply_auto_fixes`] writes back only the
//! high-confidence ones.

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use enclave_core::{
    diagnostic::{Actual, Diagnostic, DiagnosticCode},
    geometry::{Point, Size},
    scene::{Node, Policy, Scene},
};

use crate::{
    enforce::{EnforcementResult, enforce},
    index::SceneIndex,
};

/// Smallest width or height a `NEG_SIZE` fix resizes to.
const MIN_FIXED_EXTENT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionType {
    MoveNode,
    ResizeNode,
    AddPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A proposed mutation addressing one diagnostic.
///
/// `at` is local to the target node's parent origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoFixSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    /// The node to change; for `ADD_POLICY`, the boundary.
    pub node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_id: Option<String>,
    pub confidence: Confidence,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub total_nodes: usize,
    pub boundaries_processed: usize,
}

/// The report document handed to external tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub scene_id: String,
    /// RFC 3339 timestamp, UTC.
    pub timestamp: String,
    pub summary: ReportSummary,
    pub diagnostics: Vec<Diagnostic>,
    pub suggestions: Vec<AutoFixSuggestion>,
}

impl DiagnosticReport {
    /// Serializes the report to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Derives the suggestion for one diagnostic, if any.
///
/// # Examples
///
/// ```
/// # use enclave::report::{suggest, Confidence, SuggestionType};
/// # use enclave_core::diagnostic::{Actual, Diagnostic, DiagnosticCode};
/// # use enclave_core::geometry::Size;
/// let diag = Diagnostic::error(DiagnosticCode::NegSize, "n", "negative")
///     .with_actual(Actual::Size(Size::new(-4.0, 30.0)));
///
/// let suggestion = suggest(&diag).unwrap();
/// assert_eq!(suggestion.kind, SuggestionType::ResizeNode);
/// assert_eq!(suggestion.size, Some(Size::new(10.0, 30.0)));
/// assert_eq!(suggestion.confidence, Confidence::High);
/// ```
pub fn suggest(diagnostic: &Diagnostic) -> Option<AutoFixSuggestion> {
    let suggestion = |kind, node_id: &str, confidence, reason: String| AutoFixSuggestion {
        kind,
        node_id: node_id.to_string(),
        boundary_id: diagnostic.boundary_id().map(str::to_string),
        confidence,
        reason,
        at: None,
        size: None,
        policy: None,
    };

    match diagnostic.code() {
        DiagnosticCode::OutOfBounds => {
            let at = diagnostic.suggested_fix()?.at?;
            Some(AutoFixSuggestion {
                at: Some(at),
                ..suggestion(
                    SuggestionType::MoveNode,
                    diagnostic.node_id(),
                    Confidence::High,
                    format!("move `{}` inside its boundary", diagnostic.node_id()),
                )
            })
        }
        DiagnosticCode::PortOutside => {
            let at = diagnostic.suggested_fix()?.at?;
            Some(AutoFixSuggestion {
                at: Some(at),
                ..suggestion(
                    SuggestionType::MoveNode,
                    diagnostic.node_id(),
                    Confidence::Medium,
                    format!(
                        "move host `{}` so its port stays inside the boundary",
                        diagnostic.node_id()
                    ),
                )
            })
        }
        DiagnosticCode::NegSize => {
            let Some(Actual::Size(size)) = diagnostic.actual() else {
                return None;
            };
            Some(AutoFixSuggestion {
                size: Some(Size::new(
                    size.width().max(MIN_FIXED_EXTENT),
                    size.height().max(MIN_FIXED_EXTENT),
                )),
                ..suggestion(
                    SuggestionType::ResizeNode,
                    diagnostic.node_id(),
                    Confidence::High,
                    format!("give `{}` a positive size", diagnostic.node_id()),
                )
            })
        }
        DiagnosticCode::ConnectorLeak => {
            let boundary_id = diagnostic.boundary_id()?;
            Some(AutoFixSuggestion {
                policy: Some(Policy::strict_clip()),
                ..suggestion(
                    SuggestionType::AddPolicy,
                    boundary_id,
                    Confidence::Medium,
                    format!(
                        "add a containment policy to `{boundary_id}` crossed by `{}`",
                        diagnostic.node_id()
                    ),
                )
            })
        }
    }
}

/// Validates `scene` and builds its report, stamped with the current time.
pub fn report(scene: &Scene) -> DiagnosticReport {
    report_at(scene, Utc::now())
}

/// Validates `scene` and builds its report with a fixed timestamp.
pub fn report_at(scene: &Scene, timestamp: DateTime<Utc>) -> DiagnosticReport {
    build_report(scene, &enforce(scene), timestamp)
}

/// Builds a report from an existing validate pass.
///
/// Node counts are taken from the input scene.
pub fn build_report(
    scene: &Scene,
    result: &EnforcementResult,
    timestamp: DateTime<Utc>,
) -> DiagnosticReport {
    let mut total_nodes = 0;
    let mut boundaries_processed = 0;
    scene.walk(&mut |node| {
        total_nodes += 1;
        if matches!(node, Node::Boundary(_)) {
            boundaries_processed += 1;
        }
    });

    let suggestions: Vec<_> = result.diagnostics.iter().filter_map(suggest).collect();
    info!(
        scene_id = scene.id.as_str(),
        diagnostics = result.diagnostics.len(),
        suggestions = suggestions.len();
        "Report built"
    );

    DiagnosticReport {
        scene_id: scene.id.clone(),
        timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        summary: ReportSummary {
            errors: result.summary.errors,
            warnings: result.summary.warnings,
            total_nodes,
            boundaries_processed,
        },
        diagnostics: result.diagnostics.clone(),
        suggestions,
    }
}

/// Returns a copy of `scene` with every high-confidence suggestion applied.
///
/// Medium and low confidence suggestions are left for a human to review.
/// Suggestions naming unknown nodes are skipped.
pub fn apply_auto_fixes(scene: &Scene, suggestions: &[AutoFixSuggestion]) -> Scene {
    let mut fixed = scene.clone();

    let targets: Vec<(Vec<usize>, &AutoFixSuggestion)> = {
        let index = SceneIndex::build(scene);
        suggestions
            .iter()
            .filter(|suggestion| suggestion.confidence == Confidence::High)
            .filter_map(|suggestion| match index.path(&suggestion.node_id) {
                Some(path) => Some((path.to_vec(), suggestion)),
                None => {
                    warn!(node_id = suggestion.node_id.as_str(); "Suggestion target not found, skipping");
                    None
                }
            })
            .collect()
    };

    for (path, suggestion) in targets {
        let Some(node) = fixed.node_at_path_mut(&path) else {
            continue;
        };
        if let Some(at) = suggestion.at {
            node.set_at(at);
        }
        if let Some(size) = suggestion.size {
            node.set_size(size);
        }
        if let (Some(policy), Some(boundary)) = (suggestion.policy, node.as_boundary_mut()) {
            boundary.policy = Some(policy);
        }
        debug!(node_id = suggestion.node_id.as_str(), kind:? = suggestion.kind; "Applied auto-fix");
    }

    fixed
}
