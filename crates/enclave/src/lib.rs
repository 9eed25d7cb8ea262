//! Enclave - Boundary enforcement and visual containment for declarative
//! SVG scenes.
//!
//! A scene is a tree of typed nodes (boundaries, shapes, sprites, text, raw
//! markup) plus ports, connectors, and animated flows. Rendering is a
//! two-pass pipeline: the validate pass corrects out-of-bounds nodes
//! according to each boundary's policy and records diagnostics; the paint
//! pass derives clip and mask regions and emits SVG markup.

pub mod config;
pub mod containment;
pub mod enforce;
pub mod port;
pub mod render;
pub mod report;

mod error;
mod export;
mod index;

pub use enclave_core::{color, diagnostic, draw, geometry, scene};

pub use error::EnclaveError;

use chrono::{DateTime, Utc};
use log::{debug, info, trace};

use config::AppConfig;
use containment::Containment;
use enforce::EnforcementResult;
use render::{RenderOutput, Validated};
use report::{AutoFixSuggestion, DiagnosticReport};
use scene::Scene;

/// Entry point for validating, reporting on, and rendering scenes.
///
/// # Examples
///
/// ```rust
/// use enclave::{SceneRenderer, config::AppConfig, scene::Scene};
///
/// let scene = Scene::from_json(r#"{ "id": "empty" }"#)
///     .expect("Failed to parse scene");
///
/// let renderer = SceneRenderer::new(AppConfig::default());
/// let output = renderer.render_with_diagnostics(&scene);
///
/// assert!(output.diagnostics.is_empty());
/// assert!(output.markup.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct SceneRenderer {
    config: AppConfig,
}

impl SceneRenderer {
    /// Create a new renderer with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use enclave::{SceneRenderer, config::{AppConfig, RenderConfig, StyleConfig}};
    ///
    /// let config = AppConfig::new(
    ///     RenderConfig::default().with_corridor_width(24.0),
    ///     StyleConfig::default(),
    /// );
    /// let renderer = SceneRenderer::new(config);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the validate pass only.
    ///
    /// The input scene is never modified; corrections are applied to the
    /// copy in the returned [`EnforcementResult`].
    pub fn enforce(&self, scene: &Scene) -> EnforcementResult {
        debug!(scene_id = scene.id.as_str(); "Enforcing boundaries");
        let result = enforce::enforce(scene);
        trace!(diagnostics:? = result.diagnostics; "Enforcement diagnostics");
        result
    }

    /// Runs the validate pass, keeping its state for painting and reporting.
    pub fn validate(&self, scene: &Scene) -> Validated {
        debug!(scene_id = scene.id.as_str(); "Validating scene");
        Validated::new(scene)
    }

    /// Renders a scene to SVG markup, discarding diagnostics.
    ///
    /// Rendering never fails: violations are corrected or painted under a
    /// clip, and unresolved references are omitted.
    pub fn render(&self, scene: &Scene) -> String {
        self.render_with_diagnostics(scene).markup
    }

    /// Renders a scene to SVG markup together with the validate pass
    /// diagnostics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use enclave::{SceneRenderer, scene::Scene};
    ///
    /// let scene = Scene::from_json(r#"{
    ///     "id": "demo",
    ///     "nodes": [{
    ///         "kind": "boundary", "id": "vpc",
    ///         "at": { "x": 0, "y": 0 }, "size": { "width": 100, "height": 100 },
    ///         "policy": { "mode": "strict", "overflow": "clip" },
    ///         "children": [{
    ///             "kind": "shape", "id": "db",
    ///             "at": { "x": 90, "y": 10 }, "size": { "width": 20, "height": 20 }
    ///         }]
    ///     }]
    /// }"#).expect("Failed to parse scene");
    ///
    /// let output = SceneRenderer::default().render_with_diagnostics(&scene);
    ///
    /// assert_eq!(output.summary.errors, 1);
    /// assert!(output.markup.contains(r#"clip-path="url(#clip-vpc)""#));
    /// ```
    pub fn render_with_diagnostics(&self, scene: &Scene) -> RenderOutput {
        info!(scene_id = scene.id.as_str(); "Rendering scene");
        let validated = self.validate(scene);
        let markup = validated.paint(&self.config);
        let result = validated.into_result();

        info!(
            errors = result.summary.errors,
            warnings = result.summary.warnings;
            "Scene rendered"
        );
        RenderOutput {
            markup,
            diagnostics: result.diagnostics,
            summary: result.summary,
        }
    }

    /// Builds a diagnostic report stamped with the current time.
    pub fn report(&self, scene: &Scene) -> DiagnosticReport {
        self.report_at(scene, Utc::now())
    }

    /// Builds a diagnostic report with a fixed timestamp.
    pub fn report_at(&self, scene: &Scene, timestamp: DateTime<Utc>) -> DiagnosticReport {
        let result = self.enforce(scene);
        report::build_report(scene, &result, timestamp)
    }

    /// Derives the clip and mask regions of a validated scene.
    pub fn containment(&self, result: &EnforcementResult) -> Containment {
        containment::collect_containment(result, &self.config)
    }
}

/// Runs the validate pass on `scene`.
pub fn enforce(scene: &Scene) -> EnforcementResult {
    SceneRenderer::default().enforce(scene)
}

/// Renders `scene` with the default configuration.
pub fn render(scene: &Scene) -> String {
    SceneRenderer::default().render(scene)
}

/// Renders `scene` with the default configuration, keeping diagnostics.
pub fn render_with_diagnostics(scene: &Scene) -> RenderOutput {
    SceneRenderer::default().render_with_diagnostics(scene)
}

/// Validates `scene` and builds its report, stamped with the current time.
pub fn report(scene: &Scene) -> DiagnosticReport {
    report::report(scene)
}

/// Validates `scene` and builds its report with a fixed timestamp.
pub fn report_at(scene: &Scene, timestamp: DateTime<Utc>) -> DiagnosticReport {
    report::report_at(scene, timestamp)
}

/// Returns a copy of `scene` with every high-confidence suggestion applied.
pub fn apply_auto_fixes(scene: &Scene, suggestions: &[AutoFixSuggestion]) -> Scene {
    report::apply_auto_fixes(scene, suggestions)
}

/// Derives clip and mask regions with the default configuration.
pub fn collect_containment(result: &EnforcementResult) -> Containment {
    containment::collect_containment(result, &AppConfig::default())
}
