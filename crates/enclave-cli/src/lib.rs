//! CLI logic for the Enclave scene renderer.
//!
//! This module reads a scene document, renders it, and writes the requested
//! outputs. Containment diagnostics do not fail a run; they are returned to
//! the caller, which decides how to report them.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use enclave::{
    EnclaveError, SceneRenderer, apply_auto_fixes,
    diagnostic::{Diagnostic, DiagnosticSummary},
    scene::Scene,
};

/// Run the Enclave CLI application
///
/// Renders the input scene to the output SVG file and, when requested,
/// writes the diagnostic report and the auto-fixed scene.
///
/// # Errors
///
/// Returns `EnclaveError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene or report JSON errors
pub fn run(args: &Args) -> Result<Vec<Diagnostic>, EnclaveError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let scene = Scene::from_json(&source)?;
    debug!(scene_id = scene.id; "Scene parsed");

    let renderer = SceneRenderer::new(app_config);
    let validated = renderer.validate(&scene);

    fs::write(&args.output, validated.paint(renderer.config()))?;
    info!(output_file = args.output; "SVG exported successfully");

    if args.report.is_some() || args.fix.is_some() {
        let report = validated.report(&scene);

        if let Some(path) = &args.report {
            fs::write(path, report.to_json()?)?;
            info!(report_file = path; "Report written");
        }

        if let Some(path) = &args.fix {
            let fixed = apply_auto_fixes(&scene, &report.suggestions);
            fs::write(path, fixed.to_json()?)?;
            info!(fixed_file = path, suggestions = report.suggestions.len(); "Fixed scene written");
        }
    }

    Ok(validated.into_result().diagnostics)
}

/// Whether a finished run should exit with a failure status.
pub fn should_fail(args: &Args, diagnostics: &[Diagnostic]) -> bool {
    args.deny_errors && DiagnosticSummary::from_diagnostics(diagnostics).has_errors()
}
