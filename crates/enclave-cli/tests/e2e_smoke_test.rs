use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use enclave::{diagnostic::DiagnosticCode, scene::Scene};
use enclave_cli::{Args, run, should_fail};

fn demos_dir() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json scenes from a directory
fn collect_scene_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
                })
                .collect()
        })
        .unwrap_or_default();

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        report: None,
        fix: None,
        config: None,
        deny_errors: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_demos_render() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_scene_files(&demos_dir());

    assert!(!demos.is_empty(), "No demo scenes found in demos/");

    let mut failed = Vec::new();

    for demo in &demos {
        let output_path = temp_dir
            .path()
            .join(format!("{}.svg", demo.file_stem().unwrap().to_string_lossy()));

        match run(&args(demo, &output_path)) {
            Ok(_) => {
                let svg = fs::read_to_string(&output_path).expect("SVG was written");
                assert!(svg.contains("<svg"), "{} is not SVG", demo.display());
                assert!(svg.contains("</svg>"), "{} is truncated", demo.display());
            }
            Err(e) => failed.push((demo.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_violations_write_report_and_fix() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("violations.json");
    let report_path = temp_dir.path().join("report.json");
    let fix_path = temp_dir.path().join("fixed.json");

    let mut args = args(&input, &temp_dir.path().join("violations.svg"));
    args.report = Some(report_path.to_string_lossy().to_string());
    args.fix = Some(fix_path.to_string_lossy().to_string());

    let diagnostics = run(&args).expect("violations demo renders");

    let codes: Vec<_> = diagnostics.iter().map(|diag| diag.code()).collect();
    for code in [
        DiagnosticCode::OutOfBounds,
        DiagnosticCode::NegSize,
        DiagnosticCode::PortOutside,
        DiagnosticCode::ConnectorLeak,
    ] {
        assert!(codes.contains(&code), "missing {code:?}");
    }

    let report = fs::read_to_string(&report_path).expect("report was written");
    assert!(report.contains("\"sceneId\": \"violations\""));
    assert!(report.contains("MOVE_NODE"));
    assert!(report.contains("ADD_POLICY"));

    let fixed = Scene::from_json(&fs::read_to_string(&fix_path).expect("fix was written"))
        .expect("fixed scene is a valid document");
    assert_eq!(fixed.id, "violations");

    let fixed_diagnostics = enclave::enforce(&fixed).diagnostics;
    assert!(fixed_diagnostics.len() < diagnostics.len());
}

#[test]
fn e2e_deny_errors_fails_only_with_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut violations = args(
        &demos_dir().join("violations.json"),
        &temp_dir.path().join("violations.svg"),
    );
    let diagnostics = run(&violations).unwrap();
    assert!(!should_fail(&violations, &diagnostics));
    violations.deny_errors = true;
    assert!(should_fail(&violations, &diagnostics));

    let mut network = args(
        &demos_dir().join("network.json"),
        &temp_dir.path().join("network.svg"),
    );
    network.deny_errors = true;
    let diagnostics = run(&network).unwrap();
    assert!(!should_fail(&network, &diagnostics), "{diagnostics:?}");
}

#[test]
fn e2e_bad_inputs_are_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.svg");

    let missing = args(&temp_dir.path().join("missing.json"), &output);
    assert!(run(&missing).is_err());

    let not_a_scene = temp_dir.path().join("bad.json");
    fs::write(&not_a_scene, "{ \"nodes\": 42 }").unwrap();
    assert!(run(&args(&not_a_scene, &output)).is_err());

    let mut bad_config = args(&demos_dir().join("grid.json"), &output);
    bad_config.config = Some(temp_dir.path().join("nope.toml").to_string_lossy().to_string());
    assert!(run(&bad_config).is_err());
    assert!(!output.exists());
}
