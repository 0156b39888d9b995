// Behavior tests for discovery and execution, using throwaway shell scripts in
// a temp directory as stand-in examples.
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use exsmoke::{find_examples, run_examples, run_examples_dir, RunError, RunOptions};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write script");
    let mut perms = fs::metadata(&path).expect("stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod script");
    path
}

#[test]
fn all_matching_examples_pass() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "alpha-smoke.sh", "exit 0");
    write_script(dir.path(), "beta-smoke.sh", "exit 0");
    // Non-matching failure must not affect the outcome.
    write_script(dir.path(), "unrelated.sh", "exit 1");

    let report = run_examples_dir(dir.path(), "*-smoke", 20).expect("suite should pass");
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.skipped, 0);
}

#[test]
fn failing_example_is_named_and_rest_still_run() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "bad-smoke.sh", "echo 'fit diverged' >&2\nexit 3");
    write_script(dir.path(), "good-smoke.sh", "exit 0");

    // Keep-going: the passing script runs even though an earlier one failed.
    let report = run_examples(dir.path(), "*-smoke", &RunOptions::default()).unwrap();
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 1);

    match report.into_result() {
        Err(RunError::ExamplesFailed { failed }) => {
            assert_eq!(failed, vec!["bad-smoke.sh".to_string()]);
        }
        other => panic!("expected ExamplesFailed, got {:?}", other),
    }
}

#[test]
fn error_message_names_the_failing_script() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "bad-smoke.sh", "exit 1");

    let err = run_examples_dir(dir.path(), "*-smoke", 5).unwrap_err();
    assert!(
        err.to_string().contains("bad-smoke.sh"),
        "error should name the script: {}",
        err
    );
}

#[test]
fn zero_matches_is_a_trivial_pass() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "unrelated.sh", "exit 1");

    let report = run_examples_dir(dir.path(), "*-nothing", 5).expect("zero matches passes");
    assert!(report.outcomes.is_empty());
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");

    let err = run_examples_dir(&missing, "*", 5).unwrap_err();
    assert!(matches!(err, RunError::MissingDirectory { .. }));
}

#[test]
fn bad_pattern_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = run_examples_dir(dir.path(), "[", 5).unwrap_err();
    assert!(matches!(err, RunError::BadPattern { .. }));
}

#[test]
fn nevents_is_forwarded_as_flag_and_env() {
    let dir = tempfile::tempdir().unwrap();
    // Script passes only when invoked as `<script> -n 20` with the matching env var.
    write_script(
        dir.path(),
        "check-args-smoke.sh",
        r#"[ "$1" = "-n" ] && [ "$2" = "20" ] && [ "$EXSMOKE_NEVENTS" = "20" ]"#,
    );

    run_examples_dir(dir.path(), "*-smoke", 20).expect("args should match");
    run_examples_dir(dir.path(), "*-smoke", 7).expect_err("wrong nevents should fail");
}

#[test]
fn broken_scripts_are_skipped_not_run() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "flaky-smoke.sh", "exit 1");
    write_script(dir.path(), "solid-smoke.sh", "exit 0");

    let opts = RunOptions {
        nevents: 5,
        broken: vec!["flaky-smoke.sh".to_string()],
        debug: false,
    };
    let report = run_examples(dir.path(), "*-smoke", &opts)
        .unwrap()
        .into_result()
        .expect("skipped script must not fail the suite");
    assert_eq!(report.passed, 1);
    assert_eq!(report.skipped, 1);
}

#[test]
fn fitting_suite_pattern_selects_by_stem() {
    // Pins the concrete suite the CI shim runs: the OrcaKinFit suffix selects
    // exactly the kinematic-fit scripts, in sorted order.
    let fitting = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/fitting");

    let found = find_examples(&fitting, "*-OrcaKinFit").unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["fit-1C-mass-OrcaKinFit.sh", "fit-4C-momentum-OrcaKinFit.sh"]
    );
}
