//! Cross-process determinism for the solve pipeline.
//!
//! Spawns the `solve_fixture` binary under several environment variants and
//! asserts that all of them print identical output.

use std::path::Path;
use std::process::Command;

/// Resolve the path to the compiled `solve_fixture` binary.
///
/// NOTE: Windows would need an `.exe` suffix here. Windows is not a current target.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("solve_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let mut command = Command::new(&bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "solve_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

// ACCEPTANCE: solve output does not depend on process environment
#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    assert!(baseline.contains("easy_solved=true"));
    assert!(baseline.contains("easy_depth=0"));
    assert!(baseline.contains("hard_solved=true"));
    assert!(baseline.contains("hard_digest=sha256:"));
    assert!(baseline.contains("duplicate_solved=false"));
    assert!(baseline.contains("duplicate_depth=-1"));
    assert!(baseline.contains(r#"policy={"frontier":"lifo""#));

    let alt_cwd = std::env::temp_dir();
    let variant_cwd = run_variant(&alt_cwd.to_string_lossy(), &[]);
    assert_eq!(baseline, variant_cwd, "output differs when cwd changes");

    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    let variant_noise = run_variant(
        &root,
        &[
            ("ARBOR_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("RUST_LOG", "trace"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");
}

#[test]
fn repeated_runs_are_identical() {
    let root = workspace_root();
    let first = run_variant(&root, &[]);
    let second = run_variant(&root, &[]);
    assert_eq!(first, second);
}
