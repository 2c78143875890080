//! End-to-end tests driving the chownscan binary

use super::test_utils::{path_arg, running_as_root, stdout_lines, Fixture};
use std::fs;
use std::os::unix::fs::PermissionsExt;

#[test]
fn test_every_path_flagged_when_source_owns_tree() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&["--quiet", "scan", &root, "--source", &uid, "--target", "root"]);
    assert!(
        output.status.success(),
        "scan should succeed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let mut expected = Vec::new();
    for path in fixture.paths() {
        expected.push(path.clone());
        expected.push(format!("Resolve chown root {}", path));
    }
    assert_eq!(stdout_lines(&output), expected);
}

#[test]
fn test_no_hints_for_other_owner() {
    let fixture = Fixture::new();
    let other = (fixture.owner_uid() + 1).to_string();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&["--quiet", "scan", &root, "--source", &other]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), fixture.paths());
}

#[test]
fn test_target_defaults_to_source_name() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&["--quiet", "scan", &root, "--source", &uid, "--matches-only"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert!(lines
        .iter()
        .all(|l| l.starts_with(&format!("Resolve chown {} ", uid))));
}

#[test]
fn test_unknown_account_fails_before_traversal() {
    let fixture = Fixture::new();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&["scan", &root, "--source", "no-such-account-chownscan"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "nothing may be printed before resolution");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown account 'no-such-account-chownscan'"));
}

#[test]
fn test_unknown_target_fails_before_traversal() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&["scan", &root, "--source", &uid, "--target", "no-such-account-chownscan"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_source_is_reported() {
    let fixture = Fixture::new();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&["scan", &root]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No source account"));
}

#[test]
fn test_runs_are_idempotent() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();
    let root = path_arg(&fixture.root);
    let args = ["--quiet", "scan", root.as_str(), "--source", uid.as_str()];

    let first = fixture.run(&args);
    let second = fixture.run(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_json_format() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&[
        "--quiet",
        "scan",
        &root,
        "--source",
        &uid.to_string(),
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    let lines: Vec<serde_json::Value> = stdout_lines(&output)
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["kind"], "directory");
    for (line, path) in lines.iter().zip(fixture.paths()) {
        assert_eq!(line["path"], path.as_str());
        assert_eq!(line["uid"], uid);
        assert_eq!(line["resolve"], true);
    }
}

#[test]
fn test_missing_root_abort_and_skip() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();
    let missing = path_arg(&fixture.root.join("missing"));

    let aborted = fixture.run(&["--quiet", "scan", &missing, "--source", &uid]);
    assert_eq!(aborted.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&aborted.stderr);
    assert!(stderr.contains("Scan aborted"), "stderr: {}", stderr);
    assert!(stderr.contains("last path processed: <none>"));

    let skipped = fixture.run(&["--quiet", "scan", &missing, "--source", &uid, "--on-error", "skip"]);
    assert!(skipped.status.success());
    assert!(skipped.stdout.is_empty());
}

#[test]
fn test_unreadable_directory_policies() {
    if running_as_root() {
        // root reads through mode 000
        return;
    }
    let fixture = Fixture::new();
    let locked = fixture.root.join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("secret"), "x").unwrap();
    fs::write(fixture.root.join("z.txt"), "z").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let uid = (fixture.owner_uid() + 1).to_string();
    let root = path_arg(&fixture.root);

    let aborted = fixture.run(&["--quiet", "scan", &root, "--source", &uid]);
    let skipped = fixture.run(&["scan", &root, "--source", &uid, "--on-error", "skip"]);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(aborted.status.code(), Some(1));
    let aborted_lines = stdout_lines(&aborted);
    assert_eq!(aborted_lines.last().map(String::as_str), Some(path_arg(&locked).as_str()));
    let stderr = String::from_utf8_lossy(&aborted.stderr);
    assert!(stderr.contains(&format!("last path processed: {}", path_arg(&locked))));

    assert!(skipped.status.success());
    let skipped_lines = stdout_lines(&skipped);
    assert_eq!(
        skipped_lines.last().map(String::as_str),
        Some(path_arg(&fixture.root.join("z.txt")).as_str())
    );
    assert!(String::from_utf8_lossy(&skipped.stderr).contains("Skipping unreadable entry"));
}

#[test]
fn test_verbose_logs_stay_off_stdout() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&["--verbose", "scan", &root, "--source", &uid]);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).trim().is_empty());
    assert!(stdout_lines(&output)
        .iter()
        .all(|l| l.starts_with('/') || l.starts_with("Resolve chown ")));
}

#[test]
fn test_lookup_command() {
    let fixture = Fixture::new();
    let output = fixture.run(&["--quiet", "lookup", "root"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["root 0"]);
}

#[test]
fn test_local_config_file_supplies_scan_settings() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid();
    fs::write(
        fixture.dir.path().join("chownscan.toml"),
        format!(
            r#"
[scan]
source_account = "OldUser"
target_account = "root"
root = "{}"
matches_only = true

[[accounts]]
name = "OldUser"
uid = {}
"#,
            fixture.root.display(),
            uid
        ),
    )
    .unwrap();

    let output = fixture.run(&["--quiet", "scan"]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let expected: Vec<String> = fixture
        .paths()
        .iter()
        .map(|p| format!("Resolve chown root {}", p))
        .collect();
    assert_eq!(stdout_lines(&output), expected);
}

#[test]
fn test_environment_overrides_config() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();

    let output = fixture
        .command()
        .env("CHOWNSCAN_SCAN__ROOT", &fixture.root)
        .env("CHOWNSCAN_SCAN__SOURCE_ACCOUNT", &uid)
        .env("CHOWNSCAN_SCAN__SKIP_HIDDEN", "true")
        .args(["--quiet", "scan"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 6);
}

#[test]
fn test_no_matches_only_overrides_config() {
    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();
    fs::write(
        fixture.dir.path().join("chownscan.toml"),
        "[scan]\nmatches_only = true\n",
    )
    .unwrap();
    let root = path_arg(&fixture.root);
    let other = (fixture.owner_uid() + 1).to_string();

    let output = fixture.run(&["--quiet", "scan", &root, "--source", &other, "--no-matches-only"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), fixture.paths());

    let output = fixture.run(&["--quiet", "scan", &root, "--source", &uid]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 3);
    assert!(stdout_lines(&output).iter().all(|l| l.starts_with("Resolve chown ")));
}

#[test]
fn test_non_utf8_names_printed_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fixture = Fixture::new();
    let uid = fixture.owner_uid().to_string();
    let odd = fixture.root.join(OsStr::from_bytes(b"caf\xe9 menu.txt"));
    fs::write(&odd, "x").unwrap();
    let root = path_arg(&fixture.root);

    let output = fixture.run(&["--quiet", "scan", &root, "--source", &uid, "--target", "root", "--matches-only"]);
    assert!(output.status.success());

    let mut hint = b"Resolve chown root ".to_vec();
    hint.extend_from_slice(odd.as_os_str().as_bytes());
    hint.push(b'\n');
    assert!(
        output.stdout.windows(hint.len()).any(|w| w == hint.as_slice()),
        "stdout={:?}",
        String::from_utf8_lossy(&output.stdout)
    );
    assert!(!String::from_utf8_lossy(&output.stdout).contains('\u{FFFD}'));
}
