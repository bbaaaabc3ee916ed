use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use assert2::assert;
use assert2::let_assert;
use fixture_types::Record;
use once_cell::sync::Lazy;
use tap::Tap;

static BIN: Lazy<&Path> =
    Lazy::new(|| Path::new(env!("CARGO_BIN_EXE_fixture-gen")));

fn command(dir: &Path, args: &[&str]) -> Command {
    Command::new(*BIN).tap_mut(|command| {
        command.current_dir(dir).env_remove("RUST_LOG").args(args);
    })
}

fn run(dir: &Path, args: &[&str]) -> Output {
    command(dir, args).output().expect("fixture-gen to run")
}

fn records(content: &str) -> Vec<Record> {
    let lines = content.lines().collect::<Vec<_>>();
    lines[2..lines.len() - 2]
        .iter()
        .map(|line| line.parse().unwrap())
        .collect()
}

#[test]
fn generate_then_check() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        dir.path(),
        &[
            "generate", "-o", "out.in", "-n", "5", "-i", "2", "-c", "1",
            "--seed", "3",
        ],
    );
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("out.in")).unwrap();
    let records = records(&content);
    assert!(records.len() <= 5);
    for (i, record) in records.iter().enumerate() {
        assert!(record.client_id().get() == 0);
        if record.is_cancel() {
            assert!(records[..i].iter().any(|earlier| {
                !earlier.is_cancel() && earlier.order_id() == record.order_id()
            }));
        }
    }

    let output = run(
        dir.path(),
        &["check", "out.in", "-c", "1", "-i", "2", "-n", "5", "--json"],
    );
    assert!(output.status.success());
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert!(summary["clients"] == 1);
    assert!(summary["records"] == records.len() as u64);
}

#[test]
fn logs_each_fixture_by_default() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["generate", "-o", "p.in", "-n", "5"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fixture written"));
    assert!(stderr.contains("p.in"));
}

#[test]
fn debug_level_logs_skipped_cancels() {
    let dir = tempfile::tempdir().unwrap();

    let output = command(
        dir.path(),
        &["generate", "-o", "d.in", "-n", "200", "-c", "40", "--seed", "5"],
    )
    .env("RUST_LOG", "debug")
    .output()
    .expect("fixture-gen to run");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping cancel without orders"));
}

#[test]
fn seeded_generation_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.in", "b.in"] {
        let output = run(
            dir.path(),
            &[
                "generate",
                "-o",
                name,
                "-n",
                "2000",
                "--seed",
                "99",
                "--exclude-cancelled",
            ],
        );
        assert!(output.status.success());
    }

    let a = fs::read(dir.path().join("a.in")).unwrap();
    let b = fs::read(dir.path().join("b.in")).unwrap();
    assert!(a == b);

    let output = run(dir.path(), &["check", "a.in", "--strict"]);
    assert!(output.status.success());
}

#[test]
fn plan_replaces_presets() {
    let dir = tempfile::tempdir().unwrap().tap(|dir| {
        fs::create_dir(dir.path().join("out")).unwrap();
        fs::write(
            dir.path().join("plan.json"),
            r#"{ "fixtures": [
                {
                    "path": "out/small.in",
                    "queries": 10,
                    "instruments": 1,
                    "clients": 1
                },
                {
                    "path": "out/wide.in",
                    "queries": 300,
                    "instruments": 30,
                    "clients": 12,
                    "seed": 1
                }
            ] }"#,
        )
        .unwrap();
    });

    let output =
        run(dir.path(), &["presets", "--plan", "plan.json", "-j", "2"]);
    assert!(output.status.success());

    for (name, clients) in [("small.in", 1), ("wide.in", 12)] {
        let output = run(
            dir.path(),
            &["check", &format!("out/{name}"), "-c", &clients.to_string()],
        );
        assert!(output.status.success());
    }
}

#[test]
fn bare_invocation_writes_default_presets() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("tests")).unwrap();

    let output = run(dir.path(), &[]);
    assert!(output.status.success());

    for (name, clients, instruments, queries) in [
        ("1.in", "5", "10", "100"),
        ("2.in", "10", "50", "500"),
        ("3.in", "20", "250", "30000"),
        ("4.in", "40", "500", "1000000"),
    ] {
        let path = format!("tests/{name}");
        let output = run(
            dir.path(),
            &["check", &path, "-c", clients, "-i", instruments, "-n", queries],
        );
        assert!(output.status.success());
    }
}

#[test]
fn missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output =
        run(dir.path(), &["presets", "--dir", "nowhere", "--seed", "1"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nowhere"));
    assert!(stderr.matches("generation failed").count() == 4);
}

#[test]
fn check_reports_the_offending_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.in"),
        "1\no\n0 B 0 0 1 1\n0 C 7\n.\nx\n",
    )
    .unwrap();

    let output = run(dir.path(), &["check", "bad.in"]);
    assert!(!output.status.success());

    let_assert!(Ok(stderr) = String::from_utf8(output.stderr));
    assert!(stderr.contains("line 4"));
    assert!(stderr.contains("never placed"));
}
