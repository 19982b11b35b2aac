use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn helix(data: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("helix").unwrap();
    cmd.current_dir(data.path())
        .env("HELIX_DATA_DIR", data.path().join("store"))
        .env_remove("RUST_LOG");
    cmd
}

fn initialized() -> TempDir {
    let tmp = TempDir::new().unwrap();
    helix(&tmp).arg("init").assert().success();
    tmp
}

fn add_person(data: &TempDir, name: &str, date: &str, time: &str) {
    helix(data)
        .args(["person", "add", name, "--date", date, "--time", time])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Stored {name}")));
}

#[test]
fn test_version() {
    let tmp = TempDir::new().unwrap();
    helix(&tmp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("helix "));
}

#[test]
fn test_requires_init() {
    let tmp = TempDir::new().unwrap();
    helix(&tmp)
        .args(["person", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("helix init"));
}

#[test]
fn test_init_twice_is_harmless() {
    let tmp = initialized();
    assert!(tmp.path().join("store/config.toml").exists());
    helix(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_person_lifecycle() {
    let tmp = initialized();
    add_person(&tmp, "Ana", "1990-04-12", "08:30");

    helix(&tmp)
        .args(["person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana  1990-04-12 08:30"));

    helix(&tmp)
        .args(["person", "add", "ana", "--date", "1991-01-01"])
        .assert()
        .failure();

    helix(&tmp)
        .args(["person", "remove", "ANA"])
        .assert()
        .success();

    helix(&tmp)
        .args(["person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No people stored."));
}

#[test]
fn test_blueprint_from_date() {
    let tmp = TempDir::new().unwrap();
    helix(&tmp)
        .args(["blueprint", "--date", "1990-04-12", "--time", "08:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Type:"))
        .stdout(predicate::str::contains("Authority:"))
        .stdout(predicate::str::contains("Sun"));
}

#[test]
fn test_blueprint_rejects_bad_date() {
    let tmp = TempDir::new().unwrap();
    helix(&tmp)
        .args(["blueprint", "--date", "1990/04/12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid birth data"));
}

#[test]
fn test_blueprint_json() {
    let tmp = initialized();
    add_person(&tmp, "Ana", "1990-04-12", "08:30");
    let output = helix(&tmp)
        .args(["--format", "json", "blueprint", "Ana"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "Ana");
    assert!(value["blueprint"]["type"].is_string());
    assert!(value["blueprint"]["gates"].as_array().unwrap().len() <= 7);
}

#[test]
fn test_friction_and_triangulation() {
    let tmp = initialized();
    add_person(&tmp, "Ana", "1990-04-12", "08:30");
    add_person(&tmp, "Ben", "1988-11-02", "17:45");
    add_person(&tmp, "Cleo", "1993-07-21", "06:10");

    helix(&tmp)
        .args(["friction", "Ana", "Ben"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friction: Ana / Ben"))
        .stdout(predicate::str::contains("Score:"));

    helix(&tmp)
        .args(["triangulate", "Ana", "Ben", "Cleo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role:"))
        .stdout(predicate::str::contains("Impact:"));

    helix(&tmp)
        .args(["friction", "Ana", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nobody"));
}

#[test]
fn test_journal_and_echo() {
    let tmp = initialized();
    for text in ["I feel stuck and frustrated at work", "Stuck again, so frustrated"] {
        helix(&tmp)
            .args(["journal", "add", text])
            .assert()
            .success()
            .stdout(predicate::str::contains("saved"));
    }

    helix(&tmp)
        .args(["journal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stuck again"));

    helix(&tmp)
        .args(["echo", "--archetype", "generator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CHRONIC_PATTERN"))
        .stdout(predicate::str::contains("Frustration (own)"));

    helix(&tmp)
        .args(["echo", "--archetype", "projector"])
        .assert()
        .success()
        .stdout(predicate::str::contains("conditioning from Generator"));
}

#[test]
fn test_echo_needs_archetype() {
    let tmp = initialized();
    helix(&tmp)
        .arg("echo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No archetype"));
}

#[test]
fn test_journal_from_stdin_with_spectrum() {
    let tmp = initialized();
    helix(&tmp)
        .args(["journal", "add", "-", "--spectrum", "expansion"])
        .write_stdin("A wonderful day outside\n")
        .assert()
        .success();
    helix(&tmp)
        .args(["journal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[EXPANSION]"));
}

#[test]
fn test_signal_entropy() {
    let tmp = TempDir::new().unwrap();
    helix(&tmp)
        .args(["signal", "I am fine, whatever, forget it"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(ENTROPY)"))
        .stdout(predicate::str::contains("Entropy 64"))
        .stdout(predicate::str::contains("Density HIGH"));
}

#[test]
fn test_signal_blocked_in_crisis() {
    let tmp = TempDir::new().unwrap();
    helix(&tmp)
        .args([
            "signal",
            "hopeless, suicidal, I want to die, no way out, can't go on, worthless, panic, \
             empty, giving up, alone",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CRISIS_MODE"))
        .stdout(predicate::str::contains("Entropy").not());
}

#[test]
fn test_seda_safe_text() {
    let tmp = TempDir::new().unwrap();
    helix(&tmp)
        .args(["seda", "The sky is blue today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SAFE / LOGIC_MODE (score 50)"));
}

#[test]
fn test_seda_json_from_stdin() {
    let tmp = TempDir::new().unwrap();
    let output = helix(&tmp)
        .args(["--format", "json", "seda", "-"])
        .write_stdin("I am the chosen one with a cosmic destiny")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["inflation"], 3);
    assert_eq!(value["score"], 65);
    assert_eq!(value["mode"], "HOLDING_SPACE");
}

#[test]
fn test_person_rejects_extreme_offset() {
    let tmp = initialized();
    helix(&tmp)
        .args([
            "person",
            "add",
            "Ana",
            "--date",
            "1990-04-12",
            "--utc-offset",
            "-2147483648",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid birth data"));
    helix(&tmp)
        .args(["person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No people stored."));
}

#[test]
fn test_echo_with_unbounded_window() {
    let tmp = initialized();
    for text in ["Stuck and frustrated", "Frustrated, stuck again"] {
        helix(&tmp).args(["journal", "add", text]).assert().success();
    }
    helix(&tmp)
        .args(["echo", "--archetype", "generator", "--days", "4294967295"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frustration (own)"));
}
