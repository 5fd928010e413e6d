use std::path::Path;
use std::process::{Command, Output, Stdio};

fn framestock(dir: &Path, database: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_framestock"))
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--database")
        .arg(database)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_empty_search_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("frames.db");

    assert!(framestock(dir.path(), &db, &["init-db"]).status.success());

    let search = framestock(dir.path(), &db, &["search", "brand=zzz"]);
    assert!(search.status.success());
    assert!(stdout(&search).contains("No frames found."));
}

#[test]
fn test_invalid_value_exits_nonzero_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("frames.db");

    let add = framestock(dir.path(), &db, &["add", "model=A", "price=abc"]);
    assert!(!add.status.success());
    assert!(String::from_utf8_lossy(&add.stderr).contains("price"));

    let search = framestock(dir.path(), &db, &["search", "--format", "json"]);
    assert!(search.status.success());
    assert_eq!(stdout(&search).trim(), "[]");
}

#[test]
fn test_add_then_get_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("frames.db");

    let add = framestock(dir.path(), &db, &["add", "model=RB1234", "brand=RayBan", "stock=5"]);
    assert!(add.status.success());

    let get = framestock(dir.path(), &db, &["get", "1"]);
    assert!(get.status.success());
    assert!(stdout(&get).contains("RB1234"));

    let missing = framestock(dir.path(), &db, &["get", "99"]);
    assert!(missing.status.success());
    assert!(stdout(&missing).contains("Not found"));
}

#[test]
fn test_storage_failure_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_file = dir.path().join("taken");
    std::fs::create_dir(&not_a_file).unwrap();

    let search = framestock(dir.path(), &not_a_file, &["search", "brand=ray"]);
    assert!(!search.status.success());
    assert!(String::from_utf8_lossy(&search.stderr).contains("opening database"));
}
