use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_large_operation_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operations.csv");
    common::generate_operations(&path, 200_000, 10).expect("Failed to generate operations");

    let mut cmd = Command::new(cargo_bin!("shopcart"));
    cmd.arg(&path);

    // 20_000 adds of 0.01 per customer, spread over 20 products
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("C0,20,200.00"))
        .stdout(predicate::str::contains("C9,20,200.00"));
}

#[test]
fn test_generated_file_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operations.csv");
    common::generate_operations(&path, 5, 2).expect("Failed to generate operations");

    let content = std::fs::read_to_string(&path).expect("Failed to read file");
    // Header + 5 rows
    assert_eq!(content.lines().count(), 6);
}
