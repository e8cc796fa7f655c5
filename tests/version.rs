//! Integration test: Verify binary prints correct version and help

use std::process::Command;

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_sertui"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected output to contain version, but got: {}",
        stdout
    );
}

#[test]
fn binary_help_lists_port_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_sertui"))
        .arg("--help")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    for flag in ["--baud", "--line-ending", "--list-ports", "--loopback"] {
        assert!(stdout.contains(flag), "help should mention {flag}: {stdout}");
    }
}
