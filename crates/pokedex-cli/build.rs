//! Stamps the binary with `git describe` output, falling back to the crate version.

use std::process::Command;

fn main() {
    for path in [".git/HEAD", ".git/refs/", ".git/index"] {
        println!("cargo:rerun-if-changed={}", path);
    }

    let version = describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=POKEDEX_VERSION={}", version);
}

fn describe() -> Option<String> {
    Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|text| text.trim().trim_start_matches('v').to_string())
        .filter(|version| !version.is_empty())
}
