use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary with arguments, isolated from the caller's environment.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pokedex"));
    cmd.args(args);
    cmd.env_remove("POKEDEX_STORE");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// `file://` URL for a store directory.
pub fn store_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
