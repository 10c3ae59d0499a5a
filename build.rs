use std::path::Path;
use std::process::Command;

/// Run a git command, returning trimmed stdout on success
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// `diff-index --quiet` exits 1 on local changes; any other failure counts as clean
fn is_dirty() -> bool {
    Command::new("git")
        .args(["diff-index", "--quiet", "HEAD"])
        .status()
        .ok()
        .and_then(|status| status.code())
        .is_some_and(|code| code == 1)
}

fn main() {
    if Path::new(".git/HEAD").exists() {
        println!("cargo:rerun-if-changed=.git/HEAD");
    } else {
        println!("cargo:rerun-if-changed=build.rs");
    }

    let version = env!("CARGO_PKG_VERSION");
    let profile = std::env::var("PROFILE").unwrap_or_default();

    // Release builds report the crate version; dev builds the commit they came from
    let version_str = if profile == "release" {
        version.to_string()
    } else {
        match git(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) if is_dirty() => format!("{}-{}-dirty", version, hash),
            Some(hash) => format!("{}-{}", version, hash),
            None => format!("{}-unknown", version),
        }
    };

    println!("cargo:rustc-env=VERSION_STRING={}", version_str);
}
