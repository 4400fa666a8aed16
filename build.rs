use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=Cargo.toml");

    if let Some(hash) = git_output(&["rev-parse", "HEAD"]) {
        println!("cargo:rustc-env=SOLFRONT_GIT_HASH_FULL={hash}");
    }
    if let Some(hash) = git_output(&["rev-parse", "--short=12", "HEAD"]) {
        println!("cargo:rustc-env=SOLFRONT_GIT_HASH={hash}");
    }
    if let Some(status) = git_output(&["status", "--porcelain"]) {
        println!(
            "cargo:rustc-env=SOLFRONT_GIT_DIRTY={}",
            if status.is_empty() { "false" } else { "true" }
        );
    }

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".into());
    println!("cargo:rustc-env=SOLFRONT_BUILD_PROFILE={profile}");
    if let Ok(target) = std::env::var("TARGET") {
        println!("cargo:rustc-env=SOLFRONT_BUILD_TARGET={target}");
    }
    println!(
        "cargo:rustc-env=SOLFRONT_BUILD_UNIX={}",
        build_unix_timestamp()
    );
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}

fn build_unix_timestamp() -> u64 {
    // Honour SOURCE_DATE_EPOCH so packaged builds stay reproducible.
    if let Ok(value) = std::env::var("SOURCE_DATE_EPOCH") {
        if let Ok(parsed) = value.trim().parse::<u64>() {
            return parsed;
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
