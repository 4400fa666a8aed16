//! Build-time metadata helpers used by `--version`.

/// Short git hash determined at compile time when available.
#[must_use]
pub fn commit_hash() -> &'static str {
    option_env!("SOLFRONT_GIT_HASH").unwrap_or("unknown")
}

/// Whether the repository had uncommitted changes at build time.
#[must_use]
pub fn git_dirty() -> &'static str {
    option_env!("SOLFRONT_GIT_DIRTY").unwrap_or("unknown")
}

/// Unix timestamp (seconds since epoch) recorded at build time.
#[must_use]
pub fn build_timestamp() -> &'static str {
    option_env!("SOLFRONT_BUILD_UNIX").unwrap_or("unknown")
}

/// Cargo build profile associated with the binary.
#[must_use]
pub fn build_profile() -> &'static str {
    option_env!("SOLFRONT_BUILD_PROFILE").unwrap_or("unknown")
}

/// Render the text printed for `--version`.
#[must_use]
pub fn formatted() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let commit = commit_hash();
    let dirty = git_dirty();
    let built = build_timestamp();
    let profile = build_profile();
    format!(
        "solfront, a Solidity-style compiler command-line front-end\n\
         Version: {version}\ncommit: {commit}\ndirty: {dirty}\nbuilt: {built}\nprofile: {profile}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_includes_required_fields() {
        let version = formatted();
        assert!(version.starts_with("solfront"));
        assert!(version.contains("Version:"));
        assert!(version.contains("commit:"));
        assert!(version.contains("dirty:"));
        assert!(version.contains("built:"));
        assert!(version.contains("profile:"));
    }
}
