//! Import path remappings of the form `[context:]prefix=target`.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remapping {
    pub context: String,
    pub prefix: String,
    pub target: String,
}

impl Remapping {
    /// Parse a remapping token. The first `=` separates prefix and target,
    /// and a `:` before it splits off the optional context. The prefix must
    /// be non-empty; context and target may be empty.
    pub fn parse(token: &str) -> Option<Self> {
        let equals = token.find('=')?;
        let (head, target) = (&token[..equals], &token[equals + 1..]);
        let (context, prefix) = match head.find(':') {
            Some(colon) => (&head[..colon], &head[colon + 1..]),
            None => ("", head),
        };
        if prefix.is_empty() {
            return None;
        }
        Some(Self {
            context: context.to_string(),
            prefix: prefix.to_string(),
            target: target.to_string(),
        })
    }

    /// Directory implicitly allowed for reading because of this remapping.
    #[must_use]
    pub fn target_directory(&self) -> PathBuf {
        target_directory(&self.target)
    }
}

/// Strip the filename component of a remapping target. A trailing path
/// separator marks the target as a directory already, so only the separator
/// itself is removed.
#[must_use]
pub fn target_directory(target: &str) -> PathBuf {
    if target.ends_with('/') {
        return PathBuf::from(target.trim_end_matches('/'));
    }
    match Path::new(target).parent() {
        Some(parent) => parent.to_path_buf(),
        None => PathBuf::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefix_and_target() {
        let remapping = Remapping::parse("github.com/ethereum/dapp-bin/=dapp-bin/")
            .expect("valid remapping");
        assert_eq!(remapping.context, "");
        assert_eq!(remapping.prefix, "github.com/ethereum/dapp-bin/");
        assert_eq!(remapping.target, "dapp-bin/");
    }

    #[test]
    fn parses_context_before_the_prefix() {
        let remapping = Remapping::parse("ctx:a/b=/usr/lib/").expect("valid remapping");
        assert_eq!(remapping.context, "ctx");
        assert_eq!(remapping.prefix, "a/b");
        assert_eq!(remapping.target, "/usr/lib/");
    }

    #[test]
    fn empty_context_and_target_are_valid() {
        let remapping = Remapping::parse(":prefix=").expect("valid remapping");
        assert_eq!(remapping.context, "");
        assert_eq!(remapping.prefix, "prefix");
        assert_eq!(remapping.target, "");
    }

    #[test]
    fn rejects_missing_equals_and_empty_prefix() {
        assert_eq!(Remapping::parse("no-equals-here"), None);
        assert_eq!(Remapping::parse("=target"), None);
        assert_eq!(Remapping::parse("ctx:=target"), None);
    }

    #[test]
    fn target_directory_strips_filename_or_trailing_slash() {
        assert_eq!(target_directory("/usr/lib/"), PathBuf::from("/usr/lib"));
        assert_eq!(target_directory("/usr/lib/x.sol"), PathBuf::from("/usr/lib"));
        assert_eq!(target_directory("dapp-bin"), PathBuf::new());
        assert_eq!(target_directory(""), PathBuf::new());
    }
}
