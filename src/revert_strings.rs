use std::fmt;

/// Policy for revert and require reason strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevertStrings {
    #[default]
    Default,
    Strip,
    Debug,
    VerboseDebug,
}

impl RevertStrings {
    pub fn parse(spec: &str) -> Option<Self> {
        match spec {
            "default" => Some(Self::Default),
            "strip" => Some(Self::Strip),
            "debug" => Some(Self::Debug),
            "verboseDebug" => Some(Self::VerboseDebug),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strip => "strip",
            Self::Debug => "debug",
            Self::VerboseDebug => "verboseDebug",
        }
    }
}

impl fmt::Display for RevertStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_the_documented_values() {
        assert_eq!(RevertStrings::parse("default"), Some(RevertStrings::Default));
        assert_eq!(RevertStrings::parse("strip"), Some(RevertStrings::Strip));
        assert_eq!(RevertStrings::parse("debug"), Some(RevertStrings::Debug));
        assert_eq!(
            RevertStrings::parse("verboseDebug"),
            Some(RevertStrings::VerboseDebug)
        );
        assert_eq!(RevertStrings::parse("verbosedebug"), None);
        assert_eq!(RevertStrings::parse(""), None);
    }
}
