use std::fmt;

/// Target EVM ruleset selected with `--evm-version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum EvmVersion {
    Homestead,
    TangerineWhistle,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    #[default]
    Istanbul,
    Berlin,
}

impl EvmVersion {
    /// Total name-to-version oracle. Names are case-sensitive.
    pub fn parse(spec: &str) -> Option<Self> {
        match spec {
            "homestead" => Some(Self::Homestead),
            "tangerineWhistle" => Some(Self::TangerineWhistle),
            "spuriousDragon" => Some(Self::SpuriousDragon),
            "byzantium" => Some(Self::Byzantium),
            "constantinople" => Some(Self::Constantinople),
            "petersburg" => Some(Self::Petersburg),
            "istanbul" => Some(Self::Istanbul),
            "berlin" => Some(Self::Berlin),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Homestead => "homestead",
            Self::TangerineWhistle => "tangerineWhistle",
            Self::SpuriousDragon => "spuriousDragon",
            Self::Byzantium => "byzantium",
            Self::Constantinople => "constantinople",
            Self::Petersburg => "petersburg",
            Self::Istanbul => "istanbul",
            Self::Berlin => "berlin",
        }
    }
}

impl fmt::Display for EvmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_inverse_of_name() {
        for version in [
            EvmVersion::Homestead,
            EvmVersion::TangerineWhistle,
            EvmVersion::SpuriousDragon,
            EvmVersion::Byzantium,
            EvmVersion::Constantinople,
            EvmVersion::Petersburg,
            EvmVersion::Istanbul,
            EvmVersion::Berlin,
        ] {
            assert_eq!(EvmVersion::parse(version.name()), Some(version));
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(EvmVersion::parse("Istanbul"), None);
        assert_eq!(EvmVersion::parse("tangerinewhistle"), None);
        assert_eq!(EvmVersion::parse(""), None);
    }

    #[test]
    fn default_is_istanbul() {
        assert_eq!(EvmVersion::default(), EvmVersion::Istanbul);
    }
}
