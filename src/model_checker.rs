//! Model-checker configuration and its string oracles.

use std::collections::{BTreeMap, BTreeSet};

/// Which contracts the model checker should analyze.
///
/// An empty map means "all contracts in all sources".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelCheckerContracts {
    pub contracts: BTreeMap<String, BTreeSet<String>>,
}

impl ModelCheckerContracts {
    /// Parse `default` or a comma-separated list of `<source>:<contract>`
    /// pairs. Both parts of a pair must be non-empty.
    pub fn parse(spec: &str) -> Option<Self> {
        if spec == "default" {
            return Some(Self::default());
        }
        let mut chosen: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for pair in spec.split(',') {
            let (source, contract) = pair.split_once(':')?;
            if source.is_empty() || contract.is_empty() || contract.contains(':') {
                return None;
            }
            chosen
                .entry(source.to_string())
                .or_default()
                .insert(contract.to_string());
        }
        Some(Self { contracts: chosen })
    }
}

/// Which solver engines run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCheckerEngine {
    pub bmc: bool,
    pub chc: bool,
}

impl ModelCheckerEngine {
    pub const ALL: Self = Self { bmc: true, chc: true };
    pub const BMC: Self = Self { bmc: true, chc: false };
    pub const CHC: Self = Self { bmc: false, chc: true };
    pub const NONE: Self = Self { bmc: false, chc: false };

    pub fn parse(spec: &str) -> Option<Self> {
        match spec {
            "all" => Some(Self::ALL),
            "bmc" => Some(Self::BMC),
            "chc" => Some(Self::CHC),
            "none" => Some(Self::NONE),
            _ => None,
        }
    }

    #[must_use]
    pub fn any(self) -> bool {
        self.bmc || self.chc
    }
}

impl Default for ModelCheckerEngine {
    fn default() -> Self {
        Self::NONE
    }
}

/// A single verification target class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModelCheckerTarget {
    ConstantCondition,
    Underflow,
    Overflow,
    DivByZero,
    Balance,
    Assert,
    PopEmptyArray,
    OutOfBounds,
}

impl ModelCheckerTarget {
    pub const ALL: &'static [Self] = &[
        Self::ConstantCondition,
        Self::Underflow,
        Self::Overflow,
        Self::DivByZero,
        Self::Balance,
        Self::Assert,
        Self::PopEmptyArray,
        Self::OutOfBounds,
    ];

    pub fn parse(spec: &str) -> Option<Self> {
        match spec {
            "constantCondition" => Some(Self::ConstantCondition),
            "underflow" => Some(Self::Underflow),
            "overflow" => Some(Self::Overflow),
            "divByZero" => Some(Self::DivByZero),
            "balance" => Some(Self::Balance),
            "assert" => Some(Self::Assert),
            "popEmptyArray" => Some(Self::PopEmptyArray),
            "outOfBounds" => Some(Self::OutOfBounds),
            _ => None,
        }
    }
}

/// The set of enabled verification targets. Defaults to all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCheckerTargets {
    pub targets: BTreeSet<ModelCheckerTarget>,
}

impl ModelCheckerTargets {
    /// Parse `default` or a comma-separated subset of the target names.
    pub fn parse(spec: &str) -> Option<Self> {
        if spec == "default" {
            return Some(Self::default());
        }
        let mut targets = BTreeSet::new();
        for name in spec.split(',') {
            targets.insert(ModelCheckerTarget::parse(name)?);
        }
        Some(Self { targets })
    }
}

impl Default for ModelCheckerTargets {
    fn default() -> Self {
        Self {
            targets: ModelCheckerTarget::ALL.iter().copied().collect(),
        }
    }
}

/// Aggregated model-checker settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelCheckerSettings {
    pub contracts: ModelCheckerContracts,
    pub engine: ModelCheckerEngine,
    pub targets: ModelCheckerTargets,
    /// Per-query timeout in milliseconds; `None` keeps the deterministic
    /// resource limit, `Some(0)` removes all restrictions.
    pub timeout: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contracts_default_selects_everything() {
        let contracts = ModelCheckerContracts::parse("default").expect("default");
        assert!(contracts.contracts.is_empty());
    }

    #[test]
    fn contracts_accepts_source_contract_pairs() {
        let contracts =
            ModelCheckerContracts::parse("a.sol:A,a.sol:B,b.sol:C").expect("valid pairs");
        assert_eq!(contracts.contracts.len(), 2);
        assert_eq!(contracts.contracts["a.sol"].len(), 2);
        assert!(contracts.contracts["b.sol"].contains("C"));
    }

    #[test]
    fn contracts_rejects_malformed_pairs() {
        assert_eq!(ModelCheckerContracts::parse("a.sol"), None);
        assert_eq!(ModelCheckerContracts::parse("a.sol:"), None);
        assert_eq!(ModelCheckerContracts::parse(":A"), None);
        assert_eq!(ModelCheckerContracts::parse("a.sol:A:B"), None);
        assert_eq!(ModelCheckerContracts::parse(""), None);
    }

    #[test]
    fn engine_parses_the_four_names() {
        assert_eq!(ModelCheckerEngine::parse("all"), Some(ModelCheckerEngine::ALL));
        assert_eq!(ModelCheckerEngine::parse("bmc"), Some(ModelCheckerEngine::BMC));
        assert_eq!(ModelCheckerEngine::parse("chc"), Some(ModelCheckerEngine::CHC));
        assert_eq!(ModelCheckerEngine::parse("none"), Some(ModelCheckerEngine::NONE));
        assert_eq!(ModelCheckerEngine::parse("smt"), None);
        assert!(!ModelCheckerEngine::default().any());
    }

    #[test]
    fn targets_default_is_all_and_subsets_parse() {
        assert_eq!(
            ModelCheckerTargets::default().targets.len(),
            ModelCheckerTarget::ALL.len()
        );
        let subset = ModelCheckerTargets::parse("underflow,overflow").expect("subset");
        assert_eq!(subset.targets.len(), 2);
        assert_eq!(ModelCheckerTargets::parse("underflow,unknown"), None);
    }
}
