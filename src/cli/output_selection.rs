//! Output artifact selection: per-artifact flags and combined-json requests.
//!
//! Both selections are enum-indexed bit-vectors. The enum carries the
//! cardinality, so adding an artifact kind is a one-place change.

use std::fmt;
use std::marker::PhantomData;

use super::options::OptionId;
use crate::cli::CliError;

/// An enum usable as the index space of a [`FlagSet`].
pub trait FlagKind: Copy + Eq + fmt::Debug + Sized + 'static {
    const ALL: &'static [Self];

    /// Dense index in `0..Self::ALL.len()`.
    fn index(self) -> usize;

    /// Human-readable name used in diagnostics and debug output.
    fn name(self) -> &'static str;
}

/// Fixed-cardinality set of flags indexed by an enum.
pub struct FlagSet<K: FlagKind> {
    bits: u32,
    _kind: PhantomData<K>,
}

impl<K: FlagKind> FlagSet<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bits: 0,
            _kind: PhantomData,
        }
    }

    pub fn insert(&mut self, kind: K) {
        self.bits |= 1 << kind.index();
    }

    #[must_use]
    pub fn contains(&self, kind: K) -> bool {
        self.bits & (1 << kind.index()) != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        K::ALL.iter().copied().filter(|kind| self.contains(*kind))
    }
}

impl<K: FlagKind> Default for FlagSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FlagKind> Clone for FlagSet<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: FlagKind> Copy for FlagSet<K> {}

impl<K: FlagKind> PartialEq for FlagSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<K: FlagKind> Eq for FlagSet<K> {}

impl<K: FlagKind> fmt::Debug for FlagSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(K::name)).finish()
    }
}

impl<K: FlagKind> FromIterator<K> for FlagSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// The artifact kinds selectable with individual output flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    AstCompactJson,
    Asm,
    AsmJson,
    Opcodes,
    Binary,
    BinaryRuntime,
    Abi,
    Ir,
    IrOptimized,
    Ewasm,
    SignatureHashes,
    Userdoc,
    Devdoc,
    Metadata,
    StorageLayout,
}

impl OutputKind {
    /// The command-line option that selects this artifact.
    #[must_use]
    pub fn option(self) -> OptionId {
        match self {
            Self::AstCompactJson => OptionId::AstCompactJson,
            Self::Asm => OptionId::Asm,
            Self::AsmJson => OptionId::AsmJson,
            Self::Opcodes => OptionId::Opcodes,
            Self::Binary => OptionId::Bin,
            Self::BinaryRuntime => OptionId::BinRuntime,
            Self::Abi => OptionId::Abi,
            Self::Ir => OptionId::Ir,
            Self::IrOptimized => OptionId::IrOptimized,
            Self::Ewasm => OptionId::Ewasm,
            Self::SignatureHashes => OptionId::SignatureHashes,
            Self::Userdoc => OptionId::Userdoc,
            Self::Devdoc => OptionId::Devdoc,
            Self::Metadata => OptionId::Metadata,
            Self::StorageLayout => OptionId::StorageLayout,
        }
    }
}

impl FlagKind for OutputKind {
    const ALL: &'static [Self] = &[
        Self::AstCompactJson,
        Self::Asm,
        Self::AsmJson,
        Self::Opcodes,
        Self::Binary,
        Self::BinaryRuntime,
        Self::Abi,
        Self::Ir,
        Self::IrOptimized,
        Self::Ewasm,
        Self::SignatureHashes,
        Self::Userdoc,
        Self::Devdoc,
        Self::Metadata,
        Self::StorageLayout,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::AstCompactJson => "ast-compact-json",
            Self::Asm => "asm",
            Self::AsmJson => "asm-json",
            Self::Opcodes => "opcodes",
            Self::Binary => "bin",
            Self::BinaryRuntime => "bin-runtime",
            Self::Abi => "abi",
            Self::Ir => "ir",
            Self::IrOptimized => "ir-optimized",
            Self::Ewasm => "ewasm",
            Self::SignatureHashes => "hashes",
            Self::Userdoc => "userdoc",
            Self::Devdoc => "devdoc",
            Self::Metadata => "metadata",
            Self::StorageLayout => "storage-layout",
        }
    }
}

/// The document sections selectable through `--combined-json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinedJsonKind {
    Abi,
    Asm,
    Ast,
    Binary,
    BinaryRuntime,
    Devdoc,
    FunctionDebug,
    FunctionDebugRuntime,
    GeneratedSources,
    GeneratedSourcesRuntime,
    SignatureHashes,
    Metadata,
    Opcodes,
    SrcMap,
    SrcMapRuntime,
    StorageLayout,
    Userdoc,
}

impl FlagKind for CombinedJsonKind {
    const ALL: &'static [Self] = &[
        Self::Abi,
        Self::Asm,
        Self::Ast,
        Self::Binary,
        Self::BinaryRuntime,
        Self::Devdoc,
        Self::FunctionDebug,
        Self::FunctionDebugRuntime,
        Self::GeneratedSources,
        Self::GeneratedSourcesRuntime,
        Self::SignatureHashes,
        Self::Metadata,
        Self::Opcodes,
        Self::SrcMap,
        Self::SrcMapRuntime,
        Self::StorageLayout,
        Self::Userdoc,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Abi => "abi",
            Self::Asm => "asm",
            Self::Ast => "ast",
            Self::Binary => "bin",
            Self::BinaryRuntime => "bin-runtime",
            Self::Devdoc => "devdoc",
            Self::FunctionDebug => "function-debug",
            Self::FunctionDebugRuntime => "function-debug-runtime",
            Self::GeneratedSources => "generated-sources",
            Self::GeneratedSourcesRuntime => "generated-sources-runtime",
            Self::SignatureHashes => "hashes",
            Self::Metadata => "metadata",
            Self::Opcodes => "opcodes",
            Self::SrcMap => "srcmap",
            Self::SrcMapRuntime => "srcmap-runtime",
            Self::StorageLayout => "storage-layout",
            Self::Userdoc => "userdoc",
        }
    }
}

/// Names accepted by `--combined-json` that set no bit of their own:
/// `compact-format` only affected the document layout historically and
/// `interface` was an alias for the ABI output.
const COMBINED_JSON_NO_BIT: &[&str] = &["compact-format", "interface"];

/// Decode the value of `--combined-json`.
///
/// The value is split on commas; every token must belong to the accepted
/// vocabulary. Unknown tokens fail the whole resolution, naming the token.
pub fn decode_combined_json(value: &str) -> Result<FlagSet<CombinedJsonKind>, CliError> {
    let mut requests = FlagSet::new();
    for token in value.split(',') {
        if COMBINED_JSON_NO_BIT.contains(&token) {
            continue;
        }
        match CombinedJsonKind::ALL.iter().find(|kind| kind.name() == token) {
            Some(kind) => requests.insert(*kind),
            None => {
                return Err(CliError::new(format!(
                    "Invalid option to --combined-json: {token}"
                )))
            }
        }
    }
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_set_insert_contains_and_iterates_in_declaration_order() {
        let mut selected: FlagSet<OutputKind> = FlagSet::new();
        assert!(selected.is_empty());
        selected.insert(OutputKind::Abi);
        selected.insert(OutputKind::Binary);
        assert!(selected.contains(OutputKind::Abi));
        assert!(!selected.contains(OutputKind::Asm));
        assert_eq!(selected.len(), 2);
        let names: Vec<_> = selected.iter().map(FlagKind::name).collect();
        assert_eq!(names, ["bin", "abi"]);
    }

    #[test]
    fn cardinality_matches_the_vocabulary() {
        assert_eq!(OutputKind::ALL.len(), 15);
        assert_eq!(CombinedJsonKind::ALL.len(), 17);
        for (index, kind) in OutputKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), index);
        }
        for (index, kind) in CombinedJsonKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), index);
        }
    }

    #[test]
    fn decode_sets_exactly_the_named_bits() {
        let requests = decode_combined_json("abi,bin").expect("valid request");
        assert_eq!(requests.len(), 2);
        assert!(requests.contains(CombinedJsonKind::Abi));
        assert!(requests.contains(CombinedJsonKind::Binary));
    }

    #[test]
    fn decode_accepts_the_no_bit_aliases() {
        let requests = decode_combined_json("compact-format,interface,abi").expect("valid");
        assert_eq!(requests.len(), 1);
        assert!(requests.contains(CombinedJsonKind::Abi));

        let none = decode_combined_json("compact-format").expect("valid");
        assert!(none.is_empty());
    }

    #[test]
    fn decode_rejects_unknown_tokens_naming_them() {
        let err = decode_combined_json("abi,bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"), "{err}");
        assert!(decode_combined_json("").is_err());
    }
}
