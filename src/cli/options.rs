//! The single source of truth for the option vocabulary.
//!
//! Every option the front-end understands has one [`OptionSpec`] entry here;
//! the tokenizer, the resolver, and the help renderer all read this table
//! instead of repeating name strings.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Logical identifier of a command-line option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionId {
    Help,
    Version,
    License,
    BasePath,
    AllowPaths,
    IgnoreMissing,
    ErrorRecovery,
    OutputDir,
    Overwrite,
    EvmVersion,
    ExperimentalViaIr,
    RevertStrings,
    StopAfter,
    StandardJson,
    Link,
    Assemble,
    Yul,
    StrictAssembly,
    ImportAst,
    Machine,
    YulDialect,
    Libraries,
    PrettyJson,
    Color,
    NoColor,
    ErrorCodes,
    AstCompactJson,
    Asm,
    AsmJson,
    Opcodes,
    Bin,
    BinRuntime,
    Abi,
    Ir,
    IrOptimized,
    Ewasm,
    SignatureHashes,
    Userdoc,
    Devdoc,
    Metadata,
    StorageLayout,
    Gas,
    CombinedJson,
    MetadataHash,
    MetadataLiteral,
    Optimize,
    OptimizeRuns,
    OptimizeYul,
    NoOptimizeYul,
    YulOptimizations,
    ModelCheckerContracts,
    ModelCheckerEngine,
    ModelCheckerTargets,
    ModelCheckerTimeout,
}

/// How many values an option consumes, and of what shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Presence only; repeatable.
    Flag,
    /// Exactly one string value; at most one occurrence.
    Value,
    /// One string value per occurrence; repeatable, values accumulate.
    ValueList,
    /// Exactly one unsigned integer value; at most one occurrence.
    Uint,
}

/// Help section an option is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionGroup {
    General,
    InputOutput,
    AlternativeModes,
    AssemblyMode,
    OutputFormatting,
    OutputComponents,
    Metadata,
    Optimizer,
    ModelChecker,
}

impl OptionGroup {
    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General Information",
            Self::InputOutput => "Input and Output",
            Self::AlternativeModes => "Alternative Input Modes",
            Self::AssemblyMode => "Assembly Mode",
            Self::OutputFormatting => "Output Formatting",
            Self::OutputComponents => "Output Components",
            Self::Metadata => "Metadata",
            Self::Optimizer => "Optimizer",
            Self::ModelChecker => "Model Checker",
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::General,
        Self::InputOutput,
        Self::AlternativeModes,
        Self::AssemblyMode,
        Self::OutputFormatting,
        Self::OutputComponents,
        Self::Metadata,
        Self::Optimizer,
        Self::ModelChecker,
    ];
}

#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub id: OptionId,
    /// Long name without the leading dashes.
    pub name: &'static str,
    /// Single-letter alias, if any.
    pub short: Option<char>,
    pub arity: Arity,
    /// Placeholder shown in help for value-taking options.
    pub value_name: Option<&'static str>,
    pub help: &'static str,
    pub group: OptionGroup,
}

impl OptionSpec {
    /// The name as it appears on the command line.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("--{}", self.name)
    }
}

macro_rules! spec {
    ($id:ident, $name:literal, $arity:ident, $group:ident, $help:literal) => {
        OptionSpec {
            id: OptionId::$id,
            name: $name,
            short: None,
            arity: Arity::$arity,
            value_name: None,
            help: $help,
            group: OptionGroup::$group,
        }
    };
    ($id:ident, $name:literal, $arity:ident, $group:ident, $value:literal, $help:literal) => {
        OptionSpec {
            id: OptionId::$id,
            name: $name,
            short: None,
            arity: Arity::$arity,
            value_name: Some($value),
            help: $help,
            group: OptionGroup::$group,
        }
    };
}

pub static REGISTRY: &[OptionSpec] = &[
    spec!(Help, "help", Flag, General, "Show help message and exit."),
    spec!(Version, "version", Flag, General, "Show version and exit."),
    spec!(License, "license", Flag, General, "Show licensing information and exit."),
    spec!(
        BasePath,
        "base-path",
        Value,
        InputOutput,
        "path",
        "Use the given path as the root of the source tree instead of the root of the filesystem."
    ),
    spec!(
        AllowPaths,
        "allow-paths",
        Value,
        InputOutput,
        "path(s)",
        "Allow a given path for imports. A list of paths can be supplied by separating them with a comma."
    ),
    spec!(
        IgnoreMissing,
        "ignore-missing",
        Flag,
        InputOutput,
        "Ignore missing files."
    ),
    spec!(
        ErrorRecovery,
        "error-recovery",
        Flag,
        InputOutput,
        "Enables additional parser error recovery."
    ),
    OptionSpec {
        id: OptionId::OutputDir,
        name: "output-dir",
        short: Some('o'),
        arity: Arity::Value,
        value_name: Some("path"),
        help: "If given, creates one file per component and contract/file at the specified directory.",
        group: OptionGroup::InputOutput,
    },
    spec!(
        Overwrite,
        "overwrite",
        Flag,
        InputOutput,
        "Overwrite existing files (used together with --output-dir)."
    ),
    spec!(
        EvmVersion,
        "evm-version",
        Value,
        InputOutput,
        "version",
        "Select desired EVM version."
    ),
    spec!(
        ExperimentalViaIr,
        "experimental-via-ir",
        Flag,
        InputOutput,
        "Turn on experimental compilation mode via the IR (EXPERIMENTAL)."
    ),
    spec!(
        RevertStrings,
        "revert-strings",
        Value,
        InputOutput,
        "default,strip,debug,verboseDebug",
        "Strip revert (and require) reason strings or add additional debugging information."
    ),
    spec!(
        StopAfter,
        "stop-after",
        Value,
        InputOutput,
        "stage",
        "Stop execution after the given compiler stage. Valid options: \"parsing\"."
    ),
    spec!(
        StandardJson,
        "standard-json",
        Flag,
        AlternativeModes,
        "Switch to Standard JSON input / output mode, ignoring all options. It reads from standard input, if no input file was given, otherwise it reads from the provided input file. The result will be written to standard output."
    ),
    spec!(
        Link,
        "link",
        Flag,
        AlternativeModes,
        "Switch to linker mode, ignoring all options apart from --libraries and modify binaries in place."
    ),
    spec!(
        Assemble,
        "assemble",
        Flag,
        AlternativeModes,
        "Switch to assembly mode and assume input is assembly."
    ),
    spec!(
        Yul,
        "yul",
        Flag,
        AlternativeModes,
        "Switch to Yul mode and assume input is Yul."
    ),
    spec!(
        StrictAssembly,
        "strict-assembly",
        Flag,
        AlternativeModes,
        "Switch to strict assembly mode and assume input is strict assembly."
    ),
    spec!(
        ImportAst,
        "import-ast",
        Flag,
        AlternativeModes,
        "Import ASTs to be compiled, assumes input holds the AST in compact JSON format."
    ),
    spec!(
        Machine,
        "machine",
        Value,
        AssemblyMode,
        "evm,ewasm",
        "Target machine in assembly mode."
    ),
    spec!(
        YulDialect,
        "yul-dialect",
        Value,
        AssemblyMode,
        "evm,ewasm",
        "Input dialect to use in assembly or yul mode."
    ),
    spec!(
        Libraries,
        "libraries",
        ValueList,
        InputOutput,
        "libs",
        "Direct string or file containing library addresses. Syntax: <libraryName>=<address> [, or whitespace] ... Address is interpreted as a hex string prefixed by 0x."
    ),
    spec!(
        PrettyJson,
        "pretty-json",
        Flag,
        OutputFormatting,
        "Output JSON in pretty format."
    ),
    spec!(
        Color,
        "color",
        Flag,
        OutputFormatting,
        "Force colored output."
    ),
    spec!(
        NoColor,
        "no-color",
        Flag,
        OutputFormatting,
        "Explicitly disable colored output, disabling terminal auto-detection."
    ),
    spec!(
        ErrorCodes,
        "error-codes",
        Flag,
        OutputFormatting,
        "Output error codes."
    ),
    spec!(
        AstCompactJson,
        "ast-compact-json",
        Flag,
        OutputComponents,
        "AST of all source files in a compact JSON format."
    ),
    spec!(Asm, "asm", Flag, OutputComponents, "EVM assembly of the contracts."),
    spec!(
        AsmJson,
        "asm-json",
        Flag,
        OutputComponents,
        "EVM assembly of the contracts in JSON format."
    ),
    spec!(Opcodes, "opcodes", Flag, OutputComponents, "Opcodes of the contracts."),
    spec!(Bin, "bin", Flag, OutputComponents, "Binary of the contracts in hex."),
    spec!(
        BinRuntime,
        "bin-runtime",
        Flag,
        OutputComponents,
        "Binary of the runtime part of the contracts in hex."
    ),
    spec!(Abi, "abi", Flag, OutputComponents, "ABI specification of the contracts."),
    spec!(
        Ir,
        "ir",
        Flag,
        OutputComponents,
        "Intermediate Representation (IR) of all contracts (EXPERIMENTAL)."
    ),
    spec!(
        IrOptimized,
        "ir-optimized",
        Flag,
        OutputComponents,
        "Optimized intermediate Representation (IR) of all contracts (EXPERIMENTAL)."
    ),
    spec!(
        Ewasm,
        "ewasm",
        Flag,
        OutputComponents,
        "Ewasm text representation of all contracts (EXPERIMENTAL)."
    ),
    spec!(
        SignatureHashes,
        "hashes",
        Flag,
        OutputComponents,
        "Function signature hashes of the contracts."
    ),
    spec!(
        Userdoc,
        "userdoc",
        Flag,
        OutputComponents,
        "Natspec user documentation of all contracts."
    ),
    spec!(
        Devdoc,
        "devdoc",
        Flag,
        OutputComponents,
        "Natspec developer documentation of all contracts."
    ),
    spec!(
        Metadata,
        "metadata",
        Flag,
        OutputComponents,
        "Combined Metadata JSON whose Swarm hash is stored on-chain."
    ),
    spec!(
        StorageLayout,
        "storage-layout",
        Flag,
        OutputComponents,
        "Slots, offsets and types of the contract's state variables."
    ),
    spec!(
        Gas,
        "gas",
        Flag,
        OutputComponents,
        "Print an estimate of the maximal gas usage for each function."
    ),
    spec!(
        CombinedJson,
        "combined-json",
        Value,
        OutputComponents,
        "types",
        "Output a single json document containing the specified information, comma-separated."
    ),
    spec!(
        MetadataHash,
        "metadata-hash",
        Value,
        Metadata,
        "ipfs,swarm,none",
        "Choose hash method for the bytecode metadata or disable it."
    ),
    spec!(
        MetadataLiteral,
        "metadata-literal",
        Flag,
        Metadata,
        "Store referenced sources as literal data in the metadata output."
    ),
    spec!(Optimize, "optimize", Flag, Optimizer, "Enable bytecode optimizer."),
    spec!(
        OptimizeRuns,
        "optimize-runs",
        Uint,
        Optimizer,
        "n",
        "Set for how many contract runs to optimize. Lower values will optimize more for initial deployment cost, higher values will optimize more for high-frequency usage."
    ),
    spec!(
        OptimizeYul,
        "optimize-yul",
        Flag,
        Optimizer,
        "Legacy option, ignored. Use the general --optimize to enable Yul optimizer."
    ),
    spec!(
        NoOptimizeYul,
        "no-optimize-yul",
        Flag,
        Optimizer,
        "Disable Yul optimizer in the compiler."
    ),
    spec!(
        YulOptimizations,
        "yul-optimizations",
        Value,
        Optimizer,
        "steps",
        "Forces Yul optimizer to use the specified sequence of optimization steps instead of the built-in one."
    ),
    spec!(
        ModelCheckerContracts,
        "model-checker-contracts",
        Value,
        ModelChecker,
        "default,<source>:<contract>",
        "Select which contracts should be analyzed using the form <source>:<contract>. Multiple pairs should be separated by a comma and all contracts can be selected using \"default\"."
    ),
    spec!(
        ModelCheckerEngine,
        "model-checker-engine",
        Value,
        ModelChecker,
        "all,bmc,chc,none",
        "Select model checker engine."
    ),
    spec!(
        ModelCheckerTargets,
        "model-checker-targets",
        Value,
        ModelChecker,
        "default,constantCondition,underflow,overflow,divByZero,balance,assert,popEmptyArray,outOfBounds",
        "Select model checker verification targets. Multiple targets should be separated by a comma and all targets can be selected using \"default\"."
    ),
    spec!(
        ModelCheckerTimeout,
        "model-checker-timeout",
        Uint,
        ModelChecker,
        "ms",
        "Set model checker timeout per query in milliseconds. The default is a deterministic resource limit. A timeout of 0 means no resource/time restrictions for any query."
    ),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static OptionSpec>> = Lazy::new(|| {
    REGISTRY.iter().map(|spec| (spec.name, spec)).collect()
});

static BY_SHORT: Lazy<HashMap<char, &'static OptionSpec>> = Lazy::new(|| {
    REGISTRY
        .iter()
        .filter_map(|spec| spec.short.map(|short| (short, spec)))
        .collect()
});

/// Look an option up by its long name (without the leading dashes).
#[must_use]
pub fn by_name(name: &str) -> Option<&'static OptionSpec> {
    BY_NAME.get(name).copied()
}

/// Look an option up by its single-letter alias.
#[must_use]
pub fn by_short(short: char) -> Option<&'static OptionSpec> {
    BY_SHORT.get(&short).copied()
}

/// Look an option up by its logical identifier.
#[must_use]
pub fn by_id(id: OptionId) -> &'static OptionSpec {
    REGISTRY
        .iter()
        .find(|spec| spec.id == id)
        .unwrap_or_else(|| unreachable!("every OptionId has a registry entry"))
}

/// Canonical `--name` rendering of an option.
#[must_use]
pub fn display_name(id: OptionId) -> String {
    by_id(id).display_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_names_and_ids_are_unique() {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for spec in REGISTRY {
            assert!(names.insert(spec.name), "duplicate name {}", spec.name);
            assert!(ids.insert(spec.id), "duplicate id {:?}", spec.id);
        }
    }

    #[test]
    fn lookups_agree_with_the_table() {
        let output_dir = by_name("output-dir").expect("registered");
        assert_eq!(output_dir.id, OptionId::OutputDir);
        assert_eq!(by_short('o').map(|spec| spec.id), Some(OptionId::OutputDir));
        assert_eq!(by_id(OptionId::Libraries).arity, Arity::ValueList);
        assert!(by_name("no-such-option").is_none());
        assert_eq!(display_name(OptionId::StrictAssembly), "--strict-assembly");
    }
}
