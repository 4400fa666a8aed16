//! CLI front-end: option registry, tokenizer, and the resolver that turns
//! raw arguments into a validated [`CommandLineOptions`].

mod help;
mod libraries;
pub mod options;
pub mod output_selection;
mod resolver;
mod tokenizer;

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use crate::address::Address;
use crate::evm_version::EvmVersion;
use crate::model_checker::ModelCheckerSettings;
use crate::optimiser::OptimiserSettings;
use crate::remapping::Remapping;
use crate::revert_strings::RevertStrings;

pub use libraries::LibrarySource;
pub use output_selection::{CombinedJsonKind, FlagKind, FlagSet, OutputKind};
pub use tokenizer::RawArgumentMap;

/// How the input is interpreted. Exactly one mode is active per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Compiler,
    CompilerWithAstImport,
    StandardJson,
    Assembler,
    Linker,
}

/// Machine the produced code targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMachine {
    #[default]
    Evm,
    Ewasm,
}

/// Language of the input in assembler mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblyLanguage {
    #[default]
    Assembly,
    StrictAssembly,
    Yul,
    Ewasm,
}

/// Pipeline stage after which execution stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerStage {
    Parsed,
}

/// Hash method for the bytecode metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataHash {
    #[default]
    Ipfs,
    Swarm,
    None,
}

/// The fully resolved configuration for one invocation.
///
/// Built once by the resolver, monotonically (fields are set, never unset),
/// and immutable once resolution returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLineOptions {
    pub source_paths: BTreeSet<PathBuf>,
    pub add_stdin: bool,
    pub remappings: Vec<Remapping>,
    pub base_path: Option<PathBuf>,
    pub allowed_directories: BTreeSet<PathBuf>,
    pub ignore_missing_files: bool,
    pub error_recovery: bool,
    pub output_dir: Option<PathBuf>,
    pub overwrite: bool,
    pub evm_version: EvmVersion,
    pub experimental_via_ir: bool,
    pub revert_strings: RevertStrings,
    pub stop_after: Option<CompilerStage>,
    pub input_mode: InputMode,
    pub target_machine: TargetMachine,
    pub input_language: AssemblyLanguage,
    pub libraries: BTreeMap<String, Address>,
    pub pretty_json: bool,
    /// `None` means terminal auto-detection.
    pub colored_output: Option<bool>,
    pub with_error_ids: bool,
    pub selected_outputs: FlagSet<OutputKind>,
    pub estimate_gas: bool,
    /// `None` means `--combined-json` was never supplied, which is distinct
    /// from "supplied with nothing selected".
    pub combined_json: Option<FlagSet<CombinedJsonKind>>,
    pub metadata_hash: MetadataHash,
    pub metadata_literal: bool,
    pub optimize: bool,
    pub optimiser: OptimiserSettings,
    pub model_checker_initialize: bool,
    pub model_checker: ModelCheckerSettings,
}

impl Default for CommandLineOptions {
    fn default() -> Self {
        Self {
            source_paths: BTreeSet::new(),
            add_stdin: false,
            remappings: Vec::new(),
            base_path: None,
            allowed_directories: BTreeSet::new(),
            ignore_missing_files: false,
            error_recovery: false,
            output_dir: None,
            overwrite: false,
            evm_version: EvmVersion::default(),
            experimental_via_ir: false,
            revert_strings: RevertStrings::default(),
            stop_after: None,
            input_mode: InputMode::default(),
            target_machine: TargetMachine::default(),
            input_language: AssemblyLanguage::default(),
            libraries: BTreeMap::new(),
            pretty_json: false,
            colored_output: None,
            with_error_ids: false,
            selected_outputs: FlagSet::new(),
            estimate_gas: false,
            combined_json: None,
            metadata_hash: MetadataHash::default(),
            metadata_literal: false,
            optimize: false,
            optimiser: OptimiserSettings::default(),
            model_checker_initialize: false,
            model_checker: ModelCheckerSettings::default(),
        }
    }
}

/// Parsed CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    License,
    Options(Box<CommandLineOptions>),
}

/// Error emitted while parsing or resolving command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    message: String,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// An error followed by an explanatory line.
    pub fn with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        let mut owned = message.into();
        owned.push('\n');
        owned.push_str(&hint.into());
        Self::new(owned)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for CliError {}

/// Parse arguments from the environment.
///
/// # Errors
/// Returns a [`CliError`] when the arguments do not describe a valid
/// invocation.
pub fn parse() -> Result<Invocation, CliError> {
    parse_from(env::args().skip(1))
}

/// Parse arguments from an iterator (useful for testing).
///
/// # Errors
/// Returns a [`CliError`] when the provided iterator does not describe a
/// valid invocation.
pub fn parse_from<I, T>(args: I) -> Result<Invocation, CliError>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    let arguments = tokenizer::tokenize(args)?;
    resolver::resolve(&arguments)
}

/// Return formatted general help text.
#[must_use]
pub fn usage() -> String {
    help::render_general_help()
}

/// Return the licensing text printed for `--license`.
#[must_use]
pub fn license() -> String {
    help::render_license()
}
