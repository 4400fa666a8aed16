//! The ordered validation state machine.
//!
//! Rules run strictly top to bottom; the first failing rule aborts the whole
//! resolution and no partial configuration escapes. The rule order is a
//! contract: early exits, simple exclusions, common options, mode
//! exclusivity, the standard-json shortcut, input paths, libraries, EVM
//! version, the assembler branch, stray assembly-only flags, the linker
//! branch, and finally plain compiler mode.

use std::path::PathBuf;

use crate::cli::options::{self, OptionId};
use crate::cli::output_selection::{decode_combined_json, FlagKind, OutputKind};
use crate::cli::tokenizer::RawArgumentMap;
use crate::cli::{
    libraries, AssemblyLanguage, CliError, CommandLineOptions, CompilerStage, InputMode,
    Invocation, MetadataHash, TargetMachine,
};
use crate::evm_version::EvmVersion;
use crate::model_checker::{
    ModelCheckerContracts, ModelCheckerEngine, ModelCheckerTargets,
};
use crate::optimiser::{validate_optimiser_sequence, OptimiserSettings};
use crate::remapping::Remapping;
use crate::revert_strings::RevertStrings;

const MODE_OPTIONS: &[OptionId] = &[
    OptionId::StandardJson,
    OptionId::Link,
    OptionId::Assemble,
    OptionId::StrictAssembly,
    OptionId::Yul,
    OptionId::ImportAst,
];

const STOP_AFTER_CONFLICTS: &[OptionId] = &[
    OptionId::Bin,
    OptionId::Ir,
    OptionId::IrOptimized,
    OptionId::Ewasm,
    OptionId::Gas,
    OptionId::Asm,
    OptionId::AsmJson,
    OptionId::Opcodes,
];

const ASSEMBLY_MODE_DENYLIST: &[OptionId] = &[
    OptionId::OutputDir,
    OptionId::Gas,
    OptionId::CombinedJson,
    OptionId::OptimizeYul,
    OptionId::NoOptimizeYul,
];

/// Resolve a tokenized argument map into a complete invocation.
pub fn resolve(args: &RawArgumentMap) -> Result<Invocation, CliError> {
    if args.present(OptionId::Help) {
        return Ok(Invocation::Help);
    }
    if args.present(OptionId::Version) {
        return Ok(Invocation::Version);
    }
    if args.present(OptionId::License) {
        return Ok(Invocation::License);
    }

    check_simple_exclusions(args)?;

    let mut resolved = CommandLineOptions::default();
    read_common_options(args, &mut resolved)?;
    check_mutually_exclusive(args, MODE_OPTIONS)?;

    if args.present(OptionId::StandardJson) {
        return resolve_standard_json(args, resolved);
    }

    read_input_paths_and_remappings(args, &mut resolved)?;
    libraries::parse_library_options(args.values(OptionId::Libraries), &mut resolved.libraries)?;

    if let Some(name) = args.value(OptionId::EvmVersion) {
        resolved.evm_version = EvmVersion::parse(name)
            .ok_or_else(|| CliError::new(format!("Invalid option for --evm-version: {name}")))?;
    }

    if args.present(OptionId::Assemble)
        || args.present(OptionId::StrictAssembly)
        || args.present(OptionId::Yul)
    {
        return resolve_assembler(args, resolved);
    }
    for id in [OptionId::Machine, OptionId::YulDialect] {
        if args.present(id) {
            return Err(CliError::new(format!(
                "Option {} is only valid in assembly mode.",
                options::display_name(id)
            )));
        }
    }

    if args.present(OptionId::Link) {
        resolved.input_mode = InputMode::Linker;
        return Ok(Invocation::Options(Box::new(resolved)));
    }

    resolve_compiler(args, resolved)
}

/// Fail when more than one of `candidates` was supplied, listing exactly the
/// enabled names.
fn check_mutually_exclusive(
    args: &RawArgumentMap,
    candidates: &[OptionId],
) -> Result<(), CliError> {
    let enabled: Vec<String> = candidates
        .iter()
        .filter(|id| args.present(**id))
        .map(|id| options::display_name(*id))
        .collect();
    if enabled.len() > 1 {
        return Err(CliError::new(format!(
            "The following options are mutually exclusive: {}. Select at most one.",
            enabled.join(", ")
        )));
    }
    Ok(())
}

fn check_simple_exclusions(args: &RawArgumentMap) -> Result<(), CliError> {
    check_mutually_exclusive(args, &[OptionId::Color, OptionId::NoColor])?;
    for conflict in STOP_AFTER_CONFLICTS {
        check_mutually_exclusive(args, &[OptionId::StopAfter, *conflict])?;
    }
    Ok(())
}

fn read_common_options(
    args: &RawArgumentMap,
    resolved: &mut CommandLineOptions,
) -> Result<(), CliError> {
    if args.present(OptionId::Color) {
        resolved.colored_output = Some(true);
    } else if args.present(OptionId::NoColor) {
        resolved.colored_output = Some(false);
    }
    resolved.pretty_json = args.present(OptionId::PrettyJson);
    resolved.with_error_ids = args.present(OptionId::ErrorCodes);
    resolved.ignore_missing_files = args.present(OptionId::IgnoreMissing);
    resolved.overwrite = args.present(OptionId::Overwrite);
    resolved.output_dir = args.value(OptionId::OutputDir).map(PathBuf::from);
    resolved.base_path = args.value(OptionId::BasePath).map(PathBuf::from);

    if let Some(paths) = args.value(OptionId::AllowPaths) {
        for path in paths.split(',').filter(|path| !path.is_empty()) {
            // A trailing separator is stripped, but never down to an empty
            // path; the filesystem root stays "/".
            let trimmed = path.trim_end_matches('/');
            let cleaned = if trimmed.is_empty() { "/" } else { trimmed };
            resolved.allowed_directories.insert(PathBuf::from(cleaned));
        }
    }

    if let Some(policy) = args.value(OptionId::RevertStrings) {
        let parsed = RevertStrings::parse(policy)
            .ok_or_else(|| CliError::new(format!("Invalid option for --revert-strings: {policy}")))?;
        if parsed == RevertStrings::VerboseDebug {
            return Err(CliError::new(
                "Only \"default\", \"strip\" and \"debug\" are implemented for --revert-strings for now.",
            ));
        }
        resolved.revert_strings = parsed;
    }

    if let Some(stage) = args.value(OptionId::StopAfter) {
        if stage != "parsing" {
            return Err(CliError::new(
                "Valid options for --stop-after are: \"parsing\".",
            ));
        }
        resolved.stop_after = Some(CompilerStage::Parsed);
    }

    for kind in OutputKind::ALL {
        if args.present(kind.option()) {
            resolved.selected_outputs.insert(*kind);
        }
    }
    resolved.estimate_gas = args.present(OptionId::Gas);

    if let Some(request) = args.value(OptionId::CombinedJson) {
        resolved.combined_json = Some(decode_combined_json(request)?);
    }

    Ok(())
}

fn resolve_standard_json(
    args: &RawArgumentMap,
    mut resolved: CommandLineOptions,
) -> Result<Invocation, CliError> {
    resolved.input_mode = InputMode::StandardJson;
    match args.positional() {
        [] => resolved.add_stdin = true,
        [path] if path == "-" => resolved.add_stdin = true,
        [path] => {
            resolved.source_paths.insert(PathBuf::from(path));
        }
        _ => {
            return Err(CliError::new(
                "If --standard-json is used, only zero or one input files are supported.",
            ))
        }
    }
    Ok(Invocation::Options(Box::new(resolved)))
}

fn read_input_paths_and_remappings(
    args: &RawArgumentMap,
    resolved: &mut CommandLineOptions,
) -> Result<(), CliError> {
    for token in args.positional() {
        if token == "-" {
            resolved.add_stdin = true;
        } else if token.contains('=') {
            let remapping = Remapping::parse(token)
                .ok_or_else(|| CliError::new(format!("Invalid remapping: \"{token}\".")))?;
            let directory = remapping.target_directory();
            if !directory.as_os_str().is_empty() {
                resolved.allowed_directories.insert(directory);
            }
            resolved.remappings.push(remapping);
        } else {
            resolved.source_paths.insert(PathBuf::from(token));
        }
    }
    Ok(())
}

fn resolve_assembler(
    args: &RawArgumentMap,
    mut resolved: CommandLineOptions,
) -> Result<Invocation, CliError> {
    resolved.input_mode = InputMode::Assembler;

    let invalid: Vec<String> = ASSEMBLY_MODE_DENYLIST
        .iter()
        .filter(|id| args.present(**id))
        .map(|id| options::display_name(*id))
        .collect();
    if !invalid.is_empty() {
        let mut message = format!(
            "The following options are invalid in assembly mode: {}.",
            invalid.join(", ")
        );
        if args.present(OptionId::OptimizeYul) || args.present(OptionId::NoOptimizeYul) {
            message.push_str(
                " Optimization is disabled by default and can be enabled with --optimize.",
            );
        }
        return Err(CliError::new(message));
    }

    resolved.input_language = if args.present(OptionId::Yul) {
        AssemblyLanguage::Yul
    } else if args.present(OptionId::StrictAssembly) {
        AssemblyLanguage::StrictAssembly
    } else {
        AssemblyLanguage::Assembly
    };

    if let Some(machine) = args.value(OptionId::Machine) {
        resolved.target_machine = match machine {
            "evm" => TargetMachine::Evm,
            "ewasm" => TargetMachine::Ewasm,
            _ => {
                return Err(CliError::new(format!(
                    "Invalid option for --machine: {machine}"
                )))
            }
        };
    }
    if resolved.target_machine == TargetMachine::Ewasm
        && matches!(
            resolved.input_language,
            AssemblyLanguage::StrictAssembly | AssemblyLanguage::Yul
        )
    {
        resolved.input_language = AssemblyLanguage::Ewasm;
    }

    if let Some(dialect) = args.value(OptionId::YulDialect) {
        match dialect {
            "evm" => resolved.input_language = AssemblyLanguage::StrictAssembly,
            "ewasm" => {
                resolved.input_language = AssemblyLanguage::Ewasm;
                if resolved.target_machine != TargetMachine::Ewasm {
                    return Err(CliError::new(
                        "If you select Ewasm as --yul-dialect, --machine has to be Ewasm as well.",
                    ));
                }
            }
            _ => {
                return Err(CliError::new(format!(
                    "Invalid option for --yul-dialect: {dialect}"
                )))
            }
        }
    }
    if resolved.target_machine == TargetMachine::Ewasm
        && resolved.input_language != AssemblyLanguage::Ewasm
    {
        return Err(CliError::new(
            "The Ewasm target machine is only supported for the Ewasm input language. Use --yul-dialect ewasm.",
        ));
    }

    let optimize = args.present(OptionId::Optimize);
    if optimize
        && !matches!(
            resolved.input_language,
            AssemblyLanguage::StrictAssembly | AssemblyLanguage::Ewasm
        )
    {
        return Err(CliError::new(
            "Optimizer can only be used for strict assembly. Use --strict-assembly.",
        ));
    }

    resolved.optimize = optimize;
    let mut settings = if optimize {
        OptimiserSettings::standard()
    } else {
        OptimiserSettings::minimal()
    };
    settings.expected_executions_per_deployment = args
        .uint(OptionId::OptimizeRuns)
        .map_or(OptimiserSettings::DEFAULT_EXPECTED_EXECUTIONS, |runs| {
            runs as usize
        });
    if let Some(steps) = args.value(OptionId::YulOptimizations) {
        if !optimize {
            return Err(CliError::new(
                "--yul-optimizations is invalid if Yul optimizer is disabled",
            ));
        }
        validate_optimiser_sequence(steps).map_err(|message| {
            CliError::new(format!(
                "Invalid optimizer step sequence in --yul-optimizations: {message}"
            ))
        })?;
        settings.yul_optimiser_steps = Some(steps.to_string());
    }
    resolved.optimiser = settings;

    tracing::warn!("Yul is still experimental. Please use the output with care.");

    Ok(Invocation::Options(Box::new(resolved)))
}

fn resolve_compiler(
    args: &RawArgumentMap,
    mut resolved: CommandLineOptions,
) -> Result<Invocation, CliError> {
    if let Some(method) = args.value(OptionId::MetadataHash) {
        resolved.metadata_hash = match method {
            "ipfs" => MetadataHash::Ipfs,
            "swarm" => MetadataHash::Swarm,
            "none" => MetadataHash::None,
            _ => {
                return Err(CliError::new(format!(
                    "Invalid option for --metadata-hash: {method}"
                )))
            }
        };
    }
    resolved.metadata_literal = args.present(OptionId::MetadataLiteral);

    if let Some(contracts) = args.value(OptionId::ModelCheckerContracts) {
        resolved.model_checker.contracts =
            ModelCheckerContracts::parse(contracts).ok_or_else(|| {
                CliError::new(format!(
                    "Invalid option for --model-checker-contracts: {contracts}"
                ))
            })?;
    }
    if let Some(engine) = args.value(OptionId::ModelCheckerEngine) {
        resolved.model_checker.engine = ModelCheckerEngine::parse(engine).ok_or_else(|| {
            CliError::new(format!("Invalid option for --model-checker-engine: {engine}"))
        })?;
    }
    if let Some(targets) = args.value(OptionId::ModelCheckerTargets) {
        resolved.model_checker.targets = ModelCheckerTargets::parse(targets).ok_or_else(|| {
            CliError::new(format!(
                "Invalid option for --model-checker-targets: {targets}"
            ))
        })?;
    }
    resolved.model_checker.timeout = args.uint(OptionId::ModelCheckerTimeout);
    resolved.model_checker_initialize = args.present(OptionId::ModelCheckerContracts)
        || args.present(OptionId::ModelCheckerEngine)
        || args.present(OptionId::ModelCheckerTargets)
        || args.present(OptionId::ModelCheckerTimeout);

    let optimize = args.present(OptionId::Optimize);
    resolved.optimize = optimize;
    let mut settings = if optimize {
        OptimiserSettings::standard()
    } else {
        OptimiserSettings::minimal()
    };
    settings.expected_executions_per_deployment = args
        .uint(OptionId::OptimizeRuns)
        .map_or(OptimiserSettings::DEFAULT_EXPECTED_EXECUTIONS, |runs| {
            runs as usize
        });
    if args.present(OptionId::NoOptimizeYul) {
        settings.run_yul_optimiser = false;
    }
    if let Some(steps) = args.value(OptionId::YulOptimizations) {
        if !settings.run_yul_optimiser {
            return Err(CliError::new(
                "--yul-optimizations is invalid if Yul optimizer is disabled",
            ));
        }
        validate_optimiser_sequence(steps).map_err(|message| {
            CliError::new(format!(
                "Invalid optimizer step sequence in --yul-optimizations: {message}"
            ))
        })?;
        settings.yul_optimiser_steps = Some(steps.to_string());
    }
    resolved.optimiser = settings;

    resolved.experimental_via_ir = args.present(OptionId::ExperimentalViaIr);

    if args.present(OptionId::ImportAst) {
        // Error recovery is deliberately not read here; AST import always
        // runs without it.
        resolved.input_mode = InputMode::CompilerWithAstImport;
    } else {
        resolved.input_mode = InputMode::Compiler;
        resolved.error_recovery = args.present(OptionId::ErrorRecovery);
    }

    Ok(Invocation::Options(Box::new(resolved)))
}
