//! Optimiser presets and validation of user-supplied Yul step sequences.

/// Per-component optimiser switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimiserSettings {
    pub run_peephole: bool,
    pub run_deduplicate: bool,
    pub run_cse: bool,
    pub run_constant_optimiser: bool,
    pub optimize_stack_allocation: bool,
    pub run_yul_optimiser: bool,
    /// Hint used by the constant optimiser to weigh code size against
    /// execution cost.
    pub expected_executions_per_deployment: usize,
    /// User override for the Yul optimiser step sequence.
    pub yul_optimiser_steps: Option<String>,
}

impl OptimiserSettings {
    pub const DEFAULT_EXPECTED_EXECUTIONS: usize = 200;

    /// Everything off. The default when `--optimize` is absent.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            run_peephole: false,
            run_deduplicate: false,
            run_cse: false,
            run_constant_optimiser: false,
            optimize_stack_allocation: false,
            run_yul_optimiser: false,
            expected_executions_per_deployment: Self::DEFAULT_EXPECTED_EXECUTIONS,
            yul_optimiser_steps: None,
        }
    }

    /// The full pipeline enabled by `--optimize`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            run_peephole: true,
            run_deduplicate: true,
            run_cse: true,
            run_constant_optimiser: true,
            optimize_stack_allocation: true,
            run_yul_optimiser: true,
            expected_executions_per_deployment: Self::DEFAULT_EXPECTED_EXECUTIONS,
            yul_optimiser_steps: None,
        }
    }
}

impl Default for OptimiserSettings {
    fn default() -> Self {
        Self::minimal()
    }
}

/// One-letter abbreviations understood by the Yul optimiser.
const STEP_ABBREVIATIONS: &str = "flcCUnDvejsxIOoighTLMrmVatud";

/// Validate a `--yul-optimizations` step sequence: every character must be a
/// known step abbreviation or a balanced `[`/`]` bracket.
pub fn validate_optimiser_sequence(steps: &str) -> Result<(), String> {
    let mut depth = 0usize;
    for ch in steps.chars() {
        match ch {
            '[' => depth += 1,
            ']' => {
                if depth == 0 {
                    return Err("unbalanced brackets".to_string());
                }
                depth -= 1;
            }
            _ if STEP_ABBREVIATIONS.contains(ch) => {}
            _ => return Err(format!("'{ch}' is not a valid step abbreviation")),
        }
    }
    if depth != 0 {
        return Err("unbalanced brackets".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_disables_everything() {
        let settings = OptimiserSettings::minimal();
        assert!(!settings.run_peephole);
        assert!(!settings.run_yul_optimiser);
        assert_eq!(
            settings.expected_executions_per_deployment,
            OptimiserSettings::DEFAULT_EXPECTED_EXECUTIONS
        );
    }

    #[test]
    fn standard_enables_the_full_pipeline() {
        let settings = OptimiserSettings::standard();
        assert!(settings.run_peephole);
        assert!(settings.run_deduplicate);
        assert!(settings.run_cse);
        assert!(settings.run_constant_optimiser);
        assert!(settings.optimize_stack_allocation);
        assert!(settings.run_yul_optimiser);
    }

    #[test]
    fn sequence_accepts_known_steps_and_nesting() {
        assert!(validate_optimiser_sequence("").is_ok());
        assert!(validate_optimiser_sequence("dhfoDgvulfnTUtnIf").is_ok());
        assert!(validate_optimiser_sequence("a[x[cC]u]t").is_ok());
    }

    #[test]
    fn sequence_rejects_unknown_steps() {
        // The first invalid character is the one reported.
        let err = validate_optimiser_sequence("azq").unwrap_err();
        assert!(err.contains('z'), "{err}");

        let err = validate_optimiser_sequence("aq").unwrap_err();
        assert!(err.contains('q'), "{err}");
    }

    #[test]
    fn sequence_rejects_unbalanced_brackets() {
        assert!(validate_optimiser_sequence("[a").is_err());
        assert!(validate_optimiser_sequence("a]").is_err());
        assert!(validate_optimiser_sequence("[a][").is_err());
    }
}
