use std::fmt::Write;

use super::options::{OptionGroup, OptionSpec, REGISTRY};

const USAGE: &str = "Usage: solfront [options] [input_file...]\n\
Compiles the given Solidity input files (or the standard input if \"-\" is\n\
used as a file name) and outputs the components specified in the options\n\
at standard output or in files in the output directory, if specified.\n\
Imports are automatically read from the filesystem, but it is also possible to\n\
remap paths using the context:prefix=path syntax.";

fn option_column(spec: &OptionSpec) -> String {
    let mut column = String::new();
    if let Some(short) = spec.short {
        let _ = write!(column, "-{short}, ");
    }
    let _ = write!(column, "--{}", spec.name);
    if let Some(value_name) = spec.value_name {
        let _ = write!(column, " <{value_name}>");
    }
    column
}

/// Render the full `--help` text from the option registry.
#[must_use]
pub fn render_general_help() -> String {
    let width = REGISTRY
        .iter()
        .map(|spec| option_column(spec).len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(USAGE);
    out.push('\n');
    for group in OptionGroup::ALL {
        let mut members = REGISTRY.iter().filter(|spec| spec.group == *group).peekable();
        if members.peek().is_none() {
            continue;
        }
        let _ = write!(out, "\n{}:\n", group.title());
        for spec in members {
            let _ = writeln!(out, "  {:<width$}  {}", option_column(spec), spec.help);
        }
    }
    out
}

/// Render the text printed for `--license`.
#[must_use]
pub fn render_license() -> String {
    "solfront is free software: you can redistribute it and/or modify\n\
     it under the terms of the GNU General Public License as published by\n\
     the Free Software Foundation, either version 3 of the License, or\n\
     (at your option) any later version.\n\
     \n\
     solfront is distributed in the hope that it will be useful,\n\
     but WITHOUT ANY WARRANTY; without even the implied warranty of\n\
     MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the\n\
     GNU General Public License for more details.\n\
     \n\
     You should have received a copy of the GNU General Public License\n\
     along with this program. If not, see <https://www.gnu.org/licenses/>."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_registered_option() {
        let help = render_general_help();
        assert!(help.starts_with("Usage: solfront"));
        for spec in REGISTRY {
            assert!(
                help.contains(&format!("--{}", spec.name)),
                "--{} missing from help",
                spec.name
            );
        }
        assert!(help.contains("-o, --output-dir"));
    }

    #[test]
    fn license_names_the_gpl() {
        assert!(render_license().contains("GNU General Public License"));
    }
}
