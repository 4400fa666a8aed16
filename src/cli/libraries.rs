//! Parsing of `--libraries` specifiers into a name-to-address mapping.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::address::{checksummed_address, passes_address_checksum, Address};

use super::CliError;

/// Classification of one `--libraries` argument.
///
/// An argument that names an existing regular file stands for that file's
/// contents. Any probe or read failure means the argument is used literally:
/// "looks like a path but is not readable" is a valid literal specifier.
pub enum LibrarySource {
    IsFile(String),
    Literal(String),
}

impl LibrarySource {
    #[must_use]
    pub fn classify(argument: &str) -> Self {
        let path = Path::new(argument);
        let is_file = fs::metadata(path)
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if is_file {
            if let Ok(content) = fs::read_to_string(path) {
                return Self::IsFile(content);
            }
        }
        Self::Literal(argument.to_string())
    }

    fn content(&self) -> &str {
        match self {
            Self::IsFile(content) | Self::Literal(content) => content,
        }
    }
}

/// Parse every `--libraries` argument into `libraries`.
///
/// The first error abandons the whole parse; on success all name/address
/// pairs from all arguments have been inserted.
pub fn parse_library_options(
    arguments: &[String],
    libraries: &mut BTreeMap<String, Address>,
) -> Result<(), CliError> {
    for argument in arguments {
        let source = LibrarySource::classify(argument);
        parse_specifier(source.content(), libraries)?;
    }
    Ok(())
}

fn parse_specifier(
    specifier: &str,
    libraries: &mut BTreeMap<String, Address>,
) -> Result<(), CliError> {
    let tokens = specifier
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty());

    for token in tokens {
        // The last `=` separates name from address; the legacy `:` separator
        // is still accepted when no `=` is present.
        let (separator, is_legacy) = match token.rfind('=') {
            Some(position) => (position, false),
            None => match token.rfind(':') {
                Some(position) => (position, true),
                None => {
                    return Err(CliError::new(format!(
                        "Equal sign separator missing in library address specifier \"{token}\""
                    )))
                }
            },
        };
        if !is_legacy && token.matches('=').count() != 1 {
            return Err(CliError::new(format!(
                "Only one equal sign \"=\" is allowed in the address string \"{token}\"."
            )));
        }

        let name = token[..separator].trim();
        let address_string = token[separator + 1..].trim();
        if name.is_empty() {
            return Err(CliError::new(format!(
                "Empty library name in address specifier \"{token}\""
            )));
        }
        if libraries.contains_key(name) {
            return Err(CliError::new(format!(
                "Address specified more than once for library \"{name}\"."
            )));
        }
        let separator_name = if is_legacy { "colon" } else { "equal sign" };
        let address = parse_address(name, address_string, separator_name)?;
        libraries.insert(name.to_string(), address);
    }
    Ok(())
}

fn parse_address(
    name: &str,
    address_string: &str,
    separator_name: &str,
) -> Result<Address, CliError> {
    if address_string.is_empty() {
        return Err(CliError::with_hint(
            format!("Empty address provided for library \"{name}\"."),
            format!("Note that there should not be any whitespace after the {separator_name}."),
        ));
    }
    let Some(hex_digits) = address_string.strip_prefix("0x") else {
        return Err(CliError::new(format!(
            "The address {address_string} is not prefixed with \"0x\"."
        )));
    };
    if hex_digits.len() != 40 {
        return Err(CliError::new(format!(
            "Invalid length for address for library \"{name}\": {} instead of 40 characters.",
            hex_digits.len()
        )));
    }
    if !hex_digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(CliError::new(format!(
            "Invalid hex digits in address for library \"{name}\"."
        )));
    }
    if !passes_address_checksum(hex_digits, false) {
        // The checksum can only fail for mixed-case input, so the corrected
        // rendering always exists here.
        let correct = checksummed_address(hex_digits)
            .unwrap_or_else(|| hex_digits.to_ascii_lowercase());
        return Err(CliError::with_hint(
            format!("Invalid checksum on address for library \"{name}\"."),
            format!("The correct checksum is 0x{correct}"),
        ));
    }

    let bytes = hex::decode(hex_digits)
        .map_err(|_| CliError::new(format!("Invalid address for library \"{name}\".")))?;
    let address = Address::from_slice(&bytes)
        .ok_or_else(|| CliError::new(format!("Invalid address for library \"{name}\".")))?;
    if address.is_zero() {
        return Err(CliError::new(format!(
            "Invalid library address (\"0x{hex_digits}\") supplied."
        )));
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CHECKSUMMED: &str = "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn parse_one(specifier: &str) -> Result<BTreeMap<String, Address>, CliError> {
        let mut libraries = BTreeMap::new();
        parse_library_options(&[specifier.to_string()], &mut libraries)?;
        Ok(libraries)
    }

    #[test]
    fn valid_specifier_resolves_to_the_exact_bytes() {
        let libraries = parse_one(&format!("math:Lib=0x{CHECKSUMMED}")).expect("valid");
        let address = libraries.get("math:Lib").expect("inserted");
        assert_eq!(
            hex::encode(address.as_bytes()),
            CHECKSUMMED.to_ascii_lowercase()
        );
    }

    #[test]
    fn commas_and_whitespace_separate_entries() {
        let all_lower = CHECKSUMMED.to_ascii_lowercase();
        let libraries = parse_one(&format!(
            "A=0x{all_lower}, B=0x{CHECKSUMMED}\n\tC=0x{all_lower}"
        ))
        .expect("valid");
        assert_eq!(libraries.len(), 3);
    }

    #[test]
    fn legacy_colon_separator_is_accepted() {
        let libraries = parse_one(&format!("Lib:0x{CHECKSUMMED}")).expect("valid");
        assert!(libraries.contains_key("Lib"));
    }

    #[test]
    fn missing_separator_and_extra_equal_signs_fail() {
        let err = parse_one("JustAName").unwrap_err();
        assert!(err.to_string().contains("separator missing"), "{err}");

        let err = parse_one(&format!("A=B=0x{CHECKSUMMED}")).unwrap_err();
        assert!(err.to_string().contains("one equal sign"), "{err}");
    }

    #[test]
    fn duplicate_library_name_fails_naming_it() {
        let mut libraries = BTreeMap::new();
        let args = vec![
            format!("Lib=0x{CHECKSUMMED}"),
            format!("Lib=0x{CHECKSUMMED}"),
        ];
        let err = parse_library_options(&args, &mut libraries).unwrap_err();
        assert!(err.to_string().contains("\"Lib\""), "{err}");
    }

    #[test]
    fn empty_address_hint_names_the_separator_used() {
        let err = parse_one("Lib=").unwrap_err();
        assert!(err.to_string().contains("after the equal sign"), "{err}");

        let err = parse_one("Lib:").unwrap_err();
        assert!(err.to_string().contains("after the colon"), "{err}");
        assert!(!err.to_string().contains("equal sign"), "{err}");
    }

    #[test]
    fn missing_prefix_wrong_length_and_zero_address_fail() {
        let digits = CHECKSUMMED.to_ascii_lowercase();
        let err = parse_one(&format!("Lib={digits}")).unwrap_err();
        assert!(err.to_string().contains("0x"), "{err}");

        let err = parse_one("Lib=0xdeadbeef").unwrap_err();
        assert!(err.to_string().contains("8 instead of 40"), "{err}");

        let zeros = "0".repeat(40);
        let err = parse_one(&format!("Lib=0x{zeros}")).unwrap_err();
        assert!(err.to_string().contains("Invalid library address"), "{err}");
    }

    #[test]
    fn flipped_checksum_fails_and_reports_the_correct_one() {
        let mut flipped = String::from(CHECKSUMMED);
        flipped.replace_range(1..2, "A");
        let err = parse_one(&format!("Lib=0x{flipped}")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("checksum"), "{message}");
        assert!(message.contains(CHECKSUMMED), "{message}");
    }

    #[test]
    fn file_argument_uses_the_file_contents() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "FileLib=0x{CHECKSUMMED}").expect("write");

        let path = file.path().to_string_lossy().into_owned();
        let mut libraries = BTreeMap::new();
        parse_library_options(&[path], &mut libraries).expect("valid file");
        assert!(libraries.contains_key("FileLib"));
    }

    #[test]
    fn unreadable_path_is_treated_as_a_literal() {
        let err = parse_one("/no/such/file/anywhere").unwrap_err();
        assert!(err.to_string().contains("separator missing"), "{err}");
    }
}
