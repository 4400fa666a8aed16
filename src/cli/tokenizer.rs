//! Raw argv tokenizer: turns tokens into a [`RawArgumentMap`].
//!
//! The tokenizer only knows the option vocabulary and value arities from the
//! registry; every cross-option rule lives in the resolver.

use std::collections::HashMap;

use super::options::{self, Arity, OptionId, OptionSpec};
use super::CliError;

#[derive(Debug, Clone, Default)]
struct Entry {
    count: u32,
    strings: Vec<String>,
    uint: Option<u32>,
}

/// Occurrence counts and raw values per option, plus positional tokens.
#[derive(Debug, Clone, Default)]
pub struct RawArgumentMap {
    entries: HashMap<OptionId, Entry>,
    positional: Vec<String>,
}

impl RawArgumentMap {
    #[must_use]
    pub fn present(&self, id: OptionId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn count(&self, id: OptionId) -> u32 {
        self.entries.get(&id).map_or(0, |entry| entry.count)
    }

    /// The value of a single-value option.
    #[must_use]
    pub fn value(&self, id: OptionId) -> Option<&str> {
        self.entries
            .get(&id)
            .and_then(|entry| entry.strings.first())
            .map(String::as_str)
    }

    /// All values of a repeatable option, in supply order.
    #[must_use]
    pub fn values(&self, id: OptionId) -> &[String] {
        self.entries
            .get(&id)
            .map_or(&[], |entry| entry.strings.as_slice())
    }

    #[must_use]
    pub fn uint(&self, id: OptionId) -> Option<u32> {
        self.entries.get(&id).and_then(|entry| entry.uint)
    }

    #[must_use]
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    fn entry(&mut self, id: OptionId) -> &mut Entry {
        self.entries.entry(id).or_default()
    }
}

/// Tokenize argv (without the program name) into a [`RawArgumentMap`].
pub fn tokenize<I, T>(args: I) -> Result<RawArgumentMap, CliError>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    let mut map = RawArgumentMap::default();
    let mut iter = args.map(Into::into).peekable();

    while let Some(token) = iter.next() {
        if let Some(rest) = token.strip_prefix("--") {
            if rest.is_empty() {
                // `--` ends option parsing; everything after is positional.
                map.positional.extend(iter);
                break;
            }
            let (name, inline) = match rest.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (rest, None),
            };
            let Some(spec) = options::by_name(name) else {
                return Err(CliError::new(format!("unrecognised option '{token}'")));
            };
            record(&mut map, spec, inline, &mut iter)?;
        } else if token.starts_with('-') && token != "-" {
            let mut chars = token.chars();
            chars.next();
            let spec = chars
                .next()
                .and_then(options::by_short)
                .ok_or_else(|| CliError::new(format!("unrecognised option '{token}'")))?;
            // `-ovalue` attaches the remainder as the value.
            let inline = {
                let rest: String = chars.collect();
                if rest.is_empty() { None } else { Some(rest) }
            };
            record(&mut map, spec, inline, &mut iter)?;
        } else {
            map.positional.push(token);
        }
    }

    Ok(map)
}

fn record<I>(
    map: &mut RawArgumentMap,
    spec: &'static OptionSpec,
    inline: Option<String>,
    iter: &mut std::iter::Peekable<I>,
) -> Result<(), CliError>
where
    I: Iterator<Item = String>,
{
    let name = spec.display_name();
    match spec.arity {
        Arity::Flag => {
            if inline.is_some() {
                return Err(CliError::new(format!(
                    "Option {name} does not take a value."
                )));
            }
            map.entry(spec.id).count += 1;
        }
        Arity::Value | Arity::Uint => {
            if map.present(spec.id) {
                return Err(CliError::new(format!(
                    "Option {name} cannot be specified more than once."
                )));
            }
            let value = take_value(inline, iter, &name)?;
            let entry = map.entry(spec.id);
            entry.count = 1;
            if spec.arity == Arity::Uint {
                let parsed: u32 = value.parse().map_err(|_| {
                    CliError::new(format!(
                        "Invalid value for {name}: \"{value}\" is not an unsigned integer."
                    ))
                })?;
                entry.uint = Some(parsed);
            }
            entry.strings.push(value);
        }
        Arity::ValueList => {
            let value = take_value(inline, iter, &name)?;
            let entry = map.entry(spec.id);
            entry.count += 1;
            entry.strings.push(value);
        }
    }
    Ok(())
}

fn take_value<I>(
    inline: Option<String>,
    iter: &mut std::iter::Peekable<I>,
    name: &str,
) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    if let Some(value) = inline {
        return Ok(value);
    }
    iter.next()
        .ok_or_else(|| CliError::new(format!("Missing value for option {name}.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize_ok(args: &[&str]) -> RawArgumentMap {
        match tokenize(args.iter().copied()) {
            Ok(map) => map,
            Err(err) => panic!("expected tokenization to succeed, found error: {err}"),
        }
    }

    #[test]
    fn flags_count_occurrences_and_values_are_stored() {
        let map = tokenize_ok(&["--optimize", "--bin", "--bin", "--evm-version", "berlin"]);
        assert!(map.present(OptionId::Optimize));
        assert_eq!(map.count(OptionId::Bin), 2);
        assert_eq!(map.value(OptionId::EvmVersion), Some("berlin"));
        assert!(!map.present(OptionId::Link));
    }

    #[test]
    fn inline_values_and_short_alias_are_accepted() {
        let map = tokenize_ok(&["--combined-json=abi,bin", "-o", "out", "a.sol"]);
        assert_eq!(map.value(OptionId::CombinedJson), Some("abi,bin"));
        assert_eq!(map.value(OptionId::OutputDir), Some("out"));
        assert_eq!(map.positional(), ["a.sol"]);
    }

    #[test]
    fn value_lists_accumulate() {
        let map = tokenize_ok(&["--libraries", "A=0x1", "--libraries", "B=0x2"]);
        assert_eq!(map.values(OptionId::Libraries), ["A=0x1", "B=0x2"]);
        assert_eq!(map.count(OptionId::Libraries), 2);
    }

    #[test]
    fn uints_are_parsed_and_bad_ones_rejected() {
        let map = tokenize_ok(&["--optimize-runs", "450"]);
        assert_eq!(map.uint(OptionId::OptimizeRuns), Some(450));

        let err = tokenize(["--optimize-runs", "many"].iter().copied()).unwrap_err();
        assert!(err.to_string().contains("unsigned integer"), "{err}");
    }

    #[test]
    fn stdin_marker_and_double_dash_are_positional() {
        let map = tokenize_ok(&["-", "--", "--bin"]);
        assert_eq!(map.positional(), ["-", "--bin"]);
        assert!(!map.present(OptionId::Bin));
    }

    #[test]
    fn unknown_and_malformed_options_are_rejected() {
        assert!(tokenize(["--frobnicate"].iter().copied()).is_err());
        assert!(tokenize(["-x"].iter().copied()).is_err());
        assert!(tokenize(["--optimize=yes"].iter().copied()).is_err());
        assert!(tokenize(["--evm-version"].iter().copied()).is_err());
        let err = tokenize(["--machine", "evm", "--machine", "evm"].iter().copied()).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");
    }
}
