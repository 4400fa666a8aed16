#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! Command-line front-end for a Solidity-style compiler.
//!
//! The crate resolves raw command-line tokens into one internally consistent
//! [`cli::CommandLineOptions`] value, or reports the first validation error.
//! Everything downstream of resolution (compilation, linking, assembly) is a
//! separate concern and is not part of this crate.

pub mod address;
pub mod cli;
pub mod error;
pub mod evm_version;
pub mod logging;
pub mod model_checker;
pub mod optimiser;
pub mod remapping;
pub mod revert_strings;
pub mod version;

pub use cli::{CliError, CommandLineOptions, InputMode, Invocation};
