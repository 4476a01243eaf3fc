//! Command handlers for the `visigen` CLI.
//!
//! Argument parsing lives here so the binary stays a thin dispatcher; each
//! submodule implements one command and reports failure as a
//! [`GenerateError`] for `main` to render.

mod dump;
mod generate;

use std::path::PathBuf;

use vg_frontend::Frontend;

use crate::config::GenerateConfig;
use crate::error::GenerateError;

pub use dump::{render_dump, run_dump};
pub use generate::run_generate;

/// Options shared by `generate` and `dump`.
#[derive(Clone, Debug, Default)]
pub struct CliOptions {
    pub config: GenerateConfig,
    /// Machine-readable output (`dump` only).
    pub json: bool,
}

/// Parse the arguments following the command name.
///
/// `-i`/`--input-files` takes every following argument up to the next one
/// starting with `-`; it may be repeated.
pub fn parse_cli_options(args: &[String]) -> Result<CliOptions, GenerateError> {
    let mut options = CliOptions::default();
    let config = &mut options.config;
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "-i" || arg == "--input-files" {
            i += 1;
            let start = i;
            while i < args.len() && !args[i].starts_with('-') {
                config.inputs.push(PathBuf::from(&args[i]));
                i += 1;
            }
            if i == start {
                return Err(GenerateError::Config(format!("{arg} expects at least one file")));
            }
            continue;
        }

        if arg == "-o" || arg == "--output" {
            let Some(path) = args.get(i + 1) else {
                return Err(GenerateError::Config(format!("{arg} expects a path")));
            };
            config.output = Some(PathBuf::from(path));
            i += 2;
            continue;
        }

        if let Some(path) = arg.strip_prefix("--output=") {
            config.output = Some(PathBuf::from(path));
        } else if let Some(flags) = arg.strip_prefix("--flags=") {
            config.flags = flags.to_owned();
        } else if let Some(namespace) = arg.strip_prefix("--namespace=") {
            if namespace.is_empty() {
                return Err(GenerateError::Config("namespace must not be empty".to_owned()));
            }
            config.namespace = namespace.to_owned();
        } else if let Some(dir) = arg.strip_prefix("--libclang=") {
            config.frontend.library_path = Some(PathBuf::from(dir));
        } else if let Some(kind) = arg.strip_prefix("--generator=") {
            config.generator = kind.parse().map_err(GenerateError::Config)?;
        } else if let Some(marker) = arg.strip_prefix("--marker=") {
            if marker.is_empty() {
                return Err(GenerateError::Config("marker must not be empty".to_owned()));
            }
            config.marker = marker.to_owned();
        } else if arg == "--json" {
            options.json = true;
        } else {
            return Err(GenerateError::Config(format!("unexpected argument '{arg}'")));
        }
        i += 1;
    }

    Ok(options)
}

/// The parser frontend this build was compiled with.
#[cfg(feature = "libclang")]
fn open_frontend(config: &GenerateConfig) -> Result<Box<dyn Frontend>, GenerateError> {
    let frontend = vg_frontend::ClangFrontend::new(&config.frontend)?;
    Ok(Box::new(frontend))
}

#[cfg(not(feature = "libclang"))]
fn open_frontend(_config: &GenerateConfig) -> Result<Box<dyn Frontend>, GenerateError> {
    Err(GenerateError::Config(
        "this build of visigen has no parser frontend (enable the `libclang` feature)".to_owned(),
    ))
}

#[cfg(test)]
mod tests;
