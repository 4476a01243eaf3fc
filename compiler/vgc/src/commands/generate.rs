//! The `generate` command: parse, collect, resolve and write one header.

use super::open_frontend;
use crate::config::GenerateConfig;
use crate::error::GenerateError;
use crate::pipeline;

pub fn run_generate(config: &GenerateConfig) -> Result<(), GenerateError> {
    let mut frontend = open_frontend(config)?;
    pipeline::generate(&mut frontend, config)?;
    Ok(())
}
