//! Batch configuration.

use std::path::PathBuf;

use vg_emit::{EmitOptions, GeneratorKind};
use vg_frontend::{FrontendConfig, ParseOptions, GENERATION_DEFINE};

/// Substring an annotation must contain for its declaration to be collected.
pub const DEFAULT_MARKER: &str = "VISIGEN_GEN";

/// Namespace wrapping the generated header.
pub const DEFAULT_NAMESPACE: &str = "visigen";

/// Everything one generation batch needs.
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// Files parsed, in order.
    pub inputs: Vec<PathBuf>,
    /// Destination header; standard output when `None`.
    pub output: Option<PathBuf>,
    /// Raw compiler flags, split on whitespace and passed to the parser.
    pub flags: String,
    pub namespace: String,
    pub marker: String,
    pub generator: GeneratorKind,
    pub frontend: FrontendConfig,
    pub parse_options: ParseOptions,
    /// Fixed generation stamp; the current local time when `None`.
    pub stamp: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            inputs: Vec::new(),
            output: None,
            flags: String::new(),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            marker: DEFAULT_MARKER.to_owned(),
            generator: GeneratorKind::default(),
            frontend: FrontendConfig::default(),
            parse_options: ParseOptions::default(),
            stamp: None,
        }
    }
}

impl GenerateConfig {
    /// Arguments handed to the parser for every input: the caller's flags
    /// verbatim, then the generation-mode definition.
    pub fn parser_args(&self) -> Vec<String> {
        self.flags
            .split_whitespace()
            .map(str::to_owned)
            .chain(std::iter::once(format!("-D{GENERATION_DEFINE}")))
            .collect()
    }

    pub fn emit_options(&self) -> EmitOptions {
        let options = EmitOptions::new(self.namespace.clone());
        match &self.stamp {
            Some(stamp) => options.with_stamp(stamp.clone()),
            None => options,
        }
    }
}
