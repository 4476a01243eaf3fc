//! Batch pipeline: parse every input, collect, resolve once, emit once.
//!
//! ```text
//! for each input:  Frontend::parse ──fatal check──► Collector::collect
//! after all:       resolve_bases
//! then:            Emitter (preamble, selected declarations, postamble)
//! ```
//!
//! A fatal diagnostic in any file ends the batch before anything is
//! emitted, so the destination is either fully rewritten or left alone.

use std::io::{self, Write};
use std::path::Path;

use vg_collect::{resolve_bases, Collector};
use vg_diagnostic::fatal_diagnostics;
use vg_emit::{EmitStats, Emitter};
use vg_frontend::{Frontend, ParseRequest};
use vg_ir::Registry;

use crate::config::GenerateConfig;
use crate::error::GenerateError;
use crate::output;

/// Counts accumulated over one batch.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, serde::Serialize)]
pub struct BatchStats {
    pub files: usize,
    pub structures: usize,
    pub enumerations: usize,
    pub duplicates: usize,
    pub resolved_bases: usize,
    pub unresolved_bases: usize,
}

/// A fully collected and resolved batch, ready for emission.
#[derive(Debug)]
pub struct Batch {
    pub registry: Registry,
    pub stats: BatchStats,
}

/// Parse and collect every input of `config`, then resolve bases once.
#[tracing::instrument(level = "info", skip_all, fields(files = config.inputs.len()))]
pub fn collect_batch<F: Frontend + ?Sized>(
    frontend: &mut F,
    config: &GenerateConfig,
) -> Result<Batch, GenerateError> {
    if config.inputs.is_empty() {
        return Err(GenerateError::Config("no input files given".to_owned()));
    }

    let args = config.parser_args();
    let collector = Collector::new(config.marker.clone());
    let mut registry = Registry::new();
    let mut stats = BatchStats::default();

    for path in &config.inputs {
        let request = ParseRequest {
            path,
            args: &args,
            options: config.parse_options,
        };
        let unit = frontend.parse(&request)?;

        for diagnostic in &unit.diagnostics {
            tracing::info!(path = %path.display(), %diagnostic, "parser diagnostic");
        }
        if fatal_diagnostics(&unit.diagnostics).next().is_some() {
            return Err(GenerateError::FatalDiagnostics {
                path: path.clone(),
                diagnostics: unit.diagnostics,
            });
        }

        let collected = collector.collect(&unit.root, &mut registry);
        stats.files += 1;
        stats.structures += collected.structures;
        stats.enumerations += collected.enumerations;
        stats.duplicates += collected.duplicates;
    }

    let resolved = resolve_bases(&mut registry);
    stats.resolved_bases = resolved.resolved;
    stats.unresolved_bases = resolved.unresolved;

    tracing::debug!(?stats, "batch collected");
    Ok(Batch { registry, stats })
}

/// Render the header for `registry` into `sink`, returning the sink.
pub fn render_into<W: Write>(
    sink: W,
    registry: &Registry,
    config: &GenerateConfig,
) -> io::Result<(W, EmitStats)> {
    let mut emitter = Emitter::open(sink, config.generator.generator(), &config.emit_options());
    let stats = emitter.emit(registry);
    let sink = emitter.finish()?;
    Ok((sink, stats))
}

/// Run a whole batch and write the header to the configured destination.
#[tracing::instrument(level = "info", skip_all, fields(generator = %config.generator))]
pub fn generate<F: Frontend + ?Sized>(
    frontend: &mut F,
    config: &GenerateConfig,
) -> Result<EmitStats, GenerateError> {
    let batch = collect_batch(frontend, config)?;

    let stats = match &config.output {
        Some(path) => output::write_file(path, |staged| {
            render_into(staged, &batch.registry, config).map(|(_, stats)| stats)
        })?,
        None => {
            let stdout = io::stdout();
            render_into(stdout.lock(), &batch.registry, config)
                .map(|(_, stats)| stats)
                .map_err(|err| GenerateError::output(Path::new("<stdout>"), err))?
        }
    };

    tracing::info!(
        structures = stats.structures,
        enumerations = stats.enumerations,
        "header generated"
    );
    Ok(stats)
}
