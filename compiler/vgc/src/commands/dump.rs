//! The `dump` command: show what a batch collects, without emitting.

use std::fmt::Write;

use serde::Serialize;
use vg_ir::{Access, BaseLink, Enumeration, Structure};

use super::open_frontend;
use crate::config::GenerateConfig;
use crate::error::GenerateError;
use crate::pipeline::{self, Batch, BatchStats};

pub fn run_dump(config: &GenerateConfig, json: bool) -> Result<(), GenerateError> {
    let mut frontend = open_frontend(config)?;
    let batch = pipeline::collect_batch(&mut frontend, config)?;
    print!("{}", render_dump(&batch, json)?);
    Ok(())
}

#[derive(Serialize)]
struct DumpReport<'a> {
    stats: BatchStats,
    structures: Vec<&'a Structure>,
    enumerations: Vec<&'a Enumeration>,
}

/// Human-readable (or JSON) listing of every collected declaration.
pub fn render_dump(batch: &Batch, json: bool) -> Result<String, GenerateError> {
    let registry = &batch.registry;

    if json {
        let report = DumpReport {
            stats: batch.stats,
            structures: registry.structures().map(|(_, s)| s).collect(),
            enumerations: registry.enumerations().map(|(_, e)| e).collect(),
        };
        let mut text = serde_json::to_string_pretty(&report)
            .map_err(|err| GenerateError::Config(format!("cannot serialize dump: {err}")))?;
        text.push('\n');
        return Ok(text);
    }

    // Writing into a String cannot fail.
    let mut out = String::new();
    for (_, structure) in registry.structures() {
        let _ = writeln!(
            out,
            "struct {} [{}]",
            structure.qualified_name, structure.annotation
        );
        for (name, link) in &structure.base_classes {
            let state = match link {
                BaseLink::Resolved(_) => "resolved",
                BaseLink::Unresolved => "unresolved",
                BaseLink::Pending => "pending",
            };
            let _ = writeln!(out, "    base {name} ({state})");
        }
        for access in [Access::Public, Access::Protected, Access::Private] {
            for (name, ty) in structure.fields(access) {
                let _ = writeln!(out, "    {access} {name}: {ty}");
            }
        }
    }
    for (_, enumeration) in registry.enumerations() {
        let _ = writeln!(
            out,
            "enum {} [{}]",
            enumeration.qualified_name, enumeration.annotation
        );
        for (name, value) in &enumeration.enumerators {
            let _ = writeln!(out, "    {name} = {value}");
        }
    }

    let stats = &batch.stats;
    let _ = writeln!(
        out,
        "{} file(s): {} structure(s), {} enumeration(s), {} duplicate(s), {} resolved and {} unresolved base(s)",
        stats.files,
        stats.structures,
        stats.enumerations,
        stats.duplicates,
        stats.resolved_bases,
        stats.unresolved_bases
    );
    Ok(out)
}
