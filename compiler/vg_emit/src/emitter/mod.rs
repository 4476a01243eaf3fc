//! Scoped output sink.

use std::io::{self, Write};

use vg_ir::Registry;

use crate::flatten::bases_first_order;
use crate::writer::CodeWriter;
use crate::Generator;

/// Start of the only preamble line that differs between two runs over the
/// same input.
pub const STAMP_PREFIX: &str = "// Autogenerated at ";

/// Settings for one emitted header.
#[derive(Clone, Debug)]
pub struct EmitOptions {
    /// Namespace wrapping every generated declaration.
    pub namespace: String,
    /// Generation stamp; the current local time when `None`.
    pub stamp: Option<String>,
}

impl EmitOptions {
    pub fn new(namespace: impl Into<String>) -> Self {
        EmitOptions {
            namespace: namespace.into(),
            stamp: None,
        }
    }

    #[must_use]
    pub fn with_stamp(mut self, stamp: impl Into<String>) -> Self {
        self.stamp = Some(stamp.into());
        self
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::new("visigen")
    }
}

/// Counts from one `Emitter::emit` call.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct EmitStats {
    pub structures: usize,
    pub enumerations: usize,
}

/// Writer bound to one output sink for a whole batch.
///
/// `open` writes the preamble and the opening namespace scope. `finish`
/// writes the closing scope and hands the flushed sink back. If the emitter
/// is dropped before `finish`, the closing scope is still written, errors
/// ignored.
pub struct Emitter<'g, W: Write> {
    generator: &'g dyn Generator,
    namespace: String,
    out: CodeWriter,
    sink: Option<W>,
}

impl<'g, W: Write> Emitter<'g, W> {
    pub fn open(sink: W, generator: &'g dyn Generator, options: &EmitOptions) -> Self {
        let mut emitter = Emitter {
            generator,
            namespace: options.namespace.clone(),
            out: CodeWriter::new(),
            sink: Some(sink),
        };
        let stamp = options.stamp.clone().unwrap_or_else(|| {
            chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S%.6f")
                .to_string()
        });
        emitter.write_preamble(&stamp);
        emitter
    }

    fn write_preamble(&mut self, stamp: &str) {
        let out = &mut self.out;
        out.writeln("#pragma once");
        out.newline();
        out.writeln(&format!("{STAMP_PREFIX}{stamp} by visigen."));
        out.writeln("// Do not edit, changes will be overwritten!");
        out.newline();
        for header in self.generator.includes() {
            if header.is_empty() {
                out.newline();
            } else {
                out.writeln(&format!("#include <{header}>"));
            }
        }
        out.newline();
        out.writeln(&format!("namespace {} {{", self.namespace));
        out.newline();
    }

    fn write_postamble(&mut self) {
        self.out
            .writeln(&format!("}} // namespace {}", self.namespace));
    }

    /// Emit every declaration in `registry` selected by this emitter's
    /// generator: structures first, then enumerations, each in discovery
    /// order. A structure's resolved bases are always emitted before it.
    #[tracing::instrument(level = "debug", skip_all, fields(annotation = self.generator.annotation()))]
    pub fn emit(&mut self, registry: &Registry) -> EmitStats {
        let mut stats = EmitStats::default();
        let annotation = self.generator.annotation();

        for id in bases_first_order(registry) {
            let structure = registry.structure(id);
            if structure.annotation == annotation {
                self.generator.emit_structure(&mut self.out, registry, id);
                stats.structures += 1;
            } else {
                tracing::trace!(structure = %structure.qualified_name, "not selected by this pass");
            }
        }
        for (_, enumeration) in registry.enumerations() {
            if enumeration.annotation == annotation {
                self.generator.emit_enumeration(&mut self.out, enumeration);
                stats.enumerations += 1;
            } else {
                tracing::trace!(enumeration = %enumeration.qualified_name, "not selected by this pass");
            }
        }

        tracing::debug!(
            structures = stats.structures,
            enumerations = stats.enumerations,
            "emitted declarations"
        );
        stats
    }

    /// Close the namespace scope, write everything to the sink and flush it.
    pub fn finish(mut self) -> io::Result<W> {
        let Some(mut sink) = self.sink.take() else {
            return Err(io::Error::other("emitter sink already released"));
        };
        self.write_postamble();
        sink.write_all(self.out.take_output().as_bytes())?;
        sink.flush()?;
        Ok(sink)
    }
}

impl<W: Write> Drop for Emitter<'_, W> {
    fn drop(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            self.write_postamble();
            let _ = sink.write_all(self.out.take_output().as_bytes());
            let _ = sink.flush();
        }
    }
}

/// `text` with the generation stamp line removed, for comparing two runs.
pub fn without_stamp(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with(STAMP_PREFIX))
        .map(|line| format!("{line}\n"))
        .collect()
}
