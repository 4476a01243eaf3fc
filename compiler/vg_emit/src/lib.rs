//! Code emission for visigen.
//!
//! Renders a resolved `Registry` into one C++ header. The header is written
//! through an [`Emitter`], which owns the output sink for the whole batch:
//! opening it writes the preamble, and the postamble is written on every
//! exit path once it is open.
//!
//! # Architecture
//!
//! ```text
//! Registry (settled)
//!        ↓
//!   Emitter::open     (preamble, namespace scope)
//!        ↓
//!   Emitter::emit     (Generator per selected declaration)
//!        ↓
//!   Emitter::finish   (postamble, flush)
//! ```
//!
//! A declaration is selected when its annotation text equals the
//! generator's annotation, so one parse can feed several passes.

mod emitter;
mod flatten;
mod meta;
mod visitor;
mod writer;

#[cfg(test)]
mod test_support;

use std::fmt;
use std::str::FromStr;

use vg_ir::{Enumeration, Registry, StructId};

pub use emitter::{without_stamp, EmitOptions, EmitStats, Emitter, STAMP_PREFIX};
pub use flatten::{bases_first_order, flatten_public_types};
pub use meta::MetaGenerator;
pub use visitor::VisitorGenerator;
pub use writer::CodeWriter;

/// One generation pass.
pub trait Generator {
    /// Exact annotation text a declaration must carry to be emitted.
    fn annotation(&self) -> &str;

    /// Headers included by the preamble, in order. An empty entry separates
    /// include groups.
    fn includes(&self) -> &[&str];

    fn emit_structure(&self, out: &mut CodeWriter, registry: &Registry, id: StructId);

    fn emit_enumeration(&self, out: &mut CodeWriter, enumeration: &Enumeration);
}

/// Selectable generation passes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum GeneratorKind {
    #[default]
    Visitor,
    Meta,
}

impl GeneratorKind {
    pub fn generator(self) -> &'static dyn Generator {
        match self {
            GeneratorKind::Visitor => &VisitorGenerator,
            GeneratorKind::Meta => &MetaGenerator,
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorKind::Visitor => write!(f, "visitor"),
            GeneratorKind::Meta => write!(f, "meta"),
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visitor" => Ok(GeneratorKind::Visitor),
            "meta" => Ok(GeneratorKind::Meta),
            other => Err(format!(
                "unknown generator '{other}' (expected 'visitor' or 'meta')"
            )),
        }
    }
}

/// Comment banner preceding each emitted declaration.
pub(crate) fn write_banner(out: &mut CodeWriter, qualified_name: &str) {
    out.writeln("////////////////////////////////////////////////////////////");
    out.writeln(&format!("// {qualified_name}"));
    out.writeln("////////////////////////////////////////////////////////////");
    out.newline();
}

/// C++ spelling of an enumerator value.
///
/// Values above `i64::MAX` need an unsigned suffix to be valid literals, and
/// `i64::MIN` has no literal form of its own.
pub(crate) fn integer_literal(value: i128) -> String {
    if value > i128::from(i64::MAX) {
        format!("{value}u")
    } else if value == i128::from(i64::MIN) {
        format!("({} - 1)", i64::MIN + 1)
    } else {
        value.to_string()
    }
}
