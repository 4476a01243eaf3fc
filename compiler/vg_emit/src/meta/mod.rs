//! Meta-table pass.
//!
//! Emits `MetaStructInternal` / `MetaEnumInternal` specialisations holding
//! member pointers, base tags and enumerator tables as constexpr data, for
//! consumers that prefer iterating tuples over calling visitors.

use vg_ir::{BaseLink, Enumeration, Registry, StructId};

use crate::writer::CodeWriter;
use crate::{integer_literal, write_banner, Generator};

/// Generator for the reflection meta annotation.
#[derive(Copy, Clone, Debug, Default)]
pub struct MetaGenerator;

impl MetaGenerator {
    pub const ANNOTATION: &'static str = "VISIGEN_GEN: Reflection Meta";
}

impl Generator for MetaGenerator {
    fn annotation(&self) -> &str {
        Self::ANNOTATION
    }

    fn includes(&self) -> &[&str] {
        &[
            "array",
            "string_view",
            "tuple",
            "type_traits",
            "",
            "visigen/visigen_meta.hpp",
        ]
    }

    fn emit_structure(&self, out: &mut CodeWriter, registry: &Registry, id: StructId) {
        let s = registry.structure(id);
        write_banner(out, &s.qualified_name);

        out.writeln("template <>");
        out.writeln(&format!("struct MetaStructInternal<{}> {{", s.qualified_name));
        out.indented(|out| {
            out.writeln(&format!("using Type = {};", s.qualified_name));
            out.writeln(&format!(
                "static constexpr std::string_view name{{\"{}\"}};",
                s.display_name
            ));

            // make_tuple rejects trailing commas.
            out.writeln("static constexpr auto publicFields = std::make_tuple(");
            out.indented(|out| {
                let last = s.public_fields.len().saturating_sub(1);
                for (i, (field, ty)) in s.public_fields.iter().enumerate() {
                    let suffix = if i < last { "," } else { "" };
                    out.writeln(&format!(
                        "ClassMember<Type, {ty}>{{&Type::{field}, \"{field}\"}}{suffix}"
                    ));
                }
            });
            out.writeln(");");

            out.writeln("static constexpr auto baseClasses = std::make_tuple(");
            out.indented(|out| {
                let resolved = s
                    .base_classes
                    .values()
                    .filter(|link| link.resolved().is_some())
                    .count();
                let mut written = 0;
                for (base, link) in &s.base_classes {
                    match link {
                        BaseLink::Resolved(base_id) => {
                            written += 1;
                            let suffix = if written < resolved { "," } else { "" };
                            let base_name = &registry.structure(*base_id).qualified_name;
                            out.writeln(&format!("type_tag<{base_name}>{{}}{suffix}"));
                        }
                        BaseLink::Pending | BaseLink::Unresolved => {
                            out.writeln(&format!("// skipping unannotated base class {base}"));
                        }
                    }
                }
            });
            out.writeln(");");
        });
        out.writeln("};");
        out.newline();
    }

    fn emit_enumeration(&self, out: &mut CodeWriter, e: &Enumeration) {
        let name = &e.qualified_name;
        write_banner(out, name);

        out.writeln("template <>");
        out.writeln(&format!("struct MetaEnumInternal<{name}> {{"));
        out.indented(|out| {
            out.writeln(&format!("using Utype = std::underlying_type_t<{name}>;"));
            out.writeln(&format!(
                "static constexpr std::string_view name{{\"{}\"}};",
                e.display_name
            ));
            out.writeln(&format!(
                "static constexpr std::array<Enumerator<{name}>, {}> enumerators = {{{{",
                e.enumerators.len()
            ));
            out.indented(|out| {
                for (enumerator, value) in &e.enumerators {
                    let value = integer_literal(*value);
                    out.writeln(&format!(
                        "{{{name}::{enumerator}, \"{enumerator}\", Utype{{{value}}}}},"
                    ));
                }
            });
            out.writeln("}};");
        });
        out.writeln("};");
        out.newline();
    }
}
