//! Visitor pass.
//!
//! Per structure: a `TupleType` specialisation over the flattened public
//! field types, an instance `visit` overload, and a type-level `Acceptor`.
//! Per enumeration: a type-level `Acceptor` over its enumerators.

use vg_ir::{BaseLink, Enumeration, Registry, StructId};

use crate::flatten::flatten_public_types;
use crate::writer::CodeWriter;
use crate::{integer_literal, write_banner, Generator};

/// Generator for the reflection visitor annotation.
#[derive(Copy, Clone, Debug, Default)]
pub struct VisitorGenerator;

impl VisitorGenerator {
    pub const ANNOTATION: &'static str = "VISIGEN_GEN: Reflection Visitor";
}

impl Generator for VisitorGenerator {
    fn annotation(&self) -> &str {
        Self::ANNOTATION
    }

    fn includes(&self) -> &[&str] {
        &["tuple", "type_traits", "utility", "", "visigen/visigen_base.hpp"]
    }

    fn emit_structure(&self, out: &mut CodeWriter, registry: &Registry, id: StructId) {
        let s = registry.structure(id);
        let name = &s.qualified_name;
        write_banner(out, name);

        // Tuple of every visitable field type, inherited ones first.
        let types = flatten_public_types(registry, id).join(", ");
        out.writeln("template <>");
        out.writeln(&format!("struct TupleType<{name}> {{"));
        out.indented(|out| out.writeln(&format!("using type = std::tuple<{types}>;")));
        out.writeln("};");
        out.newline();

        // Instance visitor, const and non-const through SFINAE on T.
        out.writeln(&format!(
            "template <typename Visitor, typename T, std::enable_if_t<std::is_same_v<{name}, std::remove_const_t<T>>, bool> = true>"
        ));
        out.writeln(
            "constexpr void visit([[maybe_unused]] T& toVisit, [[maybe_unused]] Visitor&& visitor) {",
        );
        out.indented(|out| {
            for (base, link) in &s.base_classes {
                match link {
                    BaseLink::Resolved(_) => out.writeln(&format!(
                        "visit(static_cast<std::conditional_t<std::is_const_v<T>, const {base}, {base}>&>(toVisit), visitor);"
                    )),
                    BaseLink::Pending | BaseLink::Unresolved => {
                        out.writeln(&format!("// skipping unannotated base class {base}"));
                    }
                }
            }
            for field in s.public_fields.keys() {
                out.writeln(&format!("visitor(\"{field}\", toVisit.{field});"));
            }
        });
        out.writeln("}");
        out.newline();

        // Type-level acceptor: declared types instead of values.
        out.writeln("namespace detail {");
        out.writeln("template <typename Visitor>");
        out.writeln(&format!("struct Acceptor<{name}, Visitor> {{"));
        out.indented(|out| {
            out.writeln("static constexpr void visitType([[maybe_unused]] Visitor&& visitor) {");
            out.indented(|out| {
                for (base, link) in &s.base_classes {
                    match link {
                        BaseLink::Resolved(_) => out.writeln(&format!(
                            "Acceptor<{base}, Visitor>::visitType(std::forward<Visitor>(visitor));"
                        )),
                        BaseLink::Pending | BaseLink::Unresolved => {
                            out.writeln(&format!("// skipping unannotated base class {base}"));
                        }
                    }
                }
                for (field, ty) in &s.public_fields {
                    out.writeln(&format!("visitor(\"{field}\", TagType<{ty}>{{}});"));
                }
            });
            out.writeln("}");
        });
        out.writeln("};");
        out.writeln("} // namespace detail");
        out.newline();
    }

    fn emit_enumeration(&self, out: &mut CodeWriter, e: &Enumeration) {
        let name = &e.qualified_name;
        write_banner(out, name);

        out.writeln("namespace detail {");
        out.writeln("template <typename Visitor>");
        out.writeln(&format!("struct Acceptor<{name}, Visitor> {{"));
        out.indented(|out| {
            out.writeln("static constexpr void visitType([[maybe_unused]] Visitor&& visitor) {");
            out.indented(|out| {
                // Scoped access works for unscoped enumerators too.
                for (enumerator, value) in &e.enumerators {
                    let value = integer_literal(*value);
                    out.writeln(&format!(
                        "visitor({name}::{enumerator}, \"{enumerator}\", std::underlying_type_t<{name}>{{{value}}});"
                    ));
                }
            });
            out.writeln("}");
        });
        out.writeln("};");
        out.writeln("} // namespace detail");
        out.newline();
    }
}
