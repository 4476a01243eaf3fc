//! Contents of the generated header.

use pretty_assertions::assert_eq;
use vg_ir::{Access, DeclNode};
use vgc::testing::mocks::{
    base, public, tagged, tagged_enum, unit, MockFrontend, META_TAG, VISITOR_TAG,
};

use crate::common::{config, render, section};

fn visit_fn(text: &str, name: &str) -> String {
    section(
        text,
        &format!("template <typename Visitor, typename T, std::enable_if_t<std::is_same_v<{name}, "),
    )
    .to_owned()
}

#[test]
fn point_scenario() {
    let mut frontend = MockFrontend::new().with_file(
        "point.hpp",
        unit(vec![tagged(
            VISITOR_TAG,
            "Point",
            vec![public("x", "int"), public("y", "int")],
        )]),
    );
    let text = render(&mut frontend, &config(&["point.hpp"]));

    assert_eq!(text.matches("struct TupleType<").count(), 1);
    assert!(text.contains("struct TupleType<Point> {\n    using type = std::tuple<int, int>;\n};"));
    assert_eq!(
        visit_fn(&text, "Point"),
        "template <typename Visitor, typename T, std::enable_if_t<std::is_same_v<Point, std::remove_const_t<T>>, bool> = true>
constexpr void visit([[maybe_unused]] T& toVisit, [[maybe_unused]] Visitor&& visitor) {
    visitor(\"x\", toVisit.x);
    visitor(\"y\", toVisit.y);
}
"
    );
    assert!(!text.contains("static_cast"));
}

#[test]
fn field_visits_follow_declaration_order() {
    let mut frontend = MockFrontend::new().with_file(
        "order.hpp",
        tagged(
            VISITOR_TAG,
            "Order",
            vec![
                public("zeta", "int"),
                public("alpha", "float"),
                public("mid", "bool"),
            ],
        ),
    );
    let text = render(&mut frontend, &config(&["order.hpp"]));

    assert!(text.contains("using type = std::tuple<int, float, bool>;"));
    let zeta = text.find("visitor(\"zeta\", toVisit.zeta)").unwrap();
    let alpha = text.find("visitor(\"alpha\", toVisit.alpha)").unwrap();
    let mid = text.find("visitor(\"mid\", toVisit.mid)").unwrap();
    assert!(zeta < alpha && alpha < mid);
}

#[test]
fn inherited_fields_flatten_base_first() {
    let mut frontend = MockFrontend::new().with_file(
        "derived.hpp",
        unit(vec![
            tagged(
                VISITOR_TAG,
                "Base",
                vec![public("a", "int"), public("b", "double")],
            ),
            tagged(VISITOR_TAG, "Derived", vec![base("Base"), public("c", "char")]),
        ]),
    );
    let text = render(&mut frontend, &config(&["derived.hpp"]));

    assert!(text.contains("struct TupleType<Derived> {\n    using type = std::tuple<int, double, char>;"));
    // Only the derived type's own fields are visited directly.
    let visit = visit_fn(&text, "Derived");
    assert!(visit.contains("const Base, Base>&>(toVisit), visitor);\n    visitor(\"c\", toVisit.c);"));
    assert!(!visit.contains("toVisit.a"));
}

#[test]
fn multilevel_inheritance_flattens_depth_first() {
    let mut frontend = MockFrontend::new().with_file(
        "chain.hpp",
        unit(vec![
            tagged(VISITOR_TAG, "A", vec![public("a", "int")]),
            tagged(VISITOR_TAG, "B", vec![base("A"), public("b", "long")]),
            tagged(VISITOR_TAG, "C", vec![base("B"), public("c", "short")]),
        ]),
    );
    let text = render(&mut frontend, &config(&["chain.hpp"]));
    assert!(text.contains("struct TupleType<C> {\n    using type = std::tuple<int, long, short>;"));
}

#[test]
fn multiple_bases_dispatch_in_specifier_order() {
    let mut frontend = MockFrontend::new().with_file(
        "multi.hpp",
        unit(vec![
            tagged(VISITOR_TAG, "B1", vec![public("one", "int")]),
            tagged(VISITOR_TAG, "B2", vec![public("two", "int")]),
            tagged(
                VISITOR_TAG,
                "Derived",
                vec![base("B1"), base("B2"), public("own", "int")],
            ),
        ]),
    );
    let text = render(&mut frontend, &config(&["multi.hpp"]));
    let visit = visit_fn(&text, "Derived");

    let b1 = visit.find("const B1, B1>&>(toVisit)").unwrap();
    let b2 = visit.find("const B2, B2>&>(toVisit)").unwrap();
    let own = visit.find("visitor(\"own\", toVisit.own)").unwrap();
    assert!(b1 < b2 && b2 < own);

    let b1 = text.find("Acceptor<B1, Visitor>::visitType").unwrap();
    let b2 = text.find("Acceptor<B2, Visitor>::visitType").unwrap();
    assert!(b1 < b2);
}

#[test]
fn unannotated_base_is_skipped_not_fatal() {
    let mut frontend = MockFrontend::new().with_file(
        "child.hpp",
        unit(vec![
            DeclNode::aggregate("Plain", vec![public("hidden", "int")]),
            tagged(VISITOR_TAG, "Child", vec![base("Plain"), public("shown", "int")]),
        ]),
    );
    let text = render(&mut frontend, &config(&["child.hpp"]));

    assert!(text.contains("struct TupleType<Child> {\n    using type = std::tuple<int>;"));
    assert!(text.contains("// skipping unannotated base class Plain"));
    assert!(text.contains("visitor(\"shown\", toVisit.shown);"));
    assert!(!text.contains("hidden"));
}

#[test]
fn unrelated_markers_are_ignored() {
    let mut frontend = MockFrontend::new().with_file(
        "mixed.hpp",
        unit(vec![
            tagged("OTHER_TOOL: serialize", "Foreign", vec![public("f", "int")]),
            tagged(VISITOR_TAG, "Mine", vec![public("m", "int")]),
        ]),
    );
    let config = config(&["mixed.hpp"]);
    let batch = vgc::collect_batch(&mut frontend, &config).unwrap();
    assert_eq!(batch.stats.structures, 1);
    assert!(batch.registry.lookup_structure("Foreign").is_none());

    let text = render(&mut frontend, &config);
    assert!(text.contains("TupleType<Mine>"));
    assert!(!text.contains("Foreign"));
}

#[test]
fn other_pass_declarations_are_collected_but_not_emitted() {
    let mut frontend = MockFrontend::new().with_file(
        "passes.hpp",
        unit(vec![
            tagged(META_TAG, "MetaOnly", vec![public("a", "int")]),
            tagged(VISITOR_TAG, "VisitOnly", vec![public("b", "int")]),
        ]),
    );
    let visitor_config = config(&["passes.hpp"]);
    let text = render(&mut frontend, &visitor_config);
    assert!(text.contains("TupleType<VisitOnly>"));
    assert!(!text.contains("MetaOnly"));

    let meta_config = vgc::GenerateConfig {
        generator: vg_emit::GeneratorKind::Meta,
        ..config(&["passes.hpp"])
    };
    let text = render(&mut frontend, &meta_config);
    assert!(text.contains("struct MetaStructInternal<MetaOnly> {"));
    assert!(text.contains("#include <visigen/visigen_meta.hpp>"));
    assert!(!text.contains("VisitOnly"));
}

#[test]
fn enumerators_keep_declaration_order_and_values() {
    let mut frontend = MockFrontend::new().with_file(
        "enum.hpp",
        tagged_enum(VISITOR_TAG, "ns::Letters", &[("A", 5), ("B", 2), ("C", 9)]),
    );
    let text = render(&mut frontend, &config(&["enum.hpp"]));

    assert!(text.contains(
        "        visitor(ns::Letters::A, \"A\", std::underlying_type_t<ns::Letters>{5});
        visitor(ns::Letters::B, \"B\", std::underlying_type_t<ns::Letters>{2});
        visitor(ns::Letters::C, \"C\", std::underlying_type_t<ns::Letters>{9});
"
    ));
}

#[test]
fn non_public_members_are_not_visited() {
    let mut frontend = MockFrontend::new().with_file(
        "access.hpp",
        tagged(
            VISITOR_TAG,
            "Guarded",
            vec![
                public("open", "int"),
                DeclNode::field("family", Access::Protected, "int"),
                DeclNode::field("secret", Access::Private, "int"),
            ],
        ),
    );
    let text = render(&mut frontend, &config(&["access.hpp"]));
    assert!(text.contains("std::tuple<int>;"));
    assert!(!text.contains("family"));
    assert!(!text.contains("secret"));
}

#[test]
fn empty_selection_still_yields_complete_header() {
    let mut frontend = MockFrontend::new().with_file(
        "nothing.hpp",
        unit(vec![DeclNode::aggregate("Plain", vec![public("x", "int")])]),
    );
    let config = vgc::GenerateConfig {
        namespace: "reflect".to_owned(),
        ..config(&["nothing.hpp"])
    };
    let text = render(&mut frontend, &config);
    assert!(text.starts_with("#pragma once\n"));
    assert!(text.ends_with("namespace reflect {\n\n} // namespace reflect\n"));
}
