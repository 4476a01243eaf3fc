//! Whole-batch behavior.

use std::fs;

use pretty_assertions::assert_eq;
use vg_diagnostic::Diagnostic;
use vg_emit::without_stamp;
use vg_ir::SourceLocation;
use vgc::testing::mocks::{base, public, tagged, unit, MockFrontend, VISITOR_TAG};
use vgc::{generate, GenerateConfig, GenerateError};

use crate::common::{config, render, section};

fn shapes_frontend() -> MockFrontend {
    MockFrontend::new()
        .with_file(
            "derived.hpp",
            unit(vec![tagged(
                VISITOR_TAG,
                "geo::Circle",
                vec![base("geo::Shape"), public("radius", "double")],
            )]),
        )
        .with_file(
            "base.hpp",
            unit(vec![tagged(VISITOR_TAG, "geo::Shape", vec![public("id", "int")])]),
        )
}

fn broken_frontend() -> MockFrontend {
    MockFrontend::new()
        .with_file(
            "good.hpp",
            tagged(VISITOR_TAG, "Good", vec![public("x", "int")]),
        )
        .with_diagnostics(
            "broken.hpp",
            unit(Vec::new()),
            vec![Diagnostic::error("expected ';' after struct")
                .with_location(SourceLocation::new("broken.hpp", 3, 2))],
        )
}

#[test]
fn reruns_differ_only_in_stamp() {
    let live_stamp = GenerateConfig {
        stamp: None,
        ..config(&["base.hpp", "derived.hpp"])
    };
    let first = render(&mut shapes_frontend(), &live_stamp);
    let second = render(&mut shapes_frontend(), &live_stamp);
    assert_eq!(without_stamp(&first), without_stamp(&second));

    let pinned = config(&["base.hpp", "derived.hpp"]);
    assert_eq!(
        render(&mut shapes_frontend(), &pinned),
        render(&mut shapes_frontend(), &pinned)
    );
}

#[test]
fn bases_resolve_across_files_in_any_order() {
    for inputs in [["derived.hpp", "base.hpp"], ["base.hpp", "derived.hpp"]] {
        let text = render(&mut shapes_frontend(), &config(&inputs));
        assert!(
            text.contains("struct TupleType<geo::Circle> {\n    using type = std::tuple<int, double>;"),
            "inputs {inputs:?}:\n{text}"
        );
        assert!(
            section(&text, "struct Acceptor<geo::Circle, Visitor>")
                .contains("Acceptor<geo::Shape, Visitor>::visitType"),
            "inputs {inputs:?}"
        );
        assert!(!text.contains("skipping"), "inputs {inputs:?}");

        let shape = text.find("std::is_same_v<geo::Shape, ");
        let circle = text.find("std::is_same_v<geo::Circle, ");
        assert!(
            shape.is_some() && shape < circle,
            "base visit must precede derived visit for inputs {inputs:?}:\n{text}"
        );
    }
}

#[test]
fn fatal_diagnostic_reports_file_and_text() {
    let mut frontend = broken_frontend();
    let result = vgc::collect_batch(&mut frontend, &config(&["good.hpp", "broken.hpp"]));

    let Err(err @ GenerateError::FatalDiagnostics { .. }) = result else {
        panic!("an error diagnostic must abort the batch");
    };
    assert_eq!(
        err.to_string(),
        "code generation failed: broken.hpp reported 1 fatal diagnostic"
    );
    let GenerateError::FatalDiagnostics { diagnostics, .. } = &err else {
        unreachable!()
    };
    assert_eq!(
        diagnostics[0].to_string(),
        "broken.hpp:3:2: error: expected ';' after struct"
    );
}

#[test]
fn fatal_diagnostic_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("generated.hpp");
    fs::write(&out, "// previous run\n").unwrap();

    let config = GenerateConfig {
        output: Some(out.clone()),
        ..config(&["good.hpp", "broken.hpp"])
    };
    let result = generate(&mut broken_frontend(), &config);

    assert!(matches!(result, Err(GenerateError::FatalDiagnostics { .. })));
    assert_eq!(fs::read_to_string(&out).unwrap(), "// previous run\n");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn fatal_diagnostic_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("generated.hpp");

    let config = GenerateConfig {
        output: Some(out.clone()),
        ..config(&["broken.hpp"])
    };
    assert!(generate(&mut broken_frontend(), &config).is_err());
    assert!(!out.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn generate_overwrites_destination_in_full() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("include").join("generated.hpp");
    fs::create_dir_all(out.parent().unwrap()).unwrap();
    fs::write(&out, "stale contents that are much longer than nothing at all\n".repeat(100)).unwrap();

    let config = GenerateConfig {
        output: Some(out.clone()),
        ..config(&["base.hpp", "derived.hpp"])
    };
    let stats = generate(&mut shapes_frontend(), &config).unwrap();
    assert_eq!(stats.structures, 2);

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, render(&mut shapes_frontend(), &config));
    assert!(!written.contains("stale"));
}
