use super::*;
use crate::pipeline::collect_batch;
use crate::testing::mocks::{base, public, tagged, tagged_enum, unit, MockFrontend, VISITOR_TAG};
use pretty_assertions::assert_eq;
use vg_emit::GeneratorKind;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn parse(list: &[&str]) -> CliOptions {
    match parse_cli_options(&args(list)) {
        Ok(options) => options,
        Err(err) => panic!("{list:?} should parse: {err}"),
    }
}

#[test]
fn test_defaults() {
    let options = parse(&["-i", "a.hpp"]);
    assert_eq!(options.config.inputs, vec![PathBuf::from("a.hpp")]);
    assert_eq!(options.config.output, None);
    assert_eq!(options.config.namespace, "visigen");
    assert_eq!(options.config.marker, "VISIGEN_GEN");
    assert_eq!(options.config.generator, GeneratorKind::Visitor);
    assert!(!options.json);
}

#[test]
fn test_full_command_line() {
    let options = parse(&[
        "-i",
        "a.hpp",
        "b.hpp",
        "-o",
        "out/generated.hpp",
        "--flags=-Iinclude -std=c++17",
        "--namespace=reflect",
        "--libclang=/usr/lib/llvm-14/lib",
        "--generator=meta",
        "--marker=REFLECT",
    ]);
    let config = &options.config;
    assert_eq!(
        config.inputs,
        vec![PathBuf::from("a.hpp"), PathBuf::from("b.hpp")]
    );
    assert_eq!(config.output, Some(PathBuf::from("out/generated.hpp")));
    assert_eq!(config.flags, "-Iinclude -std=c++17");
    assert_eq!(config.namespace, "reflect");
    assert_eq!(
        config.frontend.library_path,
        Some(PathBuf::from("/usr/lib/llvm-14/lib"))
    );
    assert_eq!(config.generator, GeneratorKind::Meta);
    assert_eq!(config.marker, "REFLECT");
}

#[test]
fn test_repeated_inputs_accumulate() {
    let options = parse(&["-i", "a.hpp", "--json", "--input-files", "b.hpp", "--output=x.hpp"]);
    assert_eq!(
        options.config.inputs,
        vec![PathBuf::from("a.hpp"), PathBuf::from("b.hpp")]
    );
    assert_eq!(options.config.output, Some(PathBuf::from("x.hpp")));
    assert!(options.json);
}

#[test]
fn test_rejects_bad_arguments() {
    for bad in [
        &["-i"][..],
        &["-i", "a.hpp", "-o"][..],
        &["-i", "a.hpp", "--generator=json"][..],
        &["-i", "a.hpp", "--namespace="][..],
        &["-i", "a.hpp", "--verbose"][..],
    ] {
        assert!(
            matches!(parse_cli_options(&args(bad)), Err(GenerateError::Config(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_dump_text() {
    let mut frontend = MockFrontend::new().with_file(
        "shapes.hpp",
        unit(vec![
            tagged(VISITOR_TAG, "geo::Shape", vec![public("id", "int")]),
            tagged(
                VISITOR_TAG,
                "geo::Circle",
                vec![
                    base("geo::Shape"),
                    base("geo::Drawable"),
                    public("radius", "double"),
                    vg_ir::DeclNode::field("cache", vg_ir::Access::Private, "float"),
                ],
            ),
            tagged_enum(VISITOR_TAG, "geo::Kind", &[("Round", 1), ("Square", 4)]),
        ]),
    );
    let config = GenerateConfig {
        inputs: vec![PathBuf::from("shapes.hpp")],
        ..GenerateConfig::default()
    };
    let Ok(batch) = collect_batch(&mut frontend, &config) else {
        panic!("batch should collect");
    };
    let Ok(text) = render_dump(&batch, false) else {
        panic!("dump should render");
    };

    assert_eq!(
        text,
        "struct geo::Shape [VISIGEN_GEN: Reflection Visitor]
    public id: int
struct geo::Circle [VISIGEN_GEN: Reflection Visitor]
    base geo::Shape (resolved)
    base geo::Drawable (unresolved)
    public radius: double
    private cache: float
enum geo::Kind [VISIGEN_GEN: Reflection Visitor]
    Round = 1
    Square = 4
1 file(s): 2 structure(s), 1 enumeration(s), 0 duplicate(s), 1 resolved and 1 unresolved base(s)
"
    );
}

#[test]
fn test_dump_json() {
    let mut frontend = MockFrontend::new().with_file(
        "a.hpp",
        tagged(VISITOR_TAG, "Point", vec![public("x", "int"), public("y", "int")]),
    );
    let config = GenerateConfig {
        inputs: vec![PathBuf::from("a.hpp")],
        ..GenerateConfig::default()
    };
    let Ok(batch) = collect_batch(&mut frontend, &config) else {
        panic!("batch should collect");
    };
    let Ok(text) = render_dump(&batch, true) else {
        panic!("dump should render");
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
        panic!("dump should be valid JSON: {text}");
    };

    assert_eq!(value["stats"]["structures"], 1);
    assert_eq!(value["structures"][0]["qualified_name"], "Point");
    assert_eq!(value["structures"][0]["public_fields"]["y"], "int");
    assert_eq!(value["enumerations"].as_array().map(Vec::len), Some(0));
}
