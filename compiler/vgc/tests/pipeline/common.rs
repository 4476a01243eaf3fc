//! Shared helpers for pipeline tests.

use std::path::PathBuf;

use vgc::testing::mocks::MockFrontend;
use vgc::{collect_batch, render_into, GenerateConfig};

/// Stamp pinned by `config` so whole headers can be compared.
pub const STAMP: &str = "2024-01-01 00:00:00.000000";

pub fn config(inputs: &[&str]) -> GenerateConfig {
    GenerateConfig {
        inputs: inputs.iter().map(PathBuf::from).collect(),
        stamp: Some(STAMP.to_owned()),
        ..GenerateConfig::default()
    }
}

/// Collect `config`'s inputs from `frontend` and render the header.
pub fn render(frontend: &mut MockFrontend, config: &GenerateConfig) -> String {
    let batch = collect_batch(frontend, config).expect("batch should collect");
    let (bytes, _) =
        render_into(Vec::new(), &batch.registry, config).expect("rendering into a Vec cannot fail");
    String::from_utf8(bytes).expect("generated header is UTF-8")
}

/// The text between `start` and the next blank line.
pub fn section<'a>(text: &'a str, start: &str) -> &'a str {
    let begin = text
        .find(start)
        .unwrap_or_else(|| panic!("`{start}` not found in:\n{text}"));
    let rest = &text[begin..];
    let end = rest.find("\n\n").map_or(rest.len(), |i| i + 1);
    &rest[..end]
}
