//! visigen driver.
//!
//! Runs one generation batch over a set of C++ inputs:
//!
//! ```text
//! GenerateConfig
//!     │
//!     ▼
//! collect_batch() ── Frontend::parse per file, fatal check, Collector
//!     │                 then resolve_bases once
//!     ▼
//! generate() ─────── Emitter into a staged file, persisted on success
//! ```
//!
//! The parser is reached only through [`vg_frontend::Frontend`], so the whole
//! pipeline runs against [`testing::mocks::MockFrontend`] in tests.

pub mod commands;
pub mod config;
pub mod error;
mod output;
pub mod pipeline;
pub mod testing;
mod tracing_setup;

pub use config::{GenerateConfig, DEFAULT_MARKER, DEFAULT_NAMESPACE};
pub use error::GenerateError;
pub use pipeline::{collect_batch, generate, render_into, Batch, BatchStats};
pub use tracing_setup::init_tracing;
