//! Collection and resolution phases.
//!
//! ```text
//! DeclNode ──collect──► Registry ──resolve_bases──► Registry (settled)
//! ```
//!
//! `Collector::collect` runs once per parsed file and accumulates into one
//! shared `Registry`. `resolve_bases` runs once per batch, after every file has
//! been collected, so the order of input files never affects which bases
//! resolve.

mod collect;
mod resolve;

pub use collect::{CollectStats, Collector};
pub use resolve::{resolve_bases, ResolveStats};
