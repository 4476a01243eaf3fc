//! visigen IR - declaration tree and reflection model
//!
//! This crate contains the data structures shared by every phase of the
//! generator:
//! - `DeclNode`: the closed set of declaration kinds a parser frontend
//!   lowers its tree into
//! - `Structure` / `Enumeration`: the reflected declarations
//! - `Registry`: an arena holding one batch's declarations, keyed by
//!   qualified name and addressed by stable ids
//!
//! # Phases
//!
//! ```text
//! DeclNode (per file)
//!     │  collect
//!     ▼
//! Registry (bases Pending)
//!     │  resolve
//!     ▼
//! Registry (bases Resolved / Unresolved)
//!     │  emit
//!     ▼
//! generated header
//! ```
//!
//! Base relations are stored as `StructId` references into the registry
//! rather than as links between records, so a misdeclared hierarchy can never
//! produce a dangling or owning cycle.

mod decl;
mod location;
mod model;
mod registry;

pub use decl::{
    Access, AggregateDecl, Annotation, BaseSpecifier, DeclNode, EnumDecl, EnumeratorDecl,
    FieldDecl, Preorder, ScopeDecl,
};
pub use location::SourceLocation;
pub use model::{BaseLink, EnumId, Enumeration, StructId, Structure};
pub use registry::Registry;
