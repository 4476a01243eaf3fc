//! Parser boundary.
//!
//! The generator never parses C++ itself. A [`Frontend`] turns one input
//! file into a lowered [`DeclNode`] tree plus the parser's diagnostics; the
//! driver decides what to do with both.
//!
//! With the `libclang` feature (on by default) [`ClangFrontend`] provides
//! the implementation, loading libclang at runtime.

#[cfg(feature = "libclang")]
mod libclang;

use std::path::{Path, PathBuf};

use thiserror::Error;
use vg_diagnostic::Diagnostic;
use vg_ir::DeclNode;

#[cfg(feature = "libclang")]
pub use crate::libclang::ClangFrontend;

/// Preprocessor definition appended to every parse, letting sources hide
/// code that depends on headers not generated yet.
pub const GENERATION_DEFINE: &str = "VISIGEN_GENERATION";

/// Options passed to the parser for every file of a batch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseOptions {
    /// Skip function bodies; declarations are all the generator needs.
    pub skip_function_bodies: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            skip_function_bodies: true,
        }
    }
}

/// One file to parse.
#[derive(Clone, Debug)]
pub struct ParseRequest<'a> {
    pub path: &'a Path,
    /// Compiler-style arguments: include paths, definitions, standard.
    pub args: &'a [String],
    pub options: ParseOptions,
}

/// The lowered tree of one file and everything the parser reported on it.
#[derive(Clone, Debug)]
pub struct ParsedUnit {
    pub root: DeclNode,
    pub diagnostics: Vec<Diagnostic>,
}

/// Where to find the parser library.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct FrontendConfig {
    /// Directory (or full path) of the shared library; the loader's own
    /// search applies when `None`.
    pub library_path: Option<PathBuf>,
}

/// Errors that prevent a frontend from producing a tree at all.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("failed to load the parser library: {0}")]
    Unavailable(String),

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{}: field `{field}` of `{owner}` has no resolvable type", .path.display())]
    MissingType {
        path: PathBuf,
        owner: String,
        field: String,
    },

    #[error("{}: enumerator `{enumerator}` of `{owner}` has no value", .path.display())]
    MissingValue {
        path: PathBuf,
        owner: String,
        enumerator: String,
    },
}

/// A parser that lowers source files into declaration trees.
pub trait Frontend {
    fn parse(&mut self, request: &ParseRequest<'_>) -> Result<ParsedUnit, FrontendError>;
}

impl<F: Frontend + ?Sized> Frontend for &mut F {
    fn parse(&mut self, request: &ParseRequest<'_>) -> Result<ParsedUnit, FrontendError> {
        (**self).parse(request)
    }
}

impl<F: Frontend + ?Sized> Frontend for Box<F> {
    fn parse(&mut self, request: &ParseRequest<'_>) -> Result<ParsedUnit, FrontendError> {
        (**self).parse(request)
    }
}
