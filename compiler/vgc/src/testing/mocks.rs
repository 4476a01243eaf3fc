//! In-memory frontend and tree builders.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use vg_diagnostic::Diagnostic;
use vg_frontend::{Frontend, FrontendError, ParseRequest, ParsedUnit};
use vg_ir::{Access, DeclNode};

pub const VISITOR_TAG: &str = "VISIGEN_GEN: Reflection Visitor";
pub const META_TAG: &str = "VISIGEN_GEN: Reflection Meta";

/// A frontend serving pre-built trees keyed by path.
///
/// Records every request so tests can check what was parsed and with which
/// arguments.
#[derive(Default)]
pub struct MockFrontend {
    files: FxHashMap<PathBuf, ParsedUnit>,
    requests: Vec<(PathBuf, Vec<String>)>,
}

impl MockFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `root` for `path` with no diagnostics.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, root: DeclNode) -> Self {
        self.with_diagnostics(path, root, Vec::new())
    }

    /// Serve `root` for `path` together with `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(
        mut self,
        path: impl Into<PathBuf>,
        root: DeclNode,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        self.files
            .insert(path.into(), ParsedUnit { root, diagnostics });
        self
    }

    /// Paths parsed so far, in request order.
    pub fn parsed(&self) -> Vec<&Path> {
        self.requests.iter().map(|(path, _)| path.as_path()).collect()
    }

    /// Arguments of the most recent request.
    pub fn last_args(&self) -> Option<&[String]> {
        self.requests.last().map(|(_, args)| args.as_slice())
    }
}

impl Frontend for MockFrontend {
    fn parse(&mut self, request: &ParseRequest<'_>) -> Result<ParsedUnit, FrontendError> {
        self.requests
            .push((request.path.to_path_buf(), request.args.to_vec()));
        self.files
            .get(request.path)
            .cloned()
            .ok_or_else(|| FrontendError::Parse {
                path: request.path.to_path_buf(),
                message: "no such file".to_owned(),
            })
    }
}

/// An aggregate annotated with `tag`, members following the annotation.
pub fn tagged(tag: &str, qualified_name: &str, mut members: Vec<DeclNode>) -> DeclNode {
    members.insert(0, DeclNode::annotation(tag));
    DeclNode::aggregate(qualified_name, members)
}

/// An enumeration annotated with `tag`.
pub fn tagged_enum(tag: &str, qualified_name: &str, enumerators: &[(&str, i128)]) -> DeclNode {
    let mut children = vec![DeclNode::annotation(tag)];
    children.extend(
        enumerators
            .iter()
            .map(|&(name, value)| DeclNode::enumerator(name, value)),
    );
    DeclNode::enumeration(qualified_name, children)
}

pub fn public(name: &str, ty: &str) -> DeclNode {
    DeclNode::field(name, Access::Public, ty)
}

pub fn base(qualified_name: &str) -> DeclNode {
    DeclNode::base(qualified_name, Access::Public)
}

/// A translation unit holding `decls`.
pub fn unit(decls: Vec<DeclNode>) -> DeclNode {
    DeclNode::scope(decls)
}
