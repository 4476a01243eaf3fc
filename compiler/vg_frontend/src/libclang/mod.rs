//! libclang-backed frontend.
//!
//! Lowering keeps only what the collector reads: definitions of structs,
//! classes and enums, their fields, base specifiers, enumerators and
//! annotation attributes. Every other entity becomes a [`DeclNode::Scope`]
//! around its lowered children, and scopes that end up empty are dropped.
//! Type spellings are canonical so that a base named through an alias or a
//! namespace-relative name matches the registry key of its definition.

use std::env;
use std::path::Path;

use clang::diagnostic::Severity as ClangSeverity;
use clang::{Accessibility, Clang, Entity, EntityKind, Index, TypeKind};
use vg_diagnostic::{Diagnostic, Severity};
use vg_ir::{
    Access, AggregateDecl, Annotation, BaseSpecifier, DeclNode, EnumDecl, EnumeratorDecl,
    FieldDecl, ScopeDecl, SourceLocation,
};

use crate::{Frontend, FrontendConfig, FrontendError, ParseRequest, ParsedUnit};

/// Environment variable the libclang loader searches first.
const LIBRARY_PATH_VAR: &str = "LIBCLANG_PATH";

/// Frontend parsing C++ through a runtime-loaded libclang.
///
/// libclang allows one loaded instance per process, so there should be at
/// most one `ClangFrontend` alive at a time.
pub struct ClangFrontend {
    clang: Clang,
}

impl ClangFrontend {
    /// Load libclang, from `config.library_path` when given.
    ///
    /// The loader only reads its location from `LIBCLANG_PATH`, so a
    /// configured path is exported for the duration of the load and the
    /// previous value is restored afterwards. Other threads reading the
    /// environment meanwhile observe the override.
    pub fn new(config: &FrontendConfig) -> Result<Self, FrontendError> {
        let clang = with_library_path(config.library_path.as_deref(), Clang::new)
            .map_err(FrontendError::Unavailable)?;
        Ok(ClangFrontend { clang })
    }
}

/// Run `load` with `LIBCLANG_PATH` pointing at `dir`, then put the variable
/// back the way it was.
fn with_library_path<T>(dir: Option<&Path>, load: impl FnOnce() -> T) -> T {
    let Some(dir) = dir else {
        return load();
    };
    tracing::debug!(path = %dir.display(), "using configured libclang location");
    let previous = env::var_os(LIBRARY_PATH_VAR);
    env::set_var(LIBRARY_PATH_VAR, dir);
    let loaded = load();
    match previous {
        Some(value) => env::set_var(LIBRARY_PATH_VAR, value),
        None => env::remove_var(LIBRARY_PATH_VAR),
    }
    loaded
}

impl Frontend for ClangFrontend {
    #[tracing::instrument(level = "debug", skip_all, fields(path = %request.path.display()))]
    fn parse(&mut self, request: &ParseRequest<'_>) -> Result<ParsedUnit, FrontendError> {
        let index = Index::new(&self.clang, false, false);
        let unit = index
            .parser(request.path)
            .arguments(request.args)
            .skip_function_bodies(request.options.skip_function_bodies)
            .parse()
            .map_err(|err| FrontendError::Parse {
                path: request.path.to_path_buf(),
                message: err.to_string(),
            })?;

        let diagnostics: Vec<Diagnostic> = unit
            .get_diagnostics()
            .iter()
            .map(|diagnostic| {
                let severity = match diagnostic.get_severity() {
                    ClangSeverity::Ignored => Severity::Ignored,
                    ClangSeverity::Note => Severity::Note,
                    ClangSeverity::Warning => Severity::Warning,
                    ClangSeverity::Error => Severity::Error,
                    ClangSeverity::Fatal => Severity::Fatal,
                };
                let lowered = Diagnostic::new(severity, diagnostic.get_text());
                let location = diagnostic.get_location().get_file_location();
                match location.file {
                    Some(file) => lowered.with_location(SourceLocation::new(
                        file.get_path(),
                        location.line,
                        location.column,
                    )),
                    None => lowered,
                }
            })
            .collect();

        let lowering = Lowering { path: request.path };
        let children = lowering.lower_children(&unit.get_entity(), "")?;
        tracing::debug!(
            diagnostics = diagnostics.len(),
            top_level = children.len(),
            "lowered translation unit"
        );

        Ok(ParsedUnit {
            root: DeclNode::Scope(ScopeDecl { children }),
            diagnostics,
        })
    }
}

struct Lowering<'p> {
    path: &'p Path,
}

impl Lowering<'_> {
    /// `owner` is the qualified name of the innermost enclosing aggregate or
    /// enumeration, used only in error messages.
    fn lower_children(&self, entity: &Entity<'_>, owner: &str) -> Result<Vec<DeclNode>, FrontendError> {
        let mut lowered = Vec::new();
        for child in entity.get_children() {
            if let Some(node) = self.lower(&child, owner)? {
                lowered.push(node);
            }
        }
        Ok(lowered)
    }

    fn lower(&self, entity: &Entity<'_>, owner: &str) -> Result<Option<DeclNode>, FrontendError> {
        let node = match entity.get_kind() {
            EntityKind::StructDecl | EntityKind::ClassDecl if entity.is_definition() => {
                let Some(qualified_name) = canonical_spelling(entity) else {
                    return self.lower_scope(entity, owner);
                };
                let children = self.lower_children(entity, &qualified_name)?;
                DeclNode::Aggregate(AggregateDecl {
                    name: entity.get_name(),
                    qualified_name,
                    children,
                })
            }
            EntityKind::EnumDecl if entity.is_definition() => {
                let Some(qualified_name) = canonical_spelling(entity) else {
                    return self.lower_scope(entity, owner);
                };
                let children = self.lower_children(entity, &qualified_name)?;
                DeclNode::Enumeration(EnumDecl {
                    name: entity.get_name(),
                    qualified_name,
                    children,
                })
            }
            EntityKind::FieldDecl => {
                // Unnamed bit-fields pad the layout and cannot be accessed.
                let Some(name) = entity.get_name().filter(|name| !name.is_empty()) else {
                    return Ok(None);
                };
                let Some(type_name) = canonical_spelling(entity) else {
                    return Err(FrontendError::MissingType {
                        path: self.path.to_path_buf(),
                        owner: owner.to_owned(),
                        field: name,
                    });
                };
                DeclNode::Field(FieldDecl {
                    name,
                    access: lower_access(entity.get_accessibility()),
                    type_name,
                })
            }
            EntityKind::BaseSpecifier => {
                let Some(type_name) = canonical_spelling(entity) else {
                    return Err(FrontendError::MissingType {
                        path: self.path.to_path_buf(),
                        owner: owner.to_owned(),
                        field: entity.get_display_name().unwrap_or_default(),
                    });
                };
                DeclNode::BaseSpecifier(BaseSpecifier {
                    type_name,
                    access: lower_access(entity.get_accessibility()),
                })
            }
            EntityKind::EnumConstantDecl => {
                let name = entity.get_name().unwrap_or_default();
                let Some(value) = enumerator_value(entity) else {
                    return Err(FrontendError::MissingValue {
                        path: self.path.to_path_buf(),
                        owner: owner.to_owned(),
                        enumerator: name,
                    });
                };
                DeclNode::Enumerator(EnumeratorDecl { name, value })
            }
            EntityKind::AnnotateAttr => DeclNode::Annotation(Annotation {
                text: entity.get_name().unwrap_or_default(),
            }),
            _ => return self.lower_scope(entity, owner),
        };
        Ok(Some(node))
    }

    fn lower_scope(&self, entity: &Entity<'_>, owner: &str) -> Result<Option<DeclNode>, FrontendError> {
        let children = self.lower_children(entity, owner)?;
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(DeclNode::Scope(ScopeDecl { children })))
    }
}

fn canonical_spelling(entity: &Entity<'_>) -> Option<String> {
    entity
        .get_type()
        .map(|ty| ty.get_canonical_type().get_display_name())
        .filter(|spelling| !spelling.is_empty())
}

/// The enumerator's value read with the signedness of its enumeration's
/// underlying type. libclang sign-extends at the underlying width, so an
/// unsigned value with its top bit set must come from the unsigned half.
fn enumerator_value(entity: &Entity<'_>) -> Option<i128> {
    let (signed, unsigned) = entity.get_enum_constant_value()?;
    let is_unsigned = entity
        .get_semantic_parent()
        .and_then(|parent| parent.get_enum_underlying_type())
        .is_some_and(|ty| is_unsigned_kind(ty.get_canonical_type().get_kind()));
    Some(if is_unsigned {
        i128::from(unsigned)
    } else {
        i128::from(signed)
    })
}

fn is_unsigned_kind(kind: TypeKind) -> bool {
    matches!(
        kind,
        TypeKind::Bool
            | TypeKind::CharU
            | TypeKind::UChar
            | TypeKind::Char16
            | TypeKind::Char32
            | TypeKind::UShort
            | TypeKind::UInt
            | TypeKind::ULong
            | TypeKind::ULongLong
            | TypeKind::UInt128
    )
}

fn lower_access(accessibility: Option<Accessibility>) -> Access {
    match accessibility {
        Some(Accessibility::Private) => Access::Private,
        Some(Accessibility::Protected) => Access::Protected,
        Some(Accessibility::Public) | None => Access::Public,
    }
}
