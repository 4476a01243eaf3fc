//! Declaration collector.
//!
//! Walks a lowered tree in preorder and registers every aggregate or
//! enumeration carrying an annotation whose text contains the configured
//! marker. Only *direct* children are inspected for the annotation and for
//! members; nested types are picked up by the walk itself, never through
//! their parent's member scan.

use vg_ir::{AggregateDecl, DeclNode, EnumDecl, Enumeration, Registry, Structure};

/// Counts from one `Collector::collect` call.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct CollectStats {
    pub structures: usize,
    pub enumerations: usize,
    /// Annotated declarations whose qualified name was already registered.
    pub duplicates: usize,
}

/// Finds annotated declarations in a declaration tree.
#[derive(Clone, Debug)]
pub struct Collector {
    marker: String,
}

impl Collector {
    /// Create a collector selecting annotations that contain `marker`.
    pub fn new(marker: impl Into<String>) -> Self {
        Collector {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Register every annotated declaration under `root` into `registry`.
    #[tracing::instrument(level = "debug", skip_all, fields(marker = %self.marker))]
    pub fn collect(&self, root: &DeclNode, registry: &mut Registry) -> CollectStats {
        let mut stats = CollectStats::default();
        for node in root.preorder() {
            match node {
                DeclNode::Aggregate(decl) => {
                    if let Some(tag) = self.find_annotation(&decl.children) {
                        let structure = collect_structure(decl, tag);
                        register_structure(registry, structure, &mut stats);
                    }
                }
                DeclNode::Enumeration(decl) => {
                    if let Some(tag) = self.find_annotation(&decl.children) {
                        let enumeration = collect_enumeration(decl, tag);
                        register_enumeration(registry, enumeration, &mut stats);
                    }
                }
                DeclNode::Scope(_)
                | DeclNode::Field(_)
                | DeclNode::BaseSpecifier(_)
                | DeclNode::Enumerator(_)
                | DeclNode::Annotation(_) => {}
            }
        }
        stats
    }

    /// First direct annotation child whose text contains the marker.
    fn find_annotation<'a>(&self, children: &'a [DeclNode]) -> Option<&'a str> {
        children.iter().find_map(|child| match child {
            DeclNode::Annotation(annotation) if annotation.text.contains(&self.marker) => {
                Some(annotation.text.as_str())
            }
            _ => None,
        })
    }
}

fn collect_structure(decl: &AggregateDecl, tag: &str) -> Structure {
    let mut structure = Structure::new(&decl.qualified_name, decl.name.clone(), tag);
    for child in &decl.children {
        match child {
            DeclNode::Field(field) => {
                if !structure.add_field(&field.name, field.access, &field.type_name) {
                    tracing::warn!(
                        structure = %decl.qualified_name,
                        field = %field.name,
                        "duplicate field name, keeping the first"
                    );
                }
            }
            DeclNode::BaseSpecifier(base) => {
                structure.add_base(&base.type_name);
            }
            DeclNode::Scope(_)
            | DeclNode::Aggregate(_)
            | DeclNode::Enumeration(_)
            | DeclNode::Enumerator(_)
            | DeclNode::Annotation(_) => {}
        }
    }
    structure
}

fn collect_enumeration(decl: &EnumDecl, tag: &str) -> Enumeration {
    let mut enumeration = Enumeration::new(&decl.qualified_name, decl.name.clone(), tag);
    for child in &decl.children {
        if let DeclNode::Enumerator(enumerator) = child {
            if !enumeration.add_enumerator(&enumerator.name, enumerator.value) {
                tracing::warn!(
                    enumeration = %decl.qualified_name,
                    enumerator = %enumerator.name,
                    "duplicate enumerator name, keeping the first"
                );
            }
        }
    }
    enumeration
}

fn register_structure(registry: &mut Registry, structure: Structure, stats: &mut CollectStats) {
    let name = structure.qualified_name.clone();
    let fields = structure.public_fields.len();
    let bases = structure.base_classes.len();
    if registry.insert_structure(structure).is_some() {
        tracing::debug!(structure = %name, fields, bases, "registered structure");
        stats.structures += 1;
    } else {
        tracing::debug!(structure = %name, "already registered, skipping");
        stats.duplicates += 1;
    }
}

fn register_enumeration(
    registry: &mut Registry,
    enumeration: Enumeration,
    stats: &mut CollectStats,
) {
    let name = enumeration.qualified_name.clone();
    let enumerators = enumeration.enumerators.len();
    if registry.insert_enumeration(enumeration).is_some() {
        tracing::debug!(enumeration = %name, enumerators, "registered enumeration");
        stats.enumerations += 1;
    } else {
        tracing::debug!(enumeration = %name, "already registered, skipping");
        stats.duplicates += 1;
    }
}
