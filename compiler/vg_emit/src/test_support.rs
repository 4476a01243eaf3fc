//! Fixtures shared by the emitter tests.

use vg_collect::{resolve_bases, Collector};
use vg_ir::{Access, DeclNode, Registry, StructId};

pub const VISITOR_TAG: &str = "VISIGEN_GEN: Reflection Visitor";
pub const META_TAG: &str = "VISIGEN_GEN: Reflection Meta";

/// An aggregate annotated with `tag` whose members follow the annotation.
pub fn tagged(tag: &str, name: &str, mut members: Vec<DeclNode>) -> DeclNode {
    members.insert(0, DeclNode::annotation(tag));
    DeclNode::aggregate(name, members)
}

pub fn public(name: &str, ty: &str) -> DeclNode {
    DeclNode::field(name, Access::Public, ty)
}

pub fn base(name: &str) -> DeclNode {
    DeclNode::base(name, Access::Public)
}

/// Collect and resolve `files` as one batch.
pub fn registry_from(files: &[DeclNode]) -> Registry {
    let collector = Collector::new("VISIGEN_GEN");
    let mut registry = Registry::new();
    for root in files {
        collector.collect(root, &mut registry);
    }
    resolve_bases(&mut registry);
    registry
}

pub fn id_of(registry: &Registry, name: &str) -> StructId {
    let Some(id) = registry.lookup_structure(name) else {
        panic!("{name} should be registered");
    };
    id
}
