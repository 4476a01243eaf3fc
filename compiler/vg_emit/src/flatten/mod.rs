//! Inheritance flattening.

use vg_ir::{Registry, StructId};

/// Canonical types of every public field visible on `id`, inherited ones
/// included.
///
/// Resolved bases are flattened depth-first in specifier order before the
/// structure's own public fields. Unresolved bases contribute nothing. A
/// base reached twice through different paths contributes twice, matching
/// non-virtual inheritance; a base that leads back to a structure already on
/// the current path is cut off.
pub fn flatten_public_types(registry: &Registry, id: StructId) -> Vec<&str> {
    let mut types = Vec::new();
    let mut path = Vec::new();
    flatten_into(registry, id, &mut path, &mut types);
    types
}

fn flatten_into<'r>(
    registry: &'r Registry,
    id: StructId,
    path: &mut Vec<StructId>,
    out: &mut Vec<&'r str>,
) {
    if path.contains(&id) {
        tracing::warn!(
            structure = %registry.structure(id).qualified_name,
            "inheritance cycle while flattening fields"
        );
        return;
    }
    path.push(id);

    let structure = registry.structure(id);
    for link in structure.base_classes.values() {
        if let Some(base) = link.resolved() {
            flatten_into(registry, base, path, out);
        }
    }
    out.extend(structure.public_fields.values().map(String::as_str));

    path.pop();
}

/// Every structure in discovery order, except that each resolved base is
/// moved ahead of the structures derived from it.
///
/// Generated code refers to a base's declarations from the derived type's
/// body, and C++ only finds declarations that precede the point of use.
/// Cycles are cut at the structure already on the current path.
pub fn bases_first_order(registry: &Registry) -> Vec<StructId> {
    let mut order = Vec::with_capacity(registry.structure_count());
    let mut placed = vec![false; registry.structure_count()];
    let mut path = Vec::new();
    for (id, _) in registry.structures() {
        place(registry, id, &mut path, &mut placed, &mut order);
    }
    order
}

fn place(
    registry: &Registry,
    id: StructId,
    path: &mut Vec<StructId>,
    placed: &mut [bool],
    order: &mut Vec<StructId>,
) {
    if placed[id.index()] || path.contains(&id) {
        return;
    }
    path.push(id);
    for link in registry.structure(id).base_classes.values() {
        if let Some(base) = link.resolved() {
            place(registry, base, path, placed, order);
        }
    }
    path.pop();

    placed[id.index()] = true;
    order.push(id);
}
