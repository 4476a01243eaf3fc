//! Base-class resolution.

use vg_ir::{BaseLink, Registry, StructId};

/// Counts from one `resolve_bases` call.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ResolveStats {
    pub resolved: usize,
    pub unresolved: usize,
}

/// Settle every pending base-class entry in `registry`.
///
/// A base found in the registry becomes `Resolved`; anything else becomes
/// `Unresolved`. A structure naming itself as a base is never linked to
/// itself. Entries that are already settled are left alone, so running this
/// twice changes nothing.
#[tracing::instrument(level = "debug", skip_all, fields(structures = registry.structure_count()))]
pub fn resolve_bases(registry: &mut Registry) -> ResolveStats {
    let mut stats = ResolveStats::default();
    let ids: Vec<StructId> = registry.struct_ids().collect();

    for id in ids {
        let pending: Vec<String> = registry
            .structure(id)
            .base_classes
            .iter()
            .filter(|(_, link)| link.is_pending())
            .map(|(name, _)| name.clone())
            .collect();

        for base in pending {
            let link = match registry.lookup_structure(&base) {
                Some(base_id) if base_id == id => {
                    tracing::warn!(
                        structure = %registry.structure(id).qualified_name,
                        "structure names itself as a base class, ignoring"
                    );
                    BaseLink::Unresolved
                }
                Some(base_id) => BaseLink::Resolved(base_id),
                None => BaseLink::Unresolved,
            };

            match link {
                BaseLink::Resolved(_) => stats.resolved += 1,
                BaseLink::Unresolved | BaseLink::Pending => stats.unresolved += 1,
            }
            tracing::debug!(
                structure = %registry.structure(id).qualified_name,
                base = %base,
                resolved = link.resolved().is_some(),
                "settled base class"
            );
            registry.structure_mut(id).settle_base(&base, link);
        }
    }

    stats
}
