//! Per-batch arena of reflected declarations.

use rustc_hash::FxHashMap;

use crate::{EnumId, Enumeration, StructId, Structure};

/// All declarations collected from one batch of input files.
///
/// Records are stored in discovery order and addressed by `StructId` /
/// `EnumId`; the qualified-name index guarantees one record per name.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    structures: Vec<Structure>,
    enumerations: Vec<Enumeration>,
    struct_index: FxHashMap<String, StructId>,
    enum_index: FxHashMap<String, EnumId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a structure under its qualified name.
    ///
    /// Returns `None` if that name is already registered; the existing record
    /// is kept.
    pub fn insert_structure(&mut self, structure: Structure) -> Option<StructId> {
        if self.struct_index.contains_key(&structure.qualified_name) {
            return None;
        }
        let id = StructId::new(next_index(self.structures.len()));
        self.struct_index.insert(structure.qualified_name.clone(), id);
        self.structures.push(structure);
        Some(id)
    }

    /// Register an enumeration under its qualified name.
    ///
    /// Returns `None` if that name is already registered.
    pub fn insert_enumeration(&mut self, enumeration: Enumeration) -> Option<EnumId> {
        if self.enum_index.contains_key(&enumeration.qualified_name) {
            return None;
        }
        let id = EnumId::new(next_index(self.enumerations.len()));
        self.enum_index.insert(enumeration.qualified_name.clone(), id);
        self.enumerations.push(enumeration);
        Some(id)
    }

    pub fn lookup_structure(&self, qualified_name: &str) -> Option<StructId> {
        self.struct_index.get(qualified_name).copied()
    }

    pub fn lookup_enumeration(&self, qualified_name: &str) -> Option<EnumId> {
        self.enum_index.get(qualified_name).copied()
    }

    #[inline]
    pub fn structure(&self, id: StructId) -> &Structure {
        &self.structures[id.index()]
    }

    #[inline]
    pub fn structure_mut(&mut self, id: StructId) -> &mut Structure {
        &mut self.structures[id.index()]
    }

    #[inline]
    pub fn enumeration(&self, id: EnumId) -> &Enumeration {
        &self.enumerations[id.index()]
    }

    #[inline]
    pub fn enumeration_mut(&mut self, id: EnumId) -> &mut Enumeration {
        &mut self.enumerations[id.index()]
    }

    /// Structures in discovery order.
    pub fn structures(&self) -> impl Iterator<Item = (StructId, &Structure)> + '_ {
        (0..self.structures.len()).map(move |i| {
            let id = StructId::new(next_index(i));
            (id, self.structure(id))
        })
    }

    /// Enumerations in discovery order.
    pub fn enumerations(&self) -> impl Iterator<Item = (EnumId, &Enumeration)> + '_ {
        (0..self.enumerations.len()).map(move |i| {
            let id = EnumId::new(next_index(i));
            (id, self.enumeration(id))
        })
    }

    pub fn struct_ids(&self) -> impl Iterator<Item = StructId> {
        (0..self.structures.len()).map(|i| StructId::new(next_index(i)))
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn enumeration_count(&self) -> usize {
        self.enumerations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty() && self.enumerations.is_empty()
    }
}

/// Arena indices are u32, saturating past `u32::MAX`.
#[inline]
fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
