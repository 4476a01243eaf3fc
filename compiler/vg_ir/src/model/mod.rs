//! Reflected declarations.
//!
//! A `Structure` or `Enumeration` is created once per qualified name while
//! collecting, has its base links settled once while resolving, and is only
//! read afterwards.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::Access;

/// Index of a `Structure` in a `Registry`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct StructId(u32);

impl StructId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        StructId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Hash for StructId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for StructId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructId({})", self.0)
    }
}

/// Index of an `Enumeration` in a `Registry`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct EnumId(u32);

impl EnumId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        EnumId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EnumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumId({})", self.0)
    }
}

/// Resolution state of one base-class entry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseLink {
    /// Collected, not yet looked up.
    #[default]
    Pending,
    /// The base is itself a reflected structure of this batch.
    Resolved(StructId),
    /// Looked up and not found: the base was not annotated or not parsed.
    Unresolved,
}

impl BaseLink {
    pub fn is_pending(self) -> bool {
        matches!(self, BaseLink::Pending)
    }

    pub fn resolved(self) -> Option<StructId> {
        match self {
            BaseLink::Resolved(id) => Some(id),
            BaseLink::Pending | BaseLink::Unresolved => None,
        }
    }
}

/// One annotated struct or class.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Structure {
    pub qualified_name: String,
    pub display_name: String,
    /// Full text of the annotation that selected this declaration.
    pub annotation: String,
    /// Field name to canonical type name, in declaration order.
    pub public_fields: IndexMap<String, String>,
    pub protected_fields: IndexMap<String, String>,
    pub private_fields: IndexMap<String, String>,
    /// Base qualified name to resolution state, in specifier order.
    pub base_classes: IndexMap<String, BaseLink>,
}

impl Structure {
    /// Create an empty structure. `display_name` defaults to the qualified name.
    pub fn new(
        qualified_name: impl Into<String>,
        display_name: Option<String>,
        annotation: impl Into<String>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        Structure {
            display_name: display_name.unwrap_or_else(|| qualified_name.clone()),
            qualified_name,
            annotation: annotation.into(),
            public_fields: IndexMap::new(),
            protected_fields: IndexMap::new(),
            private_fields: IndexMap::new(),
            base_classes: IndexMap::new(),
        }
    }

    pub fn fields(&self, access: Access) -> &IndexMap<String, String> {
        match access {
            Access::Public => &self.public_fields,
            Access::Protected => &self.protected_fields,
            Access::Private => &self.private_fields,
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.public_fields.contains_key(name)
            || self.protected_fields.contains_key(name)
            || self.private_fields.contains_key(name)
    }

    /// Append a field to the map for its access level.
    ///
    /// Returns `false` and leaves the structure unchanged if a field with the
    /// same name already exists at any access level.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        access: Access,
        type_name: impl Into<String>,
    ) -> bool {
        let name = name.into();
        if self.has_field(&name) {
            return false;
        }
        let fields = match access {
            Access::Public => &mut self.public_fields,
            Access::Protected => &mut self.protected_fields,
            Access::Private => &mut self.private_fields,
        };
        fields.insert(name, type_name.into());
        true
    }

    /// Append a base class in the `Pending` state.
    ///
    /// Repeating a base is ignored; returns whether it was added.
    pub fn add_base(&mut self, qualified_name: impl Into<String>) -> bool {
        let qualified_name = qualified_name.into();
        if self.base_classes.contains_key(&qualified_name) {
            return false;
        }
        self.base_classes.insert(qualified_name, BaseLink::Pending);
        true
    }

    /// Move a pending base to its final state.
    ///
    /// Returns `false` if the base is unknown or was already settled.
    pub fn settle_base(&mut self, qualified_name: &str, link: BaseLink) -> bool {
        match self.base_classes.get_mut(qualified_name) {
            Some(slot) if slot.is_pending() && !link.is_pending() => {
                *slot = link;
                true
            }
            _ => false,
        }
    }

    /// True once every base has left the `Pending` state.
    pub fn is_settled(&self) -> bool {
        self.base_classes.values().all(|link| !link.is_pending())
    }
}

/// One annotated enumeration.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enumeration {
    pub qualified_name: String,
    pub display_name: String,
    pub annotation: String,
    /// Enumerator name to value, in declaration order.
    pub enumerators: IndexMap<String, i128>,
}

impl Enumeration {
    pub fn new(
        qualified_name: impl Into<String>,
        display_name: Option<String>,
        annotation: impl Into<String>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        Enumeration {
            display_name: display_name.unwrap_or_else(|| qualified_name.clone()),
            qualified_name,
            annotation: annotation.into(),
            enumerators: IndexMap::new(),
        }
    }

    /// Append an enumerator. Returns `false` if the name is already taken.
    pub fn add_enumerator(&mut self, name: impl Into<String>, value: i128) -> bool {
        let name = name.into();
        if self.enumerators.contains_key(&name) {
            return false;
        }
        self.enumerators.insert(name, value);
        true
    }
}
