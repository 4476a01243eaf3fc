//! Declaration tree produced by a parser frontend.
//!
//! A frontend lowers whatever its parser returns into `DeclNode`s. Only the
//! kinds the generator cares about get their own variant; every other
//! container (translation unit, namespace, linkage block, template, ...) is
//! kept as a `Scope` so nested declarations stay reachable in preorder.

use std::fmt;

/// Member access specifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Access {
    Public,
    Protected,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => write!(f, "public"),
            Access::Protected => write!(f, "protected"),
            Access::Private => write!(f, "private"),
        }
    }
}

/// One node of a lowered declaration tree.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclNode {
    /// Any container the generator does not reflect over.
    Scope(ScopeDecl),
    /// A struct or class definition.
    Aggregate(AggregateDecl),
    /// A non-static data member.
    Field(FieldDecl),
    /// One entry of an aggregate's base-specifier list.
    BaseSpecifier(BaseSpecifier),
    /// A scoped or unscoped enumeration definition.
    Enumeration(EnumDecl),
    /// An enumerator constant.
    Enumerator(EnumeratorDecl),
    /// An annotation attribute attached to its parent declaration.
    Annotation(Annotation),
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScopeDecl {
    pub children: Vec<DeclNode>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateDecl {
    /// Fully scoped type name, e.g. `geometry::Point`.
    pub qualified_name: String,
    /// Unqualified spelling, if the parser reported one.
    pub name: Option<String>,
    pub children: Vec<DeclNode>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDecl {
    pub name: String,
    pub access: Access,
    /// Canonical spelling of the field's type.
    pub type_name: String,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseSpecifier {
    /// Canonical spelling of the base type.
    pub type_name: String,
    pub access: Access,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumDecl {
    pub qualified_name: String,
    pub name: Option<String>,
    pub children: Vec<DeclNode>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumeratorDecl {
    pub name: String,
    /// Value as computed by the parser. Wide enough for every signed and
    /// unsigned 64-bit underlying type.
    pub value: i128,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub text: String,
}

impl DeclNode {
    pub fn scope(children: Vec<DeclNode>) -> Self {
        DeclNode::Scope(ScopeDecl { children })
    }

    pub fn aggregate(qualified_name: impl Into<String>, children: Vec<DeclNode>) -> Self {
        let qualified_name = qualified_name.into();
        let name = qualified_name
            .rsplit("::")
            .next()
            .map(str::to_owned);
        DeclNode::Aggregate(AggregateDecl {
            qualified_name,
            name,
            children,
        })
    }

    pub fn field(name: impl Into<String>, access: Access, type_name: impl Into<String>) -> Self {
        DeclNode::Field(FieldDecl {
            name: name.into(),
            access,
            type_name: type_name.into(),
        })
    }

    pub fn base(type_name: impl Into<String>, access: Access) -> Self {
        DeclNode::BaseSpecifier(BaseSpecifier {
            type_name: type_name.into(),
            access,
        })
    }

    pub fn enumeration(qualified_name: impl Into<String>, children: Vec<DeclNode>) -> Self {
        let qualified_name = qualified_name.into();
        let name = qualified_name
            .rsplit("::")
            .next()
            .map(str::to_owned);
        DeclNode::Enumeration(EnumDecl {
            qualified_name,
            name,
            children,
        })
    }

    pub fn enumerator(name: impl Into<String>, value: i128) -> Self {
        DeclNode::Enumerator(EnumeratorDecl {
            name: name.into(),
            value,
        })
    }

    pub fn annotation(text: impl Into<String>) -> Self {
        DeclNode::Annotation(Annotation { text: text.into() })
    }

    /// Direct children of this node. Leaves have none.
    pub fn children(&self) -> &[DeclNode] {
        match self {
            DeclNode::Scope(scope) => &scope.children,
            DeclNode::Aggregate(decl) => &decl.children,
            DeclNode::Enumeration(decl) => &decl.children,
            DeclNode::Field(_)
            | DeclNode::BaseSpecifier(_)
            | DeclNode::Enumerator(_)
            | DeclNode::Annotation(_) => &[],
        }
    }

    /// Iterate over this node and all of its descendants in preorder.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }
}

/// Preorder traversal over a declaration tree.
///
/// Uses an explicit stack, so deeply nested namespaces cannot overflow.
pub struct Preorder<'a> {
    stack: Vec<&'a DeclNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a DeclNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
