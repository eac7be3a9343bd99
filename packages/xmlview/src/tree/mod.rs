//! Read-only tree interface consumed by the element and document wrappers.
//!
//! The wrappers never parse or mutate XML. They only need a handful of
//! queries from whatever DOM-like tree the caller already built, captured
//! here by [`XmlNode`] and [`XmlDocument`]. An implementation for
//! [`roxmltree`] ships in [`roxml`].
//!
//! Node handles are tied to the tree through the lifetime `'t`: names, values
//! and text borrowed through a handle stay valid after the handle itself is
//! dropped.

use std::borrow::Cow;

pub mod roxml;

pub use roxml::RoxmlNode;

/// Classification of a child node, with the character data of text runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'t> {
    /// A named element.
    Element,
    /// A text run.
    Text(&'t str),
    /// A CDATA section, without its `<![CDATA[`/`]]>` markers.
    CData(&'t str),
    /// Comments, processing instructions and anything else.
    Other,
}

/// A lightweight handle to one node of an externally owned tree.
///
/// Handles are `Copy`; several handles may point at the same node.
pub trait XmlNode<'t>: Copy {
    /// Return what kind of node this is.
    fn kind(&self) -> NodeKind<'t>;

    /// Return the qualified tag name of an element.
    ///
    /// Only meaningful when [`kind`](Self::kind) is [`NodeKind::Element`].
    fn tag_name(&self) -> Cow<'t, str>;

    /// Look up an attribute by qualified name.
    ///
    /// Returns `None` only when the attribute is absent; a present attribute
    /// with an empty value yields `Some("")`.
    fn attribute(&self, name: &str) -> Option<&'t str>;

    /// Iterate over `(name, value)` attribute pairs in source order.
    fn attributes(&self) -> impl Iterator<Item = (Cow<'t, str>, &'t str)>;

    /// Iterate over all direct child nodes in document order.
    fn children(&self) -> impl Iterator<Item = Self>;

    /// Iterate over this node and all of its descendants in pre-order.
    fn descendants(&self) -> impl Iterator<Item = Self>;

    /// Check if this node is an element.
    fn is_element(&self) -> bool {
        matches!(self.kind(), NodeKind::Element)
    }

    /// Check if this node is an element with the given tag name.
    fn has_tag_name(&self, tag: &str) -> bool {
        self.is_element() && self.tag_name() == tag
    }
}

/// The root container of a tree.
pub trait XmlDocument {
    /// Node handle type of this tree.
    type Node<'a>: XmlNode<'a>
    where
        Self: 'a;

    /// Return the document element.
    fn document_element(&self) -> Self::Node<'_>;
}
