//! Document wrapper.

use std::fmt;

use crate::config::DOCUMENT_SCOPE;
use crate::element::Element;
use crate::search::{SearchScope, Searchable};
use crate::tree::XmlDocument;

/// An XML document.
///
/// Tag-name searches through [`Searchable`] cover every element in the
/// document regardless of nesting depth, in document order.
pub struct Document<'d, D: ?Sized> {
    source: &'d D,
}

impl<'d, D: XmlDocument + ?Sized> Document<'d, D> {
    /// Wrap a parsed tree.
    pub fn new(source: &'d D) -> Self {
        Self { source }
    }

    /// Returns the underlying tree.
    pub fn source(&self) -> &'d D {
        self.source
    }

    /// Returns the root document element.
    pub fn root(&self) -> Element<D::Node<'d>> {
        Element::new(self.source.document_element())
    }
}

impl<'d, D: XmlDocument + ?Sized> Searchable<'d> for Document<'d, D> {
    type Node = D::Node<'d>;

    const SCOPE: SearchScope = DOCUMENT_SCOPE;

    fn search_root(&self) -> D::Node<'d> {
        self.source.document_element()
    }
}

impl<D: ?Sized> Clone for Document<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for Document<'_, D> {}

impl<D: ?Sized> fmt::Debug for Document<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// Renders the root element; no XML declaration or prolog is written.
impl<D: XmlDocument + ?Sized> fmt::Display for Document<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}
