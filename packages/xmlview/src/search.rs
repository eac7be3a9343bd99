//! Tag-name search shared by documents and elements.

use crate::element::Element;
use crate::tree::XmlNode;

/// Which nodes a [`Searchable`] matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// The search root and every element below it, at any depth, in
    /// document order.
    Descendants,
    /// Direct children of the search root only, in document order.
    Children,
}

/// Find elements by tag name.
///
/// Documents search the whole tree while elements only look at their direct
/// children; the scope is part of each implementer's contract and exposed
/// as [`Searchable::SCOPE`].
///
/// # Examples
/// ```
/// use roxmltree::Document as Tree;
/// use xmlview::{Document, Searchable};
///
/// let tree = Tree::parse(r#"<a><b><x/></b><x/></a>"#).unwrap();
/// let doc = Document::new(&tree);
///
/// assert_eq!(doc.get_all("x").len(), 2);
/// assert_eq!(doc.root().get_all("x").len(), 1);
/// ```
pub trait Searchable<'t> {
    /// Node handle type of the underlying tree.
    type Node: XmlNode<'t>;

    /// Match scope of this implementer.
    const SCOPE: SearchScope;

    /// Return the node the search starts from.
    fn search_root(&self) -> Self::Node;

    /// Return the first element matching `tag_name`, or `None`.
    fn get(&self, tag_name: &str) -> Option<Element<Self::Node>> {
        let root = self.search_root();
        let found = match Self::SCOPE {
            SearchScope::Descendants => root.descendants().find(|n| n.has_tag_name(tag_name)),
            SearchScope::Children => root.children().find(|n| n.has_tag_name(tag_name)),
        };
        found.map(Element::new)
    }

    /// Return every element matching `tag_name`, possibly none.
    fn get_all(&self, tag_name: &str) -> Vec<Element<Self::Node>> {
        let root = self.search_root();
        let matches: Vec<Self::Node> = match Self::SCOPE {
            SearchScope::Descendants => root
                .descendants()
                .filter(|n| n.has_tag_name(tag_name))
                .collect(),
            SearchScope::Children => root
                .children()
                .filter(|n| n.has_tag_name(tag_name))
                .collect(),
        };
        matches.into_iter().map(Element::new).collect()
    }
}
