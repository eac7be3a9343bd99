//! Element wrapper: attributes, text value, children and XML rendering.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::config::{CDATA_END, CDATA_START, ELEMENT_SCOPE};
use crate::convert::{self, EnumValue};
use crate::error::{Result, XmlViewError};
use crate::search::{SearchScope, Searchable};
use crate::tree::{NodeKind, XmlNode};

/// A named XML element.
///
/// `Element` is a copyable view over a node of an externally owned tree.
/// Tag-name searches through [`Searchable`] only look at direct children.
/// Names and attribute values borrow from the tree, not from the wrapper.
///
/// # Examples
/// ```
/// use roxmltree::Document as Tree;
/// use xmlview::{Document, Searchable};
///
/// let tree = Tree::parse(r#"<order id="7"><line qty="2">tea</line></order>"#).unwrap();
/// let order = Document::new(&tree).root();
///
/// assert_eq!(order.attribute_as_int("id").unwrap(), 7);
/// let line = order.get("line").unwrap();
/// assert_eq!(line.value(), "tea");
/// assert_eq!(line.to_xml(), r#"<line qty="2">tea</line>"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element<N> {
    node: N,
}

impl<'t, N: XmlNode<'t>> Element<N> {
    /// Wrap a tree node.
    pub fn new(node: N) -> Self {
        Self { node }
    }

    /// Returns the underlying tree node.
    pub fn node(&self) -> N {
        self.node
    }

    /// Returns the element's tag name.
    pub fn name(&self) -> Cow<'t, str> {
        self.node.tag_name()
    }

    /// Get the value of `name`.
    ///
    /// # Errors
    /// Returns [`XmlViewError::AttributeNotFound`] if the attribute is absent.
    /// An attribute that is present with an empty value returns `""`.
    pub fn attribute(&self, name: &str) -> Result<&'t str> {
        self.node
            .attribute(name)
            .ok_or_else(|| XmlViewError::AttributeNotFound(name.to_string()))
    }

    /// Get the value of `name` as a boolean.
    ///
    /// Returns `true` for `"true"`, `"1"`, `"yes"`, `"y"` ignoring case, else
    /// `false`.
    ///
    /// # Errors
    /// Returns [`XmlViewError::AttributeNotFound`] if the attribute is absent.
    pub fn attribute_as_bool(&self, name: &str) -> Result<bool> {
        Ok(convert::to_bool(self.attribute(name)?))
    }

    /// Get the value of `name` as a 32-bit integer.
    ///
    /// # Errors
    /// Returns [`XmlViewError::AttributeNotFound`] if the attribute is absent,
    /// or [`XmlViewError::NumericFormat`] if it is not a valid integer.
    pub fn attribute_as_int(&self, name: &str) -> Result<i32> {
        convert::to_int(self.attribute(name)?)
    }

    /// Get the value of `name` as a 64-bit integer.
    ///
    /// # Errors
    /// Returns [`XmlViewError::AttributeNotFound`] if the attribute is absent,
    /// or [`XmlViewError::NumericFormat`] if it is not a valid integer.
    pub fn attribute_as_long(&self, name: &str) -> Result<i64> {
        convert::to_long(self.attribute(name)?)
    }

    /// Get the value of `name` as a double.
    ///
    /// # Errors
    /// Returns [`XmlViewError::AttributeNotFound`] if the attribute is absent,
    /// or [`XmlViewError::NumericFormat`] if it is not a valid double.
    pub fn attribute_as_double(&self, name: &str) -> Result<f64> {
        convert::to_double(self.attribute(name)?)
    }

    /// Get the value of `name` as a member of the enum `T`.
    ///
    /// Returns `Ok(None)` if the value is not the exact name of a member.
    ///
    /// # Errors
    /// Returns [`XmlViewError::AttributeNotFound`] if the attribute is absent.
    pub fn attribute_as_enum<T: EnumValue>(&self, name: &str) -> Result<Option<T>> {
        Ok(convert::to_enum(self.attribute(name)?))
    }

    /// Check if the element has the attribute `name`.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.node.attribute(name).is_some()
    }

    /// Check if the element has any attributes.
    pub fn has_attributes(&self) -> bool {
        self.node.attributes().next().is_some()
    }

    /// Builds a map of the element's attributes, empty if there are none.
    pub fn attributes(&self) -> HashMap<String, String> {
        self.node
            .attributes()
            .map(|(name, value)| (name.into_owned(), value.to_string()))
            .collect()
    }

    /// Returns the child element at raw child position `index`.
    ///
    /// The index counts every child node, not just elements. Returns `None`
    /// if that child is not an element or the index is out of range.
    pub fn child(&self, index: usize) -> Option<Self> {
        self.node
            .children()
            .nth(index)
            .filter(|child| child.is_element())
            .map(Self::new)
    }

    /// Total number of child nodes of any kind.
    pub fn child_node_count(&self) -> usize {
        self.node.children().count()
    }

    /// Returns the element's child elements in document order.
    pub fn children(&self) -> Vec<Self> {
        self.node
            .children()
            .filter(|child| child.is_element())
            .map(Self::new)
            .collect()
    }

    /// Check if any direct child element is named `name`.
    pub fn has_child(&self, name: &str) -> bool {
        self.node.children().any(|child| child.has_tag_name(name))
    }

    /// Returns the concatenated text and CDATA content of direct children.
    ///
    /// Child elements contribute nothing.
    pub fn value(&self) -> String {
        let mut value = String::new();
        for child in self.node.children() {
            match child.kind() {
                NodeKind::Text(text) | NodeKind::CData(text) => value.push_str(text),
                NodeKind::Element | NodeKind::Other => {}
            }
        }
        value
    }

    /// Get the element value as a boolean.
    ///
    /// Returns `true` for `"true"`, `"1"`, `"yes"`, `"y"` ignoring case, else
    /// `false`.
    pub fn value_as_bool(&self) -> bool {
        convert::to_bool(&self.value())
    }

    /// Get the element value as a 32-bit integer.
    ///
    /// # Errors
    /// Returns [`XmlViewError::NumericFormat`] if the value is not a valid integer.
    pub fn value_as_int(&self) -> Result<i32> {
        convert::to_int(&self.value())
    }

    /// Get the element value as a 64-bit integer.
    ///
    /// # Errors
    /// Returns [`XmlViewError::NumericFormat`] if the value is not a valid integer.
    pub fn value_as_long(&self) -> Result<i64> {
        convert::to_long(&self.value())
    }

    /// Get the element value as a double.
    ///
    /// # Errors
    /// Returns [`XmlViewError::NumericFormat`] if the value is not a valid double.
    pub fn value_as_double(&self) -> Result<f64> {
        convert::to_double(&self.value())
    }

    /// Get the element value as a member of the enum `T`, or `None`.
    pub fn value_as_enum<T: EnumValue>(&self) -> Option<T> {
        convert::to_enum(&self.value())
    }

    /// Returns an XML representation of the element, its attributes and
    /// content.
    ///
    /// Attributes keep the order the tree reports them in. An element without
    /// child nodes is self-closing. Text is written verbatim, CDATA keeps its
    /// wrapper, and comments and processing instructions are left out.
    pub fn to_xml(&self) -> String {
        self.to_string()
    }

    fn write_xml(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        write!(f, "<{name}")?;

        for (attr, value) in self.node.attributes() {
            write!(f, " {attr}=\"{value}\"")?;
        }

        if self.node.children().next().is_none() {
            return f.write_str("/>");
        }

        f.write_str(">")?;
        for child in self.node.children() {
            match child.kind() {
                NodeKind::Element => Self::new(child).write_xml(f)?,
                NodeKind::Text(text) => f.write_str(text)?,
                NodeKind::CData(data) => write!(f, "{CDATA_START}{data}{CDATA_END}")?,
                NodeKind::Other => {}
            }
        }
        write!(f, "</{name}>")
    }
}

impl<'t, N: XmlNode<'t>> Searchable<'t> for Element<N> {
    type Node = N;

    const SCOPE: SearchScope = ELEMENT_SCOPE;

    fn search_root(&self) -> N {
        self.node
    }
}

impl<'t, N: XmlNode<'t>> fmt::Display for Element<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_xml(f)
    }
}
