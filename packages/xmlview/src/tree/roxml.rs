//! [`XmlNode`] and [`XmlDocument`] for [`roxmltree`].
//!
//! roxmltree folds CDATA sections into the surrounding text node. The adapter
//! recovers them from the source text, so a text node holding
//! `a<![CDATA[b]]>c` is reported as three children: `Text("a")`,
//! `CData("b")` and `Text("c")`. Names are read from the source as well, so
//! they keep the prefix that was written even when several prefixes are bound
//! to one namespace.
//!
//! Namespace declarations are not attributes in roxmltree and are not
//! reported by [`XmlNode::attributes`].

use std::borrow::Cow;

use roxmltree::{Attribute, Document, Node, NodeType};

use super::{NodeKind, XmlDocument, XmlNode};
use crate::config::{CDATA_END, CDATA_START};

/// One character run of a text node, borrowed from the node's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    CData(&'a str),
}

/// A roxmltree node, or one character run of a text node that mixes text and
/// CDATA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoxmlNode<'a, 'input> {
    node: Node<'a, 'input>,
    segment: Option<Segment<'a>>,
}

impl<'a, 'input> RoxmlNode<'a, 'input> {
    /// Returns the roxmltree node. For a character run this is the text node
    /// it was split from.
    pub fn node(&self) -> Node<'a, 'input> {
        self.node
    }
}

impl<'a, 'input> From<Node<'a, 'input>> for RoxmlNode<'a, 'input> {
    fn from(node: Node<'a, 'input>) -> Self {
        Self {
            node,
            segment: None,
        }
    }
}

/// Check that a name read from the source ends in the parsed local name.
fn matches_local(qname: &str, local: &str) -> bool {
    qname == local
        || qname
            .strip_suffix(local)
            .and_then(|prefix| prefix.strip_suffix(':'))
            .is_some_and(|prefix| !prefix.is_empty())
}

/// Build a `prefix:local` name from the namespace binding.
///
/// Only used when the source text cannot be consulted.
fn qualified_name<'a>(node: Node<'a, '_>, namespace: Option<&str>, local: &'a str) -> Cow<'a, str> {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) => Cow::Owned(format!("{prefix}:{local}")),
        None => Cow::Borrowed(local),
    }
}

fn element_name<'a>(node: Node<'a, '_>) -> Cow<'a, str> {
    let name = node.tag_name();
    let written = node
        .document()
        .input_text()
        .get(node.range().start..)
        .and_then(|rest| rest.strip_prefix('<'))
        .map(|rest| {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
                .unwrap_or(rest.len());
            &rest[..end]
        });

    match written {
        Some(qname) if matches_local(qname, name.name()) => Cow::Borrowed(qname),
        _ => qualified_name(node, name.namespace(), name.name()),
    }
}

fn attribute_name<'a>(node: Node<'a, '_>, attr: &Attribute<'a, '_>) -> Cow<'a, str> {
    match node.document().input_text().get(attr.range_qname()) {
        Some(qname) if matches_local(qname, attr.name()) => Cow::Borrowed(qname),
        _ => qualified_name(node, attr.namespace(), attr.name()),
    }
}

/// Decoded byte length of raw character data, or `None` if it holds an entity
/// reference other than the predefined ones and character references.
fn decoded_len(raw: &str) -> Option<usize> {
    let mut len = 0;
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        match c {
            '&' => {
                let end = rest.find(';')?;
                let decoded = match &rest[1..end] {
                    "lt" | "gt" | "amp" | "apos" | "quot" => 1,
                    reference => char_reference(reference)?.len_utf8(),
                };
                len += decoded;
                rest = &rest[end + 1..];
            }
            '\r' => {
                len += 1;
                rest = rest.strip_prefix("\r\n").unwrap_or(&rest[1..]);
            }
            _ => {
                len += c.len_utf8();
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    Some(len)
}

fn char_reference(reference: &str) -> Option<char> {
    let digits = reference.strip_prefix('#')?;
    let code = match digits.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

/// Split a text node into its text and CDATA runs by rescanning the source.
///
/// Returns `None` when the node holds no CDATA, or when the source does not
/// line up with the parsed text (entity expansion), in which case the node is
/// reported as one text run.
fn text_segments<'a>(node: Node<'a, '_>) -> Option<Vec<Segment<'a>>> {
    let text = node.text()?;
    let input = node.document().input_text();

    let mut pos = node.range().start;
    if input.get(..pos)?.ends_with(CDATA_START) {
        pos -= CDATA_START.len();
    }

    let mut segments = Vec::new();
    let mut consumed = 0;
    let mut has_cdata = false;
    while consumed < text.len() {
        let rest = input.get(pos..)?;
        let (raw_len, len, is_cdata) = match rest.strip_prefix(CDATA_START) {
            Some(body) => {
                let end = body.find(CDATA_END)?;
                let data = &body[..end];
                let raw_len = CDATA_START.len() + end + CDATA_END.len();
                (raw_len, data.len() - data.matches("\r\n").count(), true)
            }
            None => {
                let end = rest.find('<').unwrap_or(rest.len());
                if end == 0 {
                    return None;
                }
                (end, decoded_len(&rest[..end])?, false)
            }
        };

        let run = text.get(consumed..consumed + len)?;
        segments.push(if is_cdata {
            Segment::CData(run)
        } else {
            Segment::Text(run)
        });
        has_cdata |= is_cdata;
        pos += raw_len;
        consumed += len;
    }

    if has_cdata && consumed == text.len() {
        tracing::trace!(runs = segments.len(), "Split text node into CDATA runs");
        Some(segments)
    } else {
        None
    }
}

/// Handles for one roxmltree node: the node itself, or its character runs.
fn expand<'a, 'input>(node: Node<'a, 'input>) -> Vec<RoxmlNode<'a, 'input>> {
    match node.is_text().then(|| text_segments(node)).flatten() {
        Some(segments) => segments
            .into_iter()
            .map(|segment| RoxmlNode {
                node,
                segment: Some(segment),
            })
            .collect(),
        None => vec![RoxmlNode::from(node)],
    }
}

impl<'a, 'input: 'a> XmlNode<'a> for RoxmlNode<'a, 'input> {
    fn kind(&self) -> NodeKind<'a> {
        match self.segment {
            Some(Segment::Text(text)) => NodeKind::Text(text),
            Some(Segment::CData(data)) => NodeKind::CData(data),
            None => match self.node.node_type() {
                NodeType::Element => NodeKind::Element,
                NodeType::Text => self.node.text().map_or(NodeKind::Other, NodeKind::Text),
                NodeType::Root | NodeType::Comment | NodeType::PI => NodeKind::Other,
            },
        }
    }

    fn tag_name(&self) -> Cow<'a, str> {
        if self.node.is_element() {
            element_name(self.node)
        } else {
            Cow::Borrowed("")
        }
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        let node = self.node;
        node.attributes()
            .find(|attr| attribute_name(node, attr) == name)
            .map(|attr| attr.value())
    }

    fn attributes(&self) -> impl Iterator<Item = (Cow<'a, str>, &'a str)> {
        let node = self.node;
        node.attributes()
            .map(move |attr| (attribute_name(node, &attr), attr.value()))
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        self.node.children().flat_map(expand)
    }

    fn descendants(&self) -> impl Iterator<Item = Self> {
        let run = self.segment.map(|_| *self);
        let below = run
            .is_none()
            .then_some(self.node)
            .into_iter()
            .flat_map(|node| node.descendants())
            .flat_map(expand);
        run.into_iter().chain(below)
    }
}

impl<'input> XmlDocument for Document<'input> {
    type Node<'a>
        = RoxmlNode<'a, 'input>
    where
        Self: 'a;

    fn document_element(&self) -> RoxmlNode<'_, 'input> {
        RoxmlNode::from(self.root_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_kinds<'a>(doc: &'a Document<'_>) -> Vec<NodeKind<'a>> {
        doc.document_element().children().map(|c| c.kind()).collect()
    }

    #[test]
    fn test_kind_of_children() {
        let doc = Document::parse(r#"<root>text<child/><!-- note --><?pi data?></root>"#).unwrap();
        assert_eq!(
            child_kinds(&doc),
            vec![
                NodeKind::Text("text"),
                NodeKind::Element,
                NodeKind::Other,
                NodeKind::Other,
            ]
        );
    }

    #[test]
    fn test_cdata_section_kind() {
        let doc = Document::parse(r#"<root><![CDATA[<raw>]]></root>"#).unwrap();
        assert_eq!(child_kinds(&doc), vec![NodeKind::CData("<raw>")]);
    }

    #[test]
    fn test_text_and_cdata_runs_are_split() {
        let doc = Document::parse("<root>a &amp; b<![CDATA[x<y]]>c<![CDATA[z]]><e/>f</root>").unwrap();
        assert_eq!(
            child_kinds(&doc),
            vec![
                NodeKind::Text("a & b"),
                NodeKind::CData("x<y"),
                NodeKind::Text("c"),
                NodeKind::CData("z"),
                NodeKind::Element,
                NodeKind::Text("f"),
            ]
        );
    }

    #[test]
    fn test_character_references_before_cdata() {
        let doc = Document::parse("<root>&#x3C;&#233;<![CDATA[&amp;]]></root>").unwrap();
        assert_eq!(
            child_kinds(&doc),
            vec![NodeKind::Text("<é"), NodeKind::CData("&amp;")]
        );
    }

    #[test]
    fn test_cdata_runs_in_descendants() {
        let doc = Document::parse("<a><b>x<![CDATA[y]]></b></a>").unwrap();
        let kinds: Vec<_> = doc
            .document_element()
            .descendants()
            .map(|n| n.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Element,
                NodeKind::Element,
                NodeKind::Text("x"),
                NodeKind::CData("y"),
            ]
        );
    }

    #[test]
    fn test_tag_name_keeps_prefix() {
        let doc = Document::parse(r#"<ns:root xmlns:ns="http://example.com"><ns:child/></ns:root>"#).unwrap();
        let root = doc.document_element();
        assert_eq!(root.tag_name(), "ns:root");
        assert!(root.children().any(|c| c.has_tag_name("ns:child")));
    }

    #[test]
    fn test_tag_name_uses_written_prefix() {
        let doc = Document::parse(r#"<r xmlns:a="u" xmlns:b="u"><b:x b:k="1"/><a:y/></r>"#).unwrap();
        let names: Vec<_> = doc
            .document_element()
            .children()
            .map(|c| c.tag_name().into_owned())
            .collect();
        assert_eq!(names, vec!["b:x", "a:y"]);

        let x = doc.document_element().children().next().unwrap();
        assert_eq!(x.attribute("b:k"), Some("1"));
        assert_eq!(x.attribute("a:k"), None);
    }

    #[test]
    fn test_default_namespace_has_no_prefix() {
        let doc = Document::parse(r#"<root xmlns="http://example.com"><child/></root>"#).unwrap();
        assert_eq!(doc.document_element().tag_name(), "root");
    }

    #[test]
    fn test_attribute_empty_versus_absent() {
        let doc = Document::parse(r#"<root empty="" set="x"/>"#).unwrap();
        let root = doc.document_element();

        assert_eq!(root.attribute("empty"), Some(""));
        assert_eq!(root.attribute("set"), Some("x"));
        assert_eq!(root.attribute("missing"), None);
    }

    #[test]
    fn test_prefixed_attribute() {
        let doc = Document::parse(r#"<root xmlns:x="http://example.com" x:id="7" id="1"/>"#).unwrap();
        let root = doc.document_element();

        assert_eq!(root.attribute("x:id"), Some("7"));
        assert_eq!(root.attribute("id"), Some("1"));
    }

    #[test]
    fn test_attributes_in_source_order() {
        let doc = Document::parse(r#"<root z="1" a="2" m="3"/>"#).unwrap();
        let names: Vec<_> = doc
            .document_element()
            .attributes()
            .map(|(name, _)| name.into_owned())
            .collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_descendants_pre_order() {
        let doc = Document::parse(r#"<a><b><c/></b><d/></a>"#).unwrap();
        let names: Vec<_> = doc
            .document_element()
            .descendants()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().into_owned())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_values_outlive_handle() {
        let doc = Document::parse(r#"<a k="v">t</a>"#).unwrap();
        let value = doc.document_element().attribute("k").unwrap();
        let name = doc.document_element().tag_name();
        assert_eq!((name.as_ref(), value), ("a", "v"));
    }

    #[test]
    fn test_decoded_len() {
        assert_eq!(decoded_len("a&lt;b"), Some(3));
        assert_eq!(decoded_len("&#x20AC;"), Some(3));
        assert_eq!(decoded_len("x\r\ny"), Some(3));
        assert_eq!(decoded_len("&custom;"), None);
    }
}
