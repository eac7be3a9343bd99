//! xmlview - typed queries over an already-parsed XML tree.
//!
//! This crate does not parse XML. It wraps a tree the caller already built
//! (a [`roxmltree::Document`] out of the box, or anything implementing the
//! [`tree`] traits) and gives typed access to element names, attributes,
//! text content and nested structure, plus rendering back to XML text.
//!
//! # Example
//!
//! ```
//! use xmlview::{Document, Searchable};
//!
//! let xml = r#"<config><server port="8080" tls="yes"><name>primary</name></server></config>"#;
//! let tree = roxmltree::Document::parse(xml).unwrap();
//! let doc = Document::new(&tree);
//!
//! let server = doc.get("server").unwrap();
//! assert_eq!(server.attribute_as_int("port").unwrap(), 8080);
//! assert!(server.attribute_as_bool("tls").unwrap());
//! assert_eq!(server.get("name").unwrap().value(), "primary");
//! assert!(server.attribute("missing").is_err());
//! ```
//!
//! # Architecture
//!
//! - [`tree`]: Read-only tree interface and the roxmltree adapter
//! - [`search`]: The [`Searchable`] trait shared by documents and elements
//! - [`document`]: Document wrapper, searches at any depth
//! - [`element`]: Element wrapper, searches direct children only
//! - [`convert`]: String to bool/int/long/double/enum conversion
//! - [`error`]: Error types and Result alias
//! - [`config`]: Configuration constants

pub mod config;
pub mod convert;
pub mod document;
pub mod element;
pub mod error;
pub mod search;
pub mod tree;

// Re-export commonly used items
pub use convert::{EnumCache, EnumTable, EnumValue};
pub use document::Document;
pub use element::Element;
pub use error::{NumericKind, Result, XmlViewError};
pub use search::{SearchScope, Searchable};
pub use tree::{NodeKind, XmlDocument, XmlNode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
