//! Configuration constants for conversion and rendering.

use crate::search::SearchScope;

/// Literals that convert to `true`, compared ignoring ASCII case.
///
/// Anything else, including the empty string and padded input such as
/// `"true "`, converts to `false`.
pub const TRUTHY_LITERALS: [&str; 4] = ["true", "1", "yes", "y"];

/// Opening marker of a rendered CDATA section.
pub const CDATA_START: &str = "<![CDATA[";

/// Closing marker of a rendered CDATA section.
pub const CDATA_END: &str = "]]>";

/// Search scope of [`Document`](crate::Document): every element at any depth.
pub const DOCUMENT_SCOPE: SearchScope = SearchScope::Descendants;

/// Search scope of [`Element`](crate::Element): direct children only.
pub const ELEMENT_SCOPE: SearchScope = SearchScope::Children;
