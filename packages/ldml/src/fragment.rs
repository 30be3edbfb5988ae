//! Fragment normalizer: turns author-supplied HTML into output nodes.
//!
//! Editors produce HTML that is close to, but not always, well-formed XML.
//! The normalizer applies a fixed set of textual repairs, wraps the result
//! in a synthetic root that declares the Akoma Ntoso namespace as default,
//! parses it and converts the root's children into owned [`Node`]s.
//!
//! Table column styling (`<colgroup>`) has no counterpart in the output
//! vocabulary and is removed.

use regex::Regex;
use roxmltree::Document;
use std::sync::LazyLock;

use crate::config::AKN_NAMESPACE;
use crate::error::{LdmlError, Result};
use crate::xml::utils::{attribute_name, get_tag_name, XML_NAMESPACE};
use crate::xml::{Attribute, Element, Namespace, Node};

/// Name of the synthetic wrapper element.
const WRAPPER: &str = "wrapper";

/// `<img ...>` with or without closing slash.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img\b([^>]*?)\s*/?>").expect("valid regex"));

/// `<br>`, `<br/>`, `<br />` and `<br></br>`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br\s*/?>(?:\s*</br>)?").expect("valid regex"));

/// `<colgroup>...</colgroup>` blocks and self-closed `<colgroup/>`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COLGROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<colgroup\b[^>]*/>|<colgroup\b[^>]*>.*?</colgroup\s*>").expect("valid regex")
});

/// Apply the textual repairs without parsing.
///
/// # Examples
/// ```
/// use caselaw_ldml::fragment::repair_markup;
///
/// assert_eq!(repair_markup(r#"<p><img src="x"></p>"#), r#"<p><img src="x"/></p>"#);
/// assert_eq!(repair_markup("a<br>b"), "a<br/>b");
/// assert_eq!(repair_markup("a&nbsp;b"), "a\u{a0}b");
/// ```
#[must_use]
pub fn repair_markup(html: &str) -> String {
    let html = html.replace("&nbsp;", "\u{a0}");
    let html = COLGROUP.replace_all(&html, "");
    let html = IMG_TAG.replace_all(&html, "<img$1/>");
    let html = BR_TAG.replace_all(&html, "<br/>");
    html.into_owned()
}

/// Normalize an HTML fragment into a list of output nodes.
///
/// Returns an empty list for `None` or blank input.
///
/// # Errors
/// Returns [`LdmlError::Mapping`] if the repaired fragment is still not
/// well-formed, and [`LdmlError::UnsupportedNamespace`] if it declares
/// elements or attributes outside the output namespaces.
///
/// # Examples
/// ```
/// use caselaw_ldml::fragment::normalize_fragment;
///
/// let nodes = normalize_fragment(Some("<p>Tenor</p>")).unwrap();
/// assert_eq!(nodes.len(), 1);
/// assert!(normalize_fragment(None).unwrap().is_empty());
/// assert!(normalize_fragment(Some("<p>open")).is_err());
/// ```
pub fn normalize_fragment(html: Option<&str>) -> Result<Vec<Node>> {
    let Some(html) = html.filter(|h| !h.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let repaired = repair_markup(html);
    let wrapped = format!("<{WRAPPER} xmlns=\"{AKN_NAMESPACE}\">{repaired}</{WRAPPER}>");

    let doc = Document::parse(&wrapped).map_err(|source| {
        tracing::debug!(error = %source, "HTML fragment is not well-formed after repair");
        LdmlError::Mapping {
            field: None,
            source,
        }
    })?;

    convert_children(doc.root_element())
}

/// Normalize a fragment and tag any failure with the source field name.
pub fn normalize_field(field: &'static str, html: Option<&str>) -> Result<Vec<Node>> {
    normalize_fragment(html).map_err(|e| e.in_field(field))
}

fn convert_children(parent: roxmltree::Node<'_, '_>) -> Result<Vec<Node>> {
    parent
        .children()
        .filter_map(|child| convert_node(child).transpose())
        .collect()
}

fn convert_node(node: roxmltree::Node<'_, '_>) -> Result<Option<Node>> {
    if node.is_text() {
        return Ok(node.text().map(Node::text));
    }
    if !node.is_element() {
        // Comments and processing instructions are dropped
        return Ok(None);
    }

    let namespace = node.tag_name().namespace().unwrap_or_default();
    let namespace =
        Namespace::from_uri(namespace).ok_or_else(|| LdmlError::UnsupportedNamespace {
            namespace: namespace.to_string(),
            field: None,
        })?;

    let attributes = node
        .attributes()
        .map(|a| match a.namespace() {
            None | Some(XML_NAMESPACE) => Ok(Attribute {
                name: attribute_name(&a),
                value: a.value().to_string(),
            }),
            Some(other) => Err(LdmlError::UnsupportedNamespace {
                namespace: other.to_string(),
                field: None,
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(Node::Element(Element {
        namespace,
        name: get_tag_name(node).to_string(),
        attributes,
        children: convert_children(node)?,
    })))
}
