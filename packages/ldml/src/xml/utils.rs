//! Helpers for reading parsed `roxmltree` documents.
//!
//! Used when converting parsed HTML fragments into output nodes and when
//! reading serialized LDML back.

use roxmltree::Node;

/// Namespace URI of the `xml:` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use caselaw_ldml::xml::get_tag_name;
///
/// let xml = r#"<akn:p xmlns:akn="http://docs.oasis-open.org/legaldocml/ns/akn/3.0"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "p");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check whether a node is an element with the given namespace and local name.
pub fn is_element(node: Node<'_, '_>, namespace: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(namespace)
        && get_tag_name(node) == name
}

/// Find the first child element with the given namespace and local name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use caselaw_ldml::xml::find_child;
///
/// let xml = r#"<r:meta xmlns:r="urn:r"><r:court/><r:fileNumbers/></r:meta>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert!(find_child(doc.root_element(), "urn:r", "court").is_some());
/// assert!(find_child(doc.root_element(), "urn:other", "court").is_none());
/// ```
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| is_element(*child, namespace, name))
}

/// Find all child elements with the given namespace and local name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| is_element(*child, namespace, name))
}

/// Find a descendant element following a slash-separated path of local
/// names, all in the same namespace.
pub fn find_by_path<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    path: &str,
) -> Option<Node<'a, 'input>> {
    path.split('/')
        .try_fold(node, |current, part| find_child(current, namespace, part))
}

/// Get the text content of a node, trimmed.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Output name for an attribute of a parsed node.
///
/// Attributes in the `xml:` namespace keep their prefix (`xml:lang`);
/// unqualified attributes are carried by local name.
pub fn attribute_name(attribute: &roxmltree::Attribute<'_, '_>) -> String {
    match attribute.namespace() {
        Some(XML_NAMESPACE) => format!("xml:{}", attribute.name()),
        _ => attribute.name().to_string(),
    }
}
