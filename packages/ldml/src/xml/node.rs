//! Owned, namespace-qualified XML tree used as transformation output.
//!
//! Every element belongs to one of the two output namespaces. Nodes are
//! built once, fully populated: children are assembled first and handed to
//! the parent on construction.

use crate::config::{AKN_NAMESPACE, AKN_PREFIX, RIS_NAMESPACE, RIS_PREFIX};

/// The two namespaces an output element can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Akoma Ntoso structural vocabulary.
    Akn,
    /// Proprietary metadata vocabulary.
    Ris,
}

impl Namespace {
    /// Namespace URI.
    #[must_use]
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Akn => AKN_NAMESPACE,
            Self::Ris => RIS_NAMESPACE,
        }
    }

    /// Prefix used in serialized output.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Akn => AKN_PREFIX,
            Self::Ris => RIS_PREFIX,
        }
    }

    /// Look up a namespace by URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            AKN_NAMESPACE => Some(Self::Akn),
            RIS_NAMESPACE => Some(Self::Ris),
            _ => None,
        }
    }
}

/// An unqualified (or `xml:`-prefixed) attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A node in the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Return the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            Self::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// A namespace-qualified element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub namespace: Namespace,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element in the Akoma Ntoso namespace.
    #[must_use]
    pub fn akn(name: impl Into<String>) -> Self {
        Self::new(Namespace::Akn, name)
    }

    /// Create an element in the proprietary namespace.
    #[must_use]
    pub fn ris(name: impl Into<String>) -> Self {
        Self::new(Namespace::Ris, name)
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Set the child nodes.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Set the child elements.
    #[must_use]
    pub fn with_elements(self, children: impl IntoIterator<Item = Element>) -> Self {
        self.with_children(children.into_iter().map(Node::Element))
    }

    /// Set a single text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_children([Node::text(text)])
    }

    /// Qualified name as serialized (e.g., "akn:judgment").
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.namespace.prefix(), self.name)
    }

    /// Value of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Iterate over element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// All child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    /// Descendant element matching a slash-separated path of names.
    ///
    /// # Examples
    /// ```
    /// use caselaw_ldml::xml::Element;
    ///
    /// let meta = Element::akn("meta").with_elements([
    ///     Element::akn("identification").with_elements([Element::akn("FRBRWork")]),
    /// ]);
    /// assert!(meta.find("identification/FRBRWork").is_some());
    /// assert!(meta.find("identification/FRBRExpression").is_none());
    /// ```
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .try_fold(self, |current, part| current.child(part))
    }

    /// Concatenated text of this element and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }

    /// Visit this element and every descendant element, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in self.elements() {
            child.walk(visit);
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(&e.children, out),
        }
    }
}

/// Wrap a list of elements in a container, or return `None` when the list is empty.
///
/// Used for repeated-element blocks that must be omitted rather than
/// emitted as an empty wrapper.
#[must_use]
pub fn wrap_non_empty(container: Element, children: Vec<Element>) -> Option<Element> {
    if children.is_empty() {
        None
    } else {
        Some(container.with_elements(children))
    }
}
