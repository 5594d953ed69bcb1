//! Core node types for parsed XML trees.

use crate::Position;
use indexmap::IndexMap;
use std::ops::Deref;

/// Ordered attribute mapping. Inserting an existing name replaces its value
/// but keeps its original position.
pub type Attributes = IndexMap<String, String>;

/// The kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element,
    Text,
    CData,
    Comment,
}

/// A node in a parsed tree.
///
/// Every node is owned by exactly one parent's `children`; the root element
/// is owned by its [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),

    /// A run of character data, stored unescaped.
    Text(String),

    /// The body of a `<![CDATA[...]]>` section.
    CData(String),

    /// The body of a `<!--...-->` comment.
    Comment(String),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            Node::CData(_) => NodeKind::CData,
            Node::Comment(_) => NodeKind::Comment,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Raw content of a text, CDATA or comment node.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) | Node::CData(text) | Node::Comment(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An XML element.
///
/// `value` holds the concatenated text and CDATA content of the element's
/// direct children only; text inside nested elements is not included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// The tag name, including any namespace prefix.
    pub name: String,

    pub attributes: Attributes,

    /// Text and CDATA content of the direct children, in document order.
    pub value: String,

    /// Child nodes in document order.
    pub children: Vec<Node>,

    /// Where the open tag was found. `None` for elements built by hand.
    pub position: Option<Position>,
}

impl Element {
    /// Create an element with no children and no position.
    pub fn new<I, K, V>(name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            value: String::new(),
            children: Vec::new(),
            position: None,
        }
    }

    pub(crate) fn with_position(
        name: impl Into<String>,
        attributes: Attributes,
        position: Position,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            value: String::new(),
            children: Vec::new(),
            position: Some(position),
        }
    }

    /// Append a child node. Text and CDATA content is also appended to `value`.
    pub fn push_child(&mut self, child: impl Into<Node>) {
        let child = child.into();
        if let Node::Text(text) | Node::CData(text) = &child {
            self.value.push_str(text);
        }
        self.children.push(child);
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn last_child(&self) -> Option<&Node> {
        self.children.last()
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Iterate over the element children, skipping text, CDATA and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

/// A parsed XML document.
///
/// The document is its root element: it dereferences to [`Element`], so all
/// queries and rendering work on it directly. Comments that appear before or
/// after the root tag become children of the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// The root element. Its name is empty until the first open tag is seen.
    pub root: Element,

    /// Raw doctype declaration text, empty if there was none.
    pub doctype: String,
}

impl Document {
    pub fn doctype(&self) -> &str {
        &self.doctype
    }

    pub fn into_element(self) -> Element {
        self.root
    }
}

impl Deref for Document {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.root
    }
}
