//! Builds a [`Document`] from lexical events.

use crate::lexer::{EventHandler, Lexer};
use crate::{Attributes, Document, Element, Error, Node, Position, Result};
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// Parse XML text into a [`Document`].
///
/// # Example
///
/// ```rust
/// use xmldoc::parse;
///
/// let doc = parse("<hello>world</hello>").unwrap();
/// assert_eq!(doc.name, "hello");
/// assert_eq!(doc.value, "world");
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `xml` is empty or only whitespace, and
/// [`Error::MalformedXml`] if it is not well-formed. No partial tree is
/// returned on failure.
pub fn parse(xml: &str) -> Result<Document> {
    if xml.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut builder = TreeBuilder::new();
    Lexer::new(xml).feed(&mut builder)?;
    builder.finish()
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(xml: &str) -> Result<Self> {
        parse(xml)
    }
}

/// Assembles a tree from open/close/text events.
///
/// The document root is the permanent bottom of the stack of open elements.
/// The first open tag names the root itself; every later one opens a child
/// of whatever is on top. Elements are moved into their parent's children
/// when they close, so the stack owns everything still open.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    document: Document,

    /// Open elements above the document root, innermost last.
    stack: Vec<Element>,

    root_named: bool,

    root_closed: bool,

    elements: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open elements, counting the document root.
    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    fn top(&mut self) -> &mut Element {
        self.stack.last_mut().unwrap_or(&mut self.document.root)
    }

    /// Finish building and hand back the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnbalancedTag`] unless exactly the document root is
    /// left on the stack and its tag has been closed.
    pub fn finish(self) -> Result<Document> {
        if let Some(open) = self.stack.last() {
            warn!(depth = self.depth(), name = %open.name, "input ended inside an element");
            return Err(Error::unbalanced(format!(
                "input ended with <{}> still open",
                open.name
            )));
        }
        if !self.root_named {
            warn!("input ended without an open tag");
            return Err(Error::unbalanced("input ended without any open tag"));
        }
        if !self.root_closed {
            warn!(name = %self.document.root.name, "root element never closed");
            return Err(Error::unbalanced(format!(
                "input ended with <{}> still open",
                self.document.root.name
            )));
        }

        debug!(
            root = %self.document.root.name,
            elements = self.elements,
            "built document"
        );
        Ok(self.document)
    }
}

impl EventHandler for TreeBuilder {
    fn open_tag(&mut self, name: &str, attributes: Attributes, position: Position) -> Result<()> {
        trace!(name, depth = self.depth(), "open tag");
        self.elements += 1;

        if self.stack.is_empty() && !self.root_named {
            self.root_named = true;
            let root = &mut self.document.root;
            root.name = name.to_string();
            root.attributes = attributes;
            root.position = Some(position);
        } else {
            self.stack
                .push(Element::with_position(name, attributes, position));
        }
        Ok(())
    }

    fn close_tag(&mut self) -> Result<()> {
        trace!(depth = self.depth(), "close tag");

        match self.stack.pop() {
            Some(element) => {
                self.top().push_child(Node::Element(element));
                Ok(())
            }
            None if self.root_named && !self.root_closed => {
                self.root_closed = true;
                Ok(())
            }
            None => {
                warn!("close tag with nothing open");
                Err(Error::unbalanced("close tag without a matching open tag"))
            }
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        trace!(len = text.len(), "text");
        self.top().push_child(Node::Text(text.to_string()));
        Ok(())
    }

    fn cdata(&mut self, cdata: &str) -> Result<()> {
        trace!(len = cdata.len(), "cdata");
        self.top().push_child(Node::CData(cdata.to_string()));
        Ok(())
    }

    fn comment(&mut self, comment: &str) -> Result<()> {
        trace!(len = comment.len(), "comment");
        self.top().push_child(Node::Comment(comment.to_string()));
        Ok(())
    }

    fn doctype(&mut self, doctype: &str) -> Result<()> {
        trace!(len = doctype.len(), "doctype");
        self.document.doctype.push_str(doctype);
        Ok(())
    }

    fn error(&mut self, error: Error) -> Result<()> {
        debug!(%error, "aborting build");
        Err(error)
    }
}
