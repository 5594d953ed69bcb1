//! In-memory XML trees with simple navigation and debug rendering.
//!
//! This crate turns XML text into a tree of [`Node`]s rooted at a
//! [`Document`], lets you walk it with a handful of direct lookups, and
//! renders any subtree back to text. Lexing is done by [`quick-xml`] in a
//! strict mode; tree building is driven through the [`EventHandler`] trait so
//! other event sources can feed a [`TreeBuilder`] too.
//!
//! # Overview
//!
//! The main types are:
//! - [`Document`]: the parsed tree; dereferences to its root [`Element`]
//! - [`Element`]: name, attributes, direct text `value`, children, position
//! - [`Node`]: an element, text run, CDATA section or comment
//! - [`FormatOptions`]: switches for rendering
//!
//! # Example
//!
//! ```rust
//! use xmldoc::parse;
//!
//! let doc = parse(r#"<book>
//!   <author><name isProper="true">George R. R. Martin</name></author>
//! </book>"#).unwrap();
//!
//! assert_eq!(doc.value_with_path("author.name"), Some("George R. R. Martin"));
//! assert_eq!(doc.value_with_path("author.name@isProper"), Some("true"));
//! assert!(doc.value_with_path("author.age").is_none());
//! ```
//!
//! # Rendering
//!
//! ```rust
//! use xmldoc::{parse, FormatOptions};
//!
//! let doc = parse("<root><command>&lt; &gt;</command></root>").unwrap();
//! let options = FormatOptions::default().with_compressed(true);
//! assert_eq!(
//!     doc.to_string_with_options(&options),
//!     "<root><command>&lt; &gt;</command></root>"
//! );
//! ```

pub mod builder;
pub mod error;
pub mod lexer;
pub mod node;
pub mod position;
pub mod query;
pub mod render;

pub use builder::{TreeBuilder, parse};
pub use error::{Error, Result};
pub use lexer::{EventHandler, Lexer};
pub use node::{Attributes, Document, Element, Node, NodeKind};
pub use position::Position;
pub use render::FormatOptions;
