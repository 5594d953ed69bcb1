//! Text rendering of nodes.
//!
//! The output is meant for reading and debugging. It is not canonical XML:
//! entity handling and whitespace are best effort, and a CDATA section whose
//! body contains `]]>` is written out unchanged.

use crate::{Document, Element, Node};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content longer than this many characters is cut when `trimmed` is set.
const TRUNCATE_AT: usize = 25;

const ELLIPSIS: char = '…';

/// Tags rendered self-closing in `html` mode when they have no children.
const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "frame", "hr", "img", "input", "keygen", "link",
    "menuitem", "meta", "param", "source", "track", "wbr",
];

/// Formatting switches for rendering. All default to off.
///
/// Deserializes from camelCase keys, so options can come from a JSON or YAML
/// configuration file:
///
/// ```rust
/// use xmldoc::FormatOptions;
///
/// let options: FormatOptions =
///     serde_json::from_str(r#"{"compressed": true, "preserveWhitespace": true}"#).unwrap();
/// assert!(options.compressed && options.preserve_whitespace);
/// assert!(!options.html);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FormatOptions {
    /// No indentation and no line breaks between children.
    pub compressed: bool,

    /// Cut text, CDATA and comment content to its first 25 characters plus `…`.
    pub trimmed: bool,

    /// Keep leading and trailing whitespace of text content.
    pub preserve_whitespace: bool,

    /// Render childless non-void elements as `<tag></tag>`.
    pub html: bool,
}

impl FormatOptions {
    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    pub fn with_trimmed(mut self, trimmed: bool) -> Self {
        self.trimmed = trimmed;
        self
    }

    pub fn with_preserve_whitespace(mut self, preserve_whitespace: bool) -> Self {
        self.preserve_whitespace = preserve_whitespace;
        self
    }

    pub fn with_html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }
}

impl Node {
    pub fn to_string_with_options(&self, options: &FormatOptions) -> String {
        self.to_string_with_indent("", options)
    }

    /// Render with every line of this node's output prefixed by `indent`.
    pub fn to_string_with_indent(&self, indent: &str, options: &FormatOptions) -> String {
        let mut out = String::new();
        write_node(&mut out, self, indent, options);
        out
    }
}

impl Element {
    pub fn to_string_with_options(&self, options: &FormatOptions) -> String {
        self.to_string_with_indent("", options)
    }

    /// Render with every line of this element's output prefixed by `indent`.
    pub fn to_string_with_indent(&self, indent: &str, options: &FormatOptions) -> String {
        let mut out = String::new();
        write_element(&mut out, self, indent, options);
        out
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_options(&FormatOptions::default()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_options(&FormatOptions::default()))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

fn write_node(out: &mut String, node: &Node, indent: &str, options: &FormatOptions) {
    match node {
        Node::Element(element) => write_element(out, element, indent, options),
        Node::Text(text) => {
            out.push_str(indent);
            out.push_str(&format_content(text, true, options));
        }
        Node::CData(cdata) => {
            out.push_str(indent);
            out.push_str("<![CDATA[");
            out.push_str(&format_content(cdata, false, options));
            out.push_str("]]>");
        }
        Node::Comment(comment) => {
            out.push_str(indent);
            out.push_str("<!--");
            out.push_str(&format_content(comment, true, options));
            out.push_str("-->");
        }
    }
}

fn write_element(out: &mut String, element: &Element, indent: &str, options: &FormatOptions) {
    out.push_str(indent);
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    match element.children.as_slice() {
        [] => {
            if options.html && !HTML_VOID_ELEMENTS.contains(&element.name.as_str()) {
                out.push_str("></");
                out.push_str(&element.name);
                out.push('>');
            } else {
                out.push_str("/>");
            }
        }
        [only] if !only.is_element() => {
            out.push('>');
            write_node(out, only, "", options);
            write_close_tag(out, &element.name);
        }
        children => {
            let linebreak = if options.compressed { "" } else { "\n" };
            let child_indent = if options.compressed {
                indent.to_string()
            } else {
                format!("{indent}  ")
            };

            out.push('>');
            out.push_str(linebreak);
            for child in children {
                write_node(out, child, &child_indent, options);
                out.push_str(linebreak);
            }
            out.push_str(indent);
            write_close_tag(out, &element.name);
        }
    }
}

fn write_close_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Apply truncation, escaping and whitespace policy to raw node content.
fn format_content(raw: &str, escape_entities: bool, options: &FormatOptions) -> String {
    let content = if options.trimmed && raw.chars().count() > TRUNCATE_AT {
        let head: String = raw.chars().take(TRUNCATE_AT).collect();
        let mut head = if options.preserve_whitespace {
            head
        } else {
            head.trim().to_string()
        };
        head.push(ELLIPSIS);
        head
    } else {
        raw.to_string()
    };

    let content = if escape_entities {
        escape(&content)
    } else {
        content
    };

    if options.preserve_whitespace {
        content
    } else {
        content.trim().to_string()
    }
}

/// Replace the five XML special characters with their entities.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, children: Vec<Node>) -> Element {
        let mut element = Element::new(name, Vec::<(String, String)>::new());
        for child in children {
            element.push_child(child);
        }
        element
    }

    fn text(content: &str) -> Node {
        Node::Text(content.to_string())
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_single_text_child_renders_inline() {
        let hello = element("hello", vec![text("world")]);
        assert_eq!(hello.to_string(), "<hello>world</hello>");
        assert_eq!(
            hello.to_string_with_options(&FormatOptions::default().with_compressed(true)),
            "<hello>world</hello>"
        );
    }

    #[test]
    fn test_nested_children_are_indented() {
        let root = element(
            "root",
            vec![element("a", vec![text("x")]).into(), element("b", vec![]).into()],
        );

        insta::assert_snapshot!(root.to_string(), @r"
        <root>
          <a>x</a>
          <b/>
        </root>
        ");
        assert_eq!(
            root.to_string_with_options(&FormatOptions::default().with_compressed(true)),
            "<root><a>x</a><b/></root>"
        );
    }

    #[test]
    fn test_indent_prefix_applies_to_every_line() {
        let root = element("root", vec![element("a", vec![]).into()]);
        assert_eq!(
            root.to_string_with_indent("    ", &FormatOptions::default()),
            "    <root>\n      <a/>\n    </root>"
        );
    }

    #[test]
    fn test_mixed_content_trims_text() {
        let p = element(
            "p",
            vec![
                text("Hello "),
                element("b", vec![text("world")]).into(),
                text("!"),
            ],
        );

        insta::assert_snapshot!(p.to_string(), @r"
        <p>
          Hello
          <b>world</b>
          !
        </p>
        ");
    }

    #[test]
    fn test_whitespace_policy() {
        let p = element("p", vec![text("  padded  ")]);

        assert_eq!(p.to_string(), "<p>padded</p>");
        assert_eq!(
            p.to_string_with_options(&FormatOptions::default().with_preserve_whitespace(true)),
            "<p>  padded  </p>"
        );
    }

    #[test]
    fn test_trimmed_truncates_long_content() {
        let options = FormatOptions::default().with_trimmed(true);

        let long = element("p", vec![text("abcdefghijklmnopqrstuvwxyz0123")]);
        assert_eq!(
            long.to_string_with_options(&options),
            "<p>abcdefghijklmnopqrstuvwxy…</p>"
        );

        let short = element("p", vec![text("exactly twenty-five chars")]);
        assert_eq!(
            short.to_string_with_options(&options),
            "<p>exactly twenty-five chars</p>"
        );
    }

    #[test]
    fn test_trimmed_counts_raw_characters() {
        // 20 ampersands escape to 100 characters but are only 20 raw ones
        let amps = "&".repeat(20);
        let p = element("p", vec![text(&amps)]);
        let rendered = p.to_string_with_options(&FormatOptions::default().with_trimmed(true));
        assert_eq!(rendered, format!("<p>{}</p>", "&amp;".repeat(20)));
    }

    #[test]
    fn test_trimmed_strips_whitespace_before_ellipsis() {
        let p = element("p", vec![text("twenty-four characters.. and then some")]);
        assert_eq!(
            p.to_string_with_options(&FormatOptions::default().with_trimmed(true)),
            "<p>twenty-four characters..…</p>"
        );
    }

    #[test]
    fn test_trimmed_keeps_whitespace_when_preserved() {
        let p = element("p", vec![text("   leading spaces then a long tail")]);

        let preserved = FormatOptions::default()
            .with_trimmed(true)
            .with_preserve_whitespace(true);
        assert_eq!(
            p.to_string_with_options(&preserved),
            "<p>   leading spaces then a …</p>"
        );
        assert_eq!(
            p.to_string_with_options(&FormatOptions::default().with_trimmed(true)),
            "<p>leading spaces then a…</p>"
        );
    }

    #[test]
    fn test_trimmed_truncates_cdata_and_comments() {
        let options = FormatOptions::default().with_trimmed(true);

        let cdata = element(
            "c",
            vec![Node::CData("0123456789abcdefghijklmnopqrstuvwxyz".to_string())],
        );
        assert_eq!(
            cdata.to_string_with_options(&options),
            "<c><![CDATA[0123456789abcdefghijklmno…]]></c>"
        );

        let comment = Node::Comment("this comment is definitely too long".to_string());
        assert_eq!(
            comment.to_string_with_options(&options),
            "<!--this comment is definitel…-->"
        );
    }

    #[test]
    fn test_cdata_and_comments() {
        let root = element(
            "root",
            vec![
                Node::CData("<raw & ready>".to_string()),
                Node::Comment(" a < b ".to_string()),
            ],
        );

        insta::assert_snapshot!(root.to_string(), @r"
        <root>
          <![CDATA[<raw & ready>]]>
          <!--a &lt; b-->
        </root>
        ");
    }

    #[test]
    fn test_attributes_are_escaped_in_order() {
        let mut a = Element::new("a", [("href", "?x=1&y=2"), ("title", "\"quoted\"")]);
        a.push_child(text("link"));
        assert_eq!(
            a.to_string(),
            r#"<a href="?x=1&amp;y=2" title="&quot;quoted&quot;">link</a>"#
        );
    }

    #[test]
    fn test_html_empty_elements() {
        let html = FormatOptions::default().with_html(true);
        let br = element("br", vec![]);
        let custom = element("custom", vec![]);

        assert_eq!(br.to_string_with_options(&html), "<br/>");
        assert_eq!(custom.to_string_with_options(&html), "<custom></custom>");
        assert_eq!(br.to_string(), "<br/>");
        assert_eq!(custom.to_string(), "<custom/>");
    }

    #[test]
    fn test_html_void_elements_self_close() {
        let html = FormatOptions::default().with_html(true);
        let img = Element::new("img", [("src", "a.png")]);

        assert_eq!(img.to_string_with_options(&html), r#"<img src="a.png"/>"#);
        assert_eq!(element("hr", vec![]).to_string_with_options(&html), "<hr/>");
        assert_eq!(
            element("div", vec![]).to_string_with_options(&html),
            "<div></div>"
        );
    }

    #[test]
    fn test_options_deserialize_from_camel_case() {
        let options: FormatOptions =
            serde_json::from_str(r#"{"trimmed": true, "html": true}"#).unwrap();
        assert_eq!(
            options,
            FormatOptions::default().with_trimmed(true).with_html(true)
        );

        let err = serde_json::from_str::<FormatOptions>(r#"{"pretty": true}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let root = element(
            "root",
            vec![text("a"), element("b", vec![text("c")]).into()],
        );
        let options = FormatOptions::default().with_trimmed(true);
        assert_eq!(
            root.to_string_with_options(&options),
            root.to_string_with_options(&options)
        );
    }
}
