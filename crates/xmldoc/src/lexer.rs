//! Strict-mode lexical event source on top of quick-xml.

use crate::position::SourceCursor;
use crate::{Attributes, Error, Position, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Receives lexical events in document order.
///
/// Every callback can abort the feed by returning an error, which is passed
/// straight back to the caller of [`Lexer::feed`].
pub trait EventHandler {
    /// An open tag. Self-closing tags are reported as an open tag followed
    /// immediately by [`close_tag`](EventHandler::close_tag).
    fn open_tag(&mut self, name: &str, attributes: Attributes, position: Position) -> Result<()>;

    fn close_tag(&mut self) -> Result<()>;

    /// Character data, already unescaped.
    fn text(&mut self, text: &str) -> Result<()>;

    fn cdata(&mut self, cdata: &str) -> Result<()>;

    fn comment(&mut self, comment: &str) -> Result<()>;

    /// Doctype declaration body. Handlers without a doctype sink ignore it.
    fn doctype(&mut self, _doctype: &str) -> Result<()> {
        Ok(())
    }

    /// The input is not well-formed. The default aborts with `error`.
    fn error(&mut self, error: Error) -> Result<()> {
        Err(error)
    }
}

/// Drives an [`EventHandler`] from XML text.
///
/// The lexer is strict: it stops at the first well-formedness problem and
/// reports it through [`EventHandler::error`]. Besides the reader's own syntax
/// checks this covers tags left open at end of input, a second root element,
/// and text outside the root element. Whitespace outside the root element,
/// processing instructions and the XML declaration are not reported.
pub struct Lexer<'a> {
    source: &'a str,
    reader: Reader<&'a [u8]>,
    cursor: SourceCursor<'a>,
    depth: usize,
    seen_root: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.trim_text_start = false;
        config.trim_text_end = false;
        config.expand_empty_elements = true;
        config.check_end_names = true;
        config.check_comments = true;

        Self {
            source,
            reader,
            cursor: SourceCursor::new(source),
            depth: 0,
            seen_root: false,
        }
    }

    /// Feed the whole input to `handler`, consuming the lexer.
    pub fn feed<H: EventHandler + ?Sized>(mut self, handler: &mut H) -> Result<()> {
        loop {
            let event_start = self.reader.buffer_position() as usize;

            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let position = self.reader.error_position() as usize;
                    return handler.error(self.malformed(err.to_string(), position));
                }
            };

            match event {
                // `expand_empty_elements` reports `<a/>` as Start followed by End
                Event::Start(start) | Event::Empty(start) => {
                    if let Err(err) = self.open(&start, event_start, handler) {
                        return err.report(handler);
                    }
                }
                Event::End(_) => {
                    self.depth = self.depth.saturating_sub(1);
                    handler.close_tag()?;
                }
                Event::Text(text) => {
                    let text = match text.unescape() {
                        Ok(text) => text,
                        Err(err) => {
                            let err = self.malformed(format!("invalid text: {err}"), event_start);
                            return handler.error(err);
                        }
                    };
                    if self.depth == 0 {
                        if text.trim().is_empty() {
                            continue;
                        }
                        let err = self.malformed("text data outside of root node", event_start);
                        return handler.error(err);
                    }
                    handler.text(&text)?;
                }
                Event::CData(cdata) => {
                    if self.depth == 0 {
                        let err = self.malformed("CDATA outside of root node", event_start);
                        return handler.error(err);
                    }
                    handler.cdata(&String::from_utf8_lossy(&cdata))?;
                }
                Event::Comment(comment) => {
                    handler.comment(&String::from_utf8_lossy(&comment))?;
                }
                Event::DocType(doctype) => {
                    if self.seen_root {
                        let err = self.malformed("doctype after root element", event_start);
                        return handler.error(err);
                    }
                    handler.doctype(&String::from_utf8_lossy(&doctype))?;
                }
                Event::PI(_) | Event::Decl(_) => {}
                Event::Eof => break,
            }
        }

        if self.depth > 0 {
            let err = self.malformed("unclosed root tag", self.source.len());
            return handler.error(err);
        }
        if !self.seen_root {
            let err = self.malformed("document has no root element", self.source.len());
            return handler.error(err);
        }
        Ok(())
    }

    /// Report an open tag. Lexical problems come back as `Halt::Malformed`
    /// so they can still be routed through [`EventHandler::error`].
    fn open<H: EventHandler + ?Sized>(
        &mut self,
        start: &BytesStart<'_>,
        event_start: usize,
        handler: &mut H,
    ) -> std::result::Result<(), Halt> {
        if self.depth == 0 && self.seen_root {
            return Err(Halt::Malformed(
                self.malformed("multiple root elements", event_start),
            ));
        }

        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let attributes = self
            .read_attributes(start, event_start)
            .map_err(Halt::Malformed)?;
        let position = self.open_tag_position(event_start);

        self.depth += 1;
        self.seen_root = true;
        handler
            .open_tag(&name, attributes, position)
            .map_err(Halt::Handler)
    }

    fn read_attributes(&mut self, start: &BytesStart<'_>, event_start: usize) -> Result<Attributes> {
        let mut attributes = Attributes::new();

        // Duplicates are allowed; the last value wins.
        for attr in start.attributes().with_checks(false) {
            let attr = attr
                .map_err(|err| self.malformed(format!("invalid attribute: {err}"), event_start))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| {
                self.malformed(format!("invalid attribute value: {err}"), event_start)
            })?;
            attributes.insert(key, value.into_owned());
        }

        Ok(attributes)
    }

    /// Position of the open tag just read. The reader sits right after its `>`.
    ///
    /// `event_start` is where the reader stood before the tag. The tag's `<` is
    /// the first one from there on: preceding text cannot contain a raw `<`,
    /// and stepping back one byte covers a reader that already consumed it.
    fn open_tag_position(&mut self, event_start: usize) -> Position {
        let end = (self.reader.buffer_position() as usize).min(self.source.len());
        let from = event_start.saturating_sub(1).min(end);
        let start = self.source[from..end]
            .find('<')
            .map_or(from, |offset| from + offset);

        let start = self.cursor.locate(start);
        let end = self.cursor.locate(end);
        Position {
            line: end.line,
            column: end.column,
            absolute_position: end.chars,
            start_tag_position: start.chars,
        }
    }

    fn malformed(&mut self, message: impl Into<String>, byte_offset: usize) -> Error {
        let location = self.cursor.locate(byte_offset);
        Error::MalformedXml {
            message: message.into(),
            line: location.line,
            column: location.column,
            position: location.chars,
        }
    }
}

/// Why reporting an open tag stopped.
enum Halt {
    Malformed(Error),
    Handler(Error),
}

impl Halt {
    fn report<H: EventHandler + ?Sized>(self, handler: &mut H) -> Result<()> {
        match self {
            Halt::Malformed(err) => handler.error(err),
            Halt::Handler(err) => Err(err),
        }
    }
}
