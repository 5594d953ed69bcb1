//! Source positions captured while building a tree.

/// Where an element's open tag sits in the source text.
///
/// All fields count characters (not bytes) and are 0-based. `line` and
/// `column` describe the point just after the open tag's `>`, which is also
/// what `absolute_position` records; `start_tag_position` is the offset of the
/// tag's `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub absolute_position: usize,
    pub start_tag_position: usize,
}

/// A line/column/character location inside some source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    /// Byte offset this location was computed for.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    /// Number of characters before `offset`.
    pub chars: usize,
}

/// Converts byte offsets to [`Location`]s.
///
/// Lexer positions only ever move forward, so the cursor resumes from the last
/// location it computed instead of rescanning the source every time. Asking
/// for an offset behind the cursor restarts the scan from the beginning.
#[derive(Debug)]
pub struct SourceCursor<'a> {
    source: &'a str,
    current: Location,
}

impl<'a> SourceCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            current: Location::default(),
        }
    }

    /// Locate `offset`, clamped to the end of the source.
    pub fn locate(&mut self, offset: usize) -> Location {
        let offset = offset.min(self.source.len());
        if offset < self.current.offset {
            self.current = Location::default();
        }

        let mut location = self.current;
        let rest = self.source.get(location.offset..).unwrap_or_default();
        for (idx, ch) in rest.char_indices() {
            if location.offset + idx >= offset {
                break;
            }
            if ch == '\n' {
                location.line += 1;
                location.column = 0;
            } else {
                location.column += 1;
            }
            location.chars += 1;
        }
        location.offset = offset;

        self.current = location;
        location
    }
}
