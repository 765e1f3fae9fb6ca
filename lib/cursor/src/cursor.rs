use std::{
    fmt::{Display, Formatter},
    str::Chars,
};

mod source_range;
pub use source_range::*;

/// Character cursor over a single input line. Cloning is cheap, which is
/// how callers rewind: keep a clone of an earlier position and continue
/// from it (or from a fresh cursor) instead of seeking.
#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    chars: Chars<'a>,
}

impl<'a> std::fmt::Debug for Cursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Printing the full source is usually too verbose, so by default
        // we only print the column
        if f.alternate() {
            f.debug_struct("Cursor")
                .field("col", &self.col())
                .field("source", &self.source)
                .finish()
        } else {
            f.debug_struct("Cursor").field("col", &self.col()).finish()
        }
    }
}

impl<'a> PartialEq for Cursor<'a> {
    fn eq(&self, other: &Self) -> bool {
        (self.source, self.chars.as_str()) == (other.source, other.chars.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Col(pub usize);

impl Display for Col {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars() }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    // O(n), intended for error reporting rather than hot paths.
    pub fn col(&self) -> Col {
        let consumed = self.source.len() - self.chars.as_str().len();
        Col(self.source[..consumed].chars().count() + 1)
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.chars.next()
    }
}

impl<'a> Cursor<'a> {
    pub fn slice_until<'c>(&self, end: &'c Cursor<'a>) -> &'a str {
        assert!(self.source == end.source);
        &self.source[(self.source.len() - self.chars.as_str().len())
            ..(self.source.len() - end.chars.as_str().len())]
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }
}

#[cfg(test)]
mod tests {
    use std::assert_eq;

    use super::*;

    #[test]
    fn slice_until() {
        let mut cursor: Cursor = "a+bc".into();

        cursor.next(); // 'a'

        let start = cursor.clone();

        cursor.next(); // '+'
        cursor.next(); // 'b'

        assert_eq!(start.slice_until(&cursor), "+b");
    }

    #[test]
    fn next_peek_and_col() {
        let mut cursor = Cursor::new("ab");

        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek_next(), Some('b'));
        assert_eq!(cursor.col(), Col(1));

        assert_eq!(cursor.next(), Some('a'));
        assert_eq!(cursor.col(), Col(2));

        let rewound = cursor.clone();

        assert_eq!(cursor.next(), Some('b'));
        assert_eq!(cursor.col(), Col(3));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.col(), Col(3));

        // A clone taken earlier still sees the rest of the line
        assert_eq!(rewound.peek(), Some('b'));

        cursor = "".into();
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.peek_next(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.col(), Col(1));
    }
}
