use cursor::{Col, Cursor};

mod token;
pub use token::{Operator, Precedence, Token, TokenData, TokenType};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[col {col}] {error}")]
pub struct LexError {
    pub error: LexErrorType,
    pub col: Col,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LexErrorType {
    #[error("Unexpected character: '{0}'")]
    UnexpectedCharacter(char),
}

/// Lazy token sequence over one input line.
///
/// Yields tokens left to right, skipping runs of spaces and tabs. The
/// first character that matches no token grammar yields a [`LexError`]
/// and fuses the stream: no further tokens are produced for the line.
/// The stream is `Clone`, so callers can cheaply rescan from any
/// position (the parser uses this for assignment lookahead).
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), done: false }
    }

    fn consume_while(&mut self, matches: impl Fn(char) -> bool) {
        while self.cursor.peek().is_some_and(&matches) {
            self.cursor.next();
        }
    }

    fn number(&mut self, start: &Cursor<'a>) -> TokenData {
        self.consume_while(|c| c.is_ascii_digit());

        // A fractional part needs a digit after the dot; otherwise the
        // dot is left for the next scan step (where it fails as an
        // unexpected character, there is no trailing-dot number)
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next();
            self.consume_while(|c| c.is_ascii_digit());
        }

        let value =
            start.slice_until(&self.cursor).parse().expect("lexeme matches the number grammar");
        TokenData::Number(value)
    }

    fn identifier(&mut self) -> TokenData {
        self.consume_while(|c| c.is_ascii_alphanumeric());
        TokenData::Identifier
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while matches!(self.cursor.peek(), Some(' ' | '\t')) {
            self.cursor.next();
        }

        let start = self.cursor.clone();
        let data = match self.cursor.next()? {
            '=' => TokenData::Equal,
            '(' => TokenData::LeftParen,
            ')' => TokenData::RightParen,
            '+' => TokenData::Operator(Operator::Add),
            '-' => TokenData::Operator(Operator::Sub),
            '*' => TokenData::Operator(Operator::Mul),
            '/' => TokenData::Operator(Operator::Div),
            '%' => TokenData::Operator(Operator::Rem),
            d if d.is_ascii_digit() => self.number(&start),
            a if a.is_ascii_alphabetic() => self.identifier(),
            c => {
                self.done = true;
                return Some(Err(LexError {
                    error: LexErrorType::UnexpectedCharacter(c),
                    col: start.col(),
                }));
            }
        };

        Some(Ok(Token::new(data, (start, self.cursor.clone()))))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scan(source: &str) -> Vec<(TokenData, &str)> {
        TokenStream::new(source)
            .map(|token| {
                let token = token.unwrap();
                (token.data.clone(), token.lexeme())
            })
            .collect()
    }

    #[test]
    fn single_char_tokens() {
        use Operator::*;
        assert_eq!(
            scan("=()+-*/%"),
            vec![
                (TokenData::Equal, "="),
                (TokenData::LeftParen, "("),
                (TokenData::RightParen, ")"),
                (TokenData::Operator(Add), "+"),
                (TokenData::Operator(Sub), "-"),
                (TokenData::Operator(Mul), "*"),
                (TokenData::Operator(Div), "/"),
                (TokenData::Operator(Rem), "%"),
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(scan("123"), vec![(TokenData::Number(123.0), "123")]);
        assert_eq!(scan("1.5"), vec![(TokenData::Number(1.5), "1.5")]);
        assert_eq!(scan("0.25 7"), vec![(TokenData::Number(0.25), "0.25"), (TokenData::Number(7.0), "7")]);
    }

    #[test]
    fn no_leading_or_trailing_dot() {
        // "1." scans the number and then fails on the dangling dot
        let mut stream = TokenStream::new("1.");
        assert_eq!(stream.next().unwrap().unwrap().data, TokenData::Number(1.0));
        assert_eq!(
            stream.next().unwrap().unwrap_err(),
            LexError { error: LexErrorType::UnexpectedCharacter('.'), col: Col(2) }
        );

        let mut stream = TokenStream::new(".5");
        assert_eq!(
            stream.next().unwrap().unwrap_err(),
            LexError { error: LexErrorType::UnexpectedCharacter('.'), col: Col(1) }
        );
    }

    #[test]
    fn identifiers() {
        assert_eq!(scan("abc"), vec![(TokenData::Identifier, "abc")]);
        assert_eq!(
            scan("a1 b2c"),
            vec![(TokenData::Identifier, "a1"), (TokenData::Identifier, "b2c")]
        );
    }

    #[test]
    fn skips_spaces_and_tabs() {
        assert_eq!(
            scan(" \t a = 1 "),
            vec![
                (TokenData::Identifier, "a"),
                (TokenData::Equal, "="),
                (TokenData::Number(1.0), "1"),
            ]
        );
        assert_eq!(scan("   \t"), vec![]);
    }

    #[test]
    fn unexpected_character_fuses_the_stream() {
        let mut stream = TokenStream::new("&a");
        assert_eq!(
            stream.next().unwrap().unwrap_err(),
            LexError { error: LexErrorType::UnexpectedCharacter('&'), col: Col(1) }
        );
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn rescanning_via_clone() {
        let mut stream = TokenStream::new("a = 1");
        let rewound = stream.clone();

        assert_eq!(stream.next().unwrap().unwrap().data, TokenData::Identifier);
        assert_eq!(stream.next().unwrap().unwrap().data, TokenData::Equal);

        // The clone still starts at the beginning of the line
        let tokens: Vec<_> = rewound.map(|t| t.unwrap().data).collect();
        assert_eq!(
            tokens,
            vec![TokenData::Identifier, TokenData::Equal, TokenData::Number(1.0)]
        );
    }
}
