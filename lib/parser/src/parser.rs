use cursor::Col;
use lexer::{LexError, LexErrorType, Operator, Token, TokenData, TokenStream, TokenType};
use log::trace;
use program::{Instruction, Program};

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[col {col}] Error{}: {error}", if at.is_empty() { "".to_string() } else { format!(" at {at}") })]
pub struct ParseError {
    pub error: ParseErrorType,
    pub col: Col,
    pub at: String,
}

impl ParseError {
    pub fn new(error: ParseErrorType, col: Col, at: impl ToString) -> Self {
        Self { error, col, at: at.to_string() }
    }
}

impl From<LexError> for ParseError {
    fn from(value: LexError) -> Self {
        ParseError {
            error: ParseErrorType::LexError(value.error),
            col: value.col,
            at: "".to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("{0}")]
    LexError(LexErrorType),
    #[error("Unbalanced parentheses.")]
    UnbalancedParens,
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect operator.")]
    ExpectedOperator,
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
}

impl ParseErrorType {
    fn at(self, token: &Token) -> ParseError {
        ParseError::new(self, token.col(), format!("'{}'", token.lexeme()))
    }

    fn at_end(self, source: &str) -> ParseError {
        ParseError::new(self, Col(source.chars().count() + 1), "end")
    }
}

/// One fully parsed input line. Identifiers are captured as names only;
/// nothing is resolved against the environment at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Assignment { name: &'a str, expr: Program<'a> },
    Expression(Program<'a>),
}

/// Parses one line into a [`Statement`] whose expression is a postfix
/// [`Program`], using the shunting-yard algorithm: operands go straight
/// to the program, operators wait on a stack until an operator of no
/// higher precedence (or a closing paren, or the end of input) flushes
/// them. Popping operators of *equal* precedence before pushing makes
/// `- / %` chains left-associative, so `10-5-2` is `(10-5)-2`.
#[derive(Debug)]
pub struct Parser<'a> {
    token_stream: TokenStream<'a>,
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { token_stream: TokenStream::new(source), source }
    }

    pub fn parse(mut self) -> Result<Statement<'a>> {
        if let Some(target) = self.assignment_target() {
            trace!("Parsing assignment to '{}'", target.lexeme());
            let expr = self.expression()?;
            return Ok(Statement::Assignment { name: target.lexeme(), expr });
        }

        Ok(Statement::Expression(self.expression()?))
    }

    // A line is an assignment iff it starts with exactly `Identifier '='`.
    // The lookahead runs on a clone of the stream; when it does not match,
    // the untouched original rescans the line as a bare expression.
    fn assignment_target(&mut self) -> Option<Token<'a>> {
        let mut probe = self.token_stream.clone();
        match (probe.next()?, probe.next()?) {
            (Ok(target), Ok(equal))
                if target.ty() == TokenType::Identifier && equal.ty() == TokenType::Equal =>
            {
                self.token_stream = probe;
                Some(target)
            }
            _ => None,
        }
    }

    fn expression(&mut self) -> Result<Program<'a>> {
        let mut program = Program::new();
        // Waiting operators and '(' markers; whole tokens are stacked so
        // errors can point at them
        let mut pending: Vec<Token<'a>> = Vec::new();

        'operand: loop {
            let token = self
                .advance()?
                .ok_or_else(|| ParseErrorType::ExpectedExpression.at_end(self.source))?;
            match token.data {
                TokenData::Number(value) => program.push(Instruction::Push(value)),
                TokenData::Identifier => program.push(Instruction::Load(token.lexeme())),
                TokenData::LeftParen => {
                    pending.push(token);
                    continue 'operand;
                }
                TokenData::RightParen => {
                    let error = if pending.iter().any(|t| t.data == TokenData::LeftParen) {
                        ParseErrorType::ExpectedExpression
                    } else {
                        ParseErrorType::UnbalancedParens
                    };
                    return Err(error.at(&token));
                }
                _ => return Err(ParseErrorType::ExpectedExpression.at(&token)),
            }

            loop {
                let token = match self.advance()? {
                    Some(token) => token,
                    None => break 'operand,
                };
                match token.data {
                    TokenData::Operator(operator) => {
                        Self::flush_higher_or_equal(&mut pending, &mut program, operator);
                        pending.push(token);
                        continue 'operand;
                    }
                    TokenData::RightParen => {
                        Self::close_paren(&mut pending, &mut program, &token)?
                    }
                    TokenData::Equal => {
                        return Err(ParseErrorType::InvalidAssignmentTarget.at(&token))
                    }
                    _ => return Err(ParseErrorType::ExpectedOperator.at(&token)),
                }
            }
        }

        for token in pending.into_iter().rev() {
            match token.data {
                TokenData::Operator(operator) => program.push(Instruction::Apply(operator)),
                TokenData::LeftParen => return Err(ParseErrorType::UnbalancedParens.at(&token)),
                _ => unreachable!("only operators and '(' are stacked"),
            }
        }

        trace!("Parsed \"{}\" into [{}]", self.source, program);
        Ok(program)
    }

    fn flush_higher_or_equal(
        pending: &mut Vec<Token<'a>>,
        program: &mut Program<'a>,
        operator: Operator,
    ) {
        while let Some(top) = pending.last() {
            match top.data {
                TokenData::Operator(stacked) if stacked.precedence() >= operator.precedence() => {
                    program.push(Instruction::Apply(stacked));
                    pending.pop();
                }
                _ => break,
            }
        }
    }

    fn close_paren(
        pending: &mut Vec<Token<'a>>,
        program: &mut Program<'a>,
        right_paren: &Token<'a>,
    ) -> Result<()> {
        loop {
            match pending.pop() {
                Some(token) => match token.data {
                    TokenData::Operator(operator) => program.push(Instruction::Apply(operator)),
                    TokenData::LeftParen => return Ok(()),
                    _ => unreachable!("only operators and '(' are stacked"),
                },
                None => return Err(ParseErrorType::UnbalancedParens.at(right_paren)),
            }
        }
    }

    fn advance(&mut self) -> Result<Option<Token<'a>>> {
        self.token_stream.next().transpose().map_err(ParseError::from)
    }
}
