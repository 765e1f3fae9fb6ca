use itertools::Itertools;
use lexer::Operator;

/// One step of an evaluated expression, in postfix order: operands are
/// pushed, operators pop their two operands and push the result.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum Instruction<'a> {
    #[display(fmt = "{}", _0)]
    Push(f64),
    #[display(fmt = "{}", _0)]
    Load(&'a str),
    #[display(fmt = "{}", _0)]
    Apply(Operator),
}

/// An expression in reverse-Polish order, as emitted by the parser.
/// Borrows identifier names from the source line and is discarded
/// after evaluation.
///
/// `Display` prints the instructions space-separated, so
/// `2*(1+1)` shows up as `"2 1 1 + *"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program<'a>(Vec<Instruction<'a>>);

impl<'a> Program<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction<'a>) {
        self.0.push(instruction);
    }

    pub fn instructions(&self) -> &[Instruction<'a>] {
        &self.0
    }
}

impl std::fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|i| i.to_string()).join(" "))
    }
}
