use log::{debug, trace};
use parser::{ParseError, Parser, Statement};
use program::{Instruction, Program};

#[path = "eval/environment.rs"]
mod environment;
pub use environment::Environment;

#[path = "eval/stack.rs"]
mod stack;
use stack::Stack;

pub type Result<T> = std::result::Result<T, InterpretError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InterpretError {
    #[error("{0}")]
    ParseError(#[from] ParseError),
    #[error("{0}")]
    RuntimeError(#[from] RuntimeError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(String),
}

/// One calculator session: parses and evaluates input lines one at a
/// time, keeping variable bindings across lines.
///
/// Lines are atomic: a failing line reports its error and leaves the
/// environment untouched (an assignment is written only after its
/// expression evaluated successfully). No error is fatal, the session
/// stays usable for the next line.
#[derive(Debug, Default)]
pub struct Session {
    globals: Environment,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Runs one input line (trailing newline already stripped) and
    /// returns its value. Assignments return the assigned value.
    pub fn run_line(&mut self, line: &str) -> Result<f64> {
        match Parser::new(line).parse()? {
            Statement::Expression(program) => self.eval(&program),
            Statement::Assignment { name, expr } => {
                let value = self.eval(&expr)?;
                debug!("Binding {} = {}", name, value);
                self.globals.define(name, value);
                Ok(value)
            }
        }
    }

    fn eval(&self, program: &Program) -> Result<f64> {
        trace!("Evaluating [{}]", program);
        let mut stack = Stack::new();

        for instruction in program.instructions() {
            match *instruction {
                Instruction::Push(value) => stack.push(value),
                Instruction::Load(name) => {
                    let value = self
                        .globals
                        .get(name)
                        .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))?;
                    stack.push(value);
                }
                Instruction::Apply(operator) => {
                    let right = stack.pop();
                    let left = stack.pop();
                    stack.push(operator.apply(left, right));
                }
            }
        }

        Ok(stack.finish())
    }
}
