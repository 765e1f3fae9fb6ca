use log::trace;

// Value stack for one program run. Underflow and leftover values cannot
// happen on parser output: every Apply has its two operands and exactly
// one value remains at the end.
#[derive(Debug)]
pub(crate) struct Stack(Vec<f64>);

impl Stack {
    pub fn new() -> Self {
        Self(Vec::with_capacity(16))
    }

    pub fn push(&mut self, value: f64) {
        trace!("Pushing {}", value);
        self.0.push(value);
    }

    pub fn pop(&mut self) -> f64 {
        let value = self.0.pop().expect("Stack underflow");
        trace!("Popping {}", value);
        value
    }

    pub fn finish(mut self) -> f64 {
        let result = self.pop();
        debug_assert!(self.0.is_empty(), "Leftover values on the stack: {:?}", self.0);
        result
    }
}
