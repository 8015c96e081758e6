// calc: a command-line arithmetic evaluator
//
// Evaluates a single `<num> <op> <num>` calculation or a left-to-right chain
// of operator/operand pairs, rendering each as a readable expression with
// its result or an explanatory error.

// Public modules
pub mod error;
pub mod evaluator;
pub mod operator;
pub mod result;
pub mod runner;

// Re-export commonly used items
pub use error::{CalcError, ErrorKind, Span};
pub use evaluator::{ChainStep, Evaluator};
pub use operator::Operator;
pub use result::{format_number, CalculationResult};

// Re-export main functions
pub use runner::run;
