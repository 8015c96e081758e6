use crate::error::CalcError;
use crate::operator::Operator;
use crate::result::{format_number, CalculationResult};
use tracing::trace;

/// Results are rounded to this many decimal places to hide floating point noise.
const PRECISION: f64 = 1_000_000.0;

/// One link of a chained calculation. The operator of the first step is
/// ignored; its operand only seeds the running result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStep {
    pub operand: f64,
    pub operator: Operator,
}

impl ChainStep {
    pub fn new(operand: f64, operator: Operator) -> Self {
        Self { operand, operator }
    }
}

/// Stateless evaluator for single and chained binary operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, left: f64, operator: Operator, right: f64) -> CalculationResult {
        let expression = format!(
            "{} {} {}",
            format_number(left),
            operator,
            format_number(right)
        );

        match apply(left, operator, right) {
            Ok(value) => CalculationResult::success(expression, round(value)),
            Err(error) => CalculationResult::failure(expression, &error),
        }
    }

    /// Like [`Evaluator::evaluate`], but takes the operator as raw text.
    /// Unknown symbols are reported in the result instead of evaluated.
    pub fn evaluate_symbol(&self, left: f64, symbol: &str, right: f64) -> CalculationResult {
        match symbol.parse::<Operator>() {
            Ok(operator) => self.evaluate(left, operator, right),
            Err(error) => {
                let expression = format!(
                    "{} {} {}",
                    format_number(left),
                    symbol,
                    format_number(right)
                );
                CalculationResult::failure(expression, &error)
            }
        }
    }

    /// Applies each step to the running result from left to right, stopping
    /// at the first failing step and returning its result as-is.
    pub fn evaluate_chain(&self, steps: &[ChainStep]) -> CalculationResult {
        let Some((first, rest)) = steps.split_first().filter(|(_, rest)| !rest.is_empty())
        else {
            return CalculationResult::failure(String::new(), &CalcError::invalid_chain_length());
        };

        let mut running = first.operand;
        let mut expression = format_number(running);

        for step in rest {
            let calc = self.evaluate(running, step.operator, step.operand);
            if !calc.is_valid {
                trace!(expression = %calc.expression, "chain stopped at failing step");
                return calc;
            }
            trace!(step = %calc.expression, result = calc.result, "chain step");
            running = calc.result;
            expression.push_str(&format!(
                " {} {}",
                step.operator,
                format_number(step.operand)
            ));
        }

        CalculationResult::success(expression, running)
    }
}

fn apply(left: f64, operator: Operator, right: f64) -> Result<f64, CalcError> {
    match operator {
        Operator::Add => Ok(left + right),
        Operator::Subtract => Ok(left - right),
        Operator::Multiply => Ok(left * right),
        Operator::Divide => {
            if right == 0.0 {
                Err(CalcError::division_by_zero())
            } else {
                Ok(left / right)
            }
        }
        Operator::Power => Ok(left.powf(right)),
        Operator::Modulo => {
            if right == 0.0 {
                Err(CalcError::modulo_by_zero())
            } else {
                Ok(left % right)
            }
        }
    }
}

// Halves round toward positive infinity. Scaled values at or above 2^52 are
// already integral and pass through unchanged.
fn round(value: f64) -> f64 {
    let scaled = value * PRECISION;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / PRECISION
}
