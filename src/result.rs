use crate::error::CalcError;
use std::fmt;

/// Outcome of a single or chained calculation.
///
/// Built only through [`CalculationResult::success`] and
/// [`CalculationResult::failure`]: a valid result never carries an error and
/// an invalid one always reports `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub result: f64,
    pub expression: String,
    pub is_valid: bool,
    pub error: Option<String>,
}

impl CalculationResult {
    pub fn success(expression: String, result: f64) -> Self {
        Self {
            result,
            expression,
            is_valid: true,
            error: None,
        }
    }

    pub fn failure(expression: String, error: &CalcError) -> Self {
        Self {
            result: 0.0,
            expression,
            is_valid: false,
            error: Some(error.message.clone()),
        }
    }

    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}

/// `<expression> = <result>` on success, `<expression> = error: <message>`
/// otherwise.
impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_valid {
            write!(f, "{} = {}", self.expression, format_number(self.result))
        } else {
            write!(f, "{} = error: {}", self.expression, self.error_message())
        }
    }
}

/// Shortest decimal rendering of `n`: whole numbers print without a
/// fractional part and negative zero prints as `0`. Magnitudes from 1e21 up
/// or below 1e-6 switch to exponent form, and infinities print as
/// `Infinity`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n.is_finite() && (n.abs() >= 1e21 || n.abs() < 1e-6) {
        format!("{:e}", n)
    } else {
        n.to_string()
    }
}
