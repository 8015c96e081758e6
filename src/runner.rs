use crate::error::{CalcError, Span};
use crate::evaluator::{ChainStep, Evaluator};
use crate::operator::Operator;
use crate::result::{format_number, CalculationResult};
use std::io::{self, Write};
use std::panic::{self, UnwindSafe};
use tracing::debug;

/// Single calculations shown by the demo, including both zero divisor failures.
const DEMO_CALCULATIONS: [(f64, Operator, f64); 8] = [
    (10.0, Operator::Add, 5.0),
    (20.0, Operator::Subtract, 8.0),
    (6.0, Operator::Multiply, 7.0),
    (15.0, Operator::Divide, 3.0),
    (2.0, Operator::Power, 3.0),
    (17.0, Operator::Modulo, 5.0),
    (10.0, Operator::Divide, 0.0),
    (10.0, Operator::Modulo, 0.0),
];

const DEMO_CHAIN: [ChainStep; 5] = [
    ChainStep { operand: 10.0, operator: Operator::Add },
    ChainStep { operand: 5.0, operator: Operator::Add },
    ChainStep { operand: 2.0, operator: Operator::Multiply },
    ChainStep { operand: 3.0, operator: Operator::Subtract },
    ChainStep { operand: 3.0, operator: Operator::Divide },
];

/// Entry point shared by the binary and the tests.
///
/// With `chain` set the arguments are read as `<num> (<op> <num>)+`. Otherwise
/// exactly three arguments are evaluated as `<num> <op> <num>`, and any other
/// count runs the built-in demonstration. Every failure is written to `out` as
/// text; the returned error only reflects I/O problems.
pub fn run<W: Write>(args: &[String], chain: bool, out: &mut W) -> io::Result<()> {
    let evaluator = Evaluator::new();

    if chain {
        debug!(count = args.len(), "running chain from arguments");
        run_chain(&evaluator, args, out)
    } else if args.len() == 3 {
        debug!(?args, "running single calculation");
        run_single(&evaluator, args, out)
    } else {
        debug!(count = args.len(), "argument count is not 3, running demo");
        run_demo(&evaluator, out)
    }
}

fn run_single<W: Write>(evaluator: &Evaluator, args: &[String], out: &mut W) -> io::Result<()> {
    let operands = parse_operand(args, 0).and_then(|left| Ok((left, parse_operand(args, 2)?)));
    let (left, right) = match operands {
        Ok(operands) => operands,
        Err(error) => return report_input_error(&error, args, out),
    };

    if let Err(error) = args[1].parse::<Operator>() {
        error.with_span(arg_span(args, 1)).report(&command_line(args))?;
    }

    let result = evaluate_guarded(evaluator, left, &args[1], right);
    write_outcome(&result, out)
}

fn run_chain<W: Write>(evaluator: &Evaluator, args: &[String], out: &mut W) -> io::Result<()> {
    let steps = match parse_chain(args) {
        Ok(steps) => steps,
        Err(error) => return report_input_error(&error, args, out),
    };

    let result = evaluator.evaluate_chain(&steps);
    write_outcome(&result, out)
}

fn run_demo<W: Write>(evaluator: &Evaluator, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Calculator Demo ===")?;
    writeln!(out)?;

    for (left, operator, right) in DEMO_CALCULATIONS {
        writeln!(out, "{}", evaluator.evaluate(left, operator, right))?;
    }

    writeln!(out)?;
    writeln!(out, "=== Chain Calculation ===")?;
    write_outcome(&evaluator.evaluate_chain(&DEMO_CHAIN), out)
}

/// Runs one evaluation, converting a panic into a computation error result.
pub fn evaluate_guarded(
    evaluator: &Evaluator,
    left: f64,
    symbol: &str,
    right: f64,
) -> CalculationResult {
    let expression = format!(
        "{} {} {}",
        format_number(left),
        symbol,
        format_number(right)
    );
    guard(expression, || evaluator.evaluate_symbol(left, symbol, right))
}

/// Calls `evaluate`; if it panics, returns a failure for `expression` carrying
/// the panic message.
pub fn guard<F>(expression: String, evaluate: F) -> CalculationResult
where
    F: FnOnce() -> CalculationResult + UnwindSafe,
{
    match panic::catch_unwind(evaluate) {
        Ok(result) => result,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("unknown error");
            debug!(%expression, detail, "evaluation panicked");
            CalculationResult::failure(expression, &CalcError::computation(detail))
        }
    }
}

/// Top-level results print the bare message on failure.
fn write_outcome<W: Write>(result: &CalculationResult, out: &mut W) -> io::Result<()> {
    if result.is_valid {
        writeln!(out, "{}", result)
    } else {
        writeln!(out, "error: {}", result.error_message())
    }
}

fn report_input_error<W: Write>(error: &CalcError, args: &[String], out: &mut W) -> io::Result<()> {
    debug!(kind = ?error.kind, "rejected command line input");
    writeln!(out, "error: {}", error)?;
    error.report(&command_line(args))
}

fn parse_chain(args: &[String]) -> Result<Vec<ChainStep>, CalcError> {
    if args.is_empty() {
        return Ok(Vec::new());
    }

    let mut steps = vec![ChainStep::new(parse_operand(args, 0)?, Operator::Add)];
    for index in (1..args.len()).step_by(2) {
        let operator = args[index]
            .parse::<Operator>()
            .map_err(|error| error.with_span(arg_span(args, index)))?;
        if index + 1 >= args.len() {
            return Err(CalcError::missing_operand().with_span(arg_span(args, index)));
        }
        steps.push(ChainStep::new(parse_operand(args, index + 1)?, operator));
    }

    Ok(steps)
}

fn parse_operand(args: &[String], index: usize) -> Result<f64, CalcError> {
    args[index]
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            CalcError::invalid_number()
                .with_span(arg_span(args, index))
                .with_help("Operands must be decimal numbers such as 42, -3.5 or 1e3")
        })
}

/// Arguments joined back into one line for diagnostics. The trailing space
/// keeps a label on an empty final argument in range.
fn command_line(args: &[String]) -> String {
    let mut line = args.join(" ");
    line.push(' ');
    line
}

/// Character span of `args[index]` within [`command_line`], at least one
/// character wide so empty arguments still get a label.
fn arg_span(args: &[String], index: usize) -> Span {
    let start: usize = args[..index].iter().map(|arg| arg.chars().count() + 1).sum();
    Span::new(start, start + args[index].chars().count().max(1))
}
