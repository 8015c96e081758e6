use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::io;

/// Character range inside the reconstructed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DivisionByZero,
    ModuloByZero,
    InvalidOperator,
    InvalidChainLength,
    InvalidNumber,
    Computation,
}

impl ErrorKind {
    fn title(&self) -> &'static str {
        match self {
            ErrorKind::DivisionByZero | ErrorKind::ModuloByZero => "Invalid Divisor",
            ErrorKind::InvalidOperator => "Invalid Operator",
            ErrorKind::InvalidChainLength => "Invalid Chain",
            ErrorKind::InvalidNumber => "Invalid Number",
            ErrorKind::Computation => "Computation Error",
        }
    }

    fn color(&self) -> Color {
        match self {
            ErrorKind::InvalidNumber | ErrorKind::InvalidOperator => Color::Red,
            ErrorKind::DivisionByZero | ErrorKind::ModuloByZero => Color::Yellow,
            ErrorKind::InvalidChainLength | ErrorKind::Computation => Color::Magenta,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalcError {
    pub kind: ErrorKind,
    pub span: Option<Span>,
    pub message: String,
    pub help: Option<String>,
}

impl CalcError {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            span: None,
            message,
            help: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn division_by_zero() -> Self {
        Self::new(
            ErrorKind::DivisionByZero,
            "division by zero is not allowed".to_string(),
        )
    }

    pub fn modulo_by_zero() -> Self {
        Self::new(
            ErrorKind::ModuloByZero,
            "cannot take the remainder of division by zero".to_string(),
        )
    }

    pub fn invalid_operator(symbol: &str) -> Self {
        Self::new(ErrorKind::InvalidOperator, format!("invalid operator: {}", symbol))
            .with_help("Supported operators are + - * / ** %")
    }

    pub fn invalid_chain_length() -> Self {
        Self::new(
            ErrorKind::InvalidChainLength,
            "at least 2 numbers are required".to_string(),
        )
    }

    pub fn missing_operand() -> Self {
        Self::new(
            ErrorKind::InvalidChainLength,
            "every operator needs a following number".to_string(),
        )
    }

    pub fn invalid_number() -> Self {
        Self::new(
            ErrorKind::InvalidNumber,
            "please enter a valid number".to_string(),
        )
    }

    pub fn computation(detail: &str) -> Self {
        Self::new(ErrorKind::Computation, format!("computation error: {}", detail))
    }

    /// Renders the error against `source` on stderr. Errors without a span
    /// have nothing to point at and are skipped.
    pub fn report(&self, source: &str) -> io::Result<()> {
        let Some(span) = &self.span else {
            return Ok(());
        };
        let filename = "<args>";
        let color = self.kind.color();

        let mut report_builder = Report::build(ReportKind::Error, filename, span.start)
            .with_message(format!("{}: {}", self.kind.title().fg(color), self.message))
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CalcError {}
