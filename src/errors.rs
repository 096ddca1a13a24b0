//! Structured evaluation/parse errors with source location.
//!
//! The taxonomy mirrors the teacher's `exception_private::ExcType`: a closed,
//! `strum`-derived enum of error *kinds* plus a payload carrying source location
//! and an optional formatted detail, rather than one exception struct per kind.

use std::fmt::{self, Display, Write as _};

use strum::{Display as StrumDisplay, EnumString, IntoStaticStr};

/// Result type alias for operations that can fail with an [`EvalError`].
pub type EvalResult<T> = Result<T, EvalError>;

/// A position in source text, 1-indexed for both line and column to match the
/// message convention `"<file>@<line>:<col> <detail>"` (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeLoc {
    pub line: u32,
    pub column: u32,
}

impl CodeLoc {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Display for CodeLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maximum snippet width before a windowed excerpt is produced (§4.7: "~42 characters").
const SNIPPET_WIDTH: usize = 42;

/// Source location carried by every [`EvalError`]: file, position, and the
/// full source line the position falls on (used to build the excerpt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub pos: CodeLoc,
    /// The full source line containing `pos`, if the caller had it available.
    pub source_line: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(file: impl Into<String>, pos: CodeLoc) -> Self {
        Self {
            file: file.into(),
            pos,
            source_line: None,
        }
    }

    #[must_use]
    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = Some(line.into());
        self
    }

    /// Produces the windowed excerpt described in §4.7: if the source line is
    /// wider than [`SNIPPET_WIDTH`], a window centered on the column is returned
    /// instead of the whole line.
    #[must_use]
    pub fn excerpt(&self) -> Option<String> {
        let line = self.source_line.as_ref()?;
        let chars: Vec<char> = line.chars().collect();
        if chars.len() <= SNIPPET_WIDTH {
            return Some(line.clone());
        }
        let col = usize::try_from(self.pos.column.saturating_sub(1)).unwrap_or(0);
        let half = SNIPPET_WIDTH / 2;
        let start = col.saturating_sub(half);
        let end = (start + SNIPPET_WIDTH).min(chars.len());
        let start = end.saturating_sub(SNIPPET_WIDTH).min(start);
        let mut out = String::new();
        if start > 0 {
            out.push_str("...");
        }
        out.extend(&chars[start..end]);
        if end < chars.len() {
            out.push_str("...");
        }
        Some(out)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.file, self.pos)
    }
}

/// Whether a failed identifier/property lookup means "does not exist" or
/// "resolved to an explicit null" — distinguished so hosts can tell the two
/// apart (§4.7: `Variable`/`Property` carry this flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undefinedness {
    Undefined,
    Null,
}

/// The closed taxonomy of evaluation/parse error kinds (§4.7).
///
/// Control-flow carriers (`Return`, `Break`, `Continue`, `Cancel`, `TryFailed`)
/// are deliberately absent: per §4.7 they are implemented as non-error unwinds
/// in the interpreter's return type, never surfaced to the host as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalErrorKind {
    /// Grammar/tokenization failure. Out of this crate's scope to produce, but
    /// the location/message shape must be shared with the parser that does.
    Parsing { detail: String },
    /// Syntax disabled by the current [`crate::features::Features`] policy.
    Feature { name: String },
    /// Illegal assignment left-hand side.
    Assignment { detail: String },
    /// Interpreter recursion exceeded the configured threshold.
    StackOverflow { limit: u32 },
    /// Identifier resolution failure.
    Variable { name: String, kind: Undefinedness },
    /// Introspective property lookup failure.
    Property { name: String, kind: Undefinedness },
    /// Method/constructor not found, ambiguous, or inaccessible.
    Method { signature: String, args: usize },
    /// A user operator overload raised something other than the Arithmetic family.
    Operator { symbol: String },
    /// An annotation handler failed.
    Annotation { name: String },
    /// Built-in numeric failure not covered by the three dedicated variants below.
    Arithmetic { detail: String },
    /// Null encountered in an operand position under strict arithmetic (§4.6/§7).
    NullOperand { operator: String },
    /// Division or modulo by zero (never downgraded, even under lenient options).
    DivideByZero { operator: String },
    /// A coercion had no defined target (§4.1's "unspecified conversions fail").
    Coercion { from: &'static str, to: &'static str, value: String },
}

impl EvalErrorKind {
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Parsing { detail } | Self::Assignment { detail } | Self::Arithmetic { detail } => detail.clone(),
            Self::Feature { name } => format!("feature '{name}' is disabled"),
            Self::StackOverflow { limit } => format!("stack overflow (limit {limit})"),
            Self::Variable { name, kind } => match kind {
                Undefinedness::Undefined => format!("variable '{name}' is not defined"),
                Undefinedness::Null => format!("variable '{name}' is null"),
            },
            Self::Property { name, kind } => match kind {
                Undefinedness::Undefined => format!("property '{name}' is not defined"),
                Undefinedness::Null => format!("property '{name}' is null"),
            },
            Self::Method { signature, args } => format!("no matching method '{signature}' for {args} argument(s)"),
            Self::Operator { symbol } => format!("operator '{symbol}' overload failed"),
            Self::Annotation { name } => format!("annotation '{name}' failed"),
            Self::NullOperand { operator } => format!("null operand for operator '{operator}'"),
            Self::DivideByZero { operator } => format!("division by zero in '{operator}'"),
            Self::Coercion { from, to, value } => format!("cannot coerce {from} '{value}' to {to}"),
        }
    }
}

/// A fully structured evaluation error: kind plus location and optional snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub location: Option<Location>,
}

impl EvalError {
    #[must_use]
    pub fn new(kind: EvalErrorKind) -> Self {
        Self { kind, location: None }
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn null_operand(operator: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::NullOperand { operator: operator.into() })
    }

    #[must_use]
    pub fn divide_by_zero(operator: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::DivideByZero { operator: operator.into() })
    }

    #[must_use]
    pub fn coercion(from: &'static str, to: &'static str, value: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::Coercion { from, to, value: value.into() })
    }

    #[must_use]
    pub fn arithmetic(detail: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::Arithmetic { detail: detail.into() })
    }

    /// True for the four members of the "Arithmetic family" that built-in
    /// operators are restricted to raising (§7): `ArithmeticError`,
    /// `NullOperand`, `DivideByZero`, `Coercion`.
    #[must_use]
    pub fn is_arithmetic_family(&self) -> bool {
        matches!(
            self.kind,
            EvalErrorKind::Arithmetic { .. }
                | EvalErrorKind::NullOperand { .. }
                | EvalErrorKind::DivideByZero { .. }
                | EvalErrorKind::Coercion { .. }
        )
    }
}

impl Display for EvalError {
    /// Follows the pattern `"<file>@<line>:<col> <detail>"` (§4.7), appending a
    /// windowed excerpt on its own line when a source line is available.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{loc} {}", self.kind.detail())?;
            if let Some(excerpt) = loc.excerpt() {
                write!(f, "\n    {excerpt}")?;
            }
            Ok(())
        } else {
            f.write_str(&self.kind.detail())
        }
    }
}

impl std::error::Error for EvalError {}

/// Host-visible exception *category* used for `isinstance`-style matching by
/// embedders that want to catch a family of errors without string matching.
///
/// Mirrors the teacher's `ExcType` in spirit (a small closed enum with a
/// subclass relation) but scoped to the families this crate can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, IntoStaticStr)]
pub enum ExcFamily {
    Parsing,
    Feature,
    Assignment,
    StackOverflow,
    Variable,
    Property,
    Method,
    Operator,
    Annotation,
    ArithmeticError,
    NullOperand,
    DivideByZero,
    Coercion,
}

impl From<&EvalErrorKind> for ExcFamily {
    fn from(kind: &EvalErrorKind) -> Self {
        match kind {
            EvalErrorKind::Parsing { .. } => Self::Parsing,
            EvalErrorKind::Feature { .. } => Self::Feature,
            EvalErrorKind::Assignment { .. } => Self::Assignment,
            EvalErrorKind::StackOverflow { .. } => Self::StackOverflow,
            EvalErrorKind::Variable { .. } => Self::Variable,
            EvalErrorKind::Property { .. } => Self::Property,
            EvalErrorKind::Method { .. } => Self::Method,
            EvalErrorKind::Operator { .. } => Self::Operator,
            EvalErrorKind::Annotation { .. } => Self::Annotation,
            EvalErrorKind::Arithmetic { .. } => Self::ArithmeticError,
            EvalErrorKind::NullOperand { .. } => Self::NullOperand,
            EvalErrorKind::DivideByZero { .. } => Self::DivideByZero,
            EvalErrorKind::Coercion { .. } => Self::Coercion,
        }
    }
}

/// Control-flow carriers, implemented as explicit unwind variants rather than
/// exceptions (§9's design note). Not part of [`EvalError`] because these are
/// never user-visible failures — they're returned, not raised.
#[derive(Debug, Clone)]
pub enum ControlFlow<V> {
    Return(V),
    Break,
    Continue,
    /// Raised when `cancellable` is set and the host's cancel flag trips.
    Cancel,
    /// A `try`-style construct's body failed; carries the underlying error.
    TryFailed(Box<EvalError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_follows_file_line_col_pattern() {
        let err = EvalError::new(EvalErrorKind::Variable {
            name: "foo".into(),
            kind: Undefinedness::Undefined,
        })
        .at(Location::new("script.jexl", CodeLoc::new(3, 7)));
        assert_eq!(err.to_string(), "script.jexl@3:7 variable 'foo' is not defined");
    }

    #[test]
    fn excerpt_windows_long_lines_around_the_column() {
        let long_line = "a".repeat(20) + "ERROR" + &"b".repeat(40);
        let col = 21;
        let loc = Location::new("f", CodeLoc::new(1, col)).with_source_line(long_line);
        let excerpt = loc.excerpt().unwrap();
        assert!(excerpt.len() < long_line.len());
        assert!(excerpt.contains("ERROR"));
    }

    #[test]
    fn short_lines_are_not_windowed() {
        let loc = Location::new("f", CodeLoc::new(1, 1)).with_source_line("x + 1");
        assert_eq!(loc.excerpt().unwrap(), "x + 1");
    }

    #[test]
    fn arithmetic_family_classification() {
        assert!(EvalError::null_operand("+").is_arithmetic_family());
        assert!(EvalError::divide_by_zero("/").is_arithmetic_family());
        assert!(EvalError::coercion("Text", "I32", "abc").is_arithmetic_family());
        assert!(!EvalError::new(EvalErrorKind::Variable {
            name: "x".into(),
            kind: Undefinedness::Undefined
        })
        .is_arithmetic_family());
    }
}
