//! Per-evaluation option flags and numeric parameters (§4.6).
//!
//! Flags are packed into a single word via `bitflags`-style constants on a
//! newtype, matching the spec's "packed into a single word" requirement. The
//! teacher doesn't have a direct analogue (its `ResourceLimits` is a plain
//! struct of separate fields) so this shape is adapted from the closed,
//! bit-packed enum pattern the teacher uses for `ExcType`/`Type` classification,
//! generalized into a flag set.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::types::decimal::{MathContext, RoundingMode};

macro_rules! option_flags {
    ($( $(#[$doc:meta])* $name:ident = $bit:expr ),+ $(,)?) => {
        /// A single packed word of boolean evaluation flags.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct OptionFlags(u32);

        impl OptionFlags {
            $(
                $(#[$doc])*
                pub const $name: Self = Self($bit);
            )+

            #[must_use]
            pub const fn empty() -> Self {
                Self(0)
            }

            #[must_use]
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            #[must_use]
            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            pub fn set(&mut self, flag: Self, value: bool) {
                if value {
                    self.0 |= flag.0;
                } else {
                    self.0 &= !flag.0;
                }
            }
        }

        impl std::ops::BitOr for OptionFlags {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                self.union(rhs)
            }
        }
    };
}

option_flags! {
    /// Unknown identifiers, missing methods, null in required positions -> error.
    STRICT = 1 << 0,
    /// Errors are reported via the host's diagnostic sink rather than raised.
    SILENT = 1 << 1,
    /// Dereferencing through `Null` yields `Null` instead of erroring.
    SAFE = 1 << 2,
    /// Host-thread cancellation raises `Cancel`; otherwise evaluation returns `Null`.
    CANCELLABLE = 1 << 3,
    /// Null as an arithmetic operand is an error (overridable per operator, §4.6).
    STRICT_ARITHMETIC = 1 << 4,
    /// Resolve dotted names as ant-like compound variable lookups.
    ANTISH = 1 << 5,
    /// Redefining a local name in the same scope is an error.
    LEXICAL = 1 << 6,
    /// Once shadowed, a global of the same name is unreachable in scope.
    LEXICAL_SHADE = 1 << 7,
    /// This `Options` instance may be mutated mid-evaluation (expert use).
    SHARED_INSTANCE = 1 << 8,
}

/// The operators considered null-safe regardless of `STRICT_ARITHMETIC` (§4.6):
/// this enables `x == null` idioms and safe membership tests even under strict
/// arithmetic.
pub const NULL_SAFE_OPERATORS: &[&str] = &["==", "===", "[]", "[]=", ".", ".=", "empty", "size", "=~"];

#[must_use]
pub fn is_null_safe_operator(symbol: &str) -> bool {
    NULL_SAFE_OPERATORS.contains(&symbol)
}

/// A per-evaluation structure carrying boolean flags and numeric parameters
/// (§4.6). Copied at evaluation start unless `SHARED_INSTANCE` is set (§3
/// Lifecycle, §5).
#[derive(Debug, Clone)]
pub struct Options {
    flags: OptionFlags,
    math_context: MathContext,
    math_scale: i32,
    /// Handshake for cooperative cancellation (§5): the host flips this from
    /// another thread; the interpreter polls it between statements.
    cancel_flag: Option<Arc<AtomicBool>>,
    stack_overflow_limit: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            flags: OptionFlags::empty(),
            math_context: MathContext::new(34, RoundingMode::HalfUp), // DECIMAL128-equivalent default
            math_scale: 5,
            cancel_flag: None,
            stack_overflow_limit: 1 << 11,
        }
    }
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_flag(mut self, flag: OptionFlags, value: bool) -> Self {
        self.flags.set(flag, value);
        self
    }

    #[must_use]
    pub fn has(&self, flag: OptionFlags) -> bool {
        self.flags.contains(flag)
    }

    #[must_use]
    pub fn strict(&self) -> bool {
        self.has(OptionFlags::STRICT)
    }

    #[must_use]
    pub fn silent(&self) -> bool {
        self.has(OptionFlags::SILENT)
    }

    #[must_use]
    pub fn safe(&self) -> bool {
        self.has(OptionFlags::SAFE)
    }

    #[must_use]
    pub fn cancellable(&self) -> bool {
        self.has(OptionFlags::CANCELLABLE)
    }

    #[must_use]
    pub fn strict_arithmetic(&self) -> bool {
        self.has(OptionFlags::STRICT_ARITHMETIC)
    }

    #[must_use]
    pub fn antish(&self) -> bool {
        self.has(OptionFlags::ANTISH)
    }

    #[must_use]
    pub fn lexical(&self) -> bool {
        self.has(OptionFlags::LEXICAL)
    }

    #[must_use]
    pub fn lexical_shade(&self) -> bool {
        self.has(OptionFlags::LEXICAL_SHADE)
    }

    #[must_use]
    pub fn shared_instance(&self) -> bool {
        self.has(OptionFlags::SHARED_INSTANCE)
    }

    #[must_use]
    pub fn math_context(&self) -> MathContext {
        self.math_context
    }

    #[must_use]
    pub fn with_math_context(mut self, ctx: MathContext) -> Self {
        self.math_context = ctx;
        self
    }

    #[must_use]
    pub fn math_scale(&self) -> i32 {
        self.math_scale
    }

    #[must_use]
    pub fn with_math_scale(mut self, scale: i32) -> Self {
        self.math_scale = scale;
        self
    }

    #[must_use]
    pub fn stack_overflow_limit(&self) -> u32 {
        self.stack_overflow_limit
    }

    #[must_use]
    pub fn with_stack_overflow_limit(mut self, limit: u32) -> Self {
        self.stack_overflow_limit = limit;
        self
    }

    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Checks the cooperative cancellation handshake described in §5.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|f| f.load(std::sync::atomic::Ordering::Relaxed))
    }

    /// Snapshot semantics (§3, §5): returns an owned copy unless
    /// `SHARED_INSTANCE` is set, in which case the same instance should be
    /// reused by the caller rather than cloned (the clone here is still cheap
    /// and correct either way; callers that truly need the aliasing behavior
    /// hold their own `Rc`/`Arc<Options>` wrapper around this type).
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Per-operator null-safety override (§4.6): true if `operator` must raise
    /// `NullOperand` under the current options when given a null operand.
    #[must_use]
    pub fn null_operand_is_error(&self, operator: &str) -> bool {
        self.strict_arithmetic() && !is_null_safe_operator(operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_safe_operators_never_error_even_under_strict_arithmetic() {
        let opts = Options::new().with_flag(OptionFlags::STRICT_ARITHMETIC, true);
        assert!(!opts.null_operand_is_error("=="));
        assert!(!opts.null_operand_is_error("empty"));
        assert!(opts.null_operand_is_error("+"));
    }

    #[test]
    fn lenient_mode_never_raises_null_operand() {
        let opts = Options::new();
        assert!(!opts.null_operand_is_error("+"));
        assert!(!opts.null_operand_is_error("-"));
    }

    #[test]
    fn flags_round_trip() {
        let opts = Options::new()
            .with_flag(OptionFlags::STRICT, true)
            .with_flag(OptionFlags::SAFE, true);
        assert!(opts.strict());
        assert!(opts.safe());
        assert!(!opts.silent());
    }

    #[test]
    fn default_cancel_flag_reports_not_cancelled() {
        assert!(!Options::new().is_cancelled());
    }
}
