//! An embeddable JEXL-style expression-language evaluation core: the value
//! model, coercions, operator semantics, and host-interface contracts a
//! parser/interpreter sits on top of. Parsing and the tree-walking
//! interpreter loop are out of this crate's scope (§1 Non-goals) — this
//! crate is the ground every operator in a JEXL dialect ultimately stands on.

pub mod arithmetic;
pub mod bitwise;
pub mod compare;
pub mod coercions;
pub mod containment;
pub mod errors;
pub mod features;
pub mod hashing;
pub mod host;
pub mod operators;
pub mod options;
pub mod types;
pub mod unary;
pub mod value;

pub use compare::{compare_values, strict_equal, values_equal};
pub use errors::{CodeLoc, ControlFlow, EvalError, EvalErrorKind, EvalResult, ExcFamily, Location, Undefinedness};
pub use features::Features;
pub use host::{ArithmeticExt, Context, DiagnosticSink, Introspection, Namespace, NoArithmeticExt, NullDiagnosticSink, TryFailed};
pub use operators::{Arity, Operator};
pub use options::{NULL_SAFE_OPERATORS, OptionFlags, Options, is_null_safe_operator};
pub use types::{BigDec, MathContext, Pattern, Range, RoundingMode};
pub use value::{HostValue, Key, Kind, Map, Set, Value};

#[cfg(test)]
mod tests {
    use super::*;

    /// End-to-end smoke test threading §8's scenario table through the
    /// public surface the way an interpreter built on this crate would.
    #[test]
    fn scenario_table_add_i32_max_plus_one_is_bigint() {
        let options = Options::new();
        let result = arithmetic::add(&Value::I32(i32::MAX), &Value::I32(1), &options).unwrap();
        match result {
            Value::BigInt(b) => assert_eq!(b.to_string(), "2147483648"),
            other => panic!("expected BigInt, got {other:?}"),
        }
    }

    #[test]
    fn scenario_table_bigint_modulo_is_non_negative() {
        let options = Options::new();
        let a = Value::from(num_bigint::BigInt::from(-7));
        let b = Value::from(num_bigint::BigInt::from(3));
        let result = arithmetic::rem(&a, &b, &options).unwrap();
        match result {
            Value::BigInt(r) => assert_eq!(r.to_string(), "2"),
            other => panic!("expected BigInt, got {other:?}"),
        }
    }

    #[test]
    fn scenario_table_contains_uses_regex_on_patterns() {
        let pattern = Pattern::compile("hello.*").unwrap();
        let result = containment::contains(&Value::text("hello world"), &Value::Pattern(pattern), &Options::new()).unwrap();
        assert_eq!(result, containment::Tri::True);
    }

    #[test]
    fn scenario_table_nan_compares_equal_to_itself() {
        use std::cmp::Ordering;
        assert_eq!(compare_values(&Value::F64(f64::NAN), &Value::F64(f64::NAN)), Some(Ordering::Equal));
    }
}
