//! Ordering and equality (§4.2 steps 4-6, §4.3).
//!
//! `compare_values` reuses the same numeric domain ladder as `arithmetic`
//! (long lane -> decimal lane -> double lane -> big-integer lane) because
//! ordering two numbers of different kinds needs exactly the same "promote to
//! a common lane" logic as adding them, which is why the teacher's
//! `richcompare` dispatches through its arithmetic coercion helpers instead of
//! duplicating them.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::value::Value;

/// Numeric domain lane selection, shared with `arithmetic::numeric_lane`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lane {
    Long,
    BigDec,
    Double,
    BigInt,
}

/// Lane selection for the arithmetic/comparison ladder (§4.2 steps 4-6). This
/// treats `Null` as a long-representable zero, per §4.2 step 1 ("if both are
/// `Null`, return `0` if the operator is null-safe") and §7 ("under lenient,
/// the value is treated as the kind's zero") — `arithmetic::dispatch`'s own
/// `null_check` is what decides *whether* a null operand is actually an
/// error; this function only decides what lane a non-erroring null folds
/// into. Equality/ordering (`values_equal`/`compare_values` below) special-
/// case `Null` *before* calling this, since `Null == Null` and "`Null`
/// compares as unordered against everything" are not the same rule as
/// "null-as-zero" and must not be blurred by the shared lane.
pub(crate) fn numeric_lane(a: &Value, b: &Value) -> Option<Lane> {
    let scalar = |v: &Value| {
        matches!(
            v,
            Value::Null
                | Value::I8(_)
                | Value::I16(_)
                | Value::I32(_)
                | Value::I64(_)
                | Value::Char(_)
                | Value::Bool(_)
                | Value::AtomicBool(_)
                | Value::F32(_)
                | Value::F64(_)
                | Value::BigInt(_)
                | Value::BigDec(_)
        )
    };
    if !scalar(a) || !scalar(b) {
        return None;
    }
    if matches!(a, Value::BigDec(_)) || matches!(b, Value::BigDec(_)) {
        Some(Lane::BigDec)
    } else if matches!(a, Value::F32(_) | Value::F64(_)) || matches!(b, Value::F32(_) | Value::F64(_)) {
        Some(Lane::Double)
    } else if matches!(a, Value::BigInt(_)) || matches!(b, Value::BigInt(_)) {
        Some(Lane::BigInt)
    } else {
        Some(Lane::Long)
    }
}

/// Three-way numeric comparison for operands already known to be numberable
/// (§4.2 steps 4-6 reused for ordering). `NaN` compares equal to `NaN` and
/// strictly less than every other value (§4.3), matching Testable Property
/// "compare(NaN, NaN) == 0" / "compare(NaN, 1.0) == -1" and keeping ordering
/// total rather than partial.
fn compare_numeric(a: &Value, b: &Value, lane: Lane) -> Ordering {
    match lane {
        Lane::Long => {
            let x = a.to_i64(false).unwrap_or(0);
            let y = b.to_i64(false).unwrap_or(0);
            x.cmp(&y)
        }
        Lane::BigInt => {
            let x = a.to_bigint(false).unwrap_or_default();
            let y = b.to_bigint(false).unwrap_or_default();
            x.cmp(&y)
        }
        Lane::BigDec => {
            let ctx = crate::types::MathContext::default();
            let x = a.to_bigdec(false, ctx).unwrap_or_else(|_| crate::types::BigDec::zero());
            let y = b.to_bigdec(false, ctx).unwrap_or_else(|_| crate::types::BigDec::zero());
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        Lane::Double => {
            let x = a.to_f64(false).unwrap_or(f64::NAN);
            let y = b.to_f64(false).unwrap_or(f64::NAN);
            total_cmp_nan_equal(x, y)
        }
    }
}

fn total_cmp_nan_equal(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// Structural ordering (§4.2 step 6): numeric ladder for numberable operands,
/// lexicographic byte ordering for `Text`, element-wise for `Seq`, and
/// `None` when the pair has no defined ordering (different non-numeric
/// kinds, or a kind with no ordering at all).
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    // §4.3: "comparison with Null on either side (non-`==`) returns false" —
    // i.e. no defined ordering, distinct from null-as-zero arithmetic folding.
    if a.is_null() || b.is_null() {
        return None;
    }
    if let Some(lane) = numeric_lane(a, b) {
        return Some(compare_numeric(a, b, lane));
    }
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
        (Value::Seq(x), Value::Seq(y)) => compare_seqs(x, y),
        _ => None,
    }
}

fn compare_seqs(a: &Rc<Vec<Value>>, b: &Rc<Vec<Value>>) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b.iter()) {
        match compare_values(x, y) {
            Some(Ordering::Equal) => continue,
            other => return other,
        }
    }
    Some(a.len().cmp(&b.len()))
}

/// True when exactly one side of an equality is `Bool`/`AtomicBool` and the
/// other is a kind with a boolean reading — §4.3: "boolean-involving equality
/// coerces both to bool", e.g. `true == 1` and `false == 0` are both `true`
/// even though `1`/`2` aren't themselves equal under the numeric ladder.
fn is_boolean_involving(a: &Value, b: &Value) -> bool {
    let is_bool = |v: &Value| matches!(v, Value::Bool(_) | Value::AtomicBool(_));
    is_bool(a) || is_bool(b)
}

/// Loose `==` equality (§4.3): cross-type numeric equality (`1 == 1.0`),
/// boolean-coercing equality when either side is `Bool`/`AtomicBool`,
/// structural equality for aggregates, and `false` — never an error — for
/// pairs with no defined comparison, since `==` is one of the fixed
/// null-safe operators (§5) and must never raise `NullOperand`.
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if let (Value::Null, Value::Null) = (a, b) {
        return true;
    }
    // `Null` is loosely equal only to `Null` (§4.3) — must be checked before
    // `numeric_lane`, which now treats `Null` as a long-representable zero
    // for arithmetic's sake (see `numeric_lane`'s doc comment).
    if a.is_null() || b.is_null() {
        return false;
    }
    if is_boolean_involving(a, b) {
        return a.to_bool(false).unwrap_or(false) == b.to_bool(false).unwrap_or(false);
    }
    if let Some(lane) = numeric_lane(a, b) {
        return compare_numeric(a, b, lane) == Ordering::Equal;
    }
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Pattern(x), Value::Pattern(y)) => x == y,
        (Value::Seq(x), Value::Seq(y)) => x.len() == y.len() && x.iter().zip(y.iter()).all(|(p, q)| values_equal(p, q)),
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|other| values_equal(v, other)))
        }
        (Value::Set(x), Value::Set(y)) => x.len() == y.len() && x.iter().all(|k| y.contains(k)),
        (Value::Range(x), Value::Range(y)) => x.from() == y.from() && x.to() == y.to(),
        (Value::Host(x), Value::Host(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// Strict `===` equality (§4.3): same kind tag *and* structurally equal, so
/// `1 === 1.0` is `false` even though `1 == 1.0` is `true`.
#[must_use]
pub fn strict_equal(a: &Value, b: &Value) -> bool {
    a.kind() == b.kind() && values_equal(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_type_numeric_equality_holds() {
        assert!(values_equal(&Value::I32(1), &Value::F64(1.0)));
        assert!(values_equal(&Value::Bool(true), &Value::I32(1)));
    }

    #[test]
    fn boolean_involving_equality_coerces_both_sides_to_bool() {
        // 2 != 1, but both are truthy, so boolean-coercing equality holds.
        assert!(values_equal(&Value::Bool(true), &Value::I32(2)));
        assert!(values_equal(&Value::Bool(false), &Value::I32(0)));
        assert!(!values_equal(&Value::Bool(true), &Value::I32(0)));
    }

    #[test]
    fn null_operand_folds_to_zero_for_arithmetic_lane_selection_but_not_equality() {
        assert!(numeric_lane(&Value::Null, &Value::I32(3)).is_some());
        assert!(!values_equal(&Value::Null, &Value::I32(0)));
        assert_eq!(compare_values(&Value::Null, &Value::I32(0)), None);
    }

    #[test]
    fn strict_equality_requires_same_kind() {
        assert!(!strict_equal(&Value::I32(1), &Value::F64(1.0)));
        assert!(strict_equal(&Value::I32(1), &Value::I32(1)));
    }

    #[test]
    fn nan_compares_equal_to_nan() {
        assert_eq!(compare_values(&Value::F64(f64::NAN), &Value::F64(f64::NAN)), Some(Ordering::Equal));
    }

    #[test]
    fn nan_compares_less_than_everything_else() {
        assert_eq!(compare_values(&Value::F64(f64::NAN), &Value::F64(1.0)), Some(Ordering::Less));
        assert_eq!(compare_values(&Value::F64(1.0), &Value::F64(f64::NAN)), Some(Ordering::Greater));
    }

    #[test]
    fn text_orders_lexicographically() {
        assert_eq!(compare_values(&Value::text("a"), &Value::text("b")), Some(Ordering::Less));
    }

    #[test]
    fn unrelated_kinds_are_unordered() {
        assert_eq!(compare_values(&Value::text("a"), &Value::I32(1)), None);
    }

    #[test]
    fn null_is_loosely_equal_only_to_null() {
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&Value::Null, &Value::I32(0)));
    }
}
