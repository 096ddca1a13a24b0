//! Binary arithmetic operators `+ - * / %` (§4.2): the numeric domain ladder,
//! overflow promotion, and the narrowing policy (§4.4).
//!
//! The ladder picks one of four lanes per call — long, `BigDec`, double,
//! `BigInt` — the same lane selection `compare::numeric_lane` uses for
//! ordering, because "which representation can hold both operands without
//! loss" is one question asked twice, not two different ones. What's unique
//! to arithmetic is overflow: the long lane runs in the *narrower* of i32/i64
//! native width implied by the operands (matching Testable Property
//! `add(i32::MAX, 1) == BigInt(2147483648)` — overflow escalates straight to
//! `BigInt`, it does not first widen to `i64`), and the narrowing policy then
//! puts the result back into the smallest kind the operand kinds allow.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

use crate::compare::{Lane, numeric_lane};
use crate::errors::{EvalError, EvalResult};
use crate::options::Options;
use crate::types::{BigDec, MathContext};
use crate::value::{Kind, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
    I32,
    I64,
}

fn native_width(a: Kind, b: Kind) -> Width {
    if a == Kind::I64 || b == Kind::I64 {
        Width::I64
    } else {
        Width::I32
    }
}

/// True if neither operand is wider than `kind` on the integer ladder
/// (`I8 < I16 < I32 < I64`, with `Bool`/`AtomicBool`/`Char`/`Null` counted as
/// `I32` — a null operand folds to the `I32` zero, §4.2 step 1), used by the
/// narrowing policy to decide how far a result may shrink.
fn both_at_most(a: Kind, b: Kind, kind: Kind) -> bool {
    fn rank(k: Kind) -> u8 {
        match k {
            Kind::I8 => 0,
            Kind::I16 => 1,
            Kind::Null | Kind::Bool | Kind::AtomicBool | Kind::Char | Kind::I32 => 2,
            Kind::I64 => 3,
            _ => 4,
        }
    }
    rank(a) <= rank(kind) && rank(b) <= rank(kind)
}

fn null_check(a: &Value, b: &Value, symbol: &str, options: &Options) -> EvalResult<()> {
    if (a.is_null() || b.is_null()) && options.null_operand_is_error(symbol) {
        return Err(EvalError::null_operand(symbol));
    }
    Ok(())
}

/// Narrows an overflow-free long-lane result back to the smallest integer
/// kind consistent with the operands (§4.4): `I32` if both operands are at
/// most `I32`-width and the value fits, otherwise `I64`.
fn narrow_long(result: i64, a_kind: Kind, b_kind: Kind) -> Value {
    if both_at_most(a_kind, b_kind, Kind::I32) {
        if let Ok(narrow) = i32::try_from(result) {
            return Value::I32(narrow);
        }
    }
    Value::I64(result)
}

/// Narrows a double-lane result: stays `F64` unless both operands were `F32`.
fn narrow_double(result: f64, a_kind: Kind, b_kind: Kind) -> Value {
    if a_kind == Kind::F32 && b_kind == Kind::F32 {
        Value::F32(result as f32)
    } else {
        Value::F64(result)
    }
}

type Checked = fn(i64, i64) -> Option<i64>;
type Checked32 = fn(i32, i32) -> Option<i32>;

fn long_lane(
    a: &Value,
    b: &Value,
    checked32: Checked32,
    checked64: Checked,
    bigint_op: fn(&BigInt, &BigInt) -> BigInt,
) -> EvalResult<Value> {
    match native_width(a.kind(), b.kind()) {
        Width::I32 => {
            let x = a.to_i32(false)?;
            let y = b.to_i32(false)?;
            match checked32(x, y) {
                Some(r) => Ok(narrow_long(i64::from(r), a.kind(), b.kind())),
                None => {
                    let r = bigint_op(&BigInt::from(x), &BigInt::from(y));
                    Ok(Value::from(r))
                }
            }
        }
        Width::I64 => {
            let x = a.to_i64(false)?;
            let y = b.to_i64(false)?;
            match checked64(x, y) {
                Some(r) => Ok(narrow_long(r, a.kind(), b.kind())),
                None => {
                    let r = bigint_op(&BigInt::from(x), &BigInt::from(y));
                    Ok(Value::from(r))
                }
            }
        }
    }
}

fn bigdec_lane(a: &Value, b: &Value, ctx: MathContext, op: fn(&BigDec, &BigDec) -> BigDec) -> EvalResult<Value> {
    let x = a.to_bigdec(false, ctx)?;
    let y = b.to_bigdec(false, ctx)?;
    Ok(Value::from(op(&x, &y).round_to_context(ctx)))
}

fn double_lane(a: &Value, b: &Value, op: fn(f64, f64) -> f64) -> EvalResult<Value> {
    let x = a.to_f64(false)?;
    let y = b.to_f64(false)?;
    Ok(narrow_double(op(x, y), a.kind(), b.kind()))
}

fn bigint_lane(a: &Value, b: &Value, op: fn(&BigInt, &BigInt) -> BigInt) -> EvalResult<Value> {
    let x = a.to_bigint(false)?;
    let y = b.to_bigint(false)?;
    Ok(Value::from(op(&x, &y)))
}

fn dispatch(
    a: &Value,
    b: &Value,
    symbol: &str,
    options: &Options,
    checked32: Checked32,
    checked64: Checked,
    bigint_op: fn(&BigInt, &BigInt) -> BigInt,
    bigdec_op: fn(&BigDec, &BigDec) -> BigDec,
    double_op: fn(f64, f64) -> f64,
) -> EvalResult<Value> {
    null_check(a, b, symbol, options)?;
    match numeric_lane(a, b) {
        Some(Lane::Long) => long_lane(a, b, checked32, checked64, bigint_op),
        Some(Lane::BigDec) => bigdec_lane(a, b, options.math_context(), bigdec_op),
        Some(Lane::Double) => double_lane(a, b, double_op),
        Some(Lane::BigInt) => bigint_lane(a, b, bigint_op),
        None => Err(EvalError::arithmetic(format!("'{symbol}' is not defined for {} and {}", a.kind(), b.kind()))),
    }
}

/// `+` (§4.2 step 2): string concatenation — under strict arithmetic, when
/// *either* operand is `Text`; under lenient, only when *both* are `Text`
/// (matching the teacher's `strconcat` rule). Otherwise `"5" + 3` would
/// silently concatenate to `"53"` instead of adding to `8` in the common,
/// lenient case.
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Coercion`/`Arithmetic` otherwise.
pub fn add(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    let should_concat = if options.strict_arithmetic() { a.is_text() || b.is_text() } else { a.is_text() && b.is_text() };
    if should_concat {
        let mut s = String::with_capacity(16);
        s.push_str(&a.to_text(false)?);
        s.push_str(&b.to_text(false)?);
        return Ok(Value::from(s));
    }
    dispatch(
        a,
        b,
        "+",
        options,
        |x, y| x.checked_add(y),
        |x, y| x.checked_add(y),
        |x, y| x + y,
        BigDec::add,
        |x, y| x + y,
    )
}

/// # Errors
/// `NullOperand` under strict arithmetic; `Coercion`/`Arithmetic` otherwise.
pub fn sub(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    dispatch(
        a,
        b,
        "-",
        options,
        |x, y| x.checked_sub(y),
        |x, y| x.checked_sub(y),
        |x, y| x - y,
        BigDec::sub,
        |x, y| x - y,
    )
}

/// # Errors
/// `NullOperand` under strict arithmetic; `Coercion`/`Arithmetic` otherwise.
pub fn mul(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    dispatch(
        a,
        b,
        "*",
        options,
        |x, y| x.checked_mul(y),
        |x, y| x.checked_mul(y),
        |x, y| x * y,
        BigDec::mul,
        |x, y| x * y,
    )
}

/// `/` (§4.2): division by zero always raises `DivideByZero`, regardless of
/// `strict`/`silent` (§4.7: "never downgraded").
///
/// # Errors
/// `NullOperand` under strict arithmetic; `DivideByZero` on a zero divisor;
/// `Coercion`/`Arithmetic` otherwise.
pub fn div(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    null_check(a, b, "/", options)?;
    match numeric_lane(a, b) {
        Some(Lane::Long) => {
            let divisor_zero = match native_width(a.kind(), b.kind()) {
                Width::I32 => b.to_i32(false)? == 0,
                Width::I64 => b.to_i64(false)? == 0,
            };
            if divisor_zero {
                return Err(EvalError::divide_by_zero("/"));
            }
            long_lane(a, b, i32::checked_div, i64::checked_div, |x, y| x / y)
        }
        Some(Lane::BigDec) => {
            let ctx = options.math_context();
            let x = a.to_bigdec(false, ctx)?;
            let y = b.to_bigdec(false, ctx)?;
            x.div(&y, ctx).map(Value::from).map_err(|()| EvalError::divide_by_zero("/"))
        }
        Some(Lane::Double) => {
            if b.to_f64(false)? == 0.0 {
                return Err(EvalError::divide_by_zero("/"));
            }
            double_lane(a, b, |x, y| x / y)
        }
        Some(Lane::BigInt) => {
            let x = a.to_bigint(false)?;
            let y = b.to_bigint(false)?;
            if y.is_zero() {
                return Err(EvalError::divide_by_zero("/"));
            }
            Ok(Value::from(x / y))
        }
        None => Err(EvalError::arithmetic(format!("'/' is not defined for {} and {}", a.kind(), b.kind()))),
    }
}

/// `%` (§4.2): mathematical modulo (non-negative, sign of the divisor) for
/// `BigInt`; C-style remainder (sign of the dividend) for `BigDec`/`i64`/
/// `f64`, matching Testable Property `mod(-7i32, 3i32) == -1i32` vs.
/// `mod(BigInt(-7), BigInt(3)) == BigInt(2)`.
///
/// # Errors
/// `NullOperand` under strict arithmetic; `DivideByZero` on a zero divisor;
/// `Coercion`/`Arithmetic` otherwise.
pub fn rem(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    null_check(a, b, "%", options)?;
    match numeric_lane(a, b) {
        Some(Lane::Long) => {
            let divisor_zero = match native_width(a.kind(), b.kind()) {
                Width::I32 => b.to_i32(false)? == 0,
                Width::I64 => b.to_i64(false)? == 0,
            };
            if divisor_zero {
                return Err(EvalError::divide_by_zero("%"));
            }
            long_lane(a, b, i32::checked_rem, i64::checked_rem, |x, y| x % y)
        }
        Some(Lane::BigDec) => {
            let ctx = options.math_context();
            let x = a.to_bigdec(false, ctx)?;
            let y = b.to_bigdec(false, ctx)?;
            x.rem(&y).map(Value::from).map_err(|()| EvalError::divide_by_zero("%"))
        }
        Some(Lane::Double) => {
            if b.to_f64(false)? == 0.0 {
                return Err(EvalError::divide_by_zero("%"));
            }
            double_lane(a, b, |x, y| x % y)
        }
        Some(Lane::BigInt) => {
            let x = a.to_bigint(false)?;
            let y = b.to_bigint(false)?;
            if y.is_zero() {
                return Err(EvalError::divide_by_zero("%"));
            }
            Ok(Value::from(x.mod_floor(&y)))
        }
        None => Err(EvalError::arithmetic(format!("'%' is not defined for {} and {}", a.kind(), b.kind()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::new()
    }

    #[test]
    fn i32_overflow_promotes_straight_to_bigint() {
        let r = add(&Value::I32(i32::MAX), &Value::I32(1), &opts()).unwrap();
        match r {
            Value::BigInt(b) => assert_eq!(b.to_string(), "2147483648"),
            other => panic!("expected BigInt, got {other:?}"),
        }
    }

    #[test]
    fn non_overflowing_i32_addition_stays_i32() {
        let r = add(&Value::I32(2), &Value::I32(3), &opts()).unwrap();
        assert!(matches!(r, Value::I32(5)));
    }

    #[test]
    fn lenient_mode_only_concatenates_when_both_sides_are_text() {
        let r = add(&Value::text("x="), &Value::text("5"), &opts()).unwrap();
        assert_eq!(&*r.to_text(false).unwrap(), "x=5");
    }

    #[test]
    fn lenient_mode_adds_numerically_when_only_one_side_is_text() {
        // §4.2 step 2: "5" + 3 is numeric addition (8), not "53" concatenation,
        // unless strict arithmetic is on.
        let r = add(&Value::text("5"), &Value::I32(3), &opts()).unwrap();
        assert!(matches!(r, Value::I32(8)));
    }

    #[test]
    fn strict_arithmetic_concatenates_when_either_side_is_text() {
        let strict = opts().with_flag(crate::options::OptionFlags::STRICT_ARITHMETIC, true);
        let r = add(&Value::text("x="), &Value::I32(5), &strict).unwrap();
        assert_eq!(&*r.to_text(false).unwrap(), "x=5");
    }

    #[test]
    fn division_by_zero_always_errors() {
        assert!(div(&Value::I32(1), &Value::I32(0), &opts()).is_err());
        assert!(div(&Value::F64(1.0), &Value::F64(0.0), &opts()).is_err(), "§4.2 lane 5: '/' by 0.0 fails DivideByZero, never downgraded (§4.7)");
        assert!(rem(&Value::F64(1.0), &Value::F64(0.0), &opts()).is_err());
    }

    #[test]
    fn bigint_modulo_is_mathematical() {
        let r = rem(&Value::from(BigInt::from(-7)), &Value::from(BigInt::from(3)), &opts()).unwrap();
        match r {
            Value::BigInt(b) => assert_eq!(b.to_string(), "2"),
            other => panic!("expected BigInt, got {other:?}"),
        }
    }

    #[test]
    fn long_modulo_keeps_sign_of_dividend() {
        let r = rem(&Value::I32(-7), &Value::I32(3), &opts()).unwrap();
        assert!(matches!(r, Value::I32(-1)));
    }

    #[test]
    fn null_operand_is_zero_under_lenient_options() {
        let r = add(&Value::Null, &Value::I32(3), &opts()).unwrap();
        assert!(matches!(r, Value::I32(3)));
    }

    #[test]
    fn null_operand_errors_under_strict_arithmetic() {
        let strict = opts().with_flag(crate::options::OptionFlags::STRICT_ARITHMETIC, true);
        assert!(add(&Value::Null, &Value::I32(3), &strict).is_err());
    }

    #[test]
    fn bigdec_division_rounds_to_math_context() {
        let r = div(&Value::from(BigDec::from_i64(1)), &Value::from(BigDec::from_i64(3)), &opts()).unwrap();
        match r {
            Value::BigDec(d) => assert_eq!(d.to_string(), "0.3333333333333333333333333333333333"),
            _ => panic!("expected BigDec"),
        }
    }
}
