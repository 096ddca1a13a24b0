//! Unary operators (§4.3): negate, positivize, complement, increment/decrement.

use num_bigint::BigInt;

use crate::errors::{EvalError, EvalResult};
use crate::options::Options;
use crate::value::Value;

fn null_check(v: &Value, symbol: &str, options: &Options) -> EvalResult<()> {
    if v.is_null() && options.null_operand_is_error(symbol) {
        return Err(EvalError::null_operand(symbol));
    }
    Ok(())
}

/// Unary `-`. Type-preserving (§4.3), with one carve-out: on `Bool`/
/// `AtomicBool` it returns the logical negation as a `Bool`, not a numeric
/// `0`/`1` (§4.3: "on Bool returns its negation"). `I8`/`I16`/`Char` undergo
/// the same Java-style unary numeric promotion to `I32` that `positivize`
/// documents explicitly; overflow of `i32::MIN`/`i64::MIN` promotes to
/// `BigInt`, the same escalation rule as binary arithmetic (§4.2, §4.4).
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Coercion`/`Arithmetic` otherwise.
pub fn negate(v: &Value, options: &Options) -> EvalResult<Value> {
    null_check(v, "-", options)?;
    match v {
        Value::Null => Ok(Value::I32(0)),
        Value::Bool(_) | Value::AtomicBool(_) => Ok(Value::Bool(!v.to_bool(false)?)),
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::Char(_) => {
            let x = v.to_i32(false)?;
            match x.checked_neg() {
                Some(r) => Ok(Value::I32(r)),
                None => Ok(Value::from(-BigInt::from(x))),
            }
        }
        Value::I64(_) => {
            let x = v.to_i64(false)?;
            match x.checked_neg() {
                Some(r) => Ok(Value::I64(r)),
                None => Ok(Value::from(-BigInt::from(x))),
            }
        }
        Value::F32(f) => Ok(Value::F32(-f)),
        Value::F64(f) => Ok(Value::F64(-f)),
        Value::BigInt(b) => Ok(Value::from(-(**b).clone())),
        Value::BigDec(d) => Ok(Value::from(d.neg())),
        _ => Err(EvalError::arithmetic(format!("unary '-' is not defined for {}", v.kind()))),
    }
}

/// Unary `+`: identity on numbers, promotes `I8`/`I16`/`Char` to `I32` (§4.3),
/// and on `Bool`/`AtomicBool` returns the boolean value unchanged rather than
/// coercing it into a number (§4.3: "on Bool/AtomicBool returns the boolean
/// value").
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Coercion` otherwise.
pub fn positivize(v: &Value, options: &Options) -> EvalResult<Value> {
    null_check(v, "+", options)?;
    match v {
        Value::Null => Ok(Value::I32(0)),
        Value::Bool(_) | Value::AtomicBool(_) => Ok(Value::Bool(v.to_bool(false)?)),
        Value::I8(_) | Value::I16(_) | Value::Char(_) => Ok(Value::I32(v.to_i32(false)?)),
        Value::I32(_) => Ok(Value::I32(v.to_i32(false)?)),
        Value::I64(_) => Ok(Value::I64(v.to_i64(false)?)),
        Value::F32(f) => Ok(Value::F32(*f)),
        Value::F64(f) => Ok(Value::F64(*f)),
        Value::BigInt(b) => Ok(Value::from((**b).clone())),
        Value::BigDec(d) => Ok(Value::from((**d).clone())),
        _ => Err(EvalError::arithmetic(format!("unary '+' is not defined for {}", v.kind()))),
    }
}

/// Logical `!`: boolean complement via `to_bool` (§4.3). One of the fixed
/// null-safe paths in practice since `!null` coerces through the same lenient
/// `to_bool` rule as every other boolean context.
///
/// # Errors
/// `Coercion` if `v` has no boolean reading.
pub fn complement(v: &Value, options: &Options) -> EvalResult<Value> {
    Ok(Value::Bool(!v.to_bool(!options.strict_arithmetic())?))
}

/// `.++` / `++.` / `.--` / `--.` pseudo-operators (§6.3): increment or
/// decrement by exactly 1, reusing `add`/`sub`'s overflow promotion. `Null`
/// folds to the kind's zero first (§4.2 step 1), so `increment(Null) == 1`
/// and `decrement(Null) == -1` per §4.3's "Increment/decrement ... `Null` ->
/// `1`/`-1`".
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Coercion`/`Arithmetic` otherwise.
pub fn increment(v: &Value, options: &Options) -> EvalResult<Value> {
    crate::arithmetic::add(v, &Value::I32(1), options)
}

/// # Errors
/// `NullOperand` under strict arithmetic; `Coercion`/`Arithmetic` otherwise.
pub fn decrement(v: &Value, options: &Options) -> EvalResult<Value> {
    crate::arithmetic::sub(v, &Value::I32(1), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::new()
    }

    #[test]
    fn negating_i32_min_promotes_to_bigint() {
        let r = negate(&Value::I32(i32::MIN), &opts()).unwrap();
        match r {
            Value::BigInt(b) => assert_eq!(b.to_string(), "2147483648"),
            other => panic!("expected BigInt, got {other:?}"),
        }
    }

    #[test]
    fn negating_an_ordinary_i32_stays_i32() {
        assert!(matches!(negate(&Value::I32(5), &opts()).unwrap(), Value::I32(-5)));
    }

    #[test]
    fn negating_a_bool_flips_it_rather_than_going_numeric() {
        assert!(matches!(negate(&Value::Bool(true), &opts()).unwrap(), Value::Bool(false)));
        assert!(matches!(negate(&Value::Bool(false), &opts()).unwrap(), Value::Bool(true)));
    }

    #[test]
    fn positivizing_a_bool_returns_the_boolean_value() {
        assert!(matches!(positivize(&Value::Bool(true), &opts()).unwrap(), Value::Bool(true)));
    }

    #[test]
    fn positivizing_narrow_ints_promotes_to_i32() {
        assert!(matches!(positivize(&Value::I8(5), &opts()).unwrap(), Value::I32(5)));
    }

    #[test]
    fn complement_reads_through_to_bool() {
        assert!(matches!(complement(&Value::I32(0), &opts()).unwrap(), Value::Bool(true)));
        assert!(matches!(complement(&Value::I32(1), &opts()).unwrap(), Value::Bool(false)));
    }

    #[test]
    fn increment_and_decrement_reuse_binary_arithmetic() {
        assert!(matches!(increment(&Value::I32(4), &opts()).unwrap(), Value::I32(5)));
        assert!(matches!(decrement(&Value::I32(4), &opts()).unwrap(), Value::I32(3)));
    }

    #[test]
    fn increment_and_decrement_of_null_fold_to_plus_or_minus_one() {
        assert!(matches!(increment(&Value::Null, &opts()).unwrap(), Value::I32(1)));
        assert!(matches!(decrement(&Value::Null, &opts()).unwrap(), Value::I32(-1)));
    }
}
