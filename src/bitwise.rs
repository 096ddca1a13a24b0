//! Bitwise operators `& | ^ << >> >>>` (§4.3).
//!
//! These always run at `i64` width regardless of operand kind (unlike
//! `arithmetic`'s width-sensitive ladder): there is no bitwise `BigInt`/
//! `BigDec` lane in this crate's operator registry, so every bitwise result
//! narrows the same way binary arithmetic's long lane does (§4.4).

use crate::errors::{EvalError, EvalResult};
use crate::options::Options;
use crate::value::{Kind, Value};

fn null_check(a: &Value, b: &Value, symbol: &str, options: &Options) -> EvalResult<()> {
    if (a.is_null() || b.is_null()) && options.null_operand_is_error(symbol) {
        return Err(EvalError::null_operand(symbol));
    }
    Ok(())
}

fn unary_null_check(v: &Value, symbol: &str, options: &Options) -> EvalResult<()> {
    if v.is_null() && options.null_operand_is_error(symbol) {
        return Err(EvalError::null_operand(symbol));
    }
    Ok(())
}

fn narrow(result: i64, a_kind: Kind, b_kind: Kind) -> Value {
    let both_i32_or_narrower = matches!(
        a_kind,
        Kind::I8 | Kind::I16 | Kind::I32 | Kind::Bool | Kind::AtomicBool | Kind::Char
    ) && matches!(
        b_kind,
        Kind::I8 | Kind::I16 | Kind::I32 | Kind::Bool | Kind::AtomicBool | Kind::Char
    );
    if both_i32_or_narrower {
        if let Ok(n) = i32::try_from(result) {
            return Value::I32(n);
        }
    }
    Value::I64(result)
}

fn binary(a: &Value, b: &Value, symbol: &str, options: &Options, op: fn(i64, i64) -> i64) -> EvalResult<Value> {
    null_check(a, b, symbol, options)?;
    if !a.is_long_representable() && !a.is_null() || !b.is_long_representable() && !b.is_null() {
        return Err(EvalError::arithmetic(format!("'{symbol}' is not defined for {} and {}", a.kind(), b.kind())));
    }
    let x = a.to_i64(false)?;
    let y = b.to_i64(false)?;
    Ok(narrow(op(x, y), a.kind(), b.kind()))
}

/// # Errors
/// `NullOperand` under strict arithmetic; `Arithmetic` for non-integral operands.
pub fn bitand(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    binary(a, b, "&", options, |x, y| x & y)
}

/// # Errors
/// `NullOperand` under strict arithmetic; `Arithmetic` for non-integral operands.
pub fn bitor(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    binary(a, b, "|", options, |x, y| x | y)
}

/// # Errors
/// `NullOperand` under strict arithmetic; `Arithmetic` for non-integral operands.
pub fn bitxor(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    binary(a, b, "^", options, |x, y| x ^ y)
}

/// `<<`, masking the shift count to 6 bits the way a 64-bit shift naturally wraps.
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Arithmetic` for non-integral operands.
pub fn shl(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    binary(a, b, "<<", options, |x, y| x.wrapping_shl(y as u32))
}

/// Arithmetic right shift (sign-extending).
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Arithmetic` for non-integral operands.
pub fn shr(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    binary(a, b, ">>", options, |x, y| x.wrapping_shr(y as u32))
}

/// Logical (unsigned) right shift `>>>`.
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Arithmetic` for non-integral operands.
pub fn ushr(a: &Value, b: &Value, options: &Options) -> EvalResult<Value> {
    binary(a, b, ">>>", options, |x, y| (x as u64).wrapping_shr(y as u32) as i64)
}

/// `~`: bitwise complement, distinct from logical `!` (§4.3: "Complement/`!`:
/// coerce to `i64`/`bool`" — `~` is the `i64` half, the existing `unary::complement`
/// is the `bool` half). Narrows back to `I32` the same way the binary
/// operators above do when the operand itself was no wider than `i32`.
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Arithmetic` for non-integral operands.
pub fn bit_complement(v: &Value, options: &Options) -> EvalResult<Value> {
    unary_null_check(v, "~", options)?;
    if !v.is_long_representable() && !v.is_null() {
        return Err(EvalError::arithmetic(format!("'~' is not defined for {}", v.kind())));
    }
    let x = v.to_i64(false)?;
    Ok(narrow(!x, v.kind(), v.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::new()
    }

    #[test]
    fn bitand_narrows_back_to_i32() {
        assert!(matches!(bitand(&Value::I32(0b1100), &Value::I32(0b1010), &opts()).unwrap(), Value::I32(0b1000)));
    }

    #[test]
    fn shift_operators_use_the_expected_direction() {
        assert!(matches!(shl(&Value::I32(1), &Value::I32(4), &opts()).unwrap(), Value::I32(16)));
        assert!(matches!(shr(&Value::I32(-16), &Value::I32(2), &opts()).unwrap(), Value::I32(-4)));
    }

    #[test]
    fn unsigned_shift_clears_the_sign_bit() {
        let r = ushr(&Value::I64(-1), &Value::I32(60), &opts()).unwrap();
        assert!(matches!(r, Value::I64(15)));
    }

    #[test]
    fn i64_operand_keeps_the_result_at_i64() {
        assert!(matches!(bitor(&Value::I64(1), &Value::I32(2), &opts()).unwrap(), Value::I64(3)));
    }

    #[test]
    fn bit_complement_flips_every_bit_and_narrows() {
        assert!(matches!(bit_complement(&Value::I32(0), &opts()).unwrap(), Value::I32(-1)));
        assert!(matches!(bit_complement(&Value::I64(0), &opts()).unwrap(), Value::I64(-1)));
    }
}
