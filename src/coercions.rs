//! Total, explicit casts between value kinds (§4.1).
//!
//! Each cast takes the form `to_T(v, strict_cast) -> Result<T, EvalError>`:
//! on `Null`, `strict_cast` either raises `NullOperand` or returns the target
//! kind's zero. Every other conversion is handled by one match arm per source
//! kind, following §9's instruction to write "a chain of typed functions, not
//! instanceof-chains" — the same shape as the teacher's dispatch-table casts
//! (e.g. `LongInt::to_i64`/`to_f64` in `types::long_int`).

use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::errors::{EvalError, EvalResult};
use crate::types::{BigDec, MathContext};
use crate::value::{Kind, Value};

fn null_or<T>(strict_cast: bool, zero: T) -> EvalResult<T> {
    if strict_cast {
        Err(EvalError::null_operand("coercion"))
    } else {
        Ok(zero)
    }
}

/// Parses a JEXL text literal as `f64` (§4.1): empty string is `NaN`;
/// otherwise standard signed decimal with an optional exponent, matching
/// `^[+-]?\d*(\.\d*)?([eE][+-]?\d+)?$`.
#[must_use]
pub fn parse_text_as_f64(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return f64::NAN;
    }
    if !text_looks_numeric(s) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn text_looks_numeric(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mut saw_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        saw_digit = true;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Text -> integer parsing (§4.1): parse as `f64` first (empty -> `NaN` -> 0);
/// if the result equals its floor, cast to integer; otherwise a `Coercion`
/// failure.
fn parse_text_as_long(s: &str, strict_cast: bool) -> EvalResult<i64> {
    if s.trim().is_empty() {
        return null_or(strict_cast, 0);
    }
    let f = parse_text_as_f64(s);
    if f.is_nan() {
        return Err(EvalError::coercion("Text", "Long", s));
    }
    if f != f.floor() {
        return Err(EvalError::coercion("Text", "Long", s));
    }
    Ok(f as i64)
}

/// Identifier parse (§4.1, property subsystem): `0` or `[1-9][0-9]*`, up to 10
/// digits, used to distinguish array indices from property names. Not used by
/// arithmetic; exposed for the host-facing property/introspection layer.
#[must_use]
pub fn parse_array_index(s: &str) -> Option<u64> {
    if s.len() > 10 {
        return None;
    }
    if s == "0" {
        return Some(0);
    }
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes[0] == b'0' || !bytes[0].is_ascii_digit() {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    s.parse().ok()
}

/// Java-`Double.toString`-flavored formatting: whole-valued floats keep an
/// explicit `.0` so `5.0` doesn't collapse to `"5"` the way Rust's `Display`
/// would render it — JEXL scripts format numbers the way their source
/// language does, and `BigDec`'s own `Display` already keeps trailing zeros,
/// so `F64`/`F32` follow suit for consistency.
fn format_float_like_java(f: f64) -> String {
    if f.is_nan() {
        return String::new();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    let s = format!("{f}");
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{s}.0")
    }
}

impl Value {
    /// # Errors
    /// `NullOperand` under `strict_cast`; `Coercion` for unrepresentable text.
    pub fn to_bool(&self, strict_cast: bool) -> EvalResult<bool> {
        match self {
            Self::Null => null_or(strict_cast, false),
            Self::Bool(b) => Ok(*b),
            Self::AtomicBool(cell) => Ok(cell.load(std::sync::atomic::Ordering::Relaxed)),
            Self::I8(i) => Ok(*i != 0),
            Self::I16(i) => Ok(*i != 0),
            Self::I32(i) => Ok(*i != 0),
            Self::I64(i) => Ok(*i != 0),
            Self::Char(c) => Ok(*c != 0),
            Self::F32(f) => Ok(!f.is_nan() && *f != 0.0),
            Self::F64(f) => Ok(!f.is_nan() && *f != 0.0),
            Self::BigInt(b) => Ok(!b.is_zero()),
            Self::BigDec(d) => Ok(!d.is_zero()),
            Self::Text(s) => Ok(!s.is_empty() && s.as_ref() != "false"),
            _ => Err(EvalError::coercion(self.kind().into(), "Bool", "<non-scalar>")),
        }
    }

    /// # Errors
    /// `NullOperand` under `strict_cast`; `Coercion` if the value doesn't fit
    /// or can't be parsed as an `i32`.
    pub fn to_i32(&self, strict_cast: bool) -> EvalResult<i32> {
        match self {
            Self::Null => null_or(strict_cast, 0),
            Self::Bool(b) => Ok(i32::from(*b)),
            Self::AtomicBool(cell) => Ok(i32::from(cell.load(std::sync::atomic::Ordering::Relaxed))),
            Self::I8(i) => Ok(i32::from(*i)),
            Self::I16(i) => Ok(i32::from(*i)),
            Self::I32(i) => Ok(*i),
            Self::Char(c) => Ok(i32::from(*c)),
            Self::I64(i) => i32::try_from(*i).map_err(|_| EvalError::coercion("I64", "I32", i.to_string())),
            Self::F32(f) => Ok(if f.is_nan() { 0 } else { *f as i32 }),
            Self::F64(f) => Ok(if f.is_nan() { 0 } else { *f as i32 }),
            Self::BigInt(b) => b.to_i32().ok_or_else(|| EvalError::coercion("BigInt", "I32", b.to_string())),
            Self::BigDec(d) => {
                let long = d.to_i64().ok_or_else(|| EvalError::coercion("BigDec", "I32", d.to_string()))?;
                i32::try_from(long).map_err(|_| EvalError::coercion("BigDec", "I32", d.to_string()))
            }
            Self::Text(s) => {
                let long = parse_text_as_long(s, strict_cast)?;
                i32::try_from(long).map_err(|_| EvalError::coercion("Text", "I32", s.to_string()))
            }
            _ => Err(EvalError::coercion(self.kind().into(), "I32", "<non-scalar>")),
        }
    }

    /// # Errors
    /// `NullOperand` under `strict_cast`; `Coercion` for unparsable text.
    pub fn to_i64(&self, strict_cast: bool) -> EvalResult<i64> {
        match self {
            Self::Null => null_or(strict_cast, 0),
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::AtomicBool(cell) => Ok(i64::from(cell.load(std::sync::atomic::Ordering::Relaxed))),
            Self::I8(i) => Ok(i64::from(*i)),
            Self::I16(i) => Ok(i64::from(*i)),
            Self::I32(i) => Ok(i64::from(*i)),
            Self::I64(i) => Ok(*i),
            Self::Char(c) => Ok(i64::from(*c)),
            Self::F32(f) => Ok(if f.is_nan() { 0 } else { f64::from(*f) as i64 }),
            Self::F64(f) => Ok(if f.is_nan() { 0 } else { *f as i64 }),
            Self::BigInt(b) => Ok(b.to_i64().unwrap_or_else(|| truncate_bigint_to_i64(b))),
            Self::BigDec(d) => Ok(d.to_i64().unwrap_or(0)),
            Self::Text(s) => parse_text_as_long(s, strict_cast),
            _ => Err(EvalError::coercion(self.kind().into(), "I64", "<non-scalar>")),
        }
    }

    /// # Errors
    /// `NullOperand` under `strict_cast`.
    pub fn to_f64(&self, strict_cast: bool) -> EvalResult<f64> {
        match self {
            Self::Null => null_or(strict_cast, 0.0),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::AtomicBool(cell) => Ok(if cell.load(std::sync::atomic::Ordering::Relaxed) { 1.0 } else { 0.0 }),
            Self::I8(i) => Ok(f64::from(*i)),
            Self::I16(i) => Ok(f64::from(*i)),
            Self::I32(i) => Ok(f64::from(*i)),
            Self::I64(i) => Ok(*i as f64),
            Self::Char(c) => Ok(f64::from(*c)),
            Self::F32(f) => Ok(f64::from(*f)),
            Self::F64(f) => Ok(*f),
            Self::BigInt(b) => Ok(b.to_f64().unwrap_or(f64::INFINITY)),
            Self::BigDec(d) => Ok(d.to_f64()),
            Self::Text(s) => Ok(parse_text_as_f64(s)),
            _ => Err(EvalError::coercion(self.kind().into(), "F64", "<non-scalar>")),
        }
    }

    /// # Errors
    /// `NullOperand` under `strict_cast`; `Coercion` for unparsable text.
    pub fn to_bigint(&self, strict_cast: bool) -> EvalResult<BigInt> {
        match self {
            Self::Null => null_or(strict_cast, BigInt::zero()),
            Self::Bool(b) => Ok(BigInt::from(i64::from(*b))),
            Self::AtomicBool(cell) => Ok(BigInt::from(i64::from(cell.load(std::sync::atomic::Ordering::Relaxed)))),
            Self::I8(i) => Ok(BigInt::from(*i)),
            Self::I16(i) => Ok(BigInt::from(*i)),
            Self::I32(i) => Ok(BigInt::from(*i)),
            Self::I64(i) => Ok(BigInt::from(*i)),
            Self::Char(c) => Ok(BigInt::from(*c)),
            Self::F32(f) => Ok(float_to_bigint(f64::from(*f))),
            Self::F64(f) => Ok(float_to_bigint(*f)),
            Self::BigInt(b) => Ok((**b).clone()),
            Self::BigDec(d) => Ok(d.rescale(0, crate::types::RoundingMode::Down).coefficient().clone()),
            Self::Text(s) => {
                if s.trim().is_empty() {
                    return null_or(strict_cast, BigInt::zero());
                }
                Ok(BigInt::from(parse_text_as_long(s, strict_cast)?))
            }
            _ => Err(EvalError::coercion(self.kind().into(), "BigInt", "<non-scalar>")),
        }
    }

    /// # Errors
    /// `NullOperand` under `strict_cast`; `Coercion` for unparsable text.
    pub fn to_bigdec(&self, strict_cast: bool, ctx: MathContext) -> EvalResult<BigDec> {
        let raw = match self {
            Self::Null => return null_or(strict_cast, BigDec::zero()),
            Self::Bool(b) => BigDec::from_i64(i64::from(*b)),
            Self::AtomicBool(cell) => BigDec::from_i64(i64::from(cell.load(std::sync::atomic::Ordering::Relaxed))),
            Self::I8(i) => BigDec::from_i64(i64::from(*i)),
            Self::I16(i) => BigDec::from_i64(i64::from(*i)),
            Self::I32(i) => BigDec::from_i64(i64::from(*i)),
            Self::I64(i) => BigDec::from_i64(*i),
            Self::Char(c) => BigDec::from_i64(i64::from(*c)),
            Self::F32(f) => {
                if f.is_nan() {
                    BigDec::zero()
                } else {
                    BigDec::from_str_exact(&format!("{f}")).map_err(|_| EvalError::coercion("F32", "BigDec", f.to_string()))?
                }
            }
            Self::F64(f) => {
                if f.is_nan() {
                    BigDec::zero()
                } else {
                    BigDec::from_str_exact(&format!("{f}")).map_err(|_| EvalError::coercion("F64", "BigDec", f.to_string()))?
                }
            }
            Self::BigInt(b) => BigDec::new((**b).clone(), 0),
            Self::BigDec(d) => (**d).clone(),
            Self::Text(s) => {
                if s.trim().is_empty() {
                    BigDec::zero()
                } else {
                    BigDec::from_str_exact(s).map_err(|_| EvalError::coercion("Text", "BigDec", s.to_string()))?
                }
            }
            _ => return Err(EvalError::coercion(self.kind().into(), "BigDec", "<non-scalar>")),
        };
        Ok(raw.round_to_context(ctx))
    }

    /// # Errors
    /// `NullOperand` under `strict_cast`.
    pub fn to_text(&self, strict_cast: bool) -> EvalResult<Rc<str>> {
        match self {
            Self::Null => null_or(strict_cast, Rc::from("")),
            Self::Bool(b) => Ok(Rc::from(if *b { "true" } else { "false" })),
            Self::AtomicBool(cell) => {
                Ok(Rc::from(if cell.load(std::sync::atomic::Ordering::Relaxed) { "true" } else { "false" }))
            }
            Self::I8(i) => Ok(Rc::from(i.to_string().as_str())),
            Self::I16(i) => Ok(Rc::from(i.to_string().as_str())),
            Self::I32(i) => Ok(Rc::from(i.to_string().as_str())),
            Self::I64(i) => Ok(Rc::from(i.to_string().as_str())),
            Self::Char(c) => Ok(Rc::from(
                char::from_u32(u32::from(*c)).map(String::from).unwrap_or_default().as_str(),
            )),
            Self::F32(f) => Ok(Rc::from(format_float_like_java(f64::from(*f)).as_str())),
            Self::F64(f) => Ok(Rc::from(format_float_like_java(*f).as_str())),
            Self::BigInt(b) => Ok(Rc::from(b.to_string().as_str())),
            Self::BigDec(d) => Ok(Rc::from(d.to_string().as_str())),
            Self::Text(s) => Ok(Rc::clone(s)),
            _ => Err(EvalError::coercion(self.kind().into(), "Text", "<non-scalar>")),
        }
    }
}

fn float_to_bigint(f: f64) -> BigInt {
    if f.is_nan() {
        return BigInt::zero();
    }
    BigInt::from(f as i64)
}

fn truncate_bigint_to_i64(b: &BigInt) -> i64 {
    let (_, bytes) = b.to_bytes_le();
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    let unsigned = u64::from_le_bytes(buf);
    unsigned as i64
}

impl From<Kind> for &'static str {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Null => "Null",
            Kind::Bool => "Bool",
            Kind::AtomicBool => "AtomicBool",
            Kind::I8 => "I8",
            Kind::I16 => "I16",
            Kind::I32 => "I32",
            Kind::I64 => "I64",
            Kind::BigInt => "BigInt",
            Kind::Char => "Char",
            Kind::F32 => "F32",
            Kind::F64 => "F64",
            Kind::BigDec => "BigDec",
            Kind::Text => "Text",
            Kind::Pattern => "Pattern",
            Kind::Seq => "Seq",
            Kind::Map => "Map",
            Kind::Set => "Set",
            Kind::Range => "Range",
            Kind::Host => "Host",
        }
    }
}
