//! Containment and structural query operators (§4.3): `=~` (contains), `=^`
//! (starts-with), `=$` (ends-with), `empty`, `size`.
//!
//! `contains` against a `Pattern` operand delegates to `regex`; against every
//! other aggregate kind it's a structural membership test. Where the
//! right-hand operand's kind has no defined containment relationship, these
//! return `Unknown` (§4.3) rather than `false`, so the interpreter can fall
//! back to a host operator overload instead of silently reporting "not found".

use crate::compare::values_equal;
use crate::errors::{EvalError, EvalResult};
use crate::options::Options;
use crate::value::Value;

/// Three-valued containment result (§4.3): built-in semantics either answer
/// definitively or defer (`Unknown`) to a host `ArithmeticExt` overload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tri {
    True,
    False,
    Unknown,
}

impl Tri {
    #[must_use]
    pub const fn from_bool(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

fn null_check(a: &Value, b: &Value, symbol: &str, options: &Options) -> EvalResult<()> {
    if (a.is_null() || b.is_null()) && options.null_operand_is_error(symbol) {
        return Err(EvalError::null_operand(symbol));
    }
    Ok(())
}

/// `=~` (§4.3): regex match when `needle` is a `Pattern`; when `needle` is
/// `Text` it is likewise treated as a regex source and compiled on the fly
/// (§4.3: "if container is Text, treat it as a regex pattern") — not a plain
/// substring test; element membership for `Seq`/`Set`; key membership for
/// `Map`; bound membership for `Range`. `Unknown` for anything else.
///
/// # Errors
/// `NullOperand` under strict arithmetic; `Coercion` if `needle` is `Text`
/// that doesn't compile as a regex.
pub fn contains(haystack: &Value, needle: &Value, options: &Options) -> EvalResult<Tri> {
    null_check(haystack, needle, "=~", options)?;
    Ok(match (haystack, needle) {
        (Value::Text(text), Value::Pattern(pattern)) => Tri::from_bool(pattern.is_match(text)),
        (Value::Text(text), Value::Text(pattern_src)) => {
            let re = regex::Regex::new(pattern_src).map_err(|_| EvalError::coercion("Text", "Pattern", pattern_src.to_string()))?;
            Tri::from_bool(re.is_match(text))
        }
        (Value::Seq(items), Value::Seq(sub)) => {
            Tri::from_bool(sub.iter().all(|s| items.iter().any(|v| values_equal(v, s))))
        }
        (Value::Map(map), Value::Map(sub_map)) => {
            Tri::from_bool(sub_map.keys().all(|sk| map.keys().any(|k| values_equal(&k.0, &sk.0))))
        }
        (Value::Seq(items), other) => Tri::from_bool(items.iter().any(|v| values_equal(v, other))),
        (Value::Set(items), other) => Tri::from_bool(items.iter().any(|k| values_equal(&k.0, other))),
        (Value::Map(map), other) => Tri::from_bool(map.keys().any(|k| values_equal(&k.0, other))),
        (Value::Range(range), other) => {
            if let Ok(i) = other.to_i64(false) {
                Tri::from_bool(range.contains(i))
            } else {
                Tri::Unknown
            }
        }
        _ => Tri::Unknown,
    })
}

/// `=^` (§4.3): prefix test. Defined for `Text`/`Text` and `Seq` (first
/// element equals `needle`); `Unknown` otherwise.
///
/// # Errors
/// `NullOperand` under strict arithmetic.
pub fn starts_with(haystack: &Value, needle: &Value, options: &Options) -> EvalResult<Tri> {
    null_check(haystack, needle, "=^", options)?;
    Ok(match (haystack, needle) {
        (Value::Text(text), Value::Pattern(pattern)) => Tri::from_bool(pattern.as_str().is_empty() || {
            let re = regex::Regex::new(&format!("^(?:{})", pattern.as_str())).ok();
            re.is_some_and(|r| r.is_match(text))
        }),
        (Value::Text(text), Value::Text(prefix)) => Tri::from_bool(text.starts_with(prefix.as_ref())),
        (Value::Seq(items), other) => Tri::from_bool(items.first().is_some_and(|v| values_equal(v, other))),
        _ => Tri::Unknown,
    })
}

/// `=$` (§4.3): suffix test, the mirror of [`starts_with`].
///
/// # Errors
/// `NullOperand` under strict arithmetic.
pub fn ends_with(haystack: &Value, needle: &Value, options: &Options) -> EvalResult<Tri> {
    null_check(haystack, needle, "=$", options)?;
    Ok(match (haystack, needle) {
        (Value::Text(text), Value::Text(suffix)) => Tri::from_bool(text.ends_with(suffix.as_ref())),
        (Value::Seq(items), other) => Tri::from_bool(items.last().is_some_and(|v| values_equal(v, other))),
        _ => Tri::Unknown,
    })
}

/// `empty` (§4.3): `Null` is empty; `0`/`false`/`NaN`-or-zero numerics are
/// empty (JEXL's long-standing "0 is empty" rule); empty aggregates and the
/// empty string are empty; everything else is not.
#[must_use]
pub fn is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::AtomicBool(cell) => !cell.load(std::sync::atomic::Ordering::Relaxed),
        Value::I8(i) => *i == 0,
        Value::I16(i) => *i == 0,
        Value::I32(i) => *i == 0,
        Value::I64(i) => *i == 0,
        Value::Char(c) => *c == 0,
        Value::F32(f) => f.is_nan() || *f == 0.0,
        Value::F64(f) => f.is_nan() || *f == 0.0,
        Value::BigInt(b) => b.as_ref() == &num_bigint::BigInt::from(0),
        Value::BigDec(d) => d.is_zero(),
        Value::Text(s) => s.is_empty(),
        Value::Seq(items) => items.is_empty(),
        Value::Map(map) => map.is_empty(),
        Value::Set(set) => set.is_empty(),
        Value::Range(range) => range.is_empty(),
        Value::Pattern(_) | Value::Host(_) => false,
    }
}

/// `size` (§4.3): length for `Text`/`Seq`/`Map`/`Set`/`Range`, `1` for every
/// scalar, `0` for `Null`.
#[must_use]
pub fn size(v: &Value) -> u64 {
    match v {
        Value::Null => 0,
        Value::Text(s) => s.chars().count() as u64,
        Value::Seq(items) => items.len() as u64,
        Value::Map(map) => map.len() as u64,
        Value::Set(set) => set.len() as u64,
        Value::Range(range) => range.len(),
        _ => 1,
    }
}
