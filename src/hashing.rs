//! Value hashing for `Map`/`Set` keys, grounded on the teacher's `py_hash`
//! module: numeric kinds that compare equal across tags (`Value::I32(5)` /
//! `Value::F64(5.0)`) must hash identically, mirroring CPython's
//! `hash(5) == hash(5.0)` guarantee that the teacher's `cpython_hash_int`/
//! `cpython_hash_float` pair is built to preserve.

use std::hash::{Hash, Hasher};

use ahash::AHasher;
use num_traits::ToPrimitive;

use crate::value::Value;

/// Hashes `v` so that any two values considered equal by the cross-type
/// numeric equality ladder (§4.3) produce the same hash. `Null` and `NaN`
/// each get a fixed hash (NaN is never distinguished from other NaNs by `==`,
/// per §4.3).
#[must_use]
pub fn hash_value(v: &Value) -> u64 {
    let mut hasher = AHasher::default();
    hash_into(v, &mut hasher);
    hasher.finish()
}

fn hash_into(v: &Value, hasher: &mut AHasher) {
    match numeric_hash_key(v) {
        Some(NumericHashKey::Int(i)) => {
            0u8.hash(hasher);
            i.hash(hasher);
        }
        Some(NumericHashKey::Float(bits)) => {
            0u8.hash(hasher);
            // Integral floats hash identically to the equal integer (mirrors
            // CPython: hash(5) == hash(5.0)).
            bits.hash(hasher);
        }
        None => match v {
            Value::Null => 1u8.hash(hasher),
            Value::Text(s) => {
                2u8.hash(hasher);
                s.hash(hasher);
            }
            Value::Bool(b) => {
                0u8.hash(hasher);
                i64::from(*b).hash(hasher);
            }
            _ => {
                3u8.hash(hasher);
                std::mem::discriminant(v).hash(hasher);
            }
        },
    }
}

enum NumericHashKey {
    /// Used when the value is an exact integer (any integer kind, or a float
    /// with no fractional part, or a `BigDec` with an exact long value).
    Int(i64),
    /// Used when the value is a genuinely fractional `f64`/`f32`/`BigDec`; the
    /// raw bits of the canonical `f64` representation are hashed so equal
    /// fractional values collide.
    Float(u64),
}

fn numeric_hash_key(v: &Value) -> Option<NumericHashKey> {
    match v {
        Value::AtomicBool(cell) => Some(NumericHashKey::Int(i64::from(cell.load(std::sync::atomic::Ordering::Relaxed)))),
        Value::I8(i) => Some(NumericHashKey::Int(i64::from(*i))),
        Value::I16(i) => Some(NumericHashKey::Int(i64::from(*i))),
        Value::I32(i) => Some(NumericHashKey::Int(i64::from(*i))),
        Value::I64(i) => Some(NumericHashKey::Int(*i)),
        Value::Char(c) => Some(NumericHashKey::Int(i64::from(*c))),
        Value::BigInt(b) => b.to_i64().map(NumericHashKey::Int).or_else(|| {
            // Out-of-i64-range big integers hash on their decimal text form.
            Some(NumericHashKey::Float(ahash_str(&b.to_string())))
        }),
        Value::F32(f) => float_hash_key(f64::from(*f)),
        Value::F64(f) => float_hash_key(*f),
        Value::BigDec(d) => {
            if d.has_exact_long_value() {
                d.to_i64().map(NumericHashKey::Int)
            } else {
                Some(NumericHashKey::Float(d.to_f64().to_bits()))
            }
        }
        _ => None,
    }
}

fn float_hash_key(f: f64) -> Option<NumericHashKey> {
    if f.is_nan() {
        return Some(NumericHashKey::Float(0xDEAD_BEEF));
    }
    if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 {
        Some(NumericHashKey::Int(f as i64))
    } else {
        Some(NumericHashKey::Float(f.to_bits()))
    }
}

fn ahash_str(s: &str) -> u64 {
    let mut hasher = AHasher::default();
    s.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_equal_float_hash_identically() {
        assert_eq!(hash_value(&Value::I32(5)), hash_value(&Value::F64(5.0)));
        assert_eq!(hash_value(&Value::I64(5)), hash_value(&Value::I32(5)));
    }

    #[test]
    fn nan_hashes_consistently() {
        assert_eq!(hash_value(&Value::F64(f64::NAN)), hash_value(&Value::F64(f64::NAN)));
    }

    #[test]
    fn bool_and_equal_int_hash_identically() {
        assert_eq!(hash_value(&Value::Bool(true)), hash_value(&Value::I32(1)));
        assert_eq!(hash_value(&Value::Bool(false)), hash_value(&Value::I32(0)));
    }

    #[test]
    fn atomic_bool_hashes_like_the_equal_int_it_reads_as() {
        // Map/Set correctness requires equal keys (per `compare::values_equal`,
        // which treats AtomicBool as long-representable) to hash identically.
        assert_eq!(hash_value(&Value::atomic_bool(true)), hash_value(&Value::I32(1)));
        assert_eq!(hash_value(&Value::atomic_bool(false)), hash_value(&Value::Bool(false)));
    }

    #[test]
    fn distinct_texts_hash_differently_with_overwhelming_probability() {
        assert_ne!(hash_value(&Value::Text("a".into())), hash_value(&Value::Text("b".into())));
    }
}
