//! The tagged-union `Value` type (§3): every runtime value JEXL can produce.
//!
//! Mirrors the teacher's `value::Value` in shape (a closed enum, immediate
//! payloads inline, shared payloads behind a pointer) but swaps the teacher's
//! heap-arena `Ref(HeapId)` indirection for direct `Rc<...>` payloads, per the
//! simplification recorded in `SPEC_FULL.md` §3 and `DESIGN.md`: this crate's
//! values are immutable snapshots (§3 Lifecycle), so there is no aliasing to
//! track and no manual refcounting to get right.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use num_bigint::BigInt;

use crate::hashing::hash_value;
use crate::types::{BigDec, Pattern, Range};

/// Opaque host-managed object. Values of this kind are never inspected
/// directly by the evaluation core — only through the `Introspection` trait
/// in `host` (§6.1: "accessed only via the introspection interface").
pub trait HostValue: std::any::Any + fmt::Debug {
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn std::any::Any;
}

pub type Map = indexmap::IndexMap<Key, Value, ahash::RandomState>;
pub type Set = indexmap::IndexSet<Key, ahash::RandomState>;

/// Primary runtime value type (§3).
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    /// A mutable, thread-safe bool cell that *reads as* a bool under coercion
    /// (§3). Shared via `Arc` so `get`/`set` observe the same cell everywhere.
    AtomicBool(Arc<AtomicBool>),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    BigInt(Rc<BigInt>),
    /// An unsigned 16-bit code unit (§3) that coerces to integer.
    Char(u16),
    F32(f32),
    F64(f64),
    BigDec(Rc<BigDec>),
    Text(Rc<str>),
    Pattern(Pattern),
    Seq(Rc<Vec<Value>>),
    Map(Rc<Map>),
    Set(Rc<Set>),
    Range(Range),
    Host(Rc<dyn HostValue>),
}

/// The kind tag of a [`Value`], independent of payload — used for coercion
/// error messages, dispatch tables, and the narrowing policy (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Kind {
    Null,
    Bool,
    AtomicBool,
    I8,
    I16,
    I32,
    I64,
    BigInt,
    Char,
    F32,
    F64,
    BigDec,
    Text,
    Pattern,
    Seq,
    Map,
    Set,
    Range,
    Host,
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::AtomicBool(_) => Kind::AtomicBool,
            Self::I8(_) => Kind::I8,
            Self::I16(_) => Kind::I16,
            Self::I32(_) => Kind::I32,
            Self::I64(_) => Kind::I64,
            Self::BigInt(_) => Kind::BigInt,
            Self::Char(_) => Kind::Char,
            Self::F32(_) => Kind::F32,
            Self::F64(_) => Kind::F64,
            Self::BigDec(_) => Kind::BigDec,
            Self::Text(_) => Kind::Text,
            Self::Pattern(_) => Kind::Pattern,
            Self::Seq(_) => Kind::Seq,
            Self::Map(_) => Kind::Map,
            Self::Set(_) => Kind::Set,
            Self::Range(_) => Kind::Range,
            Self::Host(_) => Kind::Host,
        }
    }

    /// "Numberable" (Glossary): any integer kind of width <= 64 bits, plus `Char`.
    #[must_use]
    pub fn is_numberable(&self) -> bool {
        matches!(
            self,
            Self::I8(_) | Self::I16(_) | Self::I32(_) | Self::I64(_) | Self::Char(_)
        )
    }

    /// "Long-representable" (Glossary): numberable, or boolean, or atomic-bool.
    #[must_use]
    pub fn is_long_representable(&self) -> bool {
        self.is_numberable() || matches!(self, Self::Bool(_) | Self::AtomicBool(_))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::F32(_) | Self::F64(_))
    }

    #[must_use]
    pub fn is_big_dec(&self) -> bool {
        matches!(self, Self::BigDec(_))
    }

    #[must_use]
    pub fn is_big_int(&self) -> bool {
        matches!(self, Self::BigInt(_))
    }

    #[must_use]
    pub fn text(s: impl Into<Rc<str>>) -> Self {
        Self::Text(s.into())
    }

    #[must_use]
    pub fn seq(items: Vec<Value>) -> Self {
        Self::Seq(Rc::new(items))
    }

    #[must_use]
    pub fn atomic_bool(b: bool) -> Self {
        Self::AtomicBool(Arc::new(AtomicBool::new(b)))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}
impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Self::BigInt(Rc::new(v))
    }
}
impl From<BigDec> for Value {
    fn from(v: BigDec) -> Self {
        Self::BigDec(Rc::new(v))
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Rc::from(v))
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Rc::from(v.as_str()))
    }
}

/// Wraps a [`Value`] for use as a `Map`/`Set` key. Hash and equality follow
/// the cross-type numeric equality ladder (§4.3) via [`crate::compare`], so
/// `{1: "a"}` and a lookup with `1.0` collide the same way CPython's `dict`
/// treats `1` and `1.0` as the same key.
#[derive(Debug, Clone)]
pub struct Key(pub Value);

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        crate::compare::values_equal(&self.0, &other.0)
    }
}
impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_reports_the_right_tag() {
        assert_eq!(Value::I32(1).kind(), Kind::I32);
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::text("x").kind(), Kind::Text);
    }

    #[test]
    fn long_representable_includes_bool_and_atomic_bool() {
        assert!(Value::Bool(true).is_long_representable());
        assert!(Value::atomic_bool(true).is_long_representable());
        assert!(Value::I8(1).is_long_representable());
        assert!(!Value::F64(1.0).is_long_representable());
    }

    #[test]
    fn map_key_treats_cross_type_equal_numbers_as_the_same_key() {
        let mut map: Map = Map::default();
        map.insert(Key(Value::I32(1)), Value::text("one"));
        assert!(map.contains_key(&Key(Value::F64(1.0))));
    }
}
