//! Lazy, restartable inclusive integer range (`Range` value kind, §3).
//!
//! "Lazy and restartable: iterating twice yields the same sequence" (§3) means
//! `Range` must be a cheap `Copy` descriptor rather than a consumed iterator —
//! the teacher's closest analogue is its `Range` builtin callable, but here the
//! type itself is the value (no heap allocation, no interpreter step object).

/// An inclusive `[from, to]` range. Uses `i32` bounds when both endpoints fit,
/// widening to `i64` otherwise, per §3: "i32-range when both bounds fit,
/// otherwise i64-range".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Range {
    I32 { from: i32, to: i32 },
    I64 { from: i64, to: i64 },
}

impl Range {
    #[must_use]
    pub fn new(from: i64, to: i64) -> Self {
        if let (Ok(f), Ok(t)) = (i32::try_from(from), i32::try_from(to)) {
            Self::I32 { from: f, to: t }
        } else {
            Self::I64 { from, to }
        }
    }

    #[must_use]
    pub fn from(&self) -> i64 {
        match *self {
            Self::I32 { from, .. } => i64::from(from),
            Self::I64 { from, .. } => from,
        }
    }

    #[must_use]
    pub fn to(&self) -> i64 {
        match *self {
            Self::I32 { to, .. } => i64::from(to),
            Self::I64 { to, .. } => to,
        }
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        let (from, to) = (self.from(), self.to());
        if to < from { 0 } else { (to - from) as u64 + 1 }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to() < self.from()
    }

    #[must_use]
    pub fn contains(&self, v: i64) -> bool {
        v >= self.from() && v <= self.to()
    }

    /// Restartable iteration per §3: every call produces a fresh iterator from
    /// `from`, so iterating twice yields the same sequence. `RangeInclusive`
    /// yields nothing when `to < from`, matching the empty-range case.
    pub fn iter(&self) -> std::ops::RangeInclusive<i64> {
        self.from()..=self.to()
    }
}
