//! Arbitrary-precision decimal type for the `BigDec` value kind (§3, §4.2 lane 4).
//!
//! Stored as `coefficient * 10^exponent`, `coefficient: BigInt`, matching the
//! teacher's `types::decimal::Decimal` representation. Unlike the teacher's
//! decimal (which models Python's `decimal.Decimal` including signed zero and
//! `NaN`/`Infinity` special values, because those are directly observable in
//! Python), this crate's `BigDec` has no special values — §3 assigns `NaN` only
//! to the floating kinds, so `BigDec` stays a plain finite decimal.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

/// Rounding modes for `BigDec` division and quantization, named after the
/// teacher's `DecimalRoundingMode` (itself named after CPython's
/// `decimal.ROUND_*` constants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    Up,
    Down,
    Ceiling,
    Floor,
    #[default]
    HalfUp,
    HalfDown,
    HalfEven,
}

/// Precision (significant digits) and rounding mode applied by `BigDec`
/// division and by coercion-time rounding (§3: "round-to-scale is applied on
/// ingestion"). Immutable once constructed (§5: "Math contexts are immutable").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathContext {
    precision: u32,
    rounding: RoundingMode,
}

impl MathContext {
    #[must_use]
    pub const fn new(precision: u32, rounding: RoundingMode) -> Self {
        Self { precision, rounding }
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    #[must_use]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// `DECIMAL128`-equivalent default: 34 significant digits, `HALF_EVEN`.
    #[must_use]
    pub const fn decimal128() -> Self {
        Self::new(34, RoundingMode::HalfEven)
    }
}

impl Default for MathContext {
    fn default() -> Self {
        Self::decimal128()
    }
}

/// An arbitrary-precision decimal, `coefficient * 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigDec {
    coefficient: BigInt,
    exponent: i32,
}

impl BigDec {
    #[must_use]
    pub fn new(coefficient: BigInt, exponent: i32) -> Self {
        Self { coefficient, exponent }
    }

    #[must_use]
    pub fn from_i64(v: i64) -> Self {
        Self::new(BigInt::from(v), 0)
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    #[must_use]
    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    #[must_use]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.coefficient.is_negative()
    }

    /// Parses a decimal literal: optional sign, digits, optional fraction,
    /// optional exponent. Matches the text grammar implied by §4.1's
    /// `Text -> F64` regex, but keeps full precision instead of rounding
    /// through `f64`.
    ///
    /// # Errors
    /// Returns `Err` if `s` is not a valid decimal literal.
    pub fn from_str_exact(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::zero());
        }
        let (mantissa, exp_part) = match s.find(['e', 'E']) {
            Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
            None => (s, None),
        };
        let extra_exp: i32 = match exp_part {
            Some(e) => e.parse().map_err(|_| format!("invalid exponent in '{s}'"))?,
            None => 0,
        };
        let negative = mantissa.starts_with('-');
        let unsigned = mantissa.trim_start_matches(['+', '-']);
        let (int_part, frac_part) = match unsigned.find('.') {
            Some(idx) => (&unsigned[..idx], &unsigned[idx + 1..]),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(format!("invalid decimal literal '{s}'"));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit()) || !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("invalid decimal literal '{s}'"));
        }
        let digits = format!("{int_part}{frac_part}");
        let mut coefficient: BigInt = if digits.is_empty() {
            BigInt::zero()
        } else {
            digits.parse().map_err(|_| format!("invalid decimal literal '{s}'"))?
        };
        if negative {
            coefficient = -coefficient;
        }
        let exponent = extra_exp - i32::try_from(frac_part.len()).unwrap_or(0);
        Ok(Self::new(coefficient, exponent))
    }

    /// Rescales `self` so its exponent equals `target_exponent`, rounding the
    /// dropped digits per `mode`. Used both for `quantize`-style operations
    /// and for rounding to `math_scale` on coercion (§3).
    #[must_use]
    pub fn rescale(&self, target_exponent: i32, mode: RoundingMode) -> Self {
        if target_exponent == self.exponent {
            return self.clone();
        }
        if target_exponent < self.exponent {
            let shift = self.exponent - target_exponent;
            let factor = BigInt::from(10).pow(shift.unsigned_abs());
            return Self::new(&self.coefficient * factor, target_exponent);
        }
        let shift = target_exponent - self.exponent;
        let divisor = BigInt::from(10).pow(shift.unsigned_abs());
        let (q, r) = self.coefficient.div_rem(&divisor);
        let rounded = apply_rounding(&q, &r, &divisor, self.coefficient.is_negative(), mode);
        Self::new(rounded, target_exponent)
    }

    /// Rounds to at most `precision` significant digits per `mode`, matching
    /// the "round-to-scale is applied on ingestion" invariant (§3) when a
    /// `MathContext` is supplied by a coercion.
    #[must_use]
    pub fn round_to_context(&self, ctx: MathContext) -> Self {
        let digit_count = significant_digits(&self.coefficient);
        let precision = ctx.precision() as usize;
        if digit_count <= precision || self.is_zero() {
            return self.clone();
        }
        let drop = digit_count - precision;
        self.rescale(self.exponent + i32::try_from(drop).unwrap_or(0), ctx.rounding())
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(-&self.coefficient, self.exponent)
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.coefficient.abs(), self.exponent)
    }

    fn aligned(a: &Self, b: &Self) -> (BigInt, BigInt, i32) {
        let exp = a.exponent.min(b.exponent);
        let a_factor = BigInt::from(10).pow((a.exponent - exp).unsigned_abs());
        let b_factor = BigInt::from(10).pow((b.exponent - exp).unsigned_abs());
        (&a.coefficient * a_factor, &b.coefficient * b_factor, exp)
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let (a, b, exp) = Self::aligned(self, other);
        Self::new(a + b, exp)
    }

    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let (a, b, exp) = Self::aligned(self, other);
        Self::new(a - b, exp)
    }

    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self::new(&self.coefficient * &other.coefficient, self.exponent + other.exponent)
    }

    /// Division under `ctx` (§4.2 lane 4, Testable Property 3): the result's
    /// scale is determined by the math context's precision, not by either
    /// operand's scale.
    ///
    /// # Errors
    /// Returns `Err(())` if `other` is zero; callers map this to `DivideByZero`.
    pub fn div(&self, other: &Self, ctx: MathContext) -> Result<Self, ()> {
        if other.is_zero() {
            return Err(());
        }
        // Scale the dividend up so the quotient has `precision` significant digits.
        let target_digits = i64::from(ctx.precision()) + 2;
        let num_digits = significant_digits(&self.coefficient) as i64;
        let den_digits = significant_digits(&other.coefficient) as i64;
        let shift = (target_digits - (num_digits - den_digits)).max(0);
        let scaled_num = &self.coefficient * BigInt::from(10).pow(u32::try_from(shift).unwrap_or(0));
        let (q, r) = scaled_num.div_rem(&other.coefficient);
        let rounded_q = apply_rounding(&q, &r, &other.coefficient, scaled_num.is_negative() != other.coefficient.is_negative(), ctx.rounding());
        let result_exponent = self.exponent - other.exponent - i32::try_from(shift).unwrap_or(0);
        Ok(Self::new(rounded_q, result_exponent).round_to_context(ctx))
    }

    /// Remainder semantics (C-style sign of dividend), per §4.2: "BigDec ...
    /// use the remainder for BigDec and i64/f64 (C-style sign of dividend)".
    ///
    /// # Errors
    /// Returns `Err(())` if `other` is zero.
    pub fn rem(&self, other: &Self) -> Result<Self, ()> {
        if other.is_zero() {
            return Err(());
        }
        let (a, b, exp) = Self::aligned(self, other);
        Ok(Self::new(&a % &b, exp))
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let coeff = self.coefficient.to_f64().unwrap_or(f64::NAN);
        coeff * 10f64.powi(self.exponent)
    }

    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        let scaled = self.rescale(0, RoundingMode::Down);
        scaled.coefficient.to_i64()
    }

    /// True when `self` has an exact integer value (fractional part is zero),
    /// used by the narrowing policy (§4.4: "if the `BigDec` has an exact long value").
    #[must_use]
    pub fn has_exact_long_value(&self) -> bool {
        if self.exponent >= 0 {
            return true;
        }
        let scaled = self.rescale(0, RoundingMode::Down);
        scaled == self.rescale(0, RoundingMode::Up)
    }
}

impl PartialOrd for BigDec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (a, b, _) = Self::aligned(self, other);
        Some(a.cmp(&b))
    }
}

impl Display for BigDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent >= 0 {
            let scaled = &self.coefficient * BigInt::from(10).pow(self.exponent.unsigned_abs());
            return write!(f, "{scaled}");
        }
        let divisor = BigInt::from(10).pow(self.exponent.unsigned_abs());
        let (int_part, frac_part) = self.coefficient.abs().div_rem(&divisor);
        let sign = if self.coefficient.is_negative() { "-" } else { "" };
        let frac_digits = usize::try_from(self.exponent.unsigned_abs()).unwrap_or(0);
        write!(f, "{sign}{int_part}.{frac_part:0>frac_digits$}")
    }
}

impl FromStr for BigDec {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_exact(s)
    }
}

fn significant_digits(n: &BigInt) -> usize {
    if n.is_zero() {
        1
    } else {
        n.abs().to_string().len()
    }
}

/// Applies `mode` to a `quotient`/`remainder` pair produced by truncating
/// division, matching the teacher's quantize rounding switch in spirit.
fn apply_rounding(quotient: &BigInt, remainder: &BigInt, divisor: &BigInt, negative: bool, mode: RoundingMode) -> BigInt {
    if remainder.is_zero() {
        return quotient.clone();
    }
    let abs_remainder = remainder.abs();
    let half = divisor.abs();
    let twice = &abs_remainder * 2;
    let round_up = match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp => twice >= half,
        RoundingMode::HalfDown => twice > half,
        RoundingMode::HalfEven => {
            if twice > half {
                true
            } else if twice < half {
                false
            } else {
                quotient.is_odd()
            }
        }
    };
    if round_up {
        if negative { quotient - 1 } else { quotient + 1 }
    } else {
        quotient.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_fractional_literals() {
        assert_eq!(BigDec::from_str_exact("123").unwrap().to_string(), "123");
        assert_eq!(BigDec::from_str_exact("-1.50").unwrap().to_string(), "-1.50");
        assert_eq!(BigDec::from_str_exact("").unwrap().to_string(), "0");
    }

    #[test]
    fn parses_exponent_notation() {
        let d = BigDec::from_str_exact("1.5e2").unwrap();
        assert_eq!(d.to_f64(), 150.0);
    }

    #[test]
    fn add_aligns_scales() {
        let a = BigDec::from_str_exact("1.1").unwrap();
        let b = BigDec::from_str_exact("2.22").unwrap();
        assert_eq!(a.add(&b).to_string(), "3.32");
    }

    #[test]
    fn div_one_third_with_decimal128_matches_testable_property() {
        let one = BigDec::from_i64(1);
        let three = BigDec::from_i64(3);
        let ctx = MathContext::new(34, RoundingMode::HalfUp);
        let result = one.div(&three, ctx).unwrap();
        assert_eq!(result.to_string(), "0.3333333333333333333333333333333333");
    }

    #[test]
    fn div_by_zero_is_rejected() {
        let one = BigDec::from_i64(1);
        let zero = BigDec::zero();
        assert!(one.div(&zero, MathContext::default()).is_err());
        assert!(one.rem(&zero).is_err());
    }

    #[test]
    fn rem_uses_dividend_sign_like_c_remainder() {
        let a = BigDec::from_i64(-7);
        let b = BigDec::from_i64(3);
        assert_eq!(a.rem(&b).unwrap().to_string(), "-1");
    }

    #[test]
    fn half_even_rounds_to_nearest_even_on_exact_tie() {
        let d = BigDec::new(BigInt::from(25), -1); // 2.5
        let rounded = d.rescale(0, RoundingMode::HalfEven);
        assert_eq!(rounded.to_string(), "2");
        let d = BigDec::new(BigInt::from(35), -1); // 3.5
        let rounded = d.rescale(0, RoundingMode::HalfEven);
        assert_eq!(rounded.to_string(), "4");
    }

    #[test]
    fn exact_long_value_detection_matches_narrowing_policy() {
        assert!(BigDec::from_str_exact("3.00").unwrap().has_exact_long_value());
        assert!(!BigDec::from_str_exact("3.01").unwrap().has_exact_long_value());
    }
}
