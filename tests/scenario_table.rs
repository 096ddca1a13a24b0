//! Integration tests mapping the concrete scenario table and testable
//! properties to the public API, run against the crate the way an embedder
//! would: through `jexl_eval::{arithmetic, compare, coercions, ...}` rather
//! than through crate-internal items.

use jexl_eval::options::{OptionFlags, Options};
use jexl_eval::types::{BigDec, MathContext, Pattern, RoundingMode};
use jexl_eval::value::Value;
use jexl_eval::{arithmetic, bitwise, compare, containment, unary};
use num_bigint::BigInt;

fn lenient() -> Options {
    Options::new()
}

#[test]
fn add_i32_max_plus_one_overflows_to_bigint() {
    let r = arithmetic::add(&Value::I32(i32::MAX), &Value::I32(1), &lenient()).unwrap();
    match r {
        Value::BigInt(b) => assert_eq!(b.to_string(), "2147483648"),
        other => panic!("expected BigInt, got {other:?}"),
    }
}

#[test]
fn div_one_third_under_decimal128_context() {
    let ctx = MathContext::decimal128();
    let options = Options::new().with_math_context(ctx);
    let one = Value::from(BigDec::from_i64(1));
    let three = Value::from(BigDec::from_i64(3));
    let r = arithmetic::div(&one, &three, &options).unwrap();
    match r {
        Value::BigDec(d) => assert_eq!(d.to_string(), "0.3333333333333333333333333333333333"),
        other => panic!("expected BigDec, got {other:?}"),
    }
}

#[test]
fn mod_i32_keeps_sign_of_dividend() {
    let r = arithmetic::rem(&Value::I32(-7), &Value::I32(3), &lenient()).unwrap();
    assert!(matches!(r, Value::I32(-1)));
}

#[test]
fn mod_bigint_is_mathematical_modulo() {
    let r = arithmetic::rem(&Value::from(BigInt::from(-7)), &Value::from(BigInt::from(3)), &lenient()).unwrap();
    match r {
        Value::BigInt(b) => assert_eq!(b.to_string(), "2"),
        other => panic!("expected BigInt, got {other:?}"),
    }
}

#[test]
fn compare_nan_to_nan_is_equal() {
    use std::cmp::Ordering;
    assert_eq!(compare::compare_values(&Value::F64(f64::NAN), &Value::F64(f64::NAN)), Some(Ordering::Equal));
}

#[test]
fn compare_nan_to_one_is_less_than() {
    use std::cmp::Ordering;
    assert_eq!(compare::compare_values(&Value::F64(f64::NAN), &Value::F64(1.0)), Some(Ordering::Less));
}

#[test]
fn contains_hello_star_matches_hello_world() {
    let pattern = Pattern::compile("hello.*").unwrap();
    let r = containment::contains(&Value::text("hello world"), &Value::Pattern(pattern), &lenient()).unwrap();
    assert_eq!(r, containment::Tri::True);
}

#[test]
fn contains_treats_a_text_needle_as_a_regex_source() {
    let r = containment::contains(&Value::text("hello world"), &Value::text("hello.*"), &lenient()).unwrap();
    assert_eq!(r, containment::Tri::True);
}

#[test]
fn cross_type_equality_and_strict_equality_diverge() {
    assert!(compare::values_equal(&Value::I32(1), &Value::F64(1.0)));
    assert!(!compare::strict_equal(&Value::I32(1), &Value::F64(1.0)));
}

#[test]
fn divide_by_zero_is_never_downgraded_even_when_silent() {
    let silent = Options::new().with_flag(OptionFlags::SILENT, true);
    assert!(arithmetic::div(&Value::I32(1), &Value::I32(0), &silent).is_err());
}

#[test]
fn null_operand_policy_tracks_strict_arithmetic() {
    let strict = Options::new().with_flag(OptionFlags::STRICT_ARITHMETIC, true);
    assert!(arithmetic::add(&Value::Null, &Value::I32(1), &strict).is_err());
    assert!(arithmetic::add(&Value::Null, &Value::I32(1), &lenient()).is_ok());
    // `==` is a fixed null-safe operator even under strict arithmetic (§5).
    assert!(compare::values_equal(&Value::Null, &Value::Null));
}

#[test]
fn negating_i32_min_overflows_to_bigint_like_binary_arithmetic() {
    let r = unary::negate(&Value::I32(i32::MIN), &lenient()).unwrap();
    match r {
        Value::BigInt(b) => assert_eq!(b.to_string(), "2147483648"),
        other => panic!("expected BigInt, got {other:?}"),
    }
}

#[test]
fn bitwise_shift_narrows_back_to_i32_when_both_operands_fit() {
    let r = bitwise::shl(&Value::I32(1), &Value::I32(8), &lenient()).unwrap();
    assert!(matches!(r, Value::I32(256)));
}

#[test]
fn half_even_rounding_matches_banker_rounding_on_exact_ties() {
    let ctx = MathContext::new(1, RoundingMode::HalfEven);
    let two_point_five = Value::text("2.5").to_bigdec(false, MathContext::new(34, RoundingMode::HalfUp)).unwrap();
    let rounded = two_point_five.round_to_context(ctx);
    assert_eq!(rounded.to_string(), "2");
}

#[test]
fn text_to_bool_follows_the_empty_and_literal_false_rules() {
    assert!(!Value::text("").to_bool(false).unwrap());
    assert!(!Value::text("false").to_bool(false).unwrap());
    assert!(Value::text("anything-else").to_bool(false).unwrap());
}

#[test]
fn size_and_empty_agree_on_aggregates() {
    let seq = Value::seq(vec![Value::I32(1), Value::I32(2), Value::I32(3)]);
    assert_eq!(containment::size(&seq), 3);
    assert!(!containment::is_empty(&seq));
    assert!(containment::is_empty(&Value::seq(vec![])));
}
