//! Supporting value payload types, laid out the way the teacher splits `types/`
//! into one module per heap-payload kind (`types::long_int`, `types::decimal`,
//! `types::set`, ...).

pub mod decimal;
pub mod pattern;
pub mod range;

pub use decimal::{BigDec, MathContext, RoundingMode};
pub use pattern::Pattern;
pub use range::Range;
