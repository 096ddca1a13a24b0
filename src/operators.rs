//! The closed operator registry (§6.3): every JEXL operator, its symbol,
//! overloadable method name, arity, and — for the side-effect/pseudo/negated
//! forms — the base operator it derives from. Grounded on the teacher's
//! `Type`/`ExcType` pattern of a single closed enum carrying per-variant
//! metadata instead of scattering that metadata across match arms at each
//! call site.

use strum::{Display as StrumDisplay, EnumIter};

/// Arity of an operator as seen by a host `ArithmeticExt` overload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

/// Every operator JEXL defines (§6.3). Side-effect operators (`+=`, `++.`,
/// ...) and negated forms (`!~`, `!^`, `!$`) are not independently
/// overridable — they always resolve through [`Operator::base`] — matching
/// §6.3's "non-overridable; resolved by negating the base operator".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Negate,
    Positivize,
    Not,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equals,
    StrictEquals,
    Contains,
    StartsWith,
    EndsWith,
    NotContains,
    NotStartsWith,
    NotEndsWith,
    Empty,
    Size,
    /// `~`: bitwise complement, distinct from logical [`Operator::Not`] (§4.3:
    /// "coerce to `i64`/`bool`" covers both; `~` is the `i64` half).
    BitComplement,
    /// `.++`: increment, observing the value *before* the mutation (§4.5).
    PreIncrement,
    /// `++.`: increment, observing the value *after* the mutation (§4.5).
    PostIncrement,
    /// `.--`: decrement, observing the value *before* the mutation (§4.5).
    PreDecrement,
    /// `--.`: decrement, observing the value *after* the mutation (§4.5).
    PostDecrement,
    SelfAdd,
    SelfSubtract,
    SelfMultiply,
    SelfDivide,
    SelfModulo,
    SelfAnd,
    SelfOr,
    SelfXor,
}

impl Operator {
    /// The source-level symbol or keyword (§6.3).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add | Self::SelfAdd => "+",
            Self::Subtract | Self::SelfSubtract => "-",
            Self::Multiply | Self::SelfMultiply => "*",
            Self::Divide | Self::SelfDivide => "/",
            Self::Modulo | Self::SelfModulo => "%",
            Self::Negate => "-",
            Self::Positivize => "+",
            Self::Not => "!",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd | Self::SelfAnd => "&",
            Self::BitOr | Self::SelfOr => "|",
            Self::BitXor | Self::SelfXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::ShiftRightUnsigned => ">>>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Equals => "==",
            Self::StrictEquals => "===",
            Self::Contains => "=~",
            Self::StartsWith => "=^",
            Self::EndsWith => "=$",
            Self::NotContains => "!~",
            Self::NotStartsWith => "!^",
            Self::NotEndsWith => "!$",
            Self::Empty => "empty",
            Self::Size => "size",
            Self::BitComplement => "~",
            Self::PreIncrement => ".++",
            Self::PostIncrement => "++.",
            Self::PreDecrement => ".--",
            Self::PostDecrement => "--.",
        }
    }

    /// The method name a host `Introspection::method_invoke` overload can
    /// register against (§6.1), e.g. a host-defined `jexl:contains`.
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Add | Self::SelfAdd => "add",
            Self::Subtract | Self::SelfSubtract => "subtract",
            Self::Multiply | Self::SelfMultiply => "multiply",
            Self::Divide | Self::SelfDivide => "divide",
            Self::Modulo | Self::SelfModulo => "mod",
            Self::Negate => "negate",
            Self::Positivize => "positivize",
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::BitAnd | Self::SelfAnd => "and",
            Self::BitOr | Self::SelfOr => "or",
            Self::BitXor | Self::SelfXor => "xor",
            Self::ShiftLeft => "leftShift",
            Self::ShiftRight => "rightShift",
            Self::ShiftRightUnsigned => "rightShiftUnsigned",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::Equals => "equals",
            Self::StrictEquals => "strictEquals",
            Self::Contains | Self::NotContains => "contains",
            Self::StartsWith | Self::NotStartsWith => "startsWith",
            Self::EndsWith | Self::NotEndsWith => "endsWith",
            Self::Empty => "empty",
            Self::Size => "size",
            Self::BitComplement => "complement",
            Self::PreIncrement | Self::PostIncrement => "increment",
            Self::PreDecrement | Self::PostDecrement => "decrement",
        }
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Negate
            | Self::Positivize
            | Self::Not
            | Self::Empty
            | Self::Size
            | Self::BitComplement
            | Self::PreIncrement
            | Self::PostIncrement
            | Self::PreDecrement
            | Self::PostDecrement => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    /// The non-side-effect, non-negated operator this one derives from
    /// (§6.3): `+=` derives from `+`, `!~` derives from `=~` (negated), etc.
    /// Side-effect/negated operators are never independently overridable —
    /// a host overload of the base operator is all that's consulted.
    #[must_use]
    pub const fn base(self) -> Self {
        match self {
            Self::SelfAdd => Self::Add,
            Self::SelfSubtract => Self::Subtract,
            Self::SelfMultiply => Self::Multiply,
            Self::SelfDivide => Self::Divide,
            Self::SelfModulo => Self::Modulo,
            Self::SelfAnd => Self::BitAnd,
            Self::SelfOr => Self::BitOr,
            Self::SelfXor => Self::BitXor,
            Self::NotContains => Self::Contains,
            Self::NotStartsWith => Self::StartsWith,
            Self::NotEndsWith => Self::EndsWith,
            other => other,
        }
    }

    /// True for `!~`/`!^`/`!$`, whose built-in result is the logical negation
    /// of their base operator's result (§6.3), `Unknown` propagating through
    /// unnegated the same way a missing overload would.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        matches!(self, Self::NotContains | Self::NotStartsWith | Self::NotEndsWith)
    }

    /// True for `+=`, `++.`, `&=`, ... (§6.3): operators with a side effect
    /// on an assignable target, as opposed to pure value-producing operators.
    #[must_use]
    pub const fn has_side_effect(self) -> bool {
        matches!(
            self,
            Self::SelfAdd
                | Self::SelfSubtract
                | Self::SelfMultiply
                | Self::SelfDivide
                | Self::SelfModulo
                | Self::SelfAnd
                | Self::SelfOr
                | Self::SelfXor
                | Self::PreIncrement
                | Self::PostIncrement
                | Self::PreDecrement
                | Self::PostDecrement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_operator_has_a_symbol_and_method_name() {
        for op in Operator::iter() {
            assert!(!op.symbol().is_empty());
            assert!(!op.method_name().is_empty());
        }
    }

    #[test]
    fn side_effect_operators_resolve_to_their_base() {
        assert_eq!(Operator::SelfAdd.base(), Operator::Add);
        assert_eq!(Operator::SelfAdd.base().symbol(), "+");
    }

    #[test]
    fn negated_operators_derive_from_their_positive_counterpart() {
        assert_eq!(Operator::NotContains.base(), Operator::Contains);
        assert!(Operator::NotContains.is_negated());
        assert!(!Operator::Contains.is_negated());
    }

    #[test]
    fn unary_operators_are_classified_correctly() {
        assert_eq!(Operator::Negate.arity(), Arity::Unary);
        assert_eq!(Operator::Add.arity(), Arity::Binary);
    }

    #[test]
    fn increment_and_decrement_have_distinct_prefix_and_postfix_symbols() {
        assert_eq!(Operator::PreIncrement.symbol(), ".++");
        assert_eq!(Operator::PostIncrement.symbol(), "++.");
        assert_eq!(Operator::PreDecrement.symbol(), ".--");
        assert_eq!(Operator::PostDecrement.symbol(), "--.");
        assert!(Operator::PreIncrement.has_side_effect());
        assert!(Operator::PostIncrement.has_side_effect());
    }

    #[test]
    fn bit_complement_is_a_distinct_unary_operator_from_logical_not() {
        assert_eq!(Operator::BitComplement.symbol(), "~");
        assert_ne!(Operator::BitComplement.symbol(), Operator::Not.symbol());
        assert_eq!(Operator::BitComplement.arity(), Arity::Unary);
    }
}
