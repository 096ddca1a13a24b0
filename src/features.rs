//! Per-parse syntactic gates (§6.2), referenced only by the error taxonomy:
//! this crate doesn't parse anything, but the `Feature` error variant (§4.7)
//! needs a closed name-space of feature identifiers to report against.
//!
//! Packed the same way as [`crate::options::OptionFlags`].

macro_rules! feature_flags {
    ($( $(#[$doc:meta])* $name:ident = $bit:expr ),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct Features(u32);

        impl Features {
            $(
                $(#[$doc])*
                pub const $name: Self = Self($bit);
            )+

            #[must_use]
            pub const fn all() -> Self {
                Self(u32::MAX)
            }

            #[must_use]
            pub const fn empty() -> Self {
                Self(0)
            }

            #[must_use]
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn set(&mut self, flag: Self, value: bool) {
                if value {
                    self.0 |= flag.0;
                } else {
                    self.0 &= !flag.0;
                }
            }

            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )+
                    _ => "unknown",
                }
            }
        }
    };
}

feature_flags! {
    REGISTER = 1 << 0,
    RESERVED_NAMES = 1 << 1,
    LOCAL_VAR = 1 << 2,
    SIDE_EFFECT = 1 << 3,
    GLOBAL_SIDE_EFFECT = 1 << 4,
    ARRAY_REF_EXPR = 1 << 5,
    NEW_INSTANCE = 1 << 6,
    LOOPS = 1 << 7,
    LAMBDA = 1 << 8,
    METHOD_CALL = 1 << 9,
    STRUCTURED_LITERAL = 1 << 10,
    PRAGMA = 1 << 11,
    NAMESPACE_PRAGMA = 1 << 12,
    IMPORT_PRAGMA = 1 << 13,
    ANNOTATION = 1 << 14,
    SCRIPT = 1 << 15,
    LEXICAL = 1 << 16,
    LEXICAL_SHADE = 1 << 17,
    THIN_ARROW = 1 << 18,
    FAT_ARROW = 1 << 19,
    EXTENDED_RELATIONAL = 1 << 20,
}

impl Features {
    /// All features enabled by default; a host that wants a restricted
    /// dialect (e.g. no `NEW_INSTANCE`) starts from `all()` and clears bits.
    #[must_use]
    pub fn defaults() -> Self {
        Self::all()
    }
}
