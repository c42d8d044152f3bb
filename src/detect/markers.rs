//! Capability names and their marker types.
//!
//! Every structural feature the engine can probe for has two faces:
//!
//! - a [`CapabilityName`] variant, used at run time and in const sets;
//! - a zero-sized marker in [`cap`], used as a type parameter
//!   (`Member<cap::ValueType>`).
//!
//! Both are generated from one table so they cannot drift apart.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use crate::error::IntrospectError;

/// Which detector family answers for a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Only a nested type alias satisfies the probe.
    Typedef,
    /// A nested type alias or a nested named value satisfies the probe.
    Member,
}

/// A type-level capability marker.
pub trait Capability: 'static {
    const NAME: CapabilityName;
}

/// Generate `CapabilityName`, its lookup tables and the `cap` markers.
macro_rules! define_capabilities {
    ($($name:ident: $family:ident),* $(,)?) => {
        ::paste::paste! {
            /// Structural features a type can expose.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub enum CapabilityName {
                $([<$name:camel>],)*
            }

            impl CapabilityName {
                /// Every capability, in declaration order.
                pub const ALL: &'static [CapabilityName] = &[
                    $(CapabilityName::[<$name:camel>],)*
                ];

                /// The snake_case spelling (`value_type`, `arity_value`, ...).
                pub const fn as_str(self) -> &'static str {
                    match self {
                        $(CapabilityName::[<$name:camel>] => stringify!($name),)*
                    }
                }

                pub const fn family(self) -> Family {
                    match self {
                        $(CapabilityName::[<$name:camel>] => Family::$family,)*
                    }
                }
            }

            /// Marker types, one per [`CapabilityName`].
            pub mod cap {
                $(
                    #[doc = concat!("Marker for the `", stringify!($name), "` capability.")]
                    #[derive(Debug, Clone, Copy, Default)]
                    pub struct [<$name:camel>];

                    impl super::Capability for [<$name:camel>] {
                        const NAME: super::CapabilityName = super::CapabilityName::[<$name:camel>];
                    }
                )*
            }
        }
    };
}

define_capabilities! {
    value_type: Member,
    key_type: Member,
    mapped_type: Member,
    container_type: Member,
    pointer: Member,
    const_pointer: Member,
    reference: Member,
    const_reference: Member,
    iterator: Member,
    const_iterator: Member,
    reverse_iterator: Member,
    const_reverse_iterator: Member,
    size_type: Member,
    difference_type: Member,
    function_type: Typedef,
    arity_value: Member,
    rebind: Typedef,
}

impl CapabilityName {
    /// Bit used by [`CapabilitySet`](super::CapabilitySet).
    #[inline(always)]
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Look a capability up by its snake_case spelling.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|cap| cap.as_str() == name)
    }
}

impl fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapabilityName {
    type Err = IntrospectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| IntrospectError::UnknownCapability(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spelling_round_trips() {
        for name in CapabilityName::ALL {
            assert_eq!(name.as_str().parse::<CapabilityName>(), Ok(*name));
        }
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let err = "valu_type".parse::<CapabilityName>().unwrap_err();
        assert_eq!(err, IntrospectError::UnknownCapability("valu_type".into()));
    }

    #[test]
    fn test_families() {
        assert_eq!(CapabilityName::FunctionType.family(), Family::Typedef);
        assert_eq!(CapabilityName::Rebind.family(), Family::Typedef);
        assert_eq!(CapabilityName::ValueType.family(), Family::Member);
        assert_eq!(CapabilityName::ArityValue.family(), Family::Member);
    }

    #[test]
    fn test_markers_carry_names() {
        assert_eq!(<cap::KeyType as Capability>::NAME, CapabilityName::KeyType);
        assert_eq!(<cap::Iterator as Capability>::NAME.as_str(), "iterator");
    }

    #[test]
    fn test_bits_are_distinct() {
        let mut seen = 0u32;
        for name in CapabilityName::ALL {
            assert_eq!(seen & name.bit(), 0);
            seen |= name.bit();
        }
        assert_eq!(seen.count_ones() as usize, CapabilityName::ALL.len());
    }
}
