//! Const bitset of capability names.

use core::fmt;

use super::CapabilityName;

/// A set of [`CapabilityName`]s, usable in const context.
///
/// Registrations declare their members as a `CapabilitySet`, and the shape
/// classifier tests against sets, so every query is a couple of bit
/// operations resolved at compile time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CapabilitySet(u32);

impl CapabilitySet {
    pub const EMPTY: Self = Self(0);

    /// Build a set from a list of names.
    pub const fn of(names: &[CapabilityName]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < names.len() {
            bits |= names[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn with(self, name: CapabilityName) -> Self {
        Self(self.0 | name.bit())
    }

    pub const fn without(self, name: CapabilityName) -> Self {
        Self(self.0 & !name.bit())
    }

    #[inline(always)]
    pub const fn contains(self, name: CapabilityName) -> bool {
        (self.0 & name.bit()) != 0
    }

    /// True when every member of `other` is in `self`.
    #[inline(always)]
    pub const fn contains_all(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = CapabilityName> {
        CapabilityName::ALL
            .iter()
            .copied()
            .filter(move |name| self.contains(*name))
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<CapabilityName> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = CapabilityName>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl Extend<CapabilityName> for CapabilitySet {
    fn extend<I: IntoIterator<Item = CapabilityName>>(&mut self, iter: I) {
        for name in iter {
            *self = self.with(name);
        }
    }
}
