//! Decoded modifier sets.

use std::fmt;

use crate::kind::ConstructKind;
use crate::modifiers::{AccessFlags, Modifier};

/// The modifiers present in one access flag word, read for one kind.
///
/// Bits the kind does not recognise are kept in [`unknown_bits`], so
/// [`encode`] always reproduces the word the set was decoded from.
///
/// [`unknown_bits`]: ModifierSet::unknown_bits
/// [`encode`]: ModifierSet::encode
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    kind: ConstructKind,
    flags: AccessFlags,
    unknown: u16,
}

impl ModifierSet {
    /// Split `raw` into the flags named for `kind` and everything else.
    /// Total over all inputs.
    pub fn decode(raw: u16, kind: ConstructKind) -> Self {
        let known = raw & kind.known_bits();
        let unknown = raw & !known;
        if unknown != 0 {
            log::trace!("{kind} flags {raw:#06x}: keeping unrecognised bits {unknown:#06x}");
        }
        Self {
            kind,
            flags: AccessFlags::from_bits_retain(known),
            unknown,
        }
    }

    pub fn empty(kind: ConstructKind) -> Self {
        Self::decode(0, kind)
    }

    /// Build a set from modifier names. Each modifier is placed by its bit,
    /// so a name from another kind takes whatever meaning `kind` gives that
    /// bit (or lands in the unknown bits).
    pub fn from_modifiers<I>(kind: ConstructKind, modifiers: I) -> Self
    where
        I: IntoIterator<Item = Modifier>,
    {
        let flags = modifiers
            .into_iter()
            .fold(AccessFlags::empty(), |acc, m| acc | AccessFlags::from(m));
        Self::decode(flags.bits(), kind)
    }

    /// This set with `modifier`'s bit added.
    #[must_use]
    pub fn with(self, modifier: Modifier) -> Self {
        Self::decode(self.encode() | modifier.mask(), self.kind)
    }

    /// The original 16-bit word: known flags plus preserved unknown bits.
    #[inline]
    pub fn encode(&self) -> u16 {
        self.flags.bits() | self.unknown
    }

    #[inline]
    pub fn kind(&self) -> ConstructKind {
        self.kind
    }

    /// Known flags only.
    #[inline]
    pub fn flags(&self) -> AccessFlags {
        self.flags
    }

    #[inline]
    pub fn unknown_bits(&self) -> u16 {
        self.unknown
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.kind.allows(modifier) && self.flags.bits() & modifier.mask() != 0
    }

    /// Present modifiers in table order.
    pub fn modifiers(self) -> impl Iterator<Item = Modifier> {
        let bits = self.flags.bits();
        self.kind
            .flag_masks()
            .iter()
            .filter(move |f| bits & f.mask != 0)
            .map(|f| f.modifier)
    }

    pub fn len(&self) -> usize {
        self.flags.bits().count_ones() as usize
    }

    /// No known flags and no unknown bits.
    pub fn is_empty(&self) -> bool {
        self.encode() == 0
    }
}

impl From<ModifierSet> for u16 {
    #[inline]
    fn from(set: ModifierSet) -> Self {
        set.encode()
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for m in self.modifiers() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(m.keyword())?;
            first = false;
        }
        if self.unknown != 0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{:#06x}", self.unknown)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierSet")
            .field("kind", &self.kind)
            .field("modifiers", &self.modifiers().collect::<Vec<_>>())
            .field("unknown", &format_args!("{:#06x}", self.unknown))
            .finish()
    }
}
