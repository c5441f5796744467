//! Construct kinds and their applicable flag tables.

use std::fmt;

use crate::modifiers::{FlagMask, Modifier};

/// The structural element an access flag word was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ConstructKind {
    /// `ClassFile.access_flags`.
    Class,
    /// `field_info.access_flags`.
    Field,
    /// `method_info.access_flags`.
    Method,
    /// `InnerClasses.classes[i].inner_class_access_flags`.
    InnerClass,
}

const CLASS_FLAGS: &[FlagMask] = &[
    FlagMask::new(Modifier::Public),
    FlagMask::new(Modifier::Final),
    FlagMask::new(Modifier::Super),
    FlagMask::new(Modifier::Interface),
    FlagMask::new(Modifier::Abstract),
    FlagMask::new(Modifier::Synthetic),
    FlagMask::new(Modifier::Annotation),
    FlagMask::new(Modifier::Enum),
];

const FIELD_FLAGS: &[FlagMask] = &[
    FlagMask::new(Modifier::Public),
    FlagMask::new(Modifier::Private),
    FlagMask::new(Modifier::Protected),
    FlagMask::new(Modifier::Static),
    FlagMask::new(Modifier::Final),
    FlagMask::new(Modifier::Volatile),
    FlagMask::new(Modifier::Transient),
    FlagMask::new(Modifier::Synthetic),
    FlagMask::new(Modifier::Enum),
];

const METHOD_FLAGS: &[FlagMask] = &[
    FlagMask::new(Modifier::Public),
    FlagMask::new(Modifier::Private),
    FlagMask::new(Modifier::Protected),
    FlagMask::new(Modifier::Static),
    FlagMask::new(Modifier::Final),
    FlagMask::new(Modifier::Synchronized),
    FlagMask::new(Modifier::Bridge),
    FlagMask::new(Modifier::Varargs),
    FlagMask::new(Modifier::Native),
    FlagMask::new(Modifier::Abstract),
    FlagMask::new(Modifier::Strict),
    FlagMask::new(Modifier::Synthetic),
];

const INNER_CLASS_FLAGS: &[FlagMask] = &[
    FlagMask::new(Modifier::Public),
    FlagMask::new(Modifier::Private),
    FlagMask::new(Modifier::Protected),
    FlagMask::new(Modifier::Static),
    FlagMask::new(Modifier::Final),
    FlagMask::new(Modifier::Interface),
    FlagMask::new(Modifier::Abstract),
    FlagMask::new(Modifier::Synthetic),
    FlagMask::new(Modifier::Annotation),
    FlagMask::new(Modifier::Enum),
];

const fn union(table: &[FlagMask]) -> u16 {
    let mut bits = 0;
    let mut i = 0;
    while i < table.len() {
        bits |= table[i].mask;
        i += 1;
    }
    bits
}

impl ConstructKind {
    pub const ALL: [ConstructKind; 4] = [
        Self::Class,
        Self::Field,
        Self::Method,
        Self::InnerClass,
    ];

    /// Flags that carry a name on this kind, in bit order.
    pub const fn flag_masks(self) -> &'static [FlagMask] {
        match self {
            Self::Class => CLASS_FLAGS,
            Self::Field => FIELD_FLAGS,
            Self::Method => METHOD_FLAGS,
            Self::InnerClass => INNER_CLASS_FLAGS,
        }
    }

    /// Union of the bits in [`flag_masks`](Self::flag_masks).
    pub const fn known_bits(self) -> u16 {
        union(self.flag_masks())
    }

    /// Whether `modifier` is defined for this kind.
    pub fn allows(self, modifier: Modifier) -> bool {
        self.flag_masks().iter().any(|f| f.modifier == modifier)
    }

    /// The name this kind gives to a single bit, if any.
    pub fn modifier_for_bit(self, bit: u16) -> Option<Modifier> {
        self.flag_masks()
            .iter()
            .find(|f| f.mask == bit)
            .map(|f| f.modifier)
    }

    /// Lower-case name used in diagnostics, e.g. `"inner class"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Field => "field",
            Self::Method => "method",
            Self::InnerClass => "inner class",
        }
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
