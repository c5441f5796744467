//! Legality rules per construct kind (JVMS §4.1, §4.5, §4.6, §4.7.6).
//!
//! Each kind has an ordered base table, chosen by class file version where
//! the format changed. Interface members get extra context rules appended
//! after it; see [`context_rules`].

use std::fmt;

use crate::error::{FlagList, StructuralError};
use crate::kind::ConstructKind;
use crate::modifiers::{ACC_ASSIGNED_MASK, Modifier};

use Modifier::*;

/// First major version (Java 1.2) where `abstract` excludes `strictfp`.
pub const JAVA_1_2_MAJOR: u16 = 46;

/// Class files below this major version (Java 8) require interface methods
/// to be `public abstract`.
pub const JAVA_8_MAJOR: u16 = 52;

/// From this major version (Java 17) on, `abstract strictfp` is legal again.
pub const JAVA_17_MAJOR: u16 = 61;

/// A predicate over an access flag word. Rules test bits, so a modifier
/// stands for its mask on the kind being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalityRule {
    /// No bit that names a modifier only on other kinds.
    ForeignBits,
    /// At most one member of the group.
    Exclusive(&'static [Modifier]),
    /// `when` needs every flag in `all`.
    Requires {
        when: Modifier,
        all: &'static [Modifier],
    },
    /// `when` rules out every flag in `any`.
    Forbids {
        when: Modifier,
        any: &'static [Modifier],
    },
    /// Every flag in the list must be set.
    Mandatory(&'static [Modifier]),
    /// None of the flags in the list may be set.
    Prohibited(&'static [Modifier]),
    /// At least one member of the group must be set.
    AtLeastOne(&'static [Modifier]),
}

const ACCESS: &[Modifier] = &[Public, Private, Protected];

const CLASS_RULES: &[LegalityRule] = &[
    LegalityRule::ForeignBits,
    LegalityRule::Requires {
        when: Interface,
        all: &[Abstract],
    },
    LegalityRule::Forbids {
        when: Interface,
        any: &[Final, Super, Enum],
    },
    LegalityRule::Requires {
        when: Annotation,
        all: &[Interface],
    },
    LegalityRule::Forbids {
        when: Abstract,
        any: &[Final],
    },
];

const FIELD_RULES: &[LegalityRule] = &[
    LegalityRule::ForeignBits,
    LegalityRule::Exclusive(ACCESS),
    LegalityRule::Exclusive(&[Final, Volatile]),
];

const METHOD_RULES: &[LegalityRule] = &[
    LegalityRule::ForeignBits,
    LegalityRule::Exclusive(ACCESS),
    LegalityRule::Forbids {
        when: Abstract,
        any: &[Private, Static, Final, Synchronized, Native, Strict],
    },
];

/// Methods outside the FP-strict era, where `abstract strictfp` is allowed.
const NON_STRICT_METHOD_RULES: &[LegalityRule] = &[
    LegalityRule::ForeignBits,
    LegalityRule::Exclusive(ACCESS),
    LegalityRule::Forbids {
        when: Abstract,
        any: &[Private, Static, Final, Synchronized, Native],
    },
];

const INNER_CLASS_RULES: &[LegalityRule] = &[
    LegalityRule::ForeignBits,
    LegalityRule::Exclusive(ACCESS),
    LegalityRule::Requires {
        when: Interface,
        all: &[Abstract],
    },
    LegalityRule::Forbids {
        when: Interface,
        any: &[Final, Enum],
    },
    LegalityRule::Requires {
        when: Annotation,
        all: &[Interface],
    },
    LegalityRule::Forbids {
        when: Abstract,
        any: &[Final],
    },
];

const INTERFACE_FIELD_RULES: &[LegalityRule] = &[
    LegalityRule::Mandatory(&[Public, Static, Final]),
    LegalityRule::Prohibited(&[Private, Protected, Volatile, Transient, Enum]),
];

const LEGACY_INTERFACE_METHOD_RULES: &[LegalityRule] = &[
    LegalityRule::Mandatory(&[Public, Abstract]),
    LegalityRule::Prohibited(&[Private, Protected, Static, Final, Synchronized, Native]),
];

const INTERFACE_METHOD_RULES: &[LegalityRule] = &[
    LegalityRule::AtLeastOne(&[Public, Private]),
    LegalityRule::Prohibited(&[Protected, Final, Synchronized, Native]),
];

/// Whether `abstract` excludes `strictfp` in a class file of this major
/// version. Unknown versions keep the exclusion.
pub const fn abstract_excludes_strict(major_version: Option<u16>) -> bool {
    match major_version {
        Some(v) => v >= JAVA_1_2_MAJOR && v < JAVA_17_MAJOR,
        None => true,
    }
}

/// The ordered base table for `kind` in a class file of `major_version`.
pub const fn base_rules(
    kind: ConstructKind,
    major_version: Option<u16>,
) -> &'static [LegalityRule] {
    match kind {
        ConstructKind::Class => CLASS_RULES,
        ConstructKind::Field => FIELD_RULES,
        ConstructKind::Method if abstract_excludes_strict(major_version) => METHOD_RULES,
        ConstructKind::Method => NON_STRICT_METHOD_RULES,
        ConstructKind::InnerClass => INNER_CLASS_RULES,
    }
}

/// Rules for a field or method declared in an interface. `major_version`
/// of `None` means a modern (>= 52) class file.
pub const fn context_rules(
    kind: ConstructKind,
    major_version: Option<u16>,
) -> &'static [LegalityRule] {
    match (kind, major_version) {
        (ConstructKind::Field, _) => INTERFACE_FIELD_RULES,
        (ConstructKind::Method, Some(v)) if v < JAVA_8_MAJOR => LEGACY_INTERFACE_METHOD_RULES,
        (ConstructKind::Method, _) => INTERFACE_METHOD_RULES,
        (ConstructKind::Class | ConstructKind::InnerClass, _) => &[],
    }
}

impl LegalityRule {
    /// Test `bits` as read for `kind`.
    pub fn check(&self, kind: ConstructKind, bits: u16) -> Result<(), StructuralError> {
        let has = |m: Modifier| bits & m.mask() != 0;
        let present = |group: &[Modifier]| -> Vec<Modifier> {
            group.iter().copied().filter(|&m| has(m)).collect()
        };
        let missing = |group: &[Modifier]| -> Vec<Modifier> {
            group.iter().copied().filter(|&m| !has(m)).collect()
        };

        match *self {
            Self::ForeignBits => {
                let foreign = bits & ACC_ASSIGNED_MASK & !kind.known_bits();
                if foreign != 0 {
                    return Err(StructuralError::IllegalForConstruct {
                        kind,
                        bits: foreign,
                        flags: Modifier::overlapping(foreign),
                    });
                }
            }
            Self::Exclusive(group) => {
                let flags = present(group);
                if flags.len() > 1 {
                    return Err(StructuralError::ConflictingModifiers { kind, flags });
                }
            }
            Self::Requires { when, all } => {
                let absent = missing(all);
                if has(when) && !absent.is_empty() {
                    let mut flags = vec![when];
                    flags.extend(absent);
                    return Err(StructuralError::InconsistentImplication { kind, flags });
                }
            }
            Self::Forbids { when, any } => {
                let clashing = present(any);
                if has(when) && !clashing.is_empty() {
                    let mut flags = vec![when];
                    flags.extend(clashing);
                    return Err(StructuralError::InconsistentImplication { kind, flags });
                }
            }
            Self::Mandatory(all) => {
                let flags = missing(all);
                if !flags.is_empty() {
                    return Err(StructuralError::InconsistentImplication { kind, flags });
                }
            }
            Self::Prohibited(any) => {
                let flags = present(any);
                if !flags.is_empty() {
                    let bits = flags.iter().fold(0u16, |acc, m| acc | m.mask());
                    return Err(StructuralError::IllegalForConstruct { kind, bits, flags });
                }
            }
            Self::AtLeastOne(group) => {
                if present(group).is_empty() {
                    return Err(StructuralError::InconsistentImplication {
                        kind,
                        flags: group.to_vec(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for LegalityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignBits => f.write_str("no flags of other construct kinds"),
            Self::Exclusive(group) => write!(f, "at most one of {}", FlagList(group)),
            Self::Requires { when, all } => write!(f, "{when} requires {}", FlagList(all)),
            Self::Forbids { when, any } => write!(f, "{when} forbids {}", FlagList(any)),
            Self::Mandatory(all) => write!(f, "requires {}", FlagList(all)),
            Self::Prohibited(any) => write!(f, "forbids {}", FlagList(any)),
            Self::AtLeastOne(group) => write!(f, "at least one of {}", FlagList(group)),
        }
    }
}
