//! Access flag constants from the JVM class file format (JVMS §4.1, §4.5,
//! §4.6, §4.7.6).
//!
//! Several names share a bit; which name applies depends on the
//! [`ConstructKind`](crate::ConstructKind) the word was read from.

use std::fmt;

/// Public access — class, field, method, inner class.
pub const ACC_PUBLIC: u16 = 0x0001;
/// Private access — field, method, inner class.
pub const ACC_PRIVATE: u16 = 0x0002;
/// Protected access — field, method, inner class.
pub const ACC_PROTECTED: u16 = 0x0004;
/// Static — field, method, inner class.
pub const ACC_STATIC: u16 = 0x0008;
/// Final — class, field, method, inner class.
pub const ACC_FINAL: u16 = 0x0010;
/// Super — class.
pub const ACC_SUPER: u16 = 0x0020;
/// Synchronized — method (same bit as ACC_SUPER).
pub const ACC_SYNCHRONIZED: u16 = 0x0020;
/// Volatile field (same bit as ACC_BRIDGE).
pub const ACC_VOLATILE: u16 = 0x0040;
/// Bridge method (same bit as ACC_VOLATILE).
pub const ACC_BRIDGE: u16 = 0x0040;
/// Transient field (same bit as ACC_VARARGS).
pub const ACC_TRANSIENT: u16 = 0x0080;
/// Varargs method (same bit as ACC_TRANSIENT).
pub const ACC_VARARGS: u16 = 0x0080;
/// Native method.
pub const ACC_NATIVE: u16 = 0x0100;
/// Interface — class, inner class.
pub const ACC_INTERFACE: u16 = 0x0200;
/// Abstract — class, method, inner class.
pub const ACC_ABSTRACT: u16 = 0x0400;
/// Strict floating-point — method.
pub const ACC_STRICT: u16 = 0x0800;
/// Synthetic — class, field, method, inner class.
pub const ACC_SYNTHETIC: u16 = 0x1000;
/// Annotation type — class, inner class.
pub const ACC_ANNOTATION: u16 = 0x2000;
/// Enum — class, field, inner class.
pub const ACC_ENUM: u16 = 0x4000;

/// Every bit that names a modifier on at least one construct kind.
///
/// 0x8000 (`ACC_MODULE` / `ACC_MANDATED` elsewhere in the format) is not
/// modelled here and always decodes as an unknown bit.
pub const ACC_ASSIGNED_MASK: u16 = 0x7FFF;

bitflags::bitflags! {
    /// Raw access flag word with named bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AccessFlags: u16 {
        const PUBLIC = ACC_PUBLIC;
        const PRIVATE = ACC_PRIVATE;
        const PROTECTED = ACC_PROTECTED;
        const STATIC = ACC_STATIC;
        const FINAL = ACC_FINAL;
        const SUPER = ACC_SUPER;
        const SYNCHRONIZED = ACC_SYNCHRONIZED;
        const VOLATILE = ACC_VOLATILE;
        const BRIDGE = ACC_BRIDGE;
        const TRANSIENT = ACC_TRANSIENT;
        const VARARGS = ACC_VARARGS;
        const NATIVE = ACC_NATIVE;
        const INTERFACE = ACC_INTERFACE;
        const ABSTRACT = ACC_ABSTRACT;
        const STRICT = ACC_STRICT;
        const SYNTHETIC = ACC_SYNTHETIC;
        const ANNOTATION = ACC_ANNOTATION;
        const ENUM = ACC_ENUM;
    }
}

/// A named access modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Final,
    Super,
    Synchronized,
    Volatile,
    Bridge,
    Transient,
    Varargs,
    Native,
    Interface,
    Abstract,
    Strict,
    Synthetic,
    Annotation,
    Enum,
}

impl Modifier {
    /// All modifiers, in bit order.
    pub const ALL: [Modifier; 18] = [
        Self::Public,
        Self::Private,
        Self::Protected,
        Self::Static,
        Self::Final,
        Self::Super,
        Self::Synchronized,
        Self::Volatile,
        Self::Bridge,
        Self::Transient,
        Self::Varargs,
        Self::Native,
        Self::Interface,
        Self::Abstract,
        Self::Strict,
        Self::Synthetic,
        Self::Annotation,
        Self::Enum,
    ];

    /// The bit this modifier occupies.
    pub const fn mask(self) -> u16 {
        match self {
            Self::Public => ACC_PUBLIC,
            Self::Private => ACC_PRIVATE,
            Self::Protected => ACC_PROTECTED,
            Self::Static => ACC_STATIC,
            Self::Final => ACC_FINAL,
            Self::Super => ACC_SUPER,
            Self::Synchronized => ACC_SYNCHRONIZED,
            Self::Volatile => ACC_VOLATILE,
            Self::Bridge => ACC_BRIDGE,
            Self::Transient => ACC_TRANSIENT,
            Self::Varargs => ACC_VARARGS,
            Self::Native => ACC_NATIVE,
            Self::Interface => ACC_INTERFACE,
            Self::Abstract => ACC_ABSTRACT,
            Self::Strict => ACC_STRICT,
            Self::Synthetic => ACC_SYNTHETIC,
            Self::Annotation => ACC_ANNOTATION,
            Self::Enum => ACC_ENUM,
        }
    }

    /// Upper-case flag name without the `ACC_` prefix, e.g. `"PUBLIC"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Protected => "PROTECTED",
            Self::Static => "STATIC",
            Self::Final => "FINAL",
            Self::Super => "SUPER",
            Self::Synchronized => "SYNCHRONIZED",
            Self::Volatile => "VOLATILE",
            Self::Bridge => "BRIDGE",
            Self::Transient => "TRANSIENT",
            Self::Varargs => "VARARGS",
            Self::Native => "NATIVE",
            Self::Interface => "INTERFACE",
            Self::Abstract => "ABSTRACT",
            Self::Strict => "STRICT",
            Self::Synthetic => "SYNTHETIC",
            Self::Annotation => "ANNOTATION",
            Self::Enum => "ENUM",
        }
    }

    /// Lower-case keyword as it would be printed next to a declaration.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Static => "static",
            Self::Final => "final",
            Self::Super => "super",
            Self::Synchronized => "synchronized",
            Self::Volatile => "volatile",
            Self::Bridge => "bridge",
            Self::Transient => "transient",
            Self::Varargs => "varargs",
            Self::Native => "native",
            Self::Interface => "interface",
            Self::Abstract => "abstract",
            Self::Strict => "strictfp",
            Self::Synthetic => "synthetic",
            Self::Annotation => "annotation",
            Self::Enum => "enum",
        }
    }

    /// Look up a modifier by its flag name. Accepts `PUBLIC`, `public` and
    /// `ACC_PUBLIC`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("ACC_").unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name) || m.keyword() == name)
    }

    /// The modifiers of every kind whose bit intersects `bits`.
    pub fn overlapping(bits: u16) -> Vec<Modifier> {
        Self::ALL
            .into_iter()
            .filter(|m| bits & m.mask() != 0)
            .collect()
    }
}

impl From<Modifier> for AccessFlags {
    #[inline]
    fn from(m: Modifier) -> Self {
        AccessFlags::from_bits_retain(m.mask())
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A modifier name paired with its bit, as listed in a kind's flag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagMask {
    pub modifier: Modifier,
    pub mask: u16,
}

impl FlagMask {
    pub const fn new(modifier: Modifier) -> Self {
        Self {
            modifier,
            mask: modifier.mask(),
        }
    }
}

impl fmt::Display for FlagMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ACC_{:<13} {:#06x}", self.modifier.name(), self.mask)
    }
}
