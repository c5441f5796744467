//! JVM class file access flags: decoding, structural validation and
//! re-encoding.
//!
//! A class file parser reads the `u2` access flag word of a class, field,
//! method or `InnerClasses` entry and hands it here together with a
//! [`ConstructKind`]. [`decode`] names the flags (keeping any bits it does
//! not recognise), [`validate`] rejects combinations the format forbids, and
//! [`encode`] gives the original word back.
//!
//! ```
//! use jclass_flags::{ConstructKind, StructuralError, decode, encode, validate};
//!
//! let set = decode(0x0021, ConstructKind::Class);
//! assert_eq!(set.to_string(), "public super");
//! assert_eq!(encode(validate(set, ConstructKind::Class).unwrap()), 0x0021);
//!
//! let field = decode(0x0003, ConstructKind::Field);
//! assert!(matches!(
//!     validate(field, ConstructKind::Field),
//!     Err(StructuralError::ConflictingModifiers { .. })
//! ));
//! ```

pub mod error;
pub mod kind;
pub mod modifiers;
pub mod rules;
pub mod set;
pub mod validator;

pub use error::{Result, StructuralError};
pub use kind::ConstructKind;
pub use modifiers::{AccessFlags, FlagMask, Modifier};
pub use rules::LegalityRule;
pub use set::ModifierSet;
pub use validator::{AccessFlagValidator, ValidationOptions};

/// Decode `raw` as read from a `kind` header. Never fails.
pub fn decode(raw: u16, kind: ConstructKind) -> ModifierSet {
    ModifierSet::decode(raw, kind)
}

/// Validate `flags` against the base rules for `kind`.
pub fn validate(flags: ModifierSet, kind: ConstructKind) -> Result<ModifierSet> {
    AccessFlagValidator::new().validate(flags, kind)
}

/// The 16-bit word `flags` was decoded from.
pub fn encode(flags: ModifierSet) -> u16 {
    flags.encode()
}
