use std::fmt;

use thiserror::Error;

use crate::kind::ConstructKind;
use crate::modifiers::Modifier;

/// A flag word that violates the structural rules of its construct kind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Two or more mutually exclusive modifiers are present.
    #[error("conflicting modifiers on {kind}: {}", FlagList(.flags))]
    ConflictingModifiers {
        kind: ConstructKind,
        flags: Vec<Modifier>,
    },

    /// Bits that this kind cannot carry. `flags` lists every modifier name
    /// those bits have elsewhere in the format.
    #[error("{} ({bits:#06x}) not allowed on {kind}", FlagList(.flags))]
    IllegalForConstruct {
        kind: ConstructKind,
        bits: u16,
        flags: Vec<Modifier>,
    },

    /// A required co-occurrence is missing or a forbidden one is present.
    /// The triggering modifier, if any, comes first.
    #[error("inconsistent modifiers on {kind}: {}", FlagList(.flags))]
    InconsistentImplication {
        kind: ConstructKind,
        flags: Vec<Modifier>,
    },
}

impl StructuralError {
    pub fn kind(&self) -> ConstructKind {
        match self {
            Self::ConflictingModifiers { kind, .. }
            | Self::IllegalForConstruct { kind, .. }
            | Self::InconsistentImplication { kind, .. } => *kind,
        }
    }

    /// The modifiers named by this error.
    pub fn flags(&self) -> &[Modifier] {
        match self {
            Self::ConflictingModifiers { flags, .. }
            | Self::IllegalForConstruct { flags, .. }
            | Self::InconsistentImplication { flags, .. } => flags,
        }
    }
}

pub type Result<T> = std::result::Result<T, StructuralError>;

/// `|`-separated modifier names.
pub(crate) struct FlagList<'a>(pub &'a [Modifier]);

impl fmt::Display for FlagList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(m.name())?;
        }
        Ok(())
    }
}
