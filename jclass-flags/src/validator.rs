use crate::error::Result;
use crate::kind::ConstructKind;
use crate::rules::{LegalityRule, base_rules, context_rules};
use crate::set::ModifierSet;

/// What the caller knows about where a flag word came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// The field or method is declared in an interface.
    pub interface_member: bool,
    /// Major version of the enclosing class file, when known. Selects the
    /// method table (`abstract strictfp` is legal outside 46..=60) and the
    /// interface method rules. `None` keeps the 46..=60 method table.
    pub major_version: Option<u16>,
}

impl ValidationOptions {
    #[must_use]
    pub fn in_interface(mut self) -> Self {
        self.interface_member = true;
        self
    }

    #[must_use]
    pub fn with_major_version(mut self, major: u16) -> Self {
        self.major_version = Some(major);
        self
    }
}

/// Decodes, validates and re-encodes access flag words.
///
/// Holds no state beyond its options; the rule tables are static, so one
/// validator can be shared freely across threads.
///
/// ```
/// use jclass_flags::{AccessFlagValidator, ConstructKind, Modifier};
///
/// let v = AccessFlagValidator::new();
/// let set = v.check(0x0009, ConstructKind::Method).unwrap();
/// assert!(set.contains(Modifier::Static));
/// assert_eq!(v.encode(set), 0x0009);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessFlagValidator {
    options: ValidationOptions,
}

impl AccessFlagValidator {
    pub const fn new() -> Self {
        Self {
            options: ValidationOptions {
                interface_member: false,
                major_version: None,
            },
        }
    }

    pub const fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    pub fn decode(&self, raw: u16, kind: ConstructKind) -> ModifierSet {
        ModifierSet::decode(raw, kind)
    }

    /// Rules applied to `kind`, in evaluation order.
    pub fn rules(self, kind: ConstructKind) -> impl Iterator<Item = &'static LegalityRule> {
        let context: &'static [LegalityRule] = if self.options.interface_member {
            context_rules(kind, self.options.major_version)
        } else {
            &[]
        };
        base_rules(kind, self.options.major_version)
            .iter()
            .chain(context)
    }

    /// Check `flags` against the rules for `kind` and hand the set back
    /// unchanged. The set is judged on its encoded word, so its own kind tag
    /// is not consulted. The first failing rule is reported.
    pub fn validate(&self, flags: ModifierSet, kind: ConstructKind) -> Result<ModifierSet> {
        let bits = flags.encode();
        for rule in self.rules(kind) {
            if let Err(e) = rule.check(kind, bits) {
                log::debug!("{kind} flags {bits:#06x} rejected by `{rule}`");
                return Err(e);
            }
        }
        Ok(flags)
    }

    pub fn encode(&self, flags: ModifierSet) -> u16 {
        flags.encode()
    }

    /// Decode `raw` for `kind` and validate the result.
    pub fn check(&self, raw: u16, kind: ConstructKind) -> Result<ModifierSet> {
        self.validate(self.decode(raw, kind), kind)
    }
}
