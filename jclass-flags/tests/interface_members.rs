mod common;

use common::reject_with;
use jclass_flags::modifiers::*;
use jclass_flags::rules::JAVA_8_MAJOR;
use jclass_flags::*;

use ConstructKind::{Class, Field, InnerClass, Method};
use Modifier::*;

fn interface() -> ValidationOptions {
    ValidationOptions::default().in_interface()
}

fn legacy_interface() -> ValidationOptions {
    interface().with_major_version(JAVA_8_MAJOR - 1)
}

#[test]
fn constant_field() {
    let v = AccessFlagValidator::with_options(interface());
    assert!(v.check(0x0019, Field).is_ok());
    assert!(v.check(0x1019, Field).is_ok());
}

#[test]
fn interface_field_must_be_public_static_final() {
    let err = reject_with(interface(), ACC_PUBLIC | ACC_STATIC, Field);
    assert_eq!(
        err,
        StructuralError::InconsistentImplication {
            kind: Field,
            flags: vec![Final],
        }
    );
}

#[test]
fn interface_field_transient() {
    let err = reject_with(interface(), 0x0019 | ACC_TRANSIENT, Field);
    assert_eq!(
        err,
        StructuralError::IllegalForConstruct {
            kind: Field,
            bits: ACC_TRANSIENT,
            flags: vec![Transient],
        }
    );
}

#[test]
fn base_rules_come_first() {
    // final+volatile is also missing STATIC; the exclusivity rule is reported
    let err = reject_with(interface(), ACC_PUBLIC | ACC_FINAL | ACC_VOLATILE, Field);
    assert!(matches!(err, StructuralError::ConflictingModifiers { .. }));
}

#[test]
fn modern_interface_methods() {
    let v = AccessFlagValidator::with_options(interface());
    // abstract, default, static, private
    assert!(v.check(0x0401, Method).is_ok());
    assert!(v.check(0x0001, Method).is_ok());
    assert!(v.check(0x0009, Method).is_ok());
    assert!(v.check(0x0002, Method).is_ok());

    let explicit = AccessFlagValidator::with_options(interface().with_major_version(61));
    assert!(explicit.check(0x0002, Method).is_ok());
}

#[test]
fn modern_interface_method_needs_public_or_private() {
    let err = reject_with(interface(), ACC_ABSTRACT, Method);
    assert_eq!(
        err,
        StructuralError::InconsistentImplication {
            kind: Method,
            flags: vec![Public, Private],
        }
    );
}

#[test]
fn modern_interface_method_prohibited() {
    let err = reject_with(interface(), ACC_PUBLIC | ACC_SYNCHRONIZED, Method);
    assert_eq!(
        err,
        StructuralError::IllegalForConstruct {
            kind: Method,
            bits: ACC_SYNCHRONIZED,
            flags: vec![Synchronized],
        }
    );
}

#[test]
fn legacy_interface_methods_are_public_abstract() {
    let v = AccessFlagValidator::with_options(legacy_interface());
    assert!(v.check(0x0401, Method).is_ok());

    let err = reject_with(legacy_interface(), ACC_PUBLIC | ACC_STATIC, Method);
    assert_eq!(
        err,
        StructuralError::InconsistentImplication {
            kind: Method,
            flags: vec![Abstract],
        }
    );
}

#[test]
fn legacy_interface_method_private() {
    // public and private together trip the base exclusivity rule first
    let err = reject_with(legacy_interface(), ACC_PUBLIC | ACC_PRIVATE | ACC_ABSTRACT, Method);
    assert!(matches!(err, StructuralError::ConflictingModifiers { .. }));
}

#[test]
fn context_does_not_touch_classes() {
    let v = AccessFlagValidator::with_options(interface());
    assert!(v.check(0x0601, Class).is_ok());
    assert!(v.check(0x0609, InnerClass).is_ok());
    assert_eq!(v.rules(Class).count(), AccessFlagValidator::new().rules(Class).count());
}

#[test]
fn rules_are_base_then_context() {
    let v = AccessFlagValidator::with_options(interface());
    let rules: Vec<_> = v.rules(Field).collect();
    assert_eq!(rules.len(), 5);
    assert_eq!(*rules[0], LegalityRule::ForeignBits);
    assert!(matches!(rules[3], LegalityRule::Mandatory(_)));
    assert!(matches!(rules[4], LegalityRule::Prohibited(_)));
}
