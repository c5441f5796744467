#![allow(dead_code)]

use jclass_flags::*;

pub fn assert_valid(raw: u16, kind: ConstructKind) -> ModifierSet {
    let set = decode(raw, kind);
    match validate(set, kind) {
        Ok(out) => {
            assert_eq!(out, set, "validation must not change the set");
            out
        }
        Err(e) => panic!("{kind} flags {raw:#06x} rejected: {e}"),
    }
}

pub fn reject(raw: u16, kind: ConstructKind) -> StructuralError {
    validate(decode(raw, kind), kind)
        .expect_err(&format!("{kind} flags {raw:#06x} should be rejected"))
}

pub fn reject_with(options: ValidationOptions, raw: u16, kind: ConstructKind) -> StructuralError {
    AccessFlagValidator::with_options(options)
        .check(raw, kind)
        .expect_err(&format!("{kind} flags {raw:#06x} should be rejected"))
}
