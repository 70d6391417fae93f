//! Statement sequences that should fail, and the errors they produce

use super::*;
use crate::{
    compile::{RedefinitionScope, ResolveError},
    types::{DeviceClause, NameKind, PosKey, PosRule, ValueRecord},
};

fn error_of(statements: Vec<Statement>) -> CompilerError {
    match compile(statements) {
        Ok(out) => panic!("expected failure, compiled to {out:?}"),
        Err(err) => err,
    }
}

#[test]
fn conflicting_redefinition() {
    let err = error_of(feature(KERN, vec![pos("four", 400), pos("four", 401)]));
    assert_eq!(err.index, 2);
    assert_eq!(
        err.error,
        ResolveError::ConflictingRedefinition {
            key: PosKey::Single(glyph("four")),
            previous: Box::new(PosRule::Single(ValueRecord::x_advance(400))),
            new: Box::new(PosRule::Single(ValueRecord::x_advance(401))),
        }
    );
    assert!(err.to_string().contains("'400'"));
    assert!(err.to_string().contains("'401'"));
}

#[test]
fn padded_redefinition_on_wrong_axis() {
    // in vkrn the bare value is a y advance, so an x advance is different
    let rules = vec![pos("four", 400), pos4("four", [0, 0, 400, 0])];
    let err = error_of(feature(VKRN, rules));
    assert!(matches!(
        err.error,
        ResolveError::ConflictingRedefinition { .. }
    ));
}

#[test]
fn conflicting_pair_redefinition() {
    let kern = |value| {
        Statement::pair_pos(
            glyph("A"),
            glyph("V"),
            SourceValueRecord::Single(Literal::Number(value)),
        )
    };
    let err = error_of(feature(KERN, vec![kern(-50), kern(-50), kern(-60)]));
    assert_eq!(err.index, 3);
    assert!(matches!(
        err.error,
        ResolveError::ConflictingRedefinition {
            key: PosKey::Pair(..),
            ..
        }
    ));
}

#[test]
fn feature_scope_catches_conflict_across_lookups() {
    let mut body = lookup("one", vec![pos("A", 10)]);
    body.extend(lookup("two", vec![pos("A", 20)]));
    let statements = feature(KERN, body);
    // fine with the default scope
    assert!(compile(statements.clone()).is_ok());

    let opts = Opts::new().redefinition_scope(RedefinitionScope::Feature);
    let err = compile_with(statements, &opts).unwrap_err();
    assert!(matches!(
        err.error,
        ResolveError::ConflictingRedefinition { .. }
    ));
}

#[test]
fn unit_scope_catches_conflict_across_features() {
    let mut statements = feature(KERN, vec![pos("A", 10)]);
    statements.extend(feature(Tag::new(b"dist"), vec![pos("A", 20)]));
    assert!(compile(statements.clone()).is_ok());

    let opts = Opts::new().redefinition_scope(RedefinitionScope::Unit);
    let err = compile_with(statements, &opts).unwrap_err();
    assert_eq!(err.index, 4);
}

#[test]
fn undefined_array() {
    let err = error_of(vec![Statement::single_pos(
        glyph("A"),
        SourceValueRecord::Placement(Metrics::Array("missing".into())),
    )]);
    assert_eq!(err.index, 0);
    assert_eq!(
        err.error,
        ResolveError::UndefinedName {
            kind: NameKind::Array,
            name: "missing".into()
        }
    );
}

#[test]
fn array_used_before_definition() {
    let err = error_of(vec![
        Statement::single_pos(
            glyph("A"),
            SourceValueRecord::Placement(Metrics::Array("late".into())),
        ),
        Statement::array("late", [1, 2, 3, 4].map(Literal::Number)),
    ]);
    assert_eq!(err.index, 0);
}

#[test]
fn undefined_scalar() {
    let err = error_of(vec![Statement::single_pos(
        glyph("A"),
        SourceValueRecord::Single(Literal::scalar("nope")),
    )]);
    assert_eq!(
        err.error,
        ResolveError::UndefinedName {
            kind: NameKind::Scalar,
            name: "nope".into()
        }
    );
}

#[test]
fn undefined_value_record() {
    let err = error_of(vec![Statement::single_pos(
        glyph("A"),
        SourceValueRecord::Named("nope".into()),
    )]);
    assert!(matches!(
        err.error,
        ResolveError::UndefinedName {
            kind: NameKind::ValueRecord,
            ..
        }
    ));
}

#[test]
fn array_wrong_arity() {
    let err = error_of(vec![
        Statement::array("three", [1, 2, 3].map(Literal::Number)),
        Statement::single_pos(
            glyph("A"),
            SourceValueRecord::Placement(Metrics::Array("three".into())),
        ),
    ]);
    assert_eq!(err.index, 1);
    assert_eq!(
        err.error,
        ResolveError::WrongArity {
            name: "@three".into(),
            expected: 4,
            found: 3
        }
    );

    // and as a bare value
    let err = error_of(vec![
        Statement::array("three", [1, 2, 3].map(Literal::Number)),
        Statement::single_pos(
            glyph("A"),
            SourceValueRecord::Single(Literal::array("three")),
        ),
    ]);
    assert!(matches!(
        err.error,
        ResolveError::WrongArity { expected: 1, .. }
    ));
}

/// `pos <glyph> <0 0 10 0 NULL NULL <device ...> NULL>;`
fn pos_with_x_advance_device(target: &str, entries: Vec<(u16, i16)>) -> Statement {
    Statement::single_pos(
        glyph(target),
        SourceValueRecord::PlacementWithDevices(
            Metrics::numbers([0, 0, 10, 0]),
            [
                DeviceClause::Null,
                DeviceClause::Null,
                DeviceClause::Entries(entries),
                DeviceClause::Null,
            ],
        ),
    )
}

#[test]
fn duplicate_ppem() {
    let entries = vec![(11, 111), (11, 222)];
    let err = error_of(vec![pos_with_x_advance_device("A", entries)]);
    assert_eq!(err.error, ResolveError::DuplicatePpem { ppem: 11 });
}

#[test]
fn device_delta_out_of_range() {
    let statements = feature(KERN, vec![pos_with_x_advance_device("A", vec![(11, 200)])]);
    let err = error_of(statements);
    assert_eq!(err.index, 1);
    assert_eq!(
        err.error,
        ResolveError::DeltaOutOfRange {
            ppem: 11,
            delta: 200
        }
    );
}

#[test]
fn duplicate_ppem_wins_over_delta_range() {
    let entries = vec![(12, 1), (11, 300), (11, -400)];
    let err = error_of(vec![pos_with_x_advance_device("A", entries)]);
    assert_eq!(err.index, 0);
    assert_eq!(err.error, ResolveError::DuplicatePpem { ppem: 11 });
}

#[test]
fn redefined_scalar() {
    let err = error_of(vec![Statement::scalar("a", 1), Statement::scalar("a", 1)]);
    assert_eq!(err.index, 1);
    assert!(matches!(
        err.error,
        ResolveError::DuplicateDefinition {
            kind: NameKind::Scalar,
            ..
        }
    ));
}

#[test]
fn nothing_published_on_failure() {
    // everything before the error resolved fine, but there is no output
    let result = compile(feature(KERN, vec![pos("A", 1), pos("B", 2), pos("A", 3)]));
    assert!(result.is_err());
}
