use super::*;
use crate::test_support::Fixture;
use emo_diagnostic::DiagnosticConfig;
use pretty_assertions::assert_eq;

fn common_of(f: &Fixture, types: &[Type]) -> (Type, DiagnosticQueue) {
    let ctx = f.free();
    let mut finder = CommonTypeFinder::new();
    for ty in types {
        finder.add_type(ty, &ctx);
    }
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    let ty = finder.common_type(Span::new(0, 4), &mut queue);
    (ty, queue)
}

#[test]
fn empty_finder_yields_something() {
    let f = Fixture::new();
    let (ty, queue) = common_of(&f, &[]);
    assert_eq!(ty, Type::SOMETHING);
    assert_eq!(queue.warning_count(), 0);
}

#[test]
fn homogeneous_elements_keep_their_type() {
    let f = Fixture::new();
    let (ty, queue) = common_of(&f, &[Type::INTEGER, Type::INTEGER, Type::INTEGER]);
    assert_eq!(ty, Type::INTEGER);
    assert_eq!(queue.warning_count(), 0);
}

#[test]
fn unrelated_elements_widen_with_warning() {
    let f = Fixture::new();
    let (ty, queue) = common_of(&f, &[Type::INTEGER, Type::BOOLEAN]);
    assert_eq!(ty, Type::SOMETHING);
    assert_eq!(queue.warning_count(), 1);

    let warning = &queue.diagnostics()[0];
    assert_eq!(warning.code, ErrorCode::W2001);
    assert_eq!(warning.primary_span(), Some(Span::new(0, 4)));
    assert!(!warning.is_error());
}

#[test]
fn widening_is_order_independent_for_subclasses() {
    let f = Fixture::new();
    let cat = Type::class(f.cat, vec![]);
    let animal = Type::class(f.animal, vec![]);

    let (forward, queue) = common_of(&f, &[cat.clone(), animal.clone()]);
    assert_eq!(forward, animal);
    assert_eq!(queue.warning_count(), 0);

    let (backward, queue) = common_of(&f, &[animal.clone(), cat]);
    assert_eq!(backward, animal);
    assert_eq!(queue.warning_count(), 0);
}

#[test]
fn siblings_are_not_joined_at_their_ancestor() {
    let f = Fixture::new();
    let finder_types = [Type::class(f.cat, vec![]), Type::class(f.dog, vec![])];
    let (ty, queue) = common_of(&f, &finder_types);
    assert_eq!(ty, Type::SOMETHING);
    assert_eq!(queue.warning_count(), 1);
}

#[test]
fn nothingness_widens_to_optional() {
    let f = Fixture::new();
    let (ty, queue) = common_of(&f, &[Type::NOTHINGNESS, Type::INTEGER.as_optional()]);
    assert_eq!(ty, Type::INTEGER.as_optional());
    assert_eq!(queue.warning_count(), 0);
}

#[test]
fn ambiguity_is_reported_once() {
    let f = Fixture::new();
    let ctx = f.free();
    let mut finder = CommonTypeFinder::default();
    finder.add_type(&Type::INTEGER, &ctx);
    finder.add_type(&Type::BOOLEAN, &ctx);
    finder.add_type(&Type::DOUBLE, &ctx);
    assert!(finder.is_ambiguous());

    let mut queue = DiagnosticQueue::new();
    assert_eq!(finder.common_type(Span::new(2, 3), &mut queue), Type::SOMETHING);
    assert_eq!(queue.warning_count(), 1);
}

#[test]
fn references_are_resolved_when_added() {
    let f = Fixture::new();
    let normal = Type::class(f.list, vec![Type::INTEGER]);
    let ctx = TypeContext::new(&f.decls, &normal);
    let mut finder = CommonTypeFinder::new();
    finder.add_type(&Type::reference(0, crate::GenericOwner::Class(f.list)), &ctx);
    finder.add_type(&Type::INTEGER, &ctx);
    let mut queue = DiagnosticQueue::new();
    assert_eq!(finder.common_type(Span::DUMMY, &mut queue), Type::INTEGER);
}
