//! Source text through the lexer, the type parser and the type engine.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use common::World;
use emo_diagnostic::{DiagnosticQueue, ErrorCode};
use emo_ir::Span;
use emo_types::{CommonTypeFinder, GenericOwner, Type, TypeContext, TypeDynamism, TypeErrorKind};
use pretty_assertions::assert_eq;

#[test]
fn full_names_parse_back_to_the_same_type() {
    let world = World::new();
    let ctx = world.free();

    let list = world.parse("🍬🍨🐚🚂");
    assert_eq!(
        list,
        Type::class(world.list, vec![Type::INTEGER]).as_optional()
    );

    let rendered = world.render(&list);
    assert_eq!(rendered, "🍬🔶🔴🍨🐚🔶🔴🚂");
    assert!(world.parse(&rendered).identical_to(&list, &ctx));

    let dog = world.parse("🔶🏡🐶");
    assert_eq!(world.render(&dog), "🔶🏡🐶");
    assert!(world.parse(&world.render(&dog)).identical_to(&dog, &ctx));
}

#[test]
fn generic_arguments_are_invariant_unless_marked() {
    let world = World::new();
    let ctx = world.free();

    let boxed_integer = world.parse("📦🐚🚂");
    let boxed_something = world.parse("📦🐚⚪️");
    assert!(!boxed_integer.compatible_to(&boxed_something, &ctx));
    assert!(Type::INTEGER.compatible_to(&Type::SOMETHING, &ctx));

    assert!(world.parse("🥫🐚🐈").compatible_to(&world.parse("🥫🐚🦁"), &ctx));
    assert!(!world.parse("🥫🐚🦁").compatible_to(&world.parse("🥫🐚🐈"), &ctx));
}

#[test]
fn callables_read_from_source() {
    let world = World::new();
    let ctx = world.free();

    let takes_something = world.parse("🍇⚪️➡️🚂🍉");
    let takes_integer = world.parse("🍇🚂➡️🚂🍉");
    assert!(takes_something.compatible_to(&takes_integer, &ctx));
    assert!(!takes_integer.compatible_to(&takes_something, &ctx));

    let returns_cat = world.parse("🍇➡️🐈🍉");
    let returns_optional_animal = world.parse("🍇➡️🍬🦁🍉");
    assert!(returns_cat.compatible_to(&returns_optional_animal, &ctx));
    assert!(!returns_optional_animal.compatible_to(&returns_cat, &ctx));
}

#[test]
fn subclasses_with_generic_superclass() {
    let world = World::new();
    let ctx = world.free();

    let herd = world.parse("🐘🐚🔣");
    assert!(herd.compatible_to(&world.parse("🍨🐚🔣"), &ctx));
    assert!(!herd.compatible_to(&world.parse("🍨🐚🚂"), &ctx));
    assert!(herd.compatible_to(&Type::SOMEOBJECT, &ctx));
    assert!(world.parse("🐈").compatible_to(&world.parse("🗿"), &ctx));
    assert!(world.parse("🚦").compatible_to(&world.parse("🍬🗿"), &ctx));
}

#[test]
fn member_signature_resolved_on_an_instance() {
    let world = World::new();
    let body = Type::self_view(GenericOwner::Class(world.list), &world.decls);
    let body_ctx = TypeContext::new(&world.decls, &body);

    // A method of 🍨 taking an element and returning an optional element.
    let signature = world
        .parse_in(
            "🍇Element➡️🍬Element🍉",
            &body_ctx,
            TypeDynamism::ALLOW_GENERIC_TYPE_VARIABLES,
        )
        .unwrap();
    assert!(signature.dynamic);

    let instance = world.parse("🐘🐚🚀");
    let call_ctx = TypeContext::new(&world.decls, &instance);
    assert_eq!(
        signature.ty.resolve_on(&call_ctx),
        Type::callable(vec![Type::DOUBLE], Type::DOUBLE.as_optional())
    );
}

#[test]
fn generic_procedure_at_call_site() {
    let world = World::new();
    let body_ctx = world.free().with_procedure(world.shuffle);
    let parameter = world
        .parse_in(
            "🍇T➡️R🍉",
            &body_ctx,
            TypeDynamism::ALLOW_GENERIC_TYPE_VARIABLES,
        )
        .unwrap()
        .ty;

    let arguments = [world.parse("🐈"), Type::BOOLEAN];
    let call_ctx = world
        .free()
        .with_procedure_arguments(world.shuffle, &arguments);
    let expected = parameter.resolve_on(&call_ctx);
    assert_eq!(world.render(&expected), "🍇🔶🔴🐈➡️🔶🔴👌🍉");

    // An argument taking any animal fits where a cat handler is expected.
    let argument = world.parse("🍇🦁➡️👌🍉");
    assert!(argument.compatible_to(&expected, &world.free()));
}

#[test]
fn errors_from_many_annotations_are_collected() {
    let world = World::new();
    let mut queue = DiagnosticQueue::new();

    let sources = ["🍨🐚🚂🐚👌", "🔶🌵🍨", "🦀", "🍇🚂", "🚂"];
    let mut parsed = Vec::new();
    for source in sources {
        match world.try_parse(source) {
            Ok(ty) => parsed.push(ty),
            Err(err) => {
                queue.emit_error(err.to_diagnostic());
            }
        }
    }

    assert_eq!(parsed, vec![Type::INTEGER]);
    assert_eq!(queue.error_count(), 4);
    let codes: Vec<ErrorCode> = queue.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::E2004,
            ErrorCode::E2003,
            ErrorCode::E2002,
            ErrorCode::E1001,
        ]
    );
    assert!(queue.has_errors().is_some());
}

#[test]
fn count_error_names_the_generic_type() {
    let world = World::new();
    let err = world.try_parse("🍨🐚🚂🐚👌").unwrap_err();
    assert_eq!(
        err.kind,
        TypeErrorKind::GenericArgumentCount {
            type_name: "🍨".to_owned(),
            expected: 1,
            found: 2,
        }
    );
    assert_eq!(
        err.to_string(),
        "type 🍨 requires 1 generic arguments, but 2 were given"
    );
}

#[test]
fn collection_literal_element_types() {
    let world = World::new();
    let ctx = world.free();

    let infer = |sources: &[&str], queue: &mut DiagnosticQueue| {
        let mut finder = CommonTypeFinder::new();
        for source in sources {
            finder.add_type(&world.parse(source), &ctx);
        }
        finder.common_type(Span::new(0, 1), queue)
    };

    let mut queue = DiagnosticQueue::new();
    assert_eq!(infer(&["🐈", "🦁", "🐈"], &mut queue), world.parse("🦁"));
    assert_eq!(infer(&["🚂", "🚂"], &mut queue), Type::INTEGER);
    assert_eq!(queue.warning_count(), 0);

    assert_eq!(infer(&["🚂", "👌"], &mut queue), Type::SOMETHING);
    assert_eq!(queue.warning_count(), 1);
    assert_eq!(queue.diagnostics()[0].code, ErrorCode::W2001);
    assert_eq!(queue.error_count(), 0);
}
