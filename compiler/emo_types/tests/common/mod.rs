//! A small program's worth of declarations for integration tests.
//!
//! ```text
//! 🦁 Animal   🐈 Cat : 🦁 (🗿)   🏡.🐶 Dog : 🦁
//! 📦 Box<X>   🥫 Can<Item> (covariant)
//! 🍨 List<Element>   🐘 Herd<A> : 🍨<A>
//! 🗿 Printable   🚦 Light (enum, 🗿)
//! 🔀 procedure<T, R>
//! ```

#![allow(dead_code, reason = "each test binary uses a different subset")]
#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use emo_ir::{Name, StringInterner};
use emo_types::{
    ClassId, Declarations, EnumId, FetchedType, GenericOwner, GenericParam, ProcedureId,
    ProtocolId, Type, TypeContext, TypeDecl, TypeDynamism, TypeError, TypeParser,
};

pub struct World {
    pub interner: StringInterner,
    pub decls: Declarations,
    pub animal: ClassId,
    pub cat: ClassId,
    pub dog: ClassId,
    pub boxed: ClassId,
    pub can: ClassId,
    pub list: ClassId,
    pub herd: ClassId,
    pub printable: ProtocolId,
    pub light: EnumId,
    pub shuffle: ProcedureId,
}

impl World {
    pub fn new() -> Self {
        emo_types::init_tracing();
        let interner = StringInterner::new();
        let mut decls = Declarations::new();
        let global = Name::GLOBAL_NAMESPACE;
        let package = interner.intern("s");
        let n = |s: &str| interner.intern(s);

        let animal = decls.declare_class(global, n("🦁"), package).unwrap();
        let cat = decls.declare_class(global, n("🐈"), package).unwrap();
        let dog = decls.declare_class(n("🏡"), n("🐶"), package).unwrap();
        let boxed = decls.declare_class(global, n("📦"), package).unwrap();
        let can = decls.declare_class(global, n("🥫"), package).unwrap();
        let list = decls.declare_class(global, n("🍨"), package).unwrap();
        let herd = decls.declare_class(global, n("🐘"), package).unwrap();
        let printable = decls.declare_protocol(global, n("🗿"), package).unwrap();
        let light = decls.declare_enum(global, n("🚦"), package).unwrap();

        decls.set_superclass(cat, Type::class(animal, vec![])).unwrap();
        decls.set_superclass(dog, Type::class(animal, vec![])).unwrap();
        decls.set_generic_params(GenericOwner::Class(boxed), vec![GenericParam::new(n("X"))]);
        decls.set_generic_params(
            GenericOwner::Class(can),
            vec![GenericParam::new(n("Item")).covariant()],
        );
        decls.set_generic_params(GenericOwner::Class(list), vec![GenericParam::new(n("Element"))]);
        decls.set_generic_params(GenericOwner::Class(herd), vec![GenericParam::new(n("A"))]);
        decls
            .set_superclass(
                herd,
                Type::class(list, vec![Type::reference(0, GenericOwner::Class(herd))]),
            )
            .unwrap();
        decls
            .add_conformance(TypeDecl::Class(cat), Type::protocol(printable, vec![]))
            .unwrap();
        decls
            .add_conformance(TypeDecl::Enum(light), Type::protocol(printable, vec![]))
            .unwrap();

        let shuffle = decls.declare_procedure(n("🔀"));
        decls.set_procedure_generic_params(
            shuffle,
            vec![GenericParam::new(n("T")), GenericParam::new(n("R"))],
        );

        World {
            interner,
            decls,
            animal,
            cat,
            dog,
            boxed,
            can,
            list,
            herd,
            printable,
            light,
            shuffle,
        }
    }

    pub fn free(&self) -> TypeContext<'_> {
        TypeContext::free(&self.decls)
    }

    pub fn parse_in(
        &self,
        source: &str,
        ctx: &TypeContext<'_>,
        dynamism: TypeDynamism,
    ) -> Result<FetchedType, TypeError> {
        let tokens = emo_lexer::lex(source, &self.interner);
        TypeParser::new(&tokens, &self.decls, &self.interner).parse_complete(ctx, dynamism)
    }

    pub fn try_parse(&self, source: &str) -> Result<Type, TypeError> {
        self.parse_in(source, &self.free(), TypeDynamism::NONE)
            .map(|fetched| fetched.ty)
    }

    pub fn parse(&self, source: &str) -> Type {
        self.try_parse(source)
            .unwrap_or_else(|err| panic!("failed to parse {source}: {err}"))
    }

    pub fn render(&self, ty: &Type) -> String {
        ty.to_string_with(&self.decls, &self.interner, true)
    }
}
