//! Declarations shared by the unit tests.
//!
//! ```text
//! 🦁 Animal            🐈 Cat : 🦁, conforms to 🗿
//! 📦 Box<X>            🥫 Can<Item> (covariant)
//! 🍨 List<Element>     conforms to 🔁<Element>
//! 🍯 Map<K, V>         🧺 Basket<K, V: 🍨<K>>
//! 🚚 Truck<Cargo: 🦁>  🐘 Herd<A> : 🍨<A>
//! 🔡 String
//! 🗿 Printable         🔁 Iterable<E>
//! 🚦 Light (enum), conforms to 🗿
//! 🏡 namespace: 🐶 Dog : 🦁
//! 🔀 procedure<T, R>   🧪 procedure<U: 🦁>
//! ```

use emo_ir::{Name, StringInterner};

use crate::{
    ClassId, Declarations, EnumId, FetchedType, GenericOwner, GenericParam, ProcedureId,
    ProtocolId, Type, TypeContext, TypeDecl, TypeDynamism, TypeError, TypeParser,
};

pub(crate) struct Fixture {
    pub interner: StringInterner,
    pub decls: Declarations,
    pub animal: ClassId,
    pub cat: ClassId,
    pub dog: ClassId,
    pub boxed: ClassId,
    pub can: ClassId,
    pub list: ClassId,
    pub map: ClassId,
    pub basket: ClassId,
    pub truck: ClassId,
    pub herd: ClassId,
    pub string: ClassId,
    pub printable: ProtocolId,
    pub iterable: ProtocolId,
    pub light: EnumId,
    pub shuffle: ProcedureId,
    pub experiment: ProcedureId,
}

impl Fixture {
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let mut decls = Declarations::new();
        let global = Name::GLOBAL_NAMESPACE;
        let core = interner.intern("s");
        let n = |s: &str| interner.intern(s);

        let animal = decls.declare_class(global, n("🦁"), core).unwrap();
        let cat = decls.declare_class(global, n("🐈"), core).unwrap();
        let dog = decls.declare_class(n("🏡"), n("🐶"), n("zoo")).unwrap();
        let boxed = decls.declare_class(global, n("📦"), core).unwrap();
        let can = decls.declare_class(global, n("🥫"), core).unwrap();
        let list = decls.declare_class(global, n("🍨"), core).unwrap();
        let map = decls.declare_class(global, n("🍯"), core).unwrap();
        let basket = decls.declare_class(global, n("🧺"), core).unwrap();
        let truck = decls.declare_class(global, n("🚚"), core).unwrap();
        let herd = decls.declare_class(global, n("🐘"), core).unwrap();
        let string = decls.declare_class(global, n("🔡"), core).unwrap();
        let printable = decls.declare_protocol(global, n("🗿"), core).unwrap();
        let iterable = decls.declare_protocol(global, n("🔁"), core).unwrap();
        let light = decls.declare_enum(global, n("🚦"), core).unwrap();

        decls.set_superclass(cat, Type::class(animal, vec![])).unwrap();
        decls.set_superclass(dog, Type::class(animal, vec![])).unwrap();

        decls.set_generic_params(GenericOwner::Class(boxed), vec![GenericParam::new(n("X"))]);
        decls.set_generic_params(
            GenericOwner::Class(can),
            vec![GenericParam::new(n("Item")).covariant()],
        );
        decls.set_generic_params(GenericOwner::Class(list), vec![GenericParam::new(n("Element"))]);
        decls.set_generic_params(
            GenericOwner::Class(map),
            vec![GenericParam::new(n("K")), GenericParam::new(n("V"))],
        );
        let basket_key = Type::reference(0, GenericOwner::Class(basket));
        decls.set_generic_params(
            GenericOwner::Class(basket),
            vec![
                GenericParam::new(n("K")),
                GenericParam::new(n("V")).with_constraint(Type::class(list, vec![basket_key])),
            ],
        );
        decls.set_generic_params(
            GenericOwner::Class(truck),
            vec![GenericParam::new(n("Cargo")).with_constraint(Type::class(animal, vec![]))],
        );
        decls.set_generic_params(GenericOwner::Class(herd), vec![GenericParam::new(n("A"))]);
        decls
            .set_superclass(
                herd,
                Type::class(list, vec![Type::reference(0, GenericOwner::Class(herd))]),
            )
            .unwrap();
        decls.set_generic_params(GenericOwner::Protocol(iterable), vec![GenericParam::new(n("E"))]);

        decls
            .add_conformance(TypeDecl::Class(cat), Type::protocol(printable, vec![]))
            .unwrap();
        decls
            .add_conformance(TypeDecl::Enum(light), Type::protocol(printable, vec![]))
            .unwrap();
        decls
            .add_conformance(
                TypeDecl::Class(list),
                Type::protocol(iterable, vec![Type::reference(0, GenericOwner::Class(list))]),
            )
            .unwrap();

        let shuffle = decls.declare_procedure(n("🔀"));
        decls.set_procedure_generic_params(
            shuffle,
            vec![GenericParam::new(n("T")), GenericParam::new(n("R"))],
        );
        let experiment = decls.declare_procedure(n("🧪"));
        decls.set_procedure_generic_params(
            experiment,
            vec![GenericParam::new(n("U")).with_constraint(Type::class(animal, vec![]))],
        );

        Fixture {
            interner,
            decls,
            animal,
            cat,
            dog,
            boxed,
            can,
            list,
            map,
            basket,
            truck,
            herd,
            string,
            printable,
            iterable,
            light,
            shuffle,
            experiment,
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
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

    /// Parse a concrete type outside any declaration.
    pub fn parse(&self, source: &str) -> Type {
        match self.parse_in(source, &self.free(), TypeDynamism::NONE) {
            Ok(fetched) => fetched.ty,
            Err(err) => panic!("failed to parse {source}: {err}"),
        }
    }

    pub fn render(&self, ty: &Type) -> String {
        ty.to_string_with(&self.decls, &self.interner, true)
    }
}
