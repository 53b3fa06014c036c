//! The `Type` value.
//!
//! A `Type` is a closed sum (`TypeKind`) plus an orthogonal optionality flag.
//! Each kind carries exactly the payload it needs; declarations are named by
//! `Copy` handles into `Declarations`, never owned.
//!
//! Types are values. They are compared with `==` (structural identity) and
//! substituted by producing new values; nothing mutates a published `Type`.
//! Generic arguments are filled in through `GenericTypeBuilder` before the
//! type is finished.

use emo_ir::Name;

use crate::decl::{ClassId, Declarations, EnumId, GenericOwner, ProcedureId, ProtocolId};

/// Discriminant plus payload of a `Type`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    Class { class: ClassId, arguments: Box<[Type]> },
    Protocol { protocol: ProtocolId, arguments: Box<[Type]> },
    Enum(EnumId),
    Boolean,
    Integer,
    /// A single Unicode code point.
    Symbol,
    Double,
    /// The absent value. Never optional.
    Nothingness,
    /// Top of the lattice.
    Something,
    /// Top of the object-category sublattice.
    SomeObject,
    /// Generic parameter `index` of a class or protocol.
    Reference { index: u16, owner: GenericOwner },
    /// Generic parameter `index` of a procedure.
    LocalReference { index: u16, procedure: ProcedureId },
    /// Parameter types followed by the return type; never empty.
    Callable(Box<[Type]>),
}

/// A type of the language.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Type {
    kind: TypeKind,
    optional: bool,
}

impl Type {
    pub const BOOLEAN: Type = Type::primitive(TypeKind::Boolean);
    pub const INTEGER: Type = Type::primitive(TypeKind::Integer);
    pub const SYMBOL: Type = Type::primitive(TypeKind::Symbol);
    pub const DOUBLE: Type = Type::primitive(TypeKind::Double);
    pub const NOTHINGNESS: Type = Type::primitive(TypeKind::Nothingness);
    pub const SOMETHING: Type = Type::primitive(TypeKind::Something);
    pub const SOMEOBJECT: Type = Type::primitive(TypeKind::SomeObject);

    const fn primitive(kind: TypeKind) -> Type {
        Type {
            kind,
            optional: false,
        }
    }

    pub(crate) fn from_kind(kind: TypeKind, optional: bool) -> Type {
        let optional = optional && kind != TypeKind::Nothingness;
        Type { kind, optional }
    }

    /// A class instantiation.
    pub fn class(class: ClassId, arguments: Vec<Type>) -> Type {
        Type::primitive(TypeKind::Class {
            class,
            arguments: arguments.into_boxed_slice(),
        })
    }

    /// A protocol instantiation.
    pub fn protocol(protocol: ProtocolId, arguments: Vec<Type>) -> Type {
        Type::primitive(TypeKind::Protocol {
            protocol,
            arguments: arguments.into_boxed_slice(),
        })
    }

    pub fn enumeration(id: EnumId) -> Type {
        Type::primitive(TypeKind::Enum(id))
    }

    /// Generic parameter `index` of `owner`.
    ///
    /// `index` must be within the owner's declared parameter list.
    pub fn reference(index: u16, owner: GenericOwner) -> Type {
        Type::primitive(TypeKind::Reference { index, owner })
    }

    /// Generic parameter `index` of `procedure`.
    pub fn local_reference(index: u16, procedure: ProcedureId) -> Type {
        Type::primitive(TypeKind::LocalReference { index, procedure })
    }

    /// A callable taking `params` and returning `ret`.
    pub fn callable(params: Vec<Type>, ret: Type) -> Type {
        let mut types = params;
        types.push(ret);
        Type::primitive(TypeKind::Callable(types.into_boxed_slice()))
    }

    /// The instantiation of `owner` as seen from inside its own body, where
    /// every generic argument is the matching `Reference`.
    pub fn self_view(owner: GenericOwner, declarations: &Declarations) -> Type {
        let arguments = (0..declarations.generic_params(owner).len())
            .map(|index| Type::reference(param_index(index), owner))
            .collect();
        match owner {
            GenericOwner::Class(class) => Type::class(class, arguments),
            GenericOwner::Protocol(protocol) => Type::protocol(protocol, arguments),
        }
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Copy of `self` with the optional flag set to `optional`.
    /// ✨ ignores the flag.
    #[must_use]
    pub fn with_optional(&self, optional: bool) -> Type {
        Type::from_kind(self.kind.clone(), optional)
    }

    #[must_use]
    pub fn as_optional(&self) -> Type {
        self.with_optional(true)
    }

    #[must_use]
    pub fn non_optional(&self) -> Type {
        self.with_optional(false)
    }

    /// Generic arguments of a class or protocol instantiation, or the
    /// parameter-then-return list of a callable. Empty for other kinds.
    pub fn generic_arguments(&self) -> &[Type] {
        match &self.kind {
            TypeKind::Class { arguments, .. } | TypeKind::Protocol { arguments, .. } => arguments,
            TypeKind::Callable(types) => types,
            _ => &[],
        }
    }

    /// Parameter types of a callable.
    pub fn callable_params(&self) -> Option<&[Type]> {
        match &self.kind {
            TypeKind::Callable(types) => types.split_last().map(|(_, params)| params),
            _ => None,
        }
    }

    /// Return type of a callable.
    pub fn callable_return(&self) -> Option<&Type> {
        match &self.kind {
            TypeKind::Callable(types) => types.last(),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Reference { .. } | TypeKind::LocalReference { .. }
        )
    }

    /// Whether a `Reference` or `LocalReference` occurs anywhere in `self`.
    pub fn contains_references(&self) -> bool {
        self.is_reference() || self.generic_arguments().iter().any(Type::contains_references)
    }

    /// 👌 🚂 🔣 🚀
    pub fn is_primitive(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Boolean | TypeKind::Integer | TypeKind::Symbol | TypeKind::Double
        )
    }

    /// Class instances and 🔵.
    pub fn is_object_category(&self) -> bool {
        matches!(self.kind, TypeKind::Class { .. } | TypeKind::SomeObject)
    }

    /// Package the named declaration lives in; `None` for everything else.
    pub fn type_package(&self, declarations: &Declarations) -> Option<Name> {
        match &self.kind {
            TypeKind::Class { class, .. } => Some(declarations.class(*class).package),
            TypeKind::Protocol { protocol, .. } => Some(declarations.protocol(*protocol).package),
            TypeKind::Enum(id) => Some(declarations.enumeration(*id).package),
            _ => None,
        }
    }

    /// The class or protocol this type instantiates.
    pub fn generic_owner(&self) -> Option<GenericOwner> {
        match &self.kind {
            TypeKind::Class { class, .. } => Some(GenericOwner::Class(*class)),
            TypeKind::Protocol { protocol, .. } => Some(GenericOwner::Protocol(*protocol)),
            _ => None,
        }
    }

    /// Rebuild a class, protocol or callable with new argument types,
    /// keeping kind and optionality.
    pub(crate) fn with_arguments(&self, arguments: Vec<Type>) -> Type {
        let arguments = arguments.into_boxed_slice();
        let kind = match &self.kind {
            TypeKind::Class { class, .. } => TypeKind::Class {
                class: *class,
                arguments,
            },
            TypeKind::Protocol { protocol, .. } => TypeKind::Protocol {
                protocol: *protocol,
                arguments,
            },
            TypeKind::Callable(_) => TypeKind::Callable(arguments),
            other => other.clone(),
        };
        Type::from_kind(kind, self.optional)
    }
}

/// Convert a parameter position into a `Reference` index.
///
/// # Panics
/// Panics if a declaration has more than `u16::MAX` generic parameters.
pub(crate) fn param_index(index: usize) -> u16 {
    u16::try_from(index).unwrap_or_else(|_| panic!("more than u16::MAX generic parameters"))
}

/// Two-phase construction of a generic class or protocol instantiation.
///
/// The parser creates the builder as soon as it knows the base declaration,
/// pushes arguments as it parses them (validating each against the arguments
/// pushed so far), then calls `finish`. Only the finished `Type` escapes.
#[derive(Clone, Debug)]
pub struct GenericTypeBuilder {
    owner: GenericOwner,
    optional: bool,
    arguments: Vec<Type>,
}

impl GenericTypeBuilder {
    pub fn new(owner: GenericOwner, optional: bool) -> Self {
        GenericTypeBuilder {
            owner,
            optional,
            arguments: Vec::new(),
        }
    }

    #[inline]
    pub fn owner(&self) -> GenericOwner {
        self.owner
    }

    #[inline]
    pub fn arguments(&self) -> &[Type] {
        &self.arguments
    }

    pub fn push_argument(&mut self, argument: Type) {
        self.arguments.push(argument);
    }

    /// The type under construction, with parameters that have no argument
    /// yet left as their own `Reference`s.
    ///
    /// Used to resolve a parameter's constraint, which may mention earlier
    /// parameters of the same declaration.
    pub fn partial_view(&self, declarations: &Declarations) -> Type {
        let arity = declarations.generic_params(self.owner).len();
        let arguments = (0..arity)
            .map(|index| {
                self.arguments
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| Type::reference(param_index(index), self.owner))
            })
            .collect();
        build(self.owner, self.optional, arguments)
    }

    pub fn finish(self) -> Type {
        build(self.owner, self.optional, self.arguments)
    }
}

fn build(owner: GenericOwner, optional: bool, arguments: Vec<Type>) -> Type {
    let kind = match owner {
        GenericOwner::Class(class) => TypeKind::Class {
            class,
            arguments: arguments.into_boxed_slice(),
        },
        GenericOwner::Protocol(protocol) => TypeKind::Protocol {
            protocol,
            arguments: arguments.into_boxed_slice(),
        },
    };
    Type::from_kind(kind, optional)
}
