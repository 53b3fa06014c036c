//! Declaration tables for classes, protocols, enums and procedures.
//!
//! The type engine never owns declarations; a `Type` names them through the
//! `Copy` handles defined here. The table is filled by the declaration
//! parser before any type is resolved and is read-only afterwards.
//!
//! # Generic parameters
//!
//! Generic parameters are stored per declaration, in declaration order. A
//! `Reference` type names one of them by index. Superclass and conformance
//! types are written in terms of the declaring class's own parameters, so
//! `🐘🐚A : 🍨🐚A` stores the superclass as `🍨` applied to `Reference(0, 🐘)`.

use emo_ir::Name;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ty::{Type, TypeKind};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Handle to a class declaration.
    ClassId
);
define_id!(
    /// Handle to a protocol declaration.
    ProtocolId
);
define_id!(
    /// Handle to an enum declaration.
    EnumId
);
define_id!(
    /// Handle to a procedure (method, initializer or function) declaration.
    ProcedureId
);

/// The declaration that owns a generic parameter list and can be
/// instantiated with generic arguments.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum GenericOwner {
    Class(ClassId),
    Protocol(ProtocolId),
}

/// A named type declaration, as found by the symbol table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeDecl {
    Class(ClassId),
    Protocol(ProtocolId),
    Enum(EnumId),
}

impl From<GenericOwner> for TypeDecl {
    fn from(owner: GenericOwner) -> Self {
        match owner {
            GenericOwner::Class(id) => TypeDecl::Class(id),
            GenericOwner::Protocol(id) => TypeDecl::Protocol(id),
        }
    }
}

/// Declared variance of a generic parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Variance {
    /// Arguments must be identical.
    #[default]
    Invariant,
    /// Arguments may be compatible subtypes.
    Covariant,
}

/// A declared generic parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericParam {
    /// The variable name used in type expressions.
    pub name: Name,
    /// Upper bound, written in the declaring class's own context.
    pub constraint: Type,
    pub variance: Variance,
}

impl GenericParam {
    /// An invariant parameter bounded by ⚪️.
    pub fn new(name: Name) -> Self {
        GenericParam {
            name,
            constraint: Type::SOMETHING,
            variance: Variance::Invariant,
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: Type) -> Self {
        self.constraint = constraint;
        self
    }

    #[must_use]
    pub fn covariant(mut self) -> Self {
        self.variance = Variance::Covariant;
        self
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ClassDecl {
    pub name: Name,
    pub namespace: Name,
    /// Package the class was declared in.
    pub package: Name,
    pub generic_params: Vec<GenericParam>,
    /// Superclass instantiation in terms of this class's own parameters.
    pub superclass: Option<Type>,
    /// Protocol types this class declares conformance to.
    pub conformances: Vec<Type>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ProtocolDecl {
    pub name: Name,
    pub namespace: Name,
    pub package: Name,
    pub generic_params: Vec<GenericParam>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EnumDecl {
    pub name: Name,
    pub namespace: Name,
    pub package: Name,
    pub conformances: Vec<Type>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ProcedureDecl {
    pub name: Name,
    pub generic_params: Vec<GenericParam>,
}

/// Errors raised while filling the declaration tables.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DeclarationError {
    #[error("a type named {name:?} is already declared in namespace {namespace:?}")]
    Duplicate { namespace: Name, name: Name },
    #[error("superclass of {class:?} must be a class type")]
    SuperclassNotAClass { class: ClassId },
    #[error("{class:?} cannot inherit from itself")]
    CyclicInheritance { class: ClassId },
    #[error("only protocol types can be conformed to")]
    ConformanceNotAProtocol,
    #[error("protocols cannot declare conformances")]
    ProtocolConformance,
}

/// Symbol table plus declaration storage.
///
/// Handles index the storage vectors directly; a handle from another table
/// is a caller bug and panics on access.
#[derive(Clone, Debug)]
pub struct Declarations {
    classes: Vec<ClassDecl>,
    protocols: Vec<ProtocolDecl>,
    enums: Vec<EnumDecl>,
    procedures: Vec<ProcedureDecl>,
    /// (namespace, name) -> declaration.
    symbols: FxHashMap<(Name, Name), TypeDecl>,
    namespaces: FxHashSet<Name>,
}

impl Declarations {
    /// Create an empty table with only the global namespace 🔴.
    pub fn new() -> Self {
        let mut namespaces = FxHashSet::default();
        namespaces.insert(Name::GLOBAL_NAMESPACE);
        Declarations {
            classes: Vec::new(),
            protocols: Vec::new(),
            enums: Vec::new(),
            procedures: Vec::new(),
            symbols: FxHashMap::default(),
            namespaces,
        }
    }

    fn register_symbol(
        &mut self,
        namespace: Name,
        name: Name,
        decl: TypeDecl,
    ) -> Result<(), DeclarationError> {
        if self.symbols.contains_key(&(namespace, name)) {
            return Err(DeclarationError::Duplicate { namespace, name });
        }
        self.symbols.insert((namespace, name), decl);
        self.namespaces.insert(namespace);
        Ok(())
    }

    fn next_raw(len: usize) -> u32 {
        u32::try_from(len).unwrap_or_else(|_| panic!("more than u32::MAX declarations"))
    }

    /// Declare a class without generic parameters or superclass.
    pub fn declare_class(
        &mut self,
        namespace: Name,
        name: Name,
        package: Name,
    ) -> Result<ClassId, DeclarationError> {
        let id = ClassId(Self::next_raw(self.classes.len()));
        self.register_symbol(namespace, name, TypeDecl::Class(id))?;
        self.classes.push(ClassDecl {
            name,
            namespace,
            package,
            generic_params: Vec::new(),
            superclass: None,
            conformances: Vec::new(),
        });
        tracing::trace!(?id, "declared class");
        Ok(id)
    }

    pub fn declare_protocol(
        &mut self,
        namespace: Name,
        name: Name,
        package: Name,
    ) -> Result<ProtocolId, DeclarationError> {
        let id = ProtocolId(Self::next_raw(self.protocols.len()));
        self.register_symbol(namespace, name, TypeDecl::Protocol(id))?;
        self.protocols.push(ProtocolDecl {
            name,
            namespace,
            package,
            generic_params: Vec::new(),
        });
        Ok(id)
    }

    pub fn declare_enum(
        &mut self,
        namespace: Name,
        name: Name,
        package: Name,
    ) -> Result<EnumId, DeclarationError> {
        let id = EnumId(Self::next_raw(self.enums.len()));
        self.register_symbol(namespace, name, TypeDecl::Enum(id))?;
        self.enums.push(EnumDecl {
            name,
            namespace,
            package,
            conformances: Vec::new(),
        });
        Ok(id)
    }

    /// Procedures are not part of the symbol table; they are reached
    /// through the declaration that contains them.
    pub fn declare_procedure(&mut self, name: Name) -> ProcedureId {
        let id = ProcedureId(Self::next_raw(self.procedures.len()));
        self.procedures.push(ProcedureDecl {
            name,
            generic_params: Vec::new(),
        });
        id
    }

    pub fn set_generic_params(&mut self, owner: GenericOwner, params: Vec<GenericParam>) {
        match owner {
            GenericOwner::Class(id) => self.classes[id.index()].generic_params = params,
            GenericOwner::Protocol(id) => self.protocols[id.index()].generic_params = params,
        }
    }

    pub fn set_procedure_generic_params(&mut self, id: ProcedureId, params: Vec<GenericParam>) {
        self.procedures[id.index()].generic_params = params;
    }

    /// Set the superclass of `class`.
    ///
    /// `superclass` must be a class type and must not make `class` its own
    /// ancestor.
    pub fn set_superclass(&mut self, class: ClassId, superclass: Type) -> Result<(), DeclarationError> {
        let TypeKind::Class { class: parent, .. } = superclass.kind() else {
            return Err(DeclarationError::SuperclassNotAClass { class });
        };
        if *parent == class || self.ancestors(*parent).any(|ancestor| ancestor == class) {
            return Err(DeclarationError::CyclicInheritance { class });
        }
        self.classes[class.index()].superclass = Some(superclass.non_optional());
        Ok(())
    }

    /// Record that a class or enum conforms to `protocol`.
    pub fn add_conformance(&mut self, conformer: TypeDecl, protocol: Type) -> Result<(), DeclarationError> {
        if !matches!(protocol.kind(), TypeKind::Protocol { .. }) {
            return Err(DeclarationError::ConformanceNotAProtocol);
        }
        let protocol = protocol.non_optional();
        match conformer {
            TypeDecl::Class(id) => self.classes[id.index()].conformances.push(protocol),
            TypeDecl::Enum(id) => self.enums[id.index()].conformances.push(protocol),
            TypeDecl::Protocol(_) => return Err(DeclarationError::ProtocolConformance),
        }
        Ok(())
    }

    /// Symbol table lookup.
    pub fn lookup(&self, namespace: Name, name: Name) -> Option<TypeDecl> {
        self.symbols.get(&(namespace, name)).copied()
    }

    /// Whether any declaration lives in `namespace` (🔴 always exists).
    pub fn has_namespace(&self, namespace: Name) -> bool {
        self.namespaces.contains(&namespace)
    }

    #[inline]
    pub fn class(&self, id: ClassId) -> &ClassDecl {
        &self.classes[id.index()]
    }

    #[inline]
    pub fn protocol(&self, id: ProtocolId) -> &ProtocolDecl {
        &self.protocols[id.index()]
    }

    #[inline]
    pub fn enumeration(&self, id: EnumId) -> &EnumDecl {
        &self.enums[id.index()]
    }

    #[inline]
    pub fn procedure(&self, id: ProcedureId) -> &ProcedureDecl {
        &self.procedures[id.index()]
    }

    /// Generic parameters of a class or protocol.
    pub fn generic_params(&self, owner: GenericOwner) -> &[GenericParam] {
        match owner {
            GenericOwner::Class(id) => &self.class(id).generic_params,
            GenericOwner::Protocol(id) => &self.protocol(id).generic_params,
        }
    }

    /// Name of a class, protocol or enum.
    pub fn decl_name(&self, decl: TypeDecl) -> (Name, Name) {
        match decl {
            TypeDecl::Class(id) => (self.class(id).namespace, self.class(id).name),
            TypeDecl::Protocol(id) => (self.protocol(id).namespace, self.protocol(id).name),
            TypeDecl::Enum(id) => (self.enumeration(id).namespace, self.enumeration(id).name),
        }
    }

    pub fn superclass(&self, id: ClassId) -> Option<&Type> {
        self.class(id).superclass.as_ref()
    }

    /// Superclass chain of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: ClassId) -> Ancestors<'_> {
        Ancestors {
            declarations: self,
            current: self.parent_of(id),
        }
    }

    fn parent_of(&self, id: ClassId) -> Option<ClassId> {
        match self.superclass(id)?.kind() {
            TypeKind::Class { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// Whether `class` is `ancestor` or inherits from it.
    pub fn inherits_from(&self, class: ClassId, ancestor: ClassId) -> bool {
        class == ancestor || self.ancestors(class).any(|c| c == ancestor)
    }
}

impl Default for Declarations {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a superclass chain.
pub struct Ancestors<'a> {
    declarations: &'a Declarations,
    current: Option<ClassId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ClassId;

    fn next(&mut self) -> Option<ClassId> {
        let current = self.current?;
        self.current = self.declarations.parent_of(current);
        Some(current)
    }
}
