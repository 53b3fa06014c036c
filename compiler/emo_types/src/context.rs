//! Resolution environment for generic references.

use crate::decl::{Declarations, GenericOwner, ProcedureId};
use crate::ty::{Type, TypeKind};

/// Context a type is resolved, checked or parsed in.
///
/// Borrows everything; a context never outlives the call that built it.
/// - `normal_type` is the enclosing class, protocol or enum instantiation and
///   binds `Reference`s.
/// - `procedure` is the enclosing procedure, whose generic parameters are
///   visible to the parser as `LocalReference`s.
/// - `procedure_arguments` binds those `LocalReference`s at a call site.
#[derive(Copy, Clone, Debug)]
pub struct TypeContext<'a> {
    declarations: &'a Declarations,
    normal_type: &'a Type,
    procedure: Option<ProcedureId>,
    procedure_arguments: Option<&'a [Type]>,
}

/// Normal type of a context outside any declaration.
static FREE_NORMAL_TYPE: Type = Type::NOTHINGNESS;

impl<'a> TypeContext<'a> {
    pub fn new(declarations: &'a Declarations, normal_type: &'a Type) -> Self {
        TypeContext {
            declarations,
            normal_type,
            procedure: None,
            procedure_arguments: None,
        }
    }

    /// Context outside any declaration: nothing binds, nothing is in scope.
    pub fn free(declarations: &'a Declarations) -> Self {
        Self::new(declarations, &FREE_NORMAL_TYPE)
    }

    /// Enter the body of `procedure` (its generic arguments still unbound).
    #[must_use]
    pub fn with_procedure(self, procedure: ProcedureId) -> Self {
        TypeContext {
            procedure: Some(procedure),
            ..self
        }
    }

    /// Bind `procedure`'s generic parameters, as at an instantiated call site.
    #[must_use]
    pub fn with_procedure_arguments(self, procedure: ProcedureId, arguments: &'a [Type]) -> Self {
        TypeContext {
            procedure: Some(procedure),
            procedure_arguments: Some(arguments),
            ..self
        }
    }

    #[inline]
    pub fn declarations(&self) -> &'a Declarations {
        self.declarations
    }

    #[inline]
    pub fn normal_type(&self) -> &'a Type {
        self.normal_type
    }

    #[inline]
    pub fn procedure(&self) -> Option<ProcedureId> {
        self.procedure
    }

    #[inline]
    pub fn procedure_arguments(&self) -> Option<&'a [Type]> {
        self.procedure_arguments
    }

    /// The type bound to generic parameter `index` of `owner`, if the normal
    /// type provides one.
    ///
    /// A class parameter is bound when the normal type is that class or a
    /// subclass of it; a protocol parameter when the normal type is that
    /// protocol or conforms to it.
    pub fn binding_for(&self, index: u16, owner: GenericOwner) -> Option<Type> {
        let index = usize::from(index);
        match owner {
            GenericOwner::Class(class) => {
                let instance = self.normal_type.instantiate_as(class, self.declarations)?;
                instance.generic_arguments().get(index).cloned()
            }
            GenericOwner::Protocol(protocol) => match self.normal_type.kind() {
                TypeKind::Protocol {
                    protocol: own,
                    arguments,
                } if *own == protocol => arguments.get(index).cloned(),
                _ => {
                    let conformance = self.normal_type.conformance_to(protocol, self.declarations)?;
                    conformance.generic_arguments().get(index).cloned()
                }
            },
        }
    }

    /// The type bound to generic parameter `index` of `procedure`.
    pub fn procedure_binding_for(&self, index: u16, procedure: ProcedureId) -> Option<Type> {
        if self.procedure != Some(procedure) {
            return None;
        }
        self.procedure_arguments?.get(usize::from(index)).cloned()
    }
}
