//! Substitution of generic references.
//!
//! `resolve_on` projects a type written with `Reference`s and
//! `LocalReference`s into a concrete context. Substitution is a single step:
//! a binding is taken as it is stored in the context and is not itself
//! resolved again. Optionality composes; the result is optional if either
//! the reference or its binding is.
//!
//! Superclass and conformance types are stored in terms of the declaring
//! class's own parameters. `resolve_on_super_arguments` lifts them onto a
//! concrete subclass instantiation, and `instantiate_as` repeats that step
//! along the superclass chain.

use crate::context::TypeContext;
use crate::decl::{ClassId, Declarations, GenericOwner, ProcedureId, ProtocolId, TypeDecl};
use crate::ty::{Type, TypeKind};

/// A reference has no binding in the context it was resolved on.
///
/// This is a contract violation of the calling phase, never a user error.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum UnresolvedReferenceError {
    #[error("generic parameter {index} of {owner:?} has no binding in this context")]
    Generic { index: u16, owner: GenericOwner },
    #[error("generic parameter {index} of procedure {procedure:?} has no binding in this context")]
    Procedure { index: u16, procedure: ProcedureId },
}

/// How unbound references are treated during substitution.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Unbound {
    Fail,
    Keep,
}

impl Type {
    /// Substitute every reference in `self` with its binding in `ctx`.
    pub fn try_resolve_on(&self, ctx: &TypeContext<'_>) -> Result<Type, UnresolvedReferenceError> {
        self.substitute(ctx, Unbound::Fail)
    }

    /// Like `try_resolve_on`, for callers that guarantee every binding exists.
    ///
    /// # Panics
    /// Panics if a reference has no binding in `ctx`.
    pub fn resolve_on(&self, ctx: &TypeContext<'_>) -> Type {
        match self.try_resolve_on(ctx) {
            Ok(ty) => ty,
            Err(err) => panic!("internal compiler error: {err}"),
        }
    }

    /// Substitute what `ctx` binds and leave other references in place.
    ///
    /// This is the view from inside a generic declaration's own body, where
    /// its parameters are still abstract.
    pub(crate) fn resolve_lenient(&self, ctx: &TypeContext<'_>) -> Type {
        match self.substitute(ctx, Unbound::Keep) {
            Ok(ty) => ty,
            Err(err) => unreachable!("lenient resolution cannot fail: {err}"),
        }
    }

    fn substitute(&self, ctx: &TypeContext<'_>, unbound: Unbound) -> Result<Type, UnresolvedReferenceError> {
        if !self.contains_references() {
            return Ok(self.clone());
        }
        match *self.kind() {
            TypeKind::Reference { index, owner } => match ctx.binding_for(index, owner) {
                Some(binding) => Ok(compose_optional(&binding, self.is_optional())),
                None if unbound == Unbound::Keep => Ok(self.clone()),
                None => Err(UnresolvedReferenceError::Generic { index, owner }),
            },
            TypeKind::LocalReference { index, procedure } => {
                match ctx.procedure_binding_for(index, procedure) {
                    Some(binding) => Ok(compose_optional(&binding, self.is_optional())),
                    None if unbound == Unbound::Keep => Ok(self.clone()),
                    None => Err(UnresolvedReferenceError::Procedure { index, procedure }),
                }
            }
            _ => {
                let arguments = self
                    .generic_arguments()
                    .iter()
                    .map(|argument| argument.substitute(ctx, unbound))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.with_arguments(arguments))
            }
        }
    }

    /// Substitute `owner`'s references in `self` with `arguments`, as given
    /// by a subclass instantiation of `owner`.
    ///
    /// Returns the substituted type and whether any substitution happened.
    /// References to other owners, and indices `arguments` does not cover,
    /// are left in place.
    pub fn resolve_on_super_arguments(&self, owner: GenericOwner, arguments: &[Type]) -> (Type, bool) {
        if !self.contains_references() {
            return (self.clone(), false);
        }
        match *self.kind() {
            TypeKind::Reference {
                index,
                owner: reference_owner,
            } if reference_owner == owner => match arguments.get(usize::from(index)) {
                Some(argument) => (compose_optional(argument, self.is_optional()), true),
                None => (self.clone(), false),
            },
            TypeKind::Reference { .. } | TypeKind::LocalReference { .. } => (self.clone(), false),
            _ => {
                let mut resolved = false;
                let substituted = self
                    .generic_arguments()
                    .iter()
                    .map(|argument| {
                        let (ty, changed) = argument.resolve_on_super_arguments(owner, arguments);
                        resolved |= changed;
                        ty
                    })
                    .collect();
                (self.with_arguments(substituted), resolved)
            }
        }
    }

    /// View a class instantiation as an instantiation of `target`, which must
    /// be the class itself or one of its ancestors.
    ///
    /// Returns `None` for non-class types and unrelated classes. The result
    /// keeps `self`'s optionality.
    pub fn instantiate_as(&self, target: ClassId, declarations: &Declarations) -> Option<Type> {
        let TypeKind::Class { class, .. } = self.kind() else {
            return None;
        };
        if !declarations.inherits_from(*class, target) {
            return None;
        }
        let mut current = self.non_optional();
        loop {
            let TypeKind::Class { class, arguments } = current.kind() else {
                return None;
            };
            if *class == target {
                return Some(current.with_optional(self.is_optional()));
            }
            let superclass = declarations.superclass(*class)?;
            let (lifted, substituted) =
                superclass.resolve_on_super_arguments(GenericOwner::Class(*class), arguments);
            tracing::trace!(?class, substituted, "lifted onto superclass");
            current = lifted;
        }
    }

    /// The instantiation of `protocol` that `self` conforms to, looking
    /// through the superclass chain of classes.
    pub fn conformance_to(&self, protocol: ProtocolId, declarations: &Declarations) -> Option<Type> {
        let is_target = |conformance: &&Type| {
            matches!(conformance.kind(), TypeKind::Protocol { protocol: p, .. } if *p == protocol)
        };
        match self.kind() {
            TypeKind::Enum(id) => declarations
                .enumeration(*id)
                .conformances
                .iter()
                .find(is_target)
                .cloned(),
            TypeKind::Class { class, .. } => {
                let mut current = self.non_optional();
                let mut next = Some(*class);
                while let Some(class) = next {
                    let decl = declarations.class(class);
                    if let Some(conformance) = decl.conformances.iter().find(is_target) {
                        let (ty, _) = conformance
                            .resolve_on_super_arguments(GenericOwner::Class(class), current.generic_arguments());
                        return Some(ty);
                    }
                    let superclass = decl.superclass.as_ref()?;
                    current = superclass
                        .resolve_on_super_arguments(GenericOwner::Class(class), current.generic_arguments())
                        .0;
                    next = match current.kind() {
                        TypeKind::Class { class, .. } => Some(*class),
                        _ => None,
                    };
                }
                None
            }
            _ => None,
        }
    }

    /// The declared upper bound of a `Reference` or `LocalReference`,
    /// written in the declaring context. Optionality composes.
    ///
    /// Any other type is its own bound.
    pub fn type_constraint_for_reference(&self, ctx: &TypeContext<'_>) -> Type {
        let declarations = ctx.declarations();
        let (index, params) = match *self.kind() {
            TypeKind::Reference { index, owner } => (index, declarations.generic_params(owner)),
            TypeKind::LocalReference { index, procedure } => {
                (index, declarations.procedure(procedure).generic_params.as_slice())
            }
            _ => return self.clone(),
        };
        match params.get(usize::from(index)) {
            Some(param) => compose_optional(&param.constraint, self.is_optional()),
            None => panic!("internal compiler error: reference {self:?} is out of range"),
        }
    }
}

impl TypeDecl {
    /// The type this declaration denotes inside its own body.
    pub fn self_type(self, declarations: &Declarations) -> Type {
        match self {
            TypeDecl::Class(id) => Type::self_view(GenericOwner::Class(id), declarations),
            TypeDecl::Protocol(id) => Type::self_view(GenericOwner::Protocol(id), declarations),
            TypeDecl::Enum(id) => Type::enumeration(id),
        }
    }
}

fn compose_optional(binding: &Type, optional: bool) -> Type {
    if optional && !binding.is_optional() {
        binding.as_optional()
    } else {
        binding.clone()
    }
}
