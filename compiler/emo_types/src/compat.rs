//! Subtyping and identity.
//!
//! `compatible_to` answers "can a value of `self` be used where `to` is
//! expected". Both sides are first resolved leniently against the context;
//! references that stay unbound are compared by identity and otherwise
//! through their declared bound.
//!
//! Rules, first match wins:
//! 1. ⚪️ accepts everything.
//! 2. ✨ is compatible with ✨ and with every optional type.
//! 3. An optional type is never compatible with a non-optional one.
//! 4. A reference is compatible with itself, and otherwise through its bound.
//! 5. 🔵 accepts class instances and 🔵.
//! 6. A class is compatible with its ancestors, with arguments lifted along
//!    the superclass chain.
//! 7. A class or enum is compatible with the protocols it conforms to.
//! 8. Instantiations of the same declaration compare their arguments by the
//!    declared variance (invariant: identical, covariant: compatible).
//! 9. Callables: return covariant, parameters contravariant.
//! 10. Primitives and ✨ are compatible with the same primitive.

use crate::context::TypeContext;
use crate::decl::{GenericOwner, Variance};
use crate::ty::{Type, TypeKind};

/// Bound chains longer than this are treated as cyclic.
const MAX_BOUND_DEPTH: u8 = 32;

impl Type {
    /// Whether `self` is usable wherever `to` is expected.
    pub fn compatible_to(&self, to: &Type, ctx: &TypeContext<'_>) -> bool {
        let from = self.resolve_lenient(ctx);
        let to = to.resolve_lenient(ctx);
        let compatible = from.compatible_resolved(&to, ctx, 0);
        tracing::trace!(?from, ?to, compatible, "compatible_to");
        compatible
    }

    /// Structural identity after resolving both sides in `ctx`: same kind,
    /// same declaration, same optionality, identical arguments.
    pub fn identical_to(&self, to: &Type, ctx: &TypeContext<'_>) -> bool {
        self == to || self.resolve_lenient(ctx) == to.resolve_lenient(ctx)
    }

    fn compatible_resolved(&self, to: &Type, ctx: &TypeContext<'_>, depth: u8) -> bool {
        if *to.kind() == TypeKind::Something {
            return true;
        }
        if *self.kind() == TypeKind::Nothingness {
            return to.is_optional() || *to.kind() == TypeKind::Nothingness;
        }
        if self.is_optional() && !to.is_optional() {
            return false;
        }

        if self.is_reference() {
            if self.kind() == to.kind() {
                return true;
            }
            if depth >= MAX_BOUND_DEPTH {
                tracing::debug!(?self, "bound chain too deep, treating as incompatible");
                return false;
            }
            let bound = self.type_constraint_for_reference(ctx).resolve_lenient(ctx);
            return bound.compatible_resolved(to, ctx, depth + 1);
        }
        if to.is_reference() {
            return false;
        }

        let declarations = ctx.declarations();
        match (self.kind(), to.kind()) {
            (_, TypeKind::SomeObject) => self.is_object_category(),
            (TypeKind::Class { .. }, TypeKind::Class { class, arguments }) => {
                match self.instantiate_as(*class, declarations) {
                    Some(lifted) => arguments_compatible(
                        GenericOwner::Class(*class),
                        lifted.generic_arguments(),
                        arguments,
                        ctx,
                        depth,
                    ),
                    None => false,
                }
            }
            (
                TypeKind::Protocol {
                    protocol: from_protocol,
                    arguments: from_arguments,
                },
                TypeKind::Protocol { protocol, arguments },
            ) => {
                from_protocol == protocol
                    && arguments_compatible(
                        GenericOwner::Protocol(*protocol),
                        from_arguments,
                        arguments,
                        ctx,
                        depth,
                    )
            }
            (TypeKind::Class { .. } | TypeKind::Enum(_), TypeKind::Protocol { protocol, arguments }) => {
                match self.conformance_to(*protocol, declarations) {
                    Some(conformance) => arguments_compatible(
                        GenericOwner::Protocol(*protocol),
                        conformance.generic_arguments(),
                        arguments,
                        ctx,
                        depth,
                    ),
                    None => false,
                }
            }
            (TypeKind::Enum(from), TypeKind::Enum(to)) => from == to,
            (TypeKind::Callable(from), TypeKind::Callable(to)) => {
                callables_compatible(from, to, ctx, depth)
            }
            (
                from @ (TypeKind::Boolean
                | TypeKind::Integer
                | TypeKind::Symbol
                | TypeKind::Double
                | TypeKind::Nothingness),
                to,
            ) => from == to,
            _ => false,
        }
    }
}

fn arguments_compatible(
    owner: GenericOwner,
    from: &[Type],
    to: &[Type],
    ctx: &TypeContext<'_>,
    depth: u8,
) -> bool {
    if from.len() != to.len() {
        return false;
    }
    let params = ctx.declarations().generic_params(owner);
    from.iter().zip(to).enumerate().all(|(index, (from, to))| {
        let variance = params.get(index).map_or(Variance::Invariant, |param| param.variance);
        match variance {
            Variance::Invariant => from == to,
            Variance::Covariant => from.compatible_resolved(to, ctx, depth),
        }
    })
}

/// `from` and `to` hold parameters followed by the return type.
fn callables_compatible(from: &[Type], to: &[Type], ctx: &TypeContext<'_>, depth: u8) -> bool {
    let (Some((from_return, from_params)), Some((to_return, to_params))) =
        (from.split_last(), to.split_last())
    else {
        return false;
    };
    from_params.len() == to_params.len()
        && from_return.compatible_resolved(to_return, ctx, depth)
        && to_params
            .iter()
            .zip(from_params)
            .all(|(expected, accepted)| expected.compatible_resolved(accepted, ctx, depth))
}
