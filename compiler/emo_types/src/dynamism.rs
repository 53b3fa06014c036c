//! Parse-position permissions for dynamic and generic types.
//!
//! `TypeDynamism` is threaded through the parser by the caller, who knows the
//! syntactic position of the type expression. It is never stored on a `Type`.

use bitflags::bitflags;

bitflags! {
    /// Which dynamic constructs a type expression may contain.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeDynamism: u8 {
        /// Generic type variables (`T`) of the enclosing declaration or procedure.
        const ALLOW_GENERIC_TYPE_VARIABLES = 1 << 0;
        /// The dynamic class type 🐕.
        const ALLOW_DYNAMIC_CLASS_TYPE = 1 << 1;
    }
}

impl TypeDynamism {
    /// Only concrete types, e.g. instance variables of a non-generic class.
    pub const NONE: Self = Self::empty();

    #[inline]
    pub const fn allows_generic_variables(self) -> bool {
        self.contains(Self::ALLOW_GENERIC_TYPE_VARIABLES)
    }

    #[inline]
    pub const fn allows_dynamic_self(self) -> bool {
        self.contains(Self::ALLOW_DYNAMIC_CLASS_TYPE)
    }
}

impl Default for TypeDynamism {
    fn default() -> Self {
        Self::NONE
    }
}
