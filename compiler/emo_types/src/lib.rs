//! Static type engine for emoc.
//!
//! Answers three questions for the rest of the compiler:
//! - what a type expression means (`TypeParser`)
//! - whether one type is usable where another is expected
//!   (`Type::compatible_to`, `Type::identical_to`)
//! - what a generic placeholder denotes in a given context
//!   (`Type::resolve_on` and friends)
//!
//! # Generic references
//!
//! Inside a generic declaration its parameters appear as `Reference`s
//! (class and protocol parameters) or `LocalReference`s (procedure
//! parameters). A `TypeContext` supplies their bindings. Types stored in
//! declarations keep their references; they are resolved whenever they are
//! projected onto a concrete instantiation or call site.
//!
//! # Declarations
//!
//! `Declarations` must be complete before any type is parsed or resolved.
//! The engine only reads it, so everything here is single-threaded and free
//! of interior mutability.

mod common;
mod compat;
mod context;
mod decl;
mod dynamism;
mod error;
mod format;
mod parse;
mod resolve;
mod ty;

#[cfg(test)]
mod test_support;

pub use common::CommonTypeFinder;
pub use context::TypeContext;
pub use decl::{
    Ancestors, ClassDecl, ClassId, DeclarationError, Declarations, EnumDecl, EnumId, GenericOwner,
    GenericParam, ProcedureDecl, ProcedureId, ProtocolDecl, ProtocolId, TypeDecl, Variance,
};
pub use dynamism::TypeDynamism;
pub use error::{DynamicConstruct, TypeError, TypeErrorKind};
pub use format::TypeDisplay;
pub use parse::{FetchedType, TypeName, TypeParser};
pub use resolve::UnresolvedReferenceError;
pub use ty::{GenericTypeBuilder, Type, TypeKind};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Calling it again is a no-op.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ClassId, GenericOwner, ProcedureId};
    emo_ir::static_assert_size!(ClassId, 4);
    emo_ir::static_assert_size!(ProcedureId, 4);
    emo_ir::static_assert_size!(GenericOwner, 8);
}
