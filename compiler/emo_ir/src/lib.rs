//! Leaf data shared by every emoc compiler crate.
//!
//! - `Span` for source locations
//! - `Name` handles for interned identifiers and emoji
//! - `Token`, `TokenKind` and `TokenList` for lexer output
//!
//! Everything here is `Copy` or cheap to clone and carries no references
//! into other crates.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod span;
mod token;

pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
