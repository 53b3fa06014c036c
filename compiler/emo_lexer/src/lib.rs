//! Lexer for emoji type expressions.
//!
//! Structural emoji (🍬 🔶 🐚 🐕 🍇 🍉 ➡️) get dedicated token kinds; any
//! other emoji becomes an interned `TokenKind::Emoji`, identifiers become
//! `TokenKind::Variable`. Whitespace is skipped and anything else is
//! reported as `TokenKind::Error` for the parser to diagnose.

mod lexer;

pub use lexer::lex;
