//! Tokens of the type-expression language.

use std::fmt;

use crate::{Name, Span};

/// Token kinds.
///
/// Type expressions are written in emoji. The structural emoji get their
/// own kinds; every other emoji is carried as an interned `Emoji(Name)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// 🍬 marks the following type as optional.
    Optional,
    /// 🔶 introduces an explicit namespace emoji.
    Namespace,
    /// 🐚 introduces one generic argument.
    GenericArgument,
    /// 🐕 the dynamic class type of the enclosing declaration.
    DynamicSelf,
    /// 🍇 opens a callable type.
    BlockOpen,
    /// 🍉 closes a callable type.
    BlockClose,
    /// ➡️ separates callable parameters from the return type.
    ReturnArrow,
    /// Any other emoji (type and namespace names).
    Emoji(Name),
    /// Identifier; names a generic type variable.
    Variable(Name),
    /// Unrecognized input.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human-readable description used in "expected X, found Y" messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Optional => "🍬",
            TokenKind::Namespace => "🔶",
            TokenKind::GenericArgument => "🐚",
            TokenKind::DynamicSelf => "🐕",
            TokenKind::BlockOpen => "🍇",
            TokenKind::BlockClose => "🍉",
            TokenKind::ReturnArrow => "➡️",
            TokenKind::Emoji(_) => "emoji",
            TokenKind::Variable(_) => "variable",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Emoji(name) => write!(f, "Emoji({})", name.raw()),
            TokenKind::Variable(name) => write!(f, "Variable({})", name.raw()),
            other => f.write_str(other.describe()),
        }
    }
}

/// A token with its source location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Lexer output. Always terminated by exactly one `Eof` token.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Build a list, appending an `Eof` token at `eof` if the tokens lack one.
    pub fn new(mut tokens: Vec<Token>, eof: Span) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, eof));
        }
        TokenList { tokens }
    }

    /// Number of tokens including the trailing `Eof`.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the list holds nothing but `Eof`.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    /// Token at `index`, clamped to the trailing `Eof`.
    pub fn get(&self, index: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[index.min(last)]
    }

    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(|t| t.kind)
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Token;
    crate::static_assert_size!(Token, 16);
}
