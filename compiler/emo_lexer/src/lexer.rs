use emo_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use logos::Logos;

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("🍬")]
    Optional,
    #[token("🔶")]
    Namespace,
    #[token("🐚")]
    GenericArgument,
    #[token("🐕")]
    DynamicSelf,
    #[token("🍇")]
    BlockOpen,
    #[token("🍉")]
    BlockClose,
    #[token("➡️")]
    #[token("➡")]
    ReturnArrow,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Variable,

    // One non-ASCII code point, optionally followed by the emoji
    // presentation selector.
    #[regex(r"[^\x00-\x7F\x{FE0F}]\x{FE0F}?")]
    Emoji,
}

/// Lex `source` into a `TokenList`, interning emoji and variable names.
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();
        let kind = match result {
            Ok(raw) => convert(raw, slice, interner),
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token::new(kind, span));
    }

    let eof = Span::from_range(source.len()..source.len());
    TokenList::new(tokens, eof)
}

fn convert(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        RawToken::Optional => TokenKind::Optional,
        RawToken::Namespace => TokenKind::Namespace,
        RawToken::GenericArgument => TokenKind::GenericArgument,
        RawToken::DynamicSelf => TokenKind::DynamicSelf,
        RawToken::BlockOpen => TokenKind::BlockOpen,
        RawToken::BlockClose => TokenKind::BlockClose,
        RawToken::ReturnArrow => TokenKind::ReturnArrow,
        RawToken::Variable => TokenKind::Variable(interner.intern(slice)),
        RawToken::Emoji => TokenKind::Emoji(interner.intern(slice)),
    }
}
