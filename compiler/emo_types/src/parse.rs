//! Type-expression parser.
//!
//! Grammar over the token stream:
//!
//! ```text
//! type      := '🍬'? base
//! base      := '🐕'
//!            | Variable
//!            | '🍇' type* ( '➡️' type )? '🍉'
//!            | ( '🔶' Emoji )? Emoji generics
//! generics  := ( '🐚' type )*
//! ```
//!
//! Names are looked up in the declaration tables as they are parsed, so the
//! parser returns finished `Type`s. Generic-argument parsing is greedy: a
//! nested generic type takes every 🐚 that follows it.

use emo_ir::{Name, Span, StringInterner, Token, TokenKind, TokenList};

use crate::context::TypeContext;
use crate::decl::{Declarations, GenericOwner, TypeDecl};
use crate::dynamism::TypeDynamism;
use crate::error::{DynamicConstruct, TypeError};
use crate::ty::{param_index, GenericTypeBuilder, Type};

/// A possibly namespaced, possibly optional type name.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TypeName {
    pub name: Name,
    /// 🔴 unless a 🔶 namespace was written.
    pub namespace: Name,
    pub optional: bool,
    /// Span of the name emoji.
    pub span: Span,
    /// Span of the namespace emoji, if one was written.
    pub namespace_span: Option<Span>,
}

/// A parsed type and whether it is dynamic (🐕 or a generic variable).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FetchedType {
    pub ty: Type,
    pub dynamic: bool,
}

/// Parser over a `TokenList`.
pub struct TypeParser<'a> {
    tokens: &'a TokenList,
    pos: usize,
    declarations: &'a Declarations,
    interner: &'a StringInterner,
}

impl<'a> TypeParser<'a> {
    pub fn new(tokens: &'a TokenList, declarations: &'a Declarations, interner: &'a StringInterner) -> Self {
        TypeParser {
            tokens,
            pos: 0,
            declarations,
            interner,
        }
    }

    /// Index of the next token.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn peek(&self) -> Token {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Span of the last consumed token.
    fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens.get(prev).span,
            None => Span::point(self.peek().span.start),
        }
    }

    fn expect_emoji(&mut self) -> Result<(Name, Span), TypeError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Emoji(name) => {
                self.bump();
                Ok((name, token.span))
            }
            other => Err(TypeError::expected_type(other.describe(), token.span)),
        }
    }

    /// Parse `'🍬'? ('🔶' Emoji)? Emoji` without looking the name up.
    pub fn parse_type_name(&mut self) -> Result<TypeName, TypeError> {
        let optional = self.eat(TokenKind::Optional);
        let (namespace, namespace_span) = if self.eat(TokenKind::Namespace) {
            let token = self.peek();
            match token.kind {
                TokenKind::Emoji(namespace) => {
                    self.bump();
                    (namespace, Some(token.span))
                }
                other => {
                    return Err(TypeError::unexpected_token(
                        "a namespace emoji",
                        other.describe(),
                        token.span,
                    ))
                }
            }
        } else {
            (Name::GLOBAL_NAMESPACE, None)
        };
        let (name, span) = self.expect_emoji()?;
        Ok(TypeName {
            name,
            namespace,
            optional,
            span,
            namespace_span,
        })
    }

    /// Parse one type expression and look up every name in it.
    #[tracing::instrument(level = "trace", skip_all, fields(pos = self.pos))]
    pub fn parse_and_fetch_type(
        &mut self,
        ctx: &TypeContext<'_>,
        dynamism: TypeDynamism,
    ) -> Result<FetchedType, TypeError> {
        let start = self.pos;
        let optional = self.eat(TokenKind::Optional);
        let token = self.peek();
        match token.kind {
            TokenKind::DynamicSelf => {
                self.bump();
                if !dynamism.allows_dynamic_self() {
                    return Err(TypeError::restricted_dynamic_type(
                        DynamicConstruct::DynamicSelf,
                        token.span,
                    ));
                }
                let normal = ctx.normal_type();
                Ok(FetchedType {
                    ty: normal.with_optional(optional || normal.is_optional()),
                    dynamic: true,
                })
            }
            TokenKind::Variable(name) => {
                self.bump();
                if !dynamism.allows_generic_variables() {
                    return Err(TypeError::restricted_dynamic_type(
                        DynamicConstruct::GenericVariable(self.interner.lookup(name).to_owned()),
                        token.span,
                    ));
                }
                let ty = self.lookup_variable(name, ctx).ok_or_else(|| {
                    TypeError::unknown_type(
                        self.interner.lookup(name),
                        self.interner.lookup(Name::GLOBAL_NAMESPACE),
                        token.span,
                    )
                })?;
                Ok(FetchedType {
                    ty: ty.with_optional(optional),
                    dynamic: true,
                })
            }
            TokenKind::BlockOpen => {
                self.bump();
                let callable = self.parse_callable(ctx, dynamism)?;
                Ok(FetchedType {
                    ty: callable.ty.with_optional(optional),
                    dynamic: callable.dynamic,
                })
            }
            TokenKind::Namespace | TokenKind::Emoji(_) => {
                self.pos = start;
                let type_name = self.parse_type_name()?;
                self.fetch_named(type_name, ctx, dynamism)
            }
            other => Err(TypeError::expected_type(other.describe(), token.span)),
        }
    }

    /// Parse a whole token list as exactly one type.
    pub fn parse_complete(
        &mut self,
        ctx: &TypeContext<'_>,
        dynamism: TypeDynamism,
    ) -> Result<FetchedType, TypeError> {
        let fetched = self.parse_and_fetch_type(ctx, dynamism)?;
        self.expect_end()?;
        Ok(fetched)
    }

    /// Fail unless every token has been consumed.
    pub fn expect_end(&self) -> Result<(), TypeError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => Ok(()),
            other => Err(TypeError::unexpected_token(
                "end of type",
                other.describe(),
                token.span,
            )),
        }
    }

    /// Procedure parameters shadow those of the enclosing declaration.
    fn lookup_variable(&self, name: Name, ctx: &TypeContext<'_>) -> Option<Type> {
        if let Some(procedure) = ctx.procedure() {
            let params = &self.declarations.procedure(procedure).generic_params;
            if let Some(index) = params.iter().position(|param| param.name == name) {
                return Some(Type::local_reference(param_index(index), procedure));
            }
        }
        let owner = ctx.normal_type().generic_owner()?;
        let index = self
            .declarations
            .generic_params(owner)
            .iter()
            .position(|param| param.name == name)?;
        Some(Type::reference(param_index(index), owner))
    }

    /// After 🍇: parameters, an optional ➡️ return type, then 🍉.
    fn parse_callable(
        &mut self,
        ctx: &TypeContext<'_>,
        dynamism: TypeDynamism,
    ) -> Result<FetchedType, TypeError> {
        let mut params = Vec::new();
        let mut dynamic = false;
        loop {
            match self.peek().kind {
                TokenKind::BlockClose | TokenKind::ReturnArrow => break,
                TokenKind::Eof => {
                    let token = self.peek();
                    return Err(TypeError::unexpected_token("🍉", token.kind.describe(), token.span));
                }
                _ => {
                    let param = self.parse_and_fetch_type(ctx, dynamism)?;
                    dynamic |= param.dynamic;
                    params.push(param.ty);
                }
            }
        }
        let ret = if self.eat(TokenKind::ReturnArrow) {
            let ret = self.parse_and_fetch_type(ctx, dynamism)?;
            dynamic |= ret.dynamic;
            ret.ty
        } else {
            Type::NOTHINGNESS
        };
        let token = self.peek();
        if !self.eat(TokenKind::BlockClose) {
            return Err(TypeError::unexpected_token("🍉", token.kind.describe(), token.span));
        }
        Ok(FetchedType {
            ty: Type::callable(params, ret),
            dynamic,
        })
    }

    fn fetch_named(
        &mut self,
        type_name: TypeName,
        ctx: &TypeContext<'_>,
        dynamism: TypeDynamism,
    ) -> Result<FetchedType, TypeError> {
        let TypeName {
            name,
            namespace,
            optional,
            span,
            namespace_span,
        } = type_name;

        if namespace == Name::GLOBAL_NAMESPACE {
            if let Some(primitive) = primitive_named(self.interner.lookup(name)) {
                return Ok(FetchedType {
                    ty: primitive.with_optional(optional),
                    dynamic: false,
                });
            }
        }

        let Some(decl) = self.declarations.lookup(namespace, name) else {
            if !self.declarations.has_namespace(namespace) {
                return Err(TypeError::unknown_namespace(
                    self.interner.lookup(namespace),
                    namespace_span.unwrap_or(span),
                ));
            }
            return Err(TypeError::unknown_type(
                self.interner.lookup(name),
                self.interner.lookup(namespace),
                span,
            ));
        };
        tracing::trace!(?decl, "fetched type");

        let owner = match decl {
            TypeDecl::Enum(id) => {
                return Ok(FetchedType {
                    ty: Type::enumeration(id).with_optional(optional),
                    dynamic: false,
                })
            }
            TypeDecl::Class(id) => GenericOwner::Class(id),
            TypeDecl::Protocol(id) => GenericOwner::Protocol(id),
        };
        let mut builder = GenericTypeBuilder::new(owner, optional);
        let dynamic = if self.declarations.generic_params(owner).is_empty() {
            false
        } else {
            self.parse_generic_arguments(&mut builder, ctx, dynamism, span)?
        };
        Ok(FetchedType {
            ty: builder.finish(),
            dynamic,
        })
    }

    /// Parse every following `🐚 type` into `builder`, validating each
    /// argument against its parameter's constraint.
    ///
    /// A count mismatch is reported at the first surplus argument, or at
    /// `error_span` when arguments are missing. Returns whether any argument
    /// was dynamic.
    pub fn parse_generic_arguments(
        &mut self,
        builder: &mut GenericTypeBuilder,
        ctx: &TypeContext<'_>,
        dynamism: TypeDynamism,
        error_span: Span,
    ) -> Result<bool, TypeError> {
        let arity = self.declarations.generic_params(builder.owner()).len();
        let mut dynamic = false;
        let mut found = builder.arguments().len();
        let mut first_surplus = None;

        while self.eat(TokenKind::GenericArgument) {
            let first = self.peek().span;
            let argument = self.parse_and_fetch_type(ctx, dynamism)?;
            let span = first.merge(self.previous_span());
            dynamic |= argument.dynamic;
            if found < arity {
                self.validate_generic_argument(builder, &argument.ty, found, ctx, span)?;
                builder.push_argument(argument.ty);
            } else if first_surplus.is_none() {
                first_surplus = Some(span);
            }
            found += 1;
        }

        if found != arity {
            let (_, type_name) = self.declarations.decl_name(builder.owner().into());
            return Err(TypeError::generic_argument_count(
                self.interner.lookup(type_name),
                arity,
                found,
                first_surplus.unwrap_or(error_span),
            ));
        }
        Ok(dynamic)
    }

    /// Check `argument` against the constraint of parameter `index` of the
    /// builder's declaration.
    ///
    /// The constraint is resolved in the declaring type's own context, with
    /// the arguments given so far bound.
    pub fn validate_generic_argument(
        &self,
        builder: &GenericTypeBuilder,
        argument: &Type,
        index: usize,
        ctx: &TypeContext<'_>,
        span: Span,
    ) -> Result<(), TypeError> {
        let Some(param) = self.declarations.generic_params(builder.owner()).get(index) else {
            return Ok(());
        };
        let declaring = builder.partial_view(self.declarations);
        let declaring_ctx = TypeContext::new(self.declarations, &declaring);
        let constraint = param.constraint.resolve_lenient(&declaring_ctx);
        if argument.compatible_to(&constraint, ctx) {
            return Ok(());
        }
        Err(TypeError::generic_argument_bound(
            argument.to_string_with(self.declarations, self.interner, true),
            constraint.to_string_with(self.declarations, self.interner, true),
            span,
        ))
    }
}

/// Built-in types of 🔴, by their interned name.
fn primitive_named(name: &str) -> Option<Type> {
    let ty = match name {
        "👌" => Type::BOOLEAN,
        "🚂" => Type::INTEGER,
        "🔣" => Type::SYMBOL,
        "🚀" => Type::DOUBLE,
        "✨" => Type::NOTHINGNESS,
        "⚪" => Type::SOMETHING,
        "🔵" => Type::SOMEOBJECT,
        _ => return None,
    };
    Some(ty)
}
