//! User-facing type errors.
//!
//! Errors carry rendered names rather than handles so they can be reported
//! without the interner or the declaration tables.

use std::fmt;

use emo_diagnostic::{Diagnostic, ErrorCode};
use emo_ir::Span;

/// A type error located at the offending token.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TypeErrorKind {
    #[error("could not find type {name} in namespace {namespace}")]
    UnknownType { name: String, namespace: String },
    #[error("namespace {namespace} does not exist")]
    UnknownNamespace { namespace: String },
    #[error("type {type_name} requires {expected} generic arguments, but {found} were given")]
    GenericArgumentCount {
        type_name: String,
        expected: usize,
        found: usize,
    },
    #[error("generic argument {argument} is not compatible to constraint {constraint}")]
    GenericArgumentBound { argument: String, constraint: String },
    #[error("{construct} is not allowed here")]
    RestrictedDynamicType { construct: DynamicConstruct },
    #[error("expected a type, found {found}")]
    ExpectedType { found: &'static str },
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
}

/// A dynamic construct rejected by the current `TypeDynamism`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DynamicConstruct {
    DynamicSelf,
    GenericVariable(String),
}

impl fmt::Display for DynamicConstruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicConstruct::DynamicSelf => write!(f, "dynamic type 🐕"),
            DynamicConstruct::GenericVariable(name) => write!(f, "generic type variable {name}"),
        }
    }
}

impl TypeError {
    pub fn unknown_type(name: impl Into<String>, namespace: impl Into<String>, span: Span) -> Self {
        TypeError {
            kind: TypeErrorKind::UnknownType {
                name: name.into(),
                namespace: namespace.into(),
            },
            span,
        }
    }

    pub fn unknown_namespace(namespace: impl Into<String>, span: Span) -> Self {
        TypeError {
            kind: TypeErrorKind::UnknownNamespace {
                namespace: namespace.into(),
            },
            span,
        }
    }

    pub fn generic_argument_count(
        type_name: impl Into<String>,
        expected: usize,
        found: usize,
        span: Span,
    ) -> Self {
        TypeError {
            kind: TypeErrorKind::GenericArgumentCount {
                type_name: type_name.into(),
                expected,
                found,
            },
            span,
        }
    }

    pub fn generic_argument_bound(
        argument: impl Into<String>,
        constraint: impl Into<String>,
        span: Span,
    ) -> Self {
        TypeError {
            kind: TypeErrorKind::GenericArgumentBound {
                argument: argument.into(),
                constraint: constraint.into(),
            },
            span,
        }
    }

    pub fn restricted_dynamic_type(construct: DynamicConstruct, span: Span) -> Self {
        TypeError {
            kind: TypeErrorKind::RestrictedDynamicType { construct },
            span,
        }
    }

    pub fn expected_type(found: &'static str, span: Span) -> Self {
        TypeError {
            kind: TypeErrorKind::ExpectedType { found },
            span,
        }
    }

    pub fn unexpected_token(expected: &'static str, found: &'static str, span: Span) -> Self {
        TypeError {
            kind: TypeErrorKind::UnexpectedToken { expected, found },
            span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            TypeErrorKind::UnknownType { .. } => ErrorCode::E2002,
            TypeErrorKind::UnknownNamespace { .. } => ErrorCode::E2003,
            TypeErrorKind::GenericArgumentCount { .. } => ErrorCode::E2004,
            TypeErrorKind::GenericArgumentBound { .. } => ErrorCode::E2005,
            TypeErrorKind::RestrictedDynamicType { .. } => ErrorCode::E2006,
            TypeErrorKind::ExpectedType { .. } => ErrorCode::E1002,
            TypeErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        match &self.kind {
            TypeErrorKind::UnknownType { .. } => diagnostic.with_label(self.span, "not found"),
            TypeErrorKind::UnknownNamespace { .. } => {
                diagnostic.with_label(self.span, "unknown namespace")
            }
            TypeErrorKind::GenericArgumentCount { expected, .. } => diagnostic
                .with_label(self.span, format!("expected {expected} generic arguments")),
            TypeErrorKind::GenericArgumentBound { constraint, .. } => diagnostic
                .with_label(self.span, "violates the parameter's constraint")
                .with_note(format!("the parameter is constrained to {constraint}")),
            TypeErrorKind::RestrictedDynamicType { construct } => {
                let diagnostic = diagnostic.with_label(self.span, "not allowed in this position");
                match construct {
                    DynamicConstruct::DynamicSelf => diagnostic
                        .with_suggestion("name the class explicitly instead of using 🐕"),
                    DynamicConstruct::GenericVariable(_) => diagnostic,
                }
            }
            TypeErrorKind::ExpectedType { .. } => diagnostic.with_label(self.span, "expected a type"),
            TypeErrorKind::UnexpectedToken { expected, .. } => {
                diagnostic.with_label(self.span, format!("expected {expected}"))
            }
        }
    }
}
