//! Rendering types back into type-expression syntax.
//!
//! With namespaces and optionality included, the output parses back to an
//! identical type unless a generic instantiation appears as a generic argument
//! other than the last one. 🐚 arguments are taken greedily, so in
//! `🍯🐚📦🐚🚂🐚👌` the 📦 takes both arguments; such a type has no written form.

use std::fmt;

use emo_ir::{Name, StringInterner};

use crate::decl::Declarations;
use crate::ty::{Type, TypeKind};

impl Type {
    /// Render `self`. With `include_ns_and_optional`, optional types are
    /// prefixed with 🍬 and every named type with 🔶 and its namespace.
    pub fn to_string_with(
        &self,
        declarations: &Declarations,
        interner: &StringInterner,
        include_ns_and_optional: bool,
    ) -> String {
        let mut out = String::new();
        let printer = Printer {
            declarations,
            interner,
            full: include_ns_and_optional,
        };
        printer.write_type(self, &mut out);
        out
    }

    /// `Display` adapter for diagnostics: namespaces and optionality included.
    pub fn display<'a>(
        &'a self,
        declarations: &'a Declarations,
        interner: &'a StringInterner,
    ) -> TypeDisplay<'a> {
        TypeDisplay {
            ty: self,
            declarations,
            interner,
        }
    }
}

/// Returned by [`Type::display`].
pub struct TypeDisplay<'a> {
    ty: &'a Type,
    declarations: &'a Declarations,
    interner: &'a StringInterner,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ty.to_string_with(self.declarations, self.interner, true))
    }
}

struct Printer<'a> {
    declarations: &'a Declarations,
    interner: &'a StringInterner,
    full: bool,
}

impl Printer<'_> {
    fn write_type(&self, ty: &Type, out: &mut String) {
        if self.full && ty.is_optional() {
            out.push('🍬');
        }
        match ty.kind() {
            TypeKind::Class { class, arguments } => {
                let decl = self.declarations.class(*class);
                self.write_named(decl.namespace, decl.name, out);
                self.write_arguments(arguments, out);
            }
            TypeKind::Protocol {
                protocol,
                arguments,
            } => {
                let decl = self.declarations.protocol(*protocol);
                self.write_named(decl.namespace, decl.name, out);
                self.write_arguments(arguments, out);
            }
            TypeKind::Enum(id) => {
                let decl = self.declarations.enumeration(*id);
                self.write_named(decl.namespace, decl.name, out);
            }
            TypeKind::Reference { index, owner } => {
                let param = &self.declarations.generic_params(*owner)[usize::from(*index)];
                self.write_variable(param.name, out);
            }
            TypeKind::LocalReference { index, procedure } => {
                let param = &self.declarations.procedure(*procedure).generic_params[usize::from(*index)];
                self.write_variable(param.name, out);
            }
            TypeKind::Callable(types) => {
                out.push('🍇');
                if let Some((ret, params)) = types.split_last() {
                    for param in params {
                        self.write_type(param, out);
                    }
                    if *ret != Type::NOTHINGNESS {
                        out.push_str("➡️");
                        self.write_type(ret, out);
                    }
                }
                out.push('🍉');
            }
            primitive => {
                if self.full {
                    out.push('🔶');
                    out.push_str(self.interner.lookup(Name::GLOBAL_NAMESPACE));
                }
                out.push_str(primitive_emoji(primitive));
            }
        }
    }

    fn write_named(&self, namespace: Name, name: Name, out: &mut String) {
        if self.full {
            out.push('🔶');
            out.push_str(self.interner.lookup(namespace));
        }
        out.push_str(self.interner.lookup(name));
    }

    fn write_arguments(&self, arguments: &[Type], out: &mut String) {
        for argument in arguments {
            out.push('🐚');
            self.write_type(argument, out);
        }
    }

    /// Adjacent variables need a separator to lex apart.
    fn write_variable(&self, name: Name, out: &mut String) {
        if out.ends_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            out.push(' ');
        }
        out.push_str(self.interner.lookup(name));
    }
}

/// Emoji of a built-in type in 🔴.
pub(crate) fn primitive_emoji(kind: &TypeKind) -> &'static str {
    match kind {
        TypeKind::Boolean => "👌",
        TypeKind::Integer => "🚂",
        TypeKind::Symbol => "🔣",
        TypeKind::Double => "🚀",
        TypeKind::Nothingness => "✨",
        TypeKind::Something => "⚪️",
        TypeKind::SomeObject => "🔵",
        _ => "",
    }
}
