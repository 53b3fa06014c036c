//! Common type of heterogeneous elements (collection literals).

use emo_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use emo_ir::Span;

use crate::context::TypeContext;
use crate::ty::Type;

/// Single-pass widening over the element types of a literal.
///
/// Each added type either fits the running type, replaces it when the running
/// type fits the new one, or collapses the result to ⚪️. This is not a least
/// upper bound search: two classes sharing an ancestor still widen to ⚪️.
#[derive(Clone, Debug)]
pub struct CommonTypeFinder {
    first_type_found: bool,
    common_type: Type,
    ambiguous: bool,
}

impl CommonTypeFinder {
    pub fn new() -> Self {
        CommonTypeFinder {
            first_type_found: false,
            common_type: Type::SOMETHING,
            ambiguous: false,
        }
    }

    /// Widen the running type with `ty`, resolved in `ctx`.
    pub fn add_type(&mut self, ty: &Type, ctx: &TypeContext<'_>) {
        let ty = ty.resolve_lenient(ctx);
        if !self.first_type_found {
            self.first_type_found = true;
            self.common_type = ty;
            return;
        }
        if ty.compatible_to(&self.common_type, ctx) {
            return;
        }
        if self.common_type.compatible_to(&ty, ctx) {
            self.common_type = ty;
            return;
        }
        tracing::trace!(?ty, common = ?self.common_type, "no common type, widening to something");
        self.common_type = Type::SOMETHING;
        self.ambiguous = true;
    }

    /// Whether widening collapsed to ⚪️ because two types were unrelated.
    pub fn is_ambiguous(&self) -> bool {
        self.ambiguous
    }

    /// The inferred type; ⚪️ if nothing was added.
    ///
    /// Emits a warning at `span` when the result is ambiguous.
    pub fn common_type(self, span: Span, diagnostics: &mut DiagnosticQueue) -> Type {
        if self.ambiguous {
            tracing::debug!(?span, "ambiguous common type");
            diagnostics.emit_warning(
                Diagnostic::warning(ErrorCode::W2001)
                    .with_message("type is ambiguous, inferred as ⚪️")
                    .with_label(span, "elements have no common type")
                    .with_suggestion("add a type annotation to state the intended type"),
            );
        }
        self.common_type
    }
}

impl Default for CommonTypeFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
