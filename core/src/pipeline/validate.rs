//! Structural preconditions for augmentation.

use super::collect::{DeclarationIndex, TypeCandidate};
use crate::descriptor::MarkerDescriptor;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::syntax::{Member, Modifier, TypeDecl};

/// Outcome of validating one confirmed candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Diagnostic),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Check `candidate` against every precondition, stopping at the first
/// failure.
///
/// Order: the type is `partial`, every containing type is `partial`, the type
/// is not `static`, and it does not already declare a parameterless
/// [`method_name`](MarkerDescriptor::method_name).
///
/// The last two look at every declaration of the type in `declarations`, not
/// only the marked one.
pub fn validate(
    candidate: &TypeCandidate<'_>,
    declarations: &DeclarationIndex<'_>,
    marker: &MarkerDescriptor,
) -> Verdict {
    let type_name = candidate.display_name();
    let parts = declarations.declarations(&candidate.qualified_name());
    let every_part = || std::iter::once(candidate.decl).chain(parts.iter().copied());
    let reject = |kind| Verdict::Rejected(Diagnostic::new(kind, Some(candidate.location())));

    if !candidate.decl.has_modifier(Modifier::Partial) {
        return reject(DiagnosticKind::MissingPartialModifier { type_name });
    }

    if let Some(outer) = candidate
        .containing
        .iter()
        .find(|outer| !outer.has_modifier(Modifier::Partial))
    {
        return reject(DiagnosticKind::ContainingTypeNotPartial {
            type_name,
            containing: outer.display_name(),
        });
    }

    if every_part().any(|decl| decl.has_modifier(Modifier::Static)) {
        return reject(DiagnosticKind::StaticType { type_name });
    }

    if every_part().any(|decl| declares_method(decl, marker.method_name)) {
        return reject(DiagnosticKind::ToStringAlreadyDefined { type_name });
    }

    Verdict::Accepted
}

/// A parameterless method called `name`.
fn declares_method(decl: &TypeDecl, name: &str) -> bool {
    decl.members.iter().any(|member| {
        matches!(member, Member::Method(method)
            if method.arity == 0 && method.name.unescaped() == name)
    })
}
