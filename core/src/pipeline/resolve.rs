//! Marker resolution by fully-qualified identity.

use super::collect::TypeCandidate;
use crate::descriptor::MarkerDescriptor;
use crate::syntax::Attribute;
use crate::traits::SemanticModel;

/// The first attribute on `candidate` whose resolved identity is the marker.
///
/// Unresolvable attributes count as non-matches. Further matching attributes
/// after the first are ignored.
pub fn find_marker<'a, M>(
    candidate: &TypeCandidate<'a>,
    model: &M,
    marker: &MarkerDescriptor,
) -> Option<&'a Attribute>
where
    M: SemanticModel + ?Sized,
{
    candidate.decl.all_attributes().find(|attribute| {
        match model.identity_of(
            candidate.tree,
            candidate.decl.scope,
            &candidate.containing,
            attribute,
        ) {
            Some(identity) => marker.matches(&identity),
            None => {
                log::trace!(attribute:% = attribute.name; "attribute did not resolve");
                false
            }
        }
    })
}

/// Whether any attribute on `candidate` resolves to the marker.
pub fn is_marked<M>(candidate: &TypeCandidate<'_>, model: &M, marker: &MarkerDescriptor) -> bool
where
    M: SemanticModel + ?Sized,
{
    find_marker(candidate, model, marker).is_some()
}
