//! The opt-in marker.
//!
//! A [`MarkerDescriptor`] owns every literal the pipeline needs to know about
//! its marker: the names used for resolution, the definition source injected at
//! the start of each pass, and the names used in synthesized code. Nothing else
//! in the crate spells these strings out.

use crate::syntax::QualifiedName;

/// Static description of a marker attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerDescriptor {
    /// Namespace the marker is declared in.
    pub namespace: &'static str,
    /// Name users write, without the `Attribute` suffix.
    pub name: &'static str,
    /// Declared type name.
    pub type_name: &'static str,
    /// Fully-qualified declared type name.
    pub full_name: &'static str,
    /// Name of the bundled definition resource.
    pub resource_name: &'static str,
    /// Source id under which the definition is registered with the host.
    pub source_id: &'static str,
    /// Definition text, injected verbatim.
    pub source_text: &'static str,
    /// Method synthesized on every accepted type.
    pub method_name: &'static str,
    /// Text placed between a member's name and its rendering.
    pub separator: &'static str,
    /// Prefix of every generated source id.
    pub source_id_prefix: &'static str,
}

/// The `[ToStringGenerator]` marker.
pub const TO_STRING_GENERATOR: MarkerDescriptor = MarkerDescriptor {
    namespace: "ToStringGenerator",
    name: "ToStringGenerator",
    type_name: "ToStringGeneratorAttribute",
    full_name: "ToStringGenerator.ToStringGeneratorAttribute",
    resource_name: "ToStringGeneratorAttribute.cs",
    source_id: "Generated__ToStringGeneratorAttribute.cs",
    source_text: TO_STRING_GENERATOR_SOURCE,
    method_name: "ToString",
    separator: ":",
    source_id_prefix: "Generated_",
};

const TO_STRING_GENERATOR_SOURCE: &str = r#"namespace ToStringGenerator
{
    [System.AttributeUsage(System.AttributeTargets.Class | System.AttributeTargets.Struct, Inherited = false, AllowMultiple = false)]
    public sealed class ToStringGeneratorAttribute : System.Attribute
    {
    }
}
"#;

impl MarkerDescriptor {
    /// [`full_name`](Self::full_name) as a [`QualifiedName`].
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::parse(self.full_name)
    }

    /// [`namespace`](Self::namespace) as a [`QualifiedName`].
    pub fn namespace_name(&self) -> QualifiedName {
        QualifiedName::parse(self.namespace)
    }

    /// Whether `identity` is this marker.
    pub fn matches(&self, identity: &QualifiedName) -> bool {
        identity.to_string() == self.full_name
    }

    /// Generated source id for a fully-qualified type name.
    pub fn generated_source_id(&self, type_name: &QualifiedName) -> String {
        format!("{}{}", self.source_id_prefix, type_name)
    }
}

impl Default for MarkerDescriptor {
    fn default() -> Self {
        TO_STRING_GENERATOR
    }
}
