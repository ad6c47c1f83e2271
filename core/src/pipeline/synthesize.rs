//! Source synthesis for accepted candidates.
//!
//! A candidate is first lowered into a [`SourceUnit`], a small description of
//! the file to emit, which is then written through a [`Printer`]. Layout lives
//! entirely in the printer; the unit only decides what goes where.

use super::collect::TypeCandidate;
use crate::config::GeneratorConfig;
use crate::descriptor::MarkerDescriptor;
use crate::error::Error;
use crate::output::GeneratedSource;
use crate::syntax::{Modifier, TypeDecl, TypeKeyword};
use crate::traits::{Printer, ToSource};

/// Produce the generated source for one accepted candidate.
pub fn synthesize(
    candidate: &TypeCandidate<'_>,
    marker: &MarkerDescriptor,
    config: &GeneratorConfig,
) -> Result<GeneratedSource, Error> {
    let unit = SourceUnit::lower(candidate, marker)?;
    let source_id = marker.generated_source_id(&candidate.qualified_name());
    Ok(GeneratedSource::new(source_id, unit.to_source(config)))
}

/// One generated file: imports, namespace, type nesting and the method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit<'a> {
    pub import: &'a str,
    pub namespace: Option<String>,
    /// Outermost first, ending with the target type.
    pub types: Vec<TypeHeader<'a>>,
    pub method: RepresentationMethod<'a>,
}

impl<'a> SourceUnit<'a> {
    /// Lower `candidate`, rejecting data no front end should produce.
    pub fn lower(
        candidate: &TypeCandidate<'a>,
        marker: &'a MarkerDescriptor,
    ) -> Result<Self, Error> {
        let source_id = candidate.tree.source_id.as_str();

        let mut types = Vec::with_capacity(candidate.containing.len() + 1);
        for decl in candidate.containing.iter().copied() {
            types.push(TypeHeader::lower(source_id, decl)?);
        }
        types.push(TypeHeader::lower(source_id, candidate.decl)?);

        let mut members = Vec::new();
        for (idx, property) in candidate.decl.properties().enumerate() {
            if property.name.text.is_empty() {
                return Err(Error::malformed(
                    source_id,
                    format!(
                        "property {idx} of `{}` has an empty identifier",
                        candidate.display_name()
                    ),
                ));
            }
            members.push(property.name.text.as_str());
        }

        let namespace = (!candidate.namespace.is_empty()).then(|| candidate.namespace.to_string());

        Ok(Self {
            import: marker.namespace,
            namespace,
            types,
            method: RepresentationMethod {
                name: marker.method_name,
                separator: marker.separator,
                members,
            },
        })
    }
}

impl ToSource for SourceUnit<'_> {
    fn write<P: Printer>(&self, p: &mut P) {
        p.line(&format!("using {};", self.import));

        if let Some(namespace) = &self.namespace {
            p.line(&format!("namespace {namespace}"));
            p.open_block();
        }

        for header in &self.types {
            p.write(header);
            p.open_block();
        }

        p.write(&self.method);

        for _ in &self.types {
            p.close_block();
        }

        if self.namespace.is_some() {
            p.close_block();
        }
    }
}

/// `public partial class Name<T>` on its own line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHeader<'a> {
    pub modifiers: &'a [Modifier],
    pub keyword: TypeKeyword,
    pub name: String,
}

impl<'a> TypeHeader<'a> {
    fn lower(source_id: &str, decl: &'a TypeDecl) -> Result<Self, Error> {
        if decl.name.text.is_empty() {
            return Err(Error::malformed(
                source_id,
                format!("{} declaration has an empty identifier", decl.keyword),
            ));
        }
        if let Some(idx) = decl.type_params.iter().position(|p| p.text.is_empty()) {
            return Err(Error::malformed(
                source_id,
                format!("type parameter {idx} of `{}` is empty", decl.name),
            ));
        }
        Ok(Self {
            modifiers: &decl.modifiers,
            keyword: decl.keyword,
            name: decl.display_name(),
        })
    }
}

impl ToSource for TypeHeader<'_> {
    fn write<P: Printer>(&self, p: &mut P) {
        p.add_indent();
        for modifier in self.modifiers {
            p.write(modifier);
            p.space();
        }
        p.write(&self.keyword);
        p.space();
        p.word(&self.name);
        p.newline();
    }
}

/// The generated override.
///
/// Each member contributes one line, `name` + separator + the member's own
/// rendering, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepresentationMethod<'a> {
    pub name: &'a str,
    pub separator: &'a str,
    pub members: Vec<&'a str>,
}

impl ToSource for RepresentationMethod<'_> {
    fn write<P: Printer>(&self, p: &mut P) {
        let method = self.name;
        p.line(&format!("public override string {method}()"));
        p.open_block();
        p.line("var builder = new System.Text.StringBuilder();");
        for member in &self.members {
            p.line(&format!(
                "builder.AppendLine(\"{member}{sep}\" + {member}.{method}());",
                sep = self.separator
            ));
        }
        p.line(&format!("return builder.{method}();"));
        p.close_block();
    }
}
