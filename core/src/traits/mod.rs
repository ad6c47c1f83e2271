//! Seams between the pipeline and its surroundings.
//!
//! # Trait Hierarchy
//!
//! ```text
//! Frontend (host parsing front end)
//!     ├── parse(source_id, text) -> SyntaxTree
//!     └── model(view) -> SemanticModel
//!
//! SemanticModel (attribute identity)
//!     └── identity_of(tree, scope, containing, attribute)
//!
//! ToSource (code generation)
//!     └── Printer (formatting)
//!
//! Host (registration)
//!     ├── register(source_id, text)
//!     └── report(diagnostic)
//! ```

mod host;
mod printer;
mod semantic;
mod to_source;

pub use host::Host;
pub use printer::{Printer, SourcePrinter};
pub use semantic::{Frontend, SemanticModel};
pub use to_source::ToSource;
