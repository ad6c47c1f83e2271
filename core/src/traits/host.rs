use crate::diagnostic::Diagnostic;

/// The host's registration interfaces.
///
/// The driver calls these only after a pass has fully succeeded: first
/// [`register`](Host::register) for the marker definition and every generated
/// source, then [`report`](Host::report) for every diagnostic.
pub trait Host {
    /// Add a source to the compilation. `source_id` is unique within a pass.
    fn register(&mut self, source_id: &str, source_text: &str);

    /// Surface a diagnostic to the user.
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn register(&mut self, source_id: &str, source_text: &str) {
        (**self).register(source_id, source_text);
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}
