#![no_main]

use libfuzzer_sys::fuzz_target;
use reprgen::csharp::TokenStream;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        match TokenStream::lex(s) {
            Ok(stream) => {
                for tok in stream.all() {
                    assert!(tok.span.end <= s.len());
                    let _ = stream.slice(tok.span);
                }
            }
            Err(err) => {
                if let Some(span) = err.span() {
                    assert!(span.end <= s.len());
                }
            }
        }
    }
});
