#![no_main]

use libfuzzer_sys::fuzz_target;
use reprgen::{Compilation, GeneratorConfig, ParseConfig, SyntaxTree};

// Trees no parser would produce: dangling scope ids, empty names, odd spans.
fuzz_target!(|trees: Vec<SyntaxTree>| {
    let compilation: Compilation = trees.into_iter().collect();
    let generator = reprgen::generator(ParseConfig::DEFAULT, GeneratorConfig::DEFAULT);
    if let Ok(output) = generator.generate(&compilation) {
        assert!(!output.sources.is_empty());
    }
});
