#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reprgen::{GeneratorConfig, ParseConfig};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    sources: Vec<&'a str>,
    max_nesting_depth: u8,
    use_tabs: bool,
}

fuzz_target!(|input: Input<'_>| {
    let parse = ParseConfig::new().with_max_nesting_depth(usize::from(input.max_nesting_depth) + 1);
    let ids: Vec<String> = (0..input.sources.len()).map(|i| format!("Fuzz{i}.cs")).collect();
    let Ok(compilation) = reprgen::compile(
        ids.iter().map(String::as_str).zip(input.sources.iter().copied()),
        &parse,
    ) else {
        return;
    };

    let generator = reprgen::generator(parse, GeneratorConfig::new().with_tabs(input.use_tabs));
    if let Ok(first) = generator.generate(&compilation) {
        let second = generator.generate(&compilation).ok();
        assert_eq!(Some(&first), second.as_ref());
        for diagnostic in &first.diagnostics {
            if let Some(location) = diagnostic.location() {
                assert!(ids.contains(&location.source_id));
            }
        }
    }
});
