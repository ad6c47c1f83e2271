use divan::{Bencher, black_box};
use reprgen::{GeneratorConfig, ParseConfig};

fn main() {
    divan::main();
}

/// A source with `count` marked classes of a few properties each.
fn generate_source(count: usize) -> String {
    let mut result = String::with_capacity(count * 200);
    result.push_str("using ToStringGenerator;\nnamespace Bench\n{\n");
    for i in 0..count {
        result.push_str(&format!(
            "    [ToStringGenerator]\n    public partial class Model{i}\n    {{\n        public int Id {{ get; set; }}\n        public string Name {{ get; set; }} = \"\";\n        public List<string> Tags {{ get; }} = new();\n        public override bool Equals(object? other) => other is Model{i};\n    }}\n"
        ));
    }
    result.push_str("}\n");
    result
}

#[divan::bench(args = [10, 100, 1000])]
fn parse(bencher: Bencher, n: usize) {
    let input = generate_source(n);

    bencher.bench(|| black_box(reprgen::parse_source("Bench.cs", &input, &ParseConfig::DEFAULT)));
}

#[divan::bench(args = [10, 100, 1000])]
fn generate(bencher: Bencher, n: usize) {
    let input = generate_source(n);
    let compilation = reprgen::compile([("Bench.cs", input.as_str())], &ParseConfig::DEFAULT)
        .unwrap_or_default();
    let generator = reprgen::generator(ParseConfig::DEFAULT, GeneratorConfig::DEFAULT);

    bencher.bench(|| black_box(generator.generate(&compilation)));
}
