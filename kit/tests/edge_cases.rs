//! Edge cases through the full C# pipeline.

use reprgen::{GeneratorConfig, ParseConfig, PassOutput};

fn run(sources: &[(&str, &str)]) -> PassOutput {
    let compilation = reprgen::compile(sources.iter().copied(), &ParseConfig::DEFAULT).unwrap();
    reprgen::generator(ParseConfig::DEFAULT, GeneratorConfig::DEFAULT)
        .generate(&compilation)
        .unwrap()
}

#[test]
fn generic_record_in_file_scoped_namespace() {
    let text = r#"using ToStringGenerator;
namespace Shapes;

[ToStringGenerator]
public sealed partial record Box<T>(T Value)
{
    public T Content { get; init; }
    public int Count => 1;
}
"#;
    let output = run(&[("Box.cs", text)]);

    assert!(output.diagnostics.is_empty());
    let source = output.source("Generated_Shapes.Box`1").unwrap();
    insta::assert_snapshot!(source.text.trim_end(), @r#"
    using ToStringGenerator;
    namespace Shapes
    {
        public sealed partial record Box<T>
        {
            public override string ToString()
            {
                var builder = new System.Text.StringBuilder();
                builder.AppendLine("Content:" + Content.ToString());
                builder.AppendLine("Count:" + Count.ToString());
                return builder.ToString();
            }
        }
    }
    "#);
}

#[test]
fn nested_verbatim_names_in_the_global_namespace() {
    let text = r#"
[ToStringGenerator.ToStringGenerator]
internal partial struct Outer
{
    [ToStringGenerator.ToStringGenerator]
    private partial record struct @event
    {
        public string @class { get; set; }
    }
}
"#;
    let output = run(&[("Event.cs", text)]);

    assert!(output.diagnostics.is_empty());
    let ids: Vec<&str> = output
        .generated()
        .iter()
        .map(|s| s.source_id.as_str())
        .collect();
    assert_eq!(ids, vec!["Generated_Outer", "Generated_Outer.event"]);

    let inner = output.source("Generated_Outer.event").unwrap();
    insta::assert_snapshot!(inner.text.trim_end(), @r#"
    using ToStringGenerator;
    internal partial struct Outer
    {
        private partial record struct @event
        {
            public override string ToString()
            {
                var builder = new System.Text.StringBuilder();
                builder.AppendLine("@class:" + @class.ToString());
                return builder.ToString();
            }
        }
    }
    "#);
}

#[test]
fn trivia_and_directives_are_ignored() {
    let text = r#"#nullable enable
// header comment
using ToStringGenerator;
#region Models
namespace Shop
{
    /* block comment */
    [ToStringGenerator]
    public partial class Tag
    {
        public string? Label { get; set; } // trailing
    }
}
#endregion
"#;
    let output = run(&[("Tag.cs", text)]);

    let source = output.source("Generated_Shop.Tag").unwrap();
    assert!(source.text.contains("builder.AppendLine(\"Label:\" + Label.ToString());"));
}

#[test_case::test_case("[ToStringGenerator, ToStringGenerator]"; "repeated in one list")]
#[test_case::test_case("[ToStringGenerator][ToStringGenerator]"; "repeated lists")]
#[test_case::test_case("[ToStringGenerator()]"; "empty argument list")]
#[test_case::test_case("[Serializable, ToStringGenerator]"; "alongside other attributes")]
#[test_case::test_case("[type: ToStringGenerator]"; "explicit target")]
fn marker_spellings_generate_once(attributes: &str) {
    let text = format!(
        "using ToStringGenerator;\nnamespace Shop {{ {attributes} public partial class Item {{ public int Id {{ get; }} }} }}"
    );
    let output = run(&[("Item.cs", &text)]);

    assert!(output.diagnostics.is_empty());
    assert_eq!(output.generated().len(), 1);
    assert_eq!(output.generated()[0].source_id, "Generated_Shop.Item");
}

#[test_case::test_case("public partial interface IShape { int Sides { get; } }"; "interface")]
#[test_case::test_case("public enum Color { Red, Green }"; "enum")]
fn declarations_without_instance_state_are_skipped(declaration: &str) {
    let text = format!("using ToStringGenerator;\n[ToStringGenerator]\n{declaration}");
    let output = run(&[("Shape.cs", &text)]);

    assert!(output.generated().is_empty());
    assert!(output.diagnostics.is_empty());
}

#[test]
fn generic_arity_keeps_overloads_apart() {
    let text = r#"using ToStringGenerator;
namespace Pairs
{
    [ToStringGenerator] public partial class Pair<T> { public T First { get; } }
    [ToStringGenerator] public partial class Pair<T, U> { public U Second { get; } }
}
"#;
    let output = run(&[("Pair.cs", text)]);

    assert!(output.diagnostics.is_empty());
    let ids: Vec<&str> = output
        .generated()
        .iter()
        .map(|s| s.source_id.as_str())
        .collect();
    assert_eq!(ids, vec!["Generated_Pairs.Pair`1", "Generated_Pairs.Pair`2"]);
}

#[test]
fn fields_and_methods_are_not_rendered() {
    let text = r#"using ToStringGenerator;
[ToStringGenerator]
public partial class Counter
{
    private int hits;
    public int Total { get; private set; }
    public void Hit() => hits++;
}
"#;
    let output = run(&[("Counter.cs", text)]);

    let source = output.source("Generated_Counter").unwrap();
    assert!(source.text.contains("\"Total:\""));
    assert!(!source.text.contains("hits"));
    assert!(!source.text.contains("Hit"));
}

#[test]
fn containing_type_attribute_hides_the_imported_marker() {
    let text = r#"using ToStringGenerator;
namespace Shop
{
    public partial class Outer
    {
        public class ToStringGeneratorAttribute : System.Attribute { }

        [ToStringGenerator]
        public partial class Inner { public int X { get; } }
    }
}
"#;
    let output = run(&[("Outer.cs", text)]);

    assert!(output.generated().is_empty());
    assert!(output.diagnostics.is_empty());
}

#[test_case::test_case("public override string ToString() => \"\";", "MYSG1004"; "override in another file")]
#[test_case::test_case("public string ToString(string format) => format;", ""; "overload in another file")]
fn other_parts_of_a_partial_type_are_checked(member: &str, code: &str) {
    let marked = "using ToStringGenerator;\nnamespace Shop { [ToStringGenerator] public partial class User { public string Name { get; set; } } }";
    let other = format!("namespace Shop {{ public partial class User {{ {member} }} }}");
    let output = run(&[("User.cs", marked), ("User.Format.cs", other.as_str())]);

    let codes: Vec<&str> = output.diagnostics.iter().map(|d| d.code().as_str()).collect();
    if code.is_empty() {
        assert!(codes.is_empty());
        assert!(output.source("Generated_Shop.User").is_some());
    } else {
        assert_eq!(codes, vec![code]);
        assert!(output.generated().is_empty());
    }
}

#[test]
fn unicode_identifiers() {
    let text = "using ToStringGenerator;\n[ToStringGenerator]\npublic partial class Profil\n{\n    public string 이름 { get; set; }\n    public int Größe { get; set; }\n}\n";
    let output = run(&[("Profil.cs", text)]);

    assert!(output.diagnostics.is_empty());
    let source = output.source("Generated_Profil").unwrap();
    assert!(source.text.contains("builder.AppendLine(\"이름:\" + 이름.ToString());"));
    assert!(source.text.contains("builder.AppendLine(\"Größe:\" + Größe.ToString());"));
}
