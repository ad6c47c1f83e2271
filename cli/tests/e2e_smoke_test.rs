use std::{fs, path::PathBuf};

use tempfile::tempdir;

use reprgen_cli::{Args, CliError, run};

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("demos")
        .join("models")
}

fn args(inputs: Vec<PathBuf>, out_dir: PathBuf) -> Args {
    Args {
        inputs,
        out_dir,
        config: None,
        log_level: "off".to_string(),
        check: false,
    }
}

#[test]
fn e2e_smoke_test_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("generated");

    let outcome = run(&args(vec![demos_dir()], out_dir.clone())).unwrap();

    assert_eq!(outcome.inputs.len(), 3);
    assert!(
        outcome.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        outcome.diagnostics
    );
    assert!(!outcome.is_failure());

    let mut names: Vec<String> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Generated_Shapes.Canvas.Cell`1.cs",
            "Generated_Shapes.Circle.cs",
            "Generated_ToStringGeneratorSample.User.cs",
            "Generated_Warehouse.Stock.Item.cs",
            "Generated__ToStringGeneratorAttribute.cs",
        ]
    );
    assert_eq!(outcome.written.len(), names.len());

    let user = fs::read_to_string(out_dir.join("Generated_ToStringGeneratorSample.User.cs")).unwrap();
    assert!(user.contains("public override string ToString()"));
    assert!(user.contains("builder.AppendLine(\"Name:\" + Name.ToString());"));
    assert!(!user.contains("_version"));
}

#[test]
fn e2e_check_mode_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    let out_dir = temp_dir.path().join("generated");

    let mut args = args(vec![demos_dir()], out_dir.clone());
    args.check = true;
    let outcome = run(&args).unwrap();

    assert!(outcome.written.is_empty());
    assert!(!out_dir.exists());
}

#[test]
fn e2e_diagnostics_fail_the_run() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("Invoice.cs");
    fs::write(
        &input,
        "using ToStringGenerator;\n[ToStringGenerator]\npublic class Invoice { public int Id { get; } }\n",
    )
    .unwrap();

    let outcome = run(&args(vec![input], temp_dir.path().join("out"))).unwrap();

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].code().as_str(), "MYSG1001");
    assert!(outcome.is_failure());
    // only the marker definition is written
    assert_eq!(outcome.written.len(), 1);
}

#[test]
fn e2e_fail_on_never_from_config() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("Helpers.cs");
    fs::write(
        &input,
        "using ToStringGenerator;\n[ToStringGenerator]\npublic static partial class Helpers { }\n",
    )
    .unwrap();
    let config = temp_dir.path().join("reprgen.toml");
    fs::write(&config, "[diagnostics]\nfail_on = \"never\"\n").unwrap();

    let mut args = args(vec![input], temp_dir.path().join("out"));
    args.config = Some(config);
    let outcome = run(&args).unwrap();

    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(!outcome.is_failure());
}

#[test]
fn e2e_parse_error_keeps_the_source() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("Broken.cs");
    let text = "namespace N { class T { public int } }";
    fs::write(&input, text).unwrap();

    let err = run(&args(vec![input.clone()], temp_dir.path().join("out"))).unwrap_err();

    match err {
        CliError::Parse { source_id, src, .. } => {
            assert_eq!(source_id, input.display().to_string());
            assert_eq!(src, text);
        }
        other => panic!("Expected parse error, got {other}"),
    }
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn e2e_empty_directory_has_no_sources() {
    let temp_dir = tempdir().unwrap();
    let err = run(&args(
        vec![temp_dir.path().to_path_buf()],
        temp_dir.path().join("out"),
    ))
    .unwrap_err();

    assert!(matches!(err, CliError::NoSources));
}
