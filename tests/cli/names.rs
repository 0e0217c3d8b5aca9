use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, output_text};

const KEYS: &str = r#"export const KEYS = { title: "Title" };"#;

const APP: &str = r#"import { KEYS } from "./keys";
export const labels = { [KEYS.title]: 1, ...rest.more };
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("src/keys.ts", KEYS)?;
    test.write_file("src/app.ts", APP)?;
    Ok(test)
}

#[test]
fn test_names_text_output() -> Result<()> {
    let test = project()?;

    let output = test.names_command().output()?;
    let (stdout, _) = output_text(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("src/app.ts"));
    assert!(stdout.contains("src/keys.ts"));
    assert!(stdout.contains("Title"));
    assert!(stdout.contains("rest.more"));
    assert!(stdout.contains("Found 3 property names in 2 files"));
    assert!(stdout.find("src/app.ts") < stdout.find("src/keys.ts"));

    Ok(())
}

#[test]
fn test_names_json_output() -> Result<()> {
    let test = project()?;

    let output = test.names_command().args(["--format", "json"]).output()?;
    let (stdout, _) = output_text(&output);
    let json: Value = serde_json::from_str(&stdout)?;

    assert_eq!(json[0]["file"], "src/app.ts");
    let first = &json[0]["properties"][0];
    assert_eq!(first["name"], "Title");
    assert_eq!(first["kind"], "computed");
    assert_eq!(first["container"], "object");
    assert_eq!(first["line"], 2);
    assert_eq!(json[0]["properties"][1]["kind"], "spread");

    Ok(())
}

#[test]
fn test_names_without_imports() -> Result<()> {
    let test = project()?;

    let output = test.names_command().arg("--no-imports").output()?;
    let (stdout, _) = output_text(&output);

    assert!(stdout.contains("@computed#KEYS.title"));

    Ok(())
}

#[test]
fn test_names_explicit_path() -> Result<()> {
    let test = project()?;

    let output = test.names_command().arg("src/keys.ts").output()?;
    let (stdout, _) = output_text(&output);

    assert!(!stdout.contains("src/app.ts"));
    assert!(stdout.contains("Found 1 property name in 1 file"));

    Ok(())
}

#[test]
fn test_names_strict_fails_on_unresolved() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "export const a = { ...make() };")?;

    let output = test.names_command().output()?;
    let (stdout, _) = output_text(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("<unresolved>"));
    assert!(stdout.contains("1 of 1 property name could not be resolved"));

    let output = test.names_command().arg("--strict").output()?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_names_strict_passes_with_placeholders() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "export const a = { [dynamic]: 1 };")?;

    let output = test.names_command().arg("--strict").output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_names_missing_path() -> Result<()> {
    let test = project()?;

    let output = test.names_command().arg("nope").output()?;
    let (_, stderr) = output_text(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Path does not exist: nope"));

    Ok(())
}

#[test]
fn test_names_reports_parse_errors() -> Result<()> {
    let test = project()?;
    test.write_file("src/broken.ts", "const = ;")?;

    let output = test.names_command().output()?;
    let (stdout, stderr) = output_text(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Found 3 property names in 2 files"));
    assert!(stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_names_uses_config_includes() -> Result<()> {
    let test = project()?;
    test.write_file("lib/extra.ts", "export const e = { extra: 1 };")?;
    test.write_file(".propnamerc.json", r#"{ "includes": ["lib"] }"#)?;

    let output = test.names_command().output()?;
    let (stdout, _) = output_text(&output);

    assert!(stdout.contains("lib/extra.ts"));
    assert!(!stdout.contains("src/app.ts"));

    Ok(())
}

#[test]
fn test_names_invalid_config() -> Result<()> {
    let test = project()?;
    test.write_file(".propnamerc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.names_command().output()?;
    let (_, stderr) = output_text(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    let (stdout, _) = output_text(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("names"));
    assert!(stdout.contains("init"));

    Ok(())
}
