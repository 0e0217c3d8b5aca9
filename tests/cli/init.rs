use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, output_text};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    let (stdout, _) = output_text(&output);

    assert_eq!(output.status.code(), Some(0));
    insta::assert_snapshot!(stdout.trim_end(), @"✓ Created .propnamerc.json");
    assert!(test.root().join(".propnamerc.json").exists());

    let content = test.read_file(".propnamerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["includes"][0], "src");
    assert_eq!(parsed["resolveImports"], true);
    assert_eq!(parsed["maxResolveDepth"], 64);

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".propnamerc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    let (_, stderr) = output_text(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains(".propnamerc.json already exists"));
    assert_eq!(test.read_file(".propnamerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("src/app.tsx", "export const props = { label: 'x' };")?;

    let output = test.names_command().output()?;
    assert!(
        output.status.success(),
        "names should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}
