use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

const SETTINGS: &str = r#"export function Settings({ name }: { name: string }) {
    return (
        <div>
            <Text>Settings</Text>
            <Text>Hello {name}</Text>
        </div>
    );
}
"#;

const SETTINGS_TRANSFORMED: &str = r#"// @i18n-transformed
import { t } from "@/i18n";
export function Settings({ name }: { name: string }) {
    return (
        <div>
            <Text>{t("Settings")}</Text>
            <Text>{t("Hello {name}", { name })}</Text>
        </div>
    );
}
"#;

const MENU: &str = "export const Menu = () => <Text>{open ? \"Close\" : \"Open\"}</Text>;\n";

#[test]
fn test_transform_dry_run_leaves_files_unchanged() -> Result<()> {
    let test = CliTest::with_file("src/settings.tsx", SETTINGS)?;

    assert_cmd_snapshot!(test.transform_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    --> ./src/settings.tsx (2 string(s))
    Would transform 2 string(s) in 1 file(s).
      - parameterized-call: 1
      - simple-call: 1
    Run with --apply to write these changes.

    ----- stderr -----
    ");
    assert_eq!(test.read_file("src/settings.tsx")?, SETTINGS);

    Ok(())
}

#[test]
fn test_transform_apply_rewrites_files() -> Result<()> {
    let test = CliTest::with_file("src/settings.tsx", SETTINGS)?;

    assert_cmd_snapshot!(test.transform_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    --> ./src/settings.tsx (2 string(s))
    Transformed 2 string(s) in 1 file(s).
      - parameterized-call: 1
      - simple-call: 1

    ----- stderr -----
    ");
    assert_eq!(test.read_file("src/settings.tsx")?, SETTINGS_TRANSFORMED);

    Ok(())
}

#[test]
fn test_transform_second_run_is_a_no_op() -> Result<()> {
    let test = CliTest::with_file("src/settings.tsx", SETTINGS)?;
    test.transform_command().arg("--apply").output()?;

    assert_cmd_snapshot!(test.transform_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No translatable text found in 1 source file(s)

    ----- stderr -----
    ");
    assert_eq!(test.read_file("src/settings.tsx")?, SETTINGS_TRANSFORMED);

    Ok(())
}

#[test]
fn test_transform_verbose_lists_each_string() -> Result<()> {
    let test = CliTest::with_file("src/settings.tsx", SETTINGS)?;

    assert_cmd_snapshot!(test.transform_command().arg("-v"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    --> ./src/settings.tsx (2 string(s))
    4 | simple-call "Settings"
    5 | parameterized-call "Hello {name}"
    Would transform 2 string(s) in 1 file(s).
      - parameterized-call: 1
      - simple-call: 1
    Run with --apply to write these changes.

    ----- stderr -----
    Note: No .i18n-transform.json found, using default configuration
    "#);

    Ok(())
}

#[test]
fn test_transform_writes_json_report() -> Result<()> {
    let test = CliTest::with_file("src/settings.tsx", SETTINGS)?;
    test.write_file("src/menu.tsx", MENU)?;
    let report_path = test.root().join("report.json");

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.transform_command().arg("-v").arg("--report").arg(&report_path), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        --> ./src/menu.tsx (2 string(s))
        1 | branched-call "Close"
        1 | branched-call "Open"
        --> ./src/settings.tsx (2 string(s))
        4 | simple-call "Settings"
        5 | parameterized-call "Hello {name}"
        Would transform 4 string(s) in 2 file(s).
          - branched-call: 2
          - parameterized-call: 1
          - simple-call: 1
        Run with --apply to write these changes.

        ----- stderr -----
        Note: No .i18n-transform.json found, using default configuration
        Report written to [ROOT]/report.json
        "#);
    });

    let report: Value = serde_json::from_str(&test.read_file("report.json")?)?;
    assert_eq!(report["stringsTransformed"], 4);
    assert_eq!(report["filesModified"], 2);

    let details = report["fileDetails"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["file"], "./src/menu.tsx");
    assert_eq!(details[0]["transformations"][0]["type"], "branched-call");
    assert_eq!(details[0]["transformations"][0]["original"], "Close");
    assert_eq!(details[0]["transformations"][1]["original"], "Open");
    assert_eq!(details[1]["transformations"][1]["params"][0], "name");
    assert!(details[1]["transformations"][0].get("params").is_none());

    Ok(())
}

#[test]
fn test_transform_parse_error_fails_but_processes_others() -> Result<()> {
    let test = CliTest::with_file("src/settings.tsx", SETTINGS)?;
    test.write_file("src/broken.tsx", "const = <Text>\n")?;

    assert_cmd_snapshot!(test.transform_command().arg("--apply"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    --> ./src/settings.tsx (2 string(s))
    Transformed 2 string(s) in 1 file(s).
      - parameterized-call: 1
      - simple-call: 1

    ----- stderr -----
    warning: 1 file(s) could not be processed (use -v for details)
    ");
    assert_eq!(test.read_file("src/settings.tsx")?, SETTINGS_TRANSFORMED);
    assert_eq!(test.read_file("src/broken.tsx")?, "const = <Text>\n");

    Ok(())
}

#[test]
fn test_transform_respects_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18n-transform.json",
        r#"{
            "includes": ["app"],
            "textComponents": ["Label"],
            "translateFunction": "tr",
            "importSource": "~/lang"
        }"#,
    )?;
    test.write_file("app/title.tsx", "export const T = () => <Label>Welcome</Label>;\n")?;
    test.write_file("src/other.tsx", "export const O = () => <Text>Other</Text>;\n")?;

    assert_cmd_snapshot!(test.transform_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    --> ./app/title.tsx (1 string(s))
    Transformed 1 string(s) in 1 file(s).
      - simple-call: 1

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("app/title.tsx")?,
        "// @i18n-transformed\nimport { tr } from \"~/lang\";\nexport const T = () => <Label>{tr(\"Welcome\")}</Label>;\n"
    );
    assert_eq!(
        test.read_file("src/other.tsx")?,
        "export const O = () => <Text>Other</Text>;\n"
    );

    Ok(())
}

#[test]
fn test_transform_skips_ignored_and_test_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18n-transform.json",
        r#"{ "ignores": ["src/generated"] }"#,
    )?;
    test.write_file("src/generated/strings.tsx", "export const G = () => <Text>Generated</Text>;\n")?;
    test.write_file("src/app.test.tsx", "export const X = () => <Text>Fixture</Text>;\n")?;
    test.write_file(
        "src/app.tsx",
        "export const A = () => <Text>Internal</Text>; // brand name, i18n-ignore\n",
    )?;

    assert_cmd_snapshot!(test.transform_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No translatable text found in 1 source file(s)

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("src/app.tsx")?,
        "export const A = () => <Text>Internal</Text>; // brand name, i18n-ignore\n"
    );

    Ok(())
}

#[test]
fn test_transform_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".i18n-transform.json", r#"{ "translateFunction": "not valid" }"#)?;
    test.write_file("src/app.tsx", "export const A = () => <Text>Hi there</Text>;\n")?;

    assert_cmd_snapshot!(test.transform_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid identifier in 'translateFunction': "not valid"
    "#);
    assert_eq!(
        test.read_file("src/app.tsx")?,
        "export const A = () => <Text>Hi there</Text>;\n"
    );

    Ok(())
}
