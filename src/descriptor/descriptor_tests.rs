use super::*;
use crate::test_utils::{WEBAPP_DESCRIPTOR, WIDGET_DESCRIPTOR};
use std::io::Write;
use tempfile::TempDir;

fn parse_toml(text: &str) -> Result<ModuleDescriptor> {
    ModuleDescriptor::from_str_with_format(text, DescriptorFormat::Toml)
}

#[test]
fn test_format_from_extension() {
    assert_eq!(DescriptorFormat::from_path(Path::new("module.toml")), DescriptorFormat::Toml);
    assert_eq!(DescriptorFormat::from_path(Path::new("module.JSON")), DescriptorFormat::Json);
    assert_eq!(DescriptorFormat::from_path(Path::new("module.yml")), DescriptorFormat::Yaml);
    assert_eq!(DescriptorFormat::from_path(Path::new("module")), DescriptorFormat::Toml);
}

#[test]
fn test_parse_widget_toml() {
    let descriptor = parse_toml(WIDGET_DESCRIPTOR).unwrap();

    assert_eq!(descriptor.organisation(), "com.acme");
    assert_eq!(descriptor.name(), "widget");
    assert_eq!(descriptor.revision(), Some("1.2"));
    assert_eq!(descriptor.home_page(), Some("https://acme.example/widget"));
    assert_eq!(descriptor.configuration_names(), vec!["compile", "runtime", "test"]);
    assert_eq!(descriptor.configuration_names_with_visibility(Visibility::Private), vec!["test"]);
    assert_eq!(descriptor.configuration("runtime").unwrap().extends, vec!["compile"]);

    assert_eq!(descriptor.dependencies.len(), 3);
    let util = &descriptor.dependencies[0];
    assert_eq!(util.excludes.len(), 1);
    assert_eq!(util.excludes[0].module, "legacy");
    assert!(descriptor.dependencies[1].excludes.is_empty());
}

#[test]
fn test_parse_json() {
    let json = r#"{
        "module": { "organisation": "com.acme", "name": "widget" },
        "dependencies": [
            { "organisation": "com.acme", "name": "util", "revision": "1.0" }
        ]
    }"#;
    let descriptor = ModuleDescriptor::from_str_with_format(json, DescriptorFormat::Json).unwrap();

    assert_eq!(descriptor.revision(), None);
    assert_eq!(descriptor.dependencies[0].module_configurations(), vec!["*"]);
}

#[test]
fn test_parse_yaml_with_artifact_overrides() {
    let yaml = r#"
module:
  organisation: com.acme
  name: widget
  revision: "2.0"
configurations: [compile, test]
dependencies:
  - organisation: com.acme
    name: util
    revision: "1.0"
    confs: [test]
    artifacts:
      - type: test-jar
        extra:
          classifier: tests
"#;
    let descriptor = ModuleDescriptor::from_str_with_format(yaml, DescriptorFormat::Yaml).unwrap();

    let artifact = &descriptor.dependencies[0].artifacts[0];
    assert_eq!(artifact.artifact_type, "test-jar");
    assert_eq!(artifact.classifier(), Some("tests"));
}

#[test]
fn test_implicit_default_configuration() {
    let descriptor = parse_toml(WEBAPP_DESCRIPTOR).unwrap();
    assert_eq!(descriptor.configuration_names(), vec!["default"]);
    assert_eq!(descriptor.configuration_names_with_visibility(Visibility::Public), vec!["default"]);
    assert!(descriptor.configuration_names_with_visibility(Visibility::Private).is_empty());
}

#[test]
fn test_find_main_artifact_skips_classified() {
    let descriptor = parse_toml(WEBAPP_DESCRIPTOR).unwrap();

    let main = descriptor.find_main_artifact("storefront").unwrap();
    assert_eq!(main.artifact_type, "war");
    assert!(descriptor.find_main_artifact("other").is_none());
}

#[test]
fn test_artifact_type_defaults_to_jar() {
    let descriptor = parse_toml(
        r#"
[module]
organisation = "com.acme"
name = "lib"

[[artifacts]]
name = "lib"
"#,
    )
    .unwrap();
    assert_eq!(descriptor.artifacts[0].artifact_type, "jar");
}

#[test]
fn test_unknown_field_is_a_parse_error() {
    let error = parse_toml(
        r#"
[module]
organisation = "com.acme"
name = "lib"
licence = "MIT"
"#,
    )
    .unwrap_err();
    assert!(matches!(error, PomgenError::DescriptorParse { .. }));
}

#[test]
fn test_validation_failures() {
    let cases = [
        (
            r#"
[module]
organisation = ""
name = "lib"
"#,
            "organisation",
        ),
        (
            r#"
configurations = ["compile", "compile"]
[module]
organisation = "com.acme"
name = "lib"
"#,
            "declared twice",
        ),
        (
            r#"
configurations = [{ name = "test", extends = ["compile"] }]
[module]
organisation = "com.acme"
name = "lib"
"#,
            "undeclared configuration 'compile'",
        ),
        (
            r#"
configurations = ["compile"]
[module]
organisation = "com.acme"
name = "lib"
[[dependencies]]
organisation = "com.acme"
name = "util"
revision = "1.0"
confs = ["runtime"]
"#,
            "undeclared configuration 'runtime'",
        ),
        (
            r#"
configurations = ["com pile"]
[module]
organisation = "com.acme"
name = "lib"
"#,
            "invalid configuration name",
        ),
    ];

    for (text, expected) in cases {
        match parse_toml(text) {
            Err(PomgenError::DescriptorValidation {
                reason,
            }) => assert!(reason.contains(expected), "{reason:?} should mention {expected:?}"),
            other => panic!("expected a validation error mentioning {expected:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_star_dependency_conf_is_valid() {
    let descriptor = parse_toml(
        r#"
configurations = ["compile"]
[module]
organisation = "com.acme"
name = "lib"
[[dependencies]]
organisation = "com.acme"
name = "util"
revision = "1.0"
confs = ["*"]
"#,
    )
    .unwrap();
    assert_eq!(descriptor.dependencies[0].module_configurations(), vec!["*"]);
}

#[tokio::test]
async fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("module.toml");
    std::fs::File::create(&path).unwrap().write_all(WIDGET_DESCRIPTOR.as_bytes()).unwrap();

    let descriptor = ModuleDescriptor::load(&path).await.unwrap();
    assert_eq!(descriptor.name(), "widget");
}

#[tokio::test]
async fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let error = ModuleDescriptor::load(&temp.path().join("absent.toml")).await.unwrap_err();
    assert!(matches!(error, PomgenError::DescriptorNotFound { .. }));
}

#[tokio::test]
async fn test_load_parse_error_names_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    match ModuleDescriptor::load(&path).await.unwrap_err() {
        PomgenError::DescriptorParse {
            file,
            ..
        } => assert!(file.ends_with("broken.json")),
        other => panic!("unexpected error: {other:?}"),
    }
}
