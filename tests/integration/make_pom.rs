use crate::common::{FileAssert, TestProject};
use pomgen::test_utils::{SECTION_TEMPLATE, WEBAPP_DESCRIPTOR, WIDGET_DESCRIPTOR};
use predicates::prelude::*;

fn widget_project() -> TestProject {
    let project = TestProject::new().unwrap();
    project.write_file("module.toml", WIDGET_DESCRIPTOR).unwrap();
    project
}

#[test]
fn test_make_pom_with_defaults() {
    let project = widget_project();

    project
        .command()
        .arg("make-pom")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Wrote pom.xml"));

    let pom = project.read_file("pom.xml").unwrap();
    assert!(pom.contains("<groupId>com.acme</groupId>"));
    assert!(pom.contains("<artifactId>widget</artifactId>"));
    assert!(pom.contains("<packaging>jar</packaging>"));
    assert!(pom.contains("<version>1.2</version>"));
    assert!(pom.contains("<url>https://acme.example/widget</url>"));
    assert!(pom.contains("Maven POM generated by pomgen"));
    assert_eq!(pom.matches("<dependency>").count(), 3);
    assert!(pom.contains("<artifactId>legacy</artifactId>"));
    assert!(pom.contains("<scope>runtime</scope>"));
    assert!(!pom.contains("SKIP_LINE"));
}

#[test]
fn test_make_pom_is_deterministic() {
    let project = widget_project();

    project.command().args(["make-pom", "--output", "first.xml"]).assert().success();
    project.command().args(["make-pom", "--output", "second.xml"]).assert().success();

    assert_eq!(project.read_file("first.xml").unwrap(), project.read_file("second.xml").unwrap());
}

#[test]
fn test_make_pom_confs_filter_dependencies() {
    let project = widget_project();

    project
        .command()
        .args(["make-pom", "--confs", "*,!test", "--no-generator-info"])
        .assert()
        .success();

    let pom = project.read_file("pom.xml").unwrap();
    assert!(pom.contains("<artifactId>util</artifactId>"));
    assert!(pom.contains("<artifactId>postgresql</artifactId>"));
    assert!(!pom.contains("<artifactId>junit</artifactId>"));
    assert!(!pom.contains("<!--"));
}

#[test]
fn test_make_pom_creates_output_directories() {
    let project = widget_project();

    project
        .command()
        .args(["make-pom", "--output", "target/maven/pom.xml", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    FileAssert::contains(project.project_path().join("target/maven/pom.xml"), "<project ");
}

#[test]
fn test_make_pom_with_custom_template_and_metadata() {
    let project = widget_project();
    project.write_file("pom.template", SECTION_TEMPLATE).unwrap();

    project
        .command()
        .args([
            "make-pom",
            "--template",
            "pom.template",
            "--artifact-id",
            "widget-core",
            "--confs",
            "compile",
        ])
        .assert()
        .success();

    let pom = project.read_file("pom.xml").unwrap();
    assert_eq!(pom.matches("<dependencies>").count(), 1);
    assert!(pom.contains("<artifactId>widget-core</artifactId>"));
    assert!(pom.contains(
        "  <dependencies>\n    <dependency>\n      <groupId>com.acme</groupId>\n      <artifactId>util</artifactId>\n"
    ));
}

#[test]
fn test_make_pom_reads_project_config() {
    let project = TestProject::new().unwrap();
    project.write_file("build/storefront.toml", WEBAPP_DESCRIPTOR).unwrap();
    project.write_file("build/HEADER.txt", "<!-- Copyright Acme -->\n").unwrap();
    project
        .write_file(
            "pomgen.toml",
            r#"
descriptor = "build/storefront.toml"
output = "target/pom.xml"
license-header = "build/HEADER.txt"
generator-info = false
description = "Storefront web application"

[[extra-dependencies]]
group = "javax.servlet"
artifact = "servlet-api"
version = "2.5"
scope = "provided"
"#,
        )
        .unwrap();

    project.command().arg("make-pom").assert().success();

    let pom = project.read_file("target/pom.xml").unwrap();
    assert!(pom.starts_with("<!-- Copyright Acme -->\n<project "));
    assert!(pom.contains("<packaging>war</packaging>"));
    assert!(pom.contains("<description>Storefront web application</description>"));
    assert!(pom.contains("<artifactId>servlet-api</artifactId>"));
    assert!(pom.contains("<scope>provided</scope>"));
}

#[test]
fn test_flags_override_project_config() {
    let project = TestProject::new().unwrap();
    project.write_file("module.toml", WEBAPP_DESCRIPTOR).unwrap();
    project.write_file("pomgen.toml", "packaging = \"ear\"\noutput = \"from-config.xml\"\n").unwrap();

    project
        .command()
        .args(["make-pom", "--packaging", "war", "--output", "from-flag.xml"])
        .assert()
        .success();

    FileAssert::not_exists(project.project_path().join("from-config.xml"));
    FileAssert::contains(project.project_path().join("from-flag.xml"), "<packaging>war</packaging>");
}

#[test]
fn test_global_variables_reach_template() {
    let project = widget_project();
    project
        .write_global_config("[variables]\norganization = \"Acme Corp\"\n")
        .unwrap();
    project
        .write_file(
            "pom.template",
            "<project>\n  <organization><name>${organization}</name></organization>\n  <groupId>${ivy.pom.groupId}</groupId>\n</project>\n",
        )
        .unwrap();

    project.command().args(["make-pom", "--template", "pom.template"]).assert().success();

    FileAssert::contains(
        project.project_path().join("pom.xml"),
        "<organization><name>Acme Corp</name></organization>",
    );
}

#[test]
fn test_missing_descriptor_fails() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .arg("make-pom")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Module descriptor not found"))
        .stderr(predicate::str::contains("--descriptor"));
}

#[test]
fn test_malformed_pattern_fails_without_output() {
    let project = widget_project();

    project
        .command()
        .args(["make-pom", "--confs", "*(internal)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration pattern '*(internal)'"));

    FileAssert::not_exists(project.project_path().join("pom.xml"));
}

#[test]
fn test_invalid_descriptor_reports_validation_error() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "module.toml",
            r#"
configurations = ["compile"]

[module]
organisation = "com.acme"
name = "widget"

[[dependencies]]
organisation = "com.acme"
name = "util"
revision = "1.0"
confs = ["runtime"]
"#,
        )
        .unwrap();

    project
        .command()
        .arg("make-pom")
        .assert()
        .failure()
        .stderr(predicate::str::contains("undeclared configuration 'runtime'"));
}

#[test]
fn test_missing_template_fails() {
    let project = widget_project();

    project
        .command()
        .args(["make-pom", "--template", "missing.template"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template file not found"));
}

#[test]
fn test_license_flag_overrides_stale_configured_header() {
    let project = widget_project();
    project.write_file("HEADER.txt", "<!-- Flag header -->\n").unwrap();
    project.write_file("pomgen.toml", "license-header = \"gone/HEADER.txt\"\n").unwrap();

    project.command().args(["make-pom", "--license-header", "HEADER.txt"]).assert().success();

    FileAssert::contains(project.project_path().join("pom.xml"), "<!-- Flag header -->");
}

#[test]
fn test_star_dependency_gets_first_declared_scope() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "module.toml",
            r#"
configurations = ["compile", "test"]

[module]
organisation = "com.acme"
name = "widget"
revision = "1.2"

[[dependencies]]
organisation = "com.acme"
name = "everywhere"
revision = "1.0"
"#,
        )
        .unwrap();

    project.command().arg("make-pom").assert().success();

    FileAssert::contains(
        project.project_path().join("pom.xml"),
        "<artifactId>everywhere</artifactId>\n      <version>1.0</version>\n      <scope>compile</scope>",
    );
}
