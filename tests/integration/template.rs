use crate::common::{FileAssert, TestProject};
use pomgen::templating::BUILTIN_TEMPLATE;
use predicates::prelude::*;

#[test]
fn test_template_prints_builtin() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::diff(BUILTIN_TEMPLATE));
}

#[test]
fn test_template_writes_file_and_respects_force() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["template", "--output", "build/pom.template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote template"));
    FileAssert::contains(project.project_path().join("build/pom.template"), "${ivy.pom.groupId}");

    project
        .command()
        .args(["template", "--output", "build/pom.template"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    project
        .command()
        .args(["template", "--output", "build/pom.template", "--force"])
        .assert()
        .success();
}
