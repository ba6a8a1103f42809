//! Descriptor and template fixtures shared by unit and integration tests.

/// `com.acme:widget:1.2` with `compile`, `runtime` and a private `test`
/// configuration, a jar artifact and three dependencies, one with an
/// exclusion.
pub const WIDGET_DESCRIPTOR: &str = r#"
configurations = [
    "compile",
    { name = "runtime", extends = ["compile"] },
    { name = "test", extends = ["runtime"], visibility = "private" },
]

[module]
organisation = "com.acme"
name = "widget"
revision = "1.2"
home-page = "https://acme.example/widget"

[[artifacts]]
name = "widget"
type = "jar"

[[dependencies]]
organisation = "com.acme"
name = "util"
revision = "1.0"
confs = ["compile"]

[[dependencies.excludes]]
organisation = "com.acme"
module = "legacy"

[[dependencies]]
organisation = "org.postgresql"
name = "postgresql"
revision = "42.7.3"
confs = ["runtime"]

[[dependencies]]
organisation = "org.junit"
name = "junit"
revision = "4.13.2"
confs = ["test"]
"#;

/// A webapp module whose main artifact is a war.
pub const WEBAPP_DESCRIPTOR: &str = r#"
[module]
organisation = "com.acme"
name = "storefront"
revision = "3.0.0"

[[artifacts]]
name = "storefront"
type = "war"

[[artifacts]]
name = "storefront"
type = "jar"
extra = { classifier = "classes" }
"#;

/// A template with an explicit, empty dependencies section.
pub const SECTION_TEMPLATE: &str = "\
<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>${ivy.pom.groupId}</groupId>
  <artifactId>${ivy.pom.artifactId}</artifactId>
  <version>${ivy.pom.version}</version>
  <dependencies>
  </dependencies>
</project>
";
