//! Global constants used throughout pomgen.
//!
//! Template variable names, anchor tags and the defaults the generator falls
//! back to when neither the descriptor nor the options say otherwise.

/// Marker value that makes the line it ends up in disappear from the output.
pub const SKIP_LINE: &str = "SKIP_LINE";

/// License text placed at the top of the document.
pub const VAR_LICENSE: &str = "ivy.pom.license";
/// Generator comment block.
pub const VAR_HEADER: &str = "ivy.pom.header";
pub const VAR_GROUP_ID: &str = "ivy.pom.groupId";
pub const VAR_ARTIFACT_ID: &str = "ivy.pom.artifactId";
pub const VAR_VERSION: &str = "ivy.pom.version";
pub const VAR_PACKAGING: &str = "ivy.pom.packaging";
pub const VAR_NAME: &str = "ivy.pom.name";
pub const VAR_DESCRIPTION: &str = "ivy.pom.description";
pub const VAR_URL: &str = "ivy.pom.url";

/// Every variable the generator owns, cleared to [`SKIP_LINE`] before population.
pub const POM_VARIABLES: [&str; 9] = [
    VAR_LICENSE,
    VAR_HEADER,
    VAR_GROUP_ID,
    VAR_ARTIFACT_ID,
    VAR_VERSION,
    VAR_PACKAGING,
    VAR_NAME,
    VAR_DESCRIPTION,
    VAR_URL,
];

/// Anchor for injecting dependencies inside an existing section.
pub const DEPENDENCIES_CLOSE_TAG: &str = "</dependencies>";
/// Fallback anchor when the template has no dependencies section.
pub const PROJECT_CLOSE_TAG: &str = "</project>";

/// Dependency type that is never written out.
pub const DEFAULT_DEPENDENCY_TYPE: &str = "jar";

/// Packaging used when no artifact matches the artifact id.
pub const FALLBACK_PACKAGING: &str = "pom";

/// Indentation unit used when the anchor line sits at column zero.
pub const DEFAULT_INDENT_UNIT: usize = 2;

/// Pattern and dependency configuration meaning "every configuration".
pub const ALL_CONFIGURATIONS: &str = "*";

/// Configuration a module declares when it declares none.
pub const DEFAULT_CONFIGURATION: &str = "default";

/// Extra attribute holding an artifact classifier.
pub const CLASSIFIER_ATTRIBUTE: &str = "classifier";

/// Default descriptor file read by `make-pom`.
pub const DEFAULT_DESCRIPTOR_FILE: &str = "module.toml";

/// Default output file written by `make-pom`.
pub const DEFAULT_OUTPUT_FILE: &str = "pom.xml";

/// Project configuration file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "pomgen.toml";

/// Environment variable overriding the global configuration path.
pub const CONFIG_ENV_VAR: &str = "POMGEN_CONFIG";
