//! Error handling for pomgen
//!
//! Every failure the generator can hit surfaces as a single [`PomgenError`]. The
//! engine returns these to its caller without logging or retrying; the command
//! line front end turns them into an [`ErrorContext`] with a suggestion and
//! prints it in color.
//!
//! # Error Categories
//!
//! - **Input**: [`PomgenError::TemplateNotFound`], [`PomgenError::DescriptorParse`],
//!   [`PomgenError::InvalidConfigurationPattern`], ...
//! - **Resources**: [`PomgenError::OutputWrite`], [`PomgenError::IoError`]
//! - **Templating**: [`PomgenError::CyclicVariable`]
//! - **Configuration**: [`PomgenError::ConfigError`], [`PomgenError::TomlError`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use pomgen::core::{PomgenError, user_friendly_error};
//!
//! let error = PomgenError::TemplateNotFound {
//!     path: "pom.template".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for POM generation.
///
/// Variants carry the offending path, pattern or variable so the message is
/// useful on its own, without the surrounding call stack.
#[derive(Error, Debug)]
pub enum PomgenError {
    /// The template file does not exist
    #[error("Template file not found: {path}")]
    TemplateNotFound {
        /// Path that was looked up
        path: String,
    },

    /// The template exists but could not be read
    #[error("Failed to read template {path}: {reason}")]
    TemplateRead {
        /// Template path, or `<built-in>`
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// The output file or its directory could not be created or written
    #[error("Failed to write {path}: {reason}")]
    OutputWrite {
        /// Output destination
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// The module descriptor file does not exist
    #[error("Module descriptor not found: {path}")]
    DescriptorNotFound {
        /// Path that was looked up
        path: String,
    },

    /// The module descriptor could not be parsed
    #[error("Invalid module descriptor syntax in {file}")]
    DescriptorParse {
        /// Descriptor path
        file: String,
        /// Parser message
        reason: String,
    },

    /// The descriptor parsed but is inconsistent
    #[error("Module descriptor validation failed: {reason}")]
    DescriptorValidation {
        /// What is wrong
        reason: String,
    },

    /// A configuration pattern such as `*(public)` or `!test` is malformed
    #[error("Invalid configuration pattern '{pattern}': {reason}")]
    InvalidConfigurationPattern {
        /// The offending pattern item
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// Variable values reference each other in a loop
    #[error("Cyclic variable definition: {chain}")]
    CyclicVariable {
        /// The reference chain, e.g. `a -> b -> a`
        chain: String,
    },

    /// Project or global configuration is invalid
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Plain I/O failure
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML deserialization failure
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Anything else
    #[error("{message}")]
    Other {
        /// Message shown to the user
        message: String,
    },
}

/// Convenience alias used throughout the engine.
pub type Result<T, E = PomgenError> = std::result::Result<T, E>;

/// A [`PomgenError`] together with user-facing hints.
///
/// ```rust,no_run
/// use pomgen::core::{ErrorContext, PomgenError};
///
/// let context = ErrorContext::new(PomgenError::DescriptorNotFound {
///     path: "module.toml".to_string(),
/// })
/// .with_suggestion("Pass --descriptor with the path to the resolved module");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PomgenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PomgenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`PomgenError`] (anywhere in the chain), [`std::io::Error`] and
/// [`toml::de::Error`]; everything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(pomgen_error) = error.chain().find_map(|e| e.downcast_ref::<PomgenError>()) {
        let context = create_error_context(pomgen_error);
        // Messages added with `.context(..)` above the typed error
        let outer: Vec<String> = error
            .chain()
            .take_while(|e| e.downcast_ref::<PomgenError>().is_none())
            .map(ToString::to_string)
            .collect();
        if outer.is_empty() || context.details.is_some() {
            return context;
        }
        return context.with_details(outer.join(": "));
    }

    if let Some(file_error) =
        error.chain().find_map(|e| e.downcast_ref::<crate::core::file_error::FileOperationError>())
    {
        return ErrorContext::new(PomgenError::Other {
            message: file_error.user_message(),
        });
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PomgenError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file and directory permissions for the paths involved");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PomgenError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(PomgenError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and key names");
    }

    let mut message = error.to_string();
    if let Some(details) = chain_details(&error) {
        message.push_str("\n\n");
        message.push_str(&details);
    }

    ErrorContext::new(PomgenError::Other {
        message,
    })
}

/// Render the `Caused by:` list for everything below the top-level message.
fn chain_details(error: &anyhow::Error) -> Option<String> {
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if chain.is_empty() {
        return None;
    }

    let mut details = String::from("Caused by:");
    for (i, cause) in chain.iter().enumerate() {
        details.push_str(&format!("\n  {}: {}", i + 1, cause));
    }
    Some(details)
}

/// Attach suggestions to a known [`PomgenError`].
///
/// The returned context owns a rebuilt copy of the error because `PomgenError`
/// wraps non-clonable sources.
fn create_error_context(error: &PomgenError) -> ErrorContext {
    match error {
        PomgenError::TemplateNotFound {
            path,
        } => ErrorContext::new(PomgenError::TemplateNotFound {
            path: path.clone(),
        })
        .with_suggestion(
            "Check the --template path, or omit it to use the built-in template \
             (see `pomgen template` to print it)",
        ),
        PomgenError::TemplateRead {
            path,
            reason,
        } => ErrorContext::new(PomgenError::TemplateRead {
            path: path.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Make sure the template is a readable UTF-8 text file"),
        PomgenError::OutputWrite {
            path,
            reason,
        } => ErrorContext::new(PomgenError::OutputWrite {
            path: path.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Check that the output directory is writable")
        .with_details("A failed run may leave a partial file behind; do not use it"),
        PomgenError::DescriptorNotFound {
            path,
        } => ErrorContext::new(PomgenError::DescriptorNotFound {
            path: path.clone(),
        })
        .with_suggestion("Pass --descriptor with the path to the resolved module descriptor"),
        PomgenError::DescriptorParse {
            file,
            reason,
        } => ErrorContext::new(PomgenError::DescriptorParse {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_details(reason.clone())
        .with_suggestion(
            "Descriptors are read as TOML, JSON or YAML based on the file extension",
        ),
        PomgenError::DescriptorValidation {
            reason,
        } => ErrorContext::new(PomgenError::DescriptorValidation {
            reason: reason.clone(),
        })
        .with_suggestion("Make sure every configuration referenced by a dependency is declared"),
        PomgenError::InvalidConfigurationPattern {
            pattern,
            reason,
        } => ErrorContext::new(PomgenError::InvalidConfigurationPattern {
            pattern: pattern.clone(),
            reason: reason.clone(),
        })
        .with_suggestion(
            "Use configuration names, '*', '*(public)', '*(private)' or '!name', separated by commas",
        ),
        PomgenError::CyclicVariable {
            chain,
        } => ErrorContext::new(PomgenError::CyclicVariable {
            chain: chain.clone(),
        })
        .with_suggestion("Remove the self-reference from the [variables] table"),
        PomgenError::ConfigError {
            message,
        } => ErrorContext::new(PomgenError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion("Check pomgen.toml and ~/.pomgen/config.toml"),
        PomgenError::IoError(e) => ErrorContext::new(PomgenError::Other {
            message: format!("IO error: {e}"),
        }),
        PomgenError::TomlError(e) => ErrorContext::new(PomgenError::ConfigError {
            message: e.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and key names"),
        PomgenError::Other {
            message,
        } => ErrorContext::new(PomgenError::Other {
            message: message.clone(),
        }),
    }
}
