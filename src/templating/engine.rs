//! Line-oriented template streaming with a single dependency injection point.

use crate::constants::{DEPENDENCIES_CLOSE_TAG, PROJECT_CLOSE_TAG, SKIP_LINE};
use crate::core::{PomgenError, Result};
use crate::templating::dependencies::{DependencyBlock, Indentation};
use crate::templating::variables::{Substitutor, VariableContainer};
use std::io::{BufRead, Write};

/// Whether the dependency block has been written yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Streaming,
    DependenciesInjected,
}

/// Streams a template to a writer, one line at a time.
///
/// The block is injected before the first `</dependencies>` line, bare, at
/// that line's indentation. Failing that, it goes before the first
/// `</project>` line inside its own `<dependencies>` wrapper, at the
/// indentation of the line preceding it. Blank lines never change the
/// tracked indentation.
pub struct TemplateEngine<'a> {
    block: DependencyBlock<'a>,
    substitutor: Substitutor,
    state: EngineState,
    indent: usize,
    last_indent: usize,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(block: DependencyBlock<'a>) -> Result<Self> {
        Ok(Self {
            block,
            substitutor: Substitutor::new()?,
            state: EngineState::Streaming,
            indent: 0,
            last_indent: 0,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Stream `template` to `out`. `template_label` and `output_label` name
    /// the two ends in error messages.
    pub fn run<R, W>(
        &mut self,
        template: R,
        out: &mut W,
        variables: &dyn VariableContainer,
        template_label: &str,
        output_label: &str,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        let write_failed = |e: std::io::Error| PomgenError::OutputWrite {
            path: output_label.to_string(),
            reason: e.to_string(),
        };

        for (number, line) in template.lines().enumerate() {
            let line = line.map_err(|e| PomgenError::TemplateRead {
                path: template_label.to_string(),
                reason: e.to_string(),
            })?;

            let line = self.substitutor.substitute(&line, variables)?;
            if line.contains(SKIP_LINE) {
                tracing::trace!("Dropping template line {}", number + 1);
                continue;
            }

            if line.trim().is_empty() {
                writeln!(out, "{line}").map_err(write_failed)?;
                continue;
            }

            self.last_indent = self.indent;
            self.indent = line.find('<').map_or(0, |byte| line[..byte].chars().count());

            if self.state == EngineState::Streaming {
                if line.contains(DEPENDENCIES_CLOSE_TAG) {
                    self.inject(out, self.indent, false).map_err(write_failed)?;
                } else if line.contains(PROJECT_CLOSE_TAG) {
                    self.inject(out, self.last_indent, true).map_err(write_failed)?;
                }
            }

            writeln!(out, "{line}").map_err(write_failed)?;
        }

        if self.state == EngineState::Streaming {
            tracing::debug!("Template has no dependency anchor; no dependencies written");
        }
        Ok(())
    }

    fn inject<W: Write + ?Sized>(&mut self, out: &mut W, column: usize, wrap: bool) -> std::io::Result<()> {
        let written = self.block.write_to(out, &Indentation::at_anchor(column), wrap)?;
        tracing::debug!(
            "Injected {} dependencies at column {} ({})",
            written,
            column,
            if wrap {
                "project fallback"
            } else {
                "dependencies section"
            }
        );
        self.state = EngineState::DependenciesInjected;
        Ok(())
    }
}

impl std::fmt::Debug for TemplateEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("state", &self.state)
            .field("indent", &self.indent)
            .field("last_indent", &self.last_indent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Configuration, ModuleDescriptor};
    use crate::templating::scope::ScopeMapping;
    use crate::templating::variables::Variables;
    use crate::test_utils::DescriptorBuilder;
    use std::io::Cursor;

    fn descriptor() -> ModuleDescriptor {
        DescriptorBuilder::new("com.acme", "widget", Some("1.2"))
            .configuration(Configuration::public("compile"))
            .dependency("com.acme", "util", "1.0", &["compile"])
            .build()
    }

    fn stream(descriptor: &ModuleDescriptor, template: &str) -> (String, EngineState) {
        let confs = vec!["compile".to_string()];
        let mapping = ScopeMapping::default_mapping();
        let block = DependencyBlock::new(descriptor, &confs, &mapping, &[]);
        let mut engine = TemplateEngine::new(block).unwrap();
        let mut out = Vec::new();
        engine
            .run(Cursor::new(template), &mut out, &Variables::new(), "<test>", "<buffer>")
            .unwrap();
        (String::from_utf8(out).unwrap(), engine.state())
    }

    #[test]
    fn test_injects_before_dependencies_close_without_wrapper() {
        let template = "<project>\n  <dependencies>\n  </dependencies>\n</project>\n";
        let (out, state) = stream(&descriptor(), template);

        assert_eq!(state, EngineState::DependenciesInjected);
        assert_eq!(out.matches("<dependencies>").count(), 1);
        assert!(out.contains("  <dependencies>\n    <dependency>\n"));
        assert!(out.contains("    </dependency>\n  </dependencies>\n</project>\n"));
    }

    #[test]
    fn test_falls_back_to_project_close_with_wrapper() {
        let template = "<project>\n  <groupId>x</groupId>\n\n</project>\n";
        let (out, _) = stream(&descriptor(), template);

        assert!(out.contains("  <groupId>x</groupId>\n\n  <dependencies>\n    <dependency>\n"));
        assert!(out.ends_with("    </dependency>\n  </dependencies>\n</project>\n"));
    }

    #[test]
    fn test_injects_only_once() {
        let template = "<project>\n  <dependencies>\n  </dependencies>\n  <dependencies>\n  </dependencies>\n</project>\n";
        let (out, _) = stream(&descriptor(), template);
        assert_eq!(out.matches("<artifactId>util</artifactId>").count(), 1);
    }

    #[test]
    fn test_no_anchor_leaves_template_untouched() {
        let template = "<settings>\n  <x/>\n</settings>\n";
        let (out, state) = stream(&descriptor(), template);
        assert_eq!(out, template);
        assert_eq!(state, EngineState::Streaming);
    }

    #[test]
    fn test_sentinel_lines_dropped() {
        let mut vars = Variables::new();
        vars.set_variable("gone", SKIP_LINE.to_string());
        let confs: Vec<String> = Vec::new();
        let mapping = ScopeMapping::default_mapping();
        let descriptor = descriptor();
        let mut engine =
            TemplateEngine::new(DependencyBlock::new(&descriptor, &confs, &mapping, &[])).unwrap();

        let mut out = Vec::new();
        engine
            .run(Cursor::new("a\n  <b>${gone}</b>\nc\n"), &mut out, &vars, "<test>", "<buffer>")
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nc\n");
    }
}
