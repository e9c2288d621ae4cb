//! Fatal error types and diagnostic rendering

use codespan_reporting::diagnostic::{Diagnostic as Report, Label};
use codespan_reporting::files::{self, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream};
use thiserror::Error;

use crate::ast::{ExprId, StmtId};
use crate::sema::Diagnostic;

/// Contract violation between the analyzer and whoever built the AST
///
/// These never describe a problem in the analysed program; those are
/// reported as [`Diagnostic`]s. An `AnalysisError` means the input was not a
/// well-formed AST (or the traversal itself is broken) and the run stops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("internal error: {0} is not in the AST arena")]
    DanglingStmt(StmtId),

    #[error("internal error: {0} is not in the AST arena")]
    DanglingExpr(ExprId),

    #[error("internal error: {node} must be a {expected}")]
    MalformedStmt { node: StmtId, expected: &'static str },

    #[error("internal error: {node} must be a {expected}")]
    MalformedExpr { node: ExprId, expected: &'static str },

    #[error("internal error: cannot exit the global scope")]
    ScopeUnderflow,

    #[error("AST nesting exceeds the configured limit of {limit} levels")]
    NestingTooDeep { limit: usize },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Print a semantic diagnostic to stderr
    pub fn report(&self, file_id: usize, diagnostic: &Diagnostic) {
        let report = Self::to_report(file_id, diagnostic);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &report);
    }

    /// Render diagnostics without colour, in order
    pub fn render(&self, file_id: usize, diagnostics: &[Diagnostic]) -> Result<String, files::Error> {
        let mut buffer = NoColor::new(Vec::new());
        for diagnostic in diagnostics {
            let report = Self::to_report(file_id, diagnostic);
            term::emit(&mut buffer, &self.config, &self.files, &report)?;
        }
        Ok(String::from_utf8_lossy(&buffer.into_inner()).into_owned())
    }

    fn to_report(file_id: usize, diagnostic: &Diagnostic) -> Report<usize> {
        let mut labels = vec![
            Label::primary(file_id, diagnostic.span.range()).with_message(diagnostic.kind.label()),
        ];
        if let Some(related) = diagnostic.related {
            labels.push(
                Label::secondary(file_id, related.range()).with_message(diagnostic.kind.related_label()),
            );
        }

        Report::error()
            .with_code(diagnostic.kind.code())
            .with_message(diagnostic.kind.to_string())
            .with_labels(labels)
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Span;
    use crate::sema::{DiagnosticKind, MismatchContext};

    #[test]
    fn test_render_duplicate_points_at_both_declarations() {
        let source = "int x = 1;\nint x = 2;\n";
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("dup.mc", source);

        let diagnostic = Diagnostic::new(
            DiagnosticKind::DuplicateDeclaration { name: "x".into() },
            Span::new(11, 21),
        )
        .with_related(Span::new(0, 10));

        let out = reporter.render(file_id, &[diagnostic]).unwrap();
        assert!(out.contains("error[E0001]"));
        assert!(out.contains("duplicate declaration of 'x' in the same scope"));
        assert!(out.contains("dup.mc:2:1"));
        assert!(out.contains("first declared here"));
    }

    #[test]
    fn test_render_preserves_order() {
        let source = "x();\ny = 1;\n";
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("order.mc", source);

        let first = Diagnostic::new(
            DiagnosticKind::KindMismatch {
                name: "x".into(),
                context: MismatchContext::VariableCalled,
            },
            Span::new(0, 3),
        );
        let second = Diagnostic::new(
            DiagnosticKind::UndefinedVariable { name: "y".into() },
            Span::new(5, 11),
        );

        let out = reporter.render(file_id, &[first, second]).unwrap();
        let called = out.find("variable called as function").unwrap();
        let undefined = out.find("undefined variable 'y'").unwrap();
        assert!(called < undefined);
    }

    #[test]
    fn test_render_rejects_unknown_file() {
        let reporter = DiagnosticReporter::new();
        let diagnostic = Diagnostic::new(
            DiagnosticKind::UndefinedFunction { name: "f".into() },
            Span::new(0, 1),
        );
        assert!(reporter.render(7, &[diagnostic]).is_err());
    }

    #[test]
    fn test_fatal_error_messages() {
        assert_eq!(
            AnalysisError::ScopeUnderflow.to_string(),
            "internal error: cannot exit the global scope"
        );
        assert_eq!(
            AnalysisError::MalformedStmt { node: StmtId::from_raw(3), expected: "block" }.to_string(),
            "internal error: stmt#3 must be a block"
        );
    }
}
