//! Semantic diagnostics and their ordered collector

use std::fmt;

use thiserror::Error;

use crate::common::Span;

/// How a name was used against its declared kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchContext {
    AssignToFunction,
    FunctionUsedAsVariable,
    VariableCalled,
    CallTargetNotFunction,
}

impl fmt::Display for MismatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MismatchContext::AssignToFunction => "assignment to function name",
            MismatchContext::FunctionUsedAsVariable => "function name used as variable",
            MismatchContext::VariableCalled => "variable called as function",
            MismatchContext::CallTargetNotFunction => "call target is not a function",
        };
        write!(f, "{}", s)
    }
}

/// Semantic error found in an otherwise well-formed program
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("duplicate declaration of '{name}' in the same scope")]
    DuplicateDeclaration { name: String },

    #[error("duplicate parameter '{param}' in function '{function}'")]
    DuplicateParameter { function: String, param: String },

    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("call to undefined function '{name}'")]
    UndefinedFunction { name: String },

    #[error("{context}: '{name}'")]
    KindMismatch { name: String, context: MismatchContext },

    #[error("argument count mismatch in call to '{function}': expected {expected}, got {actual}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::DuplicateDeclaration { .. } => "E0001",
            DiagnosticKind::DuplicateParameter { .. } => "E0002",
            DiagnosticKind::UndefinedVariable { .. } => "E0003",
            DiagnosticKind::UndefinedFunction { .. } => "E0004",
            DiagnosticKind::KindMismatch { .. } => "E0005",
            DiagnosticKind::ArgumentCountMismatch { .. } => "E0006",
        }
    }

    /// Name the diagnostic is about
    pub fn name(&self) -> &str {
        match self {
            DiagnosticKind::DuplicateDeclaration { name }
            | DiagnosticKind::UndefinedVariable { name }
            | DiagnosticKind::UndefinedFunction { name }
            | DiagnosticKind::KindMismatch { name, .. } => name,
            DiagnosticKind::DuplicateParameter { param, .. } => param,
            DiagnosticKind::ArgumentCountMismatch { function, .. } => function,
        }
    }

    /// Short text for the primary source label
    pub fn label(&self) -> String {
        match self {
            DiagnosticKind::DuplicateDeclaration { .. } => "redeclared here".into(),
            DiagnosticKind::DuplicateParameter { .. } => "repeated here".into(),
            DiagnosticKind::UndefinedVariable { .. } => "not found in this scope".into(),
            DiagnosticKind::UndefinedFunction { .. } => "no function with this name is visible".into(),
            DiagnosticKind::KindMismatch { context, .. } => context.to_string(),
            DiagnosticKind::ArgumentCountMismatch { expected, .. } => {
                format!("expected {} argument{}", expected, if *expected == 1 { "" } else { "s" })
            }
        }
    }

    /// Text for the secondary label at the related declaration
    pub fn related_label(&self) -> String {
        match self {
            DiagnosticKind::DuplicateDeclaration { .. } | DiagnosticKind::DuplicateParameter { .. } => {
                "first declared here".into()
            }
            _ => format!("'{}' declared here", self.name()),
        }
    }
}

/// One semantic error with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    /// Earlier declaration involved in the error, if any
    pub related: Option<Span>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            span,
            related: None,
        }
    }

    pub fn with_related(mut self, span: Span) -> Self {
        self.related = Some(span);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Append-only list of diagnostics in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.items.iter().map(|d| d.kind.clone()).collect()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    /// Plain-text summary, one line per diagnostic
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return "No semantic errors found.\n".to_string();
        }

        let mut out = String::from("Semantic errors:\n");
        for diagnostic in &self.items {
            out.push_str(" - ");
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
