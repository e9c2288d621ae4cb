//! Semantic analyzer - name, kind and arity checking
//!
//! Pass 1 walks the tree in source order and keeps the scope stack in step
//! with the nesting of blocks. It defines every declaration, checks variable
//! uses and assignment targets, and records each call whose target is not
//! already known to be a variable. Pass 2 judges the recorded calls once
//! every declaration has been seen, which is what allows a function to be
//! called before the statement that declares it.

use tracing::{debug, trace};

use super::config::AnalyzerConfig;
use super::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, MismatchContext};
use super::scope::{ScopeId, Symbol, SymbolKind, SymbolTable};
use crate::ast::*;
use crate::common::{AnalysisError, AnalysisResult, Span};

/// Outcome of a completed run
#[derive(Debug)]
pub struct Analysis {
    pub diagnostics: Diagnostics,
    /// Final symbol table, including the declaration cross-reference map
    pub symbols: SymbolTable,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Call recorded in pass 1 together with the frame it appeared in
#[derive(Debug, Clone, Copy)]
struct CallSite {
    call: ExprId,
    scope: ScopeId,
    /// Symbols defined before the call
    visible: usize,
}

/// Two-pass semantic analyzer for one program
pub struct SemanticAnalyzer<'a> {
    ast: &'a Ast,
    config: AnalyzerConfig,
    symbols: SymbolTable,
    diagnostics: Diagnostics,
    call_sites: Vec<CallSite>,
    depth: usize,
}

/// Analyze `ast` with the default configuration
pub fn analyze(ast: &Ast) -> AnalysisResult<Analysis> {
    SemanticAnalyzer::new(ast).analyze()
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        Self::with_config(ast, AnalyzerConfig::default())
    }

    pub fn with_config(ast: &'a Ast, config: AnalyzerConfig) -> Self {
        Self {
            ast,
            config,
            symbols: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            call_sites: Vec::new(),
            depth: 0,
        }
    }

    /// Run both passes
    ///
    /// Semantic errors never stop the run; they are all collected in
    /// [`Analysis::diagnostics`]. `Err` is reserved for trees that break the
    /// AST contract.
    pub fn analyze(mut self) -> AnalysisResult<Analysis> {
        let ast = self.ast;

        debug!(statements = ast.program().len(), "pass 1: declarations and uses");
        for &stmt in ast.program() {
            self.visit_stmt(stmt)?;
        }
        debug!(
            diagnostics = self.diagnostics.len(),
            call_sites = self.call_sites.len(),
            "pass 1 complete"
        );

        self.check_call_sites()?;
        debug!(
            diagnostics = self.diagnostics.len(),
            symbols = self.symbols.symbols().len(),
            "semantic analysis complete"
        );

        Ok(Analysis {
            diagnostics: self.diagnostics,
            symbols: self.symbols,
        })
    }

    // ---- pass 1 ----

    fn visit_stmt(&mut self, id: StmtId) -> AnalysisResult<()> {
        self.descend()?;
        let result = self.visit_stmt_kind(id);
        self.depth -= 1;
        result
    }

    fn visit_stmt_kind(&mut self, id: StmtId) -> AnalysisResult<()> {
        let ast = self.ast;
        let stmt = ast.stmt(id).ok_or(AnalysisError::DanglingStmt(id))?;

        match &stmt.kind {
            StmtKind::VarDecl { ty, name, init } => {
                self.declare(id, Symbol::variable(name.clone(), *ty, stmt.span));
                // Defined before the initializer is visited: `int x = x;` sees itself.
                if let Some(init) = *init {
                    self.visit_expr(init)?;
                }
            }

            StmtKind::Assign { name, value } => {
                match self.symbols.resolve(name) {
                    None => self.report(
                        DiagnosticKind::UndefinedVariable { name: name.clone() },
                        stmt.span,
                        None,
                    ),
                    Some(sym) if sym.is_function() => {
                        let declared = sym.span;
                        self.report(
                            DiagnosticKind::KindMismatch {
                                name: name.clone(),
                                context: MismatchContext::AssignToFunction,
                            },
                            stmt.span,
                            Some(declared),
                        );
                    }
                    Some(_) => {}
                }
                self.visit_expr(*value)?;
            }

            StmtKind::FnDecl {
                return_type,
                name,
                params,
                body,
            } => {
                // Declared in the enclosing frame so siblings (and the body) can call it.
                self.declare(
                    id,
                    Symbol::function(name.clone(), *return_type, params.clone(), stmt.span),
                );

                self.symbols.enter_scope();
                for param in params {
                    let symbol = Symbol::variable(param.name.clone(), param.ty, param.span);
                    if let Err(first) = self.symbols.define_in_current_scope(symbol) {
                        let first = self.symbols.symbol(first).span;
                        self.report(
                            DiagnosticKind::DuplicateParameter {
                                function: name.clone(),
                                param: param.name.clone(),
                            },
                            param.span,
                            Some(first),
                        );
                    }
                }
                // Parameters and body locals share one frame.
                self.visit_block_items(*body)?;
                self.symbols.exit_scope()?;
            }

            StmtKind::Return(value) | StmtKind::Expr(value) => {
                self.visit_expr(*value)?;
            }

            StmtKind::Block(items) => {
                self.symbols.enter_scope();
                for &item in items {
                    self.visit_stmt(item)?;
                }
                self.symbols.exit_scope()?;
            }

            StmtKind::While { condition, body } => {
                self.visit_expr(*condition)?;
                self.visit_scoped_block(*body)?;
            }

            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.visit_expr(*condition)?;
                self.visit_scoped_block(*then_branch)?;
                self.visit_scoped_block(*else_branch)?;
            }
        }

        Ok(())
    }

    /// Visit a block's statements in a fresh frame
    fn visit_scoped_block(&mut self, block: StmtId) -> AnalysisResult<()> {
        self.symbols.enter_scope();
        self.visit_block_items(block)?;
        self.symbols.exit_scope()
    }

    /// Visit a block's statements in the current frame
    fn visit_block_items(&mut self, block: StmtId) -> AnalysisResult<()> {
        let ast = self.ast;
        let stmt = ast.stmt(block).ok_or(AnalysisError::DanglingStmt(block))?;
        let StmtKind::Block(items) = &stmt.kind else {
            return Err(AnalysisError::MalformedStmt {
                node: block,
                expected: "block",
            });
        };

        for &item in items {
            self.visit_stmt(item)?;
        }
        Ok(())
    }

    fn visit_expr(&mut self, id: ExprId) -> AnalysisResult<()> {
        self.descend()?;
        let result = self.visit_expr_kind(id);
        self.depth -= 1;
        result
    }

    fn visit_expr_kind(&mut self, id: ExprId) -> AnalysisResult<()> {
        let ast = self.ast;
        let expr = ast.expr(id).ok_or(AnalysisError::DanglingExpr(id))?;

        match &expr.kind {
            ExprKind::IntLiteral(_) | ExprKind::StringLiteral(_) | ExprKind::BoolLiteral(_) => {}

            ExprKind::Variable(name) => match self.symbols.resolve(name) {
                None => self.report(
                    DiagnosticKind::UndefinedVariable { name: name.clone() },
                    expr.span,
                    None,
                ),
                Some(sym) if sym.is_function() => {
                    let declared = sym.span;
                    self.report(
                        DiagnosticKind::KindMismatch {
                            name: name.clone(),
                            context: MismatchContext::FunctionUsedAsVariable,
                        },
                        expr.span,
                        Some(declared),
                    );
                }
                Some(_) => {}
            },

            ExprKind::Binary { left, right, .. } => {
                self.visit_expr(*left)?;
                self.visit_expr(*right)?;
            }

            ExprKind::Call { name, args } => {
                match self.symbols.resolve(name) {
                    Some(sym) if sym.is_variable() => {
                        let declared = sym.span;
                        self.report(
                            DiagnosticKind::KindMismatch {
                                name: name.clone(),
                                context: MismatchContext::VariableCalled,
                            },
                            expr.span,
                            Some(declared),
                        );
                    }
                    // Unknown names may still be functions declared further on.
                    _ => self.call_sites.push(CallSite {
                        call: id,
                        scope: self.symbols.current_scope(),
                        visible: self.symbols.symbols().len(),
                    }),
                }
                for &arg in args {
                    self.visit_expr(arg)?;
                }
            }
        }

        Ok(())
    }

    fn declare(&mut self, node: StmtId, symbol: Symbol) {
        let span = symbol.span;
        let name = symbol.name.clone();
        match self.symbols.define_in_current_scope(symbol) {
            Ok(id) => self.symbols.link(node, id),
            Err(first) => {
                let first = self.symbols.symbol(first).span;
                self.report(DiagnosticKind::DuplicateDeclaration { name }, span, Some(first));
            }
        }
    }

    fn descend(&mut self) -> AnalysisResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(AnalysisError::NestingTooDeep {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    // ---- pass 2 ----

    /// Judge every recorded call against the frame chain it appeared in
    fn check_call_sites(&mut self) -> AnalysisResult<()> {
        let ast = self.ast;
        let call_sites = std::mem::take(&mut self.call_sites);
        debug!(call_sites = call_sites.len(), "pass 2: deferred calls");

        for site in call_sites {
            let expr = ast.expr(site.call).ok_or(AnalysisError::DanglingExpr(site.call))?;
            let ExprKind::Call { name, args } = &expr.kind else {
                return Err(AnalysisError::MalformedExpr {
                    node: site.call,
                    expected: "call",
                });
            };

            let finding = match self.symbols.resolve_call_target(site.scope, name, site.visible) {
                None => Some((DiagnosticKind::UndefinedFunction { name: name.clone() }, None)),
                Some(sym) => match &sym.kind {
                    SymbolKind::Variable { .. } => Some((
                        DiagnosticKind::KindMismatch {
                            name: name.clone(),
                            context: MismatchContext::CallTargetNotFunction,
                        },
                        Some(sym.span),
                    )),
                    SymbolKind::Function { params, .. } if params.len() != args.len() => Some((
                        DiagnosticKind::ArgumentCountMismatch {
                            function: name.clone(),
                            expected: params.len(),
                            actual: args.len(),
                        },
                        Some(sym.span),
                    )),
                    SymbolKind::Function { .. } => None,
                },
            };

            if let Some((kind, related)) = finding {
                self.report(kind, expr.span, related);
            }
        }

        Ok(())
    }

    fn report(&mut self, kind: DiagnosticKind, span: Span, related: Option<Span>) {
        trace!(code = kind.code(), %span, "{}", kind);
        let mut diagnostic = Diagnostic::new(kind, span);
        diagnostic.related = related;
        self.diagnostics.push(diagnostic);
    }
}
