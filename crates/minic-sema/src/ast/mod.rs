//! Abstract Syntax Tree definitions
//!
//! Nodes live in a single [`Ast`] arena and refer to each other through
//! [`StmtId`] / [`ExprId`] indices. The ids are stable for the lifetime of the
//! arena, which lets the symbol table key its cross-reference map by node.

mod build;
mod expr;
mod stmt;
mod types;

pub use expr::*;
pub use stmt::*;
pub use types::*;

use std::fmt;

use crate::common::Span;

/// Index of a statement in an [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StmtId(u32);

impl StmtId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stmt#{}", self.0)
    }
}

/// Index of an expression in an [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expr#{}", self.0)
    }
}

/// A complete program: the node arena plus the ordered top-level statements
#[derive(Debug, Clone, Default)]
pub struct Ast {
    stmts: Vec<Stmt>,
    exprs: Vec<Expr>,
    program: Vec<StmtId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        let id = StmtId(self.stmts.len() as u32);
        self.stmts.push(Stmt::new(kind, span));
        id
    }

    pub fn push_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(Expr::new(kind, span));
        id
    }

    /// Append a statement to the program's top level
    pub fn push_top_level(&mut self, id: StmtId) {
        self.program.push(id);
    }

    /// Top-level statements in source order
    pub fn program(&self) -> &[StmtId] {
        &self.program
    }

    pub fn stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id.index())
    }

    pub fn expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut ast = Ast::new();
        let one = ast.int(1);
        let two = ast.int(2);
        assert_eq!(one, ExprId::from_raw(0));
        assert_eq!(two, ExprId::from_raw(1));

        let decl = ast.var_decl(PrimType::Int, "x", Some(one));
        assert_eq!(decl, StmtId::from_raw(0));
        assert_eq!(ast.expr_count(), 2);
        assert_eq!(ast.stmt_count(), 1);
    }

    #[test]
    fn test_top_level_order() {
        let mut ast = Ast::new();
        let a = ast.var_decl(PrimType::Int, "a", None);
        let b = ast.var_decl(PrimType::Bool, "b", None);
        ast.push_top_level(b);
        ast.push_top_level(a);
        assert_eq!(ast.program(), &[b, a]);
    }

    #[test]
    fn test_unknown_ids_are_absent() {
        let ast = Ast::new();
        assert!(ast.stmt(StmtId::from_raw(0)).is_none());
        assert!(ast.expr(ExprId::from_raw(5)).is_none());
    }

    #[test]
    fn test_declared_name() {
        let mut ast = Ast::new();
        let body = ast.block(vec![]);
        let f = ast.fn_decl(PrimType::Int, "f", vec![], body);
        let x = ast.var("x");
        let e = ast.expr_stmt(x);

        assert_eq!(ast.stmt(f).unwrap().kind.declared_name(), Some("f"));
        assert_eq!(ast.stmt(e).unwrap().kind.declared_name(), None);
    }
}
