//! Statement AST nodes

use super::{ExprId, Param, PrimType, StmtId};
use crate::common::Span;

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
///
/// Children that must be blocks (`FnDecl::body`, `While::body` and both
/// `If` branches) are plain [`StmtId`]s; the analyzer rejects anything else
/// as a malformed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Variable declaration: type name [= init];
    VarDecl {
        ty: PrimType,
        name: String,
        init: Option<ExprId>,
    },

    /// Assignment: name = value;
    Assign {
        name: String,
        value: ExprId,
    },

    /// Function declaration: type name(params) { body }
    FnDecl {
        return_type: PrimType,
        name: String,
        params: Vec<Param>,
        body: StmtId,
    },

    /// Return statement: return value;
    Return(ExprId),

    /// Expression statement: expr;
    Expr(ExprId),

    /// Block: { ... }
    Block(Vec<StmtId>),

    /// While loop: while (cond) { body }
    While {
        condition: ExprId,
        body: StmtId,
    },

    /// If statement; an omitted else is an empty block
    If {
        condition: ExprId,
        then_branch: StmtId,
        else_branch: StmtId,
    },
}

impl StmtKind {
    /// Name introduced by a declaring statement
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            StmtKind::VarDecl { name, .. } | StmtKind::FnDecl { name, .. } => Some(name),
            _ => None,
        }
    }
}
