//! Expression AST nodes

use super::{BinaryOp, ExprId};
use crate::common::Span;

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLiteral(i64),
    StringLiteral(String),
    BoolLiteral(bool),

    /// Variable reference
    Variable(String),

    /// Binary operation: left op right
    Binary {
        left: ExprId,
        op: BinaryOp,
        right: ExprId,
    },

    /// Function call: name(args)
    Call {
        name: String,
        args: Vec<ExprId>,
    },
}
