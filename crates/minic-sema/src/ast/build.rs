//! Shorthand constructors for front-ends without source positions
//!
//! Every node built here gets `Span::default()`. Front-ends that track
//! locations call [`Ast::push_stmt`] / [`Ast::push_expr`] directly.

use super::*;

impl Ast {
    pub fn int(&mut self, value: i64) -> ExprId {
        self.push_expr(ExprKind::IntLiteral(value), Span::default())
    }

    pub fn string(&mut self, value: impl Into<String>) -> ExprId {
        self.push_expr(ExprKind::StringLiteral(value.into()), Span::default())
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.push_expr(ExprKind::BoolLiteral(value), Span::default())
    }

    pub fn var(&mut self, name: impl Into<String>) -> ExprId {
        self.push_expr(ExprKind::Variable(name.into()), Span::default())
    }

    pub fn binary(&mut self, left: ExprId, op: BinaryOp, right: ExprId) -> ExprId {
        self.push_expr(ExprKind::Binary { left, op, right }, Span::default())
    }

    pub fn call(&mut self, name: impl Into<String>, args: Vec<ExprId>) -> ExprId {
        self.push_expr(
            ExprKind::Call {
                name: name.into(),
                args,
            },
            Span::default(),
        )
    }

    pub fn var_decl(&mut self, ty: PrimType, name: impl Into<String>, init: Option<ExprId>) -> StmtId {
        self.push_stmt(
            StmtKind::VarDecl {
                ty,
                name: name.into(),
                init,
            },
            Span::default(),
        )
    }

    pub fn assign(&mut self, name: impl Into<String>, value: ExprId) -> StmtId {
        self.push_stmt(
            StmtKind::Assign {
                name: name.into(),
                value,
            },
            Span::default(),
        )
    }

    pub fn fn_decl(
        &mut self,
        return_type: PrimType,
        name: impl Into<String>,
        params: Vec<Param>,
        body: StmtId,
    ) -> StmtId {
        self.push_stmt(
            StmtKind::FnDecl {
                return_type,
                name: name.into(),
                params,
                body,
            },
            Span::default(),
        )
    }

    pub fn ret(&mut self, value: ExprId) -> StmtId {
        self.push_stmt(StmtKind::Return(value), Span::default())
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.push_stmt(StmtKind::Expr(expr), Span::default())
    }

    pub fn block(&mut self, stmts: Vec<StmtId>) -> StmtId {
        self.push_stmt(StmtKind::Block(stmts), Span::default())
    }

    pub fn while_loop(&mut self, condition: ExprId, body: StmtId) -> StmtId {
        self.push_stmt(StmtKind::While { condition, body }, Span::default())
    }

    pub fn if_else(&mut self, condition: ExprId, then_branch: StmtId, else_branch: StmtId) -> StmtId {
        self.push_stmt(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            Span::default(),
        )
    }
}
