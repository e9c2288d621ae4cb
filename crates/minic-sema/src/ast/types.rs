//! Primitive types, operators and parameters

use std::fmt;

use crate::common::Span;

/// Declared type of a variable, parameter or function result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimType {
    Int,
    String,
    Bool,
}

impl fmt::Display for PrimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimType::Int => write!(f, "int"),
            PrimType::String => write!(f, "string"),
            PrimType::Bool => write!(f, "bool"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
        };
        write!(f, "{}", s)
    }
}

/// Function parameter: `int a`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: PrimType,
    pub name: String,
    pub span: Span,
}

impl Param {
    pub fn new(ty: PrimType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            span: Span::default(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}
