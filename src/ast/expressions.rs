use std::fmt::Display;

use crate::{util::bytes::FixedBuf, MK_BOX_NODE};

use super::ast::AstNode;

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    LogicalNot,
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn label(&self) -> &'static str {
        match self {
            UnaryOp::LogicalNot => "LogicalNot",
            UnaryOp::Plus => "UnaryPlus",
            UnaryOp::Minus => "UnaryMinus",
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Infix operators, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,

    Equ,
    Neq,

    Lt,
    Lte,
    Gt,
    Gte,

    Add,
    Sub,

    Mul,
    Div,
    Mod,

    Exp,
}

impl BinaryOp {
    pub fn label(&self) -> &'static str {
        match self {
            BinaryOp::LogicalOr => "LogicalOr",
            BinaryOp::LogicalAnd => "LogicalAnd",
            BinaryOp::Equ => "RelationalEqu",
            BinaryOp::Neq => "RelationalNeq",
            BinaryOp::Lt => "RelationalLt",
            BinaryOp::Lte => "RelationalLte",
            BinaryOp::Gt => "RelationalGt",
            BinaryOp::Gte => "RelationalGte",
            BinaryOp::Add => "BinaryAddition",
            BinaryOp::Sub => "BinarySubtraction",
            BinaryOp::Mul => "BinaryMultiplication",
            BinaryOp::Div => "BinaryDivision",
            BinaryOp::Mod => "BinaryModulus",
            BinaryOp::Exp => "BinaryExponentiation",
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Expression constructors

impl AstNode {
    pub fn string(value: FixedBuf) -> AstNode {
        AstNode::StrLit(value)
    }

    pub fn number(value: u64) -> AstNode {
        AstNode::NumLit(value)
    }

    pub fn boolean(value: bool) -> AstNode {
        AstNode::BoolLit(value)
    }

    pub fn variable(name: FixedBuf) -> AstNode {
        AstNode::Var(name)
    }

    pub fn unary(op: UnaryOp, operand: AstNode) -> AstNode {
        AstNode::Unary {
            op,
            operand: MK_BOX_NODE!(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> AstNode {
        AstNode::Binary {
            op,
            lhs: MK_BOX_NODE!(lhs),
            rhs: MK_BOX_NODE!(rhs),
        }
    }
}
