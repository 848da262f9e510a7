use std::{fmt::Display, mem};

use crate::util::bytes::{escape, lossy, FixedBuf};

use super::{
    expressions::{BinaryOp, UnaryOp},
    statements::AstSeq,
};

/// Node Types
///
/// Payload-free discriminant of [`AstNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    StrLit,
    NumLit,
    BoolLit,
    Var,
    Unary,
    Binary,
    Assign,
    If,
    IfElse,
    Block,
    Program,
}

/// Syntax tree node. Every parent owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    StrLit(FixedBuf),
    NumLit(u64),
    BoolLit(bool),
    Var(FixedBuf),
    Unary {
        op: UnaryOp,
        operand: Box<AstNode>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
    },
    /// `lhs` is always a `Var`.
    Assign {
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
    },
    If {
        cond: Box<AstNode>,
        then_br: Box<AstNode>,
    },
    IfElse {
        cond: Box<AstNode>,
        then_br: Box<AstNode>,
        else_br: Box<AstNode>,
    },
    Block(AstSeq),
    Program(AstSeq),
}

impl AstNode {
    pub fn get_node_type(&self) -> NodeType {
        match self {
            AstNode::StrLit(_) => NodeType::StrLit,
            AstNode::NumLit(_) => NodeType::NumLit,
            AstNode::BoolLit(_) => NodeType::BoolLit,
            AstNode::Var(_) => NodeType::Var,
            AstNode::Unary { .. } => NodeType::Unary,
            AstNode::Binary { .. } => NodeType::Binary,
            AstNode::Assign { .. } => NodeType::Assign,
            AstNode::If { .. } => NodeType::If,
            AstNode::IfElse { .. } => NodeType::IfElse,
            AstNode::Block(_) => NodeType::Block,
            AstNode::Program(_) => NodeType::Program,
        }
    }

    /// Name printed in debug dumps.
    pub fn label(&self) -> &'static str {
        match self {
            AstNode::StrLit(_) => "StringLiteral",
            AstNode::NumLit(_) => "NumericLiteral",
            AstNode::BoolLit(_) => "BooleanLiteral",
            AstNode::Var(_) => "Variable",
            AstNode::Unary { op, .. } => op.label(),
            AstNode::Binary { op, .. } => op.label(),
            AstNode::Assign { .. } => "Assignment",
            AstNode::If { .. } => "If",
            AstNode::IfElse { .. } => "IfElse",
            AstNode::Block(_) => "Block",
            AstNode::Program(_) => "Program",
        }
    }

    /// Direct children, in source order.
    pub fn children(&self) -> Vec<&AstNode> {
        match self {
            AstNode::StrLit(_) | AstNode::NumLit(_) | AstNode::BoolLit(_) | AstNode::Var(_) => {
                vec![]
            }
            AstNode::Unary { operand, .. } => vec![operand.as_ref()],
            AstNode::Binary { lhs, rhs, .. } | AstNode::Assign { lhs, rhs } => {
                vec![lhs.as_ref(), rhs.as_ref()]
            }
            AstNode::If { cond, then_br } => vec![cond.as_ref(), then_br.as_ref()],
            AstNode::IfElse {
                cond,
                then_br,
                else_br,
            } => vec![cond.as_ref(), then_br.as_ref(), else_br.as_ref()],
            AstNode::Block(body) | AstNode::Program(body) => body.iter().collect(),
        }
    }

    /// Statements of a `Block` or `Program`.
    pub fn body(&self) -> Option<&AstSeq> {
        match self {
            AstNode::Block(body) | AstNode::Program(body) => Some(body),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }

        count
    }

    /// Moves the direct children out onto `out`, leaving leaves in their place.
    fn detach_children(&mut self, out: &mut Vec<AstNode>) {
        let leaf = || AstNode::BoolLit(false);

        match self {
            AstNode::StrLit(_) | AstNode::NumLit(_) | AstNode::BoolLit(_) | AstNode::Var(_) => {}
            AstNode::Unary { operand, .. } => out.push(mem::replace(operand.as_mut(), leaf())),
            AstNode::Binary { lhs, rhs, .. } | AstNode::Assign { lhs, rhs } => {
                out.push(mem::replace(lhs.as_mut(), leaf()));
                out.push(mem::replace(rhs.as_mut(), leaf()));
            }
            AstNode::If { cond, then_br } => {
                out.push(mem::replace(cond.as_mut(), leaf()));
                out.push(mem::replace(then_br.as_mut(), leaf()));
            }
            AstNode::IfElse {
                cond,
                then_br,
                else_br,
            } => {
                out.push(mem::replace(cond.as_mut(), leaf()));
                out.push(mem::replace(then_br.as_mut(), leaf()));
                out.push(mem::replace(else_br.as_mut(), leaf()));
            }
            AstNode::Block(body) | AstNode::Program(body) => out.extend(body.take_nodes()),
        }
    }

    fn header(&self) -> String {
        match self {
            AstNode::StrLit(value) => format!("<{} \"{}\">", self.label(), escape(value)),
            AstNode::NumLit(value) => format!("<{} {}>", self.label(), value),
            AstNode::BoolLit(value) => format!("<{} {}>", self.label(), value),
            AstNode::Var(name) => format!("<{} \"{}\">", self.label(), lossy(name)),
            _ => format!("<{}>", self.label()),
        }
    }

    /// Tree dump, one node per line, children indented `indent` spaces
    /// deeper than their parent.
    pub fn dump(&self, indent: usize) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, indent, 0);
        out
    }

    fn dump_into(&self, out: &mut String, indent: usize, depth: usize) {
        let mut pending = vec![(self, depth)];

        while let Some((node, depth)) = pending.pop() {
            out.push_str(&" ".repeat(indent * depth));
            out.push_str(&node.header());
            out.push('\n');

            pending.extend(node.children().into_iter().rev().map(|child| (child, depth + 1)));
        }
    }
}

/// Releases the subtree with an explicit stack, so long operator chains
/// cannot exhaust the call stack.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);

        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

enum Piece<'a> {
    Node { node: &'a AstNode, leading_space: bool },
    Close,
}

/// Single-line form: `<Label payload>` for leaves, `<Label child child>`
/// for everything else.
impl Display for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![Piece::Node {
            node: self,
            leading_space: false,
        }];

        while let Some(piece) = pending.pop() {
            let (node, leading_space) = match piece {
                Piece::Close => {
                    write!(f, ">")?;
                    continue;
                }
                Piece::Node {
                    node,
                    leading_space,
                } => (node, leading_space),
            };

            if leading_space {
                write!(f, " ")?;
            }

            let children = node.children();
            if children.is_empty() {
                write!(f, "{}", node.header())?;
                continue;
            }

            write!(f, "<{}", node.label())?;
            pending.push(Piece::Close);
            pending.extend(children.into_iter().rev().map(|child| Piece::Node {
                node: child,
                leading_space: true,
            }));
        }

        Ok(())
    }
}
