use std::{collections::TryReserveError, mem, ops::Index, slice::Iter};

use crate::MK_BOX_NODE;

use super::ast::AstNode;

/// Ordered list of owned statements, the body of a block or a program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AstSeq {
    nodes: Vec<AstNode>,
}

impl AstSeq {
    pub fn new() -> Self {
        AstSeq { nodes: vec![] }
    }

    /// Appends a node, reporting allocation failure instead of aborting.
    pub fn push(&mut self, node: AstNode) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(1)?;
        self.nodes.push(node);
        Ok(())
    }

    /// Moves every node out, leaving the sequence empty.
    pub(crate) fn take_nodes(&mut self) -> Vec<AstNode> {
        mem::take(&mut self.nodes)
    }

    pub fn get(&self, index: usize) -> Option<&AstNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, AstNode> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[AstNode] {
        &self.nodes
    }

    /// Bracketed debug form: `<AstSeq(N): [<...>, <...>]>`, laid out like
    /// [`crate::lexer::tokens::TokenSeq::dump`].
    pub fn dump(&self, indent: Option<usize>) -> String {
        let mut out = format!("<AstSeq({}): [", self.nodes.len());

        if !self.nodes.is_empty() {
            let separator = match indent {
                Some(width) => format!(",\n{}", " ".repeat(width)),
                None => String::from(", "),
            };

            if let Some(width) = indent {
                out.push('\n');
                out.push_str(&" ".repeat(width));
            }

            let rendered = self.nodes.iter().map(|node| node.to_string()).collect::<Vec<_>>();
            out.push_str(&rendered.join(&separator));

            if indent.is_some() {
                out.push('\n');
            }
        }

        out.push_str("]>");
        out
    }
}

impl Index<usize> for AstSeq {
    type Output = AstNode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a AstSeq {
    type Item = &'a AstNode;
    type IntoIter = Iter<'a, AstNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

// Statement constructors

impl AstNode {
    pub fn assign(lhs: AstNode, rhs: AstNode) -> AstNode {
        AstNode::Assign {
            lhs: MK_BOX_NODE!(lhs),
            rhs: MK_BOX_NODE!(rhs),
        }
    }

    pub fn if_stmt(cond: AstNode, then_br: AstNode) -> AstNode {
        AstNode::If {
            cond: MK_BOX_NODE!(cond),
            then_br: MK_BOX_NODE!(then_br),
        }
    }

    pub fn if_else_stmt(cond: AstNode, then_br: AstNode, else_br: AstNode) -> AstNode {
        AstNode::IfElse {
            cond: MK_BOX_NODE!(cond),
            then_br: MK_BOX_NODE!(then_br),
            else_br: MK_BOX_NODE!(else_br),
        }
    }

    pub fn block(body: AstSeq) -> AstNode {
        AstNode::Block(body)
    }

    pub fn program(body: AstSeq) -> AstNode {
        AstNode::Program(body)
    }
}
