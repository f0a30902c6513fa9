use std::slice::Iter;

use crate::Span;

use super::ast::Node;

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Node>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Node> {
        self.body.iter()
    }

    /// Function definitions directly inside this block, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FnDeclStmt> {
        self.body.iter().filter_map(|stmt| match stmt {
            Node::FnDecl(function) => Some(function),
            _ => None,
        })
    }
}

/// `name = value`, also produced by `name++` and `name--`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub name: String,
    pub value: Box<Node>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: BlockStmt,
    pub span: Span,
}

/// `if condition { body }` with an optional `Else` or `If` (else-if) branch.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Box<Node>,
    pub body: BlockStmt,
    pub else_branch: Option<Box<Node>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseStmt {
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Box<Node>,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Box<Node>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}
