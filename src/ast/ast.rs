use crate::Span;

use super::{
    expressions::{
        BinaryExpr, BinaryOperator, BooleanExpr, CallExpr, DoubleExpr, IntegerExpr, NegateExpr, StringExpr,
        VariableExpr,
    },
    statements::{
        AssignmentStmt, BlockStmt, BreakStmt, ElseStmt, FnDeclStmt, IfStmt, ReturnStmt, WhileStmt,
    },
};

/// Node
///
/// One syntactic construct. Every node owns its children, so cloning a node
/// copies the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Integer(IntegerExpr),
    Double(DoubleExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Variable(VariableExpr),
    Binary(BinaryExpr),
    Negate(NegateExpr),
    Call(CallExpr),
    Assignment(AssignmentStmt),
    Block(BlockStmt),
    FnDecl(FnDeclStmt),
    If(IfStmt),
    Else(ElseStmt),
    While(WhileStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
}

/// Node Kinds
///
/// Flat tag of a node; each binary operator is its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Integer,
    Double,
    String,
    Boolean,
    Variable,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Power,
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterEquals,
    LessEquals,
    And,
    Or,
    Negate,
    Assignment,
    Block,
    Call,
    FnDecl,
    If,
    Else,
    While,
    Return,
    Break,
}

impl From<BinaryOperator> for NodeKind {
    fn from(operator: BinaryOperator) -> Self {
        match operator {
            BinaryOperator::Add => NodeKind::Add,
            BinaryOperator::Subtract => NodeKind::Subtract,
            BinaryOperator::Multiply => NodeKind::Multiply,
            BinaryOperator::Divide => NodeKind::Divide,
            BinaryOperator::Modulus => NodeKind::Modulus,
            BinaryOperator::Power => NodeKind::Power,
            BinaryOperator::Equals => NodeKind::Equals,
            BinaryOperator::NotEquals => NodeKind::NotEquals,
            BinaryOperator::Greater => NodeKind::Greater,
            BinaryOperator::Less => NodeKind::Less,
            BinaryOperator::GreaterEquals => NodeKind::GreaterEquals,
            BinaryOperator::LessEquals => NodeKind::LessEquals,
            BinaryOperator::And => NodeKind::And,
            BinaryOperator::Or => NodeKind::Or,
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Integer(_) => NodeKind::Integer,
            Node::Double(_) => NodeKind::Double,
            Node::String(_) => NodeKind::String,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Variable(_) => NodeKind::Variable,
            Node::Binary(binary) => binary.operator.into(),
            Node::Negate(_) => NodeKind::Negate,
            Node::Call(_) => NodeKind::Call,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::Block(_) => NodeKind::Block,
            Node::FnDecl(_) => NodeKind::FnDecl,
            Node::If(_) => NodeKind::If,
            Node::Else(_) => NodeKind::Else,
            Node::While(_) => NodeKind::While,
            Node::Return(_) => NodeKind::Return,
            Node::Break(_) => NodeKind::Break,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Node::Integer(node) => &node.span,
            Node::Double(node) => &node.span,
            Node::String(node) => &node.span,
            Node::Boolean(node) => &node.span,
            Node::Variable(node) => &node.span,
            Node::Binary(node) => &node.span,
            Node::Negate(node) => &node.span,
            Node::Call(node) => &node.span,
            Node::Assignment(node) => &node.span,
            Node::Block(node) => &node.span,
            Node::FnDecl(node) => &node.span,
            Node::If(node) => &node.span,
            Node::Else(node) => &node.span,
            Node::While(node) => &node.span,
            Node::Return(node) => &node.span,
            Node::Break(node) => &node.span,
        }
    }

    /// Indented tree view used by `--debug`, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.write_dump(&mut out, 0);
        out
    }

    fn label(&self) -> String {
        let kind = format!("{:?}", self.kind());
        match self {
            Node::Integer(node) => format!("{} {}", kind, node.value),
            Node::Double(node) => format!("{} {:?}", kind, node.value),
            Node::String(node) => format!("{} {:?}", kind, node.value),
            Node::Boolean(node) => format!("{} {}", kind, node.value),
            Node::Variable(node) => format!("{} {}", kind, node.name),
            Node::Call(node) => format!("{} {}", kind, node.name),
            Node::Assignment(node) => format!("{} {}", kind, node.name),
            Node::FnDecl(node) => format!("{} {}({})", kind, node.name, node.parameters.join(", ")),
            _ => kind,
        }
    }

    /// Direct child nodes in positional order.
    ///
    /// Bodies are `BlockStmt` fields rather than nodes, so an `If` yields its
    /// condition followed by the else branch, if any; a `Block` yields its
    /// statements.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Binary(node) => vec![&*node.left, &*node.right],
            Node::Negate(node) => vec![&*node.operand],
            Node::Call(node) => node.arguments.iter().collect(),
            Node::Assignment(node) => vec![&*node.value],
            Node::Block(node) => node.iter().collect(),
            Node::If(node) => {
                let mut children = vec![&*node.condition];
                if let Some(else_branch) = &node.else_branch {
                    children.push(&**else_branch);
                }
                children
            }
            Node::While(node) => vec![&*node.condition],
            Node::Return(node) => node.value.iter().map(|value| &**value).collect(),
            _ => vec![],
        }
    }

    fn write_dump(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.label());
        out.push('\n');

        match self {
            Node::FnDecl(node) => write_block(&node.body, out, depth + 1),
            Node::Else(node) => write_block(&node.body, out, depth + 1),
            Node::If(node) => {
                node.condition.write_dump(out, depth + 1);
                write_block(&node.body, out, depth + 1);
                if let Some(else_branch) = &node.else_branch {
                    else_branch.write_dump(out, depth + 1);
                }
            }
            Node::While(node) => {
                node.condition.write_dump(out, depth + 1);
                write_block(&node.body, out, depth + 1);
            }
            _ => {
                for child in self.children() {
                    child.write_dump(out, depth + 1);
                }
            }
        }
    }
}

impl BlockStmt {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        write_block(self, &mut out, 0);
        out
    }
}

fn write_block(block: &BlockStmt, out: &mut String, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str("Block\n");
    write_block_body(block, out, depth + 1);
}

fn write_block_body(block: &BlockStmt, out: &mut String, depth: usize) {
    for stmt in block.iter() {
        stmt.write_dump(out, depth);
    }
}
