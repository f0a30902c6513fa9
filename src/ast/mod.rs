/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Node` sum type, node kinds and the debug dump
/// - expressions: Payloads of expression nodes
/// - statements: Payloads of statement nodes and blocks
pub mod ast;
pub mod expressions;
pub mod statements;
