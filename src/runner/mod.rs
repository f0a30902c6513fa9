//! Tree-walking evaluator.
//!
//! This module executes a parsed program directly from its AST:
//!
//! - runner: The Runner state and block execution
//! - stmt: Statement execution (assignment, control flow, return, break)
//! - expr: Expression evaluation and function calls
//! - scope: Frames holding variables and function definitions
//! - builtins: Builtin functions and their arities

pub mod builtins;
pub mod expr;
pub mod runner;
pub mod scope;
pub mod stmt;

#[cfg(test)]
mod tests;
