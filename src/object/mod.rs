//! Dynamic runtime values.
//!
//! - object: The `Object` type, its casts and canonical text
//! - operations: Arithmetic, comparison and logical operators
pub mod object;
pub mod operations;
