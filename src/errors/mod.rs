//! Error types and error reporting for the interpreter.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexical, syntax and runtime stages
//! - The diagnostics context that collects warnings and renders errors
//! - Helpful error messages and suggestions

pub mod diagnostics;
pub mod errors;
