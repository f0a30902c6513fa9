//! Main runner module.
//!
//! This module contains the core Runner structure that walks the AST and
//! executes it. It owns the frame stack and borrows the program's output,
//! input and diagnostics from the caller.

use std::io::{BufRead, Write};

use log::{debug, info};

use crate::{
    ast::{ast::Node, statements::BlockStmt},
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    object::object::Object,
};

use super::{scope::ScopeStack, stmt::run_statement};

/// The state of a running program.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the AST and of the borrowed streams
pub struct Runner<'a> {
    /// Frames of the program, innermost last
    pub scopes: ScopeStack<'a>,
    /// Where `print` and `printl` write
    pub output: &'a mut dyn Write,
    /// Where `input` reads from
    pub input: &'a mut dyn BufRead,
    /// Receives warnings raised while running
    pub diagnostics: &'a mut Diagnostics,
}

impl<'a> Runner<'a> {
    /// Creates a Runner with only the program frame.
    pub fn new(
        output: &'a mut dyn Write,
        input: &'a mut dyn BufRead,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Runner {
            scopes: ScopeStack::new(),
            output,
            input,
            diagnostics,
        }
    }

    /// Runs `program` in the program frame.
    ///
    /// # Returns
    ///
    /// The first fatal runtime error, if any. Warnings go to the diagnostics.
    pub fn run(&mut self, program: &'a BlockStmt) -> Result<(), Error> {
        info!("running program with {} statements", program.body.len());

        self.run_block(program)?;
        self.output.flush().map_err(|error| {
            Error::new(
                ErrorImpl::IoError {
                    message: error.to_string(),
                },
                program.span.end.clone(),
            )
        })?;

        debug!("program finished, {} warning(s)", self.diagnostics.warnings().len());
        Ok(())
    }

    /// Runs the statements of `block` in the current frame.
    ///
    /// Every function defined directly in the block is registered first, so
    /// calls may appear before the definition. Execution stops early once
    /// the frame's return or break flag is set.
    pub fn run_block(&mut self, block: &'a BlockStmt) -> Result<(), Error> {
        for function in block.functions() {
            debug!("registering function {}", function.name);
            self.scopes.declare_function(function)?;
        }

        for statement in block.iter() {
            run_statement(self, statement)?;

            let frame = self.scopes.current();
            if frame.return_flag || frame.break_flag {
                break;
            }
        }

        Ok(())
    }

    /// Runs `block` in a fresh child frame, as the body of `if`, `else` or a
    /// bare block. A return or break inside is handed on to the current frame.
    pub fn run_branch(&mut self, block: &'a BlockStmt) -> Result<(), Error> {
        self.scopes.push(false);
        let result = self.run_block(block);
        let frame = self.scopes.pop();
        result?;

        let current = self.scopes.current_mut();
        if frame.return_flag {
            current.return_flag = true;
            current.return_value = frame.return_value;
        }
        if frame.break_flag {
            current.break_flag = true;
        }

        Ok(())
    }

    /// Reads a condition value. Anything but a Boolean raises a warning and
    /// counts as false.
    pub fn condition_holds(&mut self, value: &Object, condition: &Node) -> bool {
        match value {
            Object::Boolean(value) => *value,
            other => {
                self.diagnostics.warn(Error::new(
                    ErrorImpl::NonBooleanCondition {
                        received: other.type_name().to_string(),
                    },
                    condition.get_span().start.clone(),
                ));
                false
            }
        }
    }
}
