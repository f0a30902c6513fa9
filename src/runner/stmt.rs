use log::debug;

use crate::{
    ast::{
        ast::Node,
        statements::{IfStmt, ReturnStmt, WhileStmt},
    },
    errors::errors::Error,
    object::object::Object,
};

use super::{expr::{evaluate_call, evaluate_expression}, runner::Runner};

pub fn run_statement<'a>(runner: &mut Runner<'a>, statement: &'a Node) -> Result<(), Error> {
    match statement {
        Node::Assignment(assignment) => {
            let value = evaluate_expression(runner, &assignment.value)?;
            runner.scopes.assign_variable(&assignment.name, value);
        }
        Node::Call(call) => {
            evaluate_call(runner, call)?;
        }
        Node::Block(block) => runner.run_branch(block)?,
        // Registered when the enclosing block starts
        Node::FnDecl(_) => {}
        Node::If(if_stmt) => run_if(runner, if_stmt)?,
        Node::Else(else_stmt) => runner.run_branch(&else_stmt.body)?,
        Node::While(while_stmt) => run_while(runner, while_stmt)?,
        Node::Return(return_stmt) => run_return(runner, return_stmt)?,
        Node::Break(_) => runner.scopes.current_mut().break_flag = true,
        expression => {
            evaluate_expression(runner, expression)?;
        }
    }

    Ok(())
}

fn run_if<'a>(runner: &mut Runner<'a>, if_stmt: &'a IfStmt) -> Result<(), Error> {
    let condition = evaluate_expression(runner, &if_stmt.condition)?;

    if runner.condition_holds(&condition, &if_stmt.condition) {
        return runner.run_branch(&if_stmt.body);
    }

    match if_stmt.else_branch.as_deref() {
        Some(branch) => run_statement(runner, branch),
        None => Ok(()),
    }
}

/// The condition is evaluated in the enclosing frame; every iteration runs
/// the body in a new frame. A break ends only this loop, a return is handed on.
fn run_while<'a>(runner: &mut Runner<'a>, while_stmt: &'a WhileStmt) -> Result<(), Error> {
    let mut iterations: usize = 0;

    loop {
        let condition = evaluate_expression(runner, &while_stmt.condition)?;
        if !runner.condition_holds(&condition, &while_stmt.condition) {
            break;
        }

        runner.scopes.push(false);
        let result = runner.run_block(&while_stmt.body);
        let frame = runner.scopes.pop();
        result?;
        iterations += 1;

        if frame.return_flag {
            let current = runner.scopes.current_mut();
            current.return_flag = true;
            current.return_value = frame.return_value;
            break;
        }
        if frame.break_flag {
            break;
        }
    }

    debug!("while loop ran {} iteration(s)", iterations);
    Ok(())
}

fn run_return(runner: &mut Runner<'_>, return_stmt: &ReturnStmt) -> Result<(), Error> {
    let value = match &return_stmt.value {
        Some(value) => evaluate_expression(runner, value)?,
        None => Object::Null,
    };

    let frame = runner.scopes.current_mut();
    frame.return_flag = true;
    frame.return_value = Some(value);
    Ok(())
}
