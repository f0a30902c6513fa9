use log::debug;

use crate::{
    ast::{ast::Node, expressions::CallExpr, statements::FnDeclStmt},
    errors::errors::{Error, ErrorImpl},
    object::object::Object,
    Position,
};

use super::{builtins, runner::Runner};

pub fn evaluate_expression(runner: &mut Runner<'_>, expression: &Node) -> Result<Object, Error> {
    match expression {
        Node::Integer(integer) => Ok(Object::Integer(integer.value)),
        Node::Double(double) => Ok(Object::Double(double.value)),
        Node::String(string) => Ok(Object::String(string.value.clone())),
        Node::Boolean(boolean) => Ok(Object::Boolean(boolean.value)),
        Node::Variable(variable) => runner
            .scopes
            .get_variable(&variable.name)
            .cloned()
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::VariableNotDeclared {
                        variable: variable.name.clone(),
                    },
                    variable.span.start.clone(),
                )
            }),
        Node::Binary(binary) => {
            // Both sides are always evaluated, `and`/`or` included
            let left = evaluate_expression(runner, &binary.left)?;
            let right = evaluate_expression(runner, &binary.right)?;

            left.binary(binary.operator, &right)
                .map_err(|error| Error::new(error, binary.span.start.clone()))
        }
        Node::Negate(negate) => evaluate_expression(runner, &negate.operand)?
            .negate()
            .map_err(|error| Error::new(error, negate.span.start.clone())),
        Node::Call(call) => evaluate_call(runner, call),
        statement => Err(Error::new(
            ErrorImpl::InvalidOperation {
                operation: String::from("evaluate"),
                operand: format!("{:?}", statement.kind()),
            },
            statement.get_span().start.clone(),
        )),
    }
}

/// Calls a builtin or a user function.
///
/// Arguments are evaluated in the caller's frame. A user function runs in a
/// new frame whose parent is the caller's frame, so its body sees the
/// caller's variables and functions.
pub fn evaluate_call(runner: &mut Runner<'_>, call: &CallExpr) -> Result<Object, Error> {
    let position = call.span.start.clone();

    let mut arguments = Vec::with_capacity(call.arguments.len());
    for argument in &call.arguments {
        arguments.push(evaluate_expression(runner, argument)?);
    }

    if let Some(builtin) = builtins::lookup(&call.name) {
        builtin
            .arity
            .check(arguments.len())
            .map_err(|error| Error::new(error, position.clone()))?;

        return (builtin.func)(&mut *runner.output, &mut *runner.input, &arguments)
            .map_err(|error| Error::new(error, position));
    }

    let function = runner.scopes.get_function(&call.name).ok_or_else(|| {
        Error::new(
            ErrorImpl::FunctionNotDeclared {
                function: call.name.clone(),
            },
            position.clone(),
        )
    })?;

    let expected = function.parameters.len();
    let received = arguments.len();
    if received > expected {
        return Err(Error::new(ErrorImpl::UnexpectedArguments { expected, received }, position));
    }
    if received < expected {
        return Err(Error::new(ErrorImpl::MissingArguments { expected, received }, position));
    }

    debug!("calling {} at depth {}", function.name, runner.scopes.depth());

    runner.scopes.push(true);
    let result = bind_and_run(runner, function, arguments, &position);
    let frame = runner.scopes.pop();
    result?;

    Ok(frame.return_value.unwrap_or(Object::Null))
}

fn bind_and_run<'a>(
    runner: &mut Runner<'a>,
    function: &'a FnDeclStmt,
    arguments: Vec<Object>,
    position: &Position,
) -> Result<(), Error> {
    for (parameter, value) in function.parameters.iter().zip(arguments) {
        runner
            .scopes
            .declare_variable(parameter, value, position.clone())?;
    }

    runner.run_block(&function.body)
}
