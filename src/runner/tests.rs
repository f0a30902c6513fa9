//! Unit tests for the runner module.
//!
//! Each test lexes and parses a small program, runs it against an in-memory
//! input and captures what it prints.

use std::rc::Rc;

use crate::{
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::lexer::tokenize,
    object::object::Object,
    parser::parser::parse,
    Position,
};

use super::{builtins::Arity, runner::Runner, scope::ScopeStack};

struct Outcome {
    output: String,
    result: Result<(), Error>,
    warnings: Vec<Error>,
}

fn run_with_input(source: &str, input: &str) -> Outcome {
    let tokens = tokenize(source.to_string(), Some("test.sp".to_string())).unwrap();
    let (_, ast) = parse(tokens, Rc::new("test.sp".to_string()));
    let ast = ast.unwrap();

    let mut output: Vec<u8> = Vec::new();
    let mut reader = input.as_bytes();
    let mut diagnostics = Diagnostics::silent("test.sp", source);

    let result = {
        let mut runner = Runner::new(&mut output, &mut reader, &mut diagnostics);
        runner.run(&ast)
    };

    Outcome {
        output: String::from_utf8(output).unwrap(),
        result,
        warnings: diagnostics.warnings().to_vec(),
    }
}

fn run(source: &str) -> Outcome {
    run_with_input(source, "")
}

fn output_of(source: &str) -> String {
    let outcome = run(source);
    if let Err(error) = &outcome.result {
        panic!("{:?} failed: {}", source, error);
    }
    outcome.output
}

fn error_of(source: &str) -> Error {
    match run(source).result {
        Ok(()) => panic!("expected {:?} to fail", source),
        Err(error) => error,
    }
}

#[test]
fn test_assignment_and_printl() {
    assert_eq!(output_of("x = 3\nprintl(x)"), "3\n");
}

#[test]
fn test_print_variants() {
    assert_eq!(output_of("print(1)\nprint(\"a\")\nprintl()\nprintl(2.0)"), "1a\n2.0\n");
}

#[test]
fn test_while_counts_up() {
    assert_eq!(output_of("a = 1\nwhile a < 5 { a = a + 1 }\nprintl(a)"), "5\n");
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(output_of("printl(1 + 2 * 3)\nprintl(2 ^ 3 ^ 2)\nprintl(-2 ^ 2)"), "7\n64\n4\n");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(output_of("printl(\"a\" + 1)\nprintl(1 + \"a\")"), "a1\n1a\n");
}

#[test]
fn test_string_subtraction_is_fatal() {
    let error = error_of("printl(1 - \"a\")");

    assert_eq!(error.get_error_name(), "InvalidOperation");
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_division_by_zero_is_fatal() {
    let error = error_of("x = 1\nprintl(x / 0)");

    assert_eq!(error.get_internal_error(), &ErrorImpl::DivisionByZero);
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_undeclared_variable() {
    let error = error_of("printl(y)");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: String::from("y")
        }
    );
    assert_eq!(error.get_position().column, 8);
}

#[test]
fn test_output_before_error_is_kept() {
    let outcome = run("printl(\"before\")\nprintl(missing)\nprintl(\"after\")");

    assert_eq!(outcome.output, "before\n");
    assert!(outcome.result.is_err());
}

#[test]
fn test_function_forward_reference() {
    assert_eq!(output_of("printl(double_it(2))\nfunc double_it(x) { return x * 2 }"), "4\n");
}

#[test]
fn test_recursion() {
    let source = "func fact(n) {\n  if n <= 1 { return 1 }\n  return n * fact(n - 1)\n}\nprintl(fact(10))";

    assert_eq!(output_of(source), "3628800\n");
}

#[test]
fn test_missing_return_value_is_null() {
    assert_eq!(output_of("func f() { return }\nprintl(f())"), "NULL\n");
    assert_eq!(output_of("func g() { x = 1 }\nprintl(g())"), "NULL\n");
}

#[test]
fn test_statements_after_return_are_skipped() {
    assert_eq!(output_of("func f() {\n  return 1\n  printl(\"no\")\n}\nprintl(f())"), "1\n");
}

#[test]
fn test_user_function_arity() {
    let error = error_of("func f(a) { }\nf(1, 2)");
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedArguments {
            expected: 1,
            received: 2
        }
    );

    let error = error_of("func f(a, b) { }\nf(1)");
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::MissingArguments {
            expected: 2,
            received: 1
        }
    );
}

#[test]
fn test_builtin_arity() {
    let error = error_of("print(1, 2)");
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedArguments {
            expected: 1,
            received: 2
        }
    );

    let error = error_of("x = int()");
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::MissingArguments {
            expected: 1,
            received: 0
        }
    );

    assert!(error_of("x = input(1)").get_error_name() == "UnexpectedArguments");
}

#[test]
fn test_nested_function_is_local() {
    let source = "func outer() {\n  func inner() { return 1 }\n  return inner()\n}\nprintl(outer())\nprintl(inner())";
    let outcome = run(source);

    assert_eq!(outcome.output, "1\n");
    match outcome.result {
        Err(error) => assert_eq!(
            error.get_internal_error(),
            &ErrorImpl::FunctionNotDeclared {
                function: String::from("inner")
            }
        ),
        Ok(()) => panic!("inner should not be visible"),
    }
}

#[test]
fn test_function_in_if_block_is_rejected() {
    let error = error_of("if true {\n  func f() { }\n}");

    assert_eq!(error.get_error_name(), "NestedFunctionNotAllowed");
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_function_redefinition() {
    assert_eq!(
        error_of("func f() { }\nfunc f() { }").get_error_name(),
        "FunctionAlreadyDeclared"
    );
    assert_eq!(
        error_of("func print(x) { }").get_error_name(),
        "FunctionAlreadyDeclared"
    );
}

#[test]
fn test_functions_see_callers_variables() {
    let source = "func show() { printl(v) }\nfunc caller() {\n  v = 7\n  show()\n}\ncaller()";

    assert_eq!(output_of(source), "7\n");
}

#[test]
fn test_assignment_updates_enclosing_frame() {
    assert_eq!(output_of("x = 1\nif true { x = 2 }\nprintl(x)"), "2\n");
    assert_eq!(
        output_of("count = 0\nfunc bump() { count = count + 1 }\nbump()\nbump()\nprintl(count)"),
        "2\n"
    );
}

#[test]
fn test_block_variables_do_not_leak() {
    assert_eq!(error_of("if true { y = 1 }\nprintl(y)").get_error_name(), "VariableNotDeclared");
    assert_eq!(error_of("{ z = 1 }\nprintl(z)").get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_parameters_shadow_outer_variables() {
    assert_eq!(output_of("x = 1\nfunc f(x) { x = 5 }\nf(2)\nprintl(x)"), "1\n");
}

#[test]
fn test_break_from_nested_if() {
    let source = "i = 0\nwhile true {\n  i++\n  if i == 3 { break }\n}\nprintl(i)";

    assert_eq!(output_of(source), "3\n");
}

#[test]
fn test_break_only_exits_inner_loop() {
    let source = "i = 0\ntotal = 0\nwhile i < 3 {\n  i++\n  while true {\n    total++\n    break\n  }\n}\nprintl(total)";

    assert_eq!(output_of(source), "3\n");
}

#[test]
fn test_break_inside_function_does_not_leave_callers_loop() {
    let source = "func stop() { break }\ni = 0\nwhile i < 3 {\n  stop()\n  i++\n}\nprintl(i)";

    assert_eq!(output_of(source), "3\n");
}

#[test]
fn test_return_from_inside_loop() {
    let source = "func find() {\n  i = 0\n  while true {\n    i++\n    if i == 4 { return i }\n  }\n}\nprintl(find())";

    assert_eq!(output_of(source), "4\n");
}

#[test]
fn test_else_if_chain() {
    let source = "func grade(n) {\n  if n > 5 {\n    return \"high\"\n  } else if n > 2 {\n    return \"mid\"\n  } else {\n    return \"low\"\n  }\n}\nprintl(grade(9))\nprintl(grade(3))\nprintl(grade(0))";

    assert_eq!(output_of(source), "high\nmid\nlow\n");
}

#[test]
fn test_non_boolean_if_condition_warns() {
    let outcome = run("if 1 { printl(\"yes\") } else { printl(\"no\") }");

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.output, "no\n");
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(
        outcome.warnings[0].get_internal_error(),
        &ErrorImpl::NonBooleanCondition {
            received: String::from("Integer")
        }
    );
    assert_eq!(outcome.warnings[0].get_position().column, 4);
}

#[test]
fn test_non_boolean_while_condition_warns() {
    let outcome = run("while \"go\" { printl(\"never\") }\nprintl(\"done\")");

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.output, "done\n");
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let source = "func t() {\n  printl(\"t\")\n  return true\n}\nx = false and t()\nprintl(x)";

    assert_eq!(output_of(source), "t\nfalse\n");
}

#[test]
fn test_cast_builtins() {
    let source = "printl(int(\"5\") + 1)\nprintl(double(1))\nprintl(bool(\"True\"))\nprintl(string(2.5) + \"!\")\nprintl(int(3.9))";

    assert_eq!(output_of(source), "6\n1.0\ntrue\n2.5!\n3\n");
}

#[test]
fn test_failed_cast_is_fatal() {
    let error = error_of("x = int(\"abc\")");

    assert_eq!(error.get_error_name(), "CastError");
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_input_reads_lines() {
    let outcome = run_with_input("name = input()\nage = int(input())\nprintl(name + \" \" + string(age + 1))", "bob\r\n41\n");

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.output, "bob 42\n");
}

#[test]
fn test_input_at_end_of_stream_is_empty() {
    let outcome = run_with_input("x = input()\nprintl(\"[\" + x + \"]\")", "");

    assert_eq!(outcome.output, "[]\n");
}

#[test]
fn test_top_level_return_stops_program() {
    assert_eq!(output_of("printl(1)\nreturn\nprintl(2)"), "1\n");
}

#[test]
fn test_scope_stack_lookup_and_assignment() {
    let mut scopes = ScopeStack::new();
    scopes.assign_variable("x", Object::Integer(1));

    scopes.push(false);
    assert_eq!(scopes.depth(), 2);
    assert_eq!(scopes.current().parent(), Some(0));
    assert_eq!(scopes.get_variable("x"), Some(&Object::Integer(1)));

    scopes.assign_variable("x", Object::Integer(2));
    scopes.assign_variable("y", Object::Integer(3));
    scopes.pop();

    assert_eq!(scopes.get_variable("x"), Some(&Object::Integer(2)));
    assert_eq!(scopes.get_variable("y"), None);
}

#[test]
fn test_scope_stack_declare_twice() {
    let mut scopes = ScopeStack::new();
    let position = Position::new(1, 1, Rc::new("test.sp".to_string()));

    assert!(scopes.declare_variable("a", Object::Null, position.clone()).is_ok());
    let error = scopes.declare_variable("a", Object::Null, position).unwrap_err();

    assert_eq!(error.get_error_name(), "VariableAlreadyDeclared");
}

#[test]
fn test_program_frame_is_never_popped() {
    let mut scopes = ScopeStack::new();
    scopes.pop();

    assert_eq!(scopes.depth(), 1);
    assert!(scopes.current().can_nest_functions());
}

#[test]
fn test_arity_check() {
    assert!(Arity::Exact(1).check(1).is_ok());
    assert!(Arity::OneOf(&[0, 1]).check(0).is_ok());
    assert_eq!(
        Arity::OneOf(&[0, 1]).check(3),
        Err(ErrorImpl::UnexpectedArguments {
            expected: 1,
            received: 3
        })
    );
    assert_eq!(
        Arity::Exact(2).check(1),
        Err(ErrorImpl::MissingArguments {
            expected: 2,
            received: 1
        })
    );
}
