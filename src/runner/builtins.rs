use std::io::{BufRead, Write};

use crate::{errors::errors::ErrorImpl, object::object::Object};

/// A builtin receives the program's output and input streams and the
/// evaluated arguments.
type BuiltinFn = fn(&mut dyn Write, &mut dyn BufRead, &[Object]) -> Result<Object, ErrorImpl>;

/// Allowed argument counts of a builtin.
#[derive(Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    /// Fails with `UnexpectedArguments` when `received` is above every
    /// allowed count and with `MissingArguments` otherwise.
    pub fn check(&self, received: usize) -> Result<(), ErrorImpl> {
        let allowed: &[usize] = match self {
            Arity::Exact(expected) => std::slice::from_ref(expected),
            Arity::OneOf(allowed) => allowed,
        };

        if allowed.contains(&received) {
            return Ok(());
        }

        let max = allowed.iter().copied().max().unwrap_or(0);
        if received > max {
            Err(ErrorImpl::UnexpectedArguments { expected: max, received })
        } else {
            let min = allowed.iter().copied().min().unwrap_or(0);
            Err(ErrorImpl::MissingArguments { expected: min, received })
        }
    }
}

pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub func: BuiltinFn,
}

static BUILTIN_TABLE: &[Builtin] = &[
    Builtin { name: "print", arity: Arity::OneOf(&[0, 1]), func: print },
    Builtin { name: "printl", arity: Arity::OneOf(&[0, 1]), func: printl },
    Builtin { name: "input", arity: Arity::Exact(0), func: input },
    Builtin { name: "int", arity: Arity::Exact(1), func: |_, _, args| Ok(Object::Integer(args[0].cast_integer()?)) },
    Builtin { name: "double", arity: Arity::Exact(1), func: |_, _, args| Ok(Object::Double(args[0].cast_double()?)) },
    Builtin { name: "bool", arity: Arity::Exact(1), func: |_, _, args| Ok(Object::Boolean(args[0].cast_boolean()?)) },
    Builtin { name: "string", arity: Arity::Exact(1), func: |_, _, args| Ok(Object::String(args[0].cast_string())) },
];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)
}

pub fn is_builtin(name: &str) -> bool {
    lookup(name).is_some()
}

fn io_error(error: std::io::Error) -> ErrorImpl {
    ErrorImpl::IoError {
        message: error.to_string(),
    }
}

fn print(output: &mut dyn Write, _input: &mut dyn BufRead, args: &[Object]) -> Result<Object, ErrorImpl> {
    if let Some(value) = args.first() {
        write!(output, "{}", value).map_err(io_error)?;
    }
    Ok(Object::Null)
}

fn printl(output: &mut dyn Write, input: &mut dyn BufRead, args: &[Object]) -> Result<Object, ErrorImpl> {
    print(output, input, args)?;
    writeln!(output).map_err(io_error)?;
    Ok(Object::Null)
}

/// Reads one line without its line break; end of input reads as "".
fn input(output: &mut dyn Write, reader: &mut dyn BufRead, _args: &[Object]) -> Result<Object, ErrorImpl> {
    output.flush().map_err(io_error)?;

    let mut line = String::new();
    reader.read_line(&mut line).map_err(io_error)?;

    let trimmed = line.trim_end_matches('\n').trim_end_matches('\r');
    Ok(Object::String(trimmed.to_string()))
}
