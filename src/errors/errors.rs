use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_stage(&self) -> Stage {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::MalformedNumber { .. }
            | ErrorImpl::UnterminatedString { .. } => Stage::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::MissingDelimiter { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::DuplicateParameter { .. }
            | ErrorImpl::NoProgress { .. } => Stage::Syntax,
            ErrorImpl::NonBooleanCondition { .. } => Stage::Warning,
            _ => Stage::Runtime,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.get_stage() != Stage::Warning
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::MissingDelimiter { .. } => "MissingDelimiter",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateParameter { .. } => "DuplicateParameter",
            ErrorImpl::NoProgress { .. } => "NoProgress",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::NestedFunctionNotAllowed { .. } => "NestedFunctionNotAllowed",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::CastError { .. } => "CastError",
            ErrorImpl::InvalidOperation { .. } => "InvalidOperation",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::IoError { .. } => "IoError",
            ErrorImpl::NonBooleanCondition { .. } => "NonBooleanCondition",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::MalformedNumber { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, a number has at most one decimal point and digits after it",
                token
            )),
            ErrorImpl::UnterminatedString { .. } => {
                ErrorTip::Suggestion(String::from("String is missing its closing `\"` on this line"))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a line break or `;`?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::MissingDelimiter { delimiter, token } => ErrorTip::Suggestion(format!(
                "Expected `{}`, found `{}`",
                delimiter, token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateParameter { parameter } => {
                ErrorTip::Suggestion(format!("Parameter `{}` is listed twice", parameter))
            }
            ErrorImpl::NoProgress { token } => {
                ErrorTip::Suggestion(format!("Parser could not make progress at `{}`", token))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::NestedFunctionNotAllowed { function } => ErrorTip::Suggestion(format!(
                "Function `{}` can only be declared at the top level or inside another function",
                function
            )),
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::CastError { value, to } => {
                ErrorTip::Suggestion(format!("Cannot cast {} to {}", value, to))
            }
            ErrorImpl::InvalidOperation { operation, operand } => ErrorTip::Suggestion(format!(
                "Operation `{}` is not defined for {}",
                operation, operand
            )),
            ErrorImpl::DivisionByZero => ErrorTip::Suggestion(String::from("Integer division by zero")),
            ErrorImpl::IoError { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::NonBooleanCondition { received } => ErrorTip::Suggestion(format!(
                "Condition is {}, not Boolean; treating it as false",
                received
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

/// Pipeline stage that raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexical,
    Syntax,
    Runtime,
    Warning,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexical => write!(f, "Lexical Error"),
            Stage::Syntax => write!(f, "Syntax Error"),
            Stage::Runtime => write!(f, "Runtime Error"),
            Stage::Warning => write!(f, "Warning"),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("malformed number: {token:?}")]
    MalformedNumber { token: String },
    #[error("unterminated string: {token:?}")]
    UnterminatedString { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected {delimiter:?}, found {token:?}")]
    MissingDelimiter { delimiter: String, token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("parameter {parameter:?} declared twice")]
    DuplicateParameter { parameter: String },
    #[error("parser made no progress at {token:?}")]
    NoProgress { token: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("function {function:?} not declared")]
    FunctionNotDeclared { function: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("function {function:?} declared outside of a function body")]
    NestedFunctionNotAllowed { function: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("cannot cast {value} to {to}")]
    CastError { value: String, to: String },
    #[error("operation {operation:?} not defined for {operand}")]
    InvalidOperation { operation: String, operand: String },
    #[error("integer division by zero")]
    DivisionByZero,
    #[error("i/o error: {message}")]
    IoError { message: String },
    #[error("condition is {received}, not Boolean")]
    NonBooleanCondition { received: String },
}
