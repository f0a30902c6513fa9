#![allow(clippy::module_inception)]

use std::{
    fmt::Display,
    io::{BufRead, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use log::info;

use crate::{
    errors::{diagnostics::Diagnostics, errors::Error},
    lexer::lexer::tokenize,
    parser::parser::parse,
    runner::runner::Runner,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod object;
pub mod parser;
pub mod runner;

/// Default extension of sprig source files.
pub const SOURCE_EXTENSION: &str = "sp";

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: usize, column: usize, file: Rc<String>) -> Self {
        Position { line, column, file }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the text of the 1-based `line` of `source`, without its line break.
pub fn get_line_at_position(source: &str, line: usize) -> Option<String> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line - 1)
        .map(|text| text.trim_end_matches('\r').to_string())
}

/// Source path to run: a path without an extension gets `.sp` appended,
/// a path with a different extension is rejected.
pub fn resolve_source_path(path: &Path) -> Option<PathBuf> {
    match path.extension() {
        None => Some(path.with_extension(SOURCE_EXTENSION)),
        Some(extension) if extension == SOURCE_EXTENSION => Some(path.to_path_buf()),
        Some(_) => None,
    }
}

/// Lexes, parses and runs `source` to completion.
///
/// The file name used in positions is taken from `diagnostics`, which also
/// receives every warning raised while running. The first fatal error stops
/// the pipeline and is returned to the caller.
pub fn run_source(
    source: &str,
    diagnostics: &mut Diagnostics,
    output: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), Error> {
    let file = diagnostics.file();

    let tokens = tokenize(source.to_string(), Some(file.to_string()))?;
    info!("tokenized {} tokens", tokens.len());

    let (_, ast) = parse(tokens, file);
    let ast = ast?;
    info!("parsed {} top-level statements", ast.body.len());

    let mut runner = Runner::new(output, input, diagnostics);
    runner.run(&ast)
}
