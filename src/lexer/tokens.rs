use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("func", TokenKind::Func);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    EndOfLine,
    Semicolon,
    Whitespace,
    Comment,
    Error,

    Integer,
    Double,
    String,
    Boolean,
    Word,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Comma,

    PlusPlus,
    MinusMinus,

    Plus,
    Minus,
    Slash,
    Star,
    Percent,
    Caret,

    // Reserved
    If,
    Else,
    While,
    For,
    And,
    Or,
    Func,
    Return,
    Break,
}

impl TokenKind {
    /// Whether the token ends a statement on its own.
    pub fn is_terminator(&self) -> bool {
        matches!(self, TokenKind::EndOfLine | TokenKind::Semicolon | TokenKind::EOF)
    }

    /// Tokens the parser never sees.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    pub fn column(&self) -> usize {
        self.span.start.column
    }

    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// One line of the `--debug` token dump.
    pub fn debug_line(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Word,
            TokenKind::Integer,
            TokenKind::Double,
            TokenKind::Boolean,
            TokenKind::Comment,
            TokenKind::Error,
        ]) {
            format!("{}:{} {} ({})", self.line(), self.column(), self.kind, self.value)
        } else {
            format!("{}:{} {} ()", self.line(), self.column(), self.kind)
        }
    }

    pub fn debug(&self) {
        println!("{}", self.debug_line());
    }
}
