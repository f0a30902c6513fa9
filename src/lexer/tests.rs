//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, boolean literals and identifiers
//! - Numeric literals (integers and doubles)
//! - Verbatim string literals
//! - Operators and punctuation
//! - Terminators, whitespace and comments
//! - Line/column tracking
//! - Error cases

use crate::errors::errors::Stage;

use super::{lexer::tokenize, tokens::{Token, TokenKind}};

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.sp".to_string())).unwrap()
}

/// Tokens as the parser sees them.
fn significant(source: &str) -> Vec<Token> {
    lex(source).into_iter().filter(|token| !token.kind.is_trivia()).collect()
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_assignment_line() {
    let tokens = significant("x = 3\n");

    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Word, TokenKind::Assignment, TokenKind::Integer, TokenKind::EndOfLine, TokenKind::EOF]
    );
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[2].value, "3");
}

#[test]
fn test_tokenize_keywords() {
    let tokens = significant("if else while for and or func return break");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Func,
            TokenKind::Return,
            TokenKind::Break,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_booleans() {
    let tokens = significant("true false True");

    assert_eq!(tokens[0].kind, TokenKind::Boolean);
    assert_eq!(tokens[0].value, "true");
    assert_eq!(tokens[1].kind, TokenKind::Boolean);
    assert_eq!(tokens[1].value, "false");
    // Only the lowercase spellings are literals.
    assert_eq!(tokens[2].kind, TokenKind::Word);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = significant("foo bar baz_123 _underscore CamelCase iffy");

    for (token, expected) in tokens.iter().zip(["foo", "bar", "baz_123", "_underscore", "CamelCase", "iffy"]) {
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!(token.value, expected);
    }
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = significant("42 3.14 0 100.5");

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Double);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::Double);
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_number_with_two_points() {
    let error = tokenize("x = 1.2.3".to_string(), Some("test.sp".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "MalformedNumber");
    assert_eq!(error.get_stage(), Stage::Lexical);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_tokenize_number_with_trailing_point() {
    let result = tokenize("x = 12.".to_string(), Some("test.sp".to_string()));

    assert_eq!(result.unwrap_err().get_error_name(), "MalformedNumber");
}

#[test]
fn test_tokenize_strings() {
    let tokens = significant(r#""hello" "world" "multiple words""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_are_verbatim() {
    let tokens = significant(r#""tab\t // not a comment""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "tab\\t // not a comment");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_string() {
    let tokens = significant(r#""""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unterminated_string() {
    let error = tokenize("x = \"abc\ny = \"d\"".to_string(), Some("test.sp".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_tokenize_operators() {
    let tokens = significant("+ - * / % ^ == != < > <= >= = && || ++ --");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_greedy_two_character_operators() {
    let tokens = significant("a===b x+++y");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Word,
            TokenKind::Equals,
            TokenKind::Assignment,
            TokenKind::Word,
            TokenKind::Word,
            TokenKind::PlusPlus,
            TokenKind::Plus,
            TokenKind::Word,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = significant("( ) { } [ ] , . ;");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_whitespace_runs_collapse() {
    let tokens = lex("  x   =\t\t42  ");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Whitespace,
            TokenKind::Word,
            TokenKind::Whitespace,
            TokenKind::Assignment,
            TokenKind::Whitespace,
            TokenKind::Integer,
            TokenKind::Whitespace,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[4].value, "\t\t");
}

#[test]
fn test_tokenize_comments() {
    let tokens = lex("x = 5 // this is a comment\ny = 10");

    let comment = tokens.iter().find(|token| token.kind == TokenKind::Comment).unwrap();
    assert_eq!(comment.value, " this is a comment");

    let tokens = significant("x = 5 // this is a comment\ny = 10");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Word,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::EndOfLine,
            TokenKind::Word,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_line_and_column_tracking() {
    let tokens = significant("a = 1\n  bb = 22; c = 3\r\nd");

    let b = tokens.iter().find(|token| token.value == "bb").unwrap();
    assert_eq!((b.line(), b.column()), (2, 3));

    let c = tokens.iter().find(|token| token.value == "c").unwrap();
    assert_eq!((c.line(), c.column()), (2, 12));

    let d = tokens.iter().find(|token| token.value == "d").unwrap();
    assert_eq!((d.line(), d.column()), (3, 1));

    let semicolon = tokens.iter().find(|token| token.kind == TokenKind::Semicolon).unwrap();
    assert_eq!(semicolon.line(), 2);
}

#[test]
fn test_tokenize_crlf_is_one_end_of_line() {
    let tokens = significant("a\r\nb");

    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Word, TokenKind::EndOfLine, TokenKind::Word, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_unrecognized_token() {
    let error = tokenize("x = @".to_string(), Some("test.sp".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().column, 5);
    assert_eq!(error.get_stage(), Stage::Lexical);
}

#[test]
fn test_tokenize_lone_bang_is_unrecognized() {
    let result = tokenize("!x".to_string(), Some("test.sp".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = lex("");

    assert_eq!(kinds(&tokens), vec![TokenKind::EOF]);
    assert_eq!((tokens[0].line(), tokens[0].column()), (1, 1));
}

#[test]
fn test_tokenize_mixed_expression() {
    let tokens = significant("x + 5 * (y - 3)");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Word,
            TokenKind::Plus,
            TokenKind::Integer,
            TokenKind::Star,
            TokenKind::OpenParen,
            TokenKind::Word,
            TokenKind::Minus,
            TokenKind::Integer,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_function_declaration() {
    let tokens = significant("func add(a, b) { return a + b }");

    assert_eq!(tokens[0].kind, TokenKind::Func);
    assert_eq!(tokens[1].kind, TokenKind::Word);
    assert_eq!(tokens[1].value, "add");
    assert_eq!(tokens[2].kind, TokenKind::OpenParen);
    assert_eq!(tokens[3].kind, TokenKind::Word);
    assert_eq!(tokens[4].kind, TokenKind::Comma);
    assert_eq!(tokens[7].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[8].kind, TokenKind::Return);
}

#[test]
fn test_token_debug_line() {
    let tokens = significant("x = \"hi\"");

    assert_eq!(tokens[0].debug_line(), "1:1 Word (x)");
    assert_eq!(tokens[1].debug_line(), "1:3 Assignment ()");
    assert_eq!(tokens[2].debug_line(), "1:5 String (hi)");
}
