use std::rc::Rc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

/// Compiles `pattern` so that it only matches at the start of the remainder.
fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})", pattern)).expect("invalid lexer pattern")
}

lazy_static! {
    // Order is priority: terminators, whitespace, comments, literals, then
    // two-character operators ahead of their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: anchored("\\r?\\n"), handler: newline_handler },
        RegexPattern { regex: anchored(";"), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: anchored("[ \\t\\r]+"), handler: whitespace_handler },
        RegexPattern { regex: anchored("//[^\\n]*"), handler: comment_handler },
        RegexPattern { regex: anchored("[0-9]+(\\.[0-9]*)*"), handler: number_handler },
        RegexPattern { regex: anchored("[a-zA-Z_][a-zA-Z0-9_]*"), handler: symbol_handler },
        RegexPattern { regex: anchored("\""), handler: string_handler },
        RegexPattern { regex: anchored("=="), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: anchored("!="), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: anchored(">="), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: anchored("<="), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: anchored("&&"), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: anchored("\\|\\|"), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: anchored("\\+\\+"), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++") },
        RegexPattern { regex: anchored("--"), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--") },
        RegexPattern { regex: anchored("\\+"), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: anchored("-"), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: anchored("\\*"), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: anchored("/"), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: anchored("%"), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: anchored("\\^"), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
        RegexPattern { regex: anchored("="), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: anchored("<"), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: anchored(">"), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: anchored("\\("), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: anchored("\\)"), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: anchored("\\{"), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: anchored("\\}"), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: anchored("\\["), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: anchored("\\]"), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: anchored(","), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: anchored("\\."), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: usize,
    column: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    /// Moves past `text`, which must not contain a line break.
    pub fn advance_n(&mut self, text: &str) {
        self.pos += text.len();
        self.column += text.chars().count();
    }

    /// Moves past a line break.
    pub fn advance_line(&mut self, text: &str) {
        self.pos += text.len();
        self.line += 1;
        self.column = 1;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }
}

fn matched_text(lexer: &Lexer, regex: &Regex) -> String {
    regex.find(lexer.remainder()).map(|m| m.as_str().to_string()).unwrap_or_default()
}

fn newline_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = matched_text(lexer, regex);
    let start = lexer.position();

    lexer.advance_line(&matched);
    lexer.push(MK_TOKEN!(TokenKind::EndOfLine, String::from("\\n"), Span { end: start.clone(), start }));
    Ok(())
}

fn whitespace_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = matched_text(lexer, regex);
    let start = lexer.position();

    lexer.advance_n(&matched);
    lexer.push(MK_TOKEN!(TokenKind::Whitespace, matched, Span { start, end: lexer.position() }));
    Ok(())
}

fn comment_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = matched_text(lexer, regex);
    let start = lexer.position();

    lexer.advance_n(&matched);
    let text = matched.trim_start_matches("//").trim_end_matches('\r').to_string();
    lexer.push(MK_TOKEN!(TokenKind::Comment, text, Span { start, end: lexer.position() }));
    Ok(())
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = matched_text(lexer, regex);
    let start = lexer.position();

    let points = matched.matches('.').count();
    if points > 1 || matched.ends_with('.') {
        return Err(Error::new(ErrorImpl::MalformedNumber { token: matched }, start));
    }

    let kind = if points == 1 { TokenKind::Double } else { TokenKind::Integer };

    lexer.advance_n(&matched);
    lexer.push(MK_TOKEN!(kind, matched, Span { start, end: lexer.position() }));
    Ok(())
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let start = lexer.position();

    // Strings are verbatim and may not cross a line break.
    let rest = &lexer.remainder()[1..];
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let string_literal = match rest[..line_end].find('"') {
        Some(close) => rest[..close].to_string(),
        None => {
            return Err(Error::new(
                ErrorImpl::UnterminatedString { token: rest[..line_end].trim_end_matches('\r').to_string() },
                start,
            ))
        }
    };

    lexer.advance_n(&format!("\"{}\"", string_literal));
    lexer.push(MK_TOKEN!(TokenKind::String, string_literal, Span { start, end: lexer.position() }));
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = matched_text(lexer, regex);
    let start = lexer.position();

    let kind = match value.as_str() {
        "true" | "false" => TokenKind::Boolean,
        word => RESERVED_LOOKUP.get(word).copied().unwrap_or(TokenKind::Word),
    };

    lexer.advance_n(&value);
    lexer.push(MK_TOKEN!(kind, value, Span { start, end: lexer.position() }));
    Ok(())
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            let start = lex.position();
            let offending = lex.at().to_string();
            lex.advance_n(&offending);

            let token = MK_TOKEN!(TokenKind::Error, offending, Span { start, end: lex.position() });
            debug!("unrecognised character {:?} at {}", token.value, token.span.start);
            return Err(Error::new(ErrorImpl::UnrecognisedToken { token: token.value }, token.span.start));
        }
    }

    let end = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span { start: end.clone(), end }));
    debug!("lexed {} tokens from {}", lex.tokens.len(), lex.file);

    Ok(lex.tokens)
}
