use crate::{
    ast::{
        ast::Node,
        expressions::{BinaryExpr, BinaryOperator, IntegerExpr, VariableExpr},
        statements::{
            AssignmentStmt, BlockStmt, BreakStmt, ElseStmt, FnDeclStmt, IfStmt, ReturnStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{expr::parse_call_expr, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let handler = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied();
    match handler {
        Some(handler) => handler(parser),
        None => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected a statement"),
            },
            parser.get_position(),
        )),
    }
}

/// Parses statements until EOF, or until the `}` closing the current block.
///
/// Empty statements (blank lines, stray `;`) are skipped. Every other
/// statement must be followed by a line break, `;`, EOF or the closing `}`.
pub fn parse_block_body(parser: &mut Parser) -> Result<Vec<Node>, Error> {
    let mut body = vec![];

    loop {
        while matches!(
            parser.current_token_kind(),
            TokenKind::EndOfLine | TokenKind::Semicolon
        ) {
            parser.advance();
        }

        match parser.current_token_kind() {
            TokenKind::EOF if parser.is_in_block() => {
                return Err(Error::new(
                    ErrorImpl::MissingDelimiter {
                        delimiter: String::from("}"),
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ));
            }
            TokenKind::EOF => break,
            TokenKind::CloseCurly if parser.is_in_block() => break,
            _ => {}
        }

        let start = parser.cursor();
        let stmt = parse_stmt(parser)?;
        if parser.cursor() == start {
            return Err(Error::new(
                ErrorImpl::NoProgress {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        }

        body.push(stmt);
        expect_terminator(parser)?;
    }

    Ok(body)
}

fn expect_terminator(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::EndOfLine | TokenKind::Semicolon => {
            parser.advance();
            Ok(())
        }
        TokenKind::EOF => Ok(()),
        TokenKind::CloseCurly if parser.is_in_block() => Ok(()),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected a line break or `;` after the statement"),
            },
            parser.get_position(),
        )),
    }
}

/// Parses `{ ... }` including both braces.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect_delimiter(TokenKind::OpenCurly, "{")?.span.start;

    parser.enter_block();
    let body = parse_block_body(parser);
    parser.exit_block();
    let body = body?;

    let end = parser.expect_delimiter(TokenKind::CloseCurly, "}")?.span.end;

    Ok(BlockStmt {
        body,
        span: Span { start, end },
    })
}

pub fn parse_bare_block_stmt(parser: &mut Parser) -> Result<Node, Error> {
    Ok(Node::Block(parse_block_stmt(parser)?))
}

/// A statement starting with a name: assignment, call, `name++` or `name--`.
pub fn parse_word_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let name_token = parser.advance().clone();

    match parser.current_token_kind() {
        TokenKind::Assignment => {
            parser.advance();
            let value = parse_expr(parser, BindingPower::Default)?;

            Ok(Node::Assignment(AssignmentStmt {
                span: Span {
                    start: name_token.span.start.clone(),
                    end: value.get_span().end.clone(),
                },
                name: name_token.value,
                value: Box::new(value),
            }))
        }
        TokenKind::OpenParen => Ok(Node::Call(parse_call_expr(parser, name_token)?)),
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            let operator_token = parser.advance().clone();
            let operator = if operator_token.kind == TokenKind::PlusPlus {
                BinaryOperator::Add
            } else {
                BinaryOperator::Subtract
            };

            // name++ is name = name + 1
            let value = Node::Binary(BinaryExpr {
                left: Box::new(Node::Variable(VariableExpr {
                    name: name_token.value.clone(),
                    span: name_token.span.clone(),
                })),
                operator,
                right: Box::new(Node::Integer(IntegerExpr {
                    value: 1,
                    span: operator_token.span.clone(),
                })),
                span: operator_token.span.clone(),
            });

            Ok(Node::Assignment(AssignmentStmt {
                span: Span {
                    start: name_token.span.start,
                    end: operator_token.span.end,
                },
                name: name_token.value,
                value: Box::new(value),
            }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: format!("expected `=`, `(`, `++` or `--` after `{}`", name_token.value),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected function name"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Word, Some(error))?.value;

    parser.expect_delimiter(TokenKind::OpenParen, "(")?;

    let mut parameters: Vec<String> = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let error = Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected parameter name"),
                },
                parser.get_position(),
            );
            let parameter = parser.expect_error(TokenKind::Word, Some(error))?;

            if parameters.contains(&parameter.value) {
                return Err(Error::new(
                    ErrorImpl::DuplicateParameter {
                        parameter: parameter.value,
                    },
                    parameter.span.start,
                ));
            }
            parameters.push(parameter.value);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                continue;
            }
            break;
        }
    }

    parser.expect_delimiter(TokenKind::CloseParen, ")")?;
    parser.skip_line_breaks();

    let body = parse_block_stmt(parser)?;

    Ok(Node::FnDecl(FnDeclStmt {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        name,
        parameters,
        body,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start_token = parser.advance().clone();

    let kind = parser.current_token_kind();
    let value = if kind.is_terminator() || kind == TokenKind::CloseCurly {
        None
    } else {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    };

    Ok(Node::Return(ReturnStmt {
        span: Span {
            start: start_token.span.start,
            end: match &value {
                Some(value) => value.get_span().end.clone(),
                None => start_token.span.end,
            },
        },
        value,
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let span = parser.advance().span.clone();
    Ok(Node::Break(BreakStmt { span }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.skip_line_breaks();
    let body = parse_block_stmt(parser)?;

    Ok(Node::While(WhileStmt {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        condition: Box::new(condition),
        body,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.skip_line_breaks();
    let body = parse_block_stmt(parser)?;
    let mut end = body.span.end.clone();

    // `else` may sit on a later line than the closing `}`
    let mut offset = 0;
    while parser.peek_kind(offset) == TokenKind::EndOfLine {
        offset += 1;
    }

    let else_branch = if parser.peek_kind(offset) == TokenKind::Else {
        parser.skip_line_breaks();
        let else_start = parser.advance().span.start.clone();

        let branch = if parser.current_token_kind() == TokenKind::If {
            parse_if_stmt(parser)?
        } else {
            parser.skip_line_breaks();
            let else_body = parse_block_stmt(parser)?;
            Node::Else(ElseStmt {
                span: Span {
                    start: else_start,
                    end: else_body.span.end.clone(),
                },
                body: else_body,
            })
        };

        end = branch.get_span().end.clone();
        Some(Box::new(branch))
    } else {
        None
    };

    Ok(Node::If(IfStmt {
        span: Span { start, end },
        condition: Box::new(condition),
        body,
        else_branch,
    }))
}
