use crate::{
    ast::{
        ast::Node,
        expressions::{
            BinaryExpr, BinaryOperator, BooleanExpr, CallExpr, DoubleExpr, IntegerExpr, NegateExpr,
            StringExpr, VariableExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected an expression"),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };
        let binding_power = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::Integer => {
            let value = parser.current_token().value.parse::<i64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                )
            })?;

            Ok(Node::Integer(IntegerExpr {
                value,
                span: parser.advance().span.clone(),
            }))
        }
        TokenKind::Double => {
            let value = parser.current_token().value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                )
            })?;

            Ok(Node::Double(DoubleExpr {
                value,
                span: parser.advance().span.clone(),
            }))
        }
        TokenKind::String => Ok(Node::String(StringExpr {
            value: parser.current_token().value.clone(),
            span: parser.advance().span.clone(),
        })),
        TokenKind::Boolean => Ok(Node::Boolean(BooleanExpr {
            value: parser.current_token().value == "true",
            span: parser.advance().span.clone(),
        })),
        TokenKind::Word => {
            let name_token = parser.advance().clone();
            if parser.current_token_kind() == TokenKind::OpenParen {
                return Ok(Node::Call(parse_call_expr(parser, name_token)?));
            }

            Ok(Node::Variable(VariableExpr {
                name: name_token.value,
                span: name_token.span,
            }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

/// All binary operators are left-associative: the right operand is parsed
/// at the operator's own binding power, so an equal operator stops it.
pub fn parse_binary_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator_token = parser.advance().clone();
    let operator = BinaryOperator::from_token_kind(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let right = parse_expr(parser, bp)?;

    Ok(Node::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        span: operator_token.span,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator_token = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Node::Negate(NegateExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: operand.get_span().end.clone(),
        },
        operand: Box::new(operand),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_delimiter(TokenKind::CloseParen, ")")?;

    Ok(expr)
}

/// Parses `(arg, ...)` after a callee name that has already been consumed.
pub fn parse_call_expr(parser: &mut Parser, name_token: Token) -> Result<CallExpr, Error> {
    parser.expect_delimiter(TokenKind::OpenParen, "(")?;

    let mut arguments = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                continue;
            }
            break;
        }
    }

    let end = parser.expect_delimiter(TokenKind::CloseParen, ")")?.span.end;

    Ok(CallExpr {
        name: name_token.value,
        arguments,
        span: Span {
            start: name_token.span.start,
            end,
        },
    })
}
