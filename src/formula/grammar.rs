use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::ast::{CmpOp, Expr, Helper};

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

// -- Identifiers ------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    let quote = alt(('"', '\'')).parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            c if c == quote => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\'' => s.push('\''),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn number(input: &mut &str) -> ModalResult<f64> {
    (
        opt('-'),
        alt((
            (
                take_while(1.., |c: char| c.is_ascii_digit()),
                opt(('.', take_while(0.., |c: char| c.is_ascii_digit()))),
            )
                .void(),
            ('.', take_while(1.., |c: char| c.is_ascii_digit())).void(),
        )),
        opt((
            alt(('e', 'E')),
            opt(alt(('+', '-'))),
            take_while(1.., |c: char| c.is_ascii_digit()),
        )),
    )
        .take()
        .try_map(|s: &str| s.parse::<f64>())
        .parse_next(input)
}

// -- Field access -----------------------------------------------------------

fn field_access(input: &mut &str) -> ModalResult<Expr> {
    "feature".parse_next(input)?;
    alt((
        delimited(('[', ws), cut_err(string_literal), (ws, cut_err(']'))),
        preceded('.', cut_err(ident)).map(str::to_owned),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "field access",
    )))
    .map(Expr::Field)
    .parse_next(input)
}

// -- Helper calls -----------------------------------------------------------

fn helper_call(input: &mut &str) -> ModalResult<Expr> {
    let name = ident.parse_next(input)?;
    let Some(helper) = Helper::from_name(name) else {
        return Err(ErrMode::from_input(input));
    };
    (ws, '(').parse_next(input)?;
    let args: Vec<Expr> = cut_err(separated(0.., expr, (ws, ','))).parse_next(input)?;
    (ws, cut_err(')')).parse_next(input)?;
    if args.len() != helper.arity() {
        return Err(ErrMode::from_input(input).cut());
    }
    Ok(Expr::Call(helper, args))
}

// -- Array literals ---------------------------------------------------------

fn array_literal(input: &mut &str) -> ModalResult<Expr> {
    delimited(('[', ws), separated(0.., expr, (ws, ',')), (ws, cut_err(']')))
        .map(Expr::List)
        .parse_next(input)
}

// -- Operators --------------------------------------------------------------

fn equality_op(input: &mut &str) -> ModalResult<CmpOp> {
    ws.parse_next(input)?;
    alt((
        "===".value(CmpOp::StrictEq),
        "!==".value(CmpOp::StrictNeq),
    ))
    .parse_next(input)
}

fn relational_op(input: &mut &str) -> ModalResult<CmpOp> {
    ws.parse_next(input)?;
    alt((
        ">=".value(CmpOp::Gte),
        ">".value(CmpOp::Gt),
        "<=".value(CmpOp::Lte),
        "<".value(CmpOp::Lt),
    ))
    .parse_next(input)
}

// -- Expressions (precedence: || < && < === < relational < ! < primary) -----

fn primary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    alt((
        delimited('(', expr, (ws, cut_err(')'))),
        array_literal,
        string_literal.map(Expr::Str),
        number.map(Expr::Num),
        "true".value(Expr::Bool(true)),
        "false".value(Expr::Bool(false)),
        "null".value(Expr::Null),
        field_access,
        helper_call,
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "expression",
    )))
    .parse_next(input)
}

fn unary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    let bangs: Vec<()> = repeat(0.., ('!', ws).void()).parse_next(input)?;
    let operand = if bangs.is_empty() {
        primary(input)?
    } else {
        cut_err(primary).parse_next(input)?
    };
    Ok(bangs
        .into_iter()
        .fold(operand, |acc, ()| Expr::Not(Box::new(acc))))
}

fn relational(input: &mut &str) -> ModalResult<Expr> {
    let first = unary(input)?;
    let rest: Vec<(CmpOp, Expr)> =
        repeat(0.., (relational_op, cut_err(unary))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, |acc, (op, rhs)| {
        Expr::Cmp(op, Box::new(acc), Box::new(rhs))
    }))
}

fn equality(input: &mut &str) -> ModalResult<Expr> {
    let first = relational(input)?;
    let rest: Vec<(CmpOp, Expr)> =
        repeat(0.., (equality_op, cut_err(relational))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, |acc, (op, rhs)| {
        Expr::Cmp(op, Box::new(acc), Box::new(rhs))
    }))
}

fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = equality(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, "&&"), cut_err(equality))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| Expr::And(Box::new(acc), Box::new(r))))
}

fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = and_expr(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, "||"), cut_err(and_expr))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| Expr::Or(Box::new(acc), Box::new(r))))
}

fn expr(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    or_expr(input)
}

// -- Top-level parser -------------------------------------------------------

pub(super) fn formula(input: &mut &str) -> ModalResult<Expr> {
    let parsed = expr(input)?;
    ws.parse_next(input)?;
    Ok(parsed)
}
