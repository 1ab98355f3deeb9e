//! Splits expression text into tokens.
//!
//! The identifier rule lives here and only here: an identifier is a maximal run of
//! ASCII letters. The parser consumes `tokenize`, the variable extraction consumes
//! `identifiers`, and both are built on the same `identifier` combinator, so a name
//! can never be a variable for one of them and something else for the other.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{anychar, char, digit0, digit1, one_of},
    combinator::{map, map_res, opt},
    multi::many0,
};

use crate::symbolic::symbolic_errors::{InvalidExpression, InvalidKind};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    /// one of `+ - * / ^`
    Op(char),
    LParen,
    RParen,
}

/// A token and the character offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

/// maximal run of ASCII letters
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic()).parse(input)
}

/// `12`, `1.5`, `3.`, `.25`, `2e-3`. The exponent is only taken when digits follow,
/// so `2e` stays `2` followed by the constant `e`.
fn number_literal(input: &str) -> IResult<&str, &str> {
    let mantissa = alt((
        (digit1, opt((char('.'), digit0))).map(|_| ()),
        (char('.'), digit1).map(|_| ()),
    ));
    let exponent = opt((one_of("eE"), opt(one_of("+-")), digit1));
    let parsed: IResult<&str, _> = (mantissa, exponent).parse(input);
    let (rest, _) = parsed?;
    // the lexeme is everything consumed
    Ok((rest, &input[..input.len() - rest.len()]))
}

fn single_token(input: &str) -> IResult<&str, TokenKind> {
    alt((
        map_res(number_literal, |s: &str| s.parse::<f64>().map(TokenKind::Number)),
        map(identifier, |s: &str| TokenKind::Ident(s.to_string())),
        map(one_of("+-*/^"), TokenKind::Op),
        map(char('('), |_| TokenKind::LParen),
        map(char(')'), |_| TokenKind::RParen),
    ))
    .parse(input)
}

/// Tokenize the whole text. Whitespace separates tokens and is otherwise ignored.
pub fn tokenize(text: &str) -> Result<Vec<Token>, InvalidExpression> {
    let mut tokens = Vec::new();
    let mut rest = text;
    let mut pos = 0;
    loop {
        let trimmed = rest.trim_start();
        pos += rest[..rest.len() - trimmed.len()].chars().count();
        rest = trimmed;
        let Some(first) = rest.chars().next() else {
            break;
        };
        match single_token(rest) {
            Ok((remaining, kind)) => {
                tokens.push(Token { kind, pos });
                pos += rest[..rest.len() - remaining.len()].chars().count();
                rest = remaining;
            }
            Err(_) => {
                return Err(InvalidExpression::at(InvalidKind::UnexpectedChar(first), pos));
            }
        }
    }
    log::debug!("tokenized {:?} into {} tokens", text, tokens.len());
    Ok(tokens)
}

/// Every identifier in the text, in order, duplicates included.
///
/// Lenient: characters that are not part of an identifier are skipped instead of
/// rejected, so this works on text the parser would refuse.
pub fn identifiers(text: &str) -> Vec<String> {
    let scan = many0(alt((
        map(identifier, |s: &str| Some(s.to_string())),
        map(anychar, |_| None),
    )))
    .parse(text);
    match scan {
        Ok((_, found)) => found.into_iter().flatten().collect(),
        Err(_) => Vec::new(),
    }
}
