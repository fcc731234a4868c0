use chumsky::prelude::*;

/// Characters that may start an operator token.
const OPERATOR_START: &str = "+*/<>=";

/// A lexical unit. Tokens carry their spelling only; whether a `Symbol` is
/// a keyword, an operator, or a variable is decided by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Bool(bool),
    Int(i64),
    Symbol(String),
}

/// Lexes the whole input into spanned tokens. The lexer is total: comments,
/// whitespace, and any character that cannot start a token are consumed and
/// dropped, so lexing itself never produces an error.
pub fn lexer<'a>()
-> impl Parser<'a, &'a str, Vec<(Token, SimpleSpan)>, extra::Err<Simple<'a, char>>> {
    let number = just('-')
        .or_not()
        .then(text::digits(10))
        .to_slice()
        .map(|s: &str| Token::Int(s.parse().unwrap()));

    let symbol = any()
        .filter(|c: &char| c.is_alphabetic() || OPERATOR_START.contains(*c))
        .then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == '-')
                .repeated(),
        )
        .to_slice()
        .map(|s: &str| Token::Symbol(s.to_string()));

    // `-5` is one negative literal; a bare `-` is the subtraction symbol.
    let token = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just("#t").to(Token::Bool(true)),
        just("#f").to(Token::Bool(false)),
        number,
        just('-').to(Token::Symbol("-".to_string())),
        symbol,
    ));

    let comment = just(';').then(none_of('\n').repeated());

    let lexeme = choice((
        comment.to(None),
        token.map_with(|tok, e| Some((tok, e.span()))),
        any().to(None),
    ));

    lexeme
        .repeated()
        .collect::<Vec<_>>()
        .map(|lexemes| lexemes.into_iter().flatten().collect())
        .then_ignore(end())
}
