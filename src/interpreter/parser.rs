use crate::ast::{BinaryOp, Expr, ExprKind, VariadicOp};
use crate::diagnostic::{Diagnostic, Label, Span};
use crate::lexer::Token;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub expected: Vec<String>,
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: Vec::new(),
            found: None,
        }
    }

    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut msg = self.message.clone();
        if !self.expected.is_empty() {
            msg = format!("expected {}", self.expected.join(" or "));
            if let Some(found) = &self.found {
                msg.push_str(&format!(", found {}", found));
            }
        }

        let mut diag = Diagnostic::error(msg)
            .with_code("E0101")
            .with_label(Label::primary(self.span, ""));

        if self.expected.len() == 1 {
            diag = diag.with_help(format!("expected {} here", self.expected[0]));
        }

        diag
    }
}

/// The variable pattern: an ASCII lowercase letter followed by any run of
/// word characters or hyphens. Keyword spellings such as `mod` also match;
/// whether they act as keywords depends on their position.
pub fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Recursive-descent parser over the lexer's token sequence. One token of
/// lookahead, plus a single save/restore speculation inside function
/// bodies. The first error aborts the parse; no partial tree survives.
pub struct TokenParser {
    tokens: Vec<SpannedToken>,
    current: usize,
    source_len: usize,
}

impl TokenParser {
    pub fn new(tokens: Vec<SpannedToken>, source_len: usize) -> Self {
        Self {
            tokens,
            current: 0,
            source_len,
        }
    }

    pub fn from_lexer_output(
        tokens: Vec<(Token, chumsky::span::SimpleSpan)>,
        source_len: usize,
    ) -> Self {
        let spanned_tokens: Vec<SpannedToken> = tokens
            .into_iter()
            .map(|(token, span)| SpannedToken {
                token,
                span: Span::new(span.start, span.end),
            })
            .collect();
        Self::new(spanned_tokens, source_len)
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|st| &st.token)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.current)
            .map(|st| st.span)
            .unwrap_or_else(|| Span::new(self.source_len, self.source_len))
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        if self.current < self.tokens.len() {
            let st = self.tokens[self.current].clone();
            self.current += 1;
            Some(st)
        } else {
            None
        }
    }

    fn expect(&mut self, expected: Token) -> Result<Span, ParseError> {
        match self.current_token() {
            Some(token) if std::mem::discriminant(token) == std::mem::discriminant(&expected) => {
                let span = self.current_span();
                self.advance();
                Ok(span)
            }
            Some(token) => Err(ParseError::new("unexpected token", self.current_span())
                .with_expected(vec![format!("{:?}", expected)])
                .with_found(format!("{:?}", token))),
            None => Err(ParseError::new("unexpected end of input", self.current_span())
                .with_expected(vec![format!("{:?}", expected)])),
        }
    }

    /// Parses the whole token sequence as an ordered program.
    pub fn parse_program(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut program = Vec::new();
        while self.current_token().is_some() {
            program.push(self.parse_expr()?);
        }
        Ok(program)
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let st = match self.advance() {
            Some(st) => st,
            None => {
                return Err(ParseError::new(
                    "unexpected end of input",
                    Span::new(self.source_len, self.source_len),
                )
                .with_expected(vec!["expression".to_string()]));
            }
        };

        match st.token {
            Token::Bool(value) => Ok(Expr {
                kind: ExprKind::Bool(value),
                span: st.span,
            }),
            Token::Int(value) => Ok(Expr {
                kind: ExprKind::Int(value),
                span: st.span,
            }),
            Token::LParen => self.parse_sexpr(st.span),
            Token::Symbol(name) if is_variable_name(&name) => Ok(Expr {
                kind: ExprKind::Var(Rc::from(name.as_str())),
                span: st.span,
            }),
            token => Err(ParseError::new("unexpected token", st.span)
                .with_expected(vec!["expression".to_string()])
                .with_found(format!("{:?}", token))),
        }
    }

    /// Parses a parenthesized form; the opening `(` is already consumed.
    /// Keyword forms are tried first, in a fixed order, and a head that
    /// matches none of them makes the whole form a function call. The
    /// fallback must stay last so that an identifier which merely looks
    /// like a keyword elsewhere is still a valid callee.
    fn parse_sexpr(&mut self, open_span: Span) -> Result<Expr, ParseError> {
        let head = match self.current_token() {
            Some(Token::Symbol(name)) => Some(name.clone()),
            _ => None,
        };

        match head.as_deref() {
            Some("print-num") => {
                self.advance();
                let operand = self.parse_expr()?;
                let close = self.expect(Token::RParen)?;
                Ok(Expr {
                    kind: ExprKind::PrintNum(Box::new(operand)),
                    span: open_span.merge(close),
                })
            }
            Some("print-bool") => {
                self.advance();
                let operand = self.parse_expr()?;
                let close = self.expect(Token::RParen)?;
                Ok(Expr {
                    kind: ExprKind::PrintBool(Box::new(operand)),
                    span: open_span.merge(close),
                })
            }
            Some("define") => {
                self.advance();
                let name = self.parse_variable()?;
                let value = self.parse_expr()?;
                let close = self.expect(Token::RParen)?;
                Ok(Expr {
                    kind: ExprKind::Define {
                        name,
                        value: Box::new(value),
                    },
                    span: open_span.merge(close),
                })
            }
            Some("fun") => {
                self.advance();
                self.expect(Token::LParen)?;
                let mut params = Vec::new();
                while !matches!(self.current_token(), Some(Token::RParen)) {
                    params.push(self.parse_variable()?);
                }
                self.expect(Token::RParen)?;
                let body = self.parse_fun_body()?;
                let close = self.expect(Token::RParen)?;
                Ok(Expr {
                    kind: ExprKind::Fun {
                        params,
                        body: Rc::new(body),
                    },
                    span: open_span.merge(close),
                })
            }
            Some("if") => {
                self.advance();
                let test = self.parse_expr()?;
                let then_branch = self.parse_expr()?;
                let else_branch = self.parse_expr()?;
                let close = self.expect(Token::RParen)?;
                Ok(Expr {
                    kind: ExprKind::If {
                        test: Box::new(test),
                        then_branch: Box::new(then_branch),
                        else_branch: Box::new(else_branch),
                    },
                    span: open_span.merge(close),
                })
            }
            Some("+") => self.parse_variadic(VariadicOp::Add, open_span),
            Some("*") => self.parse_variadic(VariadicOp::Mul, open_span),
            Some("-") => self.parse_binary(BinaryOp::Sub, open_span),
            Some("/") => self.parse_binary(BinaryOp::Div, open_span),
            Some("mod") => self.parse_binary(BinaryOp::Mod, open_span),
            Some("=") => self.parse_variadic(VariadicOp::Eq, open_span),
            Some(">") => self.parse_binary(BinaryOp::Greater, open_span),
            Some("<") => self.parse_binary(BinaryOp::Less, open_span),
            Some("and") => self.parse_variadic(VariadicOp::And, open_span),
            Some("or") => self.parse_variadic(VariadicOp::Or, open_span),
            Some("not") => {
                self.advance();
                let operand = self.parse_expr()?;
                let close = self.expect(Token::RParen)?;
                Ok(Expr {
                    kind: ExprKind::Not(Box::new(operand)),
                    span: open_span.merge(close),
                })
            }
            _ => self.parse_call(open_span),
        }
    }

    fn parse_variable(&mut self) -> Result<Rc<str>, ParseError> {
        match self.advance() {
            Some(SpannedToken {
                token: Token::Symbol(name),
                ..
            }) if is_variable_name(&name) => Ok(Rc::from(name.as_str())),
            Some(SpannedToken { token, span }) => {
                Err(ParseError::new("expected variable name", span)
                    .with_expected(vec!["variable".to_string()])
                    .with_found(format!("{:?}", token)))
            }
            None => Err(ParseError::new(
                "unexpected end of input",
                Span::new(self.source_len, self.source_len),
            )
            .with_expected(vec!["variable".to_string()])),
        }
    }

    /// A function body is zero or more local `define`s followed by exactly
    /// one result expression. At each `(` we tentatively step in and peek
    /// one token: `define` commits to a local definition, anything else
    /// rolls back so the parenthesized form is parsed as the result.
    fn parse_fun_body(&mut self) -> Result<Expr, ParseError> {
        let mut defines = Vec::new();
        while matches!(self.current_token(), Some(Token::LParen)) {
            let saved = self.current;
            self.advance();
            let is_define =
                matches!(self.current_token(), Some(Token::Symbol(name)) if name == "define");
            self.current = saved;
            if !is_define {
                break;
            }
            defines.push(self.parse_expr()?);
        }

        let result = self.parse_expr()?;
        if defines.is_empty() {
            Ok(result)
        } else {
            let span = defines[0].span.merge(result.span);
            Ok(Expr {
                kind: ExprKind::FunBody {
                    defines,
                    result: Box::new(result),
                },
                span,
            })
        }
    }

    fn parse_variadic(&mut self, op: VariadicOp, open_span: Span) -> Result<Expr, ParseError> {
        self.advance();
        let mut operands = Vec::new();
        while !matches!(self.current_token(), Some(Token::RParen)) {
            operands.push(self.parse_expr()?);
        }
        let close = self.expect(Token::RParen)?;
        if operands.len() < 2 {
            return Err(ParseError::new(
                "operator takes at least 2 operands",
                open_span.merge(close),
            )
            .with_expected(vec!["2 or more operands".to_string()]));
        }
        Ok(Expr {
            kind: ExprKind::Variadic { op, operands },
            span: open_span.merge(close),
        })
    }

    fn parse_binary(&mut self, op: BinaryOp, open_span: Span) -> Result<Expr, ParseError> {
        self.advance();
        let left = self.parse_expr()?;
        let right = self.parse_expr()?;
        let close = self.expect(Token::RParen)?;
        Ok(Expr {
            kind: ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span: open_span.merge(close),
        })
    }

    fn parse_call(&mut self, open_span: Span) -> Result<Expr, ParseError> {
        let callee = self.parse_expr()?;
        let mut args = Vec::new();
        while !matches!(self.current_token(), Some(Token::RParen)) {
            args.push(self.parse_expr()?);
        }
        let close = self.expect(Token::RParen)?;
        Ok(Expr {
            kind: ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span: open_span.merge(close),
        })
    }
}
