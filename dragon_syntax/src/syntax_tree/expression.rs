//! Contains the syntax trees related to expressions and their parsing logic.

use std::fmt::Display;

use dragon_base::{
    diagnostic::Handler,
    source_file::{SourceElement, Span},
};
use dragon_lexical::token::{Token, TokenKind};
use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};

use crate::{
    error::{Error, SyntaxKind, TooDeeplyNested, TooLargeNumeric, UnexpectedSyntax},
    parser::Parser,
};

/// Syntax Synopsis:
///
/// ``` ebnf
/// BinaryOperator:
///     '+'
///     | '*'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum BinaryOperator {
    Add(Token),
    Multiply(Token),
}

impl BinaryOperator {
    /// Gets the token the operator was parsed from.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::Add(token) | Self::Multiply(token) => token,
        }
    }
}

impl SourceElement for BinaryOperator {
    fn span(&self) -> Span { self.token().span().clone() }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add(..) => f.write_str("+"),
            Self::Multiply(..) => f.write_str("*"),
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Binary:
///     Expression '+' Term
///     | Term '*' Factor
///     ;
/// ```
///
/// Both operators are left associative, so the right operand of a [`Binary`] never has an
/// operator of the same or lower precedence unless it was parenthesized.
///
/// A long chain such as `1+1+...+1` nests as deep as it is long along the left operands. Dropping,
/// [`Display`] and [`SourceElement::span`] walk that spine iteratively, the derived traits don't.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Binary {
    /// Gets the left operand of the binary expression.
    #[get = "pub"]
    left_operand: Box<Expression>,

    /// Gets the operator of the binary expression.
    #[get = "pub"]
    operator: BinaryOperator,

    /// Gets the right operand of the binary expression.
    #[get = "pub"]
    right_operand: Box<Expression>,
}

impl Binary {
    /// Dissolves the binary expression into its components.
    #[must_use]
    pub fn dissolve(mut self) -> (Expression, BinaryOperator, Expression) {
        let token = self.operator.token().clone();

        let left_operand = std::mem::replace(&mut *self.left_operand, Expression::vacant(&token));
        let right_operand = std::mem::replace(&mut *self.right_operand, Expression::vacant(&token));

        (left_operand, self.operator.clone(), right_operand)
    }

    /// Moves the operands that are binary expressions themselves out into `detached`, leaving
    /// vacant leaves in their place.
    fn detach_binary_operands(&mut self, detached: &mut Vec<Self>) {
        for operand in [&mut self.left_operand, &mut self.right_operand] {
            if operand.is_binary() {
                let vacant = Expression::vacant(self.operator.token());

                if let Expression::Binary(binary) = std::mem::replace(&mut **operand, vacant) {
                    detached.push(binary);
                }
            }
        }
    }
}

impl Drop for Binary {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_binary_operands(&mut detached);

        // every popped binary only has leaves left when it goes out of scope
        while let Some(mut binary) = detached.pop() {
            binary.detach_binary_operands(&mut detached);
        }
    }
}

impl SourceElement for Binary {
    fn span(&self) -> Span {
        self.left_operand
            .first_numeric()
            .span()
            .join(&self.right_operand.last_numeric().span())
            .unwrap()
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Numeric:
///     NumericToken
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct Numeric {
    /// Gets the numeric token the literal was parsed from.
    #[get = "pub"]
    token: Token,

    /// Gets the value of the literal.
    #[get_copy = "pub"]
    value: u64,
}

impl SourceElement for Numeric {
    fn span(&self) -> Span { self.token.span().clone() }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Expression:
///     Numeric
///     | Binary
///     ;
/// ```
///
/// Parentheses don't leave any node behind, the shape of the tree alone tells the evaluation
/// order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Expression {
    Numeric(Numeric),
    Binary(Binary),
}

impl Expression {
    /// Gets the leftmost [`Numeric`] of the expression, where its source text starts.
    #[must_use]
    pub fn first_numeric(&self) -> &Numeric {
        let mut expression = self;

        loop {
            match expression {
                Self::Numeric(numeric) => break numeric,
                Self::Binary(binary) => expression = &*binary.left_operand,
            }
        }
    }

    /// Gets the rightmost [`Numeric`] of the expression, where its source text ends.
    #[must_use]
    pub fn last_numeric(&self) -> &Numeric {
        let mut expression = self;

        loop {
            match expression {
                Self::Numeric(numeric) => break numeric,
                Self::Binary(binary) => expression = &*binary.right_operand,
            }
        }
    }

    /// A leaf standing in for an operand that has been moved out of a [`Binary`] being taken
    /// apart.
    fn vacant(token: &Token) -> Self {
        Self::Numeric(Numeric {
            token: token.clone(),
            value: 0,
        })
    }
}

impl SourceElement for Expression {
    fn span(&self) -> Span {
        match self {
            Self::Numeric(numeric) => numeric.span(),
            Self::Binary(binary) => binary.span(),
        }
    }
}

/// Prints the expression with every binary operation wrapped in parentheses.
impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        enum Piece<'a> {
            Expression(&'a Expression),
            Operator(&'a BinaryOperator),
            Text(&'static str),
        }

        // pieces are popped from the back
        let mut pending = vec![Piece::Expression(self)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Expression(Self::Numeric(numeric)) => write!(f, "{}", numeric.value)?,
                Piece::Expression(Self::Binary(binary)) => pending.extend([
                    Piece::Text(")"),
                    Piece::Expression(&*binary.right_operand),
                    Piece::Operator(&binary.operator),
                    Piece::Expression(&*binary.left_operand),
                    Piece::Text("("),
                ]),
                Piece::Operator(operator) => write!(f, " {operator} ")?,
                Piece::Text(text) => f.write_str(text)?,
            }
        }

        Ok(())
    }
}

impl<'a> Parser<'a> {
    /// Parses an [`Expression`]
    ///
    /// ``` ebnf
    /// Expression:
    ///     Term ('+' Term)*
    ///     ;
    /// ```
    pub fn parse_expression(&mut self, handler: &dyn Handler<Error>) -> Option<Expression> {
        self.parse_left_associative(
            TokenKind::Plus,
            BinaryOperator::Add,
            Self::parse_term,
            handler,
        )
    }

    /// Parses a term, an [`Expression`] whose top level operator can only be `*`.
    ///
    /// ``` ebnf
    /// Term:
    ///     Factor ('*' Factor)*
    ///     ;
    /// ```
    pub fn parse_term(&mut self, handler: &dyn Handler<Error>) -> Option<Expression> {
        self.parse_left_associative(
            TokenKind::Star,
            BinaryOperator::Multiply,
            Self::parse_factor,
            handler,
        )
    }

    /// Parses a factor, either a [`Numeric`] or a parenthesized [`Expression`].
    ///
    /// ``` ebnf
    /// Factor:
    ///     Numeric
    ///     | '(' Expression ')'
    ///     ;
    /// ```
    ///
    /// Parentheses nested deeper than [`Parser::MAX_NESTING_DEPTH`] are reported as
    /// [`Error::TooDeeplyNested`].
    pub fn parse_factor(&mut self, handler: &dyn Handler<Error>) -> Option<Expression> {
        let token = self.peek();

        match token.kind() {
            TokenKind::Number => {
                self.forward();

                let Ok(value) = token.lexeme().parse::<u64>() else {
                    handler.receive(Error::TooLargeNumeric(TooLargeNumeric {
                        span: token.span().clone(),
                    }));
                    return None;
                };

                Some(Expression::Numeric(Numeric { token, value }))
            }

            TokenKind::LeftParen => {
                if self.nesting_depth() == Self::MAX_NESTING_DEPTH {
                    handler.receive(Error::TooDeeplyNested(TooDeeplyNested {
                        span: token.span().clone(),
                        limit: Self::MAX_NESTING_DEPTH,
                    }));
                    return None;
                }

                self.forward();

                let expression = self.nested(|parser| parser.parse_expression(handler))?;
                self.parse_token(TokenKind::RightParen, handler)?;

                Some(expression)
            }

            _ => {
                handler.receive(Error::UnexpectedSyntax(UnexpectedSyntax {
                    expected: SyntaxKind::Factor,
                    found: token,
                }));

                None
            }
        }
    }

    /// Parses one operand, then keeps folding `operator` and the next operand into a [`Binary`]
    /// whose left operand is everything parsed so far.
    fn parse_left_associative(
        &mut self,
        operator: TokenKind,
        into_operator: fn(Token) -> BinaryOperator,
        parse_operand: fn(&mut Self, &dyn Handler<Error>) -> Option<Expression>,
        handler: &dyn Handler<Error>,
    ) -> Option<Expression> {
        let mut expression = parse_operand(self, handler)?;

        while let Some(token) = self.try_parse_token(operator) {
            let right_operand = parse_operand(self, handler)?;

            expression = Expression::Binary(Binary {
                left_operand: Box::new(expression),
                operator: into_operator(token),
                right_operand: Box::new(right_operand),
            });
        }

        Some(expression)
    }
}
