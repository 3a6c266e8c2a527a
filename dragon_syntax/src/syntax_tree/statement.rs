//! Contains the syntax tree of the statement, the root of every parse.

use std::fmt::Display;

use dragon_base::{
    diagnostic::Handler,
    source_file::{SourceElement, Span},
};
use dragon_lexical::token::{Token, TokenKind};
use getset::Getters;

use super::expression::Expression;
use crate::{error::Error, parser::Parser};

/// Syntax Synopsis:
///
/// ``` ebnf
/// Statement:
///     Expression ';'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Statement {
    /// Gets the expression of the statement.
    #[get = "pub"]
    expression: Expression,

    /// Gets the semicolon that terminates the statement.
    #[get = "pub"]
    semicolon: Token,
}

impl Statement {
    /// Dissolves the statement into its expression and semicolon.
    #[must_use]
    pub fn dissolve(self) -> (Expression, Token) { (self.expression, self.semicolon) }
}

impl SourceElement for Statement {
    fn span(&self) -> Span { self.expression.span().join(self.semicolon.span()).unwrap() }
}

/// Prints the statement with every binary operation wrapped in parentheses.
impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", self.expression)
    }
}

impl<'a> Parser<'a> {
    /// Parses a [`Statement`]
    ///
    /// Only the first error is reported. Tokens following the semicolon are left in the lexer.
    pub fn parse_statement(&mut self, handler: &dyn Handler<Error>) -> Option<Statement> {
        let expression = self.parse_expression(handler)?;
        let semicolon = self.parse_token(TokenKind::Semicolon, handler)?;

        Some(Statement {
            expression,
            semicolon,
        })
    }

    /// Parses the whole input as a single [`Statement`].
    ///
    /// This is the entry point of the parser. Unlike [`Parser::parse_statement`], the semicolon
    /// must be followed by the end of input.
    ///
    /// # Errors
    /// Anything after the semicolon is reported as [`Error::UnexpectedSyntax`] expecting
    /// [`TokenKind::EndOfInput`].
    pub fn parse(&mut self, handler: &dyn Handler<Error>) -> Option<Statement> {
        let statement = self.parse_statement(handler)?;
        self.parse_token(TokenKind::EndOfInput, handler)?;

        Some(statement)
    }
}
