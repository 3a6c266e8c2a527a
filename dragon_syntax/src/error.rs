//! Contains all kinds of syntactic errors that can occur while parsing the token stream.

use std::fmt::Display;

use derive_more::From;
use dragon_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{ByteIndex, SourceElement, Span},
};
use dragon_lexical::token::{Token, TokenKind};
use enum_as_inner::EnumAsInner;

/// Enumeration containing all kinds of syntax that can be failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum SyntaxKind {
    /// A token of a specific kind.
    Token(TokenKind),

    /// Either a numeric token or a parenthesized expression.
    Factor,
}

impl Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(kind) => Display::fmt(kind, f),
            Self::Factor => f.write_str("a factor (a numeric token or `(`)"),
        }
    }
}

/// A syntax/token is expected but found an other invalid token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnexpectedSyntax {
    /// The kind of syntax that was expected.
    pub expected: SyntaxKind,

    /// The invalid token that was found.
    pub found: Token,
}

impl UnexpectedSyntax {
    /// Gets the byte offset of the offending token.
    #[must_use]
    pub fn position(&self) -> ByteIndex { self.found.position() }
}

impl Display for UnexpectedSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = format!("expected {}, but found {}", self.expected, self.found);

        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, message),
            SourceCodeDisplay::new(
                self.found.span(),
                (self.found.kind() == TokenKind::EndOfInput)
                    .then(|| format!("insert {} here", self.expected))
            )
        )
    }
}

/// A numeric literal is too large to be represented as a 64-bit unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TooLargeNumeric {
    /// The span of the numeric literal.
    pub span: Span,
}

impl Display for TooLargeNumeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "numeric value too large"),
            SourceCodeDisplay::new(
                &self.span,
                Some(format!("the largest allowed value is {}", u64::MAX))
            )
        )
    }
}

/// Parentheses are nested deeper than the parser allows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TooDeeplyNested {
    /// The span of the opening parenthesis that went over the limit.
    pub span: Span,

    /// The maximum number of parentheses that can be open at the same time.
    pub limit: usize,
}

impl Display for TooDeeplyNested {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "parentheses are nested too deeply"),
            SourceCodeDisplay::new(
                &self.span,
                Some(format!("at most {} parentheses can be open at once", self.limit))
            )
        )
    }
}

/// Is an enumeration containing all kinds of syntactic errors that can occur while parsing the
/// token stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnexpectedSyntax(UnexpectedSyntax),
    TooLargeNumeric(TooLargeNumeric),
    TooDeeplyNested(TooDeeplyNested),
}

impl SourceElement for Error {
    fn span(&self) -> Span {
        match self {
            Self::UnexpectedSyntax(error) => error.found.span().clone(),
            Self::TooLargeNumeric(error) => error.span.clone(),
            Self::TooDeeplyNested(error) => error.span.clone(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedSyntax(error) => error.fmt(f),
            Self::TooLargeNumeric(error) => error.fmt(f),
            Self::TooDeeplyNested(error) => error.fmt(f),
        }
    }
}
