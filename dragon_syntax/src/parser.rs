//! Contains the [`Parser`] logic.

use dragon_base::diagnostic::Handler;
use dragon_lexical::{
    lexer::Lexer,
    token::{Token, TokenKind},
};

use crate::error::{Error, SyntaxKind, UnexpectedSyntax};

/// The parser of the front end.
///
/// The parser pulls tokens from a borrowed [`Lexer`] one at a time and never looks at the source
/// text on its own. The grammar functions live next to the syntax trees they produce, see
/// [`crate::syntax_tree`].
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: &'a mut Lexer,
    nesting_depth: usize,
}

impl<'a> Parser<'a> {
    /// The maximum number of parentheses that can be open at the same time.
    pub const MAX_NESTING_DEPTH: usize = 256;

    /// Creates a new parser pulling tokens from the given lexer.
    #[must_use]
    pub fn new(lexer: &'a mut Lexer) -> Self {
        Self {
            lexer,
            nesting_depth: 0,
        }
    }

    /// Gets the number of parentheses currently open.
    #[must_use]
    pub fn nesting_depth(&self) -> usize { self.nesting_depth }

    /// Runs the given parsing function one nesting level deeper.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.nesting_depth += 1;
        let output = f(self);
        self.nesting_depth -= 1;

        output
    }

    /// Returns the next [`Token`] without consuming it.
    #[must_use]
    pub fn peek(&self) -> Token { self.lexer.peek() }

    /// Consumes and returns the next [`Token`].
    pub fn next_token(&mut self) -> Token { self.lexer.next_token() }

    /// Consumes the next [`Token`] and throws it away.
    pub fn forward(&mut self) { self.lexer.next_token(); }

    /// Checks if there's nothing left to parse.
    #[must_use]
    pub fn is_exhausted(&self) -> bool { self.lexer.is_exhausted() }

    /// Consumes the next [`Token`] only if it's of the given kind.
    pub fn try_parse_token(&mut self, expected: TokenKind) -> Option<Token> {
        (self.peek().kind() == expected).then(|| self.next_token())
    }

    /// Expects the next [`Token`] to be of the given kind, and consumes it.
    ///
    /// # Errors
    /// If the next [`Token`] is of any other kind. The offending token is left unconsumed.
    pub fn parse_token(&mut self, expected: TokenKind, handler: &dyn Handler<Error>) -> Option<Token> {
        let found = self.peek();

        if found.kind() == expected {
            self.forward();
            Some(found)
        } else {
            handler.receive(Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::Token(expected),
                found,
            }));
            None
        }
    }
}
