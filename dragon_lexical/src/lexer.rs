//! Contains the [`Lexer`], which scans the source code into [`Token`]s one at a time.

use std::sync::Arc;

use dragon_base::{
    diagnostic::Handler,
    source_file::{self, ByteIndex, SourceFile, Span},
};
use getset::{CopyGetters, Getters};

use crate::{
    error::{self, InvalidCharacter},
    token::{Token, TokenKind},
};

/// Scans a source file into [`Token`]s on demand.
///
/// The lexer only remembers a cursor into the source file. Tokens are produced lazily by
/// [`Lexer::next_token`], and the cursor never moves backward except by an explicit
/// [`Lexer::reset`]. Once the end of the source is reached, every subsequent call yields a
/// [`TokenKind::EndOfInput`] token.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct Lexer {
    /// Gets the source file that the lexer scans.
    #[get = "pub"]
    source_file: Arc<SourceFile>,

    /// Gets the byte index from which the next token will be scanned.
    #[get_copy = "pub"]
    cursor: ByteIndex,
}

impl Lexer {
    /// The name given to the sources created by [`Lexer::from_source`].
    pub const IN_MEMORY_SOURCE_NAME: &'static str = "<input>";

    /// Creates a new lexer positioned at the start of the given source file.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>) -> Self {
        Self {
            source_file,
            cursor: 0,
        }
    }

    /// Creates a new lexer over the given source text.
    #[must_use]
    pub fn from_source(source: impl Into<String>) -> Self {
        Self::new(SourceFile::in_memory(Self::IN_MEMORY_SOURCE_NAME, source))
    }

    /// Moves the cursor back to the start of the source file.
    pub fn reset(&mut self) { self.cursor = 0; }

    /// Returns the token that the next call to [`Lexer::next_token`] would return, without moving
    /// the cursor.
    #[must_use]
    pub fn peek(&self) -> Token {
        let mut iter = self.source_file.iter_from(self.cursor);

        // whitespaces are never emitted
        Self::walk_iter(&mut iter, char::is_whitespace);

        let Some((start, character)) = iter.next() else {
            return Token::new(TokenKind::EndOfInput, self.create_span(iter.position(), &mut iter));
        };

        let kind = if character.is_ascii_digit() {
            Self::walk_iter(&mut iter, |character| character.is_ascii_digit());
            TokenKind::Number
        } else {
            TokenKind::try_from(character).unwrap_or(TokenKind::Invalid)
        };

        Token::new(kind, self.create_span(start, &mut iter))
    }

    /// Scans the next token and moves the cursor right after it.
    ///
    /// An invalid character still moves the cursor past that one character, so the caller can
    /// decide whether to keep scanning.
    pub fn next_token(&mut self) -> Token {
        let token = self.peek();
        self.cursor = token.span().end();
        token
    }

    /// Returns `true` if there are no more tokens other than [`TokenKind::EndOfInput`].
    #[must_use]
    pub fn is_exhausted(&self) -> bool { self.peek().kind() == TokenKind::EndOfInput }

    /// Scans all the remaining tokens, up to and including the [`TokenKind::EndOfInput`] token.
    ///
    /// Every [`TokenKind::Invalid`] token found along the way is also reported to the handler.
    pub fn tokenize(&mut self, handler: &dyn Handler<error::Error>) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();

            match token.kind() {
                TokenKind::EndOfInput => {
                    tokens.push(token);
                    break tokens;
                }
                TokenKind::Invalid => {
                    if let Some(character) = token.lexeme().chars().next() {
                        handler.receive(error::Error::InvalidCharacter(InvalidCharacter {
                            span: token.span().clone(),
                            character,
                        }));
                    }
                }
                _ => (),
            }

            tokens.push(token);
        }
    }

    /// Increments the iterator until the predicate returns false.
    fn walk_iter(iter: &mut source_file::Iterator, predicate: impl Fn(char) -> bool) {
        while let Some((_, character)) = iter.peek() {
            if !predicate(character) {
                break;
            }

            iter.next();
        }
    }

    /// Creates a span from the given start location to the current location of the iterator.
    fn create_span(&self, start: ByteIndex, iter: &mut source_file::Iterator) -> Span {
        Span::new(self.source_file.clone(), start, iter.position())
            .expect("the iterator should always stop at a character boundary")
    }
}

#[cfg(test)]
mod tests;
