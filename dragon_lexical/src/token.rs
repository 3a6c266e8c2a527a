//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, fmt::Display};

use derive_new::new;
use dragon_base::source_file::{ByteIndex, SourceElement, Span};
use getset::{CopyGetters, Getters};
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Is an enumeration of every kind of token the lexer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum TokenKind {
    /// A maximal run of ASCII decimal digits.
    Number,

    /// `+`
    Plus,

    /// `*`
    Star,

    /// `(`
    LeftParen,

    /// `)`
    RightParen,

    /// `;`
    Semicolon,

    /// The cursor reached the end of the source. Produced over and over once reached.
    EndOfInput,

    /// A single character that doesn't start any valid token.
    Invalid,
}

impl TokenKind {
    /// Gets the single character that makes up this kind of token, if the kind is a punctuation.
    #[must_use]
    pub fn punctuation(self) -> Option<char> {
        match self {
            Self::Plus => Some('+'),
            Self::Star => Some('*'),
            Self::LeftParen => Some('('),
            Self::RightParen => Some(')'),
            Self::Semicolon => Some(';'),
            Self::Number | Self::EndOfInput | Self::Invalid => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => f.write_str("a numeric token"),
            Self::EndOfInput => f.write_str("end of input"),
            Self::Invalid => f.write_str("an invalid character"),
            punctuation => {
                // every other kind is a single punctuation character
                let char = punctuation.punctuation().unwrap_or_default();
                write!(f, "a punctuation token `{char}`")
            }
        }
    }
}

/// Is an error that is returned when a character isn't the punctuation of any [`TokenKind`] in
/// the [`TryFrom`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("`{0}` isn't a punctuation of any token kind.")]
pub struct PunctuationParseError(pub char);

impl TryFrom<char> for TokenKind {
    type Error = PunctuationParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        lazy_static! {
            static ref PUNCTUATION_KIND_MAP: HashMap<char, TokenKind> = TokenKind::iter()
                .filter_map(|kind| kind.punctuation().map(|char| (char, kind)))
                .collect();
        }

        PUNCTUATION_KIND_MAP
            .get(&value)
            .copied()
            .ok_or(PunctuationParseError(value))
    }
}

/// Represents a single lexical unit scanned from the source code.
///
/// Tokens never change after the lexer produced them; everything about a token is derived from
/// its kind and the span of source text it was matched from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters, new)]
pub struct Token {
    /// Gets the kind of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    /// Gets the span of the source code that makes up the token.
    #[get = "pub"]
    span: Span,
}

impl Token {
    /// Gets the exact text matched by the token.
    ///
    /// The lexeme of [`TokenKind::EndOfInput`] is always empty.
    #[must_use]
    pub fn lexeme(&self) -> &str { self.span.str() }

    /// Gets the byte offset of the token in the source code.
    #[must_use]
    pub fn position(&self) -> ByteIndex { self.span.start() }
}

impl SourceElement for Token {
    fn span(&self) -> Span { self.span.clone() }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Number => write!(f, "a numeric token `{}`", self.lexeme()),
            TokenKind::Invalid => write!(f, "an invalid character `{}`", self.lexeme()),
            kind => Display::fmt(&kind, f),
        }
    }
}
