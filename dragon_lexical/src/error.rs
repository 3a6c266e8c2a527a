//! Contains all kinds of lexical errors that can occur while tokenizing the source code.

use std::fmt::Display;

use derive_more::From;
use dragon_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{ByteIndex, SourceElement, Span},
};
use enum_as_inner::EnumAsInner;

/// The source code contains a character that doesn't start any token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidCharacter {
    /// The span of the offending character.
    pub span: Span,

    /// The offending character.
    pub character: char,
}

impl InvalidCharacter {
    /// Gets the byte offset of the offending character.
    #[must_use]
    pub fn position(&self) -> ByteIndex { self.span.start() }
}

impl SourceElement for InvalidCharacter {
    fn span(&self) -> Span { self.span.clone() }
}

impl Display for InvalidCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("found an invalid character `{}`", self.character.escape_default())
            ),
            SourceCodeDisplay::new(
                &self.span,
                Some("only digits, `+`, `*`, `(`, `)`, and `;` are allowed")
            )
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    InvalidCharacter(InvalidCharacter),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter(err) => write!(f, "{err}"),
        }
    }
}
