//! Contains the definition of [`Error`]

use std::fmt::Display;

use derive_more::From;
use dragon_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{SourceElement, Span},
};
use enum_as_inner::EnumAsInner;

/// The result of an arithmetic operation doesn't fit in a 64-bit unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArithmeticOverflow {
    /// The span of the binary expression that overflowed.
    pub span: Span,

    /// The value of the left operand.
    pub left_value: u64,

    /// The value of the right operand.
    pub right_value: u64,
}

impl Display for ArithmeticOverflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "arithmetic operation overflowed"),
            SourceCodeDisplay::new(
                &self.span,
                Some(format!(
                    "the operands evaluated to `{}` and `{}`",
                    self.left_value, self.right_value
                ))
            )
        )
    }
}

/// Contains all the possible errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    ArithmeticOverflow(ArithmeticOverflow),
}

impl SourceElement for Error {
    fn span(&self) -> Span {
        match self {
            Self::ArithmeticOverflow(err) => err.span.clone(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArithmeticOverflow(err) => write!(f, "{err}"),
        }
    }
}
