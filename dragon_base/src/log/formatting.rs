//! Contains the ANSI escape codes used to style diagnostics printed to the console.

use std::fmt::Display;

/// Represents a style that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Style {
    Bold,
    Underline,
}

impl Style {
    /// Applies the style to the given displayable object.
    pub fn with<T>(self, display: T) -> Styled<T> {
        Styled {
            code: match self {
                Self::Bold => "\x1B[1m",
                Self::Underline => "\x1B[4m",
            },
            display,
        }
    }
}

/// Represents a color that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Cyan,
}

impl Color {
    /// Applies the color to the given displayable object.
    pub fn with<T>(self, display: T) -> Styled<T> {
        Styled {
            code: match self {
                Self::Red => "\x1B[31m",
                Self::Green => "\x1B[32m",
                Self::Yellow => "\x1B[33m",
                Self::Cyan => "\x1B[36m",
            },
            display,
        }
    }
}

/// Is a struct implementing [`Display`] that wraps a displayable object in an escape code and
/// resets the terminal attributes afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Styled<T> {
    code: &'static str,
    display: T,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}\x1B[0m", self.code, self.display)
    }
}
