//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Style};

use crate::source_file::Span;

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Style::Bold.with(match self.severity {
            Severity::Error => Color::Red.with("[error]:"),
            Severity::Info => Color::Green.with("[info]:"),
            Severity::Warning => Color::Yellow.with("[warning]:"),
        });

        let message_part = Style::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

fn get_digit(mut number: usize) -> usize {
    let mut digit = 0;

    while number > 0 {
        number /= 10;
        digit += 1;
    }

    digit
}

/// Structure implementing [`Display`] that prints the particular span of the source code.
///
/// The lines covered by the span are printed with the spanned characters underlined. The line
/// before and the line after are printed as context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed.
    pub help_display: Option<T>,
}

impl<'a, T> SourceCodeDisplay<'a, T> {
    fn write_line_number(
        f: &mut std::fmt::Formatter<'_>,
        line_number: usize,
        width: usize,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}{}{} ",
            Style::Bold.with(Color::Cyan.with(line_number)),
            format_args!("{:width$}", "", width = width - get_digit(line_number) + 1),
            Style::Bold.with(Color::Cyan.with("┃")),
        )
    }

    fn write_empty_pipe(
        f: &mut std::fmt::Formatter<'_>,
        width: usize,
        pipe: &str,
    ) -> std::fmt::Result {
        for _ in 0..=width {
            write!(f, " ")?;
        }
        write!(f, "{}", Style::Bold.with(Color::Cyan.with(pipe)))
    }

    /// Prints a context line without any highlighting.
    fn write_plain_line(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        line_number: usize,
        width: usize,
    ) -> std::fmt::Result {
        let Some(line) = self.span.source_file().get_line(line_number) else {
            return Ok(());
        };

        Self::write_line_number(f, line_number, width)?;

        for char in line.chars() {
            // if the char is tab, print 4 spaces
            if char == '\t' {
                write!(f, "    ")?;
            } else if char != '\n' && char != '\r' {
                write!(f, "{char}")?;
            }
        }

        writeln!(f)
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source_file = self.span.source_file();
        let start_location = self.span.start_location();
        let end_location = self.span.end_location();

        let start_line = start_location.line;
        let end_line = end_location.line;
        let is_multiline = start_line != end_line;

        // when printing the source code, show the line before the span and the line after the span
        let largest_line_number_digits = get_digit(end_line + 1);

        // prints the source location
        for _ in 0..largest_line_number_digits {
            write!(f, " ")?;
        }

        writeln!(
            f,
            "{} {}",
            Style::Bold.with(Color::Cyan.with("-->")),
            format_args!(
                "{}:{}:{}",
                source_file.full_path().display(),
                start_location.line,
                start_location.column
            )
        )?;

        Self::write_empty_pipe(f, largest_line_number_digits, "┃")?;
        writeln!(f)?;

        // prints previous line
        if start_line > 1 {
            self.write_plain_line(f, start_line - 1, largest_line_number_digits)?;
        }

        for line_number in start_line..=end_line {
            let Some(line) = source_file.get_line(line_number) else {
                break;
            };
            let line_start = source_file.line_start(line_number).unwrap_or_default();

            Self::write_line_number(f, line_number, largest_line_number_digits)?;

            for (index, char) in line.char_indices() {
                let byte_index = line_start + index;

                // if the char is tab, print 4 spaces
                if char == '\t' {
                    write!(f, "    ")?;
                } else if char != '\n' && char != '\r' {
                    if (self.span.start()..self.span.end()).contains(&byte_index) {
                        write!(
                            f,
                            "{}",
                            Style::Underline.with(Style::Bold.with(Color::Red.with(char)))
                        )?;
                    } else {
                        write!(f, "{char}")?;
                    }
                }
            }
            writeln!(f)?;
        }

        if let (Some(message), false) = (&self.help_display, is_multiline) {
            Self::write_empty_pipe(f, largest_line_number_digits, "┃")?;
            write!(f, " ")?;

            // prints the whitespace until the start's column
            if let Some(line) = source_file.get_line(start_line) {
                for char in line.chars().take(start_location.column - 1) {
                    // if the char is tab, print 4 spaces
                    write!(f, "{}", if char == '\t' { "    " } else { " " })?;
                }
            }

            writeln!(f, "{}: {message}", Style::Bold.with("help"))?;
        }

        // prints the post line
        self.write_plain_line(f, end_line + 1, largest_line_number_digits)?;

        Self::write_empty_pipe(f, largest_line_number_digits, "┃")?;
        writeln!(f)?;

        if let (Some(help_display), true) = (&self.help_display, is_multiline) {
            Self::write_empty_pipe(f, largest_line_number_digits, "=")?;
            writeln!(f, " {}: {help_display}", Style::Bold.with("help"))?;
        }

        Ok(())
    }
}
