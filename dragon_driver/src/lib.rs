//! Contains the command line interface that wires the lexer, the parser, and the evaluator
//! together.

use std::{cell::Cell, fmt::Display, fs::File, path::PathBuf, process::ExitCode, sync::Arc};

pub use clap::Parser;
use derive_more::From;
use dragon_base::{
    diagnostic::Handler,
    log::{Message, Severity},
    source_file::{self, SourceFile},
};
use dragon_lexical::{lexer::Lexer, token::Token};
use dragon_semantic::evaluator;
use dragon_syntax::{parser, syntax_tree::statement::Statement};
use enum_as_inner::EnumAsInner;

/// The statement evaluated when neither a file nor an expression is given.
pub const DEFAULT_SOURCE: &str = "1+2*(4+3);";

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "dragon",
    about = "Tokenizes, parses, and evaluates an arithmetic statement such as `1+2*(4+3);`.",
    author = "66011245@kmitl.ac.th"
)]
pub struct Argument {
    /// The file containing the statement to evaluate.
    #[clap(conflicts_with = "expression")]
    pub file: Option<PathBuf>,

    /// The statement to evaluate, given directly on the command line.
    #[clap(short = 'e', long = "expression")]
    pub expression: Option<String>,

    /// Prints out the syntax tree of the statement instead of evaluating it.
    #[clap(long = "dump-syntax")]
    pub dump_syntax: bool,

    /// Prints out every token of the source instead of parsing it.
    #[clap(long = "dump-tokens")]
    pub dump_tokens: bool,
}

impl Argument {
    /// Loads the source the statement is read from.
    ///
    /// # Errors
    /// See [`SourceFile::load`].
    pub fn load_source(&self) -> Result<Arc<SourceFile>, source_file::Error> {
        match (&self.file, &self.expression) {
            (Some(path), _) => SourceFile::load(File::open(path)?, path.clone()),
            (None, Some(expression)) => Ok(SourceFile::in_memory(
                Lexer::IN_MEMORY_SOURCE_NAME,
                expression.clone(),
            )),
            (None, None) => Ok(SourceFile::in_memory(
                Lexer::IN_MEMORY_SOURCE_NAME,
                DEFAULT_SOURCE,
            )),
        }
    }

    /// Gets the name the source is reported under.
    #[must_use]
    pub fn source_name(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(Lexer::IN_MEMORY_SOURCE_NAME))
    }
}

/// Is an enumeration of the errors of every phase the program runs through.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    Lexical(dragon_lexical::error::Error),
    Syntax(dragon_syntax::error::Error),
    Semantic(dragon_semantic::error::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(error) => error.fmt(f),
            Self::Syntax(error) => error.fmt(f),
            Self::Semantic(error) => error.fmt(f),
        }
    }
}

/// The result of a successful [`execute`], depending on what the arguments asked for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum Output {
    /// Every token of the source, up to and including the end of input.
    Tokens(Vec<Token>),

    /// The syntax tree of the statement.
    Syntax(Statement),

    /// The value of the statement.
    Value(u64),
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tokens(tokens) => {
                for token in tokens {
                    writeln!(
                        f,
                        "{:>4} {:?} {:?}",
                        token.position(),
                        token.kind(),
                        token.lexeme()
                    )?;
                }

                Ok(())
            }
            Self::Syntax(statement) => writeln!(f, "{statement}"),
            Self::Value(value) => writeln!(f, "{value}"),
        }
    }
}

/// Runs the phases the arguments ask for over the given source.
///
/// # Errors
/// Every error of every phase goes to the handler. Returns [`None`] if the statement couldn't be
/// parsed or evaluated. Invalid characters found while dumping tokens are reported but still
/// produce [`Output::Tokens`].
pub fn execute<H>(argument: &Argument, source_file: Arc<SourceFile>, handler: &H) -> Option<Output>
where
    H: Handler<dragon_lexical::error::Error>
        + Handler<dragon_syntax::error::Error>
        + Handler<dragon_semantic::error::Error>,
{
    let mut lexer = Lexer::new(source_file);

    if argument.dump_tokens {
        return Some(Output::Tokens(lexer.tokenize(handler)));
    }

    let statement = parser::Parser::new(&mut lexer).parse(handler)?;

    if argument.dump_syntax {
        return Some(Output::Syntax(statement));
    }

    evaluator::evaluate_statement(&statement, handler).map(Output::Value)
}

/// A struct that implements [`Handler`] but prints all the message to the standard error stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Printer {
    printed: Cell<bool>,
}

impl Printer {
    /// Creates a new [`Printer`].
    fn new() -> Self {
        Self {
            printed: Cell::new(false),
        }
    }

    fn has_printed(&self) -> bool { self.printed.get() }
}

impl<E: Display> Handler<E> for Printer {
    fn receive(&self, error: E) {
        eprintln!("{error}");
        self.printed.set(true);
    }
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: Argument) -> ExitCode {
    let source_file = match argument.load_source() {
        Ok(source_file) => source_file,
        Err(error) => {
            let msg = Message::new(
                Severity::Error,
                format!("{}: {error}", argument.source_name().display()),
            );

            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let printer = Printer::new();

    if let Some(output) = execute(&argument, source_file, &printer) {
        print!("{output}");
    }

    if printer.has_printed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
