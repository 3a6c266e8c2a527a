use std::fmt::{Display, Write};

use dragon_base::{
    diagnostic::{Counter, Storage},
    source_file::SourceFile,
};
use dragon_test::input::Input;
use lazy_static::lazy_static;
use proptest::{
    prelude::Arbitrary,
    prop_assert, prop_assert_eq, prop_oneof, proptest,
    strategy::{BoxedStrategy, Just, Strategy},
    test_runner::{TestCaseError, TestCaseResult},
};
use strum::IntoEnumIterator;

use super::Lexer;
use crate::{
    error::Error,
    token::{self, TokenKind},
};

/// Represents an input for the [`TokenKind::Number`] token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number {
    /// The digits making up the numeric literal, leading zeros included.
    pub digits: String,
}

impl Arbitrary for Number {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "[0-9]{1,24}".prop_map(|digits| Self { digits }).boxed()
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.digits) }
}

/// Represents an input for the single character punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Punctuation {
    /// The kind of the punctuation token.
    pub kind: TokenKind,
}

impl Arbitrary for Punctuation {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        lazy_static! {
            static ref PUNCTUATIONS: Vec<TokenKind> = TokenKind::iter()
                .filter(|kind| kind.punctuation().is_some())
                .collect();
        }

        proptest::sample::select(PUNCTUATIONS.as_slice())
            .prop_map(|kind| Self { kind })
            .boxed()
    }
}

impl Display for Punctuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.kind.punctuation().unwrap())
    }
}

/// Represents an input for the [`TokenKind::Invalid`] token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Invalid {
    /// The character that doesn't start any token.
    pub character: char,
}

impl Arbitrary for Invalid {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::char::any()
            .prop_filter_map("allows only characters that don't start a token", |x| {
                if x.is_whitespace() || x.is_ascii_digit() || TokenKind::try_from(x).is_ok() {
                    None
                } else {
                    Some(Self { character: x })
                }
            })
            .boxed()
    }
}

impl Display for Invalid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.character)
    }
}

/// Represents a run of whitespace characters put in front of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum WhiteSpaces {
    Spaces(u8),
    Tabs(u8),
    NewLines(u8),
}

impl WhiteSpaces {
    fn is_empty(self) -> bool { matches!(self, Self::Spaces(0) | Self::Tabs(0) | Self::NewLines(0)) }
}

impl Arbitrary for WhiteSpaces {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0u8..4)
            .prop_flat_map(|x| {
                prop_oneof![
                    Just(Self::Spaces(x)),
                    Just(Self::Tabs(x)),
                    Just(Self::NewLines(x))
                ]
            })
            .boxed()
    }
}

impl Display for WhiteSpaces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (character, count) = match self {
            Self::Spaces(x) => (' ', x),
            Self::Tabs(x) => ('\t', x),
            Self::NewLines(x) => ('\n', x),
        };

        for _ in 0..*count {
            f.write_char(character)?;
        }

        Ok(())
    }
}

/// Represents an input for the [`token::Token`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Token {
    Number(Number),
    Punctuation(Punctuation),
    Invalid(Invalid),
}

impl Arbitrary for Token {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            3 => Number::arbitrary().prop_map(Self::Number),
            6 => Punctuation::arbitrary().prop_map(Self::Punctuation),
            1 => Invalid::arbitrary().prop_map(Self::Invalid),
        ]
        .boxed()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(x) => Display::fmt(x, f),
            Self::Punctuation(x) => Display::fmt(x, f),
            Self::Invalid(x) => Display::fmt(x, f),
        }
    }
}

impl Input<&token::Token> for &Token {
    fn assert(self, output: &token::Token) -> TestCaseResult {
        match (self, output.kind()) {
            (Token::Number(i), TokenKind::Number) => {
                prop_assert_eq!(i.digits.as_str(), output.lexeme());
            }
            (Token::Punctuation(i), kind) if i.kind == kind => {
                prop_assert_eq!(output.lexeme().chars().next(), kind.punctuation());
            }
            (Token::Invalid(i), TokenKind::Invalid) => {
                prop_assert_eq!(output.lexeme().chars().collect::<Vec<_>>(), vec![
                    i.character
                ]);
            }
            _ => {
                return Err(TestCaseError::fail(format!(
                    "expected {self:?} got {output:?}",
                )))
            }
        }

        Ok(())
    }
}

/// Represents a whole source text made of tokens separated by whitespaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Source {
    /// The tokens, each with the whitespaces put in front of it.
    pub tokens: Vec<(WhiteSpaces, Token)>,

    /// The whitespaces after the last token.
    pub trailing: WhiteSpaces,
}

impl Source {
    fn invalid_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|(_, token)| matches!(token, Token::Invalid(..)))
            .count()
    }
}

impl Arbitrary for Source {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            proptest::collection::vec((WhiteSpaces::arbitrary(), Token::arbitrary()), 0..=16),
            WhiteSpaces::arbitrary(),
        )
            .prop_map(|(mut tokens, trailing)| {
                // two adjacent numbers would be munched into one
                for index in 1..tokens.len() {
                    if matches!(tokens[index - 1].1, Token::Number(..))
                        && matches!(tokens[index].1, Token::Number(..))
                        && tokens[index].0.is_empty()
                    {
                        tokens[index].0 = WhiteSpaces::Spaces(1);
                    }
                }

                Self { tokens, trailing }
            })
            .boxed()
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (white_spaces, token) in &self.tokens {
            Display::fmt(white_spaces, f)?;
            Display::fmt(token, f)?;
        }

        Display::fmt(&self.trailing, f)
    }
}

fn tokenize(source: &Source) -> Result<Vec<token::Token>, TestCaseError> {
    let source_file = SourceFile::temp(source)?;

    let error_storage: Storage<Error> = Storage::new();
    let tokens = Lexer::new(source_file).tokenize(&error_storage);

    // every invalid character is reported exactly once
    prop_assert_eq!(error_storage.as_vec().len(), source.invalid_count());

    Ok(tokens)
}

proptest! {
    #[test]
    fn tokenize_test(
        input in Source::arbitrary()
    ) {
        let tokens = tokenize(&input)?;
        let (end, tokens) = tokens.split_last().unwrap();

        prop_assert_eq!(end.kind(), TokenKind::EndOfInput);

        let inputs = input.tokens.iter().map(|(_, token)| token.clone()).collect::<Vec<_>>();
        inputs.as_slice().assert(tokens)?;
    }

    #[test]
    fn peek_agrees_with_next_token(
        source in "[0-9+*();$x \t\n]{0,32}"
    ) {
        let mut lexer = Lexer::from_source(source);
        let mut first_pass = Vec::new();

        loop {
            let peeked = lexer.peek();
            prop_assert_eq!(&peeked, &lexer.peek());

            let cursor = lexer.cursor();
            let token = lexer.next_token();

            prop_assert_eq!(&peeked, &token);
            prop_assert!(lexer.cursor() >= cursor);

            if token.kind() == TokenKind::EndOfInput {
                break;
            }

            prop_assert!(lexer.cursor() > cursor);
            first_pass.push(token);
        }

        lexer.reset();

        let mut second_pass = Vec::new();
        while !lexer.is_exhausted() {
            second_pass.push(lexer.next_token());
        }

        prop_assert_eq!(first_pass, second_pass);
    }
}

fn kinds_and_lexemes(source: &str) -> Vec<(TokenKind, String)> {
    let mut lexer = Lexer::from_source(source);
    lexer
        .tokenize(&Counter::default())
        .into_iter()
        .map(|token| (token.kind(), token.lexeme().to_owned()))
        .collect()
}

#[test]
fn tokenizes_reference_statement() {
    let mut lexer = Lexer::from_source("1+2*(4+3);");
    let tokens = lexer.tokenize(&Counter::default());

    let expected = [
        (TokenKind::Number, "1", 0),
        (TokenKind::Plus, "+", 1),
        (TokenKind::Number, "2", 2),
        (TokenKind::Star, "*", 3),
        (TokenKind::LeftParen, "(", 4),
        (TokenKind::Number, "4", 5),
        (TokenKind::Plus, "+", 6),
        (TokenKind::Number, "3", 7),
        (TokenKind::RightParen, ")", 8),
        (TokenKind::Semicolon, ";", 9),
        (TokenKind::EndOfInput, "", 10),
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, lexeme, position)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind(), kind);
        assert_eq!(token.lexeme(), lexeme);
        assert_eq!(token.position(), position);
    }
}

#[test]
fn numbers_are_munched_maximally() {
    assert_eq!(kinds_and_lexemes("007 12"), vec![
        (TokenKind::Number, "007".to_owned()),
        (TokenKind::Number, "12".to_owned()),
        (TokenKind::EndOfInput, String::new()),
    ]);
}

#[test]
fn end_of_input_is_repeated() {
    let mut lexer = Lexer::from_source("7");

    assert_eq!(lexer.next_token().kind(), TokenKind::Number);

    for _ in 0..4 {
        let token = lexer.next_token();
        assert_eq!(token.kind(), TokenKind::EndOfInput);
        assert_eq!(token.position(), 1);
        assert_eq!(lexer.cursor(), 1);
    }
}

#[test]
fn empty_and_blank_sources_yield_end_of_input() {
    for source in ["", " ", " \t\n\r\n "] {
        let mut lexer = Lexer::from_source(source);
        assert!(lexer.is_exhausted());

        let token = lexer.next_token();
        assert_eq!(token.kind(), TokenKind::EndOfInput);
        assert_eq!(token.position(), source.len());
    }
}

#[test]
fn invalid_characters_do_not_stop_scanning() {
    let mut lexer = Lexer::from_source("1 $ 2-");
    let storage: Storage<Error> = Storage::new();
    let tokens = lexer.tokenize(&storage);

    let kinds = tokens.iter().map(token::Token::kind).collect::<Vec<_>>();
    assert_eq!(kinds, vec![
        TokenKind::Number,
        TokenKind::Invalid,
        TokenKind::Number,
        TokenKind::Invalid,
        TokenKind::EndOfInput,
    ]);

    let errors = storage.into_vec();
    assert_eq!(errors.len(), 2);

    let first = errors[0].as_invalid_character().unwrap();
    assert_eq!(first.character, '$');
    assert_eq!(first.position(), 2);

    let second = errors[1].as_invalid_character().unwrap();
    assert_eq!(second.character, '-');
    assert_eq!(second.position(), 5);
}

#[test]
fn invalid_multibyte_character_is_a_single_token() {
    let mut lexer = Lexer::from_source("é+1");

    let invalid = lexer.next_token();
    assert_eq!(invalid.kind(), TokenKind::Invalid);
    assert_eq!(invalid.lexeme(), "é");
    assert_eq!(lexer.cursor(), 'é'.len_utf8());

    assert_eq!(lexer.next_token().kind(), TokenKind::Plus);
}

#[test]
fn reset_replays_from_the_start() {
    let mut lexer = Lexer::from_source("(12)");

    assert_eq!(lexer.next_token().kind(), TokenKind::LeftParen);
    assert_eq!(lexer.next_token().lexeme(), "12");

    lexer.reset();
    assert_eq!(lexer.cursor(), 0);
    assert_eq!(lexer.next_token().kind(), TokenKind::LeftParen);
}

#[test]
fn independent_lexers_share_nothing() {
    let source_file = SourceFile::in_memory("<input>", "1+2;");
    let mut first = Lexer::new(source_file.clone());
    let second = Lexer::new(source_file);

    first.next_token();
    first.next_token();

    assert_eq!(first.cursor(), 2);
    assert_eq!(second.cursor(), 0);
    assert_eq!(second.peek().lexeme(), "1");
}
