use crate::genres::GenreVocabulary;
use logos::Logos;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Logos, PartialEq)]
#[logos(skip r"\s+")]
enum RawToken<'source> {
    #[token("and", ignore(case))]
    And,
    #[token("or", ignore(case))]
    Or,
    #[token("not", ignore(case))]
    Not,
    #[token("(")]
    LeftParenthesis,
    #[token(")")]
    RightParenthesis,
    #[regex(r"[^\s()]+", |lex| lex.slice())]
    Word(&'source str),
}

/// A token of a genre expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    And,
    Or,
    Not,
    LeftParenthesis,
    RightParenthesis,
    Genre(GenreLiteral),
}

/// A genre named in an expression, along with the vocabulary entry it resolved to (if any).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenreLiteral {
    text: String,
    canonical: Option<String>,
}

impl GenreLiteral {
    pub fn new(text: &str, vocabulary: &GenreVocabulary) -> Self {
        let canonical = vocabulary.resolve(text).map(str::to_owned);
        if canonical.is_none() {
            tracing::debug!(genre = text, "genre not found in the vocabulary");
        }
        Self {
            text: text.to_owned(),
            canonical,
        }
    }

    /// The text as typed.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The vocabulary spelling, `None` if the genre is unknown.
    #[inline]
    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.canonical.is_some()
    }
}

impl Display for Token {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(formatter, "AND"),
            Self::Or => write!(formatter, "OR"),
            Self::Not => write!(formatter, "NOT"),
            Self::LeftParenthesis => write!(formatter, "("),
            Self::RightParenthesis => write!(formatter, ")"),
            Self::Genre(literal) => write!(formatter, "{}", literal.text()),
        }
    }
}

/// Split an expression into [`Token`]s.
///
/// Parentheses are tokens of their own even when glued to a genre, `and`/`or`/`not` are
/// operators in any case and every other run of characters is a genre literal. Literals are
/// resolved against the vocabulary as they are produced; unknown ones are kept and marked
/// invalid so the parser can report them.
pub struct Lexer<'input, 'vocabulary> {
    token_stream: logos::Lexer<'input, RawToken<'input>>,
    vocabulary: &'vocabulary GenreVocabulary,
}

impl<'input, 'vocabulary> Lexer<'input, 'vocabulary> {
    pub fn new(input: &'input str, vocabulary: &'vocabulary GenreVocabulary) -> Self {
        Self {
            token_stream: RawToken::lexer(input),
            vocabulary,
        }
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.token_stream.next()?;
        let token = match token {
            Ok(RawToken::And) => Token::And,
            Ok(RawToken::Or) => Token::Or,
            Ok(RawToken::Not) => Token::Not,
            Ok(RawToken::LeftParenthesis) => Token::LeftParenthesis,
            Ok(RawToken::RightParenthesis) => Token::RightParenthesis,
            Ok(RawToken::Word(word)) => Token::Genre(GenreLiteral::new(word, self.vocabulary)),
            // Every non-space character starts some token.
            Err(()) => Token::Genre(GenreLiteral::new(self.token_stream.slice(), self.vocabulary)),
        };
        Some(token)
    }
}

/// Tokenize an expression typed as text.
pub fn tokenize(input: &str, vocabulary: &GenreVocabulary) -> Vec<Token> {
    Lexer::new(input, vocabulary).collect()
}

/// Tokenize an expression given as a list of tokens.
///
/// Each entry is exactly one token: `"("`, `")"`, an operator or a genre. Unlike the text form,
/// a genre may contain spaces (`"Science Fiction"`). Blank entries are skipped.
pub fn tokenize_list<S: AsRef<str>>(tokens: &[S], vocabulary: &GenreVocabulary) -> Vec<Token> {
    tokens
        .iter()
        .map(|token| token.as_ref().trim())
        .filter(|token| !token.is_empty())
        .map(|token| classify(token, vocabulary))
        .collect()
}

fn classify(token: &str, vocabulary: &GenreVocabulary) -> Token {
    match token {
        "(" => Token::LeftParenthesis,
        ")" => Token::RightParenthesis,
        _ if token.eq_ignore_ascii_case("and") => Token::And,
        _ if token.eq_ignore_ascii_case("or") => Token::Or,
        _ if token.eq_ignore_ascii_case("not") => Token::Not,
        _ => Token::Genre(GenreLiteral::new(token, vocabulary)),
    }
}
