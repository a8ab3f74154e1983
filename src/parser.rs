use crate::{
    ast::Node,
    error::ParserError,
    genres::GenreVocabulary,
    lexer::{tokenize, Token},
};

/// Parse a genre expression.
///
/// Returns `Ok(None)` when the expression is blank, which means that every book passes.
#[inline]
pub fn parse(input: &str, vocabulary: &GenreVocabulary) -> Result<Option<Node>, ParserError> {
    let tokens = tokenize(input, vocabulary);
    if tokens.is_empty() {
        return Ok(None);
    }
    parse_tokens(&tokens).map(Some)
}

/// Parse a non-empty sequence of tokens.
///
/// The precedence goes, from the loosest to the tightest: `OR`, `AND`, `NOT`, then genres and
/// parenthesized expressions. `NOT` only applies to the primary that follows it, so
/// `NOT a AND b` is `(NOT a) AND b`.
pub fn parse_tokens(tokens: &[Token]) -> Result<Node, ParserError> {
    let mut parser = Parser {
        tokens,
        position: 0,
    };
    let expression = parser.or_expression()?;
    match parser.peek() {
        Some(token) => Err(ParserError::UnexpectedToken(token.to_string())),
        None => Ok(expression),
    }
}

struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Parser<'t> {
    fn or_expression(&mut self) -> Result<Node, ParserError> {
        let mut left = self.and_expression()?;
        while self.next_if(&Token::Or) {
            let right = self.and_expression()?;
            left = Node::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expression(&mut self) -> Result<Node, ParserError> {
        let mut left = self.not_expression()?;
        while self.next_if(&Token::And) {
            let right = self.not_expression()?;
            left = Node::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn not_expression(&mut self) -> Result<Node, ParserError> {
        if self.next_if(&Token::Not) {
            let value = self.primary()?;
            return Ok(Node::Not(Box::new(value)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Node, ParserError> {
        match self.peek() {
            Some(Token::LeftParenthesis) => {
                self.position += 1;
                let expression = self.or_expression()?;
                if self.next_if(&Token::RightParenthesis) {
                    Ok(expression)
                } else {
                    Err(ParserError::MissingClosingParenthesis)
                }
            }
            Some(Token::Genre(literal)) => {
                self.position += 1;
                literal
                    .canonical()
                    .map(|genre| Node::Genre(genre.to_owned()))
                    .ok_or_else(|| ParserError::UnknownGenre(literal.text().to_owned()))
            }
            _ => Err(ParserError::UnexpectedEnd),
        }
    }

    #[inline]
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn next_if(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }
}
