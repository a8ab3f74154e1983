use crate::{books::Book, genres::same_genre};
use std::{
    fmt::{Display, Formatter},
    ops::Not,
};

pub type TreeNode = Box<Node>;

/// A parsed genre expression.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Node {
    And(TreeNode, TreeNode),
    Or(TreeNode, TreeNode),
    Not(TreeNode),
    Genre(String),
}

impl Node {
    /// Check whether the book satisfies the expression.
    ///
    /// Genres are compared without case. A book without genres matches no genre.
    pub fn evaluate(&self, book: &Book) -> bool {
        match self {
            Self::And(left, right) => left.evaluate(book) && right.evaluate(book),
            Self::Or(left, right) => left.evaluate(book) || right.evaluate(book),
            Self::Not(value) => !value.evaluate(book),
            Self::Genre(genre) => book
                .genres()
                .iter()
                .any(|candidate| same_genre(candidate, genre)),
        }
    }
}

impl Not for Node {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

impl Display for Node {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And(left, right) => write!(formatter, "({left} AND {right})"),
            Self::Or(left, right) => write!(formatter, "({left} OR {right})"),
            Self::Not(value) => write!(formatter, "NOT {value}"),
            Self::Genre(genre) => write!(formatter, "{genre}"),
        }
    }
}
