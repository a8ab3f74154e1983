//! Filter a book catalog with boolean genre expressions.
//!
//! # Examples
//!
//! Filtering a catalog:
//!
//! ```
//! use book_filter::{Book, Catalog};
//! use rust_decimal::Decimal;
//!
//! let catalog = Catalog::new(vec![
//!     Book::new("It", &["Horror", "Fiction"]).with_ratings(Decimal::new(410, 2), 500),
//!     Book::new("Persuasion", &["Romance"]).with_ratings(Decimal::new(490, 2), 50),
//!     Book::new("The Shining", &["Horror", "Fiction"]).with_ratings(Decimal::new(427, 2), 900),
//! ]);
//!
//! // Keep the horror books that are not romances and have at least 100 ratings
//! let report = catalog.filter("Horror AND NOT Romance", 100);
//! report.matches().iter().for_each(|book| {
//!     println!("{} ({})", book.title(), book.average_rating());
//! });
//! assert_eq!(2, report.len());
//! assert_eq!("The Shining", report.matches()[0].title());
//! ```
//!
//! # Expressions
//!
//! An expression combines genres with the following operators, from the loosest to the tightest:
//!
//! * `OR`: either side matches;
//! * `AND`: both sides match;
//! * `NOT`: the genre or parenthesized expression that directly follows does not match.
//!
//! Parentheses group sub-expressions. Operators and genres are case-insensitive, but genres must
//! otherwise be spelled exactly as in the catalog: `war` does not match `warfare`. As an example,
//! the following are all valid expressions:
//!
//! ```text
//! horror
//! (horror OR thriller) AND NOT romance
//! NOT classics AND fiction
//! ```
//!
//! A blank expression matches every book. An expression that cannot be parsed also matches every
//! book, and the reason is reported alongside the results.
mod ast;
mod books;
mod catalog;
mod error;
mod genres;
mod lexer;
mod pagination;
mod parser;
mod session;
#[cfg(test)]
mod test_utils;

pub use crate::{
    ast::Node,
    books::{parse_minimum_rating_count, parse_rating_count, Book},
    catalog::{filter, Catalog, Report},
    error::{DatasetError, ParserError},
    genres::{GenreCount, GenreVocabulary},
    lexer::{tokenize, tokenize_list, GenreLiteral, Lexer, Token},
    pagination::{PageControl, Pagination},
    parser::{parse, parse_tokens},
    session::{FilterRequest, Session, Ticket, View},
};
