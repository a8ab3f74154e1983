use crate::books::Book;
use itertools::Itertools;
use std::collections::HashMap;

/// The set of distinct genres found in a catalog.
///
/// Lookups are case-insensitive. Each genre keeps the spelling under which it was first seen in
/// the dataset; that spelling is what [`GenreVocabulary::resolve()`] hands back.
#[derive(Clone, Debug, Default)]
pub struct GenreVocabulary {
    by_keys: HashMap<String, usize>,
    entries: Vec<GenreEntry>,
}

#[derive(Clone, Debug)]
struct GenreEntry {
    key: String,
    name: String,
    books: usize,
}

/// A genre along with the number of books carrying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenreCount<'a> {
    pub name: &'a str,
    pub books: usize,
}

impl GenreVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the vocabulary of all the genres carried by the books.
    ///
    /// A genre listed twice by the same book (in any case) only counts once for that book.
    pub fn from_books<'a>(books: impl IntoIterator<Item = &'a Book>) -> Self {
        let mut vocabulary = Self::new();
        for book in books {
            book.genres()
                .iter()
                .unique_by(|genre| genre_key(genre))
                .for_each(|genre| vocabulary.record(genre));
        }
        vocabulary
    }

    /// Record one more book carrying `genre`.
    pub fn record(&mut self, genre: &str) {
        let key = genre_key(genre);
        if key.trim().is_empty() {
            return;
        }

        let index = *self.by_keys.entry(key.clone()).or_insert_with(|| {
            self.entries.push(GenreEntry {
                key,
                name: genre.to_owned(),
                books: 0,
            });
            self.entries.len() - 1
        });
        self.entries[index].books += 1;
    }

    /// Find the canonical spelling of `literal`.
    ///
    /// Only exact matches are accepted: `war` does not resolve to `warfare`.
    pub fn resolve(&self, literal: &str) -> Option<&str> {
        self.by_keys
            .get(&genre_key(literal))
            .map(|index| self.entries[*index].name.as_str())
    }

    #[inline]
    pub fn contains(&self, literal: &str) -> bool {
        self.resolve(literal).is_some()
    }

    /// Every genre, sorted case-insensitively.
    pub fn genres(&self) -> impl Iterator<Item = GenreCount<'_>> {
        self.entries
            .iter()
            .sorted_by(|a, b| a.key.cmp(&b.key))
            .map(|entry| GenreCount {
                name: &entry.name,
                books: entry.books,
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn genre_key(genre: &str) -> String {
    genre.chars().flat_map(char::to_lowercase).collect()
}

pub(crate) fn same_genre(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
