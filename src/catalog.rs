use crate::{
    ast::Node,
    books::Book,
    error::{DatasetError, ParserError},
    genres::GenreVocabulary,
    lexer::{tokenize, tokenize_list, Token},
    parser::parse_tokens,
};
use serde_json::Value;
use std::path::Path;

/// A loaded set of books along with the vocabulary of their genres.
///
/// The vocabulary is computed once, when the catalog is created, and never changes afterwards.
///
/// # Examples
///
/// ```rust
/// use book_filter::Catalog;
///
/// let catalog = Catalog::from_json(r#"[
///     {"Title": "Dracula", "Avg Rating": "4.01", "Num Ratings": "1,234,567", "Genres": ["Horror", "Classics"]},
///     {"Title": "Rebecca", "Avg Rating": "4.26", "Num Ratings": "520,000", "Genres": ["Romance", "Classics"]}
/// ]"#).unwrap();
///
/// let report = catalog.filter("classics AND NOT romance", 1000);
/// assert!(report.error().is_none());
/// assert_eq!(vec!["Dracula"], report.matches().iter().map(|book| book.title()).collect::<Vec<_>>());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    books: Vec<Book>,
    vocabulary: GenreVocabulary,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        let vocabulary = GenreVocabulary::from_books(&books);
        tracing::info!(
            books = books.len(),
            genres = vocabulary.len(),
            "catalog loaded"
        );
        Self { books, vocabulary }
    }

    /// Load a catalog from a JSON array of books.
    ///
    /// Entries that are not books are skipped. Anything but an array at the top level is an
    /// error.
    pub fn from_json(input: &str) -> Result<Self, DatasetError> {
        let payload: Value = serde_json::from_str(input).map_err(DatasetError::Json)?;
        let entries = match payload {
            Value::Array(entries) => entries,
            other => return Err(DatasetError::NotAnArray(json_kind(&other))),
        };

        let books = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(book) => Some(book),
                Err(error) => {
                    tracing::warn!(index, %error, "skipping malformed book");
                    None
                }
            })
            .collect();
        Ok(Self::new(books))
    }

    /// Load a catalog stored as one JSON book per line, the format written by the scraper.
    ///
    /// Blank and malformed lines are skipped.
    pub fn from_json_lines(input: &str) -> Self {
        let books = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str(line) {
                Ok(book) => Some(book),
                Err(error) => {
                    tracing::warn!(line = index + 1, %error, "skipping malformed book");
                    None
                }
            })
            .collect();
        Self::new(books)
    }

    /// Load a catalog from a file.
    ///
    /// Files ending with `.jl` or `.jsonl` are read as JSON lines, everything else as a JSON
    /// array.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json_lines = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| matches!(extension, "jl" | "jsonl"));
        if is_json_lines {
            Ok(Self::from_json_lines(&input))
        } else {
            Self::from_json(&input)
        }
    }

    #[inline]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[inline]
    pub fn vocabulary(&self) -> &GenreVocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Filter the catalog with a genre expression typed as text.
    ///
    /// See [`filter()`].
    pub fn filter(&self, expression: &str, minimum_rating_count: u64) -> Report<'_> {
        filter(
            &self.books,
            &self.vocabulary,
            expression,
            minimum_rating_count,
        )
    }

    /// Filter the catalog with a genre expression given as a list of tokens.
    pub fn filter_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
        minimum_rating_count: u64,
    ) -> Report<'_> {
        let tokens = tokenize_list(tokens, &self.vocabulary);
        search(&self.books, &tokens, minimum_rating_count)
    }
}

/// The books that passed a filter, best rated first.
#[derive(Clone, Debug)]
pub struct Report<'a> {
    matches: Vec<&'a Book>,
    error: Option<ParserError>,
}

impl<'a> Report<'a> {
    #[inline]
    pub fn matches(&self) -> &[&'a Book] {
        &self.matches
    }

    /// Why the expression was ignored, if it could not be parsed.
    #[inline]
    pub fn error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_parts(self) -> (Vec<&'a Book>, Option<ParserError>) {
        (self.matches, self.error)
    }
}

/// Filter books by genre expression and minimum rating count.
///
/// A blank expression lets every book through. An expression that fails to parse is reported in
/// [`Report::error()`] and also lets every book through. The remaining books are then restricted
/// to those with at least `minimum_rating_count` ratings and sorted by descending average rating;
/// books with the same rating keep their relative order.
pub fn filter<'a>(
    books: &'a [Book],
    vocabulary: &GenreVocabulary,
    expression: &str,
    minimum_rating_count: u64,
) -> Report<'a> {
    let tokens = tokenize(expression, vocabulary);
    search(books, &tokens, minimum_rating_count)
}

fn search<'a>(books: &'a [Book], tokens: &[Token], minimum_rating_count: u64) -> Report<'a> {
    let (predicate, error) = compile(tokens);
    let mut matches: Vec<&Book> = books
        .iter()
        .filter(|book| predicate.as_ref().map_or(true, |node| node.evaluate(book)))
        .filter(|book| book.rating_count() >= minimum_rating_count)
        .collect();
    matches.sort_by(|a, b| b.average_rating().cmp(&a.average_rating()));

    tracing::debug!(
        matches = matches.len(),
        books = books.len(),
        minimum_rating_count,
        "filter applied"
    );
    Report { matches, error }
}

fn compile(tokens: &[Token]) -> (Option<Node>, Option<ParserError>) {
    if tokens.is_empty() {
        return (None, None);
    }

    tracing::debug!(?tokens, "parsing genre expression");
    match parse_tokens(tokens) {
        Ok(node) => {
            tracing::debug!(expression = %node, "parsed genre expression");
            (Some(node), None)
        }
        Err(error) => {
            tracing::warn!(%error, "invalid genre expression, matching every book");
            (None, Some(error))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::books::{a_book, a_library};
    use std::io::Write;

    fn titles<'a>(report: &Report<'a>) -> Vec<&'a str> {
        report.matches().iter().map(|book| book.title()).collect()
    }

    #[test]
    fn an_empty_expression_matches_every_book() {
        let catalog = Catalog::new(a_library());

        let report = catalog.filter("", 0);
        let blank = catalog.filter("   ", 0);

        assert_eq!(catalog.len(), report.len());
        assert_eq!(catalog.len(), blank.len());
        assert!(report.error().is_none());
    }

    #[test]
    fn an_empty_expression_still_applies_the_rating_threshold() {
        let catalog = Catalog::new(a_library());

        let report = catalog.filter("", 100);

        assert!(report
            .matches()
            .iter()
            .all(|book| book.rating_count() >= 100));
        assert_eq!(catalog.len() - 2, report.len());
    }

    #[test]
    fn can_filter_by_genre_expression() {
        let catalog = Catalog::new(a_library());

        let report = catalog.filter("(horror OR thriller) AND NOT romance", 0);

        assert_eq!(
            vec!["The Shining", "Gone Girl", "Dracula", "Local Legends"],
            titles(&report)
        );
    }

    #[test]
    fn genres_are_case_insensitive() {
        let catalog = Catalog::new(a_library());

        let lower = titles(&catalog.filter("horror", 0));
        let upper = titles(&catalog.filter("HORROR", 0));
        let title = titles(&catalog.filter("Horror", 0));

        assert_eq!(vec!["The Shining", "Dracula", "Local Legends"], lower);
        assert_eq!(lower, upper);
        assert_eq!(lower, title);
    }

    #[test]
    fn books_without_genres_never_match_a_genre() {
        let catalog = Catalog::new(a_library());

        let report = catalog.filter("NOT horror", 0);

        assert!(titles(&report).contains(&"Untagged"));
        assert!(!titles(&catalog.filter("horror OR romance OR classics", 0)).contains(&"Untagged"));
    }

    #[test]
    fn fall_back_to_every_book_on_an_unknown_genre() {
        let catalog = Catalog::new(a_library());

        let report = catalog.filter("spaceopera", 100);

        assert_eq!(
            Some(&ParserError::UnknownGenre("spaceopera".to_string())),
            report.error()
        );
        assert_eq!(titles(&catalog.filter("", 100)), titles(&report));
    }

    #[test]
    fn fall_back_to_every_book_on_a_missing_parenthesis() {
        let catalog = Catalog::new(a_library());

        let report = catalog.filter("(horror AND thriller", 0);

        assert_eq!(
            Some(&ParserError::MissingClosingParenthesis),
            report.error()
        );
        assert_eq!(catalog.len(), report.len());
    }

    #[test]
    fn sort_by_descending_rating_and_keep_ties_in_order() {
        let books = vec![
            a_book("first", &["Fiction"], 320, 10),
            a_book("second", &["Fiction"], 480, 10),
            a_book("third", &["Fiction"], 480, 10),
            a_book("fourth", &["Fiction"], 100, 10),
        ];
        let catalog = Catalog::new(books);

        let report = catalog.filter("fiction", 0);

        assert_eq!(vec!["second", "third", "first", "fourth"], titles(&report));
    }

    #[test]
    fn can_filter_the_example_dataset() {
        let books = vec![
            a_book("book 1", &["Horror", "Fiction"], 410, 500),
            a_book("book 2", &["Romance"], 490, 50),
        ];
        let catalog = Catalog::new(books);

        let report = catalog.filter("Horror AND NOT Romance", 100);

        assert!(report.error().is_none());
        assert_eq!(vec!["book 1"], titles(&report));
    }

    #[test]
    fn can_filter_with_a_list_of_tokens() {
        let catalog = Catalog::new(a_library());

        let report = catalog.filter_tokens(&["Science Fiction", "OR", "Mystery"], 0);

        assert_eq!(vec!["Dune", "Gone Girl"], titles(&report));
    }

    #[test]
    fn can_use_the_filter_function_directly() {
        let books = a_library();
        let vocabulary = GenreVocabulary::from_books(&books);

        let (matches, error) = filter(&books, &vocabulary, "classics AND romance", 0).into_parts();

        assert!(error.is_none());
        assert_eq!(
            vec!["Pride and Prejudice", "Rebecca"],
            matches.iter().map(|book| book.title()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn can_load_a_json_array() {
        let catalog = Catalog::from_json(
            r#"[
                {"Title": "Dracula", "Avg Rating": "4.01", "Num Ratings": "1,234", "Genres": ["Horror"]},
                {"Title": "Rebecca", "Avg Rating": "4.26", "Num Ratings": "520", "Genres": ["Romance"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(2, catalog.len());
        assert_eq!(Some("Horror"), catalog.vocabulary().resolve("horror"));
    }

    #[test]
    fn skip_malformed_books() {
        let catalog = Catalog::from_json(
            r#"[{"Title": "Dracula", "Genres": ["Horror"]}, 42, {"Title": ["not", "a", "title"]}]"#,
        )
        .unwrap();

        assert_eq!(1, catalog.len());
    }

    #[test]
    fn return_an_error_when_the_dataset_is_not_an_array() {
        let object = Catalog::from_json(r#"{"books": []}"#);
        let invalid = Catalog::from_json("[{");

        assert!(matches!(object, Err(DatasetError::NotAnArray("an object"))));
        assert!(matches!(invalid, Err(DatasetError::Json(_))));
    }

    #[test]
    fn can_load_json_lines() {
        let input = concat!(
            r#"{"Title": "Dracula", "Genres": ["horror"]}"#,
            "\n\n",
            "not json\n",
            r#"{"Title": "Rebecca", "Genres": ["romance"]}"#,
            "\n"
        );

        let catalog = Catalog::from_json_lines(input);

        assert_eq!(2, catalog.len());
    }

    #[test]
    fn can_open_a_dataset_file() {
        let mut file = tempfile::Builder::new().suffix(".jl").tempfile().unwrap();
        writeln!(file, r#"{{"Title": "Dracula", "Genres": ["horror"]}}"#).unwrap();

        let catalog = Catalog::open(file.path()).unwrap();

        assert_eq!(1, catalog.len());
    }

    #[test]
    fn return_an_error_when_the_dataset_file_is_missing() {
        let directory = tempfile::tempdir().unwrap();

        let result = Catalog::open(directory.path().join("missing.json"));

        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}
